//! # Dialogs
//!
//! Blocking confirm and alert prompts shown by the editor.
//!
//! The CLI asks on the terminal with `inquire`; `--yes` swaps in
//! [`AssumeYes`]. Tests script the answers.

use inquire::Confirm;
use tracing::debug;

/// Asked before wiping the stored document.
pub const CLEAR_PROMPT: &str = "Reset semua data? Data akan hilang.";

/// Shown when the PDF export fails.
pub const EXPORT_FAILED_ALERT: &str = "Terjadi kesalahan saat membuat PDF.";

/// Download button text while an export runs.
pub const CONVERTING_LABEL: &str = "Converting...";

/// User-facing prompts.
pub trait Dialogs {
    /// Returns true when the user accepts.
    fn confirm(&mut self, message: &str) -> bool;

    fn alert(&mut self, message: &str);
}

/// Terminal prompts. A prompt that cannot be shown counts as "no".
#[derive(Debug, Default)]
pub struct TerminalDialogs;

impl Dialogs for TerminalDialogs {
    fn confirm(&mut self, message: &str) -> bool {
        match Confirm::new(message).with_default(false).prompt() {
            Ok(answer) => answer,
            Err(e) => {
                debug!(error = %e, "Confirm prompt unavailable");
                false
            }
        }
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

/// Accepts every confirmation without asking.
#[derive(Debug, Default)]
pub struct AssumeYes;

impl Dialogs for AssumeYes {
    fn confirm(&mut self, _message: &str) -> bool {
        true
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

/// Answers from a script and records what was shown.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct ScriptedDialogs {
    pub answer: bool,
    pub prompts: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
    pub alerts: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
}

#[cfg(test)]
impl ScriptedDialogs {
    pub fn answering(answer: bool) -> Self {
        ScriptedDialogs {
            answer,
            ..ScriptedDialogs::default()
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Dialogs for ScriptedDialogs {
    fn confirm(&mut self, message: &str) -> bool {
        self.prompts.lock().unwrap().push(message.to_string());
        self.answer
    }

    fn alert(&mut self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}
