//! # Faktur Editor Library
//!
//! The invoice editor and its command-line host.
//!
//! ## Module Organization
//! ```text
//! faktur_editor/
//! ├── lib.rs          ◄─── You are here (logging & run)
//! ├── cli.rs          ◄─── clap parsing, dispatch, tables
//! ├── surface.rs      ◄─── Surface trait, in-memory template
//! ├── render.rs       ◄─── Rows, column visibility, totals, fields
//! ├── dialogs.rs      ◄─── Confirm / alert prompts
//! ├── state/
//! │   ├── mod.rs      ◄─── EditorState (Arc<Mutex<Editor>>)
//! │   ├── editor.rs   ◄─── Editor controller
//! │   └── config.rs   ◄─── AppConfig (file + env)
//! ├── commands/
//! │   ├── mod.rs      ◄─── DocumentResponse
//! │   ├── item.rs     ◄─── Row commands
//! │   ├── document.rs ◄─── Field, label, column, logo, clear
//! │   └── export.rs   ◄─── PDF export command
//! ├── export/
//! │   ├── mod.rs      ◄─── ExportGateway, Rasterizer, Downloader
//! │   ├── pdf.rs      ◄─── JPEG + pdf-writer
//! │   └── wireframe.rs◄─── Bundled rasterizer
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod cli;
pub mod commands;
pub mod dialogs;
pub mod error;
pub mod export;
pub mod render;
pub mod state;
pub mod surface;

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use cli::Cli;

/// Runs one CLI invocation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Invocation                                        │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, to stderr                     │
/// │     • Default: info,faktur=debug,sqlx=warn; RUST_LOG overrides          │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults, config.toml, FAKTUR_* environment                       │
/// │                                                                         │
/// │  3. Open Storage ─────────────────────────────────────────────────────► │
/// │     • Linux: ~/.local/share/faktur/faktur.db                            │
/// │     • SQLite with WAL mode, pending migrations applied                  │
/// │                                                                         │
/// │  4. Open Editor ──────────────────────────────────────────────────────► │
/// │     • Defaults, stored logo and document, full render                   │
/// │                                                                         │
/// │  5. Run Command, print result ────────────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    debug!(?cli, "Parsed command line");

    match cli::execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = ?e.code, "Command failed");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=faktur=trace` - Show trace for faktur crates only
/// - Default: `info,faktur=debug,sqlx=warn`
///
/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,faktur=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
