//! Interactive shell command.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Args;
use tokio::io::BufReader;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use filedesk_core::config::AppConfig;
use filedesk_core::error::AppError;
use filedesk_service::Workspace;

use crate::output::OutputFormat;
use crate::shell::{self, Session};

/// Arguments for the shell command
#[derive(Debug, Args)]
pub struct ShellArgs {
    /// Read commands from a file instead of stdin
    #[arg(short, long)]
    pub script: Option<PathBuf>,
}

/// Execute the shell command
pub async fn execute(
    args: &ShellArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let ws = Workspace::new(config);
    spawn_event_logger(&ws);

    let mut session = Session::new(ws, format);
    let mut stdout = tokio::io::stdout();

    match &args.script {
        Some(path) => {
            let file = tokio::fs::File::open(path).await.map_err(|e| {
                AppError::not_found(format!("Cannot open script '{}': {e}", path.display()))
            })?;
            info!(script = %path.display(), "Running shell script");
            shell::run(&mut session, BufReader::new(file), &mut stdout, false).await
        }
        None => {
            let prompt = std::io::stdin().is_terminal();
            let stdin = BufReader::new(tokio::io::stdin());
            shell::run(&mut session, stdin, &mut stdout, prompt).await
        }
    }
}

/// Echo every domain event at debug level.
fn spawn_event_logger(ws: &Workspace) {
    let mut events = ws.events.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    debug!(event_id = %event.id, payload = ?event.payload, "Domain event");
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Event logger lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}
