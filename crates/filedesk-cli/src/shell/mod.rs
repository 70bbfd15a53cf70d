//! Line-oriented shell over a workspace.

pub mod parser;
pub mod session;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use filedesk_core::result::AppResult;

pub use session::{Outcome, Session};

use crate::output;

/// Read commands from `input` until end of input or `quit`, writing
/// results to `out`.
///
/// A failing command prints its error and the loop carries on.
pub async fn run<R, W>(session: &mut Session, input: R, out: &mut W, prompt: bool) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    loop {
        if prompt {
            out.write_all(session.prompt().as_bytes()).await?;
            out.flush().await?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        let mut text = match session.run_line(&line).await {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Continue(text)) => text,
            Err(e) => {
                debug!(error = %e, line = %line, "Shell command failed");
                output::error_line(&e.message)
            }
        };

        for note in session.drain_notifications() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(&note);
        }

        if !text.is_empty() {
            out.write_all(text.as_bytes()).await?;
            out.write_all(b"\n").await?;
        }
    }

    out.flush().await?;
    Ok(())
}
