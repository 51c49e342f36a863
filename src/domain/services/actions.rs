use std::path::PathBuf;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::clipboard::ClipboardService;
use super::downloads;
use super::preview::PreviewDocument;
use crate::domain::models::Action;
use crate::domain::models::CodeArtifact;
use crate::domain::models::Event;
use crate::infrastructure::client::AgentClient;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /copy (/c) [BLOCK_NUMBER?] - Copies the latest artifact's code to your clipboard. When a BLOCK_NUMBER is used, the code block tagged with that number in the chat is copied instead.
- /artifact (/a) - Rescans the latest completed reply for fenced code blocks and opens the newest one in the panel.
- /preview (/p) - Renders the current artifact to a live preview page and opens it in your browser.
- /download (/d) [BLOCK_NUMBER?] - Saves an artifact's code to your downloads directory.
- /quit /exit (/q) - Exit Flapjack.
- /help (/h) - Provides this help menu.

HOTKEYS:
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+A - Toggle the artifact panel.
- CTRL+P - Switch the artifact panel between code and preview views.
- CTRL+C - Interrupt waiting for a reply if in progress, otherwise exit.
        "#;

    return text.trim().to_string();
}

fn cache_dir() -> PathBuf {
    return dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("flapjack");
}

/// Renders the artifact's preview page to the cache directory and opens it
/// with the platform handler. The page is self-contained, so the browser
/// needs nothing from us after the handoff.
async fn open_preview(artifact: &CodeArtifact) -> Result<PathBuf> {
    let document = PreviewDocument::build(artifact);

    let dir = cache_dir();
    tokio::fs::create_dir_all(&dir).await?;
    let path = dir.join(format!("preview-{}.html", artifact.id));
    tokio::fs::write(&path, &document.html).await?;

    #[cfg(target_os = "macos")]
    let opener = "open";
    #[cfg(target_os = "windows")]
    let opener = "explorer";
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let opener = "xdg-open";

    tokio::process::Command::new(opener).arg(&path).spawn()?;

    return Ok(path);
}

fn copy_text(text: String, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    ClipboardService::set(text)?;
    tx.send(Event::Notice("Copied to clipboard.".to_string()))?;

    return Ok(());
}

fn worker_error(err: anyhow::Error, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    tx.send(Event::StreamError(format!(
        "The agent request failed with the following error: {err:?}"
    )))?;

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        // Lazy default.
        let mut worker: JoinHandle<Result<()>> = tokio::spawn(async {
            return Ok(());
        });

        loop {
            let event = rx.recv().await;
            if event.is_none() {
                continue;
            }

            let worker_tx = tx.clone();
            match event.unwrap() {
                Action::BackendAbort() => {
                    worker.abort();
                }
                Action::BackendRequest(prompt) => {
                    worker = tokio::spawn(async move {
                        let res = AgentClient::default().get_completion(prompt, &worker_tx).await;

                        if let Err(err) = res {
                            worker_error(err, &worker_tx)?;
                        }

                        return Ok(());
                    });
                }
                Action::CopyText(text) => {
                    copy_text(text, &tx)?;
                }
                Action::SaveArtifact(artifact) => match downloads::save_artifact(&artifact).await {
                    Ok(path) => {
                        tx.send(Event::Notice(format!("Saved to {}.", path.display())))?;
                    }
                    Err(err) => {
                        tx.send(Event::Notice(format!("Download failed: {err}.")))?;
                    }
                },
                Action::OpenPreview(artifact) => match open_preview(&artifact).await {
                    Ok(_) => {
                        tx.send(Event::Notice("Preview opened in your browser.".to_string()))?;
                    }
                    Err(err) => {
                        tx.send(Event::Notice(format!("Preview failed: {err}.")))?;
                    }
                },
            }
        }
    }
}
