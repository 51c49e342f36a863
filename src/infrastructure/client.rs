#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use futures::stream::TryStreamExt;
use serde::Deserialize;
use serde::Serialize;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tokio_util::io::StreamReader;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendPrompt;
use crate::domain::models::CodeArtifact;
use crate::domain::models::Event;
use crate::domain::models::HistoryMessage;

fn convert_err(err: reqwest::Error) -> std::io::Error {
    let err_msg = err.to_string();
    return std::io::Error::new(std::io::ErrorKind::Interrupted, err_msg);
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionRequest {
    message: String,
    #[serde(rename = "conversationHistory")]
    conversation_history: Vec<HistoryMessage>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct StreamEvent {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    data: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    filename: Option<String>,
}

/// HTTP client for the agent service. The stream endpoint answers with one
/// JSON event per `data:` line; events are forwarded in arrival order and a
/// missing `end` event is reported as a transport failure.
pub struct AgentClient {
    url: String,
    timeout: String,
}

impl Default for AgentClient {
    fn default() -> AgentClient {
        return AgentClient {
            url: Config::get(ConfigKey::AgentURL),
            timeout: Config::get(ConfigKey::AgentHealthCheckTimeout),
        };
    }
}

impl AgentClient {
    pub async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Agent URL is not defined");
        }

        let res = reqwest::Client::new()
            .get(format!("{url}/api/health", url = self.url))
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "Agent is not reachable");
            bail!("Agent is not reachable");
        }

        let status = res.unwrap().status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "Agent health check failed");
            bail!("Agent health check failed");
        }

        return Ok(());
    }

    pub async fn get_completion<'a>(
        &self,
        prompt: BackendPrompt,
        tx: &'a mpsc::UnboundedSender<Event>,
    ) -> Result<()> {
        let req = CompletionRequest {
            message: prompt.message,
            conversation_history: prompt.conversation_history,
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/api/chat/stream", url = self.url))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make completion request to the agent"
            );
            bail!("Failed to make completion request to the agent");
        }

        let stream = res.bytes_stream().map_err(convert_err);
        let mut lines_reader = StreamReader::new(stream).lines();

        let mut done = false;
        while let Ok(line) = lines_reader.next_line().await {
            if line.is_none() {
                break;
            }

            let mut cleaned_line = line.unwrap().trim().to_string();
            if cleaned_line.starts_with("data:") {
                cleaned_line = cleaned_line.split_off(5).trim().to_string();
            }
            if cleaned_line.is_empty() {
                continue;
            }

            let event: StreamEvent = match serde_json::from_str(&cleaned_line) {
                Ok(event) => event,
                Err(err) => {
                    tracing::warn!(error = ?err, line = cleaned_line, "Skipping malformed stream line");
                    continue;
                }
            };
            tracing::debug!(body = ?event, "Stream event");

            match event.event_type.as_str() {
                "content" => {
                    tx.send(Event::StreamContent(event.data))?;
                }
                "code" => {
                    let artifact = CodeArtifact::new(
                        event.language.as_deref().unwrap_or("text"),
                        &event.data,
                        event.filename,
                    );
                    tx.send(Event::StreamArtifact(artifact))?;
                }
                "end" => {
                    done = true;
                    break;
                }
                other => {
                    tracing::warn!(event_type = other, "Skipping unknown stream event");
                }
            }
        }

        if !done {
            bail!("The stream ended before the agent finished its turn");
        }

        tx.send(Event::StreamDone)?;

        return Ok(());
    }
}
