use anyhow::bail;
use anyhow::Result;
use tokio::sync::mpsc;

use super::AgentClient;
use crate::domain::models::BackendPrompt;
use crate::domain::models::Event;
use crate::domain::models::HistoryMessage;

impl AgentClient {
    fn with_url(url: String) -> AgentClient {
        return AgentClient {
            url,
            timeout: "200".to_string(),
        };
    }
}

fn prompt() -> BackendPrompt {
    return BackendPrompt::new(
        "Build me a counter".to_string(),
        vec![HistoryMessage {
            role: "assistant".to_string(),
            content: "How may I help you?".to_string(),
        }],
    );
}

#[tokio::test]
async fn it_successfully_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/api/health").with_status(200).create();

    let client = AgentClient::with_url(server.url());
    let res = client.health_check().await;

    assert!(res.is_ok());
    mock.assert();
}

#[tokio::test]
async fn it_fails_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/api/health").with_status(500).create();

    let client = AgentClient::with_url(server.url());
    let res = client.health_check().await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_streams_content_code_and_end_in_order() -> Result<()> {
    let body = [
        r#"data: {"type": "content", "data": "Here is a counter:\n\n"}"#,
        r#"data: {"type": "code", "data": "const App = () => null;", "language": "jsx", "filename": "App.jsx"}"#,
        "",
        "data: not json at all",
        r#"data: {"type": "content", "data": "Enjoy!"}"#,
        r#"data: {"type": "end"}"#,
    ]
    .join("\n");

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/chat/stream")
        .with_status(200)
        .with_body(body)
        .create();

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();

    let client = AgentClient::with_url(server.url());
    client.get_completion(prompt(), &tx).await?;

    mock.assert();

    match rx.recv().await.unwrap() {
        Event::StreamContent(text) => assert_eq!(text, "Here is a counter:\n\n"),
        _ => bail!("Wrong type from recv"),
    }

    match rx.recv().await.unwrap() {
        Event::StreamArtifact(artifact) => {
            assert_eq!(artifact.language, "jsx");
            assert_eq!(artifact.code, "const App = () => null;");
            assert_eq!(artifact.filename.as_deref(), Some("App.jsx"));
        }
        _ => bail!("Wrong type from recv"),
    }

    match rx.recv().await.unwrap() {
        Event::StreamContent(text) => assert_eq!(text, "Enjoy!"),
        _ => bail!("Wrong type from recv"),
    }

    assert!(matches!(rx.recv().await.unwrap(), Event::StreamDone));

    return Ok(());
}

#[tokio::test]
async fn it_fails_when_the_stream_never_ends() {
    let body = r#"data: {"type": "content", "data": "partial"}"#;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/chat/stream")
        .with_status(200)
        .with_body(body)
        .create();

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();

    let client = AgentClient::with_url(server.url());
    let res = client.get_completion(prompt(), &tx).await;

    mock.assert();
    assert!(res.is_err());

    match rx.recv().await.unwrap() {
        Event::StreamContent(text) => assert_eq!(text, "partial"),
        _ => panic!("Wrong type from recv"),
    }
}

#[tokio::test]
async fn it_fails_on_server_errors() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/chat/stream")
        .with_status(500)
        .create();

    let (tx, _rx) = mpsc::unbounded_channel::<Event>();

    let client = AgentClient::with_url(server.url());
    let res = client.get_completion(prompt(), &tx).await;

    mock.assert();
    assert!(res.is_err());
}
