use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::os::unix::fs::PermissionsExt;
use std::os::unix::net::UnixStream;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

mod common;
use common::mock_asr::MockAsr;
use common::mock_tts::{MockTts, FAKE_WAV};
use common::TestContext;

use vocalis::assistant::Assistant;
use vocalis::ipc::{IpcClient, IpcRequest, IpcResponse, IpcServer};
use vocalis::nlp::{Intent, SlotValue};
use vocalis::store::{InteractionStore, MemoryStore};

fn raw_request(socket: &Path, request: &str) -> serde_json::Value {
    let mut stream = UnixStream::connect(socket).expect("Failed to connect to IPC socket");
    stream
        .write_all(request.as_bytes())
        .expect("Failed to write to socket");
    stream.write_all(b"\n").expect("Failed to write newline");

    let mut response = String::new();
    BufReader::new(stream)
        .read_line(&mut response)
        .expect("Failed to read response");
    assert!(!response.is_empty(), "Response should not be empty");
    serde_json::from_str(&response).expect("Response should be JSON")
}

#[test]
fn test_socket_permissions() {
    let ctx = TestContext::new();
    thread::sleep(Duration::from_millis(200));

    let metadata = fs::metadata(&ctx.socket_path).expect("Failed to get socket metadata");
    let mode = metadata.permissions().mode();
    assert_eq!(mode & 0o777, 0o600, "Socket must be owner-only");
}

#[test]
fn test_process_text_over_socket() {
    let ctx = TestContext::new();

    let resp = raw_request(
        &ctx.socket_path,
        r#"{"type":"process_text","seq_id":1,"text":"what time is it"}"#,
    );
    assert_eq!(resp["type"], "text_reply");
    assert_eq!(resp["seq_id"], 1);
    assert_eq!(resp["reply"]["intent"], "Time");
    let time = resp["reply"]["data"]["time"].as_str().unwrap();
    assert_eq!(time.len(), 5);
    assert!(resp["reply"]["message"].as_str().unwrap().contains(time));
}

#[test]
fn test_history_persists_interactions() {
    let ctx = TestContext::new();

    raw_request(
        &ctx.socket_path,
        r#"{"type":"process_text","seq_id":1,"text":"hello there"}"#,
    );
    raw_request(
        &ctx.socket_path,
        r#"{"type":"process_text","seq_id":2,"text":"tell me a joke"}"#,
    );

    let resp = raw_request(&ctx.socket_path, r#"{"type":"history","seq_id":3,"limit":5}"#);
    assert_eq!(resp["type"], "history_reply");
    let history = resp["history"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["text"], "tell me a joke");
    assert_eq!(history[0]["intent"], "Joke");
    assert_eq!(history[1]["intent"], "Greeting");

    let db = ctx.temp_dir.path().join("data/vocalis/interactions.db");
    assert!(db.exists(), "SQLite store should live in the data dir");
}

#[test]
fn test_malformed_request_gets_error() {
    let ctx = TestContext::new();

    let resp = raw_request(&ctx.socket_path, r#"{"type":"process_text","seq_id":"#);
    assert_eq!(resp["type"], "error");
    assert_eq!(resp["seq_id"], 0);
    assert!(resp["message"].as_str().unwrap().starts_with("Invalid request"));
}

fn in_process_server(
    asr: MockAsr,
) -> (tempfile::TempDir, Arc<MemoryStore>, Arc<MockTts>, IpcServer, Arc<Assistant>) {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(MemoryStore::new());
    let tts = Arc::new(MockTts::new());
    let assistant = Arc::new(Assistant::new(store.clone(), Box::new(asr), tts.clone()));
    let server = IpcServer::bind(&dir.path().join("test.sock"), 4096).unwrap();
    (dir, store, tts, server, assistant)
}

#[tokio::test]
async fn test_process_audio_through_client() {
    let (dir, store, tts, server, assistant) =
        in_process_server(MockAsr::with_phrase("what's the weather like"));
    let client = IpcClient::new(server.path());
    let handle = tokio::spawn(server.run(assistant));

    let clip = dir.path().join("clip.wav");
    fs::write(&clip, b"RIFF").unwrap();

    let resp = client
        .request(&IpcRequest::ProcessAudio {
            seq_id: 9,
            path: clip,
        })
        .await
        .unwrap();

    match resp {
        IpcResponse::AudioReply { seq_id, reply } => {
            assert_eq!(seq_id, 9);
            assert_eq!(reply.text, "what's the weather like");
            assert_eq!(reply.intent, Intent::Weather);
            match reply.data.get("temperature") {
                Some(SlotValue::Number(t)) => assert!((0..=34).contains(t)),
                other => panic!("bad temperature: {:?}", other),
            }
            use base64::Engine as _;
            let audio = base64::engine::general_purpose::STANDARD
                .decode(&reply.audio_response)
                .unwrap();
            assert_eq!(audio, FAKE_WAV);
            assert_eq!(tts.get_spoken(), vec![reply.message.clone()]);
        }
        other => panic!("unexpected response: {:?}", other),
    }

    assert_eq!(store.recent(10).unwrap().len(), 1);
    handle.abort();
}

#[tokio::test]
async fn test_process_audio_without_speech_is_error() {
    let (dir, store, _tts, server, assistant) = in_process_server(MockAsr::with_phrase("   "));
    let client = IpcClient::new(server.path());
    let handle = tokio::spawn(server.run(assistant));

    let resp = client
        .request(&IpcRequest::ProcessAudio {
            seq_id: 4,
            path: dir.path().join("silence.wav"),
        })
        .await
        .unwrap();

    match resp {
        IpcResponse::Error { seq_id, message } => {
            assert_eq!(seq_id, 4);
            assert!(message.contains("No speech detected"));
        }
        other => panic!("unexpected response: {:?}", other),
    }
    assert!(store.is_empty());
    handle.abort();
}

#[tokio::test]
async fn test_tts_failure_still_answers() {
    let (dir, _store, tts, server, assistant) = in_process_server(MockAsr::with_phrase("hello"));
    *tts.should_fail.lock().unwrap() = true;
    let client = IpcClient::new(server.path());
    let handle = tokio::spawn(server.run(assistant));

    let resp = client
        .request(&IpcRequest::ProcessAudio {
            seq_id: 5,
            path: dir.path().join("hello.wav"),
        })
        .await
        .unwrap();

    match resp {
        IpcResponse::AudioReply { reply, .. } => {
            assert_eq!(reply.intent, Intent::Greeting);
            assert!(reply.audio_response.is_empty());
            assert!(Intent::Greeting
                .templates()
                .contains(&reply.message.as_str()));
        }
        other => panic!("unexpected response: {:?}", other),
    }
    handle.abort();
}

#[tokio::test]
async fn test_asr_failure_is_reported() {
    let (dir, _store, _tts, server, assistant) = in_process_server(MockAsr::failing());
    let client = IpcClient::new(server.path());
    let handle = tokio::spawn(server.run(assistant));

    let resp = client
        .request(&IpcRequest::ProcessAudio {
            seq_id: 6,
            path: dir.path().join("broken.wav"),
        })
        .await
        .unwrap();
    assert!(matches!(resp, IpcResponse::Error { seq_id: 6, .. }));
    handle.abort();
}

#[tokio::test]
async fn test_history_default_limit() {
    let (_dir, _store, _tts, server, assistant) = in_process_server(MockAsr::new(Vec::new()));
    for i in 0..12 {
        assistant.process_text(&format!("search for item {}", i));
    }
    let client = IpcClient::new(server.path());
    let handle = tokio::spawn(server.run(assistant));

    let resp = client
        .request(&IpcRequest::History {
            seq_id: 8,
            limit: None,
        })
        .await
        .unwrap();
    match resp {
        IpcResponse::HistoryReply { history, .. } => {
            assert_eq!(history.len(), 10);
            assert!(history.iter().all(|r| r.intent == Intent::Search));
        }
        other => panic!("unexpected response: {:?}", other),
    }
    handle.abort();
}

#[tokio::test]
async fn test_oversized_request_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(MemoryStore::new());
    let assistant = Arc::new(Assistant::new(
        store.clone(),
        Box::new(MockAsr::new(Vec::new())),
        Arc::new(MockTts::new()),
    ));
    let server = IpcServer::bind(&dir.path().join("small.sock"), 64).unwrap();
    let client = IpcClient::new(server.path());
    let handle = tokio::spawn(server.run(assistant));

    let resp = client
        .request(&IpcRequest::ProcessText {
            seq_id: 11,
            text: "what's the weather like ".repeat(10),
        })
        .await
        .unwrap();

    match resp {
        IpcResponse::Error { seq_id, message } => {
            assert_eq!(seq_id, 0);
            assert!(message.starts_with("Invalid request"));
        }
        other => panic!("unexpected response: {:?}", other),
    }
    assert!(store.is_empty());
    handle.abort();
}
