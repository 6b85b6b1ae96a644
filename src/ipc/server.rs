//! IPC Server
//!
//! Unix socket server exposing the assistant to local clients.

use super::{IpcRequest, IpcResponse};
use crate::assistant::Assistant;
use crate::error::AssistantResult;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tracing::{debug, info, warn};

/// Pause after a failed accept (e.g. out of file descriptors)
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// IPC server bound to a socket path
pub struct IpcServer {
    listener: UnixListener,
    path: PathBuf,
    max_request_bytes: u64,
}

impl IpcServer {
    /// Bind the socket, replacing any stale one, with owner-only permissions
    pub fn bind(path: &Path, max_request_bytes: u64) -> AssistantResult<Self> {
        if path.exists() {
            let _ = fs::remove_file(path);
        }

        let listener = UnixListener::bind(path)?;

        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        if let Err(e) = fs::set_permissions(path, perms) {
            warn!("⚠️ Failed to set strict IPC socket permissions: {}", e);
        } else {
            debug!("🔒 IPC socket permissions set to 0600");
        }

        info!("🔌 IPC server listening on {:?}", path);
        Ok(Self {
            listener,
            path: path.to_path_buf(),
            max_request_bytes,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Accept connections until the task is dropped
    pub async fn run(self, assistant: Arc<Assistant>) -> AssistantResult<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, _)) => {
                    let assistant = assistant.clone();
                    let max = self.max_request_bytes;
                    tokio::spawn(async move {
                        if let Err(e) = handle_client(stream, assistant, max).await {
                            warn!("IPC client error: {}", e);
                        }
                    });
                }
                Err(e) => {
                    warn!("IPC accept error: {}", e);
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                }
            }
        }
    }
}

impl Drop for IpcServer {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
        info!("🔌 IPC server stopped");
    }
}

/// Handle a single client connection: one request line, one response line
async fn handle_client(
    stream: UnixStream,
    assistant: Arc<Assistant>,
    max_request_bytes: u64,
) -> AssistantResult<()> {
    let (read_half, mut write_half) = stream.into_split();

    let mut reader = BufReader::new(read_half).take(max_request_bytes);
    let mut line = String::new();
    reader.read_line(&mut line).await?;

    if line.is_empty() {
        return Ok(());
    }

    let response = match serde_json::from_str::<IpcRequest>(line.trim()) {
        Ok(request) => {
            debug!("📨 IPC request: {:?}", request);
            dispatch(&assistant, request).await
        }
        Err(e) => {
            warn!("⚠️ Rejected malformed IPC request: {}", e);
            IpcResponse::Error {
                seq_id: 0,
                message: format!("Invalid request: {}", e),
            }
        }
    };

    let response_json = serde_json::to_string(&response)? + "\n";
    write_half.write_all(response_json.as_bytes()).await?;
    Ok(())
}

async fn dispatch(assistant: &Assistant, request: IpcRequest) -> IpcResponse {
    match request {
        IpcRequest::ProcessText { seq_id, text } => IpcResponse::TextReply {
            seq_id,
            reply: assistant.process_text(&text),
        },
        IpcRequest::ProcessAudio { seq_id, path } => {
            match assistant.process_audio(&path).await {
                Ok(reply) => IpcResponse::AudioReply { seq_id, reply },
                Err(e) => IpcResponse::Error {
                    seq_id,
                    message: e.to_string(),
                },
            }
        }
        IpcRequest::History { seq_id, limit } => match assistant.history(limit) {
            Ok(history) => IpcResponse::HistoryReply { seq_id, history },
            Err(_) => IpcResponse::Error {
                seq_id,
                message: "Error retrieving interaction history".to_string(),
            },
        },
    }
}
