//! IPC Client
//!
//! One-shot requests against a running assistant socket.

use super::{IpcRequest, IpcResponse};
use crate::error::{AssistantError, AssistantResult};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct IpcClient {
    socket_path: PathBuf,
}

impl IpcClient {
    pub fn new(socket_path: &Path) -> Self {
        Self {
            socket_path: socket_path.to_path_buf(),
        }
    }

    /// Send one request and wait for its response
    pub async fn request(&self, request: &IpcRequest) -> AssistantResult<IpcResponse> {
        let stream = UnixStream::connect(&self.socket_path).await.map_err(|e| {
            AssistantError::Ipc(format!(
                "Could not connect to {:?}: {}",
                self.socket_path, e
            ))
        })?;
        let (read_half, mut write_half) = stream.into_split();

        let payload = serde_json::to_string(request)? + "\n";
        write_half.write_all(payload.as_bytes()).await?;
        debug!("📤 Sent IPC request {}", request.seq_id());

        let mut line = String::new();
        BufReader::new(read_half).read_line(&mut line).await?;
        if line.is_empty() {
            return Err(AssistantError::Ipc("Server closed the connection".into()));
        }

        Ok(serde_json::from_str(line.trim())?)
    }
}
