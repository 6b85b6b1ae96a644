//! IPC (Inter-Process Communication) Module
//!
//! Unix socket access to a running assistant.
//! Protocol: JSON over newline-delimited messages, one request per connection.

pub mod client;
pub mod messages;
pub mod server;

pub use client::IpcClient;
pub use messages::*;
pub use server::IpcServer;
