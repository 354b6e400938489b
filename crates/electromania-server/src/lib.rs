//! HTTP server with live reload for the Electromania site.
//!
//! Renders pages per request, accepts the contact and newsletter forms and,
//! in dev mode, watches the public directory and pushes reloads over a
//! WebSocket.

pub mod server;
pub mod watcher;
pub mod websocket;

pub use server::{ServerConfig, ServerError, SiteServer};
pub use watcher::{FileWatcher, WatchEvent};
pub use websocket::{ReloadHub, ReloadMessage};
