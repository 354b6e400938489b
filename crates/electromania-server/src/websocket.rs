//! Live reload over WebSocket.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Messages pushed to connected browsers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReloadMessage {
    /// Connection established
    Connected,

    /// Reload the page; `path` names the file that changed
    Reload { path: Option<String> },
}

/// Fans reload notifications out to every open tab.
#[derive(Debug, Clone)]
pub struct ReloadHub {
    sender: broadcast::Sender<ReloadMessage>,
}

impl ReloadHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(64);
        Self { sender }
    }

    /// Send a message to all connected clients.
    pub fn send(&self, msg: ReloadMessage) {
        // No receivers just means no open tabs
        let _ = self.sender.send(msg);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ReloadMessage> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ReloadHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Browser side of live reload. Connects back to the host that served the page.
pub fn reload_client_script(endpoint: &str) -> String {
    format!(
        r#"(function () {{
  'use strict';

  var scheme = location.protocol === 'https:' ? 'wss://' : 'ws://';
  var attempts = 0;

  function connect() {{
    var ws = new WebSocket(scheme + location.host + '{endpoint}');

    ws.onopen = function () {{
      if (attempts > 0) location.reload();
      attempts = 0;
    }};

    ws.onmessage = function (event) {{
      var msg = JSON.parse(event.data);
      if (msg.type === 'reload') {{
        console.log('[reload]', msg.path || '');
        location.reload();
      }}
    }};

    ws.onclose = function () {{
      if (attempts >= 10) return;
      attempts++;
      setTimeout(connect, 1000 * attempts);
    }};
  }}

  connect();
}})();
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hub_broadcasts_to_every_subscriber() {
        let hub = ReloadHub::new();
        let mut first = hub.subscribe();
        let mut second = hub.subscribe();
        assert_eq!(hub.subscriber_count(), 2);

        hub.send(ReloadMessage::Reload { path: None });

        assert_eq!(first.try_recv().unwrap(), ReloadMessage::Reload { path: None });
        assert_eq!(second.try_recv().unwrap(), ReloadMessage::Reload { path: None });
    }

    #[test]
    fn send_without_subscribers_is_silent() {
        ReloadHub::new().send(ReloadMessage::Connected);
    }

    #[test]
    fn serializes_tagged_messages() {
        let json = serde_json::to_string(&ReloadMessage::Reload {
            path: Some("public/images/logo192.svg".to_string()),
        })
        .unwrap();

        assert!(json.contains(r#""type":"reload""#));
        assert!(json.contains("logo192.svg"));
    }

    #[test]
    fn client_script_targets_endpoint() {
        let script = reload_client_script("/__reload");
        assert!(script.contains("location.host + '/__reload'"));
    }
}
