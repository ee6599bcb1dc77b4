//! Host lifecycle triggers: periodic wake signals and push payloads.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::scheduler::{CycleReport, Monitor};
use crate::web::websocket::ClientMessage;

pub const NOTIFICATION_ICON: &str = "icon128.png";
pub const NOTIFICATION_BADGE: &str = "icon48.png";
pub const NOTIFICATION_VIBRATE: [u32; 3] = [200, 100, 200];
const DEFAULT_PUSH_TITLE: &str = "Token Alert";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PushPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

impl PushPayload {
    pub fn to_notification(&self) -> ClientMessage {
        ClientMessage::ShowNotification {
            title: self
                .title
                .clone()
                .unwrap_or_else(|| DEFAULT_PUSH_TITLE.to_string()),
            body: self.body.clone().unwrap_or_default(),
            icon: NOTIFICATION_ICON.to_string(),
            badge: NOTIFICATION_BADGE.to_string(),
            vibrate: NOTIFICATION_VIBRATE.to_vec(),
        }
    }
}

impl Monitor {
    /// Runs exactly one check when `tag` is this monitor's sync tag; other tags
    /// belong to someone else and are ignored.
    pub async fn on_periodic_wake(&self, tag: &str) -> Option<CycleReport> {
        if tag != self.settings().sync_tag {
            debug!("Ignoring periodic wake for unrelated tag '{}'", tag);
            return None;
        }

        info!("⏰ Periodic wake '{}' received, running check", tag);
        Some(self.run_check().await)
    }

    /// Re-emits a host push payload to clients as a system notification.
    pub async fn show_push_notification(&self, payload: &PushPayload) -> usize {
        self.hub().broadcast(payload.to_notification()).await
    }
}
