use serde::{Deserialize, Deserializer, Serialize};

/// Messaging-bot credentials supplied when monitoring starts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringConfig {
    #[serde(default)]
    pub bot_token: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub chat_id: String,
}

// Chat ids arrive as either `"-100123"` or `-100123` depending on the client.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ChatId {
        Text(String),
        Int(i64),
    }

    Ok(match ChatId::deserialize(deserializer)? {
        ChatId::Text(s) => s,
        ChatId::Int(n) => n.to_string(),
    })
}
