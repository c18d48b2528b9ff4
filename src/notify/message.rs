use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Footer {
    pub text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// One titled unit of a notification. Serialized as a Discord embed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageGroup {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub timestamp: DateTime<Utc>,
    pub footer: Footer,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<DisplayField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderProfile {
    pub name: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationPayload {
    pub username: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    #[serde(rename = "embeds")]
    pub groups: Vec<MessageGroup>,
}

impl NotificationPayload {
    pub fn new(sender: &SenderProfile, groups: Vec<MessageGroup>) -> Self {
        Self {
            username: sender.name.clone(),
            avatar_url: sender.avatar_url.clone(),
            groups,
        }
    }
}
