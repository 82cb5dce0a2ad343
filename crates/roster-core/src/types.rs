//! Bot Connector wire types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A conversation participant (or the bot itself)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelAccount {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChannelAccount {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
        }
    }
}

/// The conversation an activity belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationAccount {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "isGroup", default, skip_serializing_if = "Option::is_none")]
    pub is_group: Option<bool>,
}

/// An activity as posted to (and sent from) the connector service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "type")]
    pub activity_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(rename = "channelId", default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(rename = "serviceUrl", default, skip_serializing_if = "Option::is_none")]
    pub service_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<ChannelAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<ChannelAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation: Option<ConversationAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "membersAdded", default, skip_serializing_if = "Vec::is_empty")]
    pub members_added: Vec<ChannelAccount>,
    #[serde(rename = "membersRemoved", default, skip_serializing_if = "Vec::is_empty")]
    pub members_removed: Vec<ChannelAccount>,
    #[serde(rename = "replyToId", default, skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<String>,
}

impl Activity {
    /// Build an outgoing text message for a conversation
    pub fn message(address: &Address, text: impl Into<String>) -> Self {
        Self {
            activity_type: "message".to_string(),
            id: None,
            timestamp: Some(Utc::now()),
            channel_id: None,
            service_url: Some(address.service_url.clone()),
            from: Some(address.bot.clone()),
            recipient: None,
            conversation: Some(ConversationAccount {
                id: address.conversation_id.clone(),
                name: None,
                is_group: None,
            }),
            text: Some(text.into()),
            members_added: Vec::new(),
            members_removed: Vec::new(),
            reply_to_id: None,
        }
    }

    /// Extract the routing address from an inbound activity
    pub fn address(&self) -> Result<Address> {
        let conversation_id = self
            .conversation
            .as_ref()
            .map(|c| c.id.clone())
            .ok_or_else(|| Error::Activity("missing conversation".to_string()))?;
        let service_url = self
            .service_url
            .clone()
            .ok_or_else(|| Error::Activity("missing serviceUrl".to_string()))?;
        let bot = self
            .recipient
            .clone()
            .ok_or_else(|| Error::Activity("missing recipient".to_string()))?;

        Ok(Address {
            conversation_id,
            service_url,
            bot,
        })
    }
}

/// Routing information for replying to a specific conversation.
///
/// Immutable per activity: the conversation id, the regional service host
/// REST calls must target, and the bot's own identity on that channel.
#[derive(Debug, Clone)]
pub struct Address {
    pub conversation_id: String,
    pub service_url: String,
    pub bot: ChannelAccount,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_message_activity() {
        let json = r#"{
            "type": "message",
            "id": "act-1",
            "channelId": "slack",
            "serviceUrl": "https://slack.botframework.com",
            "from": {"id": "u1", "name": "Alice"},
            "recipient": {"id": "bot1", "name": "HelperBot"},
            "conversation": {"id": "conv-42", "isGroup": true},
            "text": "who is here?"
        }"#;

        let activity: Activity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.activity_type, "message");
        assert_eq!(activity.text.as_deref(), Some("who is here?"));
        assert!(activity.members_added.is_empty());

        let address = activity.address().unwrap();
        assert_eq!(address.conversation_id, "conv-42");
        assert_eq!(address.service_url, "https://slack.botframework.com");
        assert_eq!(address.bot.id, "bot1");
        assert_eq!(address.bot.name.as_deref(), Some("HelperBot"));
    }

    #[test]
    fn test_parse_conversation_update() {
        let json = r#"{
            "type": "conversationUpdate",
            "serviceUrl": "https://smba.trafficmanager.net/amer/",
            "recipient": {"id": "bot1", "name": "HelperBot"},
            "conversation": {"id": "conv-42"},
            "membersAdded": [{"id": "u9"}],
            "membersRemoved": []
        }"#;

        let activity: Activity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.activity_type, "conversationUpdate");
        assert_eq!(activity.members_added.len(), 1);
        assert_eq!(activity.members_added[0].id, "u9");
        assert!(activity.members_added[0].name.is_none());
        assert!(activity.members_removed.is_empty());
    }

    #[test]
    fn test_address_requires_conversation() {
        let activity: Activity =
            serde_json::from_str(r#"{"type": "message", "serviceUrl": "https://x"}"#).unwrap();
        assert!(matches!(activity.address(), Err(Error::Activity(_))));
    }

    #[test]
    fn test_outgoing_message_wire_shape() {
        let address = Address {
            conversation_id: "conv-42".to_string(),
            service_url: "https://slack.botframework.com".to_string(),
            bot: ChannelAccount::new("bot1", "HelperBot"),
        };

        let reply = Activity::message(&address, "hello");
        let value = serde_json::to_value(&reply).unwrap();

        assert_eq!(value["type"], "message");
        assert_eq!(value["text"], "hello");
        assert_eq!(value["from"]["id"], "bot1");
        assert_eq!(value["conversation"]["id"], "conv-42");
        // Empty member lists must not appear on the wire
        assert!(value.get("membersAdded").is_none());
        assert!(value.get("replyToId").is_none());
    }
}
