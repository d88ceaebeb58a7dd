use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single role-tagged unit of text exchanged with the service.
///
/// Messages are never edited after creation; the transcript only appends them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Body of `POST /api/conversation` and `POST /api/code`.
#[derive(Serialize, Debug)]
pub struct GenerateRequest<'a> {
    pub messages: &'a [Message],
}

/// Free-tier usage as reported by `GET /api/usage`.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Usage {
    pub count: u32,
    pub limit: u32,
    #[serde(default)]
    pub is_pro: bool,
}

impl Usage {
    /// Status bar label, e.g. `3/5 free generations` or `Pro`.
    pub fn label(&self) -> String {
        if self.is_pro {
            "Pro".to_string()
        } else {
            format!("{}/{} free generations", self.count.min(self.limit), self.limit)
        }
    }
}

/// Checkout link returned by `GET /api/stripe`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UpgradeLink {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_serializes_with_lowercase_role() {
        let json = serde_json::to_value(Message::user("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "hi"}));
    }

    #[test]
    fn assistant_reply_parses() {
        let msg: Message =
            serde_json::from_str(r#"{"role":"assistant","content":"```bash\nls\n```"}"#).unwrap();
        assert_eq!(msg.role, Role::Assistant);
        assert!(msg.content.contains("ls"));
    }

    #[test]
    fn unknown_role_is_rejected() {
        let parsed = serde_json::from_str::<Message>(r#"{"role":"system","content":"x"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn request_wraps_messages() {
        let messages = vec![Message::user("a"), Message::assistant("b")];
        let json = serde_json::to_value(GenerateRequest { messages: &messages }).unwrap();
        assert_eq!(json["messages"].as_array().unwrap().len(), 2);
        assert_eq!(json["messages"][1]["role"], "assistant");
    }

    #[test]
    fn usage_label() {
        let usage = Usage { count: 3, limit: 5, is_pro: false };
        assert_eq!(usage.label(), "3/5 free generations");
        let over = Usage { count: 9, limit: 5, is_pro: false };
        assert_eq!(over.label(), "5/5 free generations");
        let pro = Usage { count: 40, limit: 5, is_pro: true };
        assert_eq!(pro.label(), "Pro");
    }

    #[test]
    fn usage_pro_flag_defaults_to_false() {
        let usage: Usage = serde_json::from_str(r#"{"count":1,"limit":5}"#).unwrap();
        assert!(!usage.is_pro);
    }
}
