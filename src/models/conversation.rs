use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One retained turn of a session transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
    /// RFC 3339 timestamp as written in the session file, empty when absent
    #[serde(default)]
    pub timestamp: String,
}

/// A parsed session transcript. Replaced wholesale when its file is re-parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub session_id: String,
    #[serde(default)]
    pub cwd: String,
    #[serde(default)]
    pub first_timestamp: String,
    #[serde(default)]
    pub last_timestamp: String,
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Leaf directory name of `cwd`, used for display only
    pub fn project_name(&self) -> &str {
        Path::new(&self.cwd).file_name().and_then(|name| name.to_str()).unwrap_or(&self.cwd)
    }

    pub fn user_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.role == Role::User)
    }

    /// First non-empty user message, shown as the conversation's topic
    pub fn topic(&self) -> &str {
        self.user_messages()
            .map(|m| m.text.as_str())
            .find(|text| !text.trim().is_empty())
            .unwrap_or("")
    }
}
