//! # Messages
//!
//! The chat log shown in the conversational panel. Messages are created by
//! the voice capture state machine (role `User`) and appended to the page's
//! [`MessageLog`]. Nothing ever produces `Assistant` messages yet: answer
//! generation is an external collaborator that doesn't exist.
//!
//! The log is append-only. There is no way to get a `&mut Message` out of it,
//! so a message is immutable once appended.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "you",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Display timestamp. Voice messages carry the time the recording completed.
    pub timestamp: Option<DateTime<Local>>,
}

impl Message {
    pub fn user(content: impl Into<String>, timestamp: DateTime<Local>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Some(timestamp),
        }
    }

    /// `HH:MM` for the message header, if a timestamp is present.
    pub fn display_time(&self) -> Option<String> {
        self.timestamp.map(|ts| ts.format("%H:%M").to_string())
    }
}

/// Ordered, append-only message log. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageLog {
    items: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.items.push(message);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.items.get(index)
    }

    pub fn last(&self) -> Option<&Message> {
        self.items.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Message] {
        &self.items
    }
}

impl<'a> IntoIterator for &'a MessageLog {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 1, h, m, 0).unwrap()
    }

    #[test]
    fn push_preserves_call_order() {
        let mut log = MessageLog::new();
        for i in 0..5 {
            log.push(Message::user(format!("question {i}"), at(10, i)));
        }
        assert_eq!(log.len(), 5);
        let contents: Vec<&str> = log.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(
            contents,
            vec!["question 0", "question 1", "question 2", "question 3", "question 4"]
        );
    }

    #[test]
    fn appended_message_is_unchanged() {
        let original = Message::user("what is this scene?", at(9, 30));
        let mut log = MessageLog::new();
        log.push(original.clone());
        log.push(Message::user("and the next one?", at(9, 31)));
        assert_eq!(log.get(0), Some(&original));
    }

    #[test]
    fn display_time_formats_hours_and_minutes() {
        let msg = Message::user("hi", at(7, 5));
        assert_eq!(msg.display_time().as_deref(), Some("07:05"));

        let untimed = Message {
            role: Role::Assistant,
            content: "hello".into(),
            timestamp: None,
        };
        assert_eq!(untimed.display_time(), None);
    }

    #[test]
    fn role_serializes_as_wire_names() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }
}
