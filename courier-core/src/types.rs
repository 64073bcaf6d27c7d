//! Core types: message submission, inbox entry, pagination window.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

/// Largest page a client may ask for with `limit`.
pub const MAX_PAGE_LIMIT: u32 = 1000;

/// A validated message submission: sender, recipient and body are all non-empty.
///
/// Values are taken as given; surrounding whitespace is not trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMessage {
    sender: String,
    recipient: String,
    body: String,
}

impl NewMessage {
    /// Builds a submission from possibly-missing fields. Any absent or empty field
    /// fails with [`ValidationError::MissingFields`].
    pub fn from_parts(
        sender: Option<String>,
        recipient: Option<String>,
        body: Option<String>,
    ) -> Result<Self> {
        match (non_empty(sender), non_empty(recipient), non_empty(body)) {
            (Some(sender), Some(recipient), Some(body)) => Ok(Self {
                sender,
                recipient,
                body,
            }),
            _ => Err(ValidationError::MissingFields),
        }
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// One message as seen from a recipient's inbox. Serializes as `{sender, message}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxEntry {
    pub sender: String,
    #[serde(rename = "message")]
    pub body: String,
}

/// Window over an inbox, in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub limit: Option<u32>,
    pub offset: u32,
}

impl Page {
    /// Every row, no window.
    pub const ALL: Page = Page {
        limit: None,
        offset: 0,
    };

    /// Validates client-supplied pagination. `limit` must be in `1..=MAX_PAGE_LIMIT`.
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Result<Self> {
        if let Some(limit) = limit {
            if limit == 0 || limit > MAX_PAGE_LIMIT {
                return Err(ValidationError::InvalidPagination);
            }
        }
        Ok(Self {
            limit,
            offset: offset.unwrap_or(0),
        })
    }

    /// Parses raw query values. Empty values count as absent; anything else must be
    /// a non-negative integer.
    pub fn parse(limit: Option<&str>, offset: Option<&str>) -> Result<Self> {
        Self::new(parse_count(limit)?, parse_count(offset)?)
    }

    pub fn is_all(&self) -> bool {
        self.limit.is_none() && self.offset == 0
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::ALL
    }
}

/// Returns the identifier if present and non-empty. Query parameters go through this too.
pub fn required_identifier(value: Option<String>) -> Option<String> {
    non_empty(value)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_count(raw: Option<&str>) -> Result<Option<u32>> {
    match raw.filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| ValidationError::InvalidPagination),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_new_message_accepts_all_fields() {
        let msg = NewMessage::from_parts(some("alice"), some("bob"), some("hi")).unwrap();
        assert_eq!(msg.sender(), "alice");
        assert_eq!(msg.recipient(), "bob");
        assert_eq!(msg.body(), "hi");
    }

    #[test]
    fn test_new_message_rejects_missing_or_empty() {
        assert_eq!(
            NewMessage::from_parts(None, some("bob"), some("hi")),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(
            NewMessage::from_parts(some("alice"), some(""), some("hi")),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(
            NewMessage::from_parts(some("alice"), some("bob"), None),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(
            NewMessage::from_parts(None, None, None),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn test_new_message_keeps_whitespace() {
        let msg = NewMessage::from_parts(some(" alice "), some("bob"), some("  ")).unwrap();
        assert_eq!(msg.sender(), " alice ");
        assert_eq!(msg.body(), "  ");
    }

    #[test]
    fn test_inbox_entry_wire_shape() {
        let entry = InboxEntry {
            sender: "alice".to_string(),
            body: "hi".to_string(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json, serde_json::json!({"sender": "alice", "message": "hi"}));
    }

    #[test]
    fn test_page_bounds() {
        assert_eq!(Page::new(None, None).unwrap(), Page::ALL);
        assert!(Page::new(None, None).unwrap().is_all());
        assert_eq!(
            Page::new(Some(10), Some(5)).unwrap(),
            Page {
                limit: Some(10),
                offset: 5
            }
        );
        assert!(!Page::new(None, Some(3)).unwrap().is_all());
        assert_eq!(Page::new(Some(0), None), Err(ValidationError::InvalidPagination));
        assert_eq!(
            Page::new(Some(MAX_PAGE_LIMIT + 1), None),
            Err(ValidationError::InvalidPagination)
        );
        assert!(Page::new(Some(MAX_PAGE_LIMIT), None).is_ok());
    }

    #[test]
    fn test_page_parse_raw_values() {
        assert_eq!(Page::parse(None, None).unwrap(), Page::ALL);
        assert_eq!(Page::parse(Some(""), Some("")).unwrap(), Page::ALL);
        assert_eq!(
            Page::parse(Some("2"), Some("1")).unwrap(),
            Page {
                limit: Some(2),
                offset: 1
            }
        );
        assert_eq!(
            Page::parse(Some("abc"), None),
            Err(ValidationError::InvalidPagination)
        );
        assert_eq!(
            Page::parse(None, Some("-1")),
            Err(ValidationError::InvalidPagination)
        );
        assert_eq!(
            Page::parse(Some("0"), None),
            Err(ValidationError::InvalidPagination)
        );
    }

    #[test]
    fn test_required_identifier() {
        assert_eq!(required_identifier(some("bob")), some("bob"));
        assert_eq!(required_identifier(some("")), None);
        assert_eq!(required_identifier(None), None);
    }
}
