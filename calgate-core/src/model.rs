//! Request bodies accepted by the gateway.
//!
//! These carry only what the gateway forwards and validates; the stores own
//! the full persisted records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rules::References;

/// Invite status as stored by the invites service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InviteStatus {
    Yes,
    No,
    Maybe,
    Pending,
}

/// RSVP answer to a public event. There is no pending state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RsvpStatus {
    Yes,
    No,
    Maybe,
}

/// Body for creating or updating an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    pub title: String,
    pub description: String,
    /// YYYY-MM-DD
    pub date: NaiveDate,
    pub organizer: String,
    pub is_public: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteRequest {
    pub event_id: i64,
    pub username: String,
    pub status: InviteStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpRequest {
    pub event_id: i64,
    pub username: String,
    pub status: RsvpStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    pub sharing_user: String,
    pub receiving_user: String,
}

/// A request field that violates its constraints.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field} must not be empty")]
pub struct EmptyField {
    pub field: &'static str,
}

/// A request body that references entities owned by other stores.
pub trait Guarded {
    fn references(&self) -> References;

    /// Local field constraints, checked before any lookup.
    fn check_fields(&self) -> Result<(), EmptyField> {
        Ok(())
    }
}

fn non_empty(field: &'static str, value: &str) -> Result<(), EmptyField> {
    if value.is_empty() {
        return Err(EmptyField { field });
    }
    Ok(())
}

impl Guarded for EventRequest {
    fn references(&self) -> References {
        References::default().organizer(&self.organizer)
    }
}

impl Guarded for InviteRequest {
    fn references(&self) -> References {
        References::default()
            .username(&self.username)
            .event_id(self.event_id)
    }
}

impl Guarded for RsvpRequest {
    fn references(&self) -> References {
        References::default()
            .username(&self.username)
            .event_id(self.event_id)
    }

    fn check_fields(&self) -> Result<(), EmptyField> {
        non_empty("username", &self.username)
    }
}

impl Guarded for ShareRequest {
    fn references(&self) -> References {
        References::default()
            .sharing_user(&self.sharing_user)
            .receiving_user(&self.receiving_user)
    }

    fn check_fields(&self) -> Result<(), EmptyField> {
        non_empty("sharingUser", &self.sharing_user)?;
        non_empty("receivingUser", &self.receiving_user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Field;

    #[test]
    fn test_invite_wire_format() {
        let invite: InviteRequest =
            serde_json::from_str(r#"{"eventId": 1, "username": "ghost", "status": "YES"}"#)
                .unwrap();
        assert_eq!(invite.event_id, 1);
        assert_eq!(invite.status, InviteStatus::Yes);

        let value = serde_json::to_value(&invite).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"eventId": 1, "username": "ghost", "status": "YES"})
        );
    }

    #[test]
    fn test_rsvp_rejects_pending() {
        let parsed = serde_json::from_str::<RsvpRequest>(
            r#"{"eventId": 7, "username": "alice", "status": "PENDING"}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_event_date_and_public_flag() {
        let event: EventRequest = serde_json::from_str(
            r#"{"title": "Launch", "description": "", "date": "2024-05-01",
                "organizer": "alice", "isPublic": true}"#,
        )
        .unwrap();
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert!(event.is_public);
        assert_eq!(event.references().user(Field::Organizer), Some("alice"));
    }

    #[test]
    fn test_share_requires_both_users() {
        let share = ShareRequest {
            sharing_user: "alice".to_string(),
            receiving_user: String::new(),
        };
        assert_eq!(
            share.check_fields(),
            Err(EmptyField {
                field: "receivingUser"
            })
        );
    }
}
