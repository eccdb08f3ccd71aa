//! The ordered reference checks for every guarded operation.
//!
//! The table is plain data so that the gateway and any store that wants a
//! second line of defense read the same rules.

use std::fmt;

/// Operations that reference entities owned by another store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateEvent,
    UpdateEvent,
    CreateInvite,
    UpdateInvite,
    CreateRsvp,
    UpdateRsvp,
    ShareCalendar,
    UnshareCalendar,
}

/// Which request field a check reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Organizer,
    Username,
    EventId,
    SharingUser,
    ReceivingUser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    UserExists,
    EventExists,
    /// The event exists and its `isPublic` flag is set.
    PublicEventExists,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Event,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::User => f.write_str("user"),
            EntityKind::Event => f.write_str("event"),
        }
    }
}

/// One existence check and the message shown when it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Check {
    pub field: Field,
    pub requirement: Requirement,
    pub reason: &'static str,
}

impl Check {
    const fn new(field: Field, requirement: Requirement, reason: &'static str) -> Self {
        Check {
            field,
            requirement,
            reason,
        }
    }

    pub fn entity(&self) -> EntityKind {
        match self.requirement {
            Requirement::UserExists => EntityKind::User,
            Requirement::EventExists | Requirement::PublicEventExists => EntityKind::Event,
        }
    }
}

const EVENT_CHECKS: &[Check] = &[Check::new(
    Field::Organizer,
    Requirement::UserExists,
    "Organizer not found",
)];

const INVITE_CHECKS: &[Check] = &[
    Check::new(Field::Username, Requirement::UserExists, "User not found"),
    Check::new(Field::EventId, Requirement::EventExists, "Event not found"),
];

const RSVP_CHECKS: &[Check] = &[
    Check::new(Field::Username, Requirement::UserExists, "User not found"),
    Check::new(
        Field::EventId,
        Requirement::PublicEventExists,
        "Public event not found",
    ),
];

const SHARE_CHECKS: &[Check] = &[
    Check::new(
        Field::SharingUser,
        Requirement::UserExists,
        "Sharing user not found",
    ),
    Check::new(
        Field::ReceivingUser,
        Requirement::UserExists,
        "Receiving user not found",
    ),
];

impl Operation {
    /// Checks in the order they must run. The first failure wins.
    pub fn checks(self) -> &'static [Check] {
        match self {
            Operation::CreateEvent | Operation::UpdateEvent => EVENT_CHECKS,
            Operation::CreateInvite | Operation::UpdateInvite => INVITE_CHECKS,
            Operation::CreateRsvp | Operation::UpdateRsvp => RSVP_CHECKS,
            Operation::ShareCalendar | Operation::UnshareCalendar => SHARE_CHECKS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::CreateEvent => "create_event",
            Operation::UpdateEvent => "update_event",
            Operation::CreateInvite => "create_invite",
            Operation::UpdateInvite => "update_invite",
            Operation::CreateRsvp => "create_rsvp",
            Operation::UpdateRsvp => "update_rsvp",
            Operation::ShareCalendar => "share_calendar",
            Operation::UnshareCalendar => "unshare_calendar",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The referenced keys carried by one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct References {
    organizer: Option<String>,
    username: Option<String>,
    event_id: Option<i64>,
    sharing_user: Option<String>,
    receiving_user: Option<String>,
}

impl References {
    pub fn organizer(mut self, username: impl Into<String>) -> Self {
        self.organizer = Some(username.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn event_id(mut self, id: i64) -> Self {
        self.event_id = Some(id);
        self
    }

    pub fn sharing_user(mut self, username: impl Into<String>) -> Self {
        self.sharing_user = Some(username.into());
        self
    }

    pub fn receiving_user(mut self, username: impl Into<String>) -> Self {
        self.receiving_user = Some(username.into());
        self
    }

    /// The username stored under `field`, if that field names a user.
    ///
    /// An empty username names no one, so it reads as absent.
    pub fn user(&self, field: Field) -> Option<&str> {
        let username = match field {
            Field::Organizer => self.organizer.as_deref(),
            Field::Username => self.username.as_deref(),
            Field::SharingUser => self.sharing_user.as_deref(),
            Field::ReceivingUser => self.receiving_user.as_deref(),
            Field::EventId => None,
        };
        username.filter(|u| !u.is_empty())
    }

    pub fn event(&self, field: Field) -> Option<i64> {
        match field {
            Field::EventId => self.event_id,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invite_checks_user_before_event() {
        let checks = Operation::CreateInvite.checks();
        assert_eq!(checks.len(), 2);
        assert_eq!(checks[0].field, Field::Username);
        assert_eq!(checks[1].requirement, Requirement::EventExists);
        assert_eq!(Operation::UpdateInvite.checks(), checks);
    }

    #[test]
    fn test_rsvp_requires_public_event() {
        let last = Operation::CreateRsvp.checks().last().unwrap();
        assert_eq!(last.requirement, Requirement::PublicEventExists);
        assert_eq!(last.entity(), EntityKind::Event);
        assert_eq!(last.reason, "Public event not found");
    }

    #[test]
    fn test_share_checks_sharing_user_first() {
        let reasons: Vec<_> = Operation::ShareCalendar
            .checks()
            .iter()
            .map(|c| c.reason)
            .collect();
        assert_eq!(reasons, ["Sharing user not found", "Receiving user not found"]);
    }

    #[test]
    fn test_references_lookup_by_field() {
        let refs = References::default().username("bob").event_id(3);
        assert_eq!(refs.user(Field::Username), Some("bob"));
        assert_eq!(refs.user(Field::Organizer), None);
        assert_eq!(refs.event(Field::EventId), Some(3));
        assert_eq!(refs.event(Field::Username), None);
    }

    #[test]
    fn test_empty_username_reads_as_absent() {
        let refs = References::default().organizer("").username("bob");
        assert_eq!(refs.user(Field::Organizer), None);
        assert_eq!(refs.user(Field::Username), Some("bob"));
    }
}
