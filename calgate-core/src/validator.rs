//! Runs an operation's ordered checks through a [`Resolver`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::StoreResult;
use crate::resolver::{EntityRef, Resolver};
use crate::rules::{Check, EntityKind, Operation, References, Requirement};
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    Pass,
    /// A referenced entity does not exist.
    Fail {
        entity: EntityKind,
        reason: &'static str,
    },
    /// A store needed for a check did not answer.
    Unavailable { store: Store },
}

impl ValidationResult {
    pub fn is_pass(&self) -> bool {
        matches!(self, ValidationResult::Pass)
    }
}

/// Stateless; clones share the resolver.
#[derive(Clone)]
pub struct Validator {
    resolver: Arc<dyn Resolver>,
}

impl Validator {
    pub fn new(resolver: Arc<dyn Resolver>) -> Self {
        Validator { resolver }
    }

    /// Run the checks for `operation` in order, stopping at the first one
    /// that does not pass.
    pub async fn validate(
        &self,
        operation: Operation,
        references: &References,
    ) -> ValidationResult {
        for check in operation.checks() {
            debug!(
                %operation,
                field = ?check.field,
                requirement = ?check.requirement,
                "running check"
            );

            match self.run(check, references).await {
                Ok(true) => continue,
                Ok(false) => {
                    info!(
                        %operation,
                        entity = %check.entity(),
                        reason = check.reason,
                        "reference check failed"
                    );
                    return ValidationResult::Fail {
                        entity: check.entity(),
                        reason: check.reason,
                    };
                }
                Err(err) => {
                    warn!(%operation, error = %err, "reference check could not complete");
                    return ValidationResult::Unavailable { store: err.store() };
                }
            }
        }

        ValidationResult::Pass
    }

    async fn run(&self, check: &Check, references: &References) -> StoreResult<bool> {
        match check.requirement {
            Requirement::UserExists => match references.user(check.field) {
                Some(username) => self.resolver.exists(EntityRef::User(username)).await,
                None => Ok(false),
            },
            Requirement::EventExists => match references.event(check.field) {
                Some(id) => self.resolver.exists(EntityRef::Event(id)).await,
                None => Ok(false),
            },
            Requirement::PublicEventExists => match references.event(check.field) {
                Some(id) => Ok(self.resolver.event_visibility(id).await? == Some(true)),
                None => Ok(false),
            },
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::StoreError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory resolver that records every lookup it serves.
    #[derive(Default)]
    pub(crate) struct FakeResolver {
        pub users: Vec<String>,
        /// event id -> isPublic
        pub events: HashMap<i64, bool>,
        pub identity_down: bool,
        pub events_down: bool,
        pub calls: Mutex<Vec<String>>,
    }

    impl FakeResolver {
        pub fn with_users(users: &[&str]) -> Self {
            FakeResolver {
                users: users.iter().map(|u| u.to_string()).collect(),
                ..Default::default()
            }
        }

        pub fn event(mut self, id: i64, is_public: bool) -> Self {
            self.events.insert(id, is_public);
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn unreachable(store: Store) -> StoreError {
            StoreError::Unreachable {
                store,
                reason: "connection refused".to_string(),
            }
        }
    }

    #[async_trait]
    impl Resolver for FakeResolver {
        async fn exists(&self, entity: EntityRef<'_>) -> StoreResult<bool> {
            match entity {
                EntityRef::User(name) => {
                    self.calls.lock().unwrap().push(format!("user:{name}"));
                    if self.identity_down {
                        return Err(Self::unreachable(Store::Identity));
                    }
                    Ok(self.users.iter().any(|u| u == name))
                }
                EntityRef::Event(id) => {
                    self.calls.lock().unwrap().push(format!("event:{id}"));
                    if self.events_down {
                        return Err(Self::unreachable(Store::Events));
                    }
                    Ok(self.events.contains_key(&id))
                }
            }
        }

        async fn event_visibility(&self, event_id: i64) -> StoreResult<Option<bool>> {
            self.calls.lock().unwrap().push(format!("visibility:{event_id}"));
            if self.events_down {
                return Err(Self::unreachable(Store::Events));
            }
            Ok(self.events.get(&event_id).copied())
        }
    }

    fn validator(resolver: &Arc<FakeResolver>) -> Validator {
        Validator::new(resolver.clone())
    }

    fn invite(username: &str, event_id: i64) -> References {
        References::default().username(username).event_id(event_id)
    }

    #[tokio::test]
    async fn test_missing_user_skips_event_lookup() {
        let resolver = Arc::new(FakeResolver::default().event(1, true));
        let result = validator(&resolver)
            .validate(Operation::CreateInvite, &invite("ghost", 1))
            .await;

        assert_eq!(
            result,
            ValidationResult::Fail {
                entity: EntityKind::User,
                reason: "User not found"
            }
        );
        assert_eq!(resolver.calls(), ["user:ghost"]);
    }

    #[tokio::test]
    async fn test_missing_event_after_user_passes() {
        let resolver = Arc::new(FakeResolver::with_users(&["alice"]));
        let result = validator(&resolver)
            .validate(Operation::UpdateInvite, &invite("alice", 42))
            .await;

        assert_eq!(
            result,
            ValidationResult::Fail {
                entity: EntityKind::Event,
                reason: "Event not found"
            }
        );
        assert_eq!(resolver.calls(), ["user:alice", "event:42"]);
    }

    #[tokio::test]
    async fn test_private_event_fails_rsvp() {
        let resolver = Arc::new(FakeResolver::with_users(&["alice"]).event(7, false));
        let result = validator(&resolver)
            .validate(Operation::CreateRsvp, &invite("alice", 7))
            .await;

        assert_eq!(
            result,
            ValidationResult::Fail {
                entity: EntityKind::Event,
                reason: "Public event not found"
            }
        );
    }

    #[tokio::test]
    async fn test_public_event_passes_rsvp() {
        let resolver = Arc::new(FakeResolver::with_users(&["alice"]).event(7, true));
        let result = validator(&resolver)
            .validate(Operation::UpdateRsvp, &invite("alice", 7))
            .await;

        assert!(result.is_pass());
        assert_eq!(resolver.calls(), ["user:alice", "visibility:7"]);
    }

    #[tokio::test]
    async fn test_identity_down_is_unavailable_not_missing() {
        let resolver = Arc::new(FakeResolver {
            identity_down: true,
            ..FakeResolver::with_users(&["alice", "bob"]).event(1, true)
        });
        let v = validator(&resolver);

        for (operation, refs) in [
            (Operation::CreateInvite, invite("alice", 1)),
            (Operation::CreateRsvp, invite("alice", 1)),
            (
                Operation::ShareCalendar,
                References::default().sharing_user("alice").receiving_user("bob"),
            ),
            (Operation::CreateEvent, References::default().organizer("alice")),
        ] {
            assert_eq!(
                v.validate(operation, &refs).await,
                ValidationResult::Unavailable {
                    store: Store::Identity
                },
                "{operation}"
            );
        }
    }

    #[tokio::test]
    async fn test_events_down_after_user_check() {
        let resolver = Arc::new(FakeResolver {
            events_down: true,
            ..FakeResolver::with_users(&["alice"])
        });
        let result = validator(&resolver)
            .validate(Operation::CreateInvite, &invite("alice", 1))
            .await;

        assert_eq!(
            result,
            ValidationResult::Unavailable {
                store: Store::Events
            }
        );
    }

    #[tokio::test]
    async fn test_share_reports_receiving_user() {
        let resolver = Arc::new(FakeResolver::with_users(&["alice"]));
        let refs = References::default()
            .sharing_user("alice")
            .receiving_user("nobody");
        let result = validator(&resolver)
            .validate(Operation::UnshareCalendar, &refs)
            .await;

        assert_eq!(
            result,
            ValidationResult::Fail {
                entity: EntityKind::User,
                reason: "Receiving user not found"
            }
        );
    }

    #[tokio::test]
    async fn test_absent_reference_fails_without_lookup() {
        let resolver = Arc::new(FakeResolver::with_users(&["alice"]));
        let result = validator(&resolver)
            .validate(Operation::CreateEvent, &References::default())
            .await;

        assert_eq!(
            result,
            ValidationResult::Fail {
                entity: EntityKind::User,
                reason: "Organizer not found"
            }
        );
        assert!(resolver.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_username_fails_without_lookup() {
        let resolver = Arc::new(FakeResolver::with_users(&["alice"]).event(1, true));
        let result = validator(&resolver)
            .validate(Operation::CreateInvite, &invite("", 1))
            .await;

        assert_eq!(
            result,
            ValidationResult::Fail {
                entity: EntityKind::User,
                reason: "User not found"
            }
        );
        assert!(resolver.calls().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_failure_is_identical() {
        let resolver = Arc::new(FakeResolver::default());
        let v = validator(&resolver);
        let first = v.validate(Operation::CreateInvite, &invite("ghost", 1)).await;
        let second = v.validate(Operation::CreateInvite, &invite("ghost", 1)).await;
        assert_eq!(first, second);
    }
}
