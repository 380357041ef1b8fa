use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use timeoff_state::{validate_collection_name, RepositoryItem};

use crate::identity_provider::SessionIdentity;

/// Role granted to newly provisioned users. Roles are read back on later logins
/// but not enforced here; authorization decisions belong to other parts of the
/// system.
pub const DEFAULT_ROLE: &str = "user";

/// The per-user document stored in the `users` collection, keyed by the
/// identity's unique id. Created at most once per identity: existence is checked
/// before creation, with no merge logic if two creations race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Display name, derived from the email's local part on creation.
    pub name: String,
    /// The email the identity was established for.
    pub email: String,
    /// Role names held by the user.
    pub roles: Vec<String>,
    /// `None` until the store assigns its server clock on the first write.
    pub created_at: Option<DateTime<Utc>>,
    /// `None` until the store assigns its server clock on a write.
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserRecord {
    /// Build the default record for a first-time identity. Timestamps are left
    /// for the store to assign.
    pub fn for_identity(identity: &SessionIdentity) -> Self {
        let name = identity
            .email
            .split('@')
            .next()
            .unwrap_or(&identity.email)
            .to_string();
        Self {
            name,
            email: identity.email.clone(),
            roles: vec![DEFAULT_ROLE.to_string()],
            created_at: None,
            updated_at: None,
        }
    }
}

impl RepositoryItem for UserRecord {
    const NAME: &'static str = "users";

    fn assign_server_timestamps(&mut self, now: DateTime<Utc>) {
        self.created_at.get_or_insert(now);
        self.updated_at = Some(now);
    }
}

const _: () = assert!(validate_collection_name(UserRecord::NAME));

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(email: &str) -> SessionIdentity {
        SessionIdentity {
            uid: "uid-1".to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn derives_name_from_email_local_part() {
        let record = UserRecord::for_identity(&identity("alice@example.com"));
        assert_eq!(record.name, "alice");
        assert_eq!(record.email, "alice@example.com");
        assert_eq!(record.roles, vec!["user".to_string()]);
        assert_eq!(record.created_at, None);
        assert_eq!(record.updated_at, None);
    }

    #[test]
    fn falls_back_to_whole_email_without_at_sign() {
        let record = UserRecord::for_identity(&identity("not-an-address"));
        assert_eq!(record.name, "not-an-address");
    }

    #[test]
    fn first_write_assigns_both_timestamps() {
        let mut record = UserRecord::for_identity(&identity("alice@example.com"));
        let now = Utc::now();
        record.assign_server_timestamps(now);
        assert_eq!(record.created_at, Some(now));
        assert_eq!(record.updated_at, Some(now));
    }

    #[test]
    fn later_writes_keep_the_creation_time() {
        let mut record = UserRecord::for_identity(&identity("alice@example.com"));
        let created = Utc::now();
        record.assign_server_timestamps(created);
        let updated = created + chrono::Duration::seconds(30);
        record.assign_server_timestamps(updated);
        assert_eq!(record.created_at, Some(created));
        assert_eq!(record.updated_at, Some(updated));
    }

    #[test]
    fn serializes_with_camel_case_field_names() {
        let record = UserRecord::for_identity(&identity("alice@example.com"));
        let value = serde_json::to_value(&record).expect("Serialize should be infallible");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
    }
}
