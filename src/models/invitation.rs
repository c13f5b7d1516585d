use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use crate::utils::record::id_string;
use crate::utils::time::{is_past, time_now, time_now_plus_days};

pub const INVITATION_VALID_DAYS: i64 = 7;

/// One-way state machine: PENDING --accept--> ACCEPTED. Expiry is a
/// read-time check against `expires_at`, never a stored transition.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationStatus {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "ACCEPTED")]
    Accepted,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Invitation {
    pub id: RecordId,
    pub email: String,
    pub token: String, // ! unique, 64 hex chars
    pub invited_by: RecordId,
    pub status: InvitationStatus,
    pub created_at: String,
    pub expires_at: String,
}

impl Invitation {
    pub fn is_expired(&self) -> bool {
        is_past(&self.expires_at)
    }

    pub fn is_pending(&self) -> bool {
        self.status == InvitationStatus::Pending
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct CreateInvitation {
    pub email: String,
    pub token: String,
    pub invited_by: RecordId,
    pub status: InvitationStatus,
    pub created_at: String,
    pub expires_at: String,
}

impl CreateInvitation {
    pub fn init(email: String, token: String, invited_by: RecordId) -> Self {
        Self {
            email,
            token,
            invited_by,
            status: InvitationStatus::Pending,
            created_at: time_now(),
            expires_at: time_now_plus_days(INVITATION_VALID_DAYS),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InvitationResponse {
    pub id: String,
    pub email: String,
    pub token: String,
    pub status: InvitationStatus,
    pub created_at: String,
    pub expires_at: String,
}

impl InvitationResponse {
    pub fn from_invitation(invitation: &Invitation) -> Self {
        Self {
            id: id_string(&invitation.id),
            email: invitation.email.clone(),
            token: invitation.token.clone(),
            status: invitation.status,
            created_at: invitation.created_at.clone(),
            expires_at: invitation.expires_at.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::time_now_minus_hours;
    use surrealdb::RecordId;

    fn invitation(status: InvitationStatus, expires_at: String) -> Invitation {
        Invitation {
            id: RecordId::from_table_key("invitations", "inv1"),
            email: "bob@x.com".into(),
            token: "deadbeef".into(),
            invited_by: RecordId::from_table_key("users", "admin1"),
            status,
            created_at: time_now(),
            expires_at,
        }
    }

    #[test]
    fn test_fresh_invitation_is_pending_and_not_expired() {
        let inv = invitation(InvitationStatus::Pending, time_now_plus_days(7));
        assert!(inv.is_pending());
        assert!(!inv.is_expired());
    }

    #[test]
    fn test_expiry_is_independent_of_stored_status() {
        let pending = invitation(InvitationStatus::Pending, time_now_minus_hours(1));
        assert!(pending.is_expired());
        assert!(pending.is_pending());

        let accepted = invitation(InvitationStatus::Accepted, time_now_minus_hours(1));
        assert!(accepted.is_expired());
        assert!(!accepted.is_pending());
    }

    #[test]
    fn test_accepted_invitation_is_not_pending() {
        let inv = invitation(InvitationStatus::Accepted, time_now_plus_days(7));
        assert!(!inv.is_pending());
        assert!(!inv.is_expired());
    }
}
