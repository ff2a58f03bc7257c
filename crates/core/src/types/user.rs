//! User account record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::UserId;
use super::status::UserRole;

/// A user account, as returned by the auth and admin endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: UserId,
    /// Account email.
    pub email: Email,
    /// Display name.
    pub full_name: String,
    /// Permission level.
    pub role: UserRole,
    /// Whether a super admin has approved the account. The backend omits
    /// the flag for customers.
    #[serde(default, rename = "isApproved")]
    pub is_approved: bool,
    /// Creation timestamp, when the backend includes it.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
