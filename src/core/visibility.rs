//! Rate-sheet visibility policy
//!
//! One predicate decides which sheets a requester may see, applied by the
//! service layer before any calculation. Admin and branch staff see every
//! sheet; everyone else sees live sheets plus any unlisted sheet assigned
//! to them.

use crate::core::model::{RateSheet, SheetStatus};

/// Role taken from the `userType` request header
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequesterRole {
    Admin,
    Branch,
    Client,
    Franchise,
    Anonymous,
}

impl RequesterRole {
    /// Parse a role header value; unknown or missing values are anonymous
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("admin") => RequesterRole::Admin,
            Some("branch") => RequesterRole::Branch,
            Some("client") => RequesterRole::Client,
            Some("franchise") => RequesterRole::Franchise,
            _ => RequesterRole::Anonymous,
        }
    }

    /// Staff roles bypass the visibility filter entirely
    pub fn is_staff(&self) -> bool {
        matches!(self, RequesterRole::Admin | RequesterRole::Branch)
    }
}

/// The identity a request carries via the `userId`/`userType` headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    pub role: RequesterRole,
    pub user_id: Option<String>,
}

impl Requester {
    pub fn new(role: RequesterRole, user_id: Option<String>) -> Self {
        Self { role, user_id }
    }

    /// Anonymous requester with no identity
    pub fn anonymous() -> Self {
        Self::new(RequesterRole::Anonymous, None)
    }

    /// Build from raw header values
    pub fn from_parts(user_type: Option<&str>, user_id: Option<&str>) -> Self {
        let user_id = user_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        Self::new(RequesterRole::parse(user_type), user_id)
    }
}

/// Whether the requester may see the given sheet
pub fn can_view(sheet: &RateSheet, requester: &Requester) -> bool {
    if requester.role.is_staff() {
        return true;
    }

    match sheet.status {
        SheetStatus::Live => true,
        SheetStatus::Unlisted => match (&sheet.assigned_to, &requester.user_id) {
            (Some(owner), Some(user)) => owner == user,
            _ => false,
        },
    }
}
