// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::rule::ShareDirection;

/// Lifecycle status of a sharing member.
///
/// A member starts out `Pending` after being invited, becomes `Ready` once their instance
/// accepted the sharing and `Revoked` when their access was withdrawn. The initiating user
/// carries the `Owner` status for the lifetime of the sharing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Owner,
    Ready,
    Pending,
    Revoked,
}

/// One person taking part in a sharing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub status: MemberStatus,

    pub name: String,

    pub email: String,

    /// URL of the member's own instance.
    pub instance: String,
}

impl Member {
    /// Member initiated the sharing.
    pub fn is_owner(&self) -> bool {
        matches!(self.status, MemberStatus::Owner)
    }

    /// Member's access was withdrawn.
    pub fn is_revoked(&self) -> bool {
        matches!(self.status, MemberStatus::Revoked)
    }
}

/// A member seen in the context of one shared document, annotated with the direction
/// computed from the rule referencing that document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Recipient {
    pub member: Member,
    pub direction: ShareDirection,
}

impl Recipient {
    pub fn status(&self) -> MemberStatus {
        self.member.status
    }

    pub fn email(&self) -> &str {
        &self.member.email
    }

    pub fn is_owner(&self) -> bool {
        self.member.is_owner()
    }

    pub fn is_revoked(&self) -> bool {
        self.member.is_revoked()
    }
}
