// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::member::Member;
use crate::rule::{ShareDirection, ShareRule};

/// Unique identifier of a sharing record, assigned by the instance hosting the sharing.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SharingId(String);

impl SharingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SharingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SharingId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for SharingId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identifier of a shared resource, for example a file or a directory.
///
/// Kept distinct from [`SharingId`] so the two kinds of ids cannot be mixed up at call
/// sites even though both are plain strings on the wire.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One sharing relationship between the local user and a set of members, as exchanged with
/// the remote API.
///
/// The rules name the shared documents and how operations on them propagate, the members
/// list everyone taking part, including the initiator. Records are immutable from the
/// perspective of this crate except for member revocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharingRecord {
    pub id: SharingId,

    /// Whether the local user initiated this sharing.
    pub owner: bool,

    /// Human-readable label shown when inviting recipients.
    #[serde(default)]
    pub description: String,

    pub rules: Vec<ShareRule>,

    pub members: Vec<Member>,
}

impl SharingRecord {
    /// All document ids referenced by this sharing, across all of its rules.
    pub fn doc_ids(&self) -> impl Iterator<Item = &DocumentId> {
        self.rules.iter().flat_map(|rule| rule.values.iter())
    }

    /// The first rule referencing the given document.
    pub fn rule_for(&self, doc: &DocumentId) -> Option<&ShareRule> {
        self.rules.iter().find(|rule| rule.applies_to(doc))
    }

    /// Share direction for the given document, `None` when no rule references it.
    pub fn direction_for(&self, doc: &DocumentId) -> Option<ShareDirection> {
        self.rule_for(doc).map(ShareRule::direction)
    }

    /// The first member with the given email address.
    pub fn member_with_email(&self, email: &str) -> Option<&Member> {
        self.members.iter().find(|member| member.email == email)
    }
}
