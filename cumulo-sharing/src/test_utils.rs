// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for sharing-state tests.

use crate::member::{Member, MemberStatus};
use crate::rule::{ShareRule, SyncPolicy};
use crate::sharing::{DocumentId, SharingId, SharingRecord};

pub fn setup_logging() {
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }
}

pub fn doc(id: &str) -> DocumentId {
    DocumentId::from(id)
}

pub fn ids(ids: &[&str]) -> Vec<SharingId> {
    ids.iter().map(|id| SharingId::from(*id)).collect()
}

pub fn member(name: &str, status: MemberStatus) -> Member {
    Member {
        status,
        name: name.to_string(),
        email: format!("{name}@{name}.cloud"),
        instance: format!("https://{name}.cumulo.cloud"),
    }
}

pub fn rule(doc_ids: &[&str], update: SyncPolicy, remove: SyncPolicy) -> ShareRule {
    ShareRule {
        title: None,
        doctype: "files".to_string(),
        values: doc_ids.iter().map(|id| DocumentId::from(*id)).collect(),
        add: SyncPolicy::Sync,
        update,
        remove,
    }
}

pub fn two_way_rule(doc_ids: &[&str]) -> ShareRule {
    rule(doc_ids, SyncPolicy::Sync, SyncPolicy::Sync)
}

pub fn one_way_rule(doc_ids: &[&str]) -> ShareRule {
    rule(doc_ids, SyncPolicy::Sync, SyncPolicy::None)
}

pub fn sharing(
    id: &str,
    owner: bool,
    rules: Vec<ShareRule>,
    members: Vec<Member>,
) -> SharingRecord {
    SharingRecord {
        id: SharingId::from(id),
        owner,
        description: String::new(),
        rules,
        members,
    }
}

/// Two-way sharing of `folder_1`, owned by llama and shared with icebear.
pub fn holiday_photos() -> SharingRecord {
    let mut record = sharing(
        "sharing_1",
        true,
        vec![two_way_rule(&["folder_1"])],
        vec![
            member("llama", MemberStatus::Owner),
            member("icebear", MemberStatus::Ready),
        ],
    );
    record.description = "Holiday photos".to_string();
    record
}

/// Two-way sharing of `folder_2` with the same members as [`holiday_photos`].
pub fn tax_papers() -> SharingRecord {
    let mut record = sharing(
        "sharing_2",
        true,
        vec![two_way_rule(&["folder_2"])],
        vec![
            member("llama", MemberStatus::Owner),
            member("icebear", MemberStatus::Ready),
        ],
    );
    record.description = "Tax papers".to_string();
    record
}

/// A second sharing of `folder_1`, inviting panda.
pub fn holiday_photos_extra() -> SharingRecord {
    sharing(
        "sharing_3",
        true,
        vec![two_way_rule(&["folder_1"])],
        vec![
            member("llama", MemberStatus::Owner),
            member("panda", MemberStatus::Pending),
        ],
    )
}
