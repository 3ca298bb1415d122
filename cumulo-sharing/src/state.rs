// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sharing state and the transitions which evolve it.
//!
//! Transitions are pure: they consume the current state and return the next one, without
//! any I/O. They are only fed with operations the remote API already confirmed, so none of
//! them can fail; revoking an unknown member or re-adding a known sharing are no-ops,
//! which keeps the state correct under at-least-once delivery of confirmation events.

use std::collections::HashMap;

use tracing::debug;

use crate::sharing::{DocumentId, SharingId, SharingRecord};

/// Confirmed sharing operations, applied to the state after the remote API accepted them.
#[derive(Clone, Debug)]
pub enum SharingEvent {
    /// The full set of sharings concerning the local user was (re-)fetched.
    Received(Vec<SharingRecord>),

    /// A single new sharing was created or discovered.
    Added(SharingRecord),

    /// A recipient's access to one sharing was withdrawn.
    RecipientRevoked { sharing: SharingId, email: String },

    /// The local user left a sharing.
    SelfRevoked { sharing: SharingId },
}

/// All sharings known to the local user, together with a reverse index from document id
/// to the sharings referencing it.
///
/// The index holds an entry for a document exactly as long as at least one sharing
/// references it and never lists the same sharing twice. Queries rely on this invariant,
/// which is why both collections stay private to the crate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SharingState {
    pub(crate) sharings: Vec<SharingRecord>,
    pub(crate) by_doc_id: HashMap<DocumentId, Vec<SharingId>>,
}

impl SharingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// All sharing records, in the order they arrived.
    pub fn sharings(&self) -> &[SharingRecord] {
        &self.sharings
    }

    /// The sharing record with the given id.
    pub fn sharing(&self, id: &SharingId) -> Option<&SharingRecord> {
        self.sharings.iter().find(|sharing| &sharing.id == id)
    }

    /// Ids of all sharings referencing the given document, `None` when the document is
    /// not shared at all.
    pub fn sharing_ids(&self, doc: &DocumentId) -> Option<&[SharingId]> {
        self.by_doc_id.get(doc).map(Vec::as_slice)
    }

    /// Applies one confirmed event and returns the next state.
    pub fn apply(self, event: SharingEvent) -> Self {
        match event {
            SharingEvent::Received(records) => self.receive(records),
            SharingEvent::Added(record) => self.add(record),
            SharingEvent::RecipientRevoked { sharing, email } => {
                self.revoke_recipient(&sharing, &email)
            }
            SharingEvent::SelfRevoked { sharing } => self.revoke_self(&sharing),
        }
    }

    /// Replaces all known sharings with a freshly fetched set and rebuilds the index from
    /// scratch. Nothing of the previous state leaks into the new index.
    pub fn receive(mut self, records: Vec<SharingRecord>) -> Self {
        let mut by_doc_id = HashMap::new();
        for record in &records {
            index_record(&mut by_doc_id, record);
        }

        debug!(
            "received {} sharings covering {} documents",
            records.len(),
            by_doc_id.len()
        );

        self.sharings = records;
        self.by_doc_id = by_doc_id;
        self
    }

    /// Appends one confirmed sharing and merges its documents into the index. Re-adding
    /// an already known sharing leaves the state untouched.
    pub fn add(mut self, record: SharingRecord) -> Self {
        if self.sharing(&record.id).is_some() {
            debug!("sharing {} already known, ignoring", record.id);
            return self;
        }

        index_record(&mut self.by_doc_id, &record);
        debug!("added sharing {}", record.id);
        self.sharings.push(record);
        self
    }

    /// Removes every member with the given email from one sharing. The index stays as it
    /// is since the sharing keeps referencing its documents.
    pub fn revoke_recipient(mut self, sharing: &SharingId, email: &str) -> Self {
        if let Some(record) = self.sharings.iter_mut().find(|record| &record.id == sharing) {
            let before = record.members.len();
            record.members.retain(|member| member.email != email);
            if record.members.len() < before {
                debug!("revoked {} from sharing {}", email, sharing);
            }
        }

        self
    }

    /// Forgets one sharing entirely: the record is dropped and its id is stripped from
    /// every index entry. Entries left without any sharing are removed, not kept empty.
    pub fn revoke_self(mut self, sharing: &SharingId) -> Self {
        let before = self.sharings.len();
        self.sharings.retain(|record| &record.id != sharing);

        if self.sharings.len() < before {
            self.by_doc_id.retain(|_, ids| {
                ids.retain(|id| id != sharing);
                !ids.is_empty()
            });
            debug!("revoked own access to sharing {}", sharing);
        }

        self
    }
}

/// Appends the record's id to the index entry of every document it references, creating
/// entries as needed. A record referencing the same document through several rules is
/// indexed once.
fn index_record(by_doc_id: &mut HashMap<DocumentId, Vec<SharingId>>, record: &SharingRecord) {
    for doc in record.doc_ids() {
        let ids = by_doc_id.entry(doc.clone()).or_default();
        if !ids.contains(&record.id) {
            ids.push(record.id.clone());
        }
    }
}
