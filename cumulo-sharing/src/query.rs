// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only queries answering who can access a document and how.
//!
//! All queries resolve through the reverse index. A document without an index entry is
//! reported as [`QueryError::UnknownDocument`] so callers can distinguish "not shared"
//! from "shared with nobody", which cannot happen.

use thiserror::Error;

use crate::member::Recipient;
use crate::rule::ShareDirection;
use crate::sharing::{DocumentId, SharingId, SharingRecord};
use crate::state::SharingState;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The index references a sharing which is missing or has no rule covering the
    /// document. The two views diverged, which signals a transition bug, not bad input.
    #[error("sharing {0} is indexed under document {1} but has no rule referencing it")]
    MalformedSharing(SharingId, DocumentId),

    /// The document is not referenced by any known sharing.
    #[error("document {0} is not referenced by any sharing")]
    UnknownDocument(DocumentId),
}

impl SharingState {
    /// Whether any sharing references the given document.
    pub fn is_shared(&self, doc: &DocumentId) -> bool {
        self.by_doc_id.contains_key(doc)
    }

    /// Everyone with access to the given document, each annotated with the direction of
    /// the sharing they belong to.
    ///
    /// Owner-status entries come first; apart from that the order of the index and of the
    /// member lists is preserved. When several sharings reference the document, each
    /// contributes its own members, owners included.
    pub fn recipients(&self, doc: &DocumentId) -> Result<Vec<Recipient>, QueryError> {
        let mut recipients = Vec::new();
        for record in self.indexed(doc)? {
            let direction = record
                .direction_for(doc)
                .ok_or_else(|| QueryError::MalformedSharing(record.id.clone(), doc.clone()))?;
            recipients.extend(record.members.iter().map(|member| Recipient {
                member: member.clone(),
                direction,
            }));
        }

        let (mut owners, others): (Vec<_>, Vec<_>) =
            recipients.into_iter().partition(Recipient::is_owner);
        owners.extend(others);

        Ok(owners)
    }

    /// Whether the local user owns any of the sharings referencing the document.
    pub fn is_owner(&self, doc: &DocumentId) -> Result<bool, QueryError> {
        Ok(self.indexed(doc)?.iter().any(|record| record.owner))
    }

    /// The owner-status recipient of the document, when one is listed.
    pub fn owner(&self, doc: &DocumentId) -> Result<Option<Recipient>, QueryError> {
        Ok(self.recipients(doc)?.into_iter().find(Recipient::is_owner))
    }

    /// Direction of the first sharing referencing the document.
    pub fn direction(&self, doc: &DocumentId) -> Result<ShareDirection, QueryError> {
        let record = self.sharing_for_self(doc)?;
        record
            .direction_for(doc)
            .ok_or_else(|| QueryError::MalformedSharing(record.id.clone(), doc.clone()))
    }

    /// The first sharing of the document which lists the given email among its members.
    pub fn sharing_for_recipient(
        &self,
        doc: &DocumentId,
        email: &str,
    ) -> Result<Option<&SharingRecord>, QueryError> {
        Ok(self
            .indexed(doc)?
            .into_iter()
            .find(|record| record.member_with_email(email).is_some()))
    }

    /// The first sharing referencing the document. This is the sharing to leave when the
    /// local user revokes their own access.
    pub fn sharing_for_self(&self, doc: &DocumentId) -> Result<&SharingRecord, QueryError> {
        let ids = self
            .sharing_ids(doc)
            .ok_or_else(|| QueryError::UnknownDocument(doc.clone()))?;

        // Index entries are removed once their last id is stripped, never left empty.
        let id = ids
            .first()
            .ok_or_else(|| QueryError::UnknownDocument(doc.clone()))?;

        self.sharing(id)
            .ok_or_else(|| QueryError::MalformedSharing(id.clone(), doc.clone()))
    }

    /// Resolves the index entry of a document into its records, preserving index order.
    fn indexed(&self, doc: &DocumentId) -> Result<Vec<&SharingRecord>, QueryError> {
        let ids = self
            .sharing_ids(doc)
            .ok_or_else(|| QueryError::UnknownDocument(doc.clone()))?;

        ids.iter()
            .map(|id| {
                self.sharing(id)
                    .ok_or_else(|| QueryError::MalformedSharing(id.clone(), doc.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{doc, holiday_photos, member, rule, sharing, tax_papers};
    use crate::{MemberStatus, QueryError, SharingState, SyncPolicy};

    #[test]
    fn unknown_documents_are_reported() {
        let state = SharingState::new().receive(vec![holiday_photos()]);
        let unknown = doc("folder_9");

        let expected = QueryError::UnknownDocument(unknown.clone());
        assert!(!state.is_shared(&unknown));
        assert_eq!(state.recipients(&unknown), Err(expected.clone()));
        assert_eq!(state.is_owner(&unknown), Err(expected.clone()));
        assert_eq!(state.owner(&unknown), Err(expected.clone()));
        assert_eq!(state.direction(&unknown), Err(expected.clone()));
        assert_eq!(
            state.sharing_for_recipient(&unknown, "icebear@icebear.cloud"),
            Err(expected.clone())
        );
        assert_eq!(state.sharing_for_self(&unknown), Err(expected));
    }

    #[test]
    fn dangling_index_entries_are_malformed() {
        let mut state = SharingState::new().receive(vec![holiday_photos()]);
        // The two views diverge when records disappear behind the index's back.
        state.sharings.clear();

        assert_eq!(
            state.recipients(&doc("folder_1")),
            Err(QueryError::MalformedSharing(
                "sharing_1".into(),
                doc("folder_1")
            ))
        );
    }

    #[test]
    fn index_entry_without_matching_rule_is_malformed() {
        let mut state = SharingState::new().receive(vec![holiday_photos()]);
        state.sharings[0].rules.clear();

        assert_eq!(
            state.direction(&doc("folder_1")),
            Err(QueryError::MalformedSharing(
                "sharing_1".into(),
                doc("folder_1")
            ))
        );
    }

    #[test]
    fn ownership_is_a_predicate_over_all_indexed_sharings() {
        let theirs = sharing(
            "sharing_1",
            false,
            vec![rule(&["folder_1"], SyncPolicy::Sync, SyncPolicy::Sync)],
            vec![
                member("icebear", MemberStatus::Owner),
                member("llama", MemberStatus::Ready),
            ],
        );
        let ours = sharing(
            "sharing_2",
            true,
            vec![rule(&["folder_1"], SyncPolicy::Sync, SyncPolicy::None)],
            vec![
                member("llama", MemberStatus::Owner),
                member("panda", MemberStatus::Pending),
            ],
        );

        let only_theirs = SharingState::new().receive(vec![theirs.clone()]);
        assert_eq!(only_theirs.is_owner(&doc("folder_1")), Ok(false));

        let both = SharingState::new().receive(vec![theirs, ours]);
        assert_eq!(both.is_owner(&doc("folder_1")), Ok(true));
    }

    #[test]
    fn owner_comes_from_the_recipient_list() {
        let state = SharingState::new().receive(vec![holiday_photos()]);

        let owner = state.owner(&doc("folder_1")).unwrap().unwrap();

        assert_eq!(owner.email(), "llama@llama.cloud");
        assert_eq!(owner.status(), MemberStatus::Owner);
    }

    #[test]
    fn recipients_without_owner_keep_their_order() {
        let record = sharing(
            "sharing_1",
            false,
            vec![rule(&["folder_1"], SyncPolicy::Sync, SyncPolicy::Sync)],
            vec![
                member("icebear", MemberStatus::Ready),
                member("panda", MemberStatus::Pending),
            ],
        );
        let state = SharingState::new().receive(vec![record]);

        let recipients = state.recipients(&doc("folder_1")).unwrap();
        let emails: Vec<_> = recipients.iter().map(|r| r.email().to_string()).collect();

        assert_eq!(emails, vec!["icebear@icebear.cloud", "panda@panda.cloud"]);
        assert_eq!(state.owner(&doc("folder_1")), Ok(None));
    }

    #[test]
    fn revoked_members_can_be_filtered_from_recipients() {
        let record = sharing(
            "sharing_1",
            true,
            vec![rule(&["folder_1"], SyncPolicy::Sync, SyncPolicy::Sync)],
            vec![
                member("llama", MemberStatus::Owner),
                member("icebear", MemberStatus::Revoked),
                member("panda", MemberStatus::Ready),
            ],
        );
        let state = SharingState::new().receive(vec![record]);

        // Revoked members stay listed; presentation decides whether to show them.
        let recipients = state.recipients(&doc("folder_1")).unwrap();
        assert_eq!(recipients.len(), 3);
        assert!(recipients[1].is_revoked());

        let active: Vec<_> = recipients
            .iter()
            .filter(|recipient| !recipient.is_revoked())
            .map(|recipient| recipient.email().to_string())
            .collect();
        assert_eq!(active, vec!["llama@llama.cloud", "panda@panda.cloud"]);
    }

    #[test]
    fn finds_the_sharing_listing_a_recipient() {
        let state = SharingState::new().receive(vec![holiday_photos(), tax_papers()]);

        let found = state
            .sharing_for_recipient(&doc("folder_1"), "icebear@icebear.cloud")
            .unwrap();
        assert_eq!(
            found.map(|record| record.id.clone()),
            Some("sharing_1".into())
        );

        let missing = state
            .sharing_for_recipient(&doc("folder_1"), "wombat@wombat.cloud")
            .unwrap();
        assert!(missing.is_none());
    }
}
