// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::sharing::DocumentId;

/// Propagation policy of one operation type within a rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncPolicy {
    /// The operation is propagated to the other side of the sharing.
    Sync,

    /// The operation stays local.
    #[default]
    None,
}

/// Direction of a share as experienced by its recipients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShareDirection {
    /// Updates and removals propagate both ways.
    TwoWay,

    /// Recipients receive changes but their own edits stay local.
    OneWay,
}

impl Display for ShareDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ShareDirection::TwoWay => "two-way",
            ShareDirection::OneWay => "one-way",
        };

        write!(f, "{}", s)
    }
}

/// Names which documents are shared and which operations propagate to the other side of
/// the sharing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRule {
    /// Display label, irrelevant for matching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Kind of the shared resources, for example "files".
    pub doctype: String,

    /// Documents this rule applies to.
    pub values: Vec<DocumentId>,

    #[serde(default)]
    pub add: SyncPolicy,

    #[serde(default)]
    pub update: SyncPolicy,

    #[serde(default)]
    pub remove: SyncPolicy,
}

impl ShareRule {
    /// Whether this rule references the given document.
    pub fn applies_to(&self, doc: &DocumentId) -> bool {
        self.values.contains(doc)
    }

    /// A share is two-way when both updates and removals propagate back to the other
    /// side, one-way in every other case.
    pub fn direction(&self) -> ShareDirection {
        if self.update == SyncPolicy::Sync && self.remove == SyncPolicy::Sync {
            ShareDirection::TwoWay
        } else {
            ShareDirection::OneWay
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ShareDirection, ShareRule, SyncPolicy};

    #[test]
    fn direction_requires_update_and_remove_sync() {
        let cases = [
            (SyncPolicy::Sync, SyncPolicy::Sync, ShareDirection::TwoWay),
            (SyncPolicy::Sync, SyncPolicy::None, ShareDirection::OneWay),
            (SyncPolicy::None, SyncPolicy::Sync, ShareDirection::OneWay),
            (SyncPolicy::None, SyncPolicy::None, ShareDirection::OneWay),
        ];

        for (update, remove, expected) in cases {
            let rule = ShareRule {
                title: None,
                doctype: "files".to_string(),
                values: vec!["folder_1".into()],
                add: SyncPolicy::Sync,
                update,
                remove,
            };

            assert_eq!(rule.direction(), expected);
        }
    }

    #[test]
    fn absent_policies_mean_no_propagation() {
        let rule: ShareRule = serde_json::from_value(json!({
            "doctype": "files",
            "values": ["folder_1"],
            "add": "sync",
        }))
        .unwrap();

        assert_eq!(rule.title, None);
        assert_eq!(rule.add, SyncPolicy::Sync);
        assert_eq!(rule.update, SyncPolicy::None);
        assert_eq!(rule.remove, SyncPolicy::None);
        assert_eq!(rule.direction(), ShareDirection::OneWay);
    }

    #[test]
    fn wire_names() {
        assert_eq!(
            serde_json::to_value(SyncPolicy::Sync).unwrap(),
            json!("sync")
        );
        assert_eq!(
            serde_json::to_value(SyncPolicy::None).unwrap(),
            json!("none")
        );
        assert_eq!(
            serde_json::to_value(ShareDirection::TwoWay).unwrap(),
            json!("two-way")
        );
        assert_eq!(
            serde_json::to_value(ShareDirection::OneWay).unwrap(),
            json!("one-way")
        );
    }
}
