// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helpers for the two historical shapes of contact documents.
//!
//! Early releases stored a contact's email as a plain string and the address of their
//! instance under `url`. Later releases turned both into lists of entries carrying a
//! `primary` flag. Shares are composed against contacts of either vintage, so resolution
//! handles both.

use serde::{Deserialize, Serialize};

/// A contact as stored by the contacts application, reduced to the fields needed for
/// composing a share.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<ContactEmail>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<Vec<InstanceEntry>>,

    /// Legacy flat instance address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Email of a contact, either the legacy flat string or a list of addresses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContactEmail {
    Address(String),
    Addresses(Vec<EmailEntry>),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailEntry {
    pub address: String,

    #[serde(default)]
    pub primary: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceEntry {
    pub url: String,

    #[serde(default)]
    pub primary: bool,
}

impl Contact {
    /// The address to invite this contact with: the entry flagged as primary, the first
    /// entry otherwise, or the legacy flat value.
    pub fn primary_email(&self) -> Option<&str> {
        match self.email.as_ref()? {
            ContactEmail::Address(address) => Some(address),
            ContactEmail::Addresses(entries) => {
                primary_or_first(entries, |entry| entry.primary).map(|entry| entry.address.as_str())
            }
        }
    }

    /// The instance to send the invitation to, resolved like [`Contact::primary_email`].
    pub fn primary_instance(&self) -> Option<&str> {
        match self.instance.as_deref() {
            Some(entries) if !entries.is_empty() => {
                primary_or_first(entries, |entry| entry.primary).map(|entry| entry.url.as_str())
            }
            // TODO: drop this fallback once legacy flat contacts are migrated server-side.
            _ => self.url.as_deref(),
        }
    }
}

fn primary_or_first<T>(entries: &[T], is_primary: impl Fn(&T) -> bool) -> Option<&T> {
    entries
        .iter()
        .find(|entry| is_primary(entry))
        .or_else(|| entries.first())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Contact;

    #[test]
    fn parses_both_email_shapes() {
        let flat: Contact = serde_json::from_value(json!({
            "email": "llama@llama.cloud",
        }))
        .unwrap();
        assert_eq!(flat.primary_email(), Some("llama@llama.cloud"));

        let listed: Contact = serde_json::from_value(json!({
            "email": [
                { "address": "llama@llama.cloud" },
                { "address": "llama@work.cloud", "primary": true },
            ],
        }))
        .unwrap();
        assert_eq!(listed.primary_email(), Some("llama@work.cloud"));
    }

    #[test]
    fn first_email_wins_without_a_primary_flag() {
        let contact: Contact = serde_json::from_value(json!({
            "email": [
                { "address": "icebear@icebear.cloud" },
                { "address": "icebear@work.cloud" },
            ],
        }))
        .unwrap();

        assert_eq!(contact.primary_email(), Some("icebear@icebear.cloud"));
    }

    #[test]
    fn contact_without_email_resolves_to_none() {
        let contact: Contact = serde_json::from_value(json!({})).unwrap();
        assert_eq!(contact.primary_email(), None);
        assert_eq!(contact.primary_instance(), None);

        let empty: Contact = serde_json::from_value(json!({ "email": [] })).unwrap();
        assert_eq!(empty.primary_email(), None);
    }

    #[test]
    fn instance_resolution_falls_back_to_the_legacy_url() {
        let modern: Contact = serde_json::from_value(json!({
            "instance": [
                { "url": "https://panda.cumulo.cloud", "primary": true },
                { "url": "https://old.panda.cumulo.cloud" },
            ],
        }))
        .unwrap();
        assert_eq!(modern.primary_instance(), Some("https://panda.cumulo.cloud"));

        let legacy: Contact = serde_json::from_value(json!({
            "url": "https://penguin.cumulo.cloud",
        }))
        .unwrap();
        assert_eq!(
            legacy.primary_instance(),
            Some("https://penguin.cumulo.cloud")
        );
    }
}
