// SPDX-License-Identifier: MIT OR Apache-2.0

#![cfg_attr(doctest, doc=include_str!("../README.md"))]

//! Sharing state and access resolution for Cumulo client applications.
//!
//! A personal cloud instance lets its user share files and folders with users of other
//! instances. The server hosting a sharing is the source of truth for the sharing records
//! themselves; client applications fetch those records and then need fast, consistent
//! answers to questions like "is this folder shared", "who has access to it" and "do my
//! edits propagate back to the owner".
//!
//! This crate keeps the fetched records in a [`SharingState`] together with a reverse
//! index from document id to the sharings referencing it. The state evolves through pure
//! transitions ([`SharingState::apply`]) which are only fed with operations the remote
//! API already confirmed, and queries ([`SharingState::recipients`],
//! [`SharingState::direction`], ...) resolve access for a single document from the
//! indexed records. [`SharingStore`] wraps the state into a single dispatch entry point
//! with change notifications for embedding applications, and [`contact`] resolves the
//! historical shapes of contact documents when composing a new share.

pub mod contact;
mod member;
mod query;
mod rule;
mod sharing;
mod state;
mod store;
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use member::{Member, MemberStatus, Recipient};
pub use query::QueryError;
pub use rule::{ShareDirection, ShareRule, SyncPolicy};
pub use sharing::{DocumentId, SharingId, SharingRecord};
pub use state::{SharingEvent, SharingState};
pub use store::{SharingStore, SubscriptionId};
