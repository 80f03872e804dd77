// SPDX-License-Identifier: MPL-2.0
//! Collaborator seams for the session pipeline. The surrounding application
//! owns the real identity service and profile backend; the resolver only
//! sees these traits.

use std::fmt;

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{Identity, ProfileRecord};

/// Error fetching a profile record. Carries a message for the log line; the
/// resolver recovers by treating the record as absent, so this type never
/// crosses the pipeline boundary.
#[derive(Debug, Clone)]
pub struct ProfileError(String);

impl ProfileError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "profile lookup failed: {}", self.0)
    }
}

impl std::error::Error for ProfileError {}

/// Source of identity transitions (sign-in, sign-out, identity refresh).
///
/// The returned receiver is the subscription: events arrive in delivery
/// order, `None` means signed out, and dropping the receiver unsubscribes.
/// Each resolver takes exactly one subscription.
pub trait IdentityProvider {
    fn subscribe(&mut self) -> mpsc::UnboundedReceiver<Option<Identity>>;
}

/// Asynchronous authorization-record lookup keyed by uid.
///
/// `Ok(None)` is the normal outcome for an identity without a stored
/// profile; it is not an error. Callers must treat `Err` the same as an
/// absent record.
#[async_trait]
pub trait ProfileStore {
    async fn profile(&self, uid: &str) -> Result<Option<ProfileRecord>, ProfileError>;
}
