// SPDX-License-Identifier: MPL-2.0
//! Session types and the resolution pipeline merging identity events with
//! asynchronously fetched authorization records.
//!
//! The authentication layer (who the user is) and the authorization layer
//! (what they may do) live in different external systems and settle at
//! different times; everything in this module exists to combine the two into
//! one consistent [`SessionState`].

pub mod providers;
pub mod resolver;

use serde::{Deserialize, Serialize};

/// Authentication-layer record emitted by the identity provider. Immutable
/// once emitted; carries no authorization data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub email: String,
    pub display_name: String,
}

/// Authorization level, stored externally per identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Editor,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Editor => "editor",
            Role::Admin => "admin",
        }
    }
}

/// Authorization record keyed by `uid` in the external profile store. The
/// record may be absent entirely, and a present record may omit the role;
/// unknown fields in the stored form are ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileRecord {
    pub role: Option<Role>,
}

/// The merged user entity exposed to the rest of the application: identity
/// fields plus a role that is always one of the enumerated values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthUser {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub role: Role,
}

impl AuthUser {
    /// Merges an identity with its profile record. An absent record, or a
    /// record without a role, yields [`Role::User`].
    pub fn merge(identity: Identity, record: Option<ProfileRecord>) -> Self {
        let role = record.and_then(|record| record.role).unwrap_or_default();
        Self {
            uid: identity.uid,
            email: identity.email,
            display_name: identity.display_name,
            role,
        }
    }
}

/// The session view published by the resolver.
///
/// While `loading` is true the `user` value is the previous, stale-but-
/// available one and must not be treated as final. `loading` drops to
/// `false` exactly once per identity transition, when the corresponding
/// profile lookup settles (immediately for a signed-out transition).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<AuthUser>,
    pub loading: bool,
}

impl SessionState {
    pub fn signed_out() -> Self {
        Self {
            user: None,
            loading: false,
        }
    }
}

impl Default for SessionState {
    /// Auth is undetermined until the first identity event arrives, which
    /// is distinct from a settled signed-out state.
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}
