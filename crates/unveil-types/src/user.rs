//! Account identity
//!
//! `UserId` is the key every store row, token claim, and ledger operation
//! shares. On the wire and inside token claims it travels as the bare
//! hyphenated UUID string.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque account identifier backed by a v4 UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    /// Mint a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse the hyphenated string form.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        s.parse::<Uuid>().map(Self)
    }

    /// The backing UUID, for store queries keyed on the raw column type.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<UserId> for Uuid {
    fn from(id: UserId) -> Self {
        id.0
    }
}
