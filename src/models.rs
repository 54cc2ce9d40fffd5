//! Inbound request bodies.
//!
//! Missing fields deserialize to their zero value so that validation, not
//! parsing, reports them.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/vote`, forwarded to `votes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VotePayload {
    pub image_id: String,
    pub sub_id: String,
    /// 1 for up, -1 for down.
    pub value: i64,
}

impl VotePayload {
    pub fn is_valid(&self) -> bool {
        !self.image_id.is_empty() && (self.value == 1 || self.value == -1)
    }
}

/// Body of `POST /api/favorites`, forwarded to `favourites`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FavoritePayload {
    pub image_id: String,
    pub sub_id: String,
}

/// Fill an empty `sub_id` with the configured default.
pub fn default_sub_id(sub_id: &mut String, fallback: impl FnOnce() -> String) {
    if sub_id.is_empty() {
        *sub_id = fallback();
    }
}
