use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Refresh token record. Only the SHA-256 hash of the signed token is kept
/// at rest so a database leak cannot be replayed.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RefreshToken {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub revoked: bool,
}

impl RefreshToken {
    pub fn issue(user_id: &str, token: &str, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            user_id: user_id.to_string(),
            token_hash: Self::hash(token),
            expires_at,
            created_at: Utc::now(),
            revoked: false,
        }
    }

    pub fn hash(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn is_usable(&self) -> bool {
        !self.revoked && self.expires_at > Utc::now()
    }
}
