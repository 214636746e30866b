use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(email: &str, display_name: Option<&str>) -> Self {
        User {
            id: None,
            email: email.to_string(),
            display_name: display_name.map(|n| n.to_string()),
            created_at: Some(Utc::now()),
        }
    }

    /// Label recorded against the user's side of a chat exchange.
    pub fn speaker_label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

#[cfg(test)]
impl User {
    pub fn test_user(email: &str) -> Self {
        User::new(email, Some("Test User"))
    }
}
