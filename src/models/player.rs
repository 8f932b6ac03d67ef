//! Player payload models
//!
//! The player record is owned by the API under test; these types only
//! describe what the scenarios send.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fields every player returned by the API is expected to carry
pub const PLAYER_FIELDS: &[&str] = &["age", "gender", "id", "role", "screenName"];

/// Acting user identity passed in create, update and delete paths
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Editor {
    Admin,
    Supervisor,
}

impl Editor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Editor::Admin => "admin",
            Editor::Supervisor => "supervisor",
        }
    }
}

impl fmt::Display for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body for create and update calls
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPayload {
    pub age: u32,
    pub gender: String,
    pub login: String,
    pub password: String,
    pub role: String,
    pub screen_name: String,
}

impl PlayerPayload {
    pub fn new(age: u32) -> Self {
        Self {
            age,
            gender: "male".to_string(),
            login: "test".to_string(),
            password: "testpass".to_string(),
            role: "user".to_string(),
            screen_name: "TestUser".to_string(),
        }
    }

    /// Payload used by the create scenarios
    pub fn for_create(age: u32) -> Self {
        Self::new(age)
    }

    /// Payload used by the update scenarios
    pub fn for_update() -> Self {
        Self::new(20)
            .with_password("testpass20")
            .with_screen_name("TestUser20")
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn with_screen_name(mut self, screen_name: impl Into<String>) -> Self {
        self.screen_name = screen_name.into();
        self
    }
}
