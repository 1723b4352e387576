use serde::{Deserialize, Serialize};

/// A signed-in traveller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub mobile: String,
}

impl User {
    /// Initials for compact display, e.g. "AS" for "Asha Shinde"
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}
