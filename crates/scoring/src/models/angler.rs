use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Angler {
    pub angler_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub is_member: bool,
    #[serde(default)]
    pub is_guest: bool,
}

impl Angler {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
