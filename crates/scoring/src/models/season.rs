use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    pub season_id: Uuid,
    pub year: i32,
    pub name: String,
}
