use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Why an angler received the points they did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointsBasis {
    Weighed,
    Blank,
    BuyIn,
    Disqualified,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnglerPoints {
    pub angler_id: Uuid,
    pub points: i32,
    pub basis: PointsBasis,
    pub net_weight: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentPoints {
    pub tournament_id: Uuid,
    pub entries: Vec<AnglerPoints>,
}

impl TournamentPoints {
    pub fn empty(tournament_id: Uuid) -> Self {
        Self {
            tournament_id,
            entries: Vec::new(),
        }
    }

    pub fn points_for(&self, angler_id: Uuid) -> Option<i32> {
        self.entries
            .iter()
            .find(|e| e.angler_id == angler_id)
            .map(|e| e.points)
    }

    pub fn as_map(&self) -> BTreeMap<Uuid, i32> {
        self.entries
            .iter()
            .map(|e| (e.angler_id, e.points))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
