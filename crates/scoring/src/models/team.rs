use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a boat: its member ids in sorted order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamKey(Vec<Uuid>);

impl TeamKey {
    pub fn new(members: impl IntoIterator<Item = Uuid>) -> Self {
        let mut ids: Vec<Uuid> = members.into_iter().collect();
        ids.sort();
        ids.dedup();
        Self(ids)
    }

    pub fn members(&self) -> &[Uuid] {
        &self.0
    }

    pub fn contains(&self, angler_id: Uuid) -> bool {
        self.0.contains(&angler_id)
    }
}

impl fmt::Display for TeamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.0.iter().map(Uuid::to_string).collect();
        write!(f, "[{}]", ids.join(" + "))
    }
}

/// One boat's combined result, derived from its members' individual results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamResult {
    pub tournament_id: Uuid,
    pub members: Vec<Uuid>,
    pub net_weight: Decimal,
    pub fish_count: u32,
    pub big_bass_weight: Decimal,
    pub all_disqualified: bool,
    pub buy_in: bool,
    pub big_bass_pot_eligible: bool,
}

impl TeamResult {
    pub fn key(&self) -> TeamKey {
        TeamKey::new(self.members.iter().copied())
    }

    pub fn is_solo(&self) -> bool {
        self.members.len() == 1
    }

    /// Fished, not eliminated, and brought nothing to the scale.
    pub fn is_blank(&self) -> bool {
        !self.buy_in && !self.all_disqualified && self.net_weight.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_key_ignores_member_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(TeamKey::new([a, b]), TeamKey::new([b, a]));
        assert!(TeamKey::new([a, b]).contains(a));
        assert_eq!(TeamKey::new([a, a]).members().len(), 1);
    }
}
