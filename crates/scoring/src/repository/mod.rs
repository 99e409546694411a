pub mod season;

pub use season::{RecordedCoinFlips, SeasonRepository, SeasonSnapshot, TeamPairing};
