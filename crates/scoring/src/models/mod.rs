pub mod angler;
pub mod award;
pub mod placing;
pub mod points;
pub mod result;
pub mod season;
pub mod standing;
pub mod team;
pub mod tournament;

pub use angler::Angler;
pub use award::{
    AwardContender, AwardDraw, AwardKind, AwardOutcome, BigBassRecord, HeavyStringerRecord,
    SeasonAwards,
};
pub use placing::{CoinFlipRecord, Placing, TieBreak, TournamentRanking};
pub use points::{AnglerPoints, PointsBasis, TournamentPoints};
pub use result::IndividualResult;
pub use season::Season;
pub use standing::SeasonStanding;
pub use team::{TeamKey, TeamResult};
pub use tournament::{DEFAULT_FISH_LIMIT, Tournament};
