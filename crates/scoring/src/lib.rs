pub mod error;
pub mod models;
pub mod policy;
pub mod repository;
pub mod services;
pub mod tie_break;

pub use error::{Result, ScoringError, ValidationError, Violation};
pub use policy::{DisqualifiedPoints, ScoringPolicy};
pub use repository::{SeasonRepository, SeasonSnapshot};
pub use services::ScoringService;
pub use tie_break::{FixedTieBreaker, RandomTieBreaker, TieBreaker};
