pub mod provider;
pub mod sofascore;

pub use provider::LineupProvider;
pub use sofascore::SofaScore;
