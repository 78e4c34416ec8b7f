pub mod results;
pub mod watchlist;

pub use results::AnalysisResultHolder;
pub use watchlist::WatchlistHolder;
