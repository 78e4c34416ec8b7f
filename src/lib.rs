pub mod config;
pub mod errors;
pub mod holders;
pub mod models;
pub mod routers;
pub mod services;

pub use config::AppConfig;
pub use errors::{Result, StockAnalysisError};
pub use holders::{AnalysisResultHolder, WatchlistHolder};
pub use models::{
    AnalysisRequest, AnalysisResult, BuzzTier, Fundamentals, Headline, RawNewsContent,
    RawNewsRecord, Recommendation, RiskTier, Scenario, SentimentSummary, StockQuote,
};
pub use services::{NewsAggregatorService, ReportMakerService, SentimentScorerService};
pub use config::load_config;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: ReportMakerService,
    pub watchlist: WatchlistHolder,
    pub results: AnalysisResultHolder,
}
