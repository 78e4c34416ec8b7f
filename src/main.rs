use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use stock_sentiment_analyzer::routers::create_routes;
use stock_sentiment_analyzer::{
    load_config, AnalysisResultHolder, AppState, NewsAggregatorService, ReportMakerService,
    SentimentScorerService, WatchlistHolder,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Настройка структурированного логирования
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("stock_sentiment_analyzer=info,warn"));

    let file_appender = tracing_appender::rolling::daily("logs", "stock_sentiment_analyzer.log");
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false),
        )
        .init();

    let config = load_config()?;

    // Вотчлист сессии заполняется тикерами по умолчанию из конфигурации
    let watchlist = WatchlistHolder::new();
    for ticker in &config.default_watchlist {
        watchlist.add(ticker).await?;
    }

    let scorer = SentimentScorerService::new();
    let aggregator = NewsAggregatorService::new(scorer);

    let state = AppState {
        analyzer: ReportMakerService::new(aggregator, config.clone()),
        watchlist,
        results: AnalysisResultHolder::new(),
    };

    let app = create_routes(state);
    println!("Сервер запущен на http://localhost:3000");
    axum::Server::bind(&"0.0.0.0:3000".parse()?)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
