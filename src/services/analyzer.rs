use futures::stream::{self, StreamExt};

use crate::config::AppConfig;
use crate::errors::{Result, StockAnalysisError};
use crate::models::{AnalysisRequest, AnalysisResult, Fundamentals, Headline, StockQuote};
use crate::services::aggregator::NewsAggregatorService;
use crate::services::classifier::{classify_recommendation, classify_risk};
use crate::services::scenario::{adjust_score, resolve_or_neutral};

// Бета при отсутствии данных провайдера
const DEFAULT_BETA: f64 = 1.0;
// Сколько заголовков попадает в витрину результата
const KEY_HEADLINES: usize = 5;

/// Собирает итоговый отчет по тикеру из выходов агрегатора,
/// корректора сценария и классификаторов.
#[derive(Clone)]
pub struct ReportMakerService {
    aggregator: NewsAggregatorService,
    config: AppConfig,
}

impl ReportMakerService {
    pub fn new(aggregator: NewsAggregatorService, config: AppConfig) -> Self {
        ReportMakerService { aggregator, config }
    }

    /// Полный конвейер: нормализация записей -> оценка заголовков -> сборка.
    pub fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult> {
        let AnalysisRequest {
            ticker,
            quote,
            scenario,
            mut news,
        } = request;

        if let Some(max_articles) = self.config.max_articles {
            news.truncate(max_articles);
        }

        let headlines = self.aggregator.prepare_headlines(&news)?;
        self.assemble(&ticker, &quote, scenario.as_deref(), headlines)
    }

    /// Сборка отчета из уже оцененных заголовков. Идемпотентна:
    /// одинаковые входы дают байт-в-байт одинаковый результат.
    pub fn assemble(
        &self,
        ticker: &str,
        quote: &StockQuote,
        scenario_name: Option<&str>,
        headlines: Vec<Headline>,
    ) -> Result<AnalysisResult> {
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(StockAnalysisError::InvalidDataFormat(
                "Пустой тикер".to_string(),
            ));
        }

        let buzz = self.aggregator.aggregate(&headlines);
        if buzz.article_count == 0 {
            // Отсутствие новостей не ошибка, а определенный нейтральный итог
            tracing::debug!("Нет новостей для {}, базовый балл нейтрален", ticker);
        }

        let scenario = resolve_or_neutral(scenario_name);
        let adjusted_sentiment = adjust_score(buzz.base_score, scenario);
        let outlook = classify_recommendation(adjusted_sentiment, quote.current_price)?;

        let beta = quote.beta.unwrap_or(DEFAULT_BETA);
        let risk_tier = classify_risk(beta);

        let key_headlines: Vec<Headline> =
            headlines.iter().take(KEY_HEADLINES).cloned().collect();

        Ok(AnalysisResult {
            ticker,
            scenario,
            base_sentiment: buzz.base_score,
            adjusted_sentiment,
            recommendation: outlook.recommendation,
            current_price: quote.current_price,
            target_price: outlook.target_price,
            upside_pct: outlook.upside_pct,
            beta,
            risk_tier,
            buzz,
            fundamentals: Fundamentals::from_quote(quote),
            key_headlines,
        })
    }

    /// Пакетный анализ. Каждый тикер изолирован: сбой одного
    /// (некорректная цена, паника задачи) не прерывает остальных.
    pub async fn analyze_batch(
        &self,
        requests: Vec<AnalysisRequest>,
    ) -> Vec<(String, Result<AnalysisResult>)> {
        let max_concurrent = self.config.max_concurrent_analyses.unwrap_or(8);

        let tasks: Vec<_> = requests
            .into_iter()
            .map(|request| {
                let this = self.clone();
                async move {
                    let ticker = request.ticker.trim().to_uppercase();
                    let outcome =
                        match tokio::task::spawn_blocking(move || this.analyze(request)).await {
                            Ok(result) => result,
                            Err(e) => Err(e.into()),
                        };
                    if let Err(ref e) = outcome {
                        tracing::warn!("Анализ {} пропущен: {}", ticker, e);
                    }
                    (ticker, outcome)
                }
            })
            .collect();

        stream::iter(tasks)
            .buffer_unordered(max_concurrent)
            .collect::<Vec<_>>()
            .await
    }
}
