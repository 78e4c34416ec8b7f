use stock_sentiment_analyzer::*;

fn report_maker() -> ReportMakerService {
    let config = AppConfig {
        default_watchlist: vec![],
        max_articles: Some(50),
        max_concurrent_analyses: Some(4),
    };
    ReportMakerService::new(
        NewsAggregatorService::new(SentimentScorerService::new()),
        config,
    )
}

fn quote(current_price: f64, beta: Option<f64>) -> StockQuote {
    StockQuote {
        current_price,
        previous_close: Some(current_price),
        beta,
        market_cap: Some(1_000_000_000.0),
        trailing_pe: Some(24.5),
        fifty_two_week_high: Some(current_price * 1.2),
    }
}

#[tokio::test]
async fn test_watchlist_holder() {
    let holder = WatchlistHolder::new();

    // Тест добавления тикера с нормализацией регистра
    assert!(holder.add(" tsla ").await.unwrap());
    assert_eq!(holder.len().await.unwrap(), 1);
    assert!(holder.contains("TSLA").await.unwrap());

    // Повторное добавление не ошибка, просто false
    assert!(!holder.add("TSLA").await.unwrap());
    assert_eq!(holder.len().await.unwrap(), 1);

    holder.add("AAPL").await.unwrap();
    holder.add("MSFT").await.unwrap();

    // Список отсортирован
    assert_eq!(holder.list().await.unwrap(), vec!["AAPL", "MSFT", "TSLA"]);

    // Тест удаления
    assert!(holder.remove("tsla").await.unwrap());
    assert!(!holder.remove("TSLA").await.unwrap());
    assert_eq!(holder.len().await.unwrap(), 2);
}

#[tokio::test]
async fn test_watchlist_add_is_atomic() {
    let holder = WatchlistHolder::new();

    // Конкурентное добавление одного тикера: вставка срабатывает ровно один раз
    let (a, b) = tokio::join!(holder.add("IBM"), holder.add("IBM"));
    assert!(a.unwrap() ^ b.unwrap());
    assert_eq!(holder.len().await.unwrap(), 1);
}

#[test]
fn test_analysis_result_holder() {
    tokio_test::block_on(async {
        let holder = AnalysisResultHolder::new();
        let service = report_maker();

        let result = service
            .assemble("XYZ", &quote(100.0, Some(1.2)), Some("None"), vec![])
            .unwrap();

        holder.put(result.ticker.clone(), result.clone()).await.unwrap();
        assert_eq!(holder.len().await.unwrap(), 1);

        // Кэш возвращает ту же неизменяемую запись
        let cached = holder.get("XYZ").await.unwrap().unwrap();
        assert_eq!(cached, result);
        assert!(holder.get("ABC").await.unwrap().is_none());

        holder.clear().await.unwrap();
        assert_eq!(holder.len().await.unwrap(), 0);
    });
}

#[test]
fn test_config_validation() {
    let mut config = AppConfig {
        default_watchlist: vec!["AAPL".to_string(), "TSLA".to_string()],
        max_articles: Some(50),
        max_concurrent_analyses: Some(8),
    };

    // Валидная конфигурация должна проходить
    assert!(config.validate().is_ok());

    // Пустой тикер в вотчлисте должен вызывать ошибку
    config.default_watchlist = vec!["AAPL".to_string(), "  ".to_string()];
    assert!(config.validate().is_err());

    // Восстанавливаем вотчлист
    config.default_watchlist = vec!["AAPL".to_string()];

    // Неверное количество статей
    config.max_articles = Some(0);
    assert!(config.validate().is_err());

    config.max_articles = Some(2000);
    assert!(config.validate().is_err());

    // Неверное количество параллельных анализов
    config.max_articles = Some(50);
    config.max_concurrent_analyses = Some(0);
    assert!(config.validate().is_err());

    config.max_concurrent_analyses = Some(100);
    assert!(config.validate().is_err());
}

#[test]
fn test_full_pipeline_with_raw_news() {
    let service = report_maker();

    // Провайдер отдает записи разной формы: плоскую, вложенную и пустую
    let news = vec![
        RawNewsRecord {
            title: Some("Shares rally after company beats expectations".to_string()),
            content: None,
            publisher: Some("Reuters".to_string()),
            link: Some("https://example.com/1".to_string()),
        },
        RawNewsRecord {
            title: None,
            content: Some(RawNewsContent {
                title: Some("Stock tumbles as regulator opens investigation".to_string()),
            }),
            publisher: Some("Bloomberg".to_string()),
            link: Some("https://example.com/2".to_string()),
        },
        RawNewsRecord {
            title: None,
            content: None,
            publisher: None,
            link: None,
        },
    ];

    let request = AnalysisRequest {
        ticker: " msft ".to_string(),
        quote: quote(310.0, Some(0.5)),
        scenario: None,
        news,
    };

    let result = service.analyze(request).unwrap();

    assert_eq!(result.ticker, "MSFT");
    assert_eq!(result.scenario, Scenario::None);
    assert_eq!(result.buzz.article_count, 3);
    assert_eq!(result.buzz.buzz_tier, BuzzTier::Low);
    assert_eq!(result.key_headlines.len(), 3);
    assert_eq!(result.risk_tier, RiskTier::Low);

    // Без сценария скорректированный балл совпадает с базовым
    assert_eq!(result.adjusted_sentiment, result.base_sentiment);
    assert!((-1.0..=1.0).contains(&result.base_sentiment));

    // Запись без заголовка вошла в выборку нейтральной
    assert_eq!(result.key_headlines[2].title, "");
    assert_eq!(result.key_headlines[2].polarity, 0.0);
    assert_eq!(result.key_headlines[2].publisher, "Unknown");

    // Фундаментальные показатели проходят насквозь без изменений
    assert_eq!(result.fundamentals.trailing_pe, Some(24.5));
    assert_eq!(result.current_price, 310.0);

    // Перечисления сериализуются в контрактные метки
    let json = serde_json::to_value(&result).unwrap();
    assert!(matches!(
        json["recommendation"].as_str(),
        Some("BUY") | Some("SELL") | Some("HOLD")
    ));
    assert_eq!(json["buzz"]["buzz_tier"], "LOW");
    assert_eq!(json["risk_tier"], "LOW");
    assert_eq!(json["scenario"], "None");
}

#[tokio::test]
async fn test_batch_isolation() {
    let service = report_maker();

    // Второй запрос с некорректной ценой не должен сорвать первый
    let requests = vec![
        AnalysisRequest {
            ticker: "GOOD".to_string(),
            quote: quote(50.0, Some(2.0)),
            scenario: Some("None".to_string()),
            news: vec![],
        },
        AnalysisRequest {
            ticker: "BAD".to_string(),
            quote: quote(0.0, None),
            scenario: None,
            news: vec![],
        },
    ];

    let outcomes = service.analyze_batch(requests).await;
    assert_eq!(outcomes.len(), 2);

    let good = outcomes.iter().find(|(t, _)| t == "GOOD").unwrap();
    let bad = outcomes.iter().find(|(t, _)| t == "BAD").unwrap();

    let result = good.1.as_ref().unwrap();
    assert_eq!(result.recommendation, Recommendation::Hold);
    assert_eq!(result.risk_tier, RiskTier::High);

    assert!(matches!(
        bad.1.as_ref().unwrap_err(),
        StockAnalysisError::InvalidPrice(_)
    ));
}

#[tokio::test]
async fn test_batch_preserves_unknown_scenario_fallback() {
    let service = report_maker();

    let requests = vec![AnalysisRequest {
        ticker: "XYZ".to_string(),
        quote: quote(100.0, Some(1.2)),
        scenario: Some("Meteor Strike".to_string()),
        news: vec![],
    }];

    let outcomes = service.analyze_batch(requests).await;
    let result = outcomes[0].1.as_ref().unwrap();

    // Неизвестный сценарий не прерывает конвейер
    assert_eq!(result.scenario, Scenario::None);
    assert_eq!(result.recommendation, Recommendation::Hold);
}
