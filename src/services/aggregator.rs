use regex::Regex;

use crate::errors::Result;
use crate::models::{BuzzTier, Headline, RawNewsRecord, SentimentSummary};
use crate::services::sentiment::SentimentScorerService;

// Пороги уровней «шума»: строгие нижние границы (">", не ">=").
// Третье поле задает множитель охвата для витринной строки buzz_estimate.
const BUZZ_TIERS: &[(usize, BuzzTier, u64)] = &[
    (15, BuzzTier::VeryHigh, 500),
    (8, BuzzTier::High, 300),
    (3, BuzzTier::Moderate, 150),
];
const LOW_BUZZ_FACTOR: u64 = 100;

/// Агрегатор новостей одного тикера: нормализует сырые записи,
/// оценивает заголовки и сводит их в SentimentSummary.
#[derive(Clone)]
pub struct NewsAggregatorService {
    scorer: SentimentScorerService,
}

impl NewsAggregatorService {
    pub fn new(scorer: SentimentScorerService) -> Self {
        NewsAggregatorService { scorer }
    }

    /// Единая точка нормализации разнородных записей провайдера:
    /// заголовок берется из плоского title, иначе из вложенного content.title.
    pub fn extract_title(record: &RawNewsRecord) -> Option<String> {
        let flat = record
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());
        let nested = record
            .content
            .as_ref()
            .and_then(|c| c.title.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty());

        flat.or(nested).map(str::to_string)
    }

    fn clean_title(&self, text: &str) -> Result<String> {
        let html_regex = Regex::new(r"<[^>]+>")?;
        let url_regex = Regex::new(r"http\S+|www\.\S+")?;
        let whitespace_regex = Regex::new(r"\s+")?;

        let cleaned = html_regex.replace_all(text, " ");
        let cleaned = url_regex.replace_all(&cleaned, " ");
        let cleaned = whitespace_regex.replace_all(&cleaned, " ");

        Ok(cleaned.trim().to_string())
    }

    /// Запись без извлекаемого заголовка не отбрасывается: она входит в
    /// выборку как пустой заголовок с нулевой полярностью.
    pub fn prepare_headlines(&self, records: &[RawNewsRecord]) -> Result<Vec<Headline>> {
        let mut headlines = Vec::with_capacity(records.len());

        for record in records {
            let title = match Self::extract_title(record) {
                Some(raw) => self.clean_title(&raw)?,
                None => {
                    tracing::debug!("Запись без заголовка, считаем нейтральной");
                    String::new()
                }
            };
            let polarity = self.scorer.score(&title);

            headlines.push(Headline {
                title,
                publisher: record
                    .publisher
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_string()),
                link: record.link.clone().unwrap_or_default(),
                polarity,
            });
        }

        Ok(headlines)
    }

    /// Базовый балл: среднее арифметическое полярностей.
    /// Пустой список дает определенный нейтральный результат, а не ошибку.
    pub fn aggregate(&self, headlines: &[Headline]) -> SentimentSummary {
        let article_count = headlines.len();
        let base_score = if article_count > 0 {
            headlines.iter().map(|h| h.polarity).sum::<f64>() / article_count as f64
        } else {
            0.0
        };

        let (buzz_tier, buzz_estimate) = buzz_for(article_count);

        SentimentSummary {
            base_score,
            article_count,
            buzz_tier,
            buzz_estimate,
        }
    }
}

// Таблица просматривается сверху вниз, берется первый пройденный порог.
// buzz_estimate это витринная эвристика, а не измеренный охват: для LOW
// это верхняя граница "< N", для остальных уровней нижняя "N+".
fn buzz_for(article_count: usize) -> (BuzzTier, String) {
    for &(threshold, tier, factor) in BUZZ_TIERS {
        if article_count > threshold {
            return (tier, format!("{}+", article_count as u64 * factor));
        }
    }
    (
        BuzzTier::Low,
        format!("< {}", article_count as u64 * LOW_BUZZ_FACTOR),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawNewsContent;
    use approx::assert_relative_eq;

    fn aggregator() -> NewsAggregatorService {
        NewsAggregatorService::new(SentimentScorerService::new())
    }

    fn headline(polarity: f64) -> Headline {
        Headline {
            title: "t".to_string(),
            publisher: "p".to_string(),
            link: String::new(),
            polarity,
        }
    }

    fn record(title: Option<&str>) -> RawNewsRecord {
        RawNewsRecord {
            title: title.map(str::to_string),
            content: None,
            publisher: Some("Reuters".to_string()),
            link: Some("https://example.com/a".to_string()),
        }
    }

    #[test]
    fn test_empty_aggregation_is_neutral() {
        let summary = aggregator().aggregate(&[]);
        assert_eq!(summary.base_score, 0.0);
        assert_eq!(summary.article_count, 0);
        assert_eq!(summary.buzz_tier, BuzzTier::Low);
        assert_eq!(summary.buzz_estimate, "< 0");
    }

    #[test]
    fn test_base_score_is_mean() {
        let headlines = vec![headline(0.4), headline(0.2), headline(-0.1)];
        let summary = aggregator().aggregate(&headlines);
        assert_relative_eq!(summary.base_score, 0.5 / 3.0, epsilon = 1e-12);
        assert_eq!(summary.article_count, 3);
    }

    #[test]
    fn test_aggregation_is_order_independent() {
        let agg = aggregator();
        let forward = vec![headline(0.4), headline(0.2), headline(-0.1)];
        let backward = vec![headline(-0.1), headline(0.2), headline(0.4)];
        let rotated = vec![headline(0.2), headline(-0.1), headline(0.4)];

        let base = agg.aggregate(&forward).base_score;
        assert_relative_eq!(agg.aggregate(&backward).base_score, base, epsilon = 1e-12);
        assert_relative_eq!(agg.aggregate(&rotated).base_score, base, epsilon = 1e-12);
    }

    #[test]
    fn test_buzz_tier_boundaries() {
        // Границы строгие: ровно на пороге остаемся в нижнем уровне
        assert_eq!(buzz_for(0).0, BuzzTier::Low);
        assert_eq!(buzz_for(3).0, BuzzTier::Low);
        assert_eq!(buzz_for(4).0, BuzzTier::Moderate);
        assert_eq!(buzz_for(8).0, BuzzTier::Moderate);
        assert_eq!(buzz_for(9).0, BuzzTier::High);
        assert_eq!(buzz_for(15).0, BuzzTier::High);
        assert_eq!(buzz_for(16).0, BuzzTier::VeryHigh);
    }

    #[test]
    fn test_buzz_estimate_formatting() {
        assert_eq!(buzz_for(2).1, "< 200");
        assert_eq!(buzz_for(4).1, "600+");
        assert_eq!(buzz_for(9).1, "2700+");
        assert_eq!(buzz_for(16).1, "8000+");
    }

    #[test]
    fn test_extract_title_shapes() {
        // Плоская запись
        let flat = record(Some("Flat title"));
        assert_eq!(
            NewsAggregatorService::extract_title(&flat),
            Some("Flat title".to_string())
        );

        // Вложенный content.title
        let nested = RawNewsRecord {
            title: None,
            content: Some(RawNewsContent {
                title: Some("Nested title".to_string()),
            }),
            publisher: None,
            link: None,
        };
        assert_eq!(
            NewsAggregatorService::extract_title(&nested),
            Some("Nested title".to_string())
        );

        // Пустой плоский title не перекрывает вложенный
        let blank_flat = RawNewsRecord {
            title: Some("   ".to_string()),
            content: Some(RawNewsContent {
                title: Some("Backup".to_string()),
            }),
            publisher: None,
            link: None,
        };
        assert_eq!(
            NewsAggregatorService::extract_title(&blank_flat),
            Some("Backup".to_string())
        );

        // Заголовка нет нигде
        assert_eq!(NewsAggregatorService::extract_title(&record(None)), None);
    }

    #[test]
    fn test_titleless_record_counts_as_neutral() {
        let agg = aggregator();
        let headlines = agg.prepare_headlines(&[record(None)]).unwrap();
        assert_eq!(headlines.len(), 1);
        assert_eq!(headlines[0].title, "");
        assert_eq!(headlines[0].polarity, 0.0);
        assert_eq!(headlines[0].publisher, "Reuters");
    }

    #[test]
    fn test_clean_title_strips_markup() {
        let agg = aggregator();
        let headlines = agg
            .prepare_headlines(&[record(Some(
                "<b>Shares rally</b>  after report https://example.com/x",
            ))])
            .unwrap();
        assert_eq!(headlines[0].title, "Shares rally after report");
    }
}
