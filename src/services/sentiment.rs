use std::sync::Arc;
use vader_sentiment::SentimentIntensityAnalyzer;

// Биржевой жаргон, который общий лексикон VADER оценивает слабо.
// Веса складываются с составной оценкой с коэффициентом TERM_WEIGHT.
const BULLISH_TERMS: &[(&str, f64)] = &[
    ("beats expectations", 0.5),
    ("beats estimates", 0.5),
    ("raises guidance", 0.5),
    ("record revenue", 0.5),
    ("record profit", 0.5),
    ("all-time high", 0.5),
    ("soars", 0.5),
    ("surge", 0.4),
    ("surges", 0.4),
    ("rally", 0.4),
    ("rallies", 0.4),
    ("upgrade", 0.4),
    ("upgraded", 0.4),
    ("outperform", 0.4),
    ("breakthrough", 0.4),
    ("dividend hike", 0.4),
    ("buyback", 0.3),
    ("strong demand", 0.3),
    ("expansion", 0.2),
    ("partnership", 0.2),
];

const BEARISH_TERMS: &[(&str, f64)] = &[
    ("misses estimates", -0.5),
    ("misses expectations", -0.5),
    ("cuts guidance", -0.5),
    ("plunge", -0.5),
    ("plunges", -0.5),
    ("bankruptcy", -0.6),
    ("fraud", -0.6),
    ("downgrade", -0.4),
    ("downgraded", -0.4),
    ("lawsuit", -0.4),
    ("recall", -0.4),
    ("layoffs", -0.4),
    ("tumbles", -0.4),
    ("selloff", -0.4),
    ("sell-off", -0.4),
    ("slump", -0.4),
    ("short seller", -0.4),
    ("investigation", -0.3),
    ("antitrust", -0.3),
    ("warning", -0.3),
];

const TERM_WEIGHT: f64 = 0.5;

/// Лексический оценщик заголовков. Детерминирован при фиксированной
/// версии лексикона, без побочных эффектов.
#[derive(Clone)]
pub struct SentimentScorerService {
    analyzer: Arc<SentimentIntensityAnalyzer<'static>>,
}

impl SentimentScorerService {
    pub fn new() -> Self {
        SentimentScorerService {
            analyzer: Arc::new(SentimentIntensityAnalyzer::new()),
        }
    }

    /// Полярность заголовка в диапазоне [-1, 1].
    /// Пустой или пробельный заголовок дает нейтральный 0.
    pub fn score(&self, title: &str) -> f64 {
        if title.trim().is_empty() {
            return 0.0;
        }

        let scores = self.analyzer.polarity_scores(title);
        let compound = scores["compound"];

        (compound + self.term_adjustment(title) * TERM_WEIGHT).clamp(-1.0, 1.0)
    }

    fn term_adjustment(&self, title: &str) -> f64 {
        let title_lower = title.to_lowercase();
        let mut adjustment = 0.0;

        for (term, weight) in BULLISH_TERMS {
            if title_lower.contains(term) {
                adjustment += weight;
            }
        }

        for (term, weight) in BEARISH_TERMS {
            if title_lower.contains(term) {
                adjustment += weight; // вес уже отрицательный
            }
        }

        adjustment
    }
}

impl Default for SentimentScorerService {
    fn default() -> Self {
        Self::new()
    }
}
