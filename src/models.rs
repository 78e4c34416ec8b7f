use serde::{Deserialize, Serialize};

/// Сырая новостная запись от внешнего провайдера. Заголовок может лежать
/// как в плоском поле title, так и внутри вложенного content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNewsRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<RawNewsContent>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNewsContent {
    #[serde(default)]
    pub title: Option<String>,
}

/// Заголовок с уже рассчитанной полярностью. После оценки не изменяется.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Headline {
    pub title: String,
    pub publisher: String,
    pub link: String,
    pub polarity: f64, // -1.0 .. 1.0
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuzzTier {
    Low,
    Moderate,
    High,
    VeryHigh,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SentimentSummary {
    pub base_score: f64, // -1.0 .. 1.0, среднее по заголовкам
    pub article_count: usize,
    pub buzz_tier: BuzzTier,
    pub buzz_estimate: String, // эвристика для отображения, не измеренный охват
}

/// Гипотетический рыночный сценарий с фиксированным множителем настроения.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Scenario {
    #[serde(rename = "None")]
    None,
    #[serde(rename = "Interest Rates +1%")]
    InterestRatesUp,
    #[serde(rename = "Tech Acquisition Announced")]
    TechAcquisition,
    #[serde(rename = "Global Recession Fear")]
    RecessionFear,
    #[serde(rename = "Earnings Beat Expectation")]
    EarningsBeat,
    #[serde(rename = "Supply Chain Disruption")]
    SupplyChainDisruption,
}

impl Scenario {
    pub const ALL: [Scenario; 6] = [
        Scenario::None,
        Scenario::InterestRatesUp,
        Scenario::TechAcquisition,
        Scenario::RecessionFear,
        Scenario::EarningsBeat,
        Scenario::SupplyChainDisruption,
    ];

    pub fn multiplier(self) -> f64 {
        match self {
            Scenario::None => 1.0,
            Scenario::InterestRatesUp => 0.75,
            Scenario::TechAcquisition => 1.3,
            Scenario::RecessionFear => 0.5,
            Scenario::EarningsBeat => 1.4,
            Scenario::SupplyChainDisruption => 0.65,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Scenario::None => "None",
            Scenario::InterestRatesUp => "Interest Rates +1%",
            Scenario::TechAcquisition => "Tech Acquisition Announced",
            Scenario::RecessionFear => "Global Recession Fear",
            Scenario::EarningsBeat => "Earnings Beat Expectation",
            Scenario::SupplyChainDisruption => "Supply Chain Disruption",
        }
    }

    pub fn from_name(name: &str) -> Option<Scenario> {
        Scenario::ALL.iter().copied().find(|s| s.label() == name)
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Buy,
    Sell,
    Hold,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

/// Котировка и фундаментальные показатели от внешнего провайдера.
/// Читаются как есть; валидируется только current_price > 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockQuote {
    pub current_price: f64,
    #[serde(default)]
    pub previous_close: Option<f64>,
    #[serde(default)]
    pub beta: Option<f64>, // при отсутствии подставляется 1.0
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub trailing_pe: Option<f64>,
    #[serde(default)]
    pub fifty_two_week_high: Option<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Fundamentals {
    pub previous_close: Option<f64>,
    pub market_cap: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
}

impl Fundamentals {
    pub fn from_quote(quote: &StockQuote) -> Self {
        Fundamentals {
            previous_close: quote.previous_close,
            market_cap: quote.market_cap,
            trailing_pe: quote.trailing_pe,
            fifty_two_week_high: quote.fifty_two_week_high,
        }
    }
}

/// Входные данные одного анализа: тикер, котировка, сценарий и новости.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub ticker: String,
    pub quote: StockQuote,
    #[serde(default)]
    pub scenario: Option<String>,
    #[serde(default)]
    pub news: Vec<RawNewsRecord>,
}

/// Итог анализа одного тикера. Создается один раз и не мутируется:
/// смена сценария или обновление новостей дают новый результат.
/// Намеренно не содержит временной метки, чтобы одинаковые входы
/// сериализовались байт-в-байт одинаково.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalysisResult {
    pub ticker: String,
    pub scenario: Scenario,
    pub base_sentiment: f64,
    pub adjusted_sentiment: f64,
    pub recommendation: Recommendation,
    pub current_price: f64,
    pub target_price: f64,
    pub upside_pct: f64,
    pub beta: f64,
    pub risk_tier: RiskTier,
    pub buzz: SentimentSummary,
    pub fundamentals: Fundamentals,
    pub key_headlines: Vec<Headline>, // первые 5 заголовков для витрины
}
