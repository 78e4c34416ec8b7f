use crate::errors::{Result, StockAnalysisError};
use crate::models::{Recommendation, RiskTier};

const BUY_THRESHOLD: f64 = 0.1;
const SELL_THRESHOLD: f64 = -0.1;
// Доля скорректированного настроения, переносимая в целевую цену
const TARGET_SENSITIVITY: f64 = 0.3;

// Уровни риска по бете: берется первая подошедшая верхняя граница
const RISK_TIERS: &[(f64, RiskTier)] = &[
    (0.8, RiskTier::Low),
    (1.5, RiskTier::Medium),
];

#[derive(Debug, Clone, PartialEq)]
pub struct PriceOutlook {
    pub recommendation: Recommendation,
    pub target_price: f64,
    pub upside_pct: f64,
}

/// Рекомендация зависит только от скорректированного балла.
/// Неравенства строгие: ровно ±0.1 классифицируется как HOLD.
pub fn classify_recommendation(adjusted_score: f64, current_price: f64) -> Result<PriceOutlook> {
    if current_price <= 0.0 {
        return Err(StockAnalysisError::InvalidPrice(current_price));
    }

    let recommendation = match adjusted_score {
        s if s > BUY_THRESHOLD => Recommendation::Buy,
        s if s < SELL_THRESHOLD => Recommendation::Sell,
        _ => Recommendation::Hold,
    };

    let target_price = current_price * (1.0 + adjusted_score * TARGET_SENSITIVITY);
    let upside_pct = (target_price - current_price) / current_price * 100.0;

    Ok(PriceOutlook {
        recommendation,
        target_price,
        upside_pct,
    })
}

/// Уровень риска зависит только от беты; функция тотальна.
pub fn classify_risk(beta: f64) -> RiskTier {
    for &(upper, tier) in RISK_TIERS {
        if beta < upper {
            return tier;
        }
    }
    RiskTier::High
}
