use crate::errors::{Result, StockAnalysisError};
use crate::models::Scenario;

/// Строгий разбор: имя вне фиксированного набора дает ошибку.
pub fn resolve_scenario(name: &str) -> Result<Scenario> {
    Scenario::from_name(name)
        .ok_or_else(|| StockAnalysisError::UnknownScenario(name.to_string()))
}

/// Мягкий разбор для конвейера. Сценарий лишь подсказка, а не критичный
/// параметр, поэтому неизвестное имя дает нейтральный множитель,
/// а не прерывание анализа.
pub fn resolve_or_neutral(name: Option<&str>) -> Scenario {
    match name {
        None => Scenario::None,
        Some(raw) => match resolve_scenario(raw) {
            Ok(scenario) => scenario,
            Err(e) => {
                tracing::warn!("{}, используем нейтральный множитель", e);
                Scenario::None
            }
        },
    }
}

/// Скорректированный балл: базовый балл, умноженный на множитель сценария.
pub fn adjust_score(base_score: f64, scenario: Scenario) -> f64 {
    base_score * scenario.multiplier()
}
