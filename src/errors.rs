// errors.rs
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Error, Debug)]
pub enum StockAnalysisError {
    #[error("Неизвестный сценарий: {0}")]
    UnknownScenario(String),

    #[error("Некорректная текущая цена: {0}")]
    InvalidPrice(f64),

    #[error("Ошибка конфигурации: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("Ошибка regex: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Ошибка выполнения задачи: {0}")]
    TaskError(#[from] JoinError),

    #[error("Некорректный формат данных: {0}")]
    InvalidDataFormat(String),
}

// Определяем псевдоним Result с фиксированным типом ошибки
pub type Result<T> = std::result::Result<T, StockAnalysisError>;
