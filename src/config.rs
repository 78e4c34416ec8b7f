use anyhow::Result;
use config::Config;

#[derive(Clone, serde::Deserialize)]
pub struct AppConfig {
    pub default_watchlist: Vec<String>,
    pub max_articles: Option<usize>,
    pub max_concurrent_analyses: Option<usize>,
}

impl AppConfig {
    /// Валидация конфигурации
    pub fn validate(&self) -> Result<()> {
        if self.default_watchlist.iter().any(|t| t.trim().is_empty()) {
            return Err(anyhow::anyhow!("default_watchlist contains an empty ticker"));
        }

        if let Some(max_articles) = self.max_articles {
            if max_articles == 0 || max_articles > 1000 {
                return Err(anyhow::anyhow!("max_articles must be between 1 and 1000"));
            }
        }

        if let Some(max_concurrent) = self.max_concurrent_analyses {
            if max_concurrent == 0 || max_concurrent > 50 {
                return Err(anyhow::anyhow!("max_concurrent_analyses must be between 1 and 50"));
            }
        }

        Ok(())
    }
}

pub fn load_config() -> Result<AppConfig> {
    // Загружаем .env файл
    dotenvy::dotenv().ok();

    let settings = Config::builder()
        .add_source(config::File::with_name("config"))
        .add_source(config::Environment::with_prefix("STOCK_ANALYZER"))
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    config.validate()?;

    Ok(config)
}
