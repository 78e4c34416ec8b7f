use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::errors::Result;
use crate::models::AnalysisResult;

/// Кэш последних результатов по тикерам. Результат неизменяем, поэтому
/// сертификат, PDF и карточка на дашборде читают одну и ту же запись.
#[derive(Clone)]
pub struct AnalysisResultHolder {
    results: Arc<Mutex<HashMap<String, AnalysisResult>>>,
}

impl AnalysisResultHolder {
    pub fn new() -> Self {
        AnalysisResultHolder {
            results: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn put(&self, ticker: String, result: AnalysisResult) -> Result<()> {
        let mut results = self.results.lock().await;
        results.insert(ticker, result);
        Ok(())
    }

    pub async fn get(&self, ticker: &str) -> Result<Option<AnalysisResult>> {
        let results = self.results.lock().await;
        Ok(results.get(ticker).cloned())
    }

    pub async fn clear(&self) -> Result<()> {
        let mut results = self.results.lock().await;
        results.clear();
        Ok(())
    }

    pub async fn len(&self) -> Result<usize> {
        let results = self.results.lock().await;
        Ok(results.len())
    }
}
