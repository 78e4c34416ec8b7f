use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::errors::Result;

/// Вотчлист сессии: общее изменяемое состояние процесса.
/// Им владеет вызывающий слой; ядро анализа сюда не обращается.
#[derive(Clone)]
pub struct WatchlistHolder {
    tickers: Arc<Mutex<BTreeSet<String>>>,
}

impl WatchlistHolder {
    pub fn new() -> Self {
        WatchlistHolder {
            tickers: Arc::new(Mutex::new(BTreeSet::new())),
        }
    }

    /// Добавление атомарно на весь вызов; false для дубликата.
    pub async fn add(&self, ticker: &str) -> Result<bool> {
        let mut tickers = self.tickers.lock().await;
        Ok(tickers.insert(ticker.trim().to_uppercase()))
    }

    /// Удаление атомарно на весь вызов; false, если тикера не было.
    pub async fn remove(&self, ticker: &str) -> Result<bool> {
        let mut tickers = self.tickers.lock().await;
        Ok(tickers.remove(&ticker.trim().to_uppercase()))
    }

    pub async fn contains(&self, ticker: &str) -> Result<bool> {
        let tickers = self.tickers.lock().await;
        Ok(tickers.contains(&ticker.trim().to_uppercase()))
    }

    pub async fn list(&self) -> Result<Vec<String>> {
        let tickers = self.tickers.lock().await;
        Ok(tickers.iter().cloned().collect())
    }

    pub async fn len(&self) -> Result<usize> {
        let tickers = self.tickers.lock().await;
        Ok(tickers.len())
    }
}
