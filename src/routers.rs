use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use crate::models::AnalysisRequest;
use crate::AppState;

#[derive(Deserialize)]
pub struct BatchAnalysisRequest {
    pub requests: Vec<AnalysisRequest>,
}

#[derive(Deserialize)]
pub struct WatchlistRequest {
    pub ticker: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub watchlist_size: usize,
    pub cached_results: usize,
    pub available_endpoints: Vec<String>,
}

// Основной обработчик анализа одного тикера
pub async fn ticker_analysis(
    State(state): State<AppState>,
    Json(req): Json<AnalysisRequest>,
) -> Result<Json<Value>, StatusCode> {
    // Валидация входных данных
    if req.ticker.trim().is_empty() {
        tracing::warn!("Пустой тикер в запросе");
        return Err(StatusCode::BAD_REQUEST);
    }

    tracing::info!("Начинаем анализ {}", req.ticker);

    match state.analyzer.analyze(req) {
        Ok(result) => {
            state
                .results
                .put(result.ticker.clone(), result.clone())
                .await
                .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
            tracing::info!("Анализ {} успешно завершен", result.ticker);
            Ok(Json(json!({
                "status": "success",
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "result": result,
            })))
        }
        Err(e) => {
            tracing::error!("Ошибка анализа: {}", e);
            Ok(Json(json!({
                "status": "error",
                "message": format!("Ошибка анализа: {}", e),
                "error_type": "analysis_error"
            })))
        }
    }
}

// Пакетный анализ: сбой одного тикера не прерывает остальных
pub async fn batch_analysis(
    State(state): State<AppState>,
    Json(req): Json<BatchAnalysisRequest>,
) -> Result<Json<Value>, StatusCode> {
    if req.requests.is_empty() {
        tracing::warn!("Пустой пакет запросов");
        return Err(StatusCode::BAD_REQUEST);
    }

    tracing::info!("Пакетный анализ {} тикеров", req.requests.len());

    let outcomes = state.analyzer.analyze_batch(req.requests).await;

    let mut entries = Vec::with_capacity(outcomes.len());
    for (ticker, outcome) in outcomes {
        match outcome {
            Ok(result) => {
                state
                    .results
                    .put(result.ticker.clone(), result.clone())
                    .await
                    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
                entries.push(json!({
                    "ticker": ticker,
                    "status": "success",
                    "result": result,
                }));
            }
            Err(e) => {
                entries.push(json!({
                    "ticker": ticker,
                    "status": "error",
                    "message": format!("{}", e),
                    "error_type": "analysis_error"
                }));
            }
        }
    }

    Ok(Json(json!({
        "status": "success",
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "results": entries,
    })))
}

// Последний собранный результат по тикеру
pub async fn cached_result(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let ticker = ticker.trim().to_uppercase();
    let cached = state
        .results
        .get(&ticker)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    match cached {
        Some(result) => Ok(Json(json!({
            "status": "success",
            "result": result,
        }))),
        None => Err(StatusCode::NOT_FOUND),
    }
}

pub async fn get_watchlist(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let tickers = state
        .watchlist
        .list()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(json!({
        "status": "success",
        "tickers": tickers,
    })))
}

pub async fn add_watchlist_ticker(
    State(state): State<AppState>,
    Json(req): Json<WatchlistRequest>,
) -> Result<Json<Value>, StatusCode> {
    let ticker = req.ticker.trim().to_uppercase();
    if ticker.is_empty() {
        tracing::warn!("Пустой тикер для вотчлиста");
        return Err(StatusCode::BAD_REQUEST);
    }

    let added = state
        .watchlist
        .add(&ticker)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(json!({
        "status": "success",
        "ticker": ticker,
        "added": added,
    })))
}

pub async fn remove_watchlist_ticker(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let ticker = ticker.trim().to_uppercase();
    let removed = state
        .watchlist
        .remove(&ticker)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(json!({
        "status": "success",
        "ticker": ticker,
        "removed": removed,
    })))
}

// Проверка здоровья сервиса
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "Stock Sentiment Analyzer API is running".to_string(),
        version: "1.0.0".to_string(),
    })
}

// Получение статуса сервиса
pub async fn get_status(State(state): State<AppState>) -> Result<Json<StatusResponse>, StatusCode> {
    let watchlist_size = state
        .watchlist
        .len()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let cached_results = state
        .results
        .len()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(StatusResponse {
        status: "ready".to_string(),
        watchlist_size,
        cached_results,
        available_endpoints: vec![
            "/".to_string(),
            "/status".to_string(),
            "/api/analyze".to_string(),
            "/api/analyze-batch".to_string(),
            "/api/results/:ticker".to_string(),
            "/api/watchlist".to_string(),
        ],
    }))
}

// Создание маршрутов
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/status", get(get_status))
        .route("/api/analyze", post(ticker_analysis))
        .route("/api/analyze-batch", post(batch_analysis))
        .route("/api/results/:ticker", get(cached_result))
        .route("/api/watchlist", get(get_watchlist).post(add_watchlist_ticker))
        .route("/api/watchlist/:ticker", delete(remove_watchlist_ticker))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
