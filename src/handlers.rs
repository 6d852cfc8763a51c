use crate::errors::AppError;
use crate::models::{
    DayResponse, FavoriteEntry, FavoritesResponse, MacroLimits, Preferences, QuantityRequest,
    RecentEntry, SavedItem, SearchResult, TrackingCell, TrackingResponse, TrackingRow,
    UpdatesResponse, MIN_TARGET_KCAL,
};
use crate::state::AppState;
use crate::ui::render_index;
use crate::{aggregate, calendar, color};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use std::time::Duration;

/// How long an update long-poll parks before answering anyway.
const UPDATES_POLL_TIMEOUT: Duration = Duration::from_secs(25);

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let preferences = state.store.preferences().await;
    Html(render_index(&preferences))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResult>, AppError> {
    let terms = query.q.trim();
    if terms.is_empty() {
        return Err(AppError::bad_request("q must not be empty"));
    }
    let result = state.off.search(terms).await?;
    record_recent(&state, &result).await;
    Ok(Json(result))
}

pub async fn product_by_barcode(
    State(state): State<AppState>,
    Path(ean): Path<String>,
) -> Result<Json<SearchResult>, AppError> {
    let ean = ean.trim();
    if ean.is_empty() || !ean.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::bad_request("ean must be numeric"));
    }
    let result = state.off.product_by_barcode(ean).await?;
    record_recent(&state, &result).await;
    Ok(Json(result))
}

async fn record_recent(state: &AppState, result: &SearchResult) {
    let name = result.product_name.clone().unwrap_or_default();
    let entry = RecentEntry {
        id: format!("{}-{name}", now_millis()),
        item: result.clone(),
    };
    state.store.push_recent(entry).await;
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub date: Option<String>,
}

pub async fn get_day(
    State(state): State<AppState>,
    Query(query): Query<DayQuery>,
) -> Result<Json<DayResponse>, AppError> {
    let date = match query.date {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|_| AppError::bad_request("date must be YYYY-MM-DD"))?,
        None => Local::now().date_naive(),
    };
    let history = state.store.history().await;
    let preferences = state.store.preferences().await;
    let items = aggregate::items_for_day(&history, date);
    let totals = aggregate::day_totals(&history, date);
    Ok(Json(DayResponse {
        date: date.to_string(),
        items,
        totals,
        limits: MacroLimits::default(),
        target_kcal: preferences.target_kcal,
    }))
}

#[derive(Debug, Deserialize)]
pub struct TrackingQuery {
    pub month: Option<String>,
}

pub async fn get_tracking(
    State(state): State<AppState>,
    Query(query): Query<TrackingQuery>,
) -> Result<Json<TrackingResponse>, AppError> {
    let month = match query.month {
        Some(raw) => NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
            .map_err(|_| AppError::bad_request("month must be YYYY-MM"))?,
        None => calendar::month_start(Local::now().date_naive()),
    };
    let history = state.store.history().await;
    let preferences = state.store.preferences().await;
    let kcal_by_day = aggregate::kcal_by_day(&history);

    let columns = calendar::week_columns(month);
    let rows = (0..calendar::WEEKDAY_ROWS)
        .map(|row| TrackingRow {
            weekday: row,
            cells: columns
                .iter()
                .map(|column| {
                    let date = calendar::cell_date(*column, row);
                    let in_month = calendar::in_month(date, month);
                    let kcal = kcal_by_day.get(&date).copied().unwrap_or(0.0);
                    let pct = aggregate::pct_of_target(kcal, preferences.target_kcal);
                    let cell_color = if in_month {
                        color::color_for(pct)
                    } else {
                        color::OUT_OF_MONTH.to_string()
                    };
                    TrackingCell {
                        date: date.to_string(),
                        in_month,
                        kcal: kcal.round() as i64,
                        pct,
                        color: cell_color,
                    }
                })
                .collect(),
        })
        .collect();

    Ok(Json(TrackingResponse {
        month: month.format("%Y-%m").to_string(),
        target_kcal: preferences.target_kcal,
        weeks: columns.iter().map(|column| column.to_string()).collect(),
        rows,
    }))
}

pub async fn save_item(
    State(state): State<AppState>,
    Json(payload): Json<SearchResult>,
) -> Result<Json<SavedItem>, AppError> {
    let Some(nutriments) = payload.nutriments else {
        return Err(AppError::bad_request("result has no nutriments"));
    };
    let preferences = state.store.preferences().await;
    let fallback = if preferences.language == "en" {
        "Product"
    } else {
        "Produit"
    };
    let timestamp = now_millis();
    let item = SavedItem {
        id: timestamp.to_string(),
        product_name: payload
            .product_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string()),
        nutriments,
        timestamp,
        quantity: 100,
        nutriscore_grade: payload.nutriscore_grade,
    };
    state.store.save_item(item.clone()).await;
    Ok(Json(item))
}

pub async fn set_quantity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<QuantityRequest>,
) -> Result<Json<SavedItem>, AppError> {
    match state.store.set_quantity(&id, payload.quantity).await {
        Some(item) => Ok(Json(item)),
        None => Err(AppError::not_found("no such item")),
    }
}

pub async fn remove_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.store.remove_item(&id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("no such item"))
    }
}

pub async fn get_recents(State(state): State<AppState>) -> Json<Vec<RecentEntry>> {
    Json(state.store.recents().await)
}

pub async fn get_favorites(State(state): State<AppState>) -> Json<Vec<FavoriteEntry>> {
    Json(state.store.favorites().await)
}

pub async fn toggle_favorite(
    State(state): State<AppState>,
    Json(entry): Json<FavoriteEntry>,
) -> Result<Json<FavoritesResponse>, AppError> {
    if entry.item.product_name.as_deref().unwrap_or("").is_empty() {
        return Err(AppError::bad_request("entry has no product name"));
    }
    let (favorite, favorites) = state.store.toggle_favorite(entry).await;
    Ok(Json(FavoritesResponse {
        favorite,
        favorites,
    }))
}

pub async fn get_preferences(State(state): State<AppState>) -> Json<Preferences> {
    Json(state.store.preferences().await)
}

pub async fn put_preferences(
    State(state): State<AppState>,
    Json(mut payload): Json<Preferences>,
) -> Result<Json<Preferences>, AppError> {
    if payload.language != "fr" && payload.language != "en" {
        return Err(AppError::bad_request("language must be 'fr' or 'en'"));
    }
    payload.target_kcal = payload.target_kcal.max(MIN_TARGET_KCAL);
    let stored = state.store.set_preferences(payload).await;
    Ok(Json(stored))
}

#[derive(Debug, Deserialize)]
pub struct UpdatesQuery {
    pub since: Option<u64>,
}

/// Long-poll on the store revision. Without `since` the current revision
/// comes back immediately; with it the request parks until a write lands
/// or the poll window closes.
pub async fn get_updates(
    State(state): State<AppState>,
    Query(query): Query<UpdatesQuery>,
) -> Json<UpdatesResponse> {
    let Some(since) = query.since else {
        return Json(UpdatesResponse {
            revision: state.store.revision(),
        });
    };
    let mut rx = state.store.subscribe();
    let wait = async {
        while *rx.borrow_and_update() <= since {
            if rx.changed().await.is_err() {
                break;
            }
        }
    };
    let _ = tokio::time::timeout(UPDATES_POLL_TIMEOUT, wait).await;
    Json(UpdatesResponse {
        revision: state.store.revision(),
    })
}

pub async fn clear_data(State(state): State<AppState>) -> StatusCode {
    state.store.clear_all().await;
    StatusCode::NO_CONTENT
}

fn now_millis() -> i64 {
    Local::now().timestamp_millis()
}
