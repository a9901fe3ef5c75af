use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde::Serialize;

use super::{caller, log_intent};
use crate::{
    error::ApiError,
    models::ppe_item::{PpeItem, StockEntryRequest},
    query::stock::StockQuery,
    state::AppState,
    stats::{
        expiration_status, stock_status,
        summary::{stock_summary, StockSummary},
    },
    view::{
        badge::{Badge, Badged},
        format_optional_date,
    },
};

#[derive(Debug, Serialize)]
pub struct StockRow {
    #[serde(flatten)]
    pub item: PpeItem,
    /// Current stock as a percentage of the minimum, when one is set.
    pub stock_percent: Option<u32>,
    pub stock_badge: Badge,
    pub expiration_label: String,
    pub expiration_badge: Badge,
}
#[derive(Debug, Serialize)]
pub struct StockView {
    pub summary: StockSummary,
    pub total_unfiltered: usize,
    pub rows: Vec<StockRow>,
}

#[get("/estoque")]
pub async fn get_stock(
    state: web::Data<AppState>,
    query: web::Query<StockQuery>,
) -> Result<HttpResponse, ApiError> {
    let records = state.load_records().await?;
    let today = state.today();
    let warning_days = state.thresholds()?.expiration_warning_days;

    let rows = query
        .apply(&records.ppe_items)
        .into_iter()
        .map(|item| StockRow {
            stock_percent: item
                .stock_ratio()
                .map(|ratio| (ratio * 100.0).round() as u32),
            stock_badge: stock_status(&item).badge(),
            expiration_label: format_optional_date(item.expiration_date),
            expiration_badge: expiration_status(item.expiration_date, today, warning_days)
                .badge(),
            item,
        })
        .collect();

    Ok(HttpResponse::Ok().json(StockView {
        summary: stock_summary(&records.ppe_items),
        total_unfiltered: records.ppe_items.len(),
        rows,
    }))
}
#[post("/estoque/entradas")]
pub async fn create_stock_entry(
    state: web::Data<AppState>,
    payload: web::Json<StockEntryRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let actor = caller(&req)?;
    if payload.quantity == 0 {
        return Err(ApiError::BadRequest("STOCK_ENTRY_MUST_HAVE_QUANTITY"));
    }
    let records = state.load_records().await?;
    if records.ppe_item(&payload.ppe_item_id).is_none() {
        return Err(ApiError::NotFound("PPE_ITEM_NOT_FOUND"));
    }
    tracing::info!(
        ppe_item_id = %payload.ppe_item_id,
        quantity = payload.quantity,
        note = payload.note.as_deref().unwrap_or_default(),
        "stock entry received"
    );
    Ok(log_intent("create", "stock_entry", &payload.ppe_item_id, &actor))
}
