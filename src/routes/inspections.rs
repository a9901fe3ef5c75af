use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use serde::Serialize;

use super::{caller, log_intent};
use crate::{
    error::ApiError,
    models::inspection::{Inspection, InspectionRequest},
    query::inspections::{employee_name, ppe_type, InspectionQuery},
    state::AppState,
    stats::summary::{inspection_summary, InspectionSummary},
    store::Records,
    view::{
        badge::{Badge, Badged},
        format_date,
    },
};

#[derive(Debug, Serialize)]
pub struct InspectionRow {
    #[serde(flatten)]
    pub inspection: Inspection,
    pub employee_name: String,
    pub ppe_type: String,
    pub date_label: String,
    pub badge: Badge,
}
#[derive(Debug, Serialize)]
pub struct InspectionsView {
    pub summary: InspectionSummary,
    pub total_unfiltered: usize,
    pub rows: Vec<InspectionRow>,
}

impl InspectionRow {
    pub fn new(inspection: Inspection, records: &Records) -> Self {
        Self {
            employee_name: employee_name(records, &inspection.employee_id).to_string(),
            ppe_type: ppe_type(records, &inspection.ppe_item_id).to_string(),
            date_label: format_date(inspection.date),
            badge: inspection.status.badge(),
            inspection,
        }
    }
}

fn validate(payload: &InspectionRequest, records: &Records) -> Result<(), ApiError> {
    if payload.inspector.trim().is_empty() {
        return Err(ApiError::BadRequest("INSPECTION_MUST_HAVE_INSPECTOR"));
    }
    if records.ppe_item(&payload.ppe_item_id).is_none() {
        return Err(ApiError::BadRequest("PPE_ITEM_NOT_FOUND"));
    }
    if records.employee(&payload.employee_id).is_none() {
        return Err(ApiError::BadRequest("EMPLOYEE_NOT_FOUND"));
    }
    Ok(())
}

fn exists(records: &Records, inspection_id: &str) -> Result<(), ApiError> {
    if records
        .inspections
        .iter()
        .any(|inspection| inspection._id == inspection_id)
    {
        Ok(())
    } else {
        Err(ApiError::NotFound("INSPECTION_NOT_FOUND"))
    }
}

#[get("/inspecoes")]
pub async fn get_inspections(
    state: web::Data<AppState>,
    query: web::Query<InspectionQuery>,
) -> Result<HttpResponse, ApiError> {
    let records = state.load_records().await?;
    let rows = query.apply(&records, state.today());

    Ok(HttpResponse::Ok().json(InspectionsView {
        summary: inspection_summary(&rows),
        total_unfiltered: records.inspections.len(),
        rows: rows
            .into_iter()
            .map(|inspection| InspectionRow::new(inspection, &records))
            .collect(),
    }))
}
#[get("/inspecoes/{inspection_id}")]
pub async fn get_inspection(
    state: web::Data<AppState>,
    inspection_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let records = state.load_records().await?;
    let inspection = records
        .inspections
        .iter()
        .find(|inspection| inspection._id == *inspection_id)
        .cloned()
        .ok_or(ApiError::NotFound("INSPECTION_NOT_FOUND"))?;
    Ok(HttpResponse::Ok().json(InspectionRow::new(inspection, &records)))
}
#[post("/inspecoes")]
pub async fn create_inspection(
    state: web::Data<AppState>,
    payload: web::Json<InspectionRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let actor = caller(&req)?;
    let records = state.load_records().await?;
    validate(&payload, &records)?;
    Ok(log_intent("create", "inspection", &payload.ppe_item_id, &actor))
}
#[put("/inspecoes/{inspection_id}")]
pub async fn update_inspection(
    state: web::Data<AppState>,
    inspection_id: web::Path<String>,
    payload: web::Json<InspectionRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let actor = caller(&req)?;
    let records = state.load_records().await?;
    exists(&records, &inspection_id)?;
    validate(&payload, &records)?;
    Ok(log_intent("update", "inspection", &inspection_id, &actor))
}
#[delete("/inspecoes/{inspection_id}")]
pub async fn delete_inspection(
    state: web::Data<AppState>,
    inspection_id: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let actor = caller(&req)?;
    let records = state.load_records().await?;
    exists(&records, &inspection_id)?;
    Ok(log_intent("delete", "inspection", &inspection_id, &actor))
}
