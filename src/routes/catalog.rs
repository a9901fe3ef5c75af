use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;

use super::{caller, log_intent, movements::MovementRow};
use crate::{
    error::ApiError,
    models::ppe_item::{PpeItem, PpeItemRequest},
    query::{catalog::CatalogQuery, pager::Pager},
    state::AppState,
    stats::{
        days_until, expiration_status, stock_status,
        summary::{catalog_summary, CatalogSummary},
    },
    view::{
        badge::{Badge, Badged},
        format_optional_date, format_price,
        table::{Column, Table, TablePage},
    },
};

#[derive(Debug, Serialize)]
pub struct CatalogView {
    pub summary: CatalogSummary,
    pub filtered: bool,
    pub table: TablePage,
}
#[derive(Debug, Serialize)]
pub struct CatalogDetail {
    pub item: PpeItem,
    pub stock_badge: Badge,
    pub expiration_badge: Badge,
    pub days_until_expiration: Option<i64>,
    pub movements: Vec<MovementRow>,
}

fn catalog_table<'a>(today: NaiveDate, warning_days: i64) -> Table<'a, PpeItem> {
    Table::new(vec![
        Column::field("id", "ID", |item: &PpeItem| json!(item._id)),
        Column::field("type", "Tipo", |item: &PpeItem| json!(item.kind)),
        Column::render("brand_model", "Marca/Modelo", |item: &PpeItem| {
            format!("{} {}", item.brand, item.model)
        }),
        Column::field("ca", "CA", |item: &PpeItem| json!(item.ca)),
        Column::field("current_stock", "Estoque", |item: &PpeItem| {
            json!(item.current_stock)
        }),
        Column::field("minimum_stock", "Mínimo", |item: &PpeItem| {
            json!(item.minimum_stock)
        }),
        Column::field("stock_status", "Status", |item: &PpeItem| {
            json!(stock_status(item).badge())
        }),
        Column::render("unit_price", "Preço", |item: &PpeItem| {
            format_price(item.unit_price)
        }),
        Column::render("expiration_date", "Vencimento", |item: &PpeItem| {
            format_optional_date(item.expiration_date)
        }),
        Column::field("expiration_status", "Validade", move |item: &PpeItem| {
            json!(expiration_status(item.expiration_date, today, warning_days).badge())
        }),
    ])
    .with_empty_message("Nenhum EPI encontrado.")
}

fn validate(payload: &PpeItemRequest) -> Result<(), ApiError> {
    if payload.kind.trim().is_empty() {
        return Err(ApiError::BadRequest("PPE_ITEM_MUST_HAVE_TYPE"));
    }
    if payload.brand.trim().is_empty() {
        return Err(ApiError::BadRequest("PPE_ITEM_MUST_HAVE_BRAND"));
    }
    if !payload.unit_price.is_finite() || payload.unit_price < 0.0 {
        return Err(ApiError::BadRequest("PPE_ITEM_MUST_HAVE_VALID_PRICE"));
    }
    Ok(())
}

#[get("/catalogo")]
pub async fn get_items(
    state: web::Data<AppState>,
    query: web::Query<CatalogQuery>,
) -> Result<HttpResponse, ApiError> {
    let records = state.load_records().await?;
    let today = state.today();
    let warning_days = state.thresholds()?.expiration_warning_days;

    let rows = query.apply(&records.ppe_items);
    let pager = Pager::at(rows.len(), query.page_size, query.page);

    Ok(HttpResponse::Ok().json(CatalogView {
        summary: catalog_summary(&records.ppe_items, today, warning_days),
        filtered: query.is_filtered(),
        table: catalog_table(today, warning_days).page(&rows, &pager),
    }))
}
#[get("/catalogo/{item_id}")]
pub async fn get_item(
    state: web::Data<AppState>,
    item_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let records = state.load_records().await?;
    let today = state.today();
    let warning_days = state.thresholds()?.expiration_warning_days;

    let item = records
        .ppe_item(&item_id)
        .cloned()
        .ok_or(ApiError::NotFound("PPE_ITEM_NOT_FOUND"))?;
    let mut movements: Vec<MovementRow> = records
        .movements
        .iter()
        .filter(|movement| movement.ppe_item_id == item._id)
        .map(|movement| MovementRow::new(movement.clone(), &records))
        .collect();
    movements.sort_by(|a, b| b.movement.date.cmp(&a.movement.date));

    Ok(HttpResponse::Ok().json(CatalogDetail {
        stock_badge: stock_status(&item).badge(),
        expiration_badge: expiration_status(item.expiration_date, today, warning_days).badge(),
        days_until_expiration: item.expiration_date.map(|date| days_until(date, today)),
        movements,
        item,
    }))
}
#[post("/catalogo")]
pub async fn create_item(
    payload: web::Json<PpeItemRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let actor = caller(&req)?;
    validate(&payload)?;
    Ok(log_intent("create", "ppe_item", &payload.kind, &actor))
}
#[put("/catalogo/{item_id}")]
pub async fn update_item(
    state: web::Data<AppState>,
    item_id: web::Path<String>,
    payload: web::Json<PpeItemRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let actor = caller(&req)?;
    let records = state.load_records().await?;
    if records.ppe_item(&item_id).is_none() {
        return Err(ApiError::NotFound("PPE_ITEM_NOT_FOUND"));
    }
    validate(&payload)?;
    Ok(log_intent("update", "ppe_item", &item_id, &actor))
}
#[delete("/catalogo/{item_id}")]
pub async fn delete_item(
    state: web::Data<AppState>,
    item_id: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let actor = caller(&req)?;
    let records = state.load_records().await?;
    if records.ppe_item(&item_id).is_none() {
        return Err(ApiError::NotFound("PPE_ITEM_NOT_FOUND"));
    }
    Ok(log_intent("delete", "ppe_item", &item_id, &actor))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};

    use crate::{auth::session::SessionGuard, routes::configure, testing};

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state)
                    .wrap(SessionGuard)
                    .configure(configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn pages_the_sorted_catalog() {
        let state = testing::state();
        let app = app!(state.clone());
        let req = test::TestRequest::get()
            .uri("/catalogo?sort_by=price&sort_order=desc&page_size=5&page=2")
            .insert_header(testing::bearer(&state, &testing::employee_identity()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["filtered"], json!(false));
        assert_eq!(body["summary"]["total"], json!(7));
        assert_eq!(body["table"]["page"], json!(2));
        assert_eq!(body["table"]["total_pages"], json!(2));
        let rows = body["table"]["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["id"], json!("ppe5"));
        assert_eq!(rows[0]["unit_price"], json!("R$ 7.50"));
        assert_eq!(rows[1]["id"], json!("ppe1"));
    }

    #[actix_web::test]
    async fn out_of_range_page_falls_back_to_first() {
        let state = testing::state();
        let app = app!(state.clone());
        let req = test::TestRequest::get()
            .uri("/catalogo?page=9")
            .insert_header(testing::bearer(&state, &testing::employee_identity()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["table"]["page"], json!(1));
        assert_eq!(body["table"]["rows"].as_array().unwrap().len(), 7);
    }

    #[actix_web::test]
    async fn empty_result_carries_message() {
        let state = testing::state();
        let app = app!(state.clone());
        let req = test::TestRequest::get()
            .uri("/catalogo?stock_status=critical")
            .insert_header(testing::bearer(&state, &testing::employee_identity()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["filtered"], json!(true));
        assert_eq!(body["table"]["empty_message"], json!("Nenhum EPI encontrado."));
    }

    #[actix_web::test]
    async fn rejects_unsupported_page_size() {
        let state = testing::state();
        let app = app!(state.clone());
        let req = test::TestRequest::get()
            .uri("/catalogo?page_size=7")
            .insert_header(testing::bearer(&state, &testing::employee_identity()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn item_detail_flags_expiring_mask() {
        let state = testing::state();
        let app = app!(state.clone());
        let req = test::TestRequest::get()
            .uri("/catalogo/ppe4")
            .insert_header(testing::bearer(&state, &testing::employee_identity()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["days_until_expiration"], json!(6));
        assert_eq!(body["expiration_badge"]["label"], json!("Vence em breve"));
        assert_eq!(body["movements"][0]["_id"], json!("mov5"));
    }

    #[actix_web::test]
    async fn validates_new_items() {
        let state = testing::state();
        let app = app!(state.clone());
        let req = test::TestRequest::post()
            .uri("/catalogo")
            .insert_header(testing::bearer(&state, &testing::employee_identity()))
            .set_json(json!({
                "type": "",
                "brand": "SafetyPro",
                "model": "X",
                "current_stock": 1,
                "minimum_stock": 1,
                "unit_price": 1.0
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(test::read_body(res).await, "PPE_ITEM_MUST_HAVE_TYPE");

        let req = test::TestRequest::delete()
            .uri("/catalogo/ppe99")
            .insert_header(testing::bearer(&state, &testing::employee_identity()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
