use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use serde::Serialize;

use super::{caller, log_intent};
use crate::{
    error::ApiError,
    models::movement::{Movement, MovementKind, MovementRequest},
    query::movements::{employee_name, ppe_label, MovementQuery},
    state::AppState,
    stats::summary::{movement_summary, MovementSummary},
    store::Records,
    view::{
        badge::{Badge, Badged},
        format_date,
    },
};

#[derive(Debug, Serialize)]
pub struct MovementRow {
    #[serde(flatten)]
    pub movement: Movement,
    pub employee_name: String,
    pub ppe_label: String,
    pub date_label: String,
    pub badge: Badge,
}
#[derive(Debug, Serialize)]
pub struct EmployeeOption {
    pub id: String,
    pub name: String,
}
#[derive(Debug, Serialize)]
pub struct MovementsView {
    pub summary: MovementSummary,
    pub total_unfiltered: usize,
    pub employees: Vec<EmployeeOption>,
    pub rows: Vec<MovementRow>,
}

impl MovementRow {
    pub fn new(movement: Movement, records: &Records) -> Self {
        Self {
            employee_name: employee_name(records, movement.employee_id.as_deref()).to_string(),
            ppe_label: ppe_label(records, &movement.ppe_item_id),
            date_label: format_date(movement.date),
            badge: movement.kind.badge(),
            movement,
        }
    }
}

fn validate(payload: &MovementRequest, records: &Records) -> Result<(), ApiError> {
    if payload.quantity == 0 {
        return Err(ApiError::BadRequest("MOVEMENT_MUST_HAVE_QUANTITY"));
    }
    if records.ppe_item(&payload.ppe_item_id).is_none() {
        return Err(ApiError::BadRequest("PPE_ITEM_NOT_FOUND"));
    }
    match payload.employee_id.as_deref() {
        None if payload.kind != MovementKind::Discard => {
            Err(ApiError::BadRequest("MOVEMENT_MUST_HAVE_EMPLOYEE"))
        }
        Some(employee_id) if records.employee(employee_id).is_none() => {
            Err(ApiError::BadRequest("EMPLOYEE_NOT_FOUND"))
        }
        _ => Ok(()),
    }
}

#[get("/movimentacoes")]
pub async fn get_movements(
    state: web::Data<AppState>,
    query: web::Query<MovementQuery>,
) -> Result<HttpResponse, ApiError> {
    let records = state.load_records().await?;
    let today = state.today();
    let rows = query.apply(&records, today);

    Ok(HttpResponse::Ok().json(MovementsView {
        summary: movement_summary(&rows, today),
        total_unfiltered: records.movements.len(),
        employees: records
            .employees
            .iter()
            .map(|employee| EmployeeOption {
                id: employee._id.clone(),
                name: employee.name.clone(),
            })
            .collect(),
        rows: rows
            .into_iter()
            .map(|movement| MovementRow::new(movement, &records))
            .collect(),
    }))
}
#[get("/movimentacoes/{movement_id}")]
pub async fn get_movement(
    state: web::Data<AppState>,
    movement_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let records = state.load_records().await?;
    let movement = records
        .movements
        .iter()
        .find(|movement| movement._id == *movement_id)
        .cloned()
        .ok_or(ApiError::NotFound("MOVEMENT_NOT_FOUND"))?;
    Ok(HttpResponse::Ok().json(MovementRow::new(movement, &records)))
}
#[post("/movimentacoes")]
pub async fn create_movement(
    state: web::Data<AppState>,
    payload: web::Json<MovementRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let actor = caller(&req)?;
    let records = state.load_records().await?;
    validate(&payload, &records)?;
    Ok(log_intent("create", "movement", &payload.ppe_item_id, &actor))
}
#[put("/movimentacoes/{movement_id}")]
pub async fn update_movement(
    state: web::Data<AppState>,
    movement_id: web::Path<String>,
    payload: web::Json<MovementRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let actor = caller(&req)?;
    let records = state.load_records().await?;
    if !records.movements.iter().any(|movement| movement._id == *movement_id) {
        return Err(ApiError::NotFound("MOVEMENT_NOT_FOUND"));
    }
    validate(&payload, &records)?;
    Ok(log_intent("update", "movement", &movement_id, &actor))
}
#[delete("/movimentacoes/{movement_id}")]
pub async fn delete_movement(
    state: web::Data<AppState>,
    movement_id: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let actor = caller(&req)?;
    let records = state.load_records().await?;
    if !records.movements.iter().any(|movement| movement._id == *movement_id) {
        return Err(ApiError::NotFound("MOVEMENT_NOT_FOUND"));
    }
    Ok(log_intent("delete", "movement", &movement_id, &actor))
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
    async fn lists_filtered_movements_with_labels() {
        let state = testing::state();
        let app = app!(state.clone());
        let req = test::TestRequest::get()
            .uri("/movimentacoes?type=delivery&employee_id=emp1&sort_order=asc")
            .insert_header(testing::bearer(&state, &testing::employee_identity()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["total_unfiltered"], json!(10));
        assert_eq!(body["summary"]["total"], json!(2));
        assert_eq!(body["summary"]["delivery"], json!(2));
        assert_eq!(body["rows"][0]["_id"], json!("mov10"));
        assert_eq!(body["rows"][0]["type"], json!("delivery"));
        assert_eq!(body["rows"][0]["employee_name"], json!("João Silva"));
        assert_eq!(body["rows"][0]["ppe_label"], json!("Óculos de Segurança - EyeGuard"));
        assert_eq!(body["rows"][0]["date_label"], json!("15/03/2024"));
        assert_eq!(body["rows"][0]["badge"]["label"], json!("Entrega"));
    }

    #[actix_web::test]
    async fn rejects_unknown_filter_values() {
        let state = testing::state();
        let app = app!(state.clone());
        let req = test::TestRequest::get()
            .uri("/movimentacoes?type=gift")
            .insert_header(testing::bearer(&state, &testing::employee_identity()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn detail_and_missing_movement() {
        let state = testing::state();
        let app = app!(state.clone());
        let req = test::TestRequest::get()
            .uri("/movimentacoes/mov5")
            .insert_header(testing::bearer(&state, &testing::employee_identity()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["employee_name"], json!("Colaborador não encontrado"));

        let req = test::TestRequest::get()
            .uri("/movimentacoes/mov99")
            .insert_header(testing::bearer(&state, &testing::employee_identity()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(test::read_body(res).await, "MOVEMENT_NOT_FOUND");
    }

    #[actix_web::test]
    async fn mutations_are_only_acknowledged() {
        let state = testing::state();
        let app = app!(state.clone());
        let req = test::TestRequest::post()
            .uri("/movimentacoes")
            .insert_header(testing::bearer(&state, &testing::employee_identity()))
            .set_json(json!({
                "type": "delivery",
                "date": "2024-06-25",
                "employee_id": "emp2",
                "ppe_item_id": "ppe1",
                "quantity": 2
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::ACCEPTED);
        assert_eq!(state.load_records().await.unwrap().movements.len(), 10);

        let req = test::TestRequest::post()
            .uri("/movimentacoes")
            .insert_header(testing::bearer(&state, &testing::employee_identity()))
            .set_json(json!({
                "type": "delivery",
                "date": "2024-06-25",
                "ppe_item_id": "ppe1",
                "quantity": 2
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(test::read_body(res).await, "MOVEMENT_MUST_HAVE_EMPLOYEE");

        let req = test::TestRequest::delete()
            .uri("/movimentacoes/mov1")
            .insert_header(testing::bearer(&state, &testing::employee_identity()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::ACCEPTED);
    }
}
