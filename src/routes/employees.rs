use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use serde::Serialize;

use super::{caller, is_valid_email, log_intent, movements::MovementRow};
use crate::{
    error::ApiError,
    models::employee::{Employee, EmployeeRequest},
    query::employees::{departments, EmployeeQuery},
    state::AppState,
    stats::{
        compliance::{assess, assess_all, EmployeeCompliance},
        summary::{employee_summary, EmployeeSummary},
    },
    store::Records,
    view::{
        badge::{Badge, Badged},
        format_date,
    },
};

#[derive(Debug, Serialize)]
pub struct EmployeeRow {
    #[serde(flatten)]
    pub employee: Employee,
    pub hire_date_label: String,
    pub status_badge: Badge,
    pub compliance: EmployeeCompliance,
    pub compliance_badge: Badge,
}
#[derive(Debug, Serialize)]
pub struct EmployeesView {
    pub summary: EmployeeSummary,
    pub departments: Vec<String>,
    pub total_unfiltered: usize,
    pub rows: Vec<EmployeeRow>,
}
#[derive(Debug, Serialize)]
pub struct EmployeeDetail {
    #[serde(flatten)]
    pub row: EmployeeRow,
    pub movements: Vec<MovementRow>,
}

impl EmployeeRow {
    pub fn new(employee: Employee, compliance: EmployeeCompliance) -> Self {
        Self {
            hire_date_label: format_date(employee.hire_date),
            status_badge: employee.status.badge(),
            compliance_badge: compliance.status.badge(),
            compliance,
            employee,
        }
    }
}

fn validate(payload: &EmployeeRequest) -> Result<(), ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::BadRequest("EMPLOYEE_MUST_HAVE_NAME"));
    }
    if !is_valid_email(&payload.email) {
        return Err(ApiError::BadRequest("EMPLOYEE_MUST_HAVE_VALID_EMAIL"));
    }
    Ok(())
}

fn find(records: &Records, employee_id: &str) -> Result<Employee, ApiError> {
    records
        .employee(employee_id)
        .cloned()
        .ok_or(ApiError::NotFound("EMPLOYEE_NOT_FOUND"))
}

#[get("/colaboradores")]
pub async fn get_employees(
    state: web::Data<AppState>,
    query: web::Query<EmployeeQuery>,
) -> Result<HttpResponse, ApiError> {
    let records = state.load_records().await?;
    let compliance = assess_all(&records, state.today(), state.thresholds()?);

    let rows = query
        .apply(&records.employees)
        .into_iter()
        .filter_map(|employee| {
            compliance
                .iter()
                .find(|assessment| assessment.employee_id == employee._id)
                .cloned()
                .map(|assessment| EmployeeRow::new(employee, assessment))
        })
        .collect();

    Ok(HttpResponse::Ok().json(EmployeesView {
        summary: employee_summary(&records.employees, &compliance),
        departments: departments(&records.employees),
        total_unfiltered: records.employees.len(),
        rows,
    }))
}
#[get("/colaboradores/{employee_id}")]
pub async fn get_employee(
    state: web::Data<AppState>,
    employee_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let records = state.load_records().await?;
    let employee = find(&records, &employee_id)?;
    let compliance = assess(&employee, &records, state.today(), state.thresholds()?);

    let mut movements: Vec<MovementRow> = records
        .movements
        .iter()
        .filter(|movement| movement.belongs_to(&employee._id))
        .map(|movement| MovementRow::new(movement.clone(), &records))
        .collect();
    movements.sort_by(|a, b| b.movement.date.cmp(&a.movement.date));

    Ok(HttpResponse::Ok().json(EmployeeDetail {
        row: EmployeeRow::new(employee, compliance),
        movements,
    }))
}
#[post("/colaboradores")]
pub async fn create_employee(
    payload: web::Json<EmployeeRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let actor = caller(&req)?;
    validate(&payload)?;
    Ok(log_intent("create", "employee", &payload.email, &actor))
}
#[put("/colaboradores/{employee_id}")]
pub async fn update_employee(
    state: web::Data<AppState>,
    employee_id: web::Path<String>,
    payload: web::Json<EmployeeRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let actor = caller(&req)?;
    let records = state.load_records().await?;
    find(&records, &employee_id)?;
    validate(&payload)?;
    Ok(log_intent("update", "employee", &employee_id, &actor))
}
#[put("/colaboradores/{employee_id}/status")]
pub async fn toggle_employee_status(
    state: web::Data<AppState>,
    employee_id: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let actor = caller(&req)?;
    let records = state.load_records().await?;
    let employee = find(&records, &employee_id)?;
    tracing::info!(
        employee_id = %employee._id,
        status = employee.status.toggled().as_str(),
        "employee status change requested"
    );
    Ok(log_intent("toggle_status", "employee", &employee_id, &actor))
}
#[delete("/colaboradores/{employee_id}")]
pub async fn delete_employee(
    state: web::Data<AppState>,
    employee_id: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let actor = caller(&req)?;
    let records = state.load_records().await?;
    find(&records, &employee_id)?;
    Ok(log_intent("delete", "employee", &employee_id, &actor))
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
    async fn lists_a_department_by_name_with_compliance() {
        let state = testing::state();
        let app = app!(state.clone());
        let req = test::TestRequest::get()
            .uri("/colaboradores?department=Produ%C3%A7%C3%A3o&sort_by=name")
            .insert_header(testing::bearer(&state, &testing::employee_identity()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            body["summary"],
            json!({ "total": 7, "active": 6, "compliant": 2, "critical": 0 })
        );
        assert_eq!(
            body["departments"],
            json!(["Administrativo", "Manutenção", "Produção"])
        );
        let ids: Vec<&str> = body["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["_id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["emp3", "emp7", "emp1", "emp5"]);
        assert_eq!(body["rows"][0]["compliance_badge"]["label"], json!("Conforme"));
        assert_eq!(body["rows"][0]["status_badge"]["label"], json!("Ativo"));
        assert_eq!(body["rows"][0]["hire_date_label"], json!("10/07/2018"));
    }

    #[actix_web::test]
    async fn detail_includes_history_newest_first() {
        let state = testing::state();
        let app = app!(state.clone());
        let req = test::TestRequest::get()
            .uri("/colaboradores/emp1")
            .insert_header(testing::bearer(&state, &testing::employee_identity()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let ids: Vec<&str> = body["movements"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["_id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["mov2", "mov1", "mov10"]);
        assert_eq!(body["compliance"]["status"], json!("warning"));
        assert_eq!(body["compliance"]["overdue_inspections"], json!(1));
    }

    #[actix_web::test]
    async fn validates_and_acknowledges_changes() {
        let state = testing::state();
        let app = app!(state.clone());
        let employee = json!({
            "name": "Rita Moura",
            "email": "rita",
            "department": "Produção",
            "position": "Operador",
            "hire_date": "2024-06-01"
        });
        let req = test::TestRequest::post()
            .uri("/colaboradores")
            .insert_header(testing::bearer(&state, &testing::employee_identity()))
            .set_json(&employee)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(test::read_body(res).await, "EMPLOYEE_MUST_HAVE_VALID_EMAIL");

        let req = test::TestRequest::put()
            .uri("/colaboradores/emp4/status")
            .insert_header(testing::bearer(&state, &testing::employee_identity()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::ACCEPTED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body,
            json!({ "action": "toggle_status", "entity": "employee", "target": "emp4" })
        );

        let req = test::TestRequest::put()
            .uri("/colaboradores/emp99/status")
            .insert_header(testing::bearer(&state, &testing::employee_identity()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
