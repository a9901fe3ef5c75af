use actix_web::{get, web, HttpResponse};
use serde::Serialize;

use super::movements::MovementRow;
use crate::{
    error::ApiError,
    models::{movement::MovementKind, ppe_item::PpeItem},
    state::AppState,
    stats::{
        compliance::assess_all,
        dashboard::{build, DashboardCards, DashboardQuery, MonthlyMovements, TimeFrame},
        stock_status,
    },
    view::badge::{Badge, Badged},
};

#[derive(Debug, Serialize)]
pub struct DistributionSlice {
    #[serde(rename = "type")]
    pub kind: MovementKind,
    pub badge: Badge,
    pub count: usize,
}
#[derive(Debug, Serialize)]
pub struct LowStockRow {
    #[serde(flatten)]
    pub item: PpeItem,
    pub badge: Badge,
}
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub cards: DashboardCards,
    pub time_frame: TimeFrame,
    pub monthly: Vec<MonthlyMovements>,
    pub distribution: Vec<DistributionSlice>,
    pub recent: Vec<MovementRow>,
    pub low_stock: Vec<LowStockRow>,
}

async fn overview(state: &AppState, query: &DashboardQuery) -> Result<HttpResponse, ApiError> {
    let records = state.load_records().await?;
    let today = state.today();
    let thresholds = state.thresholds()?;
    let compliance = assess_all(&records, today, thresholds);
    let dashboard = build(
        &records,
        &compliance,
        query,
        today,
        thresholds.expiration_warning_days,
    );

    Ok(HttpResponse::Ok().json(DashboardView {
        cards: dashboard.cards,
        time_frame: dashboard.time_frame,
        monthly: dashboard.monthly,
        distribution: MovementKind::ALL
            .iter()
            .map(|kind| DistributionSlice {
                kind: *kind,
                badge: kind.badge(),
                count: dashboard.distribution.get(*kind),
            })
            .collect(),
        recent: dashboard
            .recent
            .into_iter()
            .map(|movement| MovementRow::new(movement, &records))
            .collect(),
        low_stock: dashboard
            .low_stock
            .into_iter()
            .map(|item| LowStockRow {
                badge: stock_status(&item).badge(),
                item,
            })
            .collect(),
    }))
}

#[get("/")]
pub async fn get_root(
    state: web::Data<AppState>,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse, ApiError> {
    overview(&state, &query).await
}
#[get("/dashboard")]
pub async fn get_dashboard(
    state: web::Data<AppState>,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse, ApiError> {
    overview(&state, &query).await
}

#[cfg(test)]
mod tests {
    use actix_web::{test, App};
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
    async fn dashboard_cards_and_analysis() {
        let state = testing::state();
        let app = app!(state.clone());
        let req = test::TestRequest::get()
            .uri("/dashboard")
            .insert_header(testing::bearer(&state, &testing::employee_identity()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            body["cards"],
            json!({
                "total_employees": 7,
                "total_units_in_stock": 585,
                "expiring_items": 1,
                "movements_this_month": 4,
                "compliance_rate": 29
            })
        );
        assert_eq!(body["time_frame"], json!("3months"));
        let months: Vec<&str> = body["monthly"]
            .as_array()
            .unwrap()
            .iter()
            .map(|bucket| bucket["month"].as_str().unwrap())
            .collect();
        assert_eq!(months, vec!["abr", "mai", "jun"]);
        assert_eq!(body["distribution"][0]["type"], json!("delivery"));
        assert_eq!(body["distribution"][0]["count"], json!(5));
        assert_eq!(body["distribution"][0]["badge"]["label"], json!("Entrega"));
        assert_eq!(body["recent"][0]["_id"], json!("mov4"));
        assert_eq!(body["low_stock"], json!([]));
    }

    #[actix_web::test]
    async fn root_serves_the_same_overview_filtered_by_type() {
        let state = testing::state();
        let app = app!(state.clone());
        let req = test::TestRequest::get()
            .uri("/?time_frame=12months&movement_type=return")
            .insert_header(testing::bearer(&state, &testing::employee_identity()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["monthly"].as_array().unwrap().len(), 12);
        let ids: Vec<&str> = body["recent"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["_id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["mov2", "mov9"]);
    }
}
