use std::sync::OnceLock;

use actix_web::{get, web, HttpMessage, HttpRequest, HttpResponse};
use regex::Regex;
use serde::Serialize;

use crate::{auth::Identity, error::ApiError};

pub mod catalog;
pub mod dashboard;
pub mod employees;
pub mod inspections;
pub mod login;
pub mod movements;
pub mod settings;
pub mod stock;

const EMAIL_PATTERN: &str =
    r"^([a-z0-9_+]([a-z0-9_+.\-]*[a-z0-9_+])?)@([a-z0-9]+([\-\.]{1}[a-z0-9]+)*\.[a-z]{2,6})$";

/// What a simulated mutation reports back. Nothing is stored.
#[derive(Debug, Serialize)]
pub struct Intent<'a> {
    pub action: &'static str,
    pub entity: &'static str,
    pub target: &'a str,
}

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().body("OK")
}

/// The identity the session guard attached to the request.
pub fn caller(req: &HttpRequest) -> Result<Identity, ApiError> {
    req.extensions()
        .get::<Identity>()
        .cloned()
        .ok_or(ApiError::Unauthorized)
}

pub fn log_intent(
    action: &'static str,
    entity: &'static str,
    target: &str,
    actor: &Identity,
) -> HttpResponse {
    tracing::info!(action, entity, target, actor = %actor.email, "simulated mutation");
    HttpResponse::Accepted().json(Intent {
        action,
        entity,
        target,
    })
}

pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(EMAIL_PATTERN).ok())
        .as_ref()
        .map_or(false, |regex| regex.is_match(&email.to_lowercase()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health)
        .service(login::get_login)
        .service(login::login)
        .service(login::logout)
        .service(dashboard::get_root)
        .service(dashboard::get_dashboard)
        .service(catalog::get_items)
        .service(catalog::get_item)
        .service(catalog::create_item)
        .service(catalog::update_item)
        .service(catalog::delete_item)
        .service(employees::get_employees)
        .service(employees::get_employee)
        .service(employees::create_employee)
        .service(employees::update_employee)
        .service(employees::toggle_employee_status)
        .service(employees::delete_employee)
        .service(stock::get_stock)
        .service(stock::create_stock_entry)
        .service(movements::get_movements)
        .service(movements::get_movement)
        .service(movements::create_movement)
        .service(movements::update_movement)
        .service(movements::delete_movement)
        .service(inspections::get_inspections)
        .service(inspections::get_inspection)
        .service(inspections::create_inspection)
        .service(inspections::update_inspection)
        .service(inspections::delete_inspection)
        .service(settings::get_settings)
        .service(settings::get_whitelist)
        .service(settings::add_whitelist_user)
        .service(settings::remove_whitelist_user)
        .service(settings::toggle_whitelist_user)
        .service(settings::update_notifications)
        .service(settings::update_system);
}
