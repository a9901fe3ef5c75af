use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use serde::Serialize;

use super::{caller, is_valid_email};
use crate::{
    auth::Identity,
    error::ApiError,
    models::{
        settings::{NotificationSettings, Settings, SystemSettingsPatch},
        whitelist::{WhitelistRequest, WhitelistStatus, WhitelistUser},
    },
    state::AppState,
    view::{
        badge::{Badge, Badged},
        format_date,
    },
};

#[derive(Debug, Serialize)]
pub struct WhitelistRow {
    #[serde(flatten)]
    pub user: WhitelistUser,
    pub added_date_label: String,
    pub badge: Badge,
}
#[derive(Debug, Serialize)]
pub struct SettingsView {
    pub account: Identity,
    #[serde(flatten)]
    pub settings: Settings,
    pub whitelist: Vec<WhitelistRow>,
}

impl From<WhitelistUser> for WhitelistRow {
    fn from(user: WhitelistUser) -> Self {
        Self {
            added_date_label: format_date(user.added_date),
            badge: user.status.badge(),
            user,
        }
    }
}

async fn whitelist_rows(state: &AppState) -> Result<Vec<WhitelistRow>, ApiError> {
    let users = state.access.list().await?;
    Ok(users.into_iter().map(WhitelistRow::from).collect())
}

#[get("/configuracoes")]
pub async fn get_settings(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let account = caller(&req)?;
    Ok(HttpResponse::Ok().json(SettingsView {
        account,
        settings: state.settings()?,
        whitelist: whitelist_rows(&state).await?,
    }))
}
#[get("/configuracoes/whitelist")]
pub async fn get_whitelist(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(whitelist_rows(&state).await?))
}
#[post("/configuracoes/whitelist")]
pub async fn add_whitelist_user(
    state: web::Data<AppState>,
    payload: web::Json<WhitelistRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let actor = caller(&req)?;
    let payload = payload.into_inner();

    if payload.uid.trim().is_empty() {
        return Err(ApiError::BadRequest("WHITELIST_USER_MUST_HAVE_UID"));
    }
    if payload.name.trim().is_empty() {
        return Err(ApiError::BadRequest("WHITELIST_USER_MUST_HAVE_NAME"));
    }
    if !is_valid_email(&payload.email) {
        return Err(ApiError::BadRequest("WHITELIST_USER_MUST_HAVE_VALID_EMAIL"));
    }

    let user = WhitelistUser {
        _id: payload.uid.trim().to_string(),
        email: payload.email.trim().to_lowercase(),
        name: payload.name.trim().to_string(),
        added_date: state.today(),
        added_by: actor.email.clone(),
        status: WhitelistStatus::Active,
    };
    state.access.insert(user.clone()).await?;
    tracing::info!(uid = %user._id, email = %user.email, added_by = %actor.email, "allow-list entry added");

    Ok(HttpResponse::Created().json(WhitelistRow::from(user)))
}
#[delete("/configuracoes/whitelist/{uid}")]
pub async fn remove_whitelist_user(
    state: web::Data<AppState>,
    uid: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let actor = caller(&req)?;
    if !state.access.remove(&uid).await? {
        return Err(ApiError::NotFound("WHITELIST_USER_NOT_FOUND"));
    }
    tracing::info!(uid = %uid, removed_by = %actor.email, "allow-list entry removed");
    Ok(HttpResponse::Ok().body(uid.into_inner()))
}
#[put("/configuracoes/whitelist/{uid}/status")]
pub async fn toggle_whitelist_user(
    state: web::Data<AppState>,
    uid: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let actor = caller(&req)?;
    let current = state
        .access
        .list()
        .await?
        .into_iter()
        .find(|user| user._id == *uid)
        .ok_or(ApiError::NotFound("WHITELIST_USER_NOT_FOUND"))?;

    let updated = state
        .access
        .set_status(&uid, current.status.toggled())
        .await?
        .ok_or(ApiError::NotFound("WHITELIST_USER_NOT_FOUND"))?;
    tracing::info!(
        uid = %updated._id,
        status = updated.status.as_str(),
        changed_by = %actor.email,
        "allow-list entry status changed"
    );
    Ok(HttpResponse::Ok().json(WhitelistRow::from(updated)))
}
#[put("/configuracoes/notificacoes")]
pub async fn update_notifications(
    state: web::Data<AppState>,
    payload: web::Json<NotificationSettings>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let actor = caller(&req)?;
    let notifications = payload.into_inner();
    let notifications = state.update_settings(|settings| {
        settings.notifications = notifications;
        settings.notifications.clone()
    })?;
    tracing::info!(
        changed_by = %actor.email,
        notifications = ?notifications,
        "notification settings updated"
    );
    Ok(HttpResponse::Ok().json(notifications))
}
#[put("/configuracoes/sistema")]
pub async fn update_system(
    state: web::Data<AppState>,
    payload: web::Json<SystemSettingsPatch>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let actor = caller(&req)?;
    let patch = payload.into_inner();

    let system = state
        .update_settings(|settings| {
            settings
                .system
                .apply(patch)
                .map(|()| settings.system.clone())
        })?
        .map_err(ApiError::BadRequest)?;
    tracing::info!(
        changed_by = %actor.email,
        system = ?system,
        "system settings updated"
    );
    Ok(HttpResponse::Ok().json(system))
}
