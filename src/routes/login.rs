use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{
        guard::{authorize, SessionEvent, SessionState},
        session::{bearer_token, check, HOME_PATH},
        Identity,
    },
    error::ApiError,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// The ID token handed out by the identity provider.
    pub credential: String,
}
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Identity,
    pub redirect: String,
}
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginStatus {
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

#[get("/login")]
pub async fn get_login(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let session = check(&state, req.headers()).await;
    let redirect = session.view().is_render().then(|| HOME_PATH.to_string());
    HttpResponse::Ok().json(LoginStatus {
        state: session.as_str().to_string(),
        redirect,
    })
}
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let identity = state.identity.sign_in(&payload.credential).await.map_err(|error| {
        tracing::info!(%error, "sign-in failed");
        error
    })?;
    let domain = state.authorized_domain()?;
    let outcome = authorize(&identity, &domain, state.access.as_ref())
        .await
        .map(|()| identity.clone());

    let session = SessionState::Anonymous
        .on(SessionEvent::SignedIn)
        .on(SessionEvent::Checked(outcome));
    if let SessionState::Unauthorized(error) = session {
        state.identity.sign_out(&identity).await;
        return Err(error.into());
    }

    let token = state.sessions.issue(&identity)?;
    tracing::info!(uid = %identity.uid, email = %identity.email, "signed in");
    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        user: identity,
        redirect: HOME_PATH.to_string(),
    }))
}
#[post("/logout")]
pub async fn logout(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    if let Some(identity) = bearer_token(req.headers()).and_then(|token| state.sessions.verify(token)) {
        state.identity.sign_out(&identity).await;
    }
    HttpResponse::Ok().body("LOGGED_OUT")
}
