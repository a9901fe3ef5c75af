use std::rc::Rc;

use actix_service::{self, Transform};
use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse},
    error::ErrorInternalServerError,
    http::header::{self, HeaderMap},
    web, Error, HttpMessage, HttpResponse,
};
use chrono::Utc;
use futures::{
    future::{ready, LocalBoxFuture, Ready},
    FutureExt,
};
use jsonwebtoken::{self, decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::{
    guard::{authorize, GuardView, SessionEvent, SessionState},
    Identity,
};
use crate::{error::AuthError, state::AppState};

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/dashboard";
const PUBLIC_PATHS: [&str; 3] = [LOGIN_PATH, "/logout", "/health"];
const ISSUER: &str = "epi-control";

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    email: String,
    name: String,
    iss: String,
    iat: i64,
    exp: i64,
}

/// Signs and checks the console's own session tokens.
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl SessionKeys {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs,
        }
    }

    pub fn issue(&self, identity: &Identity) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: identity.uid.clone(),
            email: identity.email.clone(),
            name: identity.name.clone(),
            iss: ISSUER.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    pub fn verify(&self, token: &str) -> Option<Identity> {
        let data = decode::<SessionClaims>(token, &self.decoding, &self.validation).ok()?;
        Some(Identity {
            uid: data.claims.sub,
            email: data.claims.email,
            name: data.claims.name,
        })
    }
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

/// Runs the session guard for one request. Authorization is re-checked
/// every time so allow-list removals and domain changes apply at once; a
/// session that fails it is signed out on the spot.
pub async fn check(state: &AppState, headers: &HeaderMap) -> SessionState {
    let identity = match bearer_token(headers).and_then(|token| state.sessions.verify(token)) {
        Some(identity) => identity,
        None => return SessionState::Checking.on(SessionEvent::NoSession),
    };
    let outcome = match state.authorized_domain() {
        Ok(domain) => authorize(&identity, &domain, state.access.as_ref())
            .await
            .map(|()| identity.clone()),
        Err(error) => Err(AuthError::LookupFailure(error.to_string())),
    };

    let session = SessionState::Checking.on(SessionEvent::Checked(outcome));
    if session.needs_sign_out() {
        state.identity.sign_out(&identity).await;
        return session.on(SessionEvent::SignedOut);
    }
    session
}

pub struct SessionGuard;

pub struct SessionGuardMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_service::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv: Rc<S> = self.service.clone();

        async move {
            if is_public(req.path()) {
                return srv.call(req).await.map(ServiceResponse::map_into_left_body);
            }
            let state = req
                .app_data::<web::Data<AppState>>()
                .cloned()
                .ok_or_else(|| ErrorInternalServerError("STATE_UNAVAILABLE"))?;

            let session = check(&state, req.headers()).await;
            match session.view() {
                GuardView::Render(identity) => {
                    req.extensions_mut().insert::<Identity>(identity);
                    srv.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                GuardView::Loading | GuardView::RedirectToLogin => {
                    let response = HttpResponse::SeeOther()
                        .insert_header((header::LOCATION, LOGIN_PATH))
                        .finish()
                        .map_into_right_body();
                    Ok(req.into_response(response))
                }
            }
        }
        .boxed_local()
    }
}
impl<S, B> Transform<S, ServiceRequest> for SessionGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = SessionGuardMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGuardMiddleware {
            service: Rc::new(service),
        }))
    }
}
