//! Shared fixtures for handler and middleware tests.

use std::sync::{Arc, RwLock};

use actix_web::{http::header, web};
use chrono::{NaiveDate, Utc};
use jsonwebtoken::{encode, Algorithm, DecodingKey, EncodingKey, Header};
use serde_json::json;

use crate::{
    auth::{session::SessionKeys, Identity, JwtIdentityProvider},
    models::{
        settings::Settings,
        whitelist::{WhitelistStatus, WhitelistUser},
    },
    state::{AppState, Clock},
    store::memory::{FixtureStore, MemoryAccessStore},
};

pub const SESSION_SECRET: &str = "test-session-secret-test-session-secret";
pub const IDENTITY_SECRET: &str = "test-identity-secret-test-identity-secret";
pub const AUDIENCE: &str = "epi-console.apps.googleusercontent.com";
const ISSUER: &str = "https://accounts.google.com";

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 25).unwrap()
}

pub fn identity_provider() -> JwtIdentityProvider {
    JwtIdentityProvider::new(
        DecodingKey::from_secret(IDENTITY_SECRET.as_bytes()),
        Algorithm::HS256,
        AUDIENCE,
        &[ISSUER.to_string()],
    )
}

/// A Google-style ID token signed with the test identity secret.
pub fn google_token(uid: &str, email: &str) -> String {
    let claims = json!({
        "sub": uid,
        "email": email,
        "name": "Conta de Teste",
        "aud": AUDIENCE,
        "iss": ISSUER,
        "exp": Utc::now().timestamp() + 3600,
    });
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(IDENTITY_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn consultant() -> WhitelistUser {
    WhitelistUser {
        _id: "uid-consultor".to_string(),
        email: "consultor@empresa-externa.com".to_string(),
        name: "João Consultor".to_string(),
        added_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        added_by: "admin@empresa.com.br".to_string(),
        status: WhitelistStatus::Active,
    }
}

pub fn employee_identity() -> Identity {
    Identity {
        uid: "uid-joao".to_string(),
        email: "joao.silva@empresa.com.br".to_string(),
        name: "João Silva".to_string(),
    }
}

pub fn state() -> web::Data<AppState> {
    web::Data::new(AppState {
        records: Arc::new(FixtureStore::seeded()),
        access: Arc::new(MemoryAccessStore::with_users(vec![consultant()])),
        identity: Arc::new(identity_provider()),
        sessions: SessionKeys::new(SESSION_SECRET, 3600),
        settings: RwLock::new(Settings::default()),
        clock: Clock::Fixed(today()),
    })
}

/// `Authorization` header for a signed-in session of `identity`.
pub fn bearer(state: &AppState, identity: &Identity) -> (header::HeaderName, String) {
    let token = state.sessions.issue(identity).unwrap();
    (header::AUTHORIZATION, format!("Bearer {token}"))
}
