//! Sign-in against the external identity provider and the session guard
//! that sits in front of every protected page.

use std::fs::read_to_string;

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    config::IdentityConfig,
    error::{AuthError, StartupError},
};

pub mod guard;
pub mod session;

/// A signed-in account. `uid` is the provider's stable account identifier
/// and is what the allow-list is keyed on.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Identity {
    pub uid: String,
    pub email: String,
    pub name: String,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, credential: &str) -> Result<Identity, AuthError>;
    /// Never fails; the caller does not wait on the outcome.
    async fn sign_out(&self, identity: &Identity);
}

#[derive(Debug, Deserialize)]
struct GoogleClaims {
    sub: String,
    email: Option<String>,
    name: Option<String>,
}

/// Verifies Google ID tokens locally against a configured RSA public key,
/// or against a shared secret for development setups.
pub struct JwtIdentityProvider {
    key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityProvider {
    pub fn new(key: DecodingKey, algorithm: Algorithm, audience: &str, issuers: &[String]) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.set_audience(&[audience]);
        validation.set_issuer(issuers);
        Self { key, validation }
    }

    pub fn from_config(config: &IdentityConfig) -> Result<Self, StartupError> {
        let (key, algorithm) = match (&config.public_key_path, &config.shared_secret) {
            (Some(path), _) => {
                let pem = read_to_string(path).map_err(|source| StartupError::KeyFile {
                    path: path.clone(),
                    source,
                })?;
                (DecodingKey::from_rsa_pem(pem.as_bytes())?, Algorithm::RS256)
            }
            (None, Some(secret)) => (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256),
            (None, None) => {
                return Err(StartupError::Invalid(
                    "no identity verification key configured".to_string(),
                ))
            }
        };
        Ok(Self::new(key, algorithm, &config.audience, &config.issuers))
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn sign_in(&self, credential: &str) -> Result<Identity, AuthError> {
        let data = decode::<GoogleClaims>(credential, &self.key, &self.validation)
            .map_err(|error| AuthError::AuthenticationFailure(error.to_string()))?;
        let claims = data.claims;
        let email = claims.email.ok_or_else(|| {
            AuthError::AuthenticationFailure("token carries no email".to_string())
        })?;
        Ok(Identity {
            uid: claims.sub,
            name: claims.name.unwrap_or_else(|| email.clone()),
            email,
        })
    }

    async fn sign_out(&self, identity: &Identity) {
        tracing::debug!(uid = %identity.uid, "signed out");
    }
}
