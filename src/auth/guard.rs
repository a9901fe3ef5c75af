//! Who may reach a protected page: anyone in the company email domain, or
//! an account whose uid is on the allow-list. Any lookup failure denies.

use super::Identity;
use crate::{error::AuthError, store::AccessStore};

/// Case-insensitive suffix match of `email` against `domain`
/// (`@empresa.com.br`). An empty domain admits nobody.
pub fn in_domain(email: &str, domain: &str) -> bool {
    let domain = domain.trim();
    !domain.is_empty() && email.to_lowercase().ends_with(&domain.to_lowercase())
}

pub async fn authorize(
    identity: &Identity,
    domain: &str,
    access: &dyn AccessStore,
) -> Result<(), AuthError> {
    if in_domain(&identity.email, domain) {
        tracing::debug!(uid = %identity.uid, "access granted by company domain");
        return Ok(());
    }
    match access.contains(&identity.uid).await {
        Ok(true) => {
            tracing::debug!(uid = %identity.uid, "access granted by allow-list");
            Ok(())
        }
        Ok(false) => {
            tracing::warn!(uid = %identity.uid, email = %identity.email, "access denied");
            Err(AuthError::AuthorizationDenied)
        }
        Err(error) => {
            tracing::error!(uid = %identity.uid, %error, "allow-list lookup failed");
            Err(AuthError::LookupFailure(error.to_string()))
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    Checking,
    Anonymous,
    Authorized(Identity),
    Unauthorized(AuthError),
}

#[derive(Clone, Debug)]
pub enum SessionEvent {
    /// The provider reports a fresh sign-in; authorization starts over.
    SignedIn,
    /// The provider reports nobody is signed in.
    NoSession,
    Checked(Result<Identity, AuthError>),
    /// Explicit or forced sign-out finished.
    SignedOut,
}

/// What the page shell shows for a given session state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardView {
    Loading,
    Render(Identity),
    RedirectToLogin,
}

impl GuardView {
    pub fn is_render(&self) -> bool {
        matches!(self, GuardView::Render(_))
    }
}

impl SessionState {
    pub fn on(self, event: SessionEvent) -> Self {
        match (self, event) {
            (_, SessionEvent::SignedIn) => SessionState::Checking,
            (_, SessionEvent::SignedOut) => SessionState::Anonymous,
            (SessionState::Checking, SessionEvent::NoSession) => SessionState::Anonymous,
            (SessionState::Checking, SessionEvent::Checked(Ok(identity))) => {
                SessionState::Authorized(identity)
            }
            (SessionState::Checking, SessionEvent::Checked(Err(error))) => {
                SessionState::Unauthorized(error)
            }
            (state, _) => state,
        }
    }

    /// Unauthorized sessions must be signed out right away.
    pub fn needs_sign_out(&self) -> bool {
        matches!(self, SessionState::Unauthorized(_))
    }

    pub fn view(&self) -> GuardView {
        match self {
            SessionState::Checking => GuardView::Loading,
            SessionState::Authorized(identity) => GuardView::Render(identity.clone()),
            SessionState::Anonymous | SessionState::Unauthorized(_) => GuardView::RedirectToLogin,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Checking => "checking",
            SessionState::Anonymous => "anonymous",
            SessionState::Authorized(_) => "authorized",
            SessionState::Unauthorized(_) => "unauthorized",
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::NaiveDate;

    use super::*;
    use crate::{
        error::StoreError,
        models::whitelist::{WhitelistStatus, WhitelistUser},
        store::memory::MemoryAccessStore,
    };

    const DOMAIN: &str = "@empresa.com.br";

    struct BrokenAccessStore;

    #[async_trait]
    impl AccessStore for BrokenAccessStore {
        async fn contains(&self, _uid: &str) -> Result<bool, StoreError> {
            Err(StoreError::Poisoned)
        }
        async fn list(&self) -> Result<Vec<WhitelistUser>, StoreError> {
            Err(StoreError::Poisoned)
        }
        async fn insert(&self, _user: WhitelistUser) -> Result<(), StoreError> {
            Err(StoreError::Poisoned)
        }
        async fn remove(&self, _uid: &str) -> Result<bool, StoreError> {
            Err(StoreError::Poisoned)
        }
        async fn set_status(
            &self,
            _uid: &str,
            _status: WhitelistStatus,
        ) -> Result<Option<WhitelistUser>, StoreError> {
            Err(StoreError::Poisoned)
        }
    }

    fn identity(uid: &str, email: &str) -> Identity {
        Identity {
            uid: uid.to_string(),
            email: email.to_string(),
            name: "Teste".to_string(),
        }
    }

    fn allow_listed(uid: &str, status: WhitelistStatus) -> MemoryAccessStore {
        MemoryAccessStore::with_users(vec![WhitelistUser {
            _id: uid.to_string(),
            email: "consultor@externa.com".to_string(),
            name: "Consultor".to_string(),
            added_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            added_by: "admin@empresa.com.br".to_string(),
            status,
        }])
    }

    #[test]
    fn domain_match_is_a_case_insensitive_suffix() {
        assert!(in_domain("Joao.Silva@Empresa.com.br", DOMAIN));
        assert!(!in_domain("joao@empresa.com.br.evil.com", DOMAIN));
        assert!(!in_domain("joao@outraempresa.com", DOMAIN));
        assert!(!in_domain("joao@empresa.com.br", "  "));
    }

    #[actix_web::test]
    async fn domain_accounts_skip_the_lookup() {
        let who = identity("uid-1", "maria.souza@empresa.com.br");
        assert_eq!(authorize(&who, DOMAIN, &BrokenAccessStore).await, Ok(()));
    }

    #[actix_web::test]
    async fn allow_list_is_matched_by_uid_regardless_of_status() {
        let store = allow_listed("uid-ext", WhitelistStatus::Inactive);
        let who = identity("uid-ext", "consultor@externa.com");
        assert_eq!(authorize(&who, DOMAIN, &store).await, Ok(()));

        let stranger = identity("uid-other", "consultor@externa.com");
        assert_eq!(
            authorize(&stranger, DOMAIN, &store).await,
            Err(AuthError::AuthorizationDenied)
        );
    }

    #[actix_web::test]
    async fn lookup_errors_fail_closed() {
        let who = identity("uid-ext", "consultor@externa.com");
        assert!(matches!(
            authorize(&who, DOMAIN, &BrokenAccessStore).await,
            Err(AuthError::LookupFailure(_))
        ));
    }

    #[test]
    fn state_machine_follows_provider_events() {
        let who = identity("uid-1", "joao@empresa.com.br");

        let state = SessionState::Checking;
        assert_eq!(state.view(), GuardView::Loading);

        let state = state.on(SessionEvent::Checked(Ok(who.clone())));
        assert_eq!(state.view(), GuardView::Render(who.clone()));

        let state = state.on(SessionEvent::SignedOut);
        assert_eq!(state, SessionState::Anonymous);
        assert_eq!(state.view(), GuardView::RedirectToLogin);

        let state = state.on(SessionEvent::SignedIn);
        assert_eq!(state, SessionState::Checking);

        let state = state.on(SessionEvent::Checked(Err(AuthError::AuthorizationDenied)));
        assert!(state.needs_sign_out());
        assert_eq!(state.view(), GuardView::RedirectToLogin);
        assert_eq!(state.on(SessionEvent::SignedOut), SessionState::Anonymous);
    }

    #[test]
    fn stale_results_are_ignored_outside_checking() {
        let who = identity("uid-1", "joao@empresa.com.br");
        let state = SessionState::Anonymous.on(SessionEvent::Checked(Ok(who)));
        assert_eq!(state, SessionState::Anonymous);
        assert_eq!(
            SessionState::Checking.on(SessionEvent::NoSession),
            SessionState::Anonymous
        );
    }
}
