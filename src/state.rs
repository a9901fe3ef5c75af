use std::sync::{Arc, RwLock};

use chrono::{Local, NaiveDate};

use crate::{
    auth::{session::SessionKeys, IdentityProvider},
    error::StoreError,
    models::settings::Settings,
    stats::compliance::Thresholds,
    store::{AccessStore, RecordStore, Records},
};

/// Where "today" comes from. Tests pin it.
#[derive(Clone, Copy, Debug)]
pub enum Clock {
    System,
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Local::now().date_naive(),
            Clock::Fixed(date) => *date,
        }
    }
}

pub struct AppState {
    pub records: Arc<dyn RecordStore>,
    pub access: Arc<dyn AccessStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub sessions: SessionKeys,
    /// Editable from the settings page; lives as long as the process.
    pub settings: RwLock<Settings>,
    pub clock: Clock,
}

impl AppState {
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
    pub async fn load_records(&self) -> Result<Records, StoreError> {
        Records::load(self.records.as_ref()).await
    }
    pub fn settings(&self) -> Result<Settings, StoreError> {
        let settings = self.settings.read().map_err(|_| StoreError::Poisoned)?;
        Ok(settings.clone())
    }
    pub fn authorized_domain(&self) -> Result<String, StoreError> {
        let settings = self.settings.read().map_err(|_| StoreError::Poisoned)?;
        Ok(settings.system.authorized_domain.clone())
    }
    pub fn thresholds(&self) -> Result<Thresholds, StoreError> {
        let settings = self.settings.read().map_err(|_| StoreError::Poisoned)?;
        Ok(Thresholds::from(&settings.system))
    }
    /// Runs `update` under the write lock, so read-modify-write is atomic.
    pub fn update_settings<F, R>(&self, update: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut Settings) -> R,
    {
        let mut settings = self.settings.write().map_err(|_| StoreError::Poisoned)?;
        Ok(update(&mut settings))
    }
}
