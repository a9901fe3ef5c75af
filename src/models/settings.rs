use serde::{Deserialize, Serialize};

use crate::stats::DEFAULT_EXPIRATION_WARNING_DAYS;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct NotificationSettings {
    pub email_notifications: bool,
    pub low_stock_alerts: bool,
    pub expiration_alerts: bool,
    pub inspection_reminders: bool,
    pub movement_notifications: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SystemSettings {
    pub company_name: String,
    pub authorized_domain: String,
    pub minimum_stock_threshold: u32,
    pub expiration_warning_days: i64,
    pub inspection_interval_days: i64,
}

/// A partial update of [`SystemSettings`]. Absent fields keep their
/// current value.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct SystemSettingsPatch {
    pub company_name: Option<String>,
    pub authorized_domain: Option<String>,
    pub minimum_stock_threshold: Option<u32>,
    pub expiration_warning_days: Option<i64>,
    pub inspection_interval_days: Option<i64>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Settings {
    pub system: SystemSettings,
    pub notifications: NotificationSettings,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            low_stock_alerts: true,
            expiration_alerts: true,
            inspection_reminders: true,
            movement_notifications: false,
        }
    }
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            company_name: "Empresa Exemplo Ltda".to_string(),
            authorized_domain: "@empresa.com.br".to_string(),
            minimum_stock_threshold: 10,
            expiration_warning_days: DEFAULT_EXPIRATION_WARNING_DAYS,
            inspection_interval_days: 90,
        }
    }
}

impl SystemSettings {
    /// Merges `patch` in. On a validation error nothing changes.
    pub fn apply(&mut self, patch: SystemSettingsPatch) -> Result<(), &'static str> {
        let merged = SystemSettings {
            company_name: patch.company_name.unwrap_or_else(|| self.company_name.clone()),
            authorized_domain: patch
                .authorized_domain
                .map(|domain| domain.trim().to_lowercase())
                .unwrap_or_else(|| self.authorized_domain.clone()),
            minimum_stock_threshold: patch
                .minimum_stock_threshold
                .unwrap_or(self.minimum_stock_threshold),
            expiration_warning_days: patch
                .expiration_warning_days
                .unwrap_or(self.expiration_warning_days),
            inspection_interval_days: patch
                .inspection_interval_days
                .unwrap_or(self.inspection_interval_days),
        };
        merged.validate()?;
        *self = merged;
        Ok(())
    }
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.company_name.trim().is_empty() {
            return Err("COMPANY_NAME_REQUIRED");
        }
        if !self.authorized_domain.starts_with('@') || self.authorized_domain.len() < 4 {
            return Err("INVALID_AUTHORIZED_DOMAIN");
        }
        if self.expiration_warning_days < 0 || self.inspection_interval_days <= 0 {
            return Err("INVALID_THRESHOLD");
        }
        Ok(())
    }
}
