use serde::Serialize;

use crate::{
    models::{
        employee::EmployeeStatus, inspection::InspectionStatus, movement::MovementKind,
        whitelist::WhitelistStatus,
    },
    stats::{compliance::ComplianceStatus, ExpirationStatus, StockStatus},
};

#[derive(Clone, Copy, Serialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Red,
    Orange,
    Green,
    Blue,
    Gray,
}

#[derive(Clone, Copy, Serialize, Debug, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub color: BadgeColor,
}

/// Anything shown to the user as a colored status pill.
pub trait Badged {
    fn badge(&self) -> Badge;
}

const fn badge(label: &'static str, color: BadgeColor) -> Badge {
    Badge { label, color }
}

impl Badged for StockStatus {
    fn badge(&self) -> Badge {
        match self {
            StockStatus::Critical => badge("Crítico", BadgeColor::Red),
            StockStatus::Low => badge("Baixo", BadgeColor::Orange),
            StockStatus::Normal => badge("Normal", BadgeColor::Green),
        }
    }
}

impl Badged for ExpirationStatus {
    fn badge(&self) -> Badge {
        match self {
            ExpirationStatus::Expired => badge("Vencido", BadgeColor::Red),
            ExpirationStatus::Expiring => badge("Vence em breve", BadgeColor::Orange),
            ExpirationStatus::Valid => badge("Válido", BadgeColor::Green),
            ExpirationStatus::None => badge("N/A", BadgeColor::Gray),
        }
    }
}

impl Badged for MovementKind {
    fn badge(&self) -> Badge {
        match self {
            MovementKind::Delivery => badge("Entrega", BadgeColor::Blue),
            MovementKind::Return => badge("Devolução", BadgeColor::Green),
            MovementKind::Replacement => badge("Substituição", BadgeColor::Orange),
            MovementKind::Discard => badge("Descarte", BadgeColor::Red),
        }
    }
}

impl Badged for InspectionStatus {
    fn badge(&self) -> Badge {
        match self {
            InspectionStatus::Approved => badge("Aprovado", BadgeColor::Green),
            InspectionStatus::Warning => badge("Atenção", BadgeColor::Orange),
            InspectionStatus::Rejected => badge("Reprovado", BadgeColor::Red),
        }
    }
}

impl Badged for ComplianceStatus {
    fn badge(&self) -> Badge {
        match self {
            ComplianceStatus::Compliant => badge("Conforme", BadgeColor::Green),
            ComplianceStatus::Warning => badge("Atenção", BadgeColor::Orange),
            ComplianceStatus::Critical => badge("Crítico", BadgeColor::Red),
        }
    }
}

impl Badged for EmployeeStatus {
    fn badge(&self) -> Badge {
        match self {
            EmployeeStatus::Active => badge("Ativo", BadgeColor::Green),
            EmployeeStatus::Inactive => badge("Inativo", BadgeColor::Gray),
        }
    }
}

impl Badged for WhitelistStatus {
    fn badge(&self) -> Badge {
        match self {
            WhitelistStatus::Active => badge("Ativo", BadgeColor::Green),
            WhitelistStatus::Inactive => badge("Inativo", BadgeColor::Gray),
        }
    }
}
