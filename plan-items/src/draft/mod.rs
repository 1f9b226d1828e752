//! Unsaved plan items being created or edited, one variant per editor tab.

mod accommodation;
mod activity;
mod expense;
mod transport;

pub use accommodation::*;
pub use activity::*;
pub use expense::*;
pub use transport::*;

use thiserror::Error;
use time::{Date, OffsetDateTime, UtcOffset};

use crate::domain::{ItemCategory, PlanItem, TripPlanItemType};
use crate::normalize::{day_key, is_currency_code, parse_amount, parse_count};
use crate::payload::PlanItemPayload;

/// Field labels shared by validation messages and the editor.
pub mod labels {
    pub const TITLE: &str = "Título";
    pub const NAME: &str = "Nombre";
    pub const LOCATION: &str = "Ubicación";
    pub const NOTES: &str = "Notas";
    pub const START: &str = "Inicio";
    pub const END: &str = "Fin";
    pub const COST: &str = "Coste";
    pub const AMOUNT: &str = "Importe";
    pub const CURRENCY: &str = "Moneda";
    pub const FLIGHT_NUMBER: &str = "Número de vuelo";
    pub const FLIGHT_DATE: &str = "Fecha del vuelo";
    pub const AIRLINE: &str = "Aerolínea";
    pub const COMPANY: &str = "Compañía";
    pub const FROM: &str = "Origen";
    pub const TO: &str = "Destino";
    pub const DEPARTURE: &str = "Salida";
    pub const ARRIVAL: &str = "Llegada";
    pub const BOOKING_REF: &str = "Localizador";
    pub const ADDRESS: &str = "Dirección";
    pub const CITY: &str = "Ciudad";
    pub const COUNTRY: &str = "País";
    pub const CHECK_IN: &str = "Entrada";
    pub const CHECK_OUT: &str = "Salida";
    pub const GUESTS: &str = "Huéspedes";
    pub const ROOMS: &str = "Habitaciones";
    pub const PHONE: &str = "Teléfono";
    pub const WEBSITE: &str = "Web";
    pub const ROOM_TYPE: &str = "Tipo de habitación";
    pub const BATHROOM_TYPE: &str = "Baño";
    pub const ACTIVITY_TYPE: &str = "Tipo";
    pub const BUDGET_CATEGORY: &str = "Categoría";
    pub const OCCURRED_AT: &str = "Fecha";
    pub const KIND: &str = "Tipo de transporte";
    pub const MODE: &str = "Medio";
    pub const ENTRY_MODE: &str = "Modo";
}

/// Why a draft cannot be submitted. The message is shown as-is in the form.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Completa el campo obligatorio: {0}.")]
    MissingField(&'static str),
    #[error("Selecciona un medio de transporte.")]
    MissingMode,
    #[error("La fecha de fin no puede ser anterior a la de inicio.")]
    InvalidDateRange,
    #[error("Introduce un número válido en: {0}.")]
    InvalidNumber(&'static str),
    #[error("La moneda debe ser un código de 3 letras, por ejemplo EUR.")]
    InvalidCurrency,
}

pub(crate) fn require_text(value: &str, label: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(label))
    } else {
        Ok(())
    }
}

pub(crate) fn require_set<T>(value: &Option<T>, label: &'static str) -> Result<(), ValidationError> {
    value
        .as_ref()
        .map(|_| ())
        .ok_or(ValidationError::MissingField(label))
}

/// Equal instants are accepted.
pub(crate) fn check_range(
    start: Option<OffsetDateTime>,
    end: Option<OffsetDateTime>,
) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(ValidationError::InvalidDateRange),
        _ => Ok(()),
    }
}

pub(crate) fn check_amount(raw: &str, label: &'static str) -> Result<Option<f64>, ValidationError> {
    parse_amount(raw).map_err(|_| ValidationError::InvalidNumber(label))
}

pub(crate) fn check_currency(raw: &str) -> Result<(), ValidationError> {
    if is_currency_code(raw) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCurrency)
    }
}

pub(crate) fn check_count(raw: &str, label: &'static str) -> Result<Option<u32>, ValidationError> {
    parse_count(raw).map_err(|_| ValidationError::InvalidNumber(label))
}

/// Day key of the most relevant instant, else of the preset day.
pub(crate) fn derive_day(primary: Option<OffsetDateTime>, preset: Option<Date>) -> Option<String> {
    primary.map(|dt| dt.date()).or(preset).map(day_key)
}

pub(crate) fn minutes_between(
    start: Option<OffsetDateTime>,
    end: Option<OffsetDateTime>,
) -> Option<i64> {
    match (start, end) {
        (Some(start), Some(end)) => Some((end - start).whole_minutes()),
        _ => None,
    }
}

/// Amount as the editor shows it: `12.5`, `20`.
pub(crate) fn amount_input(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanItemDraft {
    Transport(TransportDraft),
    Accommodation(AccommodationDraft),
    Activity(ActivityDraft),
    Expense(ExpenseDraft),
}

impl PlanItemDraft {
    pub fn new(category: ItemCategory) -> Self {
        match category {
            ItemCategory::Transport => PlanItemDraft::Transport(TransportDraft::default()),
            ItemCategory::Accommodation => {
                PlanItemDraft::Accommodation(AccommodationDraft::default())
            }
            ItemCategory::Activity => PlanItemDraft::Activity(ActivityDraft::default()),
            ItemCategory::Expense => PlanItemDraft::Expense(ExpenseDraft::default()),
        }
    }

    /// Seed a draft from a stored item, showing instants at `offset`.
    pub fn from_item(item: &PlanItem, offset: UtcOffset) -> Self {
        match item.item_type {
            TripPlanItemType::Flight
            | TripPlanItemType::TransportDestination
            | TripPlanItemType::TransportLocal => {
                PlanItemDraft::Transport(TransportDraft::from_item(item, offset))
            }
            TripPlanItemType::Accommodation => {
                PlanItemDraft::Accommodation(AccommodationDraft::from_item(item, offset))
            }
            TripPlanItemType::Expense => {
                PlanItemDraft::Expense(ExpenseDraft::from_item(item, offset))
            }
            _ => PlanItemDraft::Activity(ActivityDraft::from_item(item, offset)),
        }
    }

    pub fn category(&self) -> ItemCategory {
        match self {
            PlanItemDraft::Transport(_) => ItemCategory::Transport,
            PlanItemDraft::Accommodation(_) => ItemCategory::Accommodation,
            PlanItemDraft::Activity(_) => ItemCategory::Activity,
            PlanItemDraft::Expense(_) => ItemCategory::Expense,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            PlanItemDraft::Transport(draft) => draft.validate(),
            PlanItemDraft::Accommodation(draft) => draft.validate(),
            PlanItemDraft::Activity(draft) => draft.validate(),
            PlanItemDraft::Expense(draft) => draft.validate(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Validate once more and shape the backend payload.
    pub fn build_payload(&self, preset: Option<Date>) -> Result<PlanItemPayload, ValidationError> {
        self.validate()?;
        match self {
            PlanItemDraft::Transport(draft) => draft.build(preset),
            PlanItemDraft::Accommodation(draft) => draft.build(preset).map(PlanItemPayload::Create),
            PlanItemDraft::Activity(draft) => draft.build(preset).map(PlanItemPayload::Create),
            PlanItemDraft::Expense(draft) => draft.build(preset).map(PlanItemPayload::Create),
        }
    }
}
