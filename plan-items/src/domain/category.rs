use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::Choice;

/// Top-level tab of the plan item editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ItemCategory {
    Transport,
    Accommodation,
    #[default]
    Activity,
    Expense,
}

impl ItemCategory {
    /// Message shown when the backend rejects a save without saying why.
    pub fn save_failed_message(&self) -> &'static str {
        match self {
            ItemCategory::Transport => "No se pudo guardar el transporte.",
            ItemCategory::Accommodation => "No se pudo guardar el alojamiento.",
            ItemCategory::Activity => "No se pudo guardar la actividad.",
            ItemCategory::Expense => "No se pudo guardar el gasto.",
        }
    }
}

impl Choice for ItemCategory {
    fn label(&self) -> &'static str {
        match self {
            ItemCategory::Transport => "Transporte",
            ItemCategory::Accommodation => "Alojamiento",
            ItemCategory::Activity => "Actividad",
            ItemCategory::Expense => "Gasto",
        }
    }
}

/// Principal legs connect trip stops; local legs move around within one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum TransportKind {
    #[default]
    Principal,
    Local,
}

impl Choice for TransportKind {
    fn label(&self) -> &'static str {
        match self {
            TransportKind::Principal => "Principal",
            TransportKind::Local => "Local",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TransportMode {
    Flight,
    Train,
    Bus,
    Car,
}

impl Choice for TransportMode {
    fn label(&self) -> &'static str {
        match self {
            TransportMode::Flight => "Avión",
            TransportMode::Train => "Tren",
            TransportMode::Bus => "Autobús",
            TransportMode::Car => "Coche",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum FlightEntryMode {
    #[default]
    Autofill,
    Manual,
}

impl Choice for FlightEntryMode {
    fn label(&self) -> &'static str {
        match self {
            FlightEntryMode::Autofill => "Autocompletar",
            FlightEntryMode::Manual => "Manual",
        }
    }
}
