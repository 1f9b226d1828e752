use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::Choice;

/// Bucket used by the budget panel to aggregate costs.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BudgetCategoryType {
    Accommodation,
    TransportMain,
    TransportLocal,
    Food,
    Activities,
    Leisure,
    Shopping,
    #[default]
    Other,
}

impl Choice for BudgetCategoryType {
    fn label(&self) -> &'static str {
        match self {
            BudgetCategoryType::Accommodation => "Alojamiento",
            BudgetCategoryType::TransportMain => "Transporte principal",
            BudgetCategoryType::TransportLocal => "Transporte local",
            BudgetCategoryType::Food => "Comida",
            BudgetCategoryType::Activities => "Actividades",
            BudgetCategoryType::Leisure => "Ocio",
            BudgetCategoryType::Shopping => "Compras",
            BudgetCategoryType::Other => "Otros",
        }
    }
}
