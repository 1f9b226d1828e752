use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::Choice;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RoomType {
    Single,
    Double,
    Twin,
    Triple,
    Quadruple,
    Family,
    Suite,
    Dormitory,
}

impl Choice for RoomType {
    fn label(&self) -> &'static str {
        match self {
            RoomType::Single => "Individual",
            RoomType::Double => "Doble",
            RoomType::Twin => "Dos camas",
            RoomType::Triple => "Triple",
            RoomType::Quadruple => "Cuádruple",
            RoomType::Family => "Familiar",
            RoomType::Suite => "Suite",
            RoomType::Dormitory => "Dormitorio compartido",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BathroomType {
    Private,
    Shared,
}

impl Choice for BathroomType {
    fn label(&self) -> &'static str {
        match self {
            BathroomType::Private => "Privado",
            BathroomType::Shared => "Compartido",
        }
    }
}
