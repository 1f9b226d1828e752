use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use super::{BudgetCategoryType, Choice};

/// Broad family a plan item type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemGroup {
    Logistics,
    Culture,
    Leisure,
    Nature,
    Food,
    Shopping,
    Generic,
}

/// Every kind of plan item the backend stores.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TripPlanItemType {
    Flight,
    Accommodation,
    TransportDestination,
    TransportLocal,
    Museum,
    Monument,
    Viewpoint,
    GuidedTour,
    Show,
    Beach,
    Park,
    Hike,
    Excursion,
    Restaurant,
    Cafe,
    Shopping,
    Activity,
    Expense,
}

impl TripPlanItemType {
    pub fn group(&self) -> ItemGroup {
        use TripPlanItemType::*;
        match self {
            Flight | Accommodation | TransportDestination | TransportLocal => ItemGroup::Logistics,
            Museum | Monument | Viewpoint | GuidedTour => ItemGroup::Culture,
            Show | Beach => ItemGroup::Leisure,
            Park | Hike | Excursion => ItemGroup::Nature,
            Restaurant | Cafe => ItemGroup::Food,
            Shopping => ItemGroup::Shopping,
            Activity | Expense => ItemGroup::Generic,
        }
    }

    /// Types selectable in the activity form.
    pub fn is_activity_subtype(&self) -> bool {
        self.group() != ItemGroup::Logistics && *self != TripPlanItemType::Expense
    }

    pub fn activity_subtypes() -> impl Iterator<Item = TripPlanItemType> {
        TripPlanItemType::iter().filter(|t| t.is_activity_subtype())
    }

    /// Step through activity subtypes only, wrapping around.
    pub fn cycled_activity(self, forward: bool) -> Self {
        let all: Vec<Self> = Self::activity_subtypes().collect();
        let idx = all.iter().position(|v| *v == self).unwrap_or(0);
        let len = all.len();
        if forward {
            all[(idx + 1) % len]
        } else {
            all[(idx + len - 1) % len]
        }
    }

    /// Budget bucket an item of this type is counted in when it carries no
    /// explicit budget category.
    pub fn default_budget_category(&self) -> BudgetCategoryType {
        match self.group() {
            ItemGroup::Logistics => match self {
                TripPlanItemType::Accommodation => BudgetCategoryType::Accommodation,
                TripPlanItemType::TransportLocal => BudgetCategoryType::TransportLocal,
                _ => BudgetCategoryType::TransportMain,
            },
            ItemGroup::Food => BudgetCategoryType::Food,
            ItemGroup::Shopping => BudgetCategoryType::Shopping,
            ItemGroup::Leisure => BudgetCategoryType::Leisure,
            ItemGroup::Culture | ItemGroup::Nature => BudgetCategoryType::Activities,
            ItemGroup::Generic => match self {
                TripPlanItemType::Activity => BudgetCategoryType::Activities,
                _ => BudgetCategoryType::Other,
            },
        }
    }
}

impl Choice for TripPlanItemType {
    fn label(&self) -> &'static str {
        use TripPlanItemType::*;
        match self {
            Flight => "Vuelo",
            Accommodation => "Alojamiento",
            TransportDestination => "Transporte entre destinos",
            TransportLocal => "Transporte local",
            Museum => "Museo",
            Monument => "Monumento",
            Viewpoint => "Mirador",
            GuidedTour => "Visita guiada",
            Show => "Espectáculo",
            Beach => "Playa",
            Park => "Parque",
            Hike => "Senderismo",
            Excursion => "Excursión",
            Restaurant => "Restaurante",
            Cafe => "Café",
            Shopping => "Compras",
            Activity => "Actividad",
            Expense => "Gasto",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&TripPlanItemType::TransportLocal).unwrap();
        assert_eq!(json, "\"transport_local\"");
        assert_eq!(TripPlanItemType::GuidedTour.to_string(), "guided_tour");
        assert_eq!(TripPlanItemType::iter().count(), 18);
    }

    #[test]
    fn activity_subtypes_exclude_logistics_and_expense() {
        let subtypes: Vec<_> = TripPlanItemType::activity_subtypes().collect();
        assert!(subtypes.contains(&TripPlanItemType::Activity));
        assert!(subtypes.contains(&TripPlanItemType::Museum));
        assert!(!subtypes.contains(&TripPlanItemType::Flight));
        assert!(!subtypes.contains(&TripPlanItemType::Expense));
        assert_eq!(subtypes.len(), 13);
    }

    #[test]
    fn cycled_activity_skips_logistics() {
        assert_eq!(
            TripPlanItemType::Activity.cycled_activity(true),
            TripPlanItemType::Museum
        );
        assert_eq!(
            TripPlanItemType::Museum.cycled_activity(false),
            TripPlanItemType::Activity
        );
    }
}
