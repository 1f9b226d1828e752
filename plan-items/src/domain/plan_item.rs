use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime, UtcOffset};

use super::{BudgetCategoryType, ItemCategory, TripPlanItemType};
use crate::normalize::{iso_millis, DEFAULT_CURRENCY};
use crate::payload::{
    AccommodationDetails, CreatePlanItemRequest, DestinationTransportDetails, FlightDetails,
};

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// A stored plan item as returned by `GET /trips/{id}/plan-items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanItem {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: TripPlanItemType,
    pub title: String,
    #[serde(default, with = "iso_millis::option")]
    pub day: Option<OffsetDateTime>,
    #[serde(default, with = "iso_millis::option")]
    pub start_at: Option<OffsetDateTime>,
    #[serde(default, with = "iso_millis::option")]
    pub end_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub logistics: bool,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub budget_category: Option<BudgetCategoryType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_details: Option<FlightDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_transport_details: Option<DestinationTransportDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accommodation_details: Option<AccommodationDetails>,
}

impl PlanItem {
    /// Materialize a stored item from a create body, the way the backend does.
    pub fn from_request(id: impl Into<String>, request: CreatePlanItemRequest) -> Self {
        let day = request
            .day
            .as_deref()
            .and_then(|raw| OffsetDateTime::parse(raw, &Rfc3339).ok());
        Self {
            id: id.into(),
            item_type: request.item_type,
            title: request.title,
            day,
            start_at: request.start_at,
            end_at: request.end_at,
            location: request.location,
            notes: request.notes,
            logistics: request.logistics,
            cost: request.cost,
            currency: request.currency,
            budget_category: request.budget_category,
            flight_details: request.flight_details,
            destination_transport_details: request.destination_transport_details,
            accommodation_details: request.accommodation_details,
        }
    }

    /// Calendar day the item is planned on. The stored day key is UTC
    /// midnight; without one, the start's date at `offset` is used, the same
    /// rule that derives the day key when the item is saved.
    pub fn day_date(&self, offset: UtcOffset) -> Option<Date> {
        match (self.day, self.start_at) {
            (Some(day), _) => Some(day.to_offset(UtcOffset::UTC).date()),
            (None, Some(start)) => Some(start.to_offset(offset).date()),
            (None, None) => None,
        }
    }

    pub fn effective_budget_category(&self) -> BudgetCategoryType {
        self.budget_category
            .unwrap_or_else(|| self.item_type.default_budget_category())
    }

    /// Editor tab that owns items of this type.
    pub fn category(&self) -> ItemCategory {
        match self.item_type {
            TripPlanItemType::Flight
            | TripPlanItemType::TransportDestination
            | TripPlanItemType::TransportLocal => ItemCategory::Transport,
            TripPlanItemType::Accommodation => ItemCategory::Accommodation,
            TripPlanItemType::Expense => ItemCategory::Expense,
            _ => ItemCategory::Activity,
        }
    }
}
