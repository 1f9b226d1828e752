//! Request bodies sent to the plan item endpoints.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::{BathroomType, BudgetCategoryType, RoomType, TransportMode, TripPlanItemType};
use crate::normalize::iso_millis;

pub const MANUAL_FLIGHT_PROVIDER: &str = "manual";

/// Body of `POST /trips/{id}/plan-items` (and of the update call).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanItemRequest {
    #[serde(rename = "type")]
    pub item_type: TripPlanItemType,
    pub title: String,
    /// Canonical day key, `YYYY-MM-DDT00:00:00.000Z`.
    pub day: Option<String>,
    #[serde(with = "iso_millis::option")]
    pub start_at: Option<OffsetDateTime>,
    #[serde(with = "iso_millis::option")]
    pub end_at: Option<OffsetDateTime>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub logistics: bool,
    pub cost: Option<f64>,
    pub currency: String,
    pub budget_category: Option<BudgetCategoryType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_details: Option<FlightDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_transport_details: Option<DestinationTransportDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accommodation_details: Option<AccommodationDetails>,
}

/// Body of `POST /trips/{id}/plan-items/flight/autofill`. The server resolves
/// the itinerary from the flight number and day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightAutofillRequest {
    pub flight_number: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub cost: Option<f64>,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDetails {
    pub provider: String,
    pub flight_number: String,
    #[serde(default)]
    pub airline: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationTransportDetails {
    pub mode: TransportMode,
    #[serde(default)]
    pub company: Option<String>,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub booking_ref: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationDetails {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, with = "iso_millis::option")]
    pub check_in_at: Option<OffsetDateTime>,
    #[serde(default, with = "iso_millis::option")]
    pub check_out_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub nights: Option<i64>,
    #[serde(default)]
    pub guests: Option<u32>,
    #[serde(default)]
    pub rooms: Option<u32>,
    #[serde(default)]
    pub booking_ref: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub room_type: Option<RoomType>,
    #[serde(default)]
    pub bathroom_type: Option<BathroomType>,
}

/// Normalized output of a valid draft.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanItemPayload {
    Create(CreatePlanItemRequest),
    FlightAutofill(FlightAutofillRequest),
}

/// A payload bound to the endpoint it is sent to.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(CreatePlanItemRequest),
    FlightAutofill(FlightAutofillRequest),
    Update {
        item_id: String,
        body: CreatePlanItemRequest,
    },
}

impl Submission {
    /// Creates go to their endpoint; when `editing` names an existing item the
    /// generic body becomes an update of that item.
    pub fn new(payload: PlanItemPayload, editing: Option<&str>) -> Self {
        match (payload, editing) {
            (PlanItemPayload::Create(body), Some(item_id)) => Submission::Update {
                item_id: item_id.to_string(),
                body,
            },
            (PlanItemPayload::Create(body), None) => Submission::Create(body),
            (PlanItemPayload::FlightAutofill(body), _) => Submission::FlightAutofill(body),
        }
    }

    pub fn path(&self, trip_id: &str) -> String {
        match self {
            Submission::Create(_) => plan_items_path(trip_id),
            Submission::FlightAutofill(_) => flight_autofill_path(trip_id),
            Submission::Update { item_id, .. } => plan_item_path(trip_id, item_id),
        }
    }
}

pub fn plan_items_path(trip_id: &str) -> String {
    format!("/trips/{}/plan-items", urlencoding::encode(trip_id))
}

pub fn flight_autofill_path(trip_id: &str) -> String {
    format!("{}/flight/autofill", plan_items_path(trip_id))
}

pub fn plan_item_path(trip_id: &str, item_id: &str) -> String {
    format!("{}/{}", plan_items_path(trip_id), urlencoding::encode(item_id))
}
