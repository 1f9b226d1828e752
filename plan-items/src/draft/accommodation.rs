use time::{Date, OffsetDateTime, UtcOffset};

use super::labels::*;
use super::{
    amount_input, check_amount, check_count, check_currency, check_range, derive_day, require_text,
    ValidationError,
};
use crate::domain::{BathroomType, PlanItem, RoomType, TripPlanItemType};
use crate::normalize::{normalize_currency, optional_text, DEFAULT_CURRENCY};
use crate::payload::{AccommodationDetails, CreatePlanItemRequest};

#[derive(Debug, Clone, PartialEq)]
pub struct AccommodationDraft {
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub check_in_at: Option<OffsetDateTime>,
    pub check_out_at: Option<OffsetDateTime>,
    pub guests: String,
    pub rooms: String,
    pub booking_ref: String,
    pub phone: String,
    pub website: String,
    pub room_type: Option<RoomType>,
    pub bathroom_type: Option<BathroomType>,
    pub cost: String,
    pub currency: String,
}

impl Default for AccommodationDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            address: String::new(),
            city: String::new(),
            country: String::new(),
            check_in_at: None,
            check_out_at: None,
            guests: String::new(),
            rooms: String::new(),
            booking_ref: String::new(),
            phone: String::new(),
            website: String::new(),
            room_type: None,
            bathroom_type: None,
            cost: String::new(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl AccommodationDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.name, NAME)?;
        check_range(self.check_in_at, self.check_out_at)?;
        check_amount(&self.cost, COST)?;
        check_count(&self.guests, GUESTS)?;
        check_count(&self.rooms, ROOMS)?;
        check_currency(&self.currency)?;
        Ok(())
    }

    /// Nights between the check-in and check-out calendar days.
    pub fn nights(&self) -> Option<i64> {
        match (self.check_in_at, self.check_out_at) {
            (Some(check_in), Some(check_out)) => {
                Some((check_out.date() - check_in.date()).whole_days())
            }
            _ => None,
        }
    }

    pub(crate) fn build(&self, preset: Option<Date>) -> Result<CreatePlanItemRequest, ValidationError> {
        Ok(CreatePlanItemRequest {
            item_type: TripPlanItemType::Accommodation,
            title: self.name.trim().to_string(),
            day: derive_day(self.check_in_at, preset),
            start_at: self.check_in_at,
            end_at: self.check_out_at,
            location: optional_text(&self.address),
            notes: None,
            logistics: true,
            cost: check_amount(&self.cost, COST)?,
            currency: normalize_currency(&self.currency),
            budget_category: None,
            flight_details: None,
            destination_transport_details: None,
            accommodation_details: Some(AccommodationDetails {
                address: optional_text(&self.address),
                city: optional_text(&self.city),
                country: optional_text(&self.country).map(|c| c.to_uppercase()),
                check_in_at: self.check_in_at,
                check_out_at: self.check_out_at,
                nights: self.nights(),
                guests: check_count(&self.guests, GUESTS)?,
                rooms: check_count(&self.rooms, ROOMS)?,
                booking_ref: optional_text(&self.booking_ref),
                phone: optional_text(&self.phone),
                website: optional_text(&self.website),
                room_type: self.room_type,
                bathroom_type: self.bathroom_type,
            }),
        })
    }

    pub(crate) fn from_item(item: &PlanItem, offset: UtcOffset) -> Self {
        let details = item.accommodation_details.clone().unwrap_or_default();
        let local = |dt: Option<OffsetDateTime>| dt.map(|dt| dt.to_offset(offset));
        let count = |n: Option<u32>| n.map(|n| n.to_string()).unwrap_or_default();
        Self {
            name: item.title.clone(),
            address: details.address.unwrap_or_default(),
            city: details.city.unwrap_or_default(),
            country: details.country.unwrap_or_default(),
            check_in_at: local(details.check_in_at.or(item.start_at)),
            check_out_at: local(details.check_out_at.or(item.end_at)),
            guests: count(details.guests),
            rooms: count(details.rooms),
            booking_ref: details.booking_ref.unwrap_or_default(),
            phone: details.phone.unwrap_or_default(),
            website: details.website.unwrap_or_default(),
            room_type: details.room_type,
            bathroom_type: details.bathroom_type,
            cost: amount_input(item.cost),
            currency: item.currency.clone(),
        }
    }
}
