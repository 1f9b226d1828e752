use time::{Date, OffsetDateTime, UtcOffset};

use super::labels::*;
use super::{
    amount_input, check_amount, check_currency, check_range, derive_day, require_text,
    ValidationError,
};
use crate::domain::{PlanItem, TripPlanItemType};
use crate::normalize::{normalize_currency, optional_text, DEFAULT_CURRENCY};
use crate::payload::CreatePlanItemRequest;

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityDraft {
    /// One of [`TripPlanItemType::activity_subtypes`].
    pub kind: TripPlanItemType,
    pub title: String,
    pub location: String,
    pub start_at: Option<OffsetDateTime>,
    pub end_at: Option<OffsetDateTime>,
    pub notes: String,
    pub cost: String,
    pub currency: String,
}

impl Default for ActivityDraft {
    fn default() -> Self {
        Self {
            kind: TripPlanItemType::Activity,
            title: String::new(),
            location: String::new(),
            start_at: None,
            end_at: None,
            notes: String::new(),
            cost: String::new(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl ActivityDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.title, TITLE)?;
        check_range(self.start_at, self.end_at)?;
        check_amount(&self.cost, COST)?;
        check_currency(&self.currency)?;
        Ok(())
    }

    pub(crate) fn build(&self, preset: Option<Date>) -> Result<CreatePlanItemRequest, ValidationError> {
        Ok(CreatePlanItemRequest {
            item_type: self.kind,
            title: self.title.trim().to_string(),
            day: derive_day(self.start_at, preset),
            start_at: self.start_at,
            end_at: self.end_at,
            location: optional_text(&self.location),
            notes: optional_text(&self.notes),
            logistics: false,
            cost: check_amount(&self.cost, COST)?,
            currency: normalize_currency(&self.currency),
            budget_category: None,
            flight_details: None,
            destination_transport_details: None,
            accommodation_details: None,
        })
    }

    pub(crate) fn from_item(item: &PlanItem, offset: UtcOffset) -> Self {
        Self {
            kind: if item.item_type.is_activity_subtype() {
                item.item_type
            } else {
                TripPlanItemType::Activity
            },
            title: item.title.clone(),
            location: item.location.clone().unwrap_or_default(),
            start_at: item.start_at.map(|dt| dt.to_offset(offset)),
            end_at: item.end_at.map(|dt| dt.to_offset(offset)),
            notes: item.notes.clone().unwrap_or_default(),
            cost: amount_input(item.cost),
            currency: item.currency.clone(),
        }
    }
}
