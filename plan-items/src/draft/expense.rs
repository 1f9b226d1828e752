use time::{Date, OffsetDateTime, UtcOffset};

use super::labels::*;
use super::{
    amount_input, check_amount, check_currency, derive_day, require_text, ValidationError,
};
use crate::domain::{BudgetCategoryType, PlanItem, TripPlanItemType};
use crate::normalize::{normalize_currency, optional_text, DEFAULT_CURRENCY};
use crate::payload::CreatePlanItemRequest;

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub title: String,
    pub amount: String,
    pub currency: String,
    pub category: BudgetCategoryType,
    pub occurred_at: Option<OffsetDateTime>,
    pub notes: String,
}

impl Default for ExpenseDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            amount: String::new(),
            currency: DEFAULT_CURRENCY.to_string(),
            category: BudgetCategoryType::default(),
            occurred_at: None,
            notes: String::new(),
        }
    }
}

impl ExpenseDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.title, TITLE)?;
        check_amount(&self.amount, AMOUNT)?.ok_or(ValidationError::MissingField(AMOUNT))?;
        require_text(&self.currency, CURRENCY)?;
        check_currency(&self.currency)?;
        Ok(())
    }

    pub(crate) fn build(&self, preset: Option<Date>) -> Result<CreatePlanItemRequest, ValidationError> {
        let amount =
            check_amount(&self.amount, AMOUNT)?.ok_or(ValidationError::MissingField(AMOUNT))?;
        Ok(CreatePlanItemRequest {
            item_type: TripPlanItemType::Expense,
            title: self.title.trim().to_string(),
            day: derive_day(self.occurred_at, preset),
            start_at: self.occurred_at,
            end_at: None,
            location: None,
            notes: optional_text(&self.notes),
            logistics: false,
            cost: Some(amount),
            currency: normalize_currency(&self.currency),
            budget_category: Some(self.category),
            flight_details: None,
            destination_transport_details: None,
            accommodation_details: None,
        })
    }

    pub(crate) fn from_item(item: &PlanItem, offset: UtcOffset) -> Self {
        Self {
            title: item.title.clone(),
            amount: amount_input(item.cost),
            currency: item.currency.clone(),
            category: item.budget_category.unwrap_or_default(),
            occurred_at: item.start_at.map(|dt| dt.to_offset(offset)),
            notes: item.notes.clone().unwrap_or_default(),
        }
    }
}
