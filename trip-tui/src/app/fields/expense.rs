use plan_items::domain::Choice;
use plan_items::draft::labels::*;
use plan_items::draft::ExpenseDraft;

use super::{FieldId, FieldInput, FieldRow, FieldSpec};

pub(super) fn rows(draft: &ExpenseDraft) -> Vec<FieldRow> {
    vec![
        FieldRow::Single(FieldSpec::required_text(FieldId::Title, TITLE, &draft.title)),
        FieldRow::Row2(
            FieldSpec::required_text(FieldId::Amount, AMOUNT, &draft.amount),
            FieldSpec::required_text(FieldId::Currency, CURRENCY, &draft.currency),
        ),
        FieldRow::Row2(
            FieldSpec::choice(FieldId::BudgetCategory, BUDGET_CATEGORY, Some(draft.category)),
            FieldSpec::datetime(FieldId::OccurredAt, OCCURRED_AT, draft.occurred_at, false),
        ),
        FieldRow::Single(FieldSpec::text(FieldId::Notes, NOTES, &draft.notes)),
    ]
}

pub(super) fn apply(draft: &mut ExpenseDraft, id: FieldId, input: FieldInput) {
    match id {
        FieldId::Title => draft.title = input.into_text(),
        FieldId::Amount => draft.amount = input.into_text(),
        FieldId::Currency => draft.currency = input.into_text(),
        FieldId::OccurredAt => draft.occurred_at = input.into_instant(),
        FieldId::Notes => draft.notes = input.into_text(),
        _ => {}
    }
}

pub(super) fn cycle(draft: &mut ExpenseDraft, id: FieldId, forward: bool) {
    if id == FieldId::BudgetCategory {
        draft.category = draft.category.cycled(forward);
    }
}
