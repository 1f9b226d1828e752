use plan_items::draft::labels::*;
use plan_items::draft::ActivityDraft;

use super::{cost_row, FieldId, FieldInput, FieldRow, FieldSpec};

pub(super) fn rows(draft: &ActivityDraft) -> Vec<FieldRow> {
    vec![
        FieldRow::Row2(
            FieldSpec::choice(FieldId::ActivityType, ACTIVITY_TYPE, Some(draft.kind)),
            FieldSpec::required_text(FieldId::Title, TITLE, &draft.title),
        ),
        FieldRow::Single(FieldSpec::text(FieldId::Location, LOCATION, &draft.location)),
        FieldRow::Row2(
            FieldSpec::datetime(FieldId::Start, START, draft.start_at, false),
            FieldSpec::datetime(FieldId::End, END, draft.end_at, false),
        ),
        FieldRow::Single(FieldSpec::text(FieldId::Notes, NOTES, &draft.notes)),
        cost_row(&draft.cost, &draft.currency),
    ]
}

pub(super) fn apply(draft: &mut ActivityDraft, id: FieldId, input: FieldInput) {
    match id {
        FieldId::Title => draft.title = input.into_text(),
        FieldId::Location => draft.location = input.into_text(),
        FieldId::Start => draft.start_at = input.into_instant(),
        FieldId::End => draft.end_at = input.into_instant(),
        FieldId::Notes => draft.notes = input.into_text(),
        FieldId::Cost => draft.cost = input.into_text(),
        FieldId::Currency => draft.currency = input.into_text(),
        _ => {}
    }
}

/// Only activity subtypes are offered.
pub(super) fn cycle(draft: &mut ActivityDraft, id: FieldId, forward: bool) {
    if id == FieldId::ActivityType {
        draft.kind = draft.kind.cycled_activity(forward);
    }
}
