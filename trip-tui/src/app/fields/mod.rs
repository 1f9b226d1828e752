//! Per-category field groups for the plan item editor.
//!
//! Every group describes itself as rows of [`FieldSpec`]s, so the modal
//! renders, focuses and edits all four categories through the same
//! primitives. Groups never validate; validity comes from the form.

mod accommodation;
mod activity;
mod expense;
mod transport;

use plan_items::domain::Choice;
use plan_items::draft::labels;
use plan_items::draft::PlanItemDraft;
use plan_items::form::PlanItemForm;
use plan_items::normalize::{format_local_datetime, iso_date, parse_date, parse_local_datetime};
use time::{Date, OffsetDateTime, UtcOffset};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Kind,
    Mode,
    EntryMode,
    Title,
    Name,
    Location,
    Notes,
    Start,
    End,
    Cost,
    Currency,
    FlightNumber,
    FlightDate,
    Airline,
    Company,
    From,
    To,
    Departure,
    Arrival,
    BookingRef,
    Address,
    City,
    Country,
    CheckIn,
    CheckOut,
    Guests,
    Rooms,
    Phone,
    Website,
    RoomType,
    BathroomType,
    ActivityType,
    Amount,
    BudgetCategory,
    OccurredAt,
}

/// One editable control.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSpec {
    Field {
        id: FieldId,
        label: &'static str,
        value: String,
        required: bool,
    },
    DateField {
        id: FieldId,
        label: &'static str,
        value: Option<Date>,
        required: bool,
    },
    DateTimeField {
        id: FieldId,
        label: &'static str,
        value: Option<OffsetDateTime>,
        required: bool,
    },
    Choice {
        id: FieldId,
        label: &'static str,
        value: Option<&'static str>,
    },
}

impl FieldSpec {
    pub fn text(id: FieldId, label: &'static str, value: &str) -> Self {
        FieldSpec::Field {
            id,
            label,
            value: value.to_string(),
            required: false,
        }
    }

    pub fn required_text(id: FieldId, label: &'static str, value: &str) -> Self {
        FieldSpec::Field {
            id,
            label,
            value: value.to_string(),
            required: true,
        }
    }

    pub fn date(id: FieldId, label: &'static str, value: Option<Date>, required: bool) -> Self {
        FieldSpec::DateField {
            id,
            label,
            value,
            required,
        }
    }

    pub fn datetime(
        id: FieldId,
        label: &'static str,
        value: Option<OffsetDateTime>,
        required: bool,
    ) -> Self {
        FieldSpec::DateTimeField {
            id,
            label,
            value,
            required,
        }
    }

    pub fn choice<C: Choice>(id: FieldId, label: &'static str, value: Option<C>) -> Self {
        FieldSpec::Choice {
            id,
            label,
            value: value.map(|v| v.label()),
        }
    }

    pub fn id(&self) -> FieldId {
        match self {
            FieldSpec::Field { id, .. }
            | FieldSpec::DateField { id, .. }
            | FieldSpec::DateTimeField { id, .. }
            | FieldSpec::Choice { id, .. } => *id,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FieldSpec::Field { label, .. }
            | FieldSpec::DateField { label, .. }
            | FieldSpec::DateTimeField { label, .. }
            | FieldSpec::Choice { label, .. } => label,
        }
    }

    pub fn is_required(&self) -> bool {
        match self {
            FieldSpec::Field { required, .. }
            | FieldSpec::DateField { required, .. }
            | FieldSpec::DateTimeField { required, .. } => *required,
            FieldSpec::Choice { .. } => false,
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self, FieldSpec::Choice { .. })
    }

    /// Input format hint for date fields.
    pub fn placeholder(&self) -> &'static str {
        match self {
            FieldSpec::DateField { .. } => "AAAA-MM-DD",
            FieldSpec::DateTimeField { .. } => "AAAA-MM-DD HH:MM",
            _ => "",
        }
    }

    /// Value as it appears in the edit buffer.
    pub fn display(&self) -> String {
        match self {
            FieldSpec::Field { value, .. } => value.clone(),
            FieldSpec::DateField { value, .. } => value.map(iso_date).unwrap_or_default(),
            FieldSpec::DateTimeField { value, .. } => {
                value.map(format_local_datetime).unwrap_or_default()
            }
            FieldSpec::Choice { value, .. } => value.unwrap_or("—").to_string(),
        }
    }

    /// Turn edit-buffer text into a value for this field. Unparseable dates
    /// become unset.
    pub fn parse(&self, raw: &str, offset: UtcOffset) -> FieldInput {
        match self {
            FieldSpec::DateField { .. } => FieldInput::Date(parse_date(raw)),
            FieldSpec::DateTimeField { .. } => {
                FieldInput::DateTime(parse_local_datetime(raw, offset))
            }
            FieldSpec::Field { .. } | FieldSpec::Choice { .. } => {
                FieldInput::Text(raw.to_string())
            }
        }
    }
}

/// Layout unit: one control, or two side by side.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRow {
    Single(FieldSpec),
    Row2(FieldSpec, FieldSpec),
}

impl FieldRow {
    pub fn fields(&self) -> Vec<&FieldSpec> {
        match self {
            FieldRow::Single(field) => vec![field],
            FieldRow::Row2(left, right) => vec![left, right],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    Text(String),
    Date(Option<Date>),
    DateTime(Option<OffsetDateTime>),
}

impl FieldInput {
    fn into_text(self) -> String {
        match self {
            FieldInput::Text(text) => text,
            _ => String::new(),
        }
    }

    fn into_date(self) -> Option<Date> {
        match self {
            FieldInput::Date(date) => date,
            _ => None,
        }
    }

    fn into_instant(self) -> Option<OffsetDateTime> {
        match self {
            FieldInput::DateTime(dt) => dt,
            _ => None,
        }
    }
}

/// The active category's rows plus the form's verdict on them.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldGroup {
    pub rows: Vec<FieldRow>,
    pub valid: bool,
}

impl FieldGroup {
    /// Focus order: row by row, left to right.
    pub fn flatten(&self) -> Vec<&FieldSpec> {
        self.rows.iter().flat_map(FieldRow::fields).collect()
    }
}

pub fn field_group(form: &PlanItemForm) -> FieldGroup {
    let rows = match form.draft() {
        PlanItemDraft::Transport(draft) => transport::rows(draft, form.is_editing()),
        PlanItemDraft::Accommodation(draft) => accommodation::rows(draft),
        PlanItemDraft::Activity(draft) => activity::rows(draft),
        PlanItemDraft::Expense(draft) => expense::rows(draft),
    };
    FieldGroup {
        rows,
        valid: form.is_valid(),
    }
}

/// Store an edited value into the active draft.
pub fn apply(form: &mut PlanItemForm, id: FieldId, input: FieldInput) {
    match form.draft_mut() {
        PlanItemDraft::Transport(draft) => transport::apply(draft, id, input),
        PlanItemDraft::Accommodation(draft) => accommodation::apply(draft, id, input),
        PlanItemDraft::Activity(draft) => activity::apply(draft, id, input),
        PlanItemDraft::Expense(draft) => expense::apply(draft, id, input),
    }
}

/// Step a choice field. Transport's kind and mode go through the form so the
/// sub-state stays consistent.
pub fn cycle(form: &mut PlanItemForm, id: FieldId, forward: bool) {
    if let PlanItemDraft::Transport(draft) = form.draft() {
        let (kind, mode, entry_mode) = (draft.kind(), draft.mode(), transport::entry_mode(draft));
        match id {
            FieldId::Kind => form.set_transport_kind(kind.cycled(forward)),
            FieldId::Mode => form.set_principal_mode(cycle_option(mode, forward)),
            FieldId::EntryMode => {
                if let Some(entry_mode) = entry_mode {
                    form.set_flight_entry_mode(entry_mode.cycled(forward));
                }
            }
            _ => {}
        }
        return;
    }
    match form.draft_mut() {
        PlanItemDraft::Accommodation(draft) => accommodation::cycle(draft, id, forward),
        PlanItemDraft::Activity(draft) => activity::cycle(draft, id, forward),
        PlanItemDraft::Expense(draft) => expense::cycle(draft, id, forward),
        PlanItemDraft::Transport(_) => {}
    }
}

/// Unset choices start at the first (or last) value.
fn cycle_option<C: Choice>(value: Option<C>, forward: bool) -> Option<C> {
    match value {
        Some(value) => Some(value.cycled(forward)),
        None if forward => C::iter().next(),
        None => C::iter().last(),
    }
}

fn cost_row(cost: &str, currency: &str) -> FieldRow {
    FieldRow::Row2(
        FieldSpec::text(FieldId::Cost, labels::COST, cost),
        FieldSpec::text(FieldId::Currency, labels::CURRENCY, currency),
    )
}
