//! The plan item editor's state machine.
//!
//! One [`PlanItemForm`] backs the add/edit modal. It owns the draft of the
//! active tab, parks the drafts of the other tabs so switching back keeps
//! in-progress input, and walks a submission through
//! `Idle -> Saving -> {Success, Error}`.

use thiserror::Error;
use time::{Date, OffsetDateTime, Time, UtcOffset};
use tracing::{debug, warn};

use crate::client::PlanItemsApi;
use crate::domain::{FlightEntryMode, ItemCategory, PlanItem, TransportKind, TransportMode};
use crate::draft::{PlanItemDraft, ValidationError};
use crate::error::ApiError;
use crate::payload::Submission;

/// Time of day pre-filled on the preset date.
pub const PRESET_TIME: Time = time::macros::time!(09:00);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitBlocked {
    #[error("a save is already in progress")]
    Saving,
    #[error("the editor is closed")]
    Closed,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// A submission that left the form and is waiting for the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
    pub session: u64,
    pub category: ItemCategory,
    pub submission: Submission,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// A new item exists; the form closed and the trip should be refetched.
    Created,
    /// An existing item was changed; same follow-up as `Created`.
    Updated,
    /// The backend refused; the draft is kept for a retry.
    Failed(String),
    /// The form was closed or reopened while the request was in flight.
    Stale,
}

#[derive(Debug, Clone)]
pub struct PlanItemForm {
    visible: bool,
    draft: PlanItemDraft,
    parked: Vec<PlanItemDraft>,
    preset: Option<Date>,
    seed: Option<OffsetDateTime>,
    editing: Option<String>,
    saving: bool,
    error: Option<String>,
    session: u64,
}

impl Default for PlanItemForm {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanItemForm {
    pub fn new() -> Self {
        Self {
            visible: false,
            draft: PlanItemDraft::new(ItemCategory::default()),
            parked: Vec::new(),
            preset: None,
            seed: None,
            editing: None,
            saving: false,
            error: None,
            session: 0,
        }
    }

    /// Show the form for a new item with every draft at its defaults.
    /// `preset` is the day the user was looking at, if any.
    pub fn open(&mut self, preset: Option<Date>, offset: UtcOffset) {
        self.reset();
        self.visible = true;
        self.preset = preset;
        self.seed = preset.map(|day| day.with_time(PRESET_TIME).assume_offset(offset));
    }

    /// Show the form seeded from an existing item; saving updates it.
    pub fn open_for_edit(&mut self, item: &PlanItem, offset: UtcOffset) {
        self.reset();
        self.visible = true;
        self.draft = PlanItemDraft::from_item(item, offset);
        self.preset = item.day_date(offset);
        self.editing = Some(item.id.clone());
    }

    /// Hide the form and drop every draft. An in-flight request is not
    /// cancelled; its result will be reported as stale.
    pub fn close(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.visible = false;
        self.draft = PlanItemDraft::new(ItemCategory::default());
        self.parked.clear();
        self.preset = None;
        self.seed = None;
        self.editing = None;
        self.saving = false;
        self.error = None;
        self.session += 1;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn preset(&self) -> Option<Date> {
        self.preset
    }

    /// Departure pre-fill derived from the preset day.
    pub fn seed(&self) -> Option<OffsetDateTime> {
        self.seed
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn category(&self) -> ItemCategory {
        self.draft.category()
    }

    pub fn draft(&self) -> &PlanItemDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut PlanItemDraft {
        &mut self.draft
    }

    /// Switch tab. The outgoing draft is parked (a transport draft loses its
    /// mode selection); the incoming one is restored or created blank.
    /// Editing an existing item keeps its tab fixed.
    pub fn select_category(&mut self, category: ItemCategory) {
        if self.is_editing() || self.category() == category {
            return;
        }
        let restored = match self.parked.iter().position(|d| d.category() == category) {
            Some(idx) => self.parked.swap_remove(idx),
            None => PlanItemDraft::new(category),
        };
        let mut outgoing = std::mem::replace(&mut self.draft, restored);
        if let PlanItemDraft::Transport(transport) = &mut outgoing {
            transport.clear_mode();
        }
        self.parked.push(outgoing);
        self.error = None;
    }

    pub fn set_transport_kind(&mut self, kind: TransportKind) {
        if let PlanItemDraft::Transport(transport) = &mut self.draft {
            transport.set_kind(kind);
        }
    }

    pub fn set_principal_mode(&mut self, mode: Option<TransportMode>) {
        let seed = self.seed;
        if let PlanItemDraft::Transport(transport) = &mut self.draft {
            transport.set_mode(mode, seed);
        }
    }

    /// Autofill creates a new item server-side, so it is unavailable while
    /// editing.
    pub fn set_flight_entry_mode(&mut self, entry_mode: FlightEntryMode) {
        if self.is_editing() && entry_mode == FlightEntryMode::Autofill {
            return;
        }
        let seed = self.seed;
        if let PlanItemDraft::Transport(transport) = &mut self.draft {
            transport.set_flight_entry_mode(entry_mode, seed);
        }
    }

    pub fn is_valid(&self) -> bool {
        self.draft.is_valid()
    }

    pub fn can_submit(&self) -> bool {
        self.visible && !self.saving && self.is_valid()
    }

    /// Idle -> Saving. Validation failures land in the error slot and no
    /// request is produced.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, SubmitBlocked> {
        if !self.visible {
            return Err(SubmitBlocked::Closed);
        }
        if self.saving {
            return Err(SubmitBlocked::Saving);
        }
        let payload = match self.draft.build_payload(self.preset) {
            Ok(payload) => payload,
            Err(err) => {
                self.error = Some(err.to_string());
                return Err(err.into());
            }
        };
        self.saving = true;
        self.error = None;
        Ok(PendingSubmission {
            session: self.session,
            category: self.category(),
            submission: Submission::new(payload, self.editing.as_deref()),
        })
    }

    /// Saving -> Success | Error.
    pub fn finish_submit(&mut self, session: u64, result: Result<(), ApiError>) -> SubmitOutcome {
        if !self.visible || !self.saving || session != self.session {
            debug!(session, current = self.session, "ignoring stale submission result");
            return SubmitOutcome::Stale;
        }
        match result {
            Ok(()) => {
                debug!(category = %self.category(), "plan item saved");
                let outcome = if self.is_editing() {
                    SubmitOutcome::Updated
                } else {
                    SubmitOutcome::Created
                };
                self.close();
                outcome
            }
            Err(err) => {
                warn!(category = %self.category(), error = %err, "plan item save failed");
                let message = err
                    .backend_message()
                    .unwrap_or_else(|| self.category().save_failed_message())
                    .to_string();
                self.saving = false;
                self.error = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Validate, send and settle in one go.
    pub async fn submit(
        &mut self,
        api: &dyn PlanItemsApi,
        trip_id: &str,
    ) -> Result<SubmitOutcome, SubmitBlocked> {
        let pending = self.begin_submit()?;
        let result = api.submit(trip_id, &pending.submission).await;
        Ok(self.finish_submit(pending.session, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{
        AccommodationDraft, ExpenseDraft, FlightDraft, PrincipalMode, TransportLeg,
    };
    use crate::payload::{CreatePlanItemRequest, FlightAutofillRequest};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use time::macros::{date, datetime, offset};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Create(CreatePlanItemRequest),
        Autofill(FlightAutofillRequest),
        Update(String, CreatePlanItemRequest),
    }

    #[derive(Default)]
    struct MockApi {
        calls: Arc<Mutex<Vec<Call>>>,
        fail_with: Option<Option<String>>,
    }

    impl MockApi {
        fn failing(message: Option<&str>) -> Self {
            Self {
                fail_with: Some(message.map(str::to_string)),
                ..Self::default()
            }
        }

        fn record(&self, call: Call) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push(call);
            match &self.fail_with {
                Some(message) => Err(ApiError::Backend {
                    call: "mock".to_string(),
                    status: 500,
                    message: message.clone(),
                }),
                None => Ok(()),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PlanItemsApi for MockApi {
        async fn list_plan_items(&self, _trip_id: &str) -> Result<Vec<PlanItem>, ApiError> {
            Ok(vec![])
        }

        async fn create_plan_item(
            &self,
            _trip_id: &str,
            body: &CreatePlanItemRequest,
        ) -> Result<(), ApiError> {
            self.record(Call::Create(body.clone()))
        }

        async fn autofill_flight(
            &self,
            _trip_id: &str,
            body: &FlightAutofillRequest,
        ) -> Result<(), ApiError> {
            self.record(Call::Autofill(body.clone()))
        }

        async fn update_plan_item(
            &self,
            _trip_id: &str,
            item_id: &str,
            body: &CreatePlanItemRequest,
        ) -> Result<(), ApiError> {
            self.record(Call::Update(item_id.to_string(), body.clone()))
        }
    }

    fn open_form() -> PlanItemForm {
        let mut form = PlanItemForm::new();
        form.open(None, offset!(UTC));
        form
    }

    fn fill_expense(form: &mut PlanItemForm, amount: &str) {
        form.select_category(ItemCategory::Expense);
        if let PlanItemDraft::Expense(expense) = form.draft_mut() {
            expense.title = "Dinner".to_string();
            expense.amount = amount.to_string();
        }
    }

    #[test]
    fn reopening_resets_every_draft() {
        let mut form = open_form();
        fill_expense(&mut form, "20");
        form.select_category(ItemCategory::Transport);
        form.set_principal_mode(Some(TransportMode::Car));
        form.close();

        form.open(None, offset!(UTC));
        assert_eq!(form.category(), ItemCategory::Activity);
        assert_eq!(form.draft(), &PlanItemDraft::new(ItemCategory::Activity));
        assert_eq!(form.error(), None);
        assert!(!form.is_saving());

        form.select_category(ItemCategory::Expense);
        assert_eq!(form.draft(), &PlanItemDraft::Expense(ExpenseDraft::default()));
        form.select_category(ItemCategory::Transport);
        assert_eq!(form.draft(), &PlanItemDraft::new(ItemCategory::Transport));
    }

    #[test]
    fn switching_tabs_keeps_input_but_clears_transport_mode() {
        let mut form = open_form();
        fill_expense(&mut form, "20");
        form.select_category(ItemCategory::Transport);
        form.set_principal_mode(Some(TransportMode::Train));

        form.select_category(ItemCategory::Expense);
        let PlanItemDraft::Expense(expense) = form.draft() else {
            panic!("expected expense draft");
        };
        assert_eq!(expense.title, "Dinner");

        form.select_category(ItemCategory::Transport);
        let PlanItemDraft::Transport(transport) = form.draft() else {
            panic!("expected transport draft");
        };
        assert_eq!(transport.kind(), TransportKind::Principal);
        assert_eq!(transport.mode(), None);
    }

    #[test]
    fn preset_seeds_departure_and_flight_date_at_nine() {
        let mut form = PlanItemForm::new();
        form.open(Some(date!(2025 - 08 - 01)), offset!(+2));
        assert_eq!(form.seed(), Some(datetime!(2025-08-01 09:00 +02:00)));

        form.select_category(ItemCategory::Transport);
        form.set_principal_mode(Some(TransportMode::Flight));
        let PlanItemDraft::Transport(transport) = form.draft() else {
            panic!("expected transport draft");
        };
        assert_eq!(
            transport.leg,
            TransportLeg::Principal(Some(PrincipalMode::Flight(FlightDraft::Autofill {
                flight_number: String::new(),
                date: Some(date!(2025 - 08 - 01)),
            })))
        );
    }

    #[test]
    fn accommodation_validity_follows_date_order() {
        let mut form = open_form();
        form.select_category(ItemCategory::Accommodation);
        *form.draft_mut() = PlanItemDraft::Accommodation(AccommodationDraft {
            name: "Hotel".to_string(),
            check_in_at: Some(datetime!(2025-06-10 14:00 UTC)),
            check_out_at: Some(datetime!(2025-06-09 10:00 UTC)),
            ..AccommodationDraft::default()
        });
        assert!(!form.can_submit());

        if let PlanItemDraft::Accommodation(stay) = form.draft_mut() {
            std::mem::swap(&mut stay.check_in_at, &mut stay.check_out_at);
        }
        assert!(form.can_submit());
    }

    #[test]
    fn expense_needs_amount() {
        let mut form = open_form();
        fill_expense(&mut form, "");
        assert!(!form.can_submit());
        fill_expense(&mut form, "20");
        assert!(form.can_submit());
    }

    #[tokio::test]
    async fn flight_autofill_hits_only_the_autofill_endpoint() {
        let api = MockApi::default();
        let mut form = open_form();
        form.select_category(ItemCategory::Transport);
        form.set_principal_mode(Some(TransportMode::Flight));
        if let PlanItemDraft::Transport(transport) = form.draft_mut() {
            transport.leg =
                TransportLeg::Principal(Some(PrincipalMode::Flight(FlightDraft::Autofill {
                    flight_number: "IB1234".to_string(),
                    date: Some(date!(2025 - 07 - 01)),
                })));
        }

        let outcome = form.submit(&api, "trip-1").await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Created);
        assert_eq!(
            api.calls(),
            vec![Call::Autofill(FlightAutofillRequest {
                flight_number: "IB1234".to_string(),
                date: "2025-07-01".to_string(),
                cost: None,
                currency: "EUR".to_string(),
            })]
        );
        let body = serde_json::to_value(FlightAutofillRequest {
            flight_number: "IB1234".to_string(),
            date: "2025-07-01".to_string(),
            cost: None,
            currency: "EUR".to_string(),
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "flightNumber": "IB1234",
                "date": "2025-07-01",
                "cost": null,
                "currency": "EUR"
            })
        );
        assert!(!form.is_visible());
    }

    #[tokio::test]
    async fn day_falls_back_to_preset() {
        let api = MockApi::default();
        let mut form = PlanItemForm::new();
        form.open(Some(date!(2025 - 08 - 01)), offset!(UTC));
        if let PlanItemDraft::Activity(activity) = form.draft_mut() {
            activity.title = "Paseo por el Retiro".to_string();
        }

        form.submit(&api, "trip-1").await.unwrap();
        let calls = api.calls();
        let [Call::Create(body)] = calls.as_slice() else {
            panic!("expected one create call, got {calls:?}");
        };
        assert_eq!(body.day.as_deref(), Some("2025-08-01T00:00:00.000Z"));
        let json = serde_json::to_value(body).unwrap();
        assert_eq!(json["day"], "2025-08-01T00:00:00.000Z");
    }

    #[tokio::test]
    async fn network_failure_preserves_draft_and_sets_error() {
        let api = MockApi::failing(None);
        let mut form = open_form();
        fill_expense(&mut form, "20");
        let before = form.draft().clone();

        let outcome = form.submit(&api, "trip-1").await.unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Failed("No se pudo guardar el gasto.".to_string())
        );
        assert_eq!(form.draft(), &before);
        assert_eq!(form.error(), Some("No se pudo guardar el gasto."));
        assert!(!form.is_saving());
        assert!(form.is_visible());
    }

    #[tokio::test]
    async fn backend_message_wins_over_fallback() {
        let api = MockApi::failing(Some("Moneda no soportada"));
        let mut form = open_form();
        fill_expense(&mut form, "20");
        form.submit(&api, "trip-1").await.unwrap();
        assert_eq!(form.error(), Some("Moneda no soportada"));
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_network() {
        let api = MockApi::default();
        let mut form = open_form();
        let result = form.submit(&api, "trip-1").await;
        assert!(matches!(result, Err(SubmitBlocked::Invalid(_))));
        assert!(api.calls().is_empty());
        assert_eq!(form.error(), Some("Completa el campo obligatorio: Título."));
    }

    #[test]
    fn second_submit_is_blocked_while_saving() {
        let mut form = open_form();
        fill_expense(&mut form, "20");
        let pending = form.begin_submit().unwrap();
        assert!(form.is_saving());
        assert!(!form.can_submit());
        assert_eq!(form.begin_submit(), Err(SubmitBlocked::Saving));

        assert_eq!(
            form.finish_submit(pending.session, Ok(())),
            SubmitOutcome::Created
        );
    }

    #[test]
    fn results_after_close_are_stale() {
        let mut form = open_form();
        fill_expense(&mut form, "20");
        let pending = form.begin_submit().unwrap();
        form.close();
        form.open(None, offset!(UTC));
        assert_eq!(
            form.finish_submit(pending.session, Ok(())),
            SubmitOutcome::Stale
        );
        assert!(form.is_visible());
    }

    #[tokio::test]
    async fn editing_sends_an_update() {
        let api = MockApi::default();
        let item: PlanItem = serde_json::from_str(
            r#"{"id": "pi_9", "type": "expense", "title": "Museo", "cost": 12.5,
                "currency": "EUR", "budgetCategory": "activities",
                "startAt": "2025-08-02T10:00:00.000Z"}"#,
        )
        .unwrap();
        let mut form = PlanItemForm::new();
        form.open_for_edit(&item, offset!(UTC));
        assert_eq!(form.category(), ItemCategory::Expense);
        form.select_category(ItemCategory::Activity);
        assert_eq!(form.category(), ItemCategory::Expense);

        let outcome = form.submit(&api, "trip-1").await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Updated);
        let calls = api.calls();
        let [Call::Update(item_id, body)] = calls.as_slice() else {
            panic!("expected one update call, got {calls:?}");
        };
        assert_eq!(item_id, "pi_9");
        assert_eq!(body.cost, Some(12.5));
        assert_eq!(body.day.as_deref(), Some("2025-08-02T00:00:00.000Z"));
    }

    #[test]
    fn editing_a_flight_keeps_its_provider() {
        let item: PlanItem = serde_json::from_str(
            r#"{"id": "pi_4", "type": "flight", "title": "TP1351", "logistics": true,
                "startAt": "2025-07-05T18:10:00.000Z", "endAt": "2025-07-05T19:05:00.000Z",
                "flightDetails": {"provider": "aviationstack", "flightNumber": "TP1351",
                                  "airline": "TAP", "from": "OPO", "to": "LIS"}}"#,
        )
        .unwrap();
        let mut form = PlanItemForm::new();
        form.open_for_edit(&item, offset!(UTC));

        let pending = form.begin_submit().unwrap();
        let Submission::Update { item_id, body } = pending.submission else {
            panic!("expected an update");
        };
        assert_eq!(item_id, "pi_4");
        let details = body.flight_details.unwrap();
        assert_eq!(details.provider, "aviationstack");
        assert_eq!(details.duration_minutes, Some(55));
    }

    #[test]
    fn new_manual_flight_is_marked_manual() {
        let mut form = PlanItemForm::new();
        form.open(None, offset!(UTC));
        form.select_category(ItemCategory::Transport);
        form.set_principal_mode(Some(TransportMode::Flight));
        form.set_flight_entry_mode(FlightEntryMode::Manual);
        if let PlanItemDraft::Transport(transport) = form.draft_mut() {
            if let TransportLeg::Principal(Some(PrincipalMode::Flight(FlightDraft::Manual {
                flight_number,
                departure_at,
                arrival_at,
                ..
            }))) = &mut transport.leg
            {
                *flight_number = "tp1351".to_string();
                *departure_at = Some(datetime!(2025-07-05 18:10 UTC));
                *arrival_at = Some(datetime!(2025-07-05 19:05 UTC));
            }
        }

        let pending = form.begin_submit().unwrap();
        let Submission::Create(body) = pending.submission else {
            panic!("expected a create");
        };
        assert_eq!(body.flight_details.unwrap().provider, "manual");
    }
}
