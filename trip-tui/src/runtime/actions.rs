use crate::api::{SharedApi, UNAUTH_RELOGIN};
use crate::app::App;
use anyhow::Result;
use plan_items::form::{SubmitBlocked, SubmitOutcome};
use plan_items::ApiError;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::action_queue::{Action, ActionTx};

pub(super) async fn run_action(
    action: Action,
    app: &mut App,
    api: &SharedApi,
    action_tx: &ActionTx,
) -> Result<()> {
    match action {
        Action::SubmitPlanItem => {
            spawn_submission(app, api, action_tx);
        }
        Action::SubmissionFinished { session, result } => {
            handle_submission_finished(app, api, session, result).await;
        }
        Action::RefreshPlanItems => {
            refresh_plan_items(app, api).await;
        }
    }
    Ok(())
}

/// The request runs on its own task so the UI keeps drawing; only the
/// submit control waits for it.
fn spawn_submission(app: &mut App, api: &SharedApi, action_tx: &ActionTx) {
    let pending = match app.form.begin_submit() {
        Ok(pending) => pending,
        Err(SubmitBlocked::Saving) => {
            app.set_status("Guardando, espera a que termine".to_string());
            return;
        }
        Err(SubmitBlocked::Invalid(err)) => {
            debug!(error = %err, "submission blocked by validation");
            return;
        }
        Err(SubmitBlocked::Closed) => return,
    };

    debug!(session = pending.session, category = %pending.category, "submitting plan item");
    let api = Arc::clone(api);
    let tx = action_tx.clone();
    let trip_id = app.trip_id.clone();
    tokio::spawn(async move {
        let result = api.submit(&trip_id, &pending.submission).await;
        let _ = tx.send(Action::SubmissionFinished {
            session: pending.session,
            result,
        });
    });
}

async fn handle_submission_finished(
    app: &mut App,
    api: &SharedApi,
    session: u64,
    result: Result<(), ApiError>,
) {
    let succeeded = result.is_ok();
    match app.form.finish_submit(session, result) {
        SubmitOutcome::Created => {
            app.modal = None;
            app.set_status("Elemento añadido al viaje".to_string());
            refresh_plan_items(app, api).await;
        }
        SubmitOutcome::Updated => {
            app.modal = None;
            app.set_status("Elemento actualizado".to_string());
            refresh_plan_items(app, api).await;
        }
        SubmitOutcome::Failed(message) => {
            debug!(%message, "plan item save failed");
        }
        SubmitOutcome::Stale if succeeded => {
            refresh_plan_items(app, api).await;
        }
        SubmitOutcome::Stale => {}
    }
}

async fn refresh_plan_items(app: &mut App, api: &SharedApi) {
    app.is_loading = true;
    match api.list_plan_items(&app.trip_id).await {
        Ok(items) => {
            info!(count = items.len(), "loaded plan items");
            app.set_items(items);
        }
        Err(ApiError::Unauthorized) => {
            app.set_status(UNAUTH_RELOGIN.to_string());
        }
        Err(e) => {
            warn!(error = %e, "could not load plan items");
            app.set_status(format!("No se pudieron cargar los elementos: {}", e));
        }
    }
    app.is_loading = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{DevBackend, DEV_TRIP_ID};
    use crate::config::TripConfig;
    use crate::runtime::action_queue::channel;
    use plan_items::domain::ItemCategory;
    use plan_items::draft::PlanItemDraft;
    use time::macros::offset;

    fn app_with_expense(title: &str) -> App {
        let mut app = App::new(DEV_TRIP_ID, &TripConfig::default(), offset!(UTC));
        app.open_create();
        app.form.select_category(ItemCategory::Expense);
        if let PlanItemDraft::Expense(expense) = app.form.draft_mut() {
            expense.title = title.to_string();
            expense.amount = "20".to_string();
        }
        app
    }

    #[tokio::test]
    async fn successful_submission_closes_and_refetches() {
        let api: SharedApi = Arc::new(DevBackend::empty());
        let (tx, mut rx) = channel();
        let mut app = app_with_expense("Cena");

        run_action(Action::SubmitPlanItem, &mut app, &api, &tx).await.unwrap();
        assert!(app.form.is_saving());
        assert!(!app.form.can_submit());

        let finished = rx.recv().await.unwrap();
        run_action(finished, &mut app, &api, &tx).await.unwrap();
        assert!(!app.is_modal_open());
        assert!(!app.form.is_visible());
        assert_eq!(app.items.len(), 1);
        assert_eq!(app.items[0].title, "Cena");
    }

    #[tokio::test]
    async fn rejected_submission_keeps_the_draft() {
        let api: SharedApi = Arc::new(DevBackend::empty());
        let (tx, mut rx) = channel();
        let mut app = app_with_expense("fail: cena");
        let before = app.form.draft().clone();

        run_action(Action::SubmitPlanItem, &mut app, &api, &tx).await.unwrap();
        let finished = rx.recv().await.unwrap();
        run_action(finished, &mut app, &api, &tx).await.unwrap();

        assert!(app.is_modal_open());
        assert_eq!(app.form.draft(), &before);
        assert!(!app.form.is_saving());
        assert_eq!(
            app.form.error(),
            Some("El servidor de pruebas rechazó el elemento")
        );
        assert!(app.items.is_empty());
    }

    #[tokio::test]
    async fn closing_mid_flight_still_refreshes() {
        let api: SharedApi = Arc::new(DevBackend::empty());
        let (tx, mut rx) = channel();
        let mut app = app_with_expense("Cena");

        run_action(Action::SubmitPlanItem, &mut app, &api, &tx).await.unwrap();
        app.close_modal();
        let finished = rx.recv().await.unwrap();
        run_action(finished, &mut app, &api, &tx).await.unwrap();

        assert!(!app.is_modal_open());
        assert_eq!(app.items.len(), 1);
    }

    #[tokio::test]
    async fn invalid_form_sends_nothing() {
        let api: SharedApi = Arc::new(DevBackend::empty());
        let (tx, mut rx) = channel();
        let mut app = App::new(DEV_TRIP_ID, &TripConfig::default(), offset!(UTC));
        app.open_create();

        run_action(Action::SubmitPlanItem, &mut app, &api, &tx).await.unwrap();
        assert!(!app.form.is_saving());
        assert!(app.form.error().is_some());
        assert!(rx.try_recv().is_err());
    }
}
