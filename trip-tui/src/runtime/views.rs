use crate::app::App;
use crossterm::event::KeyEvent;

use super::action_queue::{Action, ActionTx};

mod plan_item_modal;
mod trip;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

pub(super) fn handle_view_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if app.is_modal_open() {
        plan_item_modal::handle_modal_key(key, app, action_tx);
    } else {
        trip::handle_trip_key(key, app, action_tx);
    }
}
