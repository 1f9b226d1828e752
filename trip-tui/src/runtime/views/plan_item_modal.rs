use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_modal_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => {
            app.close_modal();
            app.set_status("Edición cancelada".to_string());
            return;
        }
        // Enter and Ctrl+S both submit; the form itself refuses while saving.
        KeyCode::Enter => {
            enqueue_action(action_tx, Action::SubmitPlanItem);
            return;
        }
        KeyCode::Char('s') if ctrl => {
            enqueue_action(action_tx, Action::SubmitPlanItem);
            return;
        }
        _ => {}
    }

    let App { form, modal, .. } = app;
    let Some(modal) = modal.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Tab | KeyCode::Down => modal.focus_next(form),
        KeyCode::BackTab | KeyCode::Up => modal.focus_prev(form),
        KeyCode::Right => modal.step(form, true),
        KeyCode::Left => modal.step(form, false),
        KeyCode::Home => modal.input.home(),
        KeyCode::End => modal.input.end(),
        KeyCode::Backspace => modal.backspace(form),
        KeyCode::Char('x') if ctrl => modal.clear_field(form),
        KeyCode::Char(c) if !ctrl => modal.insert_char(form, c),
        _ => {}
    }
}
