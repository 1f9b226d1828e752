use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_trip_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Tab => app.next_panel(),
        KeyCode::BackTab => app.previous_panel(),
        KeyCode::Char(c @ '1'..='5') => {
            if let Some(number) = c.to_digit(10) {
                app.select_panel(number as usize);
            }
        }
        KeyCode::Down | KeyCode::Char('j') => app.select_next_item(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_item(),
        KeyCode::Right | KeyCode::Char('l') => app.step_period(true),
        KeyCode::Left | KeyCode::Char('h') => app.step_period(false),
        KeyCode::Char('a') | KeyCode::Char('n') => {
            app.clear_status();
            app.open_create();
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            app.clear_status();
            app.open_edit();
        }
        KeyCode::Char('r') => {
            app.set_status("Actualizando…".to_string());
            enqueue_action(action_tx, Action::RefreshPlanItems);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Panel;
    use crate::config::TripConfig;
    use crate::runtime::action_queue::channel;
    use time::macros::offset;

    fn press(app: &mut App, tx: &ActionTx, code: KeyCode) {
        handle_trip_key(KeyEvent::new(code, KeyModifiers::NONE), app, tx);
    }

    #[test]
    fn digits_jump_to_panels() {
        let (tx, _rx) = channel();
        let mut app = App::new("t1", &TripConfig::default(), offset!(UTC));
        press(&mut app, &tx, KeyCode::Char('5'));
        assert_eq!(app.panel, Panel::Budget);
        press(&mut app, &tx, KeyCode::Char('2'));
        assert_eq!(app.panel, Panel::Accommodations);
    }

    #[test]
    fn a_opens_the_editor_and_r_enqueues_refresh() {
        let (tx, mut rx) = channel();
        let mut app = App::new("t1", &TripConfig::default(), offset!(UTC));
        press(&mut app, &tx, KeyCode::Char('a'));
        assert!(app.is_modal_open());
        assert!(app.form.is_visible());

        app.close_modal();
        press(&mut app, &tx, KeyCode::Char('r'));
        assert!(matches!(rx.try_recv(), Ok(Action::RefreshPlanItems)));
    }

    #[test]
    fn ctrl_c_quits() {
        let (tx, _rx) = channel();
        let mut app = App::new("t1", &TripConfig::default(), offset!(UTC));
        handle_trip_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut app,
            &tx,
        );
        assert!(!app.running);
    }
}
