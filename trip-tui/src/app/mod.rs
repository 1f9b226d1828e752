use plan_items::domain::PlanItem;
use plan_items::form::PlanItemForm;
use strum::IntoEnumIterator;
use time::{Date, UtcOffset};

use crate::config::TripConfig;
use crate::time_utils;

pub mod fields;
mod modal;
pub mod panels;
mod state;

pub use modal::{ModalState, TABS};
pub use panels::{CurrencyBudget, TripSummary};
pub use state::{Panel, TextInput};

pub struct App {
    pub running: bool,
    pub trip_id: String,
    pub status_message: Option<String>,
    pub panel: Panel,
    pub offset: UtcOffset,

    // Plan items as last fetched; never edited locally
    pub items: Vec<PlanItem>,
    pub days: Vec<Date>,
    pub selected_day: usize,
    pub selected_item: usize,

    // Budget cache, rebuilt when items change
    pub budgets: Vec<CurrencyBudget>,
    pub selected_currency: usize,
    pub default_currency: String,

    // Add/edit modal
    pub form: PlanItemForm,
    pub modal: Option<ModalState>,

    // Loading indicator
    pub is_loading: bool,
    pub throbber_state: throbber_widgets_tui::ThrobberState,
}

impl App {
    pub fn new(trip_id: &str, cfg: &TripConfig, offset: UtcOffset) -> Self {
        Self {
            running: true,
            trip_id: trip_id.to_string(),
            status_message: None,
            panel: Panel::default(),
            offset,
            items: Vec::new(),
            days: Vec::new(),
            selected_day: 0,
            selected_item: 0,
            budgets: Vec::new(),
            selected_currency: 0,
            default_currency: cfg.default_currency.clone(),
            form: PlanItemForm::new(),
            modal: None,
            is_loading: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Replace the trip's items and rebuild derived state, keeping the
    /// selected day when it still exists. The first load starts on today
    /// if the trip covers it.
    pub fn set_items(&mut self, items: Vec<PlanItem>) {
        let previous_day = self
            .selected_date()
            .or_else(|| Some(time_utils::today(self.offset)));
        self.items = items;
        self.days = panels::trip_days(&self.items, self.offset);
        self.selected_day = previous_day
            .and_then(|day| self.days.iter().position(|d| *d == day))
            .unwrap_or(0);

        let previous_currency = self
            .budgets
            .get(self.selected_currency)
            .map(|b| b.currency.clone())
            .unwrap_or_else(|| self.default_currency.clone());
        self.budgets = panels::budget_breakdown(&self.items);
        self.selected_currency = self
            .budgets
            .iter()
            .position(|b| b.currency == previous_currency)
            .unwrap_or(0);

        self.clamp_item_selection();
    }

    pub fn summary(&self) -> TripSummary {
        panels::summarize(&self.items, self.offset)
    }

    pub fn selected_date(&self) -> Option<Date> {
        self.days.get(self.selected_day).copied()
    }

    pub fn selected_budget(&self) -> Option<&CurrencyBudget> {
        self.budgets.get(self.selected_currency)
    }

    pub fn panel_items(&self) -> Vec<&PlanItem> {
        panels::panel_items(&self.items, self.panel, self.selected_date(), self.offset)
    }

    pub fn selected_plan_item(&self) -> Option<&PlanItem> {
        self.panel_items().get(self.selected_item).copied()
    }

    fn clamp_item_selection(&mut self) {
        let len = self.panel_items().len();
        self.selected_item = self.selected_item.min(len.saturating_sub(1));
    }

    pub fn next_panel(&mut self) {
        self.switch_panel(true);
    }

    pub fn previous_panel(&mut self) {
        self.switch_panel(false);
    }

    fn switch_panel(&mut self, forward: bool) {
        let all: Vec<Panel> = Panel::iter().collect();
        let idx = all.iter().position(|p| *p == self.panel).unwrap_or(0);
        let next = if forward {
            (idx + 1) % all.len()
        } else {
            (idx + all.len() - 1) % all.len()
        };
        self.panel = all[next];
        self.selected_item = 0;
    }

    pub fn select_panel(&mut self, number: usize) {
        if let Some(panel) = Panel::iter().nth(number.saturating_sub(1)) {
            self.panel = panel;
            self.selected_item = 0;
        }
    }

    pub fn select_next_item(&mut self) {
        let len = self.panel_items().len();
        if len > 0 && self.selected_item + 1 < len {
            self.selected_item += 1;
        }
    }

    pub fn select_previous_item(&mut self) {
        self.selected_item = self.selected_item.saturating_sub(1);
    }

    /// Left/Right on the daily plan moves between days; on the budget it
    /// moves between currencies.
    pub fn step_period(&mut self, forward: bool) {
        match self.panel {
            Panel::DailyPlan if !self.days.is_empty() => {
                self.selected_day = step(self.selected_day, self.days.len(), forward);
                self.selected_item = 0;
            }
            Panel::Budget if !self.budgets.is_empty() => {
                self.selected_currency =
                    step(self.selected_currency, self.budgets.len(), forward);
            }
            _ => {}
        }
    }

    /// Open the editor for a new item. The daily plan presets its selected
    /// day; other panels preselect their own category.
    pub fn open_create(&mut self) {
        let preset = match self.panel {
            Panel::DailyPlan => self.selected_date(),
            _ => None,
        };
        self.form.open(preset, self.offset);
        if let Some(category) = self.panel.category() {
            self.form.select_category(category);
        }
        self.modal = Some(ModalState::new(&self.form, self.offset));
    }

    pub fn open_edit(&mut self) {
        let Some(item) = self.selected_plan_item().cloned() else {
            self.set_status("Selecciona un elemento para editarlo".to_string());
            return;
        };
        self.form.open_for_edit(&item, self.offset);
        self.modal = Some(ModalState::new(&self.form, self.offset));
    }

    /// Cancel path. A request still in flight is left to finish; its
    /// result is dropped as stale.
    pub fn close_modal(&mut self) {
        self.form.close();
        self.modal = None;
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.is_loading || self.form.is_saving()
    }
}

fn step(idx: usize, len: usize, forward: bool) -> usize {
    if forward {
        (idx + 1) % len
    } else {
        (idx + len - 1) % len
    }
}
