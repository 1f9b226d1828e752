use plan_items::domain::Choice;
use plan_items::form::PlanItemForm;
use time::UtcOffset;

use super::fields::{self, FieldSpec};
use super::state::TextInput;

/// Focus slot of the category tabs; fields follow from 1.
pub const TABS: usize = 0;

/// Cursor state of the plan item modal. Field values live in the form's
/// draft; `input` mirrors the focused text field while it is being typed.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalState {
    pub focus: usize,
    pub input: TextInput,
    offset: UtcOffset,
}

impl ModalState {
    pub fn new(form: &PlanItemForm, offset: UtcOffset) -> Self {
        let mut modal = Self {
            focus: 1,
            input: TextInput::default(),
            offset,
        };
        modal.clamp_focus(form);
        modal.sync_input(form);
        modal
    }

    pub fn focused_field(&self, form: &PlanItemForm) -> Option<FieldSpec> {
        if self.focus == TABS {
            return None;
        }
        fields::field_group(form)
            .flatten()
            .get(self.focus - 1)
            .map(|field| (*field).clone())
    }

    fn slots(form: &PlanItemForm) -> usize {
        fields::field_group(form).flatten().len() + 1
    }

    /// Tabs are locked while editing, so they are skipped.
    fn first_slot(form: &PlanItemForm) -> usize {
        if form.is_editing() {
            1
        } else {
            TABS
        }
    }

    fn clamp_focus(&mut self, form: &PlanItemForm) {
        let last = Self::slots(form) - 1;
        self.focus = self.focus.clamp(Self::first_slot(form), last.max(Self::first_slot(form)));
    }

    fn sync_input(&mut self, form: &PlanItemForm) {
        self.input = match self.focused_field(form) {
            Some(field) if !field.is_choice() => TextInput::from_str(&field.display()),
            _ => TextInput::default(),
        };
    }

    pub fn focus_next(&mut self, form: &PlanItemForm) {
        let first = Self::first_slot(form);
        let slots = Self::slots(form);
        self.focus = if self.focus + 1 >= slots { first } else { self.focus + 1 };
        self.sync_input(form);
    }

    pub fn focus_prev(&mut self, form: &PlanItemForm) {
        let first = Self::first_slot(form);
        let slots = Self::slots(form);
        self.focus = if self.focus <= first { slots - 1 } else { self.focus - 1 };
        self.sync_input(form);
    }

    /// Left/Right: switch tab, step a choice, or move the cursor.
    pub fn step(&mut self, form: &mut PlanItemForm, forward: bool) {
        if self.focus == TABS {
            form.select_category(form.category().cycled(forward));
            self.clamp_focus(form);
            self.sync_input(form);
            return;
        }
        match self.focused_field(form) {
            Some(field) if field.is_choice() => {
                fields::cycle(form, field.id(), forward);
                form.clear_error();
                self.clamp_focus(form);
                self.sync_input(form);
            }
            Some(_) if forward => self.input.move_right(),
            Some(_) => self.input.move_left(),
            None => {}
        }
    }

    pub fn insert_char(&mut self, form: &mut PlanItemForm, c: char) {
        match self.focused_field(form) {
            Some(field) if field.is_choice() => {
                if c == ' ' {
                    self.step(form, true);
                }
            }
            Some(field) => {
                self.input.insert(c);
                self.commit(form, &field);
            }
            None => {}
        }
    }

    pub fn backspace(&mut self, form: &mut PlanItemForm) {
        if let Some(field) = self.focused_field(form).filter(|f| !f.is_choice()) {
            self.input.backspace();
            self.commit(form, &field);
        }
    }

    pub fn clear_field(&mut self, form: &mut PlanItemForm) {
        if let Some(field) = self.focused_field(form).filter(|f| !f.is_choice()) {
            self.input.clear();
            self.commit(form, &field);
        }
    }

    fn commit(&mut self, form: &mut PlanItemForm, field: &FieldSpec) {
        let value = field.parse(&self.input.value, self.offset);
        fields::apply(form, field.id(), value);
        form.clear_error();
    }
}
