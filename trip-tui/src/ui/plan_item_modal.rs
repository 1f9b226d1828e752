use super::utils::centered_rect;
use super::widgets::{controls_line, row_line};
use crate::app::{fields, App, ModalState, TABS};
use plan_items::domain::{Choice, ItemCategory};
use plan_items::form::PlanItemForm;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use strum::IntoEnumIterator;

fn category_tabs(form: &PlanItemForm, focused: bool) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for category in ItemCategory::iter() {
        let active = category == form.category();
        // Other tabs are hidden while editing; the category is fixed.
        if form.is_editing() && !active {
            continue;
        }
        let style = match (active, focused) {
            (true, true) => Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            (true, false) => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            (false, _) => Style::default().fg(Color::DarkGray),
        };
        spans.push(Span::styled(format!(" {} ", category.label()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

pub(super) fn modal_lines(form: &PlanItemForm, modal: &ModalState) -> Vec<Line<'static>> {
    let group = fields::field_group(form);
    let mut lines = vec![category_tabs(form, modal.focus == TABS), Line::from("")];

    let mut slot = 1;
    for row in &group.rows {
        lines.push(row_line(row, slot, modal.focus, &modal.input));
        slot += row.fields().len();
    }
    lines.push(Line::from(""));

    if let Some(error) = form.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
    } else if form.is_saving() {
        lines.push(Line::from(Span::styled(
            "Guardando…",
            Style::default().fg(Color::Yellow),
        )));
    } else {
        lines.push(Line::from(""));
    }

    let submit = if form.is_editing() { "Actualizar" } else { "Guardar" };
    let submit_style = if form.can_submit() {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    lines.push(Line::from(Span::styled(format!(" {} ", submit), submit_style)));
    lines.push(Line::from(""));
    lines.push(controls_line(&[
        ("Tab/↑↓", "Campo"),
        ("←→", "Cambiar"),
        ("Ctrl+X", "Vaciar"),
        ("Enter", submit),
        ("Esc", "Cancelar"),
    ]));
    lines
}

pub fn render_plan_item_modal(frame: &mut Frame, app: &App, area: Rect) {
    let Some(modal) = &app.modal else {
        return;
    };
    let lines = modal_lines(&app.form, modal);
    let height = lines.len() as u16 + 2;
    let popup = centered_rect(92, height, area);
    frame.render_widget(Clear, popup);

    let title = if app.form.is_editing() {
        " Editar elemento "
    } else {
        " Nuevo elemento "
    };
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(Span::styled(title, Style::default().fg(Color::Yellow))),
        );
    frame.render_widget(paragraph, popup);
}
