use super::utils::money;
use crate::app::{App, Panel, TripSummary};
use crate::time_utils::{clock, short_day};
use plan_items::domain::{Choice, PlanItem};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph},
    Frame,
};
use time::UtcOffset;

fn panel_block(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(Span::styled(title, Style::default().fg(Color::White)))
        .padding(Padding::horizontal(1))
}

pub(super) fn summary_lines(summary: &TripSummary) -> Vec<Line<'static>> {
    let label = |s: &'static str| Span::styled(s, Style::default().fg(Color::DarkGray));
    let value = |s: String| Span::styled(s, Style::default().fg(Color::White));

    let dates = match (summary.first_day, summary.last_day) {
        (Some(first), Some(last)) if first == last => short_day(first),
        (Some(first), Some(last)) => format!("{} → {}", short_day(first), short_day(last)),
        _ => "Sin fechas".to_string(),
    };

    let mut lines = vec![
        Line::from(vec![label("Fechas:        "), value(dates)]),
        Line::from(vec![label("Elementos:     "), value(summary.item_count.to_string())]),
        Line::from(vec![
            label("Alojamientos:  "),
            value(format!("{} ({} noches)", summary.accommodations, summary.nights)),
        ]),
        Line::from(vec![label("Trayectos:     "), value(summary.transport_legs.to_string())]),
        Line::from(vec![label("Actividades:   "), value(summary.activities.to_string())]),
        Line::from(vec![label("Gastos:        "), value(summary.expenses.to_string())]),
        Line::from(""),
    ];
    if summary.totals.is_empty() {
        lines.push(Line::from(label("Sin costes registrados")));
    }
    for (currency, total) in &summary.totals {
        lines.push(Line::from(vec![
            label("Total:         "),
            Span::styled(money(*total, currency), Style::default().fg(Color::Magenta)),
        ]));
    }
    lines
}

pub(super) fn item_line(item: &PlanItem, offset: UtcOffset, with_day: bool) -> Line<'static> {
    let mut spans = Vec::new();
    if with_day {
        let day = item.day_date(offset).map(short_day).unwrap_or_else(|| "—".to_string());
        spans.push(Span::styled(format!("{:<11}", day), Style::default().fg(Color::Blue)));
    }
    let start = item
        .start_at
        .map(|dt| clock(dt, offset))
        .unwrap_or_else(|| "--:--".to_string());
    spans.push(Span::styled(format!("{} ", start), Style::default().fg(Color::Yellow)));
    spans.push(Span::styled(
        format!("[{}] ", item.item_type.label()),
        Style::default().fg(Color::DarkGray),
    ));
    spans.push(Span::styled(item.title.clone(), Style::default().fg(Color::Cyan)));
    if let Some(location) = item.location.as_deref().filter(|l| !l.is_empty()) {
        spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(location.to_string(), Style::default().fg(Color::Gray)));
    }
    if let Some(cost) = item.cost {
        spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            money(cost, &item.currency),
            Style::default().fg(Color::Magenta),
        ));
    }
    Line::from(spans)
}

pub fn render_summary(frame: &mut Frame, app: &App, body: Rect) {
    let paragraph = Paragraph::new(summary_lines(&app.summary()))
        .block(panel_block(format!(" {} ", app.trip_id)));
    frame.render_widget(paragraph, body);
}

pub fn render_item_list(frame: &mut Frame, app: &App, body: Rect) {
    let title = match (app.panel, app.selected_date()) {
        (Panel::DailyPlan, Some(day)) => format!(" {} · {} ", app.panel, short_day(day)),
        _ => format!(" {} ", app.panel),
    };
    let with_day = app.panel != Panel::DailyPlan;
    let items = app.panel_items();

    if items.is_empty() {
        let empty = Paragraph::new("Nada planificado todavía. Pulsa A para añadir.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(panel_block(title));
        frame.render_widget(empty, body);
        return;
    }

    let list_items: Vec<ListItem> = items
        .iter()
        .map(|item| ListItem::new(item_line(item, app.offset, with_day)))
        .collect();
    let list = List::new(list_items).block(panel_block(title)).highlight_style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default();
    state.select(Some(app.selected_item.min(items.len() - 1)));
    frame.render_stateful_widget(list, body, &mut state);
}
