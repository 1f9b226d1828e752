use crate::app::{App, Panel};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Tabs},
    Frame,
};
use strum::IntoEnumIterator;

mod budget_view;
mod plan_item_modal;
mod trip_view;
pub(super) mod utils;
pub(super) mod widgets;

pub fn render(frame: &mut Frame, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_header(frame, app, root[0]);
    render_panel_tabs(frame, app, root[1]);

    let body = root[2];
    match app.panel {
        Panel::Summary => trip_view::render_summary(frame, app, body),
        Panel::Budget => budget_view::render_budget_view(frame, app, body),
        Panel::Accommodations | Panel::Transport | Panel::DailyPlan => {
            trip_view::render_item_list(frame, app, body)
        }
    }

    render_controls(frame, app, root[3]);

    // Editor renders on top of any panel
    if app.is_modal_open() {
        let area = frame.area();
        plan_item_modal::render_plan_item_modal(frame, app, area);
    }
}

fn render_header(frame: &mut Frame, app: &mut App, area: Rect) {
    const LABEL: &str = " Trip Planner";
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(2 + LABEL.len() as u16),
            Constraint::Min(0),
        ])
        .split(area);

    // Throbber spins while loading or saving, full symbol when idle
    let throbber_area = Rect {
        x: cols[0].x + 1,
        y: cols[0].y,
        width: 1,
        height: 1,
    };
    let label_area = Rect {
        x: throbber_area.x + 1,
        y: cols[0].y,
        width: cols[0].width.saturating_sub(2),
        height: 1,
    };
    let throbber = throbber_widgets_tui::Throbber::default()
        .style(Style::default().fg(Color::Yellow))
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(if app.is_busy() {
            throbber_widgets_tui::WhichUse::Spin
        } else {
            throbber_widgets_tui::WhichUse::Full
        });
    frame.render_stateful_widget(throbber, throbber_area, &mut app.throbber_state);
    frame.render_widget(
        Paragraph::new(Span::styled(LABEL, Style::default().fg(Color::Yellow))),
        label_area,
    );

    let status = match &app.status_message {
        Some(message) => Span::styled(message.clone(), Style::default().fg(Color::White)),
        None => Span::styled(app.trip_id.clone(), Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(
        Paragraph::new(Line::from(status)).alignment(Alignment::Right),
        cols[1],
    );
}

fn render_panel_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<String> = Panel::iter()
        .enumerate()
        .map(|(i, panel)| format!("{} {}", i + 1, panel))
        .collect();
    let selected = Panel::iter().position(|p| p == app.panel).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(tabs, area);
}

fn render_controls(frame: &mut Frame, app: &App, area: Rect) {
    let mut pairs = vec![("Tab/1-5", "Panel"), ("↑↓", "Elemento")];
    match app.panel {
        Panel::DailyPlan => pairs.push(("←→", "Día")),
        Panel::Budget => pairs.push(("←→", "Moneda")),
        _ => {}
    }
    pairs.extend([("A", "Añadir"), ("E", "Editar"), ("R", "Actualizar"), ("Q", "Salir")]);

    let controls = Paragraph::new(widgets::controls_line(&pairs))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(
                    " Controles ",
                    Style::default().fg(Color::DarkGray),
                ))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(controls, area);
}
