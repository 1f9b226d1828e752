use super::utils::money;
use crate::app::{App, CurrencyBudget};
use plan_items::domain::Choice;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

/// Slice colors, in category order.
pub const PALETTE: [Color; 8] = [
    Color::Blue,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::Red,
    Color::LightBlue,
    Color::LightGreen,
];

pub fn render_budget_view(frame: &mut Frame, app: &App, body: Rect) {
    let Some(budget) = app.selected_budget() else {
        let empty = Paragraph::new("Sin costes registrados")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(budget_block(" Presupuesto ".to_string()));
        frame.render_widget(empty, body);
        return;
    };

    let others = app.budgets.len().saturating_sub(1);
    let title = if others > 0 {
        format!(" Presupuesto · {} (←→ cambia moneda) ", budget.currency)
    } else {
        format!(" Presupuesto · {} ", budget.currency)
    };
    let block = budget_block(title);
    let inner = block.inner(body);
    frame.render_widget(block, body);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    render_pie(frame, budget, panels[0]);
    let legend = Paragraph::new(legend_lines(budget))
        .block(Block::default().padding(Padding::new(2, 0, 1, 0)));
    frame.render_widget(legend, panels[1]);
}

fn budget_block(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(Span::styled(title, Style::default().fg(Color::White)))
}

fn render_pie(frame: &mut Frame, budget: &CurrencyBudget, area: Rect) {
    use tui_piechart::{PieChart, PieSlice};

    let slices: Vec<PieSlice> = budget
        .slices
        .iter()
        .enumerate()
        .map(|(i, slice)| {
            PieSlice::new(
                slice.category.label(),
                slice.percentage,
                PALETTE[i % PALETTE.len()],
            )
        })
        .collect();

    // Square-ish: terminal cells are about twice as tall as wide.
    let side = (area.width / 2).min(area.height);
    let pie_area = Rect {
        x: area.x + area.width.saturating_sub(side * 2) / 2,
        y: area.y,
        width: (side * 2).min(area.width),
        height: side,
    };
    let pie = PieChart::new(slices)
        .show_legend(false)
        .show_percentages(false);
    frame.render_widget(pie, pie_area);
}

pub(super) fn legend_lines(budget: &CurrencyBudget) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = budget
        .slices
        .iter()
        .enumerate()
        .map(|(i, slice)| {
            let color = PALETTE[i % PALETTE.len()];
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(color)),
                Span::styled(
                    format!(
                        "{}: {} ({:.0}%)",
                        slice.category.label(),
                        money(slice.total, &budget.currency),
                        slice.percentage
                    ),
                    Style::default().fg(Color::Gray),
                ),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Total: {}", money(budget.total, &budget.currency)),
        Style::default().fg(Color::White),
    )));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::panels::BudgetSlice;
    use plan_items::domain::BudgetCategoryType;

    #[test]
    fn legend_lists_slices_then_total() {
        let budget = CurrencyBudget {
            currency: "EUR".to_string(),
            total: 100.0,
            slices: vec![
                BudgetSlice {
                    category: BudgetCategoryType::Accommodation,
                    total: 75.0,
                    percentage: 75.0,
                },
                BudgetSlice {
                    category: BudgetCategoryType::Food,
                    total: 25.0,
                    percentage: 25.0,
                },
            ],
        };
        let text: Vec<String> = legend_lines(&budget)
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert_eq!(text[0], "■ Alojamiento: 75.00 EUR (75%)");
        assert_eq!(text[1], "■ Comida: 25.00 EUR (25%)");
        assert_eq!(text.last().map(String::as_str), Some("Total: 100.00 EUR"));
    }
}
