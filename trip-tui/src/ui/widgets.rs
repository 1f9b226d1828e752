use crate::app::fields::{FieldRow, FieldSpec};
use crate::app::TextInput;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

const LABEL_WIDTH: usize = 18;

fn focused_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Render the value slot of a field. The focused text field shows the
/// edit buffer with a block cursor instead of the draft value.
fn value_spans(field: &FieldSpec, focused: bool, input: &TextInput) -> Vec<Span<'static>> {
    if focused && !field.is_choice() {
        let (before, after) = input.split_at_cursor();
        return vec![Span::styled(format!("[{}█{}]", before, after), focused_style())];
    }

    if field.is_choice() {
        let text = format!("◂ {} ▸", field.display());
        let style = if focused {
            focused_style()
        } else {
            Style::default().fg(Color::Cyan)
        };
        return vec![Span::styled(text, style)];
    }

    let value = field.display();
    if value.is_empty() {
        let hint = match field.placeholder() {
            "" => "—",
            p => p,
        };
        vec![Span::styled(
            format!("[{}]", hint),
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        vec![Span::styled(
            format!("[{}]", value),
            Style::default().fg(Color::White),
        )]
    }
}

pub fn field_spans(field: &FieldSpec, focused: bool, input: &TextInput) -> Vec<Span<'static>> {
    let marker = if field.is_required() { "*" } else { " " };
    let label_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let mut spans = vec![
        Span::styled(marker, Style::default().fg(Color::Red)),
        Span::styled(
            format!("{:<width$}", field.label(), width = LABEL_WIDTH),
            label_style,
        ),
    ];
    spans.extend(value_spans(field, focused, input));
    spans
}

/// One layout row. `first_slot` is the focus slot of the row's first
/// field; `focus` is the modal's current slot.
pub fn row_line(row: &FieldRow, first_slot: usize, focus: usize, input: &TextInput) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, field) in row.fields().into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.extend(field_spans(field, first_slot + i == focus, input));
    }
    Line::from(spans)
}

/// Inline `Key: action` hints, in the style of the controls bars.
pub fn controls_line(pairs: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (key, action)) in pairs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!(": {}", action)));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::fields::FieldId;

    fn text_of(spans: &[Span]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn empty_date_shows_placeholder() {
        let field = FieldSpec::date(FieldId::FlightDate, "Fecha del vuelo", None, true);
        let text = text_of(&field_spans(&field, false, &TextInput::default()));
        assert!(text.contains("[AAAA-MM-DD]"));
    }

    #[test]
    fn focused_text_field_shows_buffer_with_cursor() {
        let field = FieldSpec::required_text(FieldId::Title, "Título", "Cena");
        let input = TextInput::from_str("Cen");
        let text = text_of(&field_spans(&field, true, &input));
        assert!(text.starts_with('*'));
        assert!(text.contains("[Cen█]"));
    }
}
