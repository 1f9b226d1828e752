use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rectangle of at most `width` x `height`, centered in `r`.
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height - height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((r.width - width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(popup_layout[1])[1]
}

/// `1234.5` -> `1234.50 EUR`
pub fn money(amount: f64, currency: &str) -> String {
    format!("{:.2} {}", amount, currency)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_fits_inside() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(60, 20, outer);
        assert_eq!(inner, Rect::new(20, 10, 60, 20));

        let clamped = centered_rect(200, 80, outer);
        assert_eq!(clamped, outer);
    }

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(money(12.5, "EUR"), "12.50 EUR");
    }
}
