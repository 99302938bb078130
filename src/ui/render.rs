//! Render functions for the TUI.

use crate::app::{App, Mode};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
    Frame,
};

use super::{categories, form, help, quote, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 50;
pub(super) const MIN_HEIGHT: u16 = 10;

/// Main render dispatch function.
pub(super) fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(rows[0]);

    categories::render(f, app, columns[0]);
    quote::render(f, app, columns[1]);
    status::render(f, app, rows[1]);

    match &app.mode {
        Mode::Browse => {}
        Mode::AddForm(state) => form::render_add_form(f, app, state),
        Mode::ImportPrompt { input } => form::render_import_prompt(f, app, input),
    }

    if app.show_help {
        help::render(f, app);
    }
}

/// A rectangle of at most `width` x `height`, centered in `area`.
pub(super) fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AddForm;
    use crate::config::Config;
    use crate::quotes::{CategoryFilter, Quote, QuoteBook, Selection};
    use crate::storage::Database;
    use ratatui::{backend::TestBackend, Terminal};
    use std::path::PathBuf;

    async fn test_app() -> App {
        let db = Database::open(":memory:").await.unwrap();
        db.save_quotes(&[Quote::new("Stay hungry", "Life")])
            .await
            .unwrap();
        let book = QuoteBook::load(db).await.unwrap();
        App::new(book, Config::default(), PathBuf::from("/tmp")).unwrap()
    }

    fn draw(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn test_renders_quote_and_categories() {
        let mut app = test_app().await;
        app.current = Selection::Quote(Quote::new("Stay hungry", "Life"));
        let screen = draw(&app, 80, 20);

        assert!(screen.contains("Stay hungry"));
        assert!(screen.contains("Categories"));
        assert!(screen.contains("all"));
        assert!(screen.contains("Life"));
    }

    #[tokio::test]
    async fn test_renders_empty_placeholder() {
        let mut app = test_app().await;
        app.filter = CategoryFilter::Category("Gone".into());
        let screen = draw(&app, 80, 20);
        assert!(screen.contains("No quotes in \"Gone\""));
    }

    #[tokio::test]
    async fn test_renders_add_form_error() {
        let mut app = test_app().await;
        app.mode = Mode::AddForm(AddForm {
            error: Some("Please enter a quote".into()),
            ..AddForm::default()
        });
        let screen = draw(&app, 80, 20);
        assert!(screen.contains("Add Quote"));
        assert!(screen.contains("Please enter a quote"));
    }

    #[tokio::test]
    async fn test_small_terminal_message() {
        let app = test_app().await;
        let screen = draw(&app, 30, 6);
        assert!(screen.contains("Terminal too small"));
    }

    #[test]
    fn test_centered_fixed_clamps() {
        let area = Rect::new(0, 0, 40, 10);
        let r = centered_fixed(60, 8, area);
        assert_eq!(r.width, 36);
        assert_eq!(r.height, 8);
        assert_eq!(r.x, 2);
    }
}
