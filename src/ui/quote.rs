use crate::app::App;
use crate::quotes::CategoryFilter;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the quote display panel.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let title = match &app.filter {
        CategoryFilter::All => " Quote ".to_string(),
        CategoryFilter::Category(name) => format!(" Quote ({}) ", name),
    };

    // Pad from the top so short quotes sit near the middle.
    let inner_height = area.height.saturating_sub(2) as usize;
    let mut lines: Vec<Line> = vec![Line::from(""); inner_height / 3];

    match app.current.quote() {
        Some(quote) => {
            lines.push(Line::from(Span::styled(
                format!("\u{201c}{}\u{201d}", quote.text),
                app.style("quote_text"),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                quote.category.as_str(),
                app.style("quote_category"),
            )));
        }
        None => {
            let msg = if app.book.quotes().is_empty() {
                "No quotes available. Press a to add one.".to_string()
            } else {
                match &app.filter {
                    CategoryFilter::All => "Press n for a quote.".to_string(),
                    CategoryFilter::Category(name) => format!("No quotes in \"{}\".", name),
                }
            };
            lines.push(Line::from(Span::styled(msg, app.style("quote_empty"))));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border"))
                .title(title),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}
