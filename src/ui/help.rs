//! Help overlay listing the keybindings.

use crate::app::App;
use ratatui::{
    layout::Constraint,
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Row, Table},
    Frame,
};

use super::render::centered_fixed;

const BINDINGS: [(&str, &str); 11] = [
    ("n / Space", "Show another quote"),
    ("j / Down", "Next category"),
    ("k / Up", "Previous category"),
    ("a", "Add a quote"),
    ("i", "Import quotes from a JSON file"),
    ("e", "Export quotes to the config directory"),
    ("s", "Sync with the server now"),
    ("t", "Cycle theme"),
    ("?", "Toggle this help"),
    ("Esc", "Close form or help"),
    ("q / Ctrl-C", "Quit"),
];

/// Render the help overlay on top of the current view.
pub fn render(f: &mut Frame, app: &App) {
    let overlay = centered_fixed(56, BINDINGS.len() as u16 + 4, f.area());
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }

    f.render_widget(Clear, overlay);

    let rows: Vec<Row> = BINDINGS
        .iter()
        .map(|(key, action)| Row::new(vec![*key, *action]))
        .collect();

    let widths = [Constraint::Length(12), Constraint::Min(20)];
    let table = Table::new(rows, widths)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border_focused"))
                .title(" Help (? to close) "),
        )
        .header(
            Row::new(vec!["Key", "Action"])
                .style(app.style("help_heading").add_modifier(Modifier::UNDERLINED))
                .bottom_margin(1),
        )
        .style(Style::default());

    f.render_widget(table, overlay);
}
