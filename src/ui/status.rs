use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
    Frame,
};
use std::borrow::Cow;

const HINTS: &str = "[n]ext [j/k]category [a]dd [i]mport [e]xport [s]ync [t]heme [?]help [q]uit";

/// Render the status bar: message or key hints on the left, sync state on the right.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = match &app.status_message {
        Some((msg, _)) => Cow::Borrowed(msg.as_ref()),
        None => Cow::Borrowed(HINTS),
    };

    let sync = sync_label(app);
    let sync_width = (sync.chars().count() as u16 + 1).min(area.width / 2);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(sync_width)])
        .split(area);

    f.render_widget(
        Paragraph::new(text).style(app.style("status_bar")),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new(sync)
            .alignment(Alignment::Right)
            .style(app.style("status_sync")),
        chunks[1],
    );
}

fn sync_label(app: &App) -> String {
    if app.is_syncing() {
        "syncing...".to_string()
    } else if app.last_sync_error.is_some() {
        "sync failed".to_string()
    } else if let Some(at) = app.last_synced_at {
        format!("synced {}", at.format("%H:%M:%S"))
    } else if app.sync_handle.is_none() {
        "sync off".to_string()
    } else {
        String::new()
    }
}
