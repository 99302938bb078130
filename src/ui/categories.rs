use crate::app::App;
use crate::util::truncate_to_width;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Render the category selector. The applied filter is marked with `*`.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let style_selected = app.style("category_selected");
    let style_active = app.style("category_active");
    let style_normal = app.style("category_normal");
    let max_width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = app
        .categories
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let active = name == app.filter.as_str();
            let style = if i == app.selected_category {
                style_selected
            } else if active {
                style_active
            } else {
                style_normal
            };
            let marker = if active { "* " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(truncate_to_width(name, max_width), style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border_focused"))
                .title("Categories"),
        )
        .highlight_style(Style::default());

    let mut state = ListState::default().with_selected(Some(app.selected_category));
    f.render_stateful_widget(list, area, &mut state);
}
