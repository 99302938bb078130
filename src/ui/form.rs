//! Add-quote form and import prompt overlays.

use crate::app::{AddForm, App, FormField};
use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::render::centered_fixed;

pub fn render_add_form(f: &mut Frame, app: &App, form: &AddForm) {
    let overlay = centered_fixed(64, 11, f.area());
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }
    f.render_widget(Clear, overlay);

    let field = |label: &'static str, value: &str, which: FormField| {
        let focused = form.focus == which;
        let style = if focused {
            app.style("form_input_focused")
        } else {
            app.style("form_input")
        };
        let cursor = if focused { "_" } else { "" };
        Line::from(vec![
            Span::styled(label, app.style("form_label")),
            Span::styled(format!("{}{}", value, cursor), style),
        ])
    };

    let mut lines = vec![
        field("Quote:    ", &form.text, FormField::Text),
        Line::from(""),
        field("Category: ", &form.category, FormField::Category),
        Line::from(""),
    ];
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(error.as_str(), app.style("error"))));
    }
    lines.push(Line::from("(Tab) Switch field  (Enter) Add  (Esc) Cancel"));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border_focused"))
                .title(" Add Quote "),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, overlay);
}

pub fn render_import_prompt(f: &mut Frame, app: &App, input: &str) {
    let overlay = centered_fixed(64, 7, f.area());
    if overlay.width < 20 || overlay.height < 5 {
        return;
    }
    f.render_widget(Clear, overlay);

    let lines = vec![
        Line::from(Span::styled("Path to a JSON file:", app.style("form_label"))),
        Line::from(Span::styled(
            format!("> {}_", input),
            app.style("form_input_focused"),
        )),
        Line::from(""),
        Line::from("(Enter) Import  (Esc) Cancel"),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.style("panel_border_focused"))
            .title(" Import Quotes "),
    );

    f.render_widget(paragraph, overlay);
}
