//! Input handling for the TUI.
//!
//! Keys go to the help overlay first, then to the active form or prompt,
//! and finally to the browse bindings.

use crate::app::{App, AppEvent, Mode, MAX_INPUT_LENGTH};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use std::path::PathBuf;
use tokio::sync::mpsc;

use super::helpers::{spawn_export, spawn_push, spawn_sync_now};
use super::Action;

/// Main input dispatch function.
pub(super) async fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    // Raw mode delivers Ctrl-C as a key press rather than SIGINT.
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Ok(Action::Quit);
    }

    if app.show_help {
        return Ok(handle_help_input(app, code));
    }

    match app.mode {
        Mode::AddForm(_) => handle_form_input(app, code, event_tx).await,
        Mode::ImportPrompt { .. } => handle_import_input(app, code).await,
        Mode::Browse => handle_browse_input(app, code, event_tx).await,
    }
}

fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    if matches!(
        code,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')
    ) {
        app.show_help = false;
    }
    Action::Continue
}

async fn handle_browse_input(
    app: &mut App,
    code: KeyCode,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    match code {
        KeyCode::Char('q') => return Ok(Action::Quit),
        KeyCode::Char('n') | KeyCode::Char(' ') => app.next_quote().await,
        KeyCode::Char('j') | KeyCode::Down => {
            if app.category_down() {
                app.apply_selected_category().await;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if app.category_up() {
                app.apply_selected_category().await;
            }
        }
        KeyCode::Char('a') => app.open_add_form(),
        KeyCode::Char('i') => app.open_import_prompt(),
        KeyCode::Char('e') => spawn_export(app, event_tx),
        KeyCode::Char('s') => spawn_sync_now(app, event_tx),
        KeyCode::Char('t') => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        KeyCode::Char('?') => app.show_help = true,
        _ => {}
    }
    Ok(Action::Continue)
}

/// Add form: Tab switches field, Enter submits, Esc cancels.
async fn handle_form_input(
    app: &mut App,
    code: KeyCode,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    let Mode::AddForm(form) = &mut app.mode else {
        return Ok(Action::Continue);
    };

    match code {
        KeyCode::Esc => app.close_overlay(),
        KeyCode::Tab | KeyCode::BackTab => form.focus = form.focus.toggle(),
        KeyCode::Backspace => {
            form.focused_mut().pop();
        }
        KeyCode::Char(c) => {
            let field = form.focused_mut();
            if field.len() < MAX_INPUT_LENGTH {
                field.push(c);
            }
        }
        KeyCode::Enter => {
            if let Some(quote) = app.submit_add_form().await {
                spawn_push(app, quote, event_tx);
            }
        }
        _ => {}
    }
    Ok(Action::Continue)
}

/// Import prompt: type a path, Enter imports, Esc cancels.
async fn handle_import_input(app: &mut App, code: KeyCode) -> Result<Action> {
    let Mode::ImportPrompt { input } = &mut app.mode else {
        return Ok(Action::Continue);
    };

    match code {
        KeyCode::Esc => app.close_overlay(),
        KeyCode::Backspace => {
            input.pop();
        }
        KeyCode::Char(c) => {
            if input.len() < MAX_INPUT_LENGTH {
                input.push(c);
            }
        }
        KeyCode::Enter => {
            let raw = input.trim().to_owned();
            if raw.is_empty() {
                return Ok(Action::Continue);
            }
            app.close_overlay();
            let path = expand_home(&raw);
            app.import_from(&path).await;
        }
        _ => {}
    }
    Ok(Action::Continue)
}

/// Expand a leading `~/` to `$HOME`.
fn expand_home(raw: &str) -> PathBuf {
    match (raw.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(raw),
    }
}
