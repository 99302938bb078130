use crate::config::Config;
use crate::quotes::{CategoryFilter, Quote, QuoteBook, QuoteError, Selection, EXPORT_FILE_NAME};
use crate::sync::{SyncAgent, SyncHandle, SyncSettings};
use crate::theme::{StyleMap, ThemeVariant};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::style::Style;
use reqwest::redirect::Policy;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Longest text the add form and import prompt accept from the keyboard.
pub const MAX_INPUT_LENGTH: usize = 2048;

// ============================================================================
// HTTP Client Configuration
// ============================================================================

/// Redirect policy: at most 3 hops, no loops.
fn create_redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= 3 {
            return attempt.error("Too many redirects (max 3)");
        }

        let url = attempt.url();
        for prev in attempt.previous() {
            if prev.as_str() == url.as_str() {
                return attempt.error("Redirect loop detected");
            }
        }

        tracing::debug!(
            from = %attempt.previous().last().map(|u| u.as_str()).unwrap_or("initial"),
            to = %url,
            hop = attempt.previous().len() + 1,
            "Following redirect"
        );

        attempt.follow()
    })
}

/// Shared HTTP client for sync and push.
///
/// Per-request timeouts are applied by the sync agent; the client-level
/// timeout here is a backstop a little above it.
pub fn build_http_client(request_timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .redirect(create_redirect_policy())
        .user_agent(concat!("quotebook/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(2)
        .pool_idle_timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(5))
        .timeout(request_timeout + Duration::from_secs(5))
        .build()
        .context("Failed to build HTTP client")
}

// ============================================================================
// Input Modes
// ============================================================================

/// Which add-form field receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Text,
    Category,
}

impl FormField {
    pub fn toggle(self) -> Self {
        match self {
            Self::Text => Self::Category,
            Self::Category => Self::Text,
        }
    }
}

/// State of the add-quote form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddForm {
    pub text: String,
    pub category: String,
    pub focus: FormField,
    /// Last validation error, shown under the fields.
    pub error: Option<String>,
}

impl AddForm {
    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Text => &mut self.text,
            FormField::Category => &mut self.category,
        }
    }
}

/// Current input mode. Overlays capture all keys while active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Browse,
    AddForm(AddForm),
    ImportPrompt { input: String },
}

// ============================================================================
// Background Events
// ============================================================================

/// Events from background tasks
pub enum AppEvent {
    /// A sync fetch finished. The batch is merged by the UI loop.
    SyncFetched(Result<Vec<Quote>, String>),
    /// Export completed successfully.
    ///
    /// Fields:
    /// - `count`: Number of quotes exported
    /// - `path`: Filesystem path the JSON file was written to
    ExportComplete { count: usize, path: String },
    ExportFailed { error: String },
    /// A background task panicked.
    ///
    /// Fields:
    /// - `task`: Name of the task that panicked (e.g., "sync", "export")
    /// - `error`: The panic message extracted from the panic payload
    TaskPanicked { task: &'static str, error: String },
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state
pub struct App {
    pub book: QuoteBook,
    pub config: Config,
    /// Directory that holds config, database and exports.
    pub config_dir: PathBuf,

    // Sync
    pub sync: SyncAgent,
    /// Periodic sync, if enabled.
    pub sync_handle: Option<SyncHandle>,
    /// Manual "sync now" fetch, if one is running.
    pub sync_task: Option<JoinHandle<()>>,
    /// When the last fetch came back successfully. Never persisted.
    pub last_synced_at: Option<DateTime<Local>>,
    /// Why the most recent fetch or merge failed. Shown in the status bar only.
    pub last_sync_error: Option<String>,

    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,

    // Quote display
    /// Category Index: "all" first, then categories in first-seen order.
    pub categories: Vec<String>,
    /// Cursor in the category list.
    pub selected_category: usize,
    /// The applied filter. May name a category that no longer exists.
    pub filter: CategoryFilter,
    pub current: Selection,
    pub rng: StdRng,

    // UI State
    pub mode: Mode,
    pub show_help: bool,
    pub status_message: Option<(Cow<'static, str>, Instant)>,
    pub needs_redraw: bool,
}

impl App {
    pub fn new(book: QuoteBook, config: Config, config_dir: PathBuf) -> Result<Self> {
        let settings = SyncSettings::from_config(&config).context("Invalid sync settings")?;
        let http_client = build_http_client(settings.timeout)?;
        let sync = SyncAgent::new(http_client, settings);

        let theme_variant = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "Unknown theme in config, using dark");
            ThemeVariant::Dark
        });

        let categories = book.categories();

        Ok(Self {
            book,
            config,
            config_dir,
            sync,
            sync_handle: None,
            sync_task: None,
            last_synced_at: None,
            last_sync_error: None,
            theme_variant,
            theme: StyleMap::from_palette(&theme_variant.palette()),
            categories,
            selected_category: 0,
            filter: CategoryFilter::All,
            current: Selection::Empty,
            rng: StdRng::from_entropy(),
            mode: Mode::Browse,
            show_help: false,
            status_message: None,
            needs_redraw: true,
        })
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant and return its name.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    // ========================================================================
    // Session
    // ========================================================================

    /// Restore the persisted filter and redisplay the last viewed quote.
    ///
    /// Without a last viewed quote a fresh one is picked under the filter.
    /// Storage read failures are logged and treated as "nothing stored".
    pub async fn restore_session(&mut self) {
        match self.book.db().restore_selected_category().await {
            Ok(Some(filter)) => self.filter = filter,
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Failed to restore selected category"),
        }
        self.sync_category_cursor();

        let last = match self.book.db().restore_last_viewed().await {
            Ok(last) => last,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to restore last viewed quote");
                None
            }
        };

        match last {
            Some(quote) => {
                tracing::debug!(category = %quote.category, "Redisplaying last viewed quote");
                self.current = Selection::Quote(quote);
            }
            None => self.next_quote().await,
        }
        self.needs_redraw = true;
    }

    /// Close the session: clear session-scoped slots.
    pub async fn end_session(&self) {
        if let Err(e) = self.book.db().end_session().await {
            tracing::warn!(error = %e, "Failed to clear session storage");
        }
    }

    // ========================================================================
    // Selection and Filtering
    // ========================================================================

    /// Pick a new quote under the current filter.
    pub async fn next_quote(&mut self) {
        self.current = self.book.pick(&self.filter, &mut self.rng).await;
        self.needs_redraw = true;
    }

    pub fn category_up(&mut self) -> bool {
        if self.selected_category == 0 {
            return false;
        }
        self.selected_category -= 1;
        true
    }

    pub fn category_down(&mut self) -> bool {
        if self.selected_category + 1 >= self.categories.len() {
            return false;
        }
        self.selected_category += 1;
        true
    }

    /// Apply the category under the cursor as the filter, persist it and
    /// show a quote from it.
    pub async fn apply_selected_category(&mut self) {
        let Some(name) = self.categories.get(self.selected_category) else {
            return;
        };
        self.filter = CategoryFilter::from_label(name);
        if let Err(e) = self.book.db().save_selected_category(&self.filter).await {
            tracing::warn!(error = %e, "Failed to save selected category");
        }
        self.next_quote().await;
    }

    /// Recompute the Category Index after a mutation.
    pub fn refresh_categories(&mut self) {
        self.categories = self.book.categories();
        self.sync_category_cursor();
    }

    /// Point the cursor at the applied filter, or clamp it if the filter's
    /// category is gone.
    fn sync_category_cursor(&mut self) {
        if let Some(idx) = self
            .categories
            .iter()
            .position(|c| c == self.filter.as_str())
        {
            self.selected_category = idx;
        } else {
            self.selected_category = self
                .selected_category
                .min(self.categories.len().saturating_sub(1));
        }
    }

    // ========================================================================
    // Add / Import / Export
    // ========================================================================

    pub fn open_add_form(&mut self) {
        self.mode = Mode::AddForm(AddForm::default());
    }

    pub fn open_import_prompt(&mut self) {
        self.mode = Mode::ImportPrompt {
            input: String::new(),
        };
    }

    pub fn close_overlay(&mut self) {
        self.mode = Mode::Browse;
    }

    /// Submit the add form.
    ///
    /// Returns the stored quote on success so the caller can push it. A
    /// validation error keeps the form open with the message; a storage
    /// error closes it and reports in the status bar.
    pub async fn submit_add_form(&mut self) -> Option<Quote> {
        let Mode::AddForm(form) = &self.mode else {
            return None;
        };
        let (text, category) = (form.text.clone(), form.category.clone());

        match self.book.add(&text, &category).await {
            Ok(quote) => {
                self.mode = Mode::Browse;
                self.refresh_categories();
                self.set_status("Quote added");
                Some(quote)
            }
            Err(e) => {
                match e.downcast_ref::<QuoteError>() {
                    Some(qe) if qe.is_validation() => {
                        if let Mode::AddForm(form) = &mut self.mode {
                            form.error = Some(qe.to_string());
                        }
                    }
                    _ => {
                        tracing::error!(error = %e, "Failed to add quote");
                        self.mode = Mode::Browse;
                        self.set_status(format!("Error: {:#}", e));
                    }
                }
                None
            }
        }
    }

    /// Import quotes from a JSON file and report the result in the status bar.
    pub async fn import_from(&mut self, path: &Path) {
        match self.book.import_file(path).await {
            Ok(0) => self.set_status("No quotes in file"),
            Ok(count) => {
                self.refresh_categories();
                self.set_status(format!("Imported {} quotes", count));
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Import failed");
                self.set_status(format!("Import failed: {:#}", e));
            }
        }
    }

    pub fn export_path(&self) -> PathBuf {
        self.config_dir.join(EXPORT_FILE_NAME)
    }

    // ========================================================================
    // Sync
    // ========================================================================

    /// Merge a fetched batch into the store.
    ///
    /// Only a batch that adds something refreshes the categories and
    /// notifies. Failures are not notified; the fetcher already logged them
    /// and the status bar shows a marker until the next good sync.
    pub async fn apply_sync_batch(&mut self, result: Result<Vec<Quote>, String>) {
        let batch = match result {
            Ok(batch) => batch,
            Err(error) => {
                self.last_sync_error = Some(error);
                return;
            }
        };

        match self.book.merge_remote(batch).await {
            Ok(added) => {
                self.last_synced_at = Some(Local::now());
                self.last_sync_error = None;
                if !added.is_empty() {
                    self.refresh_categories();
                    let noun = if added.len() == 1 { "quote" } else { "quotes" };
                    self.set_status(format!("Synced {} new {} from server", added.len(), noun));
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to store synced quotes");
                self.last_sync_error = Some(format!("{:#}", e));
            }
        }
    }

    /// Whether a fetch is running, from either the timer or a manual trigger.
    pub fn is_syncing(&self) -> bool {
        self.sync.is_syncing()
    }

    pub fn stop_sync(&mut self) {
        if let Some(handle) = self.sync_handle.take() {
            handle.stop();
        }
        if let Some(task) = self.sync_task.take() {
            task.abort();
        }
    }

    // ========================================================================
    // Status
    // ========================================================================

    /// Set status message (will auto-expire after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Clear status message if expired (older than 3 seconds)
    /// Returns true if a message was actually cleared
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}

/// Abort background sync tasks when the app goes away.
impl Drop for App {
    fn drop(&mut self) {
        self.stop_sync();
    }
}
