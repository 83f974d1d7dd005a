use crossterm::event::{KeyCode, KeyEvent};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use tokio::sync::mpsc;

use crate::catalog::{self, Catalog, CatalogError, Category, NameCollection, NameEntry};
use crate::sampler;

/// Columns in the result grid
pub const GRID_COLUMNS: usize = 2;

/// Seconds before a status message clears itself
const STATUS_TIMEOUT_SECS: u64 = 3;

/// Per-category lifecycle. Sampling is synchronous, so it never shows up here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    Loading,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Description,
    Help,
}

/// What the description overlay shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionView {
    pub title: String,
    pub body: String,
}

/// Background load outcome, tagged with the ticket it was issued under
struct LoadResult {
    ticket: u64,
    result: Result<NameCollection, CatalogError>,
}

pub struct App {
    pub catalog: Catalog,
    pub selected_category: usize,
    pub popup: Popup,

    // Active category
    pub state: PageState,
    pub collection: Option<NameCollection>,  // None until loaded, or after a failed load
    pub selection: Vec<NameEntry>,
    pub cursor: usize,
    pub description: Option<DescriptionView>,
    pub sample_size: usize,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,

    rng: StdRng,

    // Loads for categories we've since left are dropped by ticket
    load_ticket: u64,
    load_tx: mpsc::UnboundedSender<LoadResult>,
    load_rx: mpsc::UnboundedReceiver<LoadResult>,
}

impl App {
    pub fn new(catalog: Catalog, sample_size: usize, seed: Option<u64>) -> Self {
        let (load_tx, load_rx) = mpsc::unbounded_channel();
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            catalog,
            selected_category: 0,
            popup: Popup::None,

            state: PageState::Loading,
            collection: None,
            selection: Vec::new(),
            cursor: 0,
            description: None,
            sample_size,

            status_message: None,
            status_message_time: None,

            rng,

            load_ticket: 0,
            load_tx,
            load_rx,
        }
    }

    /// Set a status message (auto-clears after 3 seconds)
    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    pub fn current_category(&self) -> Option<&Category> {
        self.catalog.categories().get(self.selected_category)
    }

    /// Switch to a category and start loading it. Must run inside a tokio runtime.
    pub fn activate_category(&mut self, index: usize) {
        let Some(category) = self.catalog.categories().get(index).cloned() else {
            tracing::warn!("No category at index {}", index);
            return;
        };

        self.selected_category = index;
        self.state = PageState::Loading;
        self.collection = None;
        self.selection.clear();
        self.cursor = 0;
        self.description = None;
        self.popup = Popup::None;

        self.load_ticket += 1;
        let ticket = self.load_ticket;
        let tx = self.load_tx.clone();

        tracing::debug!("Loading category '{}' (ticket {})", category.id, ticket);
        tokio::spawn(async move {
            let result = catalog::load(&category).await;
            // Receiver only goes away on shutdown
            let _ = tx.send(LoadResult { ticket, result });
        });
    }

    fn accept_load(&mut self, ticket: u64, result: Result<NameCollection, CatalogError>) {
        if ticket != self.load_ticket {
            tracing::debug!("Dropping stale load (ticket {}, current {})", ticket, self.load_ticket);
            return;
        }

        match result {
            Ok(collection) => {
                if collection.is_empty() {
                    self.set_status("No data available");
                }
                self.collection = Some(collection);
            }
            Err(e) => {
                let id = self.current_category().map(|c| c.id.clone()).unwrap_or_default();
                tracing::warn!("Failed to load category '{}': {}", id, e);
                self.collection = None;
                self.set_status("No data available");
            }
        }
        self.state = PageState::Ready;
    }

    /// Draw a fresh selection. A no-op (with a status hint) while loading or
    /// when there is nothing to draw from; the old selection stays.
    pub fn generate(&mut self) {
        if self.state == PageState::Loading {
            self.set_status("Still loading…");
            return;
        }

        match self.collection.as_ref().filter(|c| !c.is_empty()) {
            Some(collection) => {
                self.selection = sampler::sample(collection.entries(), self.sample_size, &mut self.rng);
                self.cursor = 0;
                tracing::debug!("Generated {} names from '{}'", self.selection.len(), collection.key());
            }
            None => {
                tracing::warn!("Generate requested but no data is loaded");
                self.set_status("No data available");
            }
        }
    }

    /// Description of a name in the active collection (sentinel if unknown)
    pub fn describe(&self, name: &str) -> &str {
        let entries = self.collection.as_ref().map(|c| c.entries()).unwrap_or(&[]);
        sampler::describe(entries, name)
    }

    pub fn open_description(&mut self) {
        let Some(entry) = self.selection.get(self.cursor) else {
            return;
        };

        self.description = Some(DescriptionView {
            title: entry.name.clone(),
            body: self.describe(&entry.name).to_string(),
        });
        self.popup = Popup::Description;
    }

    fn close_popup(&mut self) {
        self.popup = Popup::None;
        self.description = None;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Handle popups first
        if self.popup != Popup::None {
            self.handle_popup_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('g') | KeyCode::Char(' ') => self.generate(),
            KeyCode::Enter => self.open_description(),

            // Grid navigation
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1, 0),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(0, -1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(0, 1),

            // Category switching
            KeyCode::Tab => self.next_category(),
            KeyCode::BackTab => self.prev_category(),
            KeyCode::Char('r') => {
                self.activate_category(self.selected_category);
                self.set_status("Reloading");
            }

            KeyCode::Char('?') => self.popup = Popup::Help,
            _ => {}
        }
    }

    fn handle_popup_key(&mut self, key: KeyEvent) {
        match self.popup {
            Popup::Description => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char(' ')) {
                    self.close_popup();
                }
            }
            Popup::Help => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter | KeyCode::Char('q')) {
                    self.close_popup();
                }
            }
            Popup::None => {}
        }
    }

    fn next_category(&mut self) {
        if self.catalog.is_empty() {
            return;
        }
        let next = (self.selected_category + 1) % self.catalog.len();
        self.activate_category(next);
    }

    fn prev_category(&mut self) {
        if self.catalog.is_empty() {
            return;
        }
        let prev = self
            .selected_category
            .checked_sub(1)
            .unwrap_or(self.catalog.len() - 1);
        self.activate_category(prev);
    }

    /// Move within the grid, clamped to the filled cells
    fn move_cursor(&mut self, dx: isize, dy: isize) {
        let len = self.selection.len();
        if len == 0 {
            return;
        }

        let col = (self.cursor % GRID_COLUMNS) as isize + dx;
        let row = (self.cursor / GRID_COLUMNS) as isize + dy;
        if col < 0 || col >= GRID_COLUMNS as isize || row < 0 {
            return;
        }

        let target = row as usize * GRID_COLUMNS + col as usize;
        if target < len {
            self.cursor = target;
        }
    }

    /// Apply finished loads and expire the status message
    pub fn tick(&mut self) {
        while let Ok(LoadResult { ticket, result }) = self.load_rx.try_recv() {
            self.accept_load(ticket, result);
        }

        // Clear status message after 3 seconds
        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() >= STATUS_TIMEOUT_SECS {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }
}
