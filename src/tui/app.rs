//! Application state and event loop

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use futures::future::AbortHandle;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget, DefaultTerminal, Frame};

use crate::config::Config;
use crate::services::{Aggregator, HttpPricingApi};
use crate::types::{PriceHistoryEntry, PricedProduct, ProductId};

use super::loader::{LoadEvent, LoadRequest, Loader};
use super::theme::Theme;
use super::widgets::{
    help::HelpPopup,
    product_table::ProductTable,
    spinner::{LoadingStage, Spinner},
    trend_modal::TrendModal,
};

/// Application state
#[derive(Debug)]
pub enum AppState {
    /// Products are loading, spinner animating
    Loading { spinner_frame: usize },
    /// Product list received (possibly empty)
    Ready { products: Vec<PricedProduct> },
}

/// Open trend modal
#[derive(Debug)]
pub struct TrendModalState {
    pub product: PricedProduct,
    /// None until the history arrives
    pub history: Option<Vec<PriceHistoryEntry>>,
    abort: Option<AbortHandle>,
}

/// Work the event handler asks the loop to start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    LoadProducts,
    LoadHistory(ProductId),
}

impl From<Command> for LoadRequest {
    fn from(command: Command) -> Self {
        match command {
            Command::LoadProducts => LoadRequest::Products,
            Command::LoadHistory(id) => LoadRequest::History(id),
        }
    }
}

/// Main application
pub struct App {
    state: AppState,
    theme: Theme,
    selected: usize,
    modal: Option<TrendModalState>,
    /// Frame counter for the modal's spinner
    modal_frame: usize,
    show_help: bool,
    should_quit: bool,
    products_abort: Option<AbortHandle>,
}

impl App {
    /// Create a new app in loading state
    pub fn new(theme: Theme) -> Self {
        Self {
            state: AppState::Loading { spinner_frame: 0 },
            theme,
            selected: 0,
            modal: None,
            modal_frame: 0,
            show_help: false,
            should_quit: false,
            products_abort: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn modal(&self) -> Option<&TrendModalState> {
        self.modal.as_ref()
    }

    fn products(&self) -> &[PricedProduct] {
        match &self.state {
            AppState::Ready { products } => products,
            AppState::Loading { .. } => &[],
        }
    }

    /// Handle keyboard events; returns the load to start, if any
    pub fn handle_event(&mut self, event: Event) -> Option<Command> {
        let Event::Key(key) = event else {
            return None;
        };
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return None;
        }

        if self.modal.is_some() {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('c') | KeyCode::Char('C')
            ) {
                self.close_modal();
            }
            return None;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return None;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.quit();
                None
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let last = self.products().len().saturating_sub(1);
                self.selected = (self.selected + 1).min(last);
                None
            }
            KeyCode::Enter => self.open_modal(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.reload(),
            _ => None,
        }
    }

    fn open_modal(&mut self) -> Option<Command> {
        let product = self.products().get(self.selected)?.clone();
        let id = product.id;
        self.modal = Some(TrendModalState {
            product,
            history: None,
            abort: None,
        });
        self.modal_frame = 0;
        Some(Command::LoadHistory(id))
    }

    fn close_modal(&mut self) {
        if let Some(modal) = self.modal.take() {
            if let Some(abort) = modal.abort {
                abort.abort();
            }
        }
    }

    fn reload(&mut self) -> Option<Command> {
        if matches!(self.state, AppState::Loading { .. }) {
            return None;
        }
        self.state = AppState::Loading { spinner_frame: 0 };
        self.selected = 0;
        Some(Command::LoadProducts)
    }

    fn quit(&mut self) {
        self.close_modal();
        if let Some(abort) = self.products_abort.take() {
            abort.abort();
        }
        self.should_quit = true;
    }

    /// Remember the handle for the load `command` started
    pub fn attach_abort(&mut self, command: Command, handle: AbortHandle) {
        match command {
            Command::LoadProducts => self.products_abort = Some(handle),
            Command::LoadHistory(id) => match &mut self.modal {
                Some(modal) if modal.product.id == id => modal.abort = Some(handle),
                _ => handle.abort(),
            },
        }
    }

    /// Apply a finished load. History for a modal that has since closed or
    /// switched product is dropped.
    pub fn apply_event(&mut self, event: LoadEvent) {
        match event {
            LoadEvent::Products(products) => {
                self.products_abort = None;
                self.selected = self.selected.min(products.len().saturating_sub(1));
                self.state = AppState::Ready { products };
            }
            LoadEvent::History { id, entries } => match &mut self.modal {
                Some(modal) if modal.product.id == id => {
                    modal.history = Some(entries);
                    modal.abort = None;
                }
                _ => log::debug!("Dropping stale price history for product {}", id),
            },
        }
    }

    /// Update spinner animation
    pub fn tick(&mut self) {
        if let AppState::Loading { spinner_frame } = &mut self.state {
            *spinner_frame = Spinner::next_frame(*spinner_frame);
        }
        if self.modal.as_ref().is_some_and(|m| m.history.is_none()) {
            self.modal_frame = Spinner::next_frame(self.modal_frame);
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Draw the application
    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match &self.state {
            AppState::Loading { spinner_frame } => {
                Spinner::new(*spinner_frame, LoadingStage::Products, self.theme).render(area, buf);
            }
            AppState::Ready { products } => {
                ProductTable::new(products, self.selected, self.theme).render(area, buf);
            }
        }

        if let Some(modal) = &self.modal {
            let popup_area = TrendModal::centered_area(area);
            TrendModal::new(
                &modal.product,
                modal.history.as_deref(),
                self.modal_frame,
                self.theme,
            )
            .render(popup_area, buf);
        }

        if self.show_help {
            let popup_area = HelpPopup::centered_area(area);
            HelpPopup::new(self.theme).render(popup_area, buf);
        }
    }
}

/// Run the TUI application
pub fn run(config: &Config) -> anyhow::Result<()> {
    let api = HttpPricingApi::new(config)?;
    let aggregator = Aggregator::new(api, config.product_count, config.join_policy);
    let loader = Loader::spawn(aggregator)?;

    // Detect before raw mode
    let theme = Theme::detect();
    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, App::new(theme), &loader);
    ratatui::restore();
    result
}

fn start(app: &mut App, loader: &Loader, command: Command) {
    let handle = loader.request(command.into());
    app.attach_abort(command, handle);
}

fn run_app(terminal: &mut DefaultTerminal, mut app: App, loader: &Loader) -> anyhow::Result<()> {
    start(&mut app, loader, Command::LoadProducts);

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        // Non-blocking
        while let Some(event) = loader.try_recv() {
            app.apply_event(event);
        }

        // Poll for events with 100ms timeout for spinner animation
        if event::poll(Duration::from_millis(100))? {
            if let Some(command) = app.handle_event(event::read()?) {
                start(&mut app, loader, command);
            }
        } else {
            app.tick();
        }
    }

    Ok(())
}
