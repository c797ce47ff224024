//! The terminal host: owns the effects controller and feeds it input and time.

use std::time::{Duration, Instant};

use cinefx_config::Config;
use cinefx_core::{Point, Viewport};
use cinefx_effects::{EffectsController, MemoryDocument, SeededRandom};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::{DefaultTerminal, Frame};

use crate::page::{HoverEvent, HoverTracker, Page};
use crate::stylesheet::Stylesheet;

/// Build a started controller on a fresh page of the given size.
pub fn build_effects(
    config: &Config,
    viewport: Viewport,
) -> (EffectsController<MemoryDocument, SeededRandom>, Page) {
    let mut doc = MemoryDocument::new(viewport);
    let page = Page::build(&mut doc, &config.cards);
    let random = config
        .seed
        .map(SeededRandom::from_seed)
        .unwrap_or_else(SeededRandom::from_entropy);
    let mut effects = EffectsController::mount(doc, random, config.effects.clone());
    effects.start();
    (effects, page)
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    effects: EffectsController<MemoryDocument, SeededRandom>,
    page: Page,
    hover: HoverTracker,
    stylesheet: Stylesheet,
    frame_interval: Duration,
    /// Wall clock the effect clock follows.
    epoch: Instant,
    /// Wall-clock milliseconds already fed to the effects.
    fed_ms: u64,
}

impl App {
    /// Construct a new instance of [`App`] for a terminal of `width` x `height`.
    pub fn new(config: &Config, width: u16, height: u16) -> Self {
        let (effects, page) = build_effects(config, cell_viewport(width, height));
        Self {
            running: false,
            effects,
            page,
            hover: HoverTracker::default(),
            stylesheet: Stylesheet::new(),
            frame_interval: Duration::from_millis(config.frame_ms),
            epoch: Instant::now(),
            fed_ms: 0,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            self.tick();
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        tracing::info!(stats = ?self.effects.stats(), "exiting");
        Ok(())
    }

    /// Advance the effects by the wall-clock time since the last tick.
    fn tick(&mut self) {
        let elapsed = self.epoch.elapsed().as_millis() as u64;
        let delta = elapsed.saturating_sub(self.fed_ms);
        self.fed_ms = elapsed;
        self.effects.advance(delta);
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        self.stylesheet.render(
            frame,
            self.effects.document(),
            &self.page,
            self.effects.now_ms(),
        );
    }

    /// Reads the crossterm events and updates the state of [`App`].
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.frame_interval)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(width, height) => self.on_resize(width, height),
                Event::FocusLost => self.leave_cards(),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('p')) => self.toggle_effects(),
            _ => {}
        }
    }

    /// Route pointer movement to the spotlight and the cards.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if !matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
            return;
        }
        // Aim at the middle of the cell.
        let pointer = Point::new(mouse.column as f64 + 0.5, mouse.row as f64 + 0.5);
        self.effects.pointer_moved(pointer);

        let events = self
            .hover
            .route(self.effects.document(), self.effects.cards(), pointer);
        for event in events {
            match event {
                HoverEvent::Moved(card) => {
                    self.effects.card_pointer_moved(card, pointer);
                }
                HoverEvent::Left(card) => self.effects.card_pointer_left(card),
            }
        }
    }

    fn on_resize(&mut self, width: u16, height: u16) {
        self.leave_cards();
        self.page
            .resize(self.effects.document_mut(), cell_viewport(width, height));
        tracing::debug!(width, height, "resized");
    }

    fn leave_cards(&mut self) {
        if let Some(HoverEvent::Left(card)) = self.hover.clear() {
            self.effects.card_pointer_left(card);
        }
    }

    /// Pause or resume the particles and shooting stars.
    fn toggle_effects(&mut self) {
        if self.effects.is_running() {
            self.effects.stop();
        } else {
            self.effects.start();
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

fn cell_viewport(width: u16, height: u16) -> Viewport {
    Viewport::new(width as f64, height as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinefx_effects::Document;
    use crossterm::event::KeyEventState;

    fn app() -> App {
        let config = Config {
            seed: Some(11),
            ..Config::default()
        };
        App::new(&config, 120, 40)
    }

    fn mouse_at(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Moved,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_app_starts_effects() {
        let app = app();
        assert!(app.effects.is_running());
        assert_eq!(app.effects.particle_count(), 30);
        assert_eq!(app.effects.cards().len(), 4);
    }

    #[test]
    fn test_mouse_moves_spotlight_and_tilts_card() {
        let mut app = app();
        let card = app.effects.cards()[0];
        let rect = app.effects.document().bounding_rect(card);

        app.on_mouse_event(mouse_at(rect.left as u16 + 1, rect.top as u16 + 1));
        let doc = app.effects.document();
        assert!(doc.style(card, "transform").is_some());
        let spotlight = app.effects.spotlight().unwrap();
        assert!(doc.style(spotlight, "--x").is_some());

        app.on_mouse_event(mouse_at(0, 0));
        assert_eq!(app.effects.document().style(card, "transform"), None);
    }

    #[test]
    fn test_pause_key_toggles_effects() {
        let mut app = app();
        let key = KeyEvent {
            code: KeyCode::Char('p'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        app.on_key_event(key);
        assert!(!app.effects.is_running());
        assert_eq!(app.effects.particle_count(), 0);
        app.on_key_event(key);
        assert!(app.effects.is_running());
    }

    #[test]
    fn test_resize_clears_hover() {
        let mut app = app();
        let card = app.effects.cards()[1];
        let rect = app.effects.document().bounding_rect(card);
        app.on_mouse_event(mouse_at(rect.left as u16 + 2, rect.top as u16 + 2));
        assert!(app.effects.document().style(card, "transform").is_some());

        app.on_resize(60, 20);
        assert_eq!(app.effects.document().style(card, "transform"), None);
        assert_eq!(app.hover.hovered(), None);
    }
}
