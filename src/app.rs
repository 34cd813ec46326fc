use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use tracing::debug;

use crate::chain::Chain;
use crate::config::Config;
use crate::controller::RenderController;
use crate::event::{Event, Ticker};
use crate::ui::theme::Theme;

// ── Application State ─────────────────────────────────────────────────

pub struct App {
    pub config: Config,
    pub theme: Theme,
    pub controller: RenderController,
    pub should_quit: bool,
    /// Set whenever the picture changed; cleared by the main loop after drawing
    pub needs_redraw: bool,
}

impl App {
    pub fn new(config: Config, event_tx: mpsc::UnboundedSender<Event>) -> Self {
        let chain = Chain::new(config.chain_len(), config.animation.gap);
        let ticker = Ticker::new(event_tx, config.tick_period());
        Self {
            theme: Theme::from_config(&config.theme),
            controller: RenderController::new(chain, ticker),
            config,
            should_quit: false,
            needs_redraw: true,
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Click(_, _) => {
                if self.config.mouse_support {
                    self.tap();
                }
            }
            Event::Tick(generation) => {
                if self.controller.on_tick(generation).is_some() {
                    self.needs_redraw = true;
                }
            }
            Event::Resize(_w, _h) => {
                self.needs_redraw = true;
            }
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.tap(),
            _ => {}
        }
    }

    /// The single interaction signal
    pub fn tap(&mut self) {
        if self.controller.handle_interaction() {
            debug!(node = self.controller.chain().current_index(), "tap accepted");
            self.needs_redraw = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn new_app() -> (App, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (App::new(Config::default(), tx), rx)
    }

    #[tokio::test(start_paused = true)]
    async fn quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let (mut app, _rx) = new_app();
            app.handle_event(key(code));
            assert!(app.should_quit);
        }
        let (mut app, _rx) = new_app();
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.should_quit);
    }

    #[tokio::test(start_paused = true)]
    async fn space_and_click_start_the_chain() {
        let (mut app, _rx) = new_app();
        app.needs_redraw = false;
        app.handle_event(key(KeyCode::Char(' ')));
        assert!(app.controller.is_animating());
        assert!(app.needs_redraw);

        let (mut app, _rx) = new_app();
        app.handle_event(Event::Click(3, 4));
        assert!(app.controller.is_animating());
    }

    #[tokio::test(start_paused = true)]
    async fn clicks_ignored_without_mouse_support() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut config = Config::default();
        config.mouse_support = false;
        let mut app = App::new(config, tx);
        app.handle_event(Event::Click(0, 0));
        assert!(!app.controller.is_animating());

        let mut press = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        press.kind = KeyEventKind::Press;
        app.handle_event(Event::Key(press));
        assert!(app.controller.is_animating());
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_request_redraws_until_settled() {
        let (mut app, mut rx) = new_app();
        app.tap();
        let mut frames = 0;
        while app.controller.is_animating() {
            if let Some(event) = rx.recv().await {
                app.needs_redraw = false;
                app.handle_event(event);
                assert!(app.needs_redraw);
                frames += 1;
            }
        }
        assert!(frames >= 200);
        assert_eq!(app.controller.chain().current_index(), 1);
    }
}
