use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Stylize},
    text::Line,
};
use synapse_background::{BackgroundState, Settings, to_terminal};
use synapse_config::Config;
use synapse_core::AnimationStyle;
use tracing::{info, warn};

mod logging;

/// Step between seeds when reseeding a fixed-seed run.
const SEED_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Some(path) = logging::init_tracing()? {
        info!(path = %path.display(), "logging to file");
    }
    let config = Config::load()?;

    let terminal = ratatui::init();
    let result = App::new(config).run(terminal);
    ratatui::restore();
    result
}

/// Animation settings taken from the user configuration.
fn settings_from(config: &Config) -> Settings {
    Settings {
        backdrop: config.backdrop,
        shapes: config.shapes.clone(),
        layered: config.layered.clone(),
        floating: config.floating.clone(),
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// User configuration.
    config: Config,
    /// Active animation and its entities.
    background: BackgroundState,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        let settings = settings_from(&config);
        let background = match config.seed {
            Some(seed) => BackgroundState::new(seed, settings),
            None => BackgroundState::from_clock(settings),
        };
        info!(
            style = config.style.label(),
            seed = background.seed(),
            fps = config.fps,
            "starting synapse"
        );
        Self {
            running: false,
            config,
            background,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        info!("exiting");
        Ok(())
    }

    /// Colour used for the help footer, taken from the active animation.
    fn accent(&self) -> Color {
        let color = match self.config.style {
            AnimationStyle::ShapeField => self.config.shapes.primary_color,
            AnimationStyle::LayeredNetwork => self.config.layered.color,
            AnimationStyle::FloatingNetwork => self.config.floating.base_color,
        };
        to_terminal(color)
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [_, footer] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

        self.background.render(frame, area, self.config.style);

        let color = self.accent();
        let help = Line::from(vec![
            self.config.style.label().bold().fg(color),
            "  ".into(),
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "n".bold().fg(color),
            " next animation  ".dark_gray(),
            "r".bold().fg(color),
            " reseed".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, footer);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls with a one-frame timeout so the animation keeps running.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.config.frame_interval())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                // The next draw picks up the new size.
                Event::Resize(_, _) => {}
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
            (_, KeyCode::Char('n')) => self.next_style(),
            (_, KeyCode::Char('r')) => self.reseed(),
            _ => {}
        }
    }

    /// Switch to the next animation and remember it for the next run.
    fn next_style(&mut self) {
        self.config.style = self.config.style.next();
        info!(style = self.config.style.label(), "switched animation");
        if let Err(err) = self.config.save() {
            warn!(error = %err, "failed to save config");
        }
    }

    /// Restart the active animation with a new seed.
    fn reseed(&mut self) {
        let seed = self.background.seed().wrapping_add(SEED_STEP);
        self.background.reseed(seed);
        info!(seed, "reseeded background");
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        App::new(Config {
            seed: Some(42),
            ..Config::default()
        })
    }

    #[test]
    fn test_settings_follow_config() {
        let mut config = Config::default();
        config.shapes.shape_count = 3;
        config.floating.line_width = Some(2.0);
        let settings = settings_from(&config);
        assert_eq!(settings.backdrop, config.backdrop);
        assert_eq!(settings.shapes.shape_count, 3);
        assert_eq!(settings.floating.line_width, Some(2.0));
    }

    #[test]
    fn test_fixed_seed_is_used() {
        assert_eq!(app().background.seed(), 42);
    }

    #[test]
    fn test_quit_keys() {
        for key in [
            press(KeyCode::Char('q')),
            press(KeyCode::Esc),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = app();
            app.running = true;
            app.on_key_event(key);
            assert!(!app.running);
        }
    }

    #[test]
    fn test_reseed_key_changes_seed() {
        let mut app = app();
        app.on_key_event(press(KeyCode::Char('r')));
        assert_eq!(app.background.seed(), 42u64.wrapping_add(SEED_STEP));
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut app = app();
        app.running = true;
        app.on_key_event(press(KeyCode::Char('x')));
        assert!(app.running);
        assert_eq!(app.config.style, AnimationStyle::default());
    }
}
