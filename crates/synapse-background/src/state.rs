//! Background animation state management.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::{Frame, layout::Rect, symbols::Marker, widgets::canvas::Canvas};
use synapse_core::{AnimationStyle, FloatingConfig, LayeredConfig, Rgb, ShapeFieldConfig, Surface};
use tracing::debug;

use crate::animations::floating::{self, FloatingNeuron};
use crate::animations::layered::LayeredNetwork;
use crate::animations::shapes::{self, Shape};
use crate::color::to_terminal;
use crate::surface::CanvasSurface;

/// Braille dots per terminal column.
const DOTS_PER_COLUMN: f64 = 2.0;
/// Braille dots per terminal row.
const DOTS_PER_ROW: f64 = 4.0;

/// Everything the animators need besides their entities.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Colour translucent drawing is blended against.
    pub backdrop: Rgb,
    pub shapes: ShapeFieldConfig,
    pub layered: LayeredConfig,
    pub floating: FloatingConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backdrop: Rgb::new(15, 23, 42),
            shapes: ShapeFieldConfig::default(),
            layered: LayeredConfig::default(),
            floating: FloatingConfig::default(),
        }
    }
}

/// Entities of the active animation.
#[derive(Debug, Clone)]
enum Scene {
    Empty,
    Shapes(Vec<Shape>),
    Layered(LayeredNetwork),
    Floating(Vec<FloatingNeuron>),
}

impl Scene {
    fn style(&self) -> Option<AnimationStyle> {
        match self {
            Scene::Empty => None,
            Scene::Shapes(_) => Some(AnimationStyle::ShapeField),
            Scene::Layered(_) => Some(AnimationStyle::LayeredNetwork),
            Scene::Floating(_) => Some(AnimationStyle::FloatingNetwork),
        }
    }

    fn len(&self) -> usize {
        match self {
            Scene::Empty => 0,
            Scene::Shapes(shapes) => shapes.len(),
            Scene::Layered(network) => network.len(),
            Scene::Floating(neurons) => neurons.len(),
        }
    }
}

/// Background animation state.
///
/// Owns the entities of the active animation and rebuilds them whenever the
/// style or the surface size changes.
#[derive(Debug)]
pub struct BackgroundState {
    settings: Settings,
    scene: Scene,
    /// Surface width the scene was built for, in dots.
    last_width: f64,
    /// Surface height the scene was built for, in dots.
    last_height: f64,
    rng: SmallRng,
    seed: u64,
    /// Number of scene rebuilds so far.
    generation: u64,
}

impl BackgroundState {
    /// Create a new background state with a fixed seed.
    pub fn new(seed: u64, settings: Settings) -> Self {
        Self {
            settings,
            scene: Scene::Empty,
            last_width: 0.0,
            last_height: 0.0,
            rng: SmallRng::seed_from_u64(seed),
            seed,
            generation: 0,
        }
    }

    /// Create a new background state seeded from the system clock.
    pub fn from_clock(settings: Settings) -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};

        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::new(seed, settings)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Number of times the scene has been rebuilt.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of entities in the current scene.
    pub fn entity_count(&self) -> usize {
        self.scene.len()
    }

    /// Style of the current scene, if one has been built.
    pub fn style(&self) -> Option<AnimationStyle> {
        self.scene.style()
    }

    /// Replace the settings; the scene is rebuilt on the next update.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.scene = Scene::Empty;
    }

    /// Restart the random generator; the scene is rebuilt on the next update.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = SmallRng::seed_from_u64(seed);
        self.scene = Scene::Empty;
    }

    /// Advance the animation by one frame on a surface of the given size in
    /// dots, building a fresh scene first if needed.
    pub fn update(&mut self, style: AnimationStyle, width: f64, height: f64) {
        let resized = width != self.last_width || height != self.last_height;
        if resized || self.scene.style() != Some(style) {
            self.rebuild(style, width, height);
        }

        match &mut self.scene {
            Scene::Empty => {}
            Scene::Shapes(shapes) => shapes::advance(shapes, width, height),
            Scene::Layered(network) => network.advance(&self.settings.layered),
            Scene::Floating(neurons) => floating::advance(neurons, &self.settings.floating),
        }
    }

    fn rebuild(&mut self, style: AnimationStyle, width: f64, height: f64) {
        let settings = &self.settings;
        let rng = &mut self.rng;
        self.scene = match style {
            AnimationStyle::ShapeField => {
                Scene::Shapes(shapes::create(width, height, &settings.shapes, rng))
            }
            AnimationStyle::LayeredNetwork => {
                Scene::Layered(LayeredNetwork::create(width, height, &settings.layered, rng))
            }
            AnimationStyle::FloatingNetwork => Scene::Floating(floating::create(
                width,
                height,
                settings.floating.neuron_count,
                rng,
            )),
        };
        self.last_width = width;
        self.last_height = height;
        self.generation += 1;
        debug!(
            ?style,
            width,
            height,
            entities = self.scene.len(),
            generation = self.generation,
            "rebuilt background scene"
        );
    }

    /// Clear the surface and draw the current scene.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear();
        match &self.scene {
            Scene::Empty => {}
            Scene::Shapes(shapes) => shapes::render(surface, shapes, &self.settings.shapes),
            Scene::Layered(network) => network.render(surface, &self.settings.layered),
            Scene::Floating(neurons) => floating::render(surface, neurons, &self.settings.floating),
        }
    }

    /// Advance one frame and render the background into `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, style: AnimationStyle) {
        let width = f64::from(area.width) * DOTS_PER_COLUMN;
        let height = f64::from(area.height) * DOTS_PER_ROW;
        self.update(style, width, height);

        let state = &*self;
        let backdrop = state.settings.backdrop;
        let canvas = Canvas::default()
            .background_color(to_terminal(backdrop))
            .marker(Marker::Braille)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(move |ctx| {
                let mut surface = CanvasSurface::new(ctx, height, backdrop);
                state.draw(&mut surface);
            });
        frame.render_widget(canvas, area);
    }
}
