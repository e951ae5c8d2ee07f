use std::path::PathBuf;

use anyhow::Result;
use raylib::prelude::{Color, Vector2};

use crate::animation::AnimationTimer;
use crate::constants::*;
use crate::input::Key;
use crate::screen::{Canvas, FrameInput, Screen, TextureId, TextureStore, Transition};
use crate::slides::{draw_missing, load_textures, release_textures};
use crate::state::LoopState;

/// One animated sprite drawn at a fixed screen position.
#[derive(Debug, Clone)]
pub struct SpriteLayer {
    pub frames: Vec<PathBuf>,
    pub position: Vector2,
}

impl SpriteLayer {
    pub fn new(frames: Vec<PathBuf>, position: Vector2) -> Self {
        Self { frames, position }
    }
}

/// Fixed-position background; a trigger latches a loop that plays every
/// layer in lockstep until the slide is left.
pub struct SpriteLoopSlide {
    background: PathBuf,
    position: Vector2,
    layers: Vec<SpriteLayer>,
    trigger: Key,

    background_texture: Option<TextureId>,
    layer_textures: Vec<Vec<TextureId>>,
    missing: Option<PathBuf>,
    state: LoopState,
    now: f64,
}

impl SpriteLoopSlide {
    pub fn new(background: impl Into<PathBuf>, position: Vector2, layers: Vec<SpriteLayer>) -> Self {
        Self {
            background: background.into(),
            position,
            layers,
            trigger: Key::Down,
            background_texture: None,
            layer_textures: Vec::new(),
            missing: None,
            state: LoopState::Idle,
            now: 0.0,
        }
    }

    pub fn with_trigger(mut self, trigger: Key) -> Self {
        self.trigger = trigger;
        self
    }

    #[cfg(test)]
    pub fn state(&self) -> LoopState {
        self.state
    }

    fn frame_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.frames.len()).max().unwrap_or(0)
    }

    fn release(&mut self, store: &mut dyn TextureStore) {
        if let Some(id) = self.background_texture.take() {
            store.unload(id);
        }
        for mut ids in self.layer_textures.drain(..) {
            release_textures(store, &mut ids);
        }
    }
}

impl Screen for SpriteLoopSlide {
    fn load(&mut self, store: &mut dyn TextureStore) -> Result<()> {
        self.release(store);
        self.state = LoopState::Idle;
        self.missing = None;

        let mut paths = vec![self.background.clone()];
        for layer in &self.layers {
            paths.extend(layer.frames.iter().cloned());
        }
        let mut ids = load_textures(store, &paths)
            .map_err(|failure| {
                self.missing = Some(failure.path);
                failure.error
            })?
            .into_iter();

        self.background_texture = ids.next();
        for layer in &self.layers {
            self.layer_textures.push(ids.by_ref().take(layer.frames.len()).collect());
        }
        Ok(())
    }

    fn unload(&mut self, store: &mut dyn TextureStore) {
        self.release(store);
        self.state = LoopState::Idle;
    }

    fn update(&mut self, frame: &FrameInput) -> Transition {
        self.now = frame.now;
        if self.state == LoopState::Idle && frame.keys.contains(self.trigger) {
            self.state = LoopState::Looping(AnimationTimer::new(frame.now, FRAME_DURATION, self.frame_count()));
        }
        Transition::Stay
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let Some(background) = self.background_texture else {
            draw_missing(canvas, self.missing.as_deref().unwrap_or(&self.background));
            return;
        };

        canvas.clear(Color::BLACK);
        canvas.draw_texture(background, self.position, 1.0, Color::WHITE);

        let LoopState::Looping(timer) = self.state else {
            return;
        };
        let frame = timer.frame(self.now);
        for (layer, ids) in self.layers.iter().zip(&self.layer_textures) {
            if ids.is_empty() {
                continue;
            }
            canvas.draw_texture(ids[frame % ids.len()], layer.position, 1.0, Color::WHITE);
        }
    }

    fn name(&self) -> &str {
        "sprite-loop"
    }
}
