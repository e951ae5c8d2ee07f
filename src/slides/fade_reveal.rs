use std::path::PathBuf;

use anyhow::Result;
use raylib::prelude::{Color, Rectangle};

use crate::animation::{AnimationTimer, FadeIn};
use crate::constants::*;
use crate::input::Key;
use crate::screen::{Canvas, FrameInput, Screen, TextureId, TextureStore, Transition};
use crate::slides::{draw_missing, load_textures, release_textures};
use crate::state::RevealState;

/// Full-bleed background with a two-step interaction: the first trigger
/// fades a second image in, the second starts a frame loop on top of it.
pub struct FadeRevealSlide {
    background: PathBuf,
    reveal: PathBuf,
    frames: Vec<PathBuf>,
    trigger: Key,
    continue_to: Option<usize>,

    textures: Vec<TextureId>, // background, reveal, then frames
    missing: Option<PathBuf>,
    state: RevealState,
    now: f64,
}

impl FadeRevealSlide {
    pub fn new(background: impl Into<PathBuf>, reveal: impl Into<PathBuf>, frames: Vec<PathBuf>) -> Self {
        Self {
            background: background.into(),
            reveal: reveal.into(),
            frames,
            trigger: Key::Down,
            continue_to: None,
            textures: Vec::new(),
            missing: None,
            state: RevealState::Idle,
            now: 0.0,
        }
    }

    pub fn with_trigger(mut self, trigger: Key) -> Self {
        self.trigger = trigger;
        self
    }

    /// After the loop has started, one more trigger jumps to `index`.
    pub fn continue_to(mut self, index: usize) -> Self {
        self.continue_to = Some(index);
        self
    }

    #[cfg(test)]
    pub fn state(&self) -> RevealState {
        self.state
    }
}

impl Screen for FadeRevealSlide {
    fn load(&mut self, store: &mut dyn TextureStore) -> Result<()> {
        release_textures(store, &mut self.textures);
        self.state = RevealState::Idle;
        self.missing = None;

        let mut paths = vec![self.background.clone(), self.reveal.clone()];
        paths.extend(self.frames.iter().cloned());
        self.textures = load_textures(store, &paths).map_err(|failure| {
            self.missing = Some(failure.path);
            failure.error
        })?;
        Ok(())
    }

    fn unload(&mut self, store: &mut dyn TextureStore) {
        release_textures(store, &mut self.textures);
        self.state = RevealState::Idle;
    }

    fn update(&mut self, frame: &FrameInput) -> Transition {
        self.now = frame.now;
        if !frame.keys.contains(self.trigger) {
            return Transition::Stay;
        }

        match self.state {
            RevealState::Idle => {
                self.state = RevealState::Revealing { fade: FadeIn::new(frame.now, FADE_DURATION) };
            }
            RevealState::Revealing { fade } => {
                let timer = AnimationTimer::new(frame.now, FRAME_DURATION, self.frames.len());
                self.state = RevealState::Looping { fade, timer };
            }
            RevealState::Looping { .. } => {
                if let Some(index) = self.continue_to {
                    return Transition::GoTo(index);
                }
            }
        }
        Transition::Stay
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        if self.textures.len() < 2 {
            draw_missing(canvas, self.missing.as_deref().unwrap_or(&self.background));
            return;
        }

        let full = Rectangle::new(0.0, 0.0, canvas.width() as f32, canvas.height() as f32);
        canvas.clear(Color::BLACK);
        canvas.draw_texture_stretched(self.textures[0], full, Color::WHITE);

        match self.state {
            RevealState::Idle => {}
            RevealState::Revealing { fade } => {
                let tint = Color::new(255, 255, 255, fade.alpha(self.now));
                canvas.draw_texture_stretched(self.textures[1], full, tint);
            }
            RevealState::Looping { fade, timer } => {
                let tint = Color::new(255, 255, 255, fade.alpha(self.now));
                canvas.draw_texture_stretched(self.textures[1], full, tint);
                if let Some(&id) = self.textures[2..].get(timer.frame(self.now)) {
                    canvas.draw_texture_stretched(id, full, Color::WHITE);
                }
            }
        }
    }

    fn name(&self) -> &str {
        "fade-reveal"
    }
}
