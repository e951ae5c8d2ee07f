use std::path::Path;

use anyhow::Result;
use raylib::prelude::{Color, Rectangle, Vector2};

use crate::input::KeySet;

/// Handle to a texture held by a [`TextureStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

/// What a screen wants after its per-frame update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    GoTo(usize),
}

/// Per-frame input handed to the current screen.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Host clock in seconds, pushed once per frame.
    pub now: f64,
    pub keys: KeySet,
}

impl FrameInput {
    pub fn new(now: f64, keys: KeySet) -> Self {
        Self { now, keys }
    }
}

/// Loads and releases GPU textures.
pub trait TextureStore {
    fn load(&mut self, path: &Path) -> Result<TextureId>;
    fn unload(&mut self, id: TextureId);
}

/// Immediate-mode drawing surface for one frame.
pub trait Canvas {
    fn width(&self) -> i32;
    fn height(&self) -> i32;

    fn clear(&mut self, color: Color);
    fn measure_text(&self, text: &str, font_size: i32) -> i32;
    fn draw_text(&mut self, text: &str, x: i32, y: i32, font_size: i32, color: Color);

    fn texture_size(&self, id: TextureId) -> Option<(i32, i32)>;
    fn draw_texture(&mut self, id: TextureId, position: Vector2, scale: f32, tint: Color);
    fn draw_texture_stretched(&mut self, id: TextureId, dest: Rectangle, tint: Color);
}

/// One slide of the presentation.
///
/// Screens are built up front but only the current one holds loaded
/// resources: `load` runs when it becomes current, `unload` when the
/// manager navigates away.
pub trait Screen {
    fn load(&mut self, store: &mut dyn TextureStore) -> Result<()>;
    fn unload(&mut self, store: &mut dyn TextureStore);
    fn update(&mut self, frame: &FrameInput) -> Transition;
    fn draw(&self, canvas: &mut dyn Canvas);

    /// Short label used in logs.
    fn name(&self) -> &str {
        "slide"
    }
}
