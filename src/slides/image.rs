use std::path::PathBuf;

use anyhow::Result;
use raylib::prelude::{Color, Vector2};

use crate::constants::*;
use crate::screen::{Canvas, FrameInput, Screen, TextureId, TextureStore, Transition};
use crate::slides::draw_missing;

/// A single picture, centered and scaled down to fit the canvas.
pub struct ImageSlide {
    path: PathBuf,
    name: String,
    image: Option<TextureId>,
}

impl ImageSlide {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name, image: None }
    }
}

/// Scale too big images to fit the canvas, never enlarge small ones.
pub(crate) fn fit_scale(tex_width: i32, tex_height: i32, canvas_width: i32, canvas_height: i32) -> f32 {
    if tex_width > tex_height {
        if tex_width as f32 > canvas_width as f32 * FIT_RATIO {
            (canvas_width as f32 * FIT_RATIO) / tex_width as f32
        } else {
            1.0
        }
    } else {
        if tex_height as f32 > canvas_height as f32 * FIT_RATIO {
            (canvas_height as f32 * FIT_RATIO) / tex_height as f32
        } else {
            1.0
        }
    }
}

impl Screen for ImageSlide {
    fn load(&mut self, store: &mut dyn TextureStore) -> Result<()> {
        if self.image.is_none() {
            self.image = Some(store.load(&self.path)?);
        }
        Ok(())
    }

    fn unload(&mut self, store: &mut dyn TextureStore) {
        if let Some(id) = self.image.take() {
            store.unload(id);
        }
    }

    fn update(&mut self, _frame: &FrameInput) -> Transition {
        Transition::Stay
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        let Some(id) = self.image else {
            draw_missing(canvas, &self.path);
            return;
        };
        let Some((tex_width, tex_height)) = canvas.texture_size(id) else {
            return;
        };

        canvas.clear(Color::BLACK);

        let scale = fit_scale(tex_width, tex_height, canvas.width(), canvas.height());
        let scaled_width = tex_width as f32 * scale;
        let scaled_height = tex_height as f32 * scale;

        let position = Vector2::new(
            (canvas.width() as f32 - scaled_width) * 0.5,
            (canvas.height() as f32 - scaled_height) * 0.5,
        );
        canvas.draw_texture(id, position, scale, Color::WHITE);
    }

    fn name(&self) -> &str {
        &self.name
    }
}
