use std::path::{Path, PathBuf};

use raylib::prelude::Color;

use crate::screen::{Canvas, TextureId, TextureStore};

pub mod color;
pub mod fade_reveal;
pub mod image;
pub mod sprite_loop;

pub use color::ColorSlide;
pub use fade_reveal::FadeRevealSlide;
pub use image::ImageSlide;
pub use sprite_loop::{SpriteLayer, SpriteLoopSlide};

/// The image that stopped a slide from loading.
pub(crate) struct LoadFailure {
    pub path: PathBuf,
    pub error: anyhow::Error,
}

/// Loads every path or none: on failure the textures loaded so far are released.
pub(crate) fn load_textures(store: &mut dyn TextureStore, paths: &[PathBuf]) -> Result<Vec<TextureId>, LoadFailure> {
    let mut ids = Vec::with_capacity(paths.len());
    for path in paths {
        match store.load(path) {
            Ok(id) => ids.push(id),
            Err(error) => {
                release_textures(store, &mut ids);
                return Err(LoadFailure { path: path.clone(), error });
            }
        }
    }
    Ok(ids)
}

pub(crate) fn release_textures(store: &mut dyn TextureStore, ids: &mut Vec<TextureId>) {
    for id in ids.drain(..) {
        store.unload(id);
    }
}

/// Drawn in place of a slide whose images failed to load.
pub(crate) fn draw_missing(canvas: &mut dyn Canvas, path: &Path) {
    canvas.clear(Color::BLACK);
    let text = format!("Missing image: {}", path.display());
    let width = canvas.measure_text(&text, 20);
    let x = (canvas.width() - width) / 2;
    let y = canvas.height() / 2;
    canvas.draw_text(&text, x, y, 20, Color::RED);
}
