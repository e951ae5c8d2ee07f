use anyhow::Result;
use raylib::prelude::Color;

use crate::constants::*;
use crate::screen::{Canvas, FrameInput, Screen, TextureStore, Transition};

/// Solid background with a centered label and the navigation hints.
pub struct ColorSlide {
    color: Color,
    label: String,
}

impl ColorSlide {
    pub fn new(color: Color, label: impl Into<String>) -> Self {
        Self { color, label: label.into() }
    }
}

impl Screen for ColorSlide {
    fn load(&mut self, _store: &mut dyn TextureStore) -> Result<()> {
        Ok(())
    }

    fn unload(&mut self, _store: &mut dyn TextureStore) {}

    fn update(&mut self, _frame: &FrameInput) -> Transition {
        Transition::Stay
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear(self.color);

        let width = canvas.width();
        let height = canvas.height();

        let label_width = canvas.measure_text(&self.label, LABEL_FONT_SIZE);
        canvas.draw_text(&self.label, (width - label_width) / 2, height / 2, LABEL_FONT_SIZE, Color::WHITE);

        let hints_width = canvas.measure_text(NAVIGATION_HINTS, HINT_FONT_SIZE);
        canvas.draw_text(NAVIGATION_HINTS, (width - hints_width) / 2, height - 60, HINT_FONT_SIZE, Color::LIGHTGRAY);
    }

    fn name(&self) -> &str {
        &self.label
    }
}
