use raylib::prelude::Color;

use crate::constants::*;
use crate::manager::NavigationManager;
use crate::screen::Canvas;

/// Draws the "current / total" counter for a few seconds after each navigation.
pub fn draw(canvas: &mut dyn Canvas, manager: &NavigationManager) {
    if manager.is_empty() || !manager.should_show_overlay(OVERLAY_SECONDS) {
        return;
    }
    let counter = format!("{} / {}", manager.current_index() + 1, manager.count());
    let x = canvas.width() - 100;
    let y = canvas.height() - 40;
    canvas.draw_text(&counter, x, y, COUNTER_FONT_SIZE, Color::WHITE);
}
