use std::path::Path;

use anyhow::Result;
use log::{debug, info};
use raylib::prelude::*;

use crate::constants::*;
use crate::input::{self, Key, KeySet};
use crate::manager::NavigationManager;
use crate::overlay;
use crate::screen::{Canvas, FrameInput, TextureId, TextureStore};
use crate::texture_loader::load_texture_with_exif_rotation;

#[derive(Debug, Clone)]
pub struct HostConfig {
    pub width: i32,
    pub height: i32,
    pub title: String,
    pub fullscreen: bool,
    pub start_index: usize,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            title: WINDOW_TITLE.to_string(),
            fullscreen: false,
            start_index: 0,
        }
    }
}

/// Slot vector handing out stable ids; freed slots are reused.
pub struct Slots<T> {
    slots: Vec<Option<T>>,
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<T> Slots<T> {
    pub fn insert(&mut self, value: T) -> TextureId {
        if let Some(index) = self.slots.iter().position(Option::is_none) {
            self.slots[index] = Some(value);
            TextureId(index)
        } else {
            self.slots.push(Some(value));
            TextureId(self.slots.len() - 1)
        }
    }

    pub fn remove(&mut self, id: TextureId) -> Option<T> {
        self.slots.get_mut(id.0).and_then(Option::take)
    }

    pub fn get(&self, id: TextureId) -> Option<&T> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn live(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

pub type TextureCache = Slots<Texture2D>;

/// GPU texture loading for the duration of one frame's input/update pass.
pub struct RaylibTextures<'a> {
    rl: &'a mut RaylibHandle,
    thread: &'a RaylibThread,
    cache: &'a mut TextureCache,
}

impl<'a> RaylibTextures<'a> {
    pub fn new(rl: &'a mut RaylibHandle, thread: &'a RaylibThread, cache: &'a mut TextureCache) -> Self {
        Self { rl, thread, cache }
    }
}

impl TextureStore for RaylibTextures<'_> {
    fn load(&mut self, path: &Path) -> Result<TextureId> {
        let texture = load_texture_with_exif_rotation(self.rl, self.thread, path)?;
        let id = self.cache.insert(texture);
        debug!("Loaded {} as texture {}", path.display(), id.0);
        Ok(id)
    }

    fn unload(&mut self, id: TextureId) {
        // Dropping the texture releases it on the GPU
        if self.cache.remove(id).is_some() {
            debug!("Unloaded texture {}", id.0);
        }
    }
}

/// Draw handle plus the textures screens refer to by id.
pub struct RaylibCanvas<'a> {
    d: RaylibDrawHandle<'a>,
    cache: &'a TextureCache,
    width: i32,
    height: i32,
}

impl Canvas for RaylibCanvas<'_> {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn clear(&mut self, color: Color) {
        self.d.clear_background(color);
    }

    fn measure_text(&self, text: &str, font_size: i32) -> i32 {
        self.d.measure_text(&strip_nul(text), font_size)
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, font_size: i32, color: Color) {
        self.d.draw_text(&strip_nul(text), x, y, font_size, color);
    }

    fn texture_size(&self, id: TextureId) -> Option<(i32, i32)> {
        self.cache.get(id).map(|texture| (texture.width(), texture.height()))
    }

    fn draw_texture(&mut self, id: TextureId, position: Vector2, scale: f32, tint: Color) {
        if let Some(texture) = self.cache.get(id) {
            self.d.draw_texture_ex(texture, position, 0.0, scale, tint);
        }
    }

    fn draw_texture_stretched(&mut self, id: TextureId, dest: Rectangle, tint: Color) {
        if let Some(texture) = self.cache.get(id) {
            let source = Rectangle::new(0.0, 0.0, texture.width() as f32, texture.height() as f32);
            self.d.draw_texture_pro(texture, source, dest, Vector2::zero(), 0.0, tint);
        }
    }
}

/// raylib panics on interior NULs when building its C strings.
fn strip_nul(text: &str) -> String {
    text.replace('\0', "")
}

fn keyboard_key(key: Key) -> KeyboardKey {
    match key {
        Key::Right => KeyboardKey::KEY_RIGHT,
        Key::Left => KeyboardKey::KEY_LEFT,
        Key::Up => KeyboardKey::KEY_UP,
        Key::Down => KeyboardKey::KEY_DOWN,
        Key::Space => KeyboardKey::KEY_SPACE,
        Key::Enter => KeyboardKey::KEY_ENTER,
        Key::Backspace => KeyboardKey::KEY_BACKSPACE,
        Key::F => KeyboardKey::KEY_F,
        Key::Digit(0) => KeyboardKey::KEY_ZERO,
        Key::Digit(1) => KeyboardKey::KEY_ONE,
        Key::Digit(2) => KeyboardKey::KEY_TWO,
        Key::Digit(3) => KeyboardKey::KEY_THREE,
        Key::Digit(4) => KeyboardKey::KEY_FOUR,
        Key::Digit(5) => KeyboardKey::KEY_FIVE,
        Key::Digit(6) => KeyboardKey::KEY_SIX,
        Key::Digit(7) => KeyboardKey::KEY_SEVEN,
        Key::Digit(8) => KeyboardKey::KEY_EIGHT,
        Key::Digit(9) => KeyboardKey::KEY_NINE,
        Key::Digit(_) => KeyboardKey::KEY_NULL,
    }
}

/// Key edges of this frame; held keys are not reported again.
fn poll_keys(rl: &RaylibHandle) -> KeySet {
    Key::ALL.into_iter().filter(|key| rl.is_key_pressed(keyboard_key(*key))).collect()
}

/// Opens the window and runs the presentation until it is closed.
pub fn run(config: &HostConfig, mut manager: NavigationManager) -> Result<()> {
    let (mut rl, thread) = raylib::init()
        .size(config.width, config.height)
        .title(&config.title)
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);
    if config.fullscreen {
        rl.toggle_fullscreen();
    }

    // Declared after the handle so textures are released while the GL context still exists
    let mut cache = TextureCache::default();

    manager.set_time(rl.get_time());
    manager.start_at(config.start_index, &mut RaylibTextures::new(&mut rl, &thread, &mut cache));
    info!("Presenting {} slides", manager.count());

    // --- Main Loop ---
    while !rl.window_should_close() {
        let now = rl.get_time();
        manager.set_time(now);
        let frame = FrameInput::new(now, poll_keys(&rl));

        // --- Input ---
        let commands = input::commands(&frame.keys);
        let toggle_fullscreen =
            input::apply(&commands, &mut manager, &mut RaylibTextures::new(&mut rl, &thread, &mut cache));
        if toggle_fullscreen {
            rl.toggle_fullscreen();
        }

        // --- Update ---
        manager.update(&frame, &mut RaylibTextures::new(&mut rl, &thread, &mut cache));

        // --- Draw ---
        let width = rl.get_screen_width();
        let height = rl.get_screen_height();
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        let mut canvas = RaylibCanvas { d, cache: &cache, width, height };
        manager.draw(&mut canvas);
        overlay::draw(&mut canvas, &manager);
    }

    manager.shutdown(&mut RaylibTextures::new(&mut rl, &thread, &mut cache));
    if cache.live() > 0 {
        debug!("Releasing {} leftover textures", cache.live());
    }
    drop(cache);
    info!("Window closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_reuse_freed_ids() {
        let mut slots = Slots::default();
        let a = slots.insert("a");
        let b = slots.insert("b");
        assert_eq!((a, b), (TextureId(0), TextureId(1)));

        assert_eq!(slots.remove(a), Some("a"));
        assert_eq!(slots.remove(a), None);
        assert_eq!(slots.get(a), None);
        assert_eq!(slots.live(), 1);

        let c = slots.insert("c");
        assert_eq!(c, TextureId(0));
        assert_eq!(slots.get(c), Some(&"c"));
        assert_eq!(slots.get(b), Some(&"b"));
    }

    #[test]
    fn every_logical_key_maps_to_a_distinct_raylib_key() {
        let mut mapped: Vec<i32> = Key::ALL.iter().map(|key| keyboard_key(*key) as i32).collect();
        mapped.sort();
        mapped.dedup();
        assert_eq!(mapped.len(), Key::ALL.len());
    }

    #[test]
    fn out_of_range_digit_maps_to_no_key() {
        assert_eq!(keyboard_key(Key::Digit(42)) as i32, KeyboardKey::KEY_NULL as i32);
        assert_eq!(keyboard_key(Key::Digit(9)) as i32, KeyboardKey::KEY_NINE as i32);
    }

    #[test]
    fn text_reaches_raylib_without_nul_bytes() {
        assert_eq!(strip_nul("Missing image: a\0b.png"), "Missing image: ab.png");
        assert_eq!(strip_nul("1 / 3"), "1 / 3");
    }
}
