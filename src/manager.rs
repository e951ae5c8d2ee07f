use log::{debug, error};

use crate::screen::{Canvas, FrameInput, Screen, TextureStore, Transition};

/// Ordered playlist of screens with a single cursor.
///
/// Only `screens[current_index]` is ever loaded. Every operation is a
/// no-op on an empty playlist or on out-of-range navigation.
pub struct NavigationManager {
    screens: Vec<Box<dyn Screen>>,
    current_index: usize,
    started: bool,
    now: f64,
    last_navigation: Option<f64>,
}

impl Default for NavigationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationManager {
    pub fn new() -> Self {
        Self {
            screens: Vec::new(),
            current_index: 0,
            started: false,
            now: 0.0,
            last_navigation: None,
        }
    }

    pub fn add(&mut self, screen: Box<dyn Screen>) {
        self.screens.push(screen);
    }

    pub fn count(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Loads the first screen. Calling it again does nothing.
    pub fn start(&mut self, store: &mut dyn TextureStore) {
        if self.started || self.screens.is_empty() {
            return;
        }
        self.started = true;
        self.current_index = 0;
        self.load_current(store);
        self.last_navigation = Some(self.now);
    }

    /// Starts on `index` instead of the first screen; falls back to 0 when out of range.
    pub fn start_at(&mut self, index: usize, store: &mut dyn TextureStore) {
        if self.started || self.screens.is_empty() {
            return;
        }
        self.started = true;
        self.current_index = if index < self.screens.len() { index } else { 0 };
        self.load_current(store);
        self.last_navigation = Some(self.now);
    }

    pub fn next(&mut self, store: &mut dyn TextureStore) {
        if self.screens.is_empty() || self.current_index + 1 >= self.screens.len() {
            return;
        }
        self.switch_to(self.current_index + 1, store);
    }

    pub fn previous(&mut self, store: &mut dyn TextureStore) {
        if self.screens.is_empty() || self.current_index == 0 {
            return;
        }
        self.switch_to(self.current_index - 1, store);
    }

    pub fn go_to(&mut self, index: usize, store: &mut dyn TextureStore) {
        if index >= self.screens.len() || index == self.current_index {
            return;
        }
        self.switch_to(index, store);
    }

    /// Updates the current screen and follows any transition it requests.
    pub fn update(&mut self, frame: &FrameInput, store: &mut dyn TextureStore) {
        let Some(screen) = self.screens.get_mut(self.current_index) else {
            return;
        };
        if let Transition::GoTo(index) = screen.update(frame) {
            debug!("{} requested slide {}", screen.name(), index + 1);
            self.go_to(index, store);
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if let Some(screen) = self.screens.get(self.current_index) {
            screen.draw(canvas);
        }
    }

    /// Pushes the host clock; drives the overlay window.
    pub fn set_time(&mut self, now: f64) {
        self.now = now;
    }

    pub fn should_show_overlay(&self, window_secs: f64) -> bool {
        match self.last_navigation {
            Some(at) => self.now - at < window_secs,
            None => false,
        }
    }

    /// Releases the active screen before the host goes away.
    pub fn shutdown(&mut self, store: &mut dyn TextureStore) {
        if !self.started {
            return;
        }
        self.started = false;
        if let Some(screen) = self.screens.get_mut(self.current_index) {
            screen.unload(store);
        }
    }

    fn switch_to(&mut self, index: usize, store: &mut dyn TextureStore) {
        debug!("Slide {} -> {}", self.current_index + 1, index + 1);
        if self.started {
            self.screens[self.current_index].unload(store);
        }
        self.current_index = index;
        self.started = true;
        self.load_current(store);
        self.last_navigation = Some(self.now);
    }

    fn load_current(&mut self, store: &mut dyn TextureStore) {
        let screen = &mut self.screens[self.current_index];
        if let Err(e) = screen.load(store) {
            error!("Failed to load {} (slide {}): {:#}", screen.name(), self.current_index + 1, e);
        }
    }
}
