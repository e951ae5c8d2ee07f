pub const WINDOW_WIDTH: i32 = 1280;            // Default window width
pub const WINDOW_HEIGHT: i32 = 720;            // Default window height
pub const WINDOW_TITLE: &str = "Presentation"; // Default window title
pub const FPS: u32 = 60;                       // Frames per second

pub const OVERLAY_SECONDS: f64 = 3.0;          // Slide counter stays visible after a navigation (seconds)
pub const FADE_DURATION: f64 = 1.0;            // Reveal fade-in duration (seconds)
pub const FRAME_DURATION: f64 = 0.25;          // Time per animation frame (seconds)
pub const FRAME_COUNT: usize = 4;              // Frames per looping animation

pub const LABEL_FONT_SIZE: i32 = 40;
pub const HINT_FONT_SIZE: i32 = 20;
pub const COUNTER_FONT_SIZE: i32 = 20;

pub const FIT_RATIO: f32 = 0.9;                // Static images fill at most this share of the canvas

pub const NAVIGATION_HINTS: &str = "Arrow Keys: Navigate | F: Fullscreen | ESC: Exit";
