//! Slide list configuration.
//!
//! A deck comes from one of three places: a YAML file, a directory of
//! images, or the built-in sample deck.
//!
//! ```yaml
//! window:
//!   width: 1280
//!   height: 720
//!   title: Programming 101
//! slides:
//!   - kind: color
//!     color: darkblue
//!     label: Welcome
//!   - kind: image
//!     path: images/diagram.png
//!   - kind: fade-reveal
//!     background: images/room.png
//!     reveal: images/room-lit.png
//!     frames: [images/fx1.png, images/fx2.png, images/fx3.png, images/fx4.png]
//!     trigger: down
//!   - kind: sprite-loop
//!     background: images/desk.png
//!     position: [0, 0]
//!     layers:
//!       - frames: [images/screen1.png, images/screen2.png, images/screen3.png, images/screen4.png]
//!         position: [412, 96]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::info;
use raylib::prelude::{Color, Vector2};
use serde::Deserialize;

use crate::input::Key;
use crate::screen::Screen;
use crate::slides::{ColorSlide, FadeRevealSlide, ImageSlide, SpriteLayer, SpriteLoopSlide};
use crate::texture_loader::load_sorted_image_paths;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowConfig {
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Deck {
    #[serde(default)]
    pub window: WindowConfig,
    pub slides: Vec<SlideConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SlideConfig {
    Color {
        color: ColorSpec,
        #[serde(default)]
        label: String,
    },
    Image {
        path: PathBuf,
    },
    FadeReveal {
        background: PathBuf,
        reveal: PathBuf,
        frames: Vec<PathBuf>,
        #[serde(default = "default_trigger")]
        trigger: Key,
        /// 1-based slide to jump to on the trigger after the loop started.
        #[serde(default)]
        continue_to: Option<usize>,
    },
    SpriteLoop {
        background: PathBuf,
        #[serde(default)]
        position: [f32; 2],
        layers: Vec<LayerConfig>,
        #[serde(default = "default_trigger")]
        trigger: Key,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerConfig {
    pub frames: Vec<PathBuf>,
    #[serde(default)]
    pub position: [f32; 2],
}

fn default_trigger() -> Key {
    Key::Down
}

/// A raylib color name or an `[r, g, b]` / `[r, g, b, a]` list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Named(String),
    Rgb([u8; 3]),
    Rgba([u8; 4]),
}

impl ColorSpec {
    pub fn to_color(&self) -> Result<Color> {
        match self {
            ColorSpec::Rgb([r, g, b]) => Ok(Color::new(*r, *g, *b, 255)),
            ColorSpec::Rgba([r, g, b, a]) => Ok(Color::new(*r, *g, *b, *a)),
            ColorSpec::Named(name) => named_color(name).with_context(|| format!("Unknown color '{}'", name)),
        }
    }
}

fn named_color(name: &str) -> Option<Color> {
    let color = match name.to_lowercase().replace(['-', '_', ' '], "").as_str() {
        "lightgray" => Color::LIGHTGRAY,
        "gray" => Color::GRAY,
        "darkgray" => Color::DARKGRAY,
        "yellow" => Color::YELLOW,
        "gold" => Color::GOLD,
        "orange" => Color::ORANGE,
        "pink" => Color::PINK,
        "red" => Color::RED,
        "maroon" => Color::MAROON,
        "green" => Color::GREEN,
        "lime" => Color::LIME,
        "darkgreen" => Color::DARKGREEN,
        "skyblue" => Color::SKYBLUE,
        "blue" => Color::BLUE,
        "darkblue" => Color::DARKBLUE,
        "purple" => Color::PURPLE,
        "violet" => Color::VIOLET,
        "darkpurple" => Color::DARKPURPLE,
        "beige" => Color::BEIGE,
        "brown" => Color::BROWN,
        "darkbrown" => Color::DARKBROWN,
        "white" => Color::WHITE,
        "black" => Color::BLACK,
        "magenta" => Color::MAGENTA,
        "raywhite" => Color::RAYWHITE,
        _ => return None,
    };
    Some(color)
}

impl Deck {
    /// The three sample slides shown when no deck is given.
    pub fn sample() -> Self {
        let color = |name: &str, label: &str| SlideConfig::Color {
            color: ColorSpec::Named(name.to_string()),
            label: label.to_string(),
        };
        Deck {
            window: WindowConfig::default(),
            slides: vec![
                color("darkgray", "Slide 1 - Press Right Arrow or Space"),
                color("darkblue", "Slide 2"),
                color("darkgreen", "Slide 3"),
            ],
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let deck: Deck = serde_yaml::from_str(text).context("Invalid deck file")?;
        Ok(deck)
    }

    /// Reads a deck file and resolves its asset paths against the file's directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("Failed to read deck {}", path.display()))?;
        let mut deck = Self::parse(&text).with_context(|| format!("Failed to parse deck {}", path.display()))?;
        if let Some(base) = path.parent() {
            deck.resolve_paths(base);
        }
        Ok(deck)
    }

    /// One image slide per picture in `dir`, ordered by file name.
    pub fn from_image_dir(dir: &Path) -> Result<Self> {
        let paths = load_sorted_image_paths(dir)?;
        info!("Found {} images in {}", paths.len(), dir.display());
        Ok(Deck {
            window: WindowConfig::default(),
            slides: paths.into_iter().map(|path| SlideConfig::Image { path }).collect(),
        })
    }

    pub fn resolve_paths(&mut self, base: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        for slide in &mut self.slides {
            match slide {
                SlideConfig::Color { .. } => {}
                SlideConfig::Image { path } => resolve(path),
                SlideConfig::FadeReveal { background, reveal, frames, .. } => {
                    resolve(background);
                    resolve(reveal);
                    frames.iter_mut().for_each(resolve);
                }
                SlideConfig::SpriteLoop { background, layers, .. } => {
                    resolve(background);
                    for layer in layers {
                        layer.frames.iter_mut().for_each(resolve);
                    }
                }
            }
        }
    }

    /// Checks everything that would otherwise only fail once the slide is shown.
    pub fn validate(&self) -> Result<()> {
        let count = self.slides.len();
        for (index, slide) in self.slides.iter().enumerate() {
            let number = index + 1;
            match slide {
                SlideConfig::Color { color, .. } => {
                    color.to_color().with_context(|| format!("Slide {}", number))?;
                }
                SlideConfig::FadeReveal { frames, continue_to, trigger, .. } => {
                    check_trigger(number, *trigger)?;
                    if frames.is_empty() {
                        bail!("Slide {}: fade-reveal needs at least one frame", number);
                    }
                    if let Some(target) = continue_to {
                        if *target == 0 || *target > count {
                            bail!("Slide {}: continue_to {} is outside 1..={}", number, target, count);
                        }
                    }
                }
                SlideConfig::SpriteLoop { layers, trigger, .. } => {
                    check_trigger(number, *trigger)?;
                    if layers.iter().all(|layer| layer.frames.is_empty()) {
                        bail!("Slide {}: sprite-loop needs at least one layer with frames", number);
                    }
                }
                SlideConfig::Image { .. } => {}
            }
            for path in slide.asset_paths() {
                if !path.is_file() {
                    bail!("Slide {}: missing image {}", number, path.display());
                }
            }
        }
        Ok(())
    }

    pub fn build(&self) -> Result<Vec<Box<dyn Screen>>> {
        self.slides.iter().map(SlideConfig::build).collect()
    }
}

impl SlideConfig {
    pub fn asset_paths(&self) -> Vec<&Path> {
        match self {
            SlideConfig::Color { .. } => Vec::new(),
            SlideConfig::Image { path } => vec![path.as_path()],
            SlideConfig::FadeReveal { background, reveal, frames, .. } => [background, reveal]
                .into_iter()
                .chain(frames)
                .map(PathBuf::as_path)
                .collect(),
            SlideConfig::SpriteLoop { background, layers, .. } => std::iter::once(background)
                .chain(layers.iter().flat_map(|layer| &layer.frames))
                .map(PathBuf::as_path)
                .collect(),
        }
    }

    pub fn build(&self) -> Result<Box<dyn Screen>> {
        let screen: Box<dyn Screen> = match self {
            SlideConfig::Color { color, label } => Box::new(ColorSlide::new(color.to_color()?, label.clone())),
            SlideConfig::Image { path } => Box::new(ImageSlide::new(path.clone())),
            SlideConfig::FadeReveal { background, reveal, frames, trigger, continue_to } => {
                let mut slide = FadeRevealSlide::new(background.clone(), reveal.clone(), frames.clone())
                    .with_trigger(*trigger);
                if let Some(target) = continue_to {
                    slide = slide.continue_to(target.saturating_sub(1));
                }
                Box::new(slide)
            }
            SlideConfig::SpriteLoop { background, position, layers, trigger } => {
                let layers = layers
                    .iter()
                    .map(|layer| SpriteLayer::new(layer.frames.clone(), vec2(layer.position)))
                    .collect();
                Box::new(SpriteLoopSlide::new(background.clone(), vec2(*position), layers).with_trigger(*trigger))
            }
        };
        Ok(screen)
    }
}

/// A trigger shared with navigation would leave the slide before it sees the key.
fn check_trigger(number: usize, trigger: Key) -> Result<()> {
    if !trigger.is_valid() {
        bail!("Slide {}: trigger {:?} is not a key", number, trigger);
    }
    if trigger.is_command() {
        bail!("Slide {}: trigger {:?} is already bound to navigation", number, trigger);
    }
    Ok(())
}

fn vec2([x, y]: [f32; 2]) -> Vector2 {
    Vector2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECK: &str = r#"
window:
  width: 1920
  title: Talk
slides:
  - kind: color
    color: darkblue
    label: Hello
  - kind: color
    color: [10, 20, 30]
  - kind: image
    path: pics/a.png
  - kind: fade-reveal
    background: bg.png
    reveal: lit.png
    frames: [f1.png, f2.png, f3.png, f4.png]
    continue_to: 1
  - kind: sprite-loop
    background: /abs/desk.png
    position: [5, 6]
    trigger: up
    layers:
      - frames: [s1.png, s2.png]
        position: [100, 200]
"#;

    #[test]
    fn parses_every_slide_kind() {
        let deck = Deck::parse(DECK).unwrap();
        assert_eq!(deck.window.width, Some(1920));
        assert_eq!(deck.window.height, None);
        assert_eq!(deck.window.title.as_deref(), Some("Talk"));
        assert_eq!(deck.slides.len(), 5);

        match &deck.slides[1] {
            SlideConfig::Color { color, label } => {
                assert_eq!(*color, ColorSpec::Rgb([10, 20, 30]));
                assert!(label.is_empty());
            }
            other => panic!("unexpected {:?}", other),
        }
        match &deck.slides[3] {
            SlideConfig::FadeReveal { trigger, continue_to, frames, .. } => {
                assert_eq!(*trigger, Key::Down);
                assert_eq!(*continue_to, Some(1));
                assert_eq!(frames.len(), 4);
            }
            other => panic!("unexpected {:?}", other),
        }
        match &deck.slides[4] {
            SlideConfig::SpriteLoop { trigger, position, .. } => {
                assert_eq!(*trigger, Key::Up);
                assert_eq!(*position, [5.0, 6.0]);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(deck.build().unwrap().len(), 5);
    }

    #[test]
    fn relative_paths_resolve_against_deck_dir() {
        let mut deck = Deck::parse(DECK).unwrap();
        deck.resolve_paths(Path::new("/talks/intro"));
        assert_eq!(deck.slides[2].asset_paths(), vec![Path::new("/talks/intro/pics/a.png")]);
        assert_eq!(deck.slides[4].asset_paths()[0], Path::new("/abs/desk.png"));
        assert_eq!(deck.slides[4].asset_paths()[2], Path::new("/talks/intro/s2.png"));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = Deck::parse("slides:\n  - kind: video\n    path: a.mp4\n").unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid deck file"));
    }

    #[test]
    fn named_colors_are_forgiving() {
        assert!(ColorSpec::Named("Dark-Gray".into()).to_color().is_ok());
        assert!(ColorSpec::Named("light_gray".into()).to_color().is_ok());
        assert!(ColorSpec::Named("chartreuse".into()).to_color().is_err());
        let c = ColorSpec::Rgba([1, 2, 3, 4]).to_color().unwrap();
        assert_eq!((c.r, c.g, c.b, c.a), (1, 2, 3, 4));
    }

    #[test]
    fn sample_deck_is_valid() {
        let deck = Deck::sample();
        deck.validate().unwrap();
        let screens = deck.build().unwrap();
        assert_eq!(screens.len(), 3);
        assert_eq!(screens[1].name(), "Slide 2");
    }

    #[test]
    fn validation_reports_missing_assets() {
        let deck = Deck::parse("slides:\n  - kind: image\n    path: /definitely/not/here.png\n").unwrap();
        let err = deck.validate().unwrap_err().to_string();
        assert!(err.contains("Slide 1"));
        assert!(err.contains("/definitely/not/here.png"));
    }

    #[test]
    fn validation_checks_slide_shape() {
        let empty_frames = "slides:\n  - kind: fade-reveal\n    background: a.png\n    reveal: b.png\n    frames: []\n";
        assert!(Deck::parse(empty_frames).unwrap().validate().is_err());

        let bad_target = "slides:\n  - kind: color\n    color: red\n  - kind: fade-reveal\n    background: a.png\n    reveal: b.png\n    frames: [c.png]\n    continue_to: 3\n";
        let err = Deck::parse(bad_target).unwrap().validate().unwrap_err().to_string();
        assert!(err.contains("continue_to 3"));

        let enter = "slides:\n  - kind: fade-reveal\n    background: a.png\n    reveal: b.png\n    frames: [c.png]\n    trigger: enter\n";
        let err = Deck::parse(enter).unwrap().validate().unwrap_err().to_string();
        assert!(err.contains("Slide 1"));
        assert!(err.contains("Enter"));

        let digit = "slides:\n  - kind: sprite-loop\n    background: a.png\n    layers: [{frames: [b.png]}]\n    trigger: {digit: 3}\n";
        assert!(Deck::parse(digit).unwrap().validate().unwrap_err().to_string().contains("navigation"));

        let bad_digit = "slides:\n  - kind: sprite-loop\n    background: a.png\n    layers: [{frames: [b.png]}]\n    trigger: {digit: 42}\n";
        assert!(Deck::parse(bad_digit).unwrap().validate().unwrap_err().to_string().contains("not a key"));

        let bad_color = "slides:\n  - kind: color\n    color: nope\n";
        assert!(Deck::parse(bad_color).unwrap().validate().is_err());
    }
}
