//! Recording fakes for the graphics seams.

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Result, bail};
use raylib::prelude::{Color, Rectangle, Vector2};

use crate::screen::{Canvas, FrameInput, Screen, TextureId, TextureStore, Transition};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Load(&'static str),
    Unload(&'static str),
    Draw(&'static str),
}

/// Shared lifecycle log for [`RecordingScreen`]s.
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Rc<RefCell<Vec<Call>>>,
    loaded: Rc<RefCell<Vec<&'static str>>>,
}

impl CallLog {
    pub fn take(&self) -> Vec<Call> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    pub fn loaded(&self) -> Vec<&'static str> {
        self.loaded.borrow().clone()
    }

    fn push(&self, call: Call) {
        match call {
            Call::Load(name) => self.loaded.borrow_mut().push(name),
            Call::Unload(name) => self.loaded.borrow_mut().retain(|n| *n != name),
            Call::Draw(_) => {}
        }
        self.calls.borrow_mut().push(call);
    }
}

pub struct RecordingScreen {
    name: &'static str,
    log: CallLog,
    transition: Transition,
    fail_load: bool,
}

impl RecordingScreen {
    pub fn new(name: &'static str, log: &CallLog) -> Self {
        Self { name, log: log.clone(), transition: Transition::Stay, fail_load: false }
    }

    pub fn requesting(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    pub fn failing_load(mut self) -> Self {
        self.fail_load = true;
        self
    }
}

impl Screen for RecordingScreen {
    fn load(&mut self, _store: &mut dyn TextureStore) -> Result<()> {
        self.log.push(Call::Load(self.name));
        if self.fail_load {
            bail!("asset missing");
        }
        Ok(())
    }

    fn unload(&mut self, _store: &mut dyn TextureStore) {
        self.log.push(Call::Unload(self.name));
    }

    fn update(&mut self, _frame: &FrameInput) -> Transition {
        self.transition
    }

    fn draw(&self, _canvas: &mut dyn Canvas) {
        self.log.push(Call::Draw(self.name));
    }

    fn name(&self) -> &str {
        self.name
    }
}

/// Hands out ids for any path except the ones marked missing.
#[derive(Default)]
pub struct FakeStore {
    next_id: usize,
    pub live: Vec<(TextureId, PathBuf)>,
    pub missing: HashSet<PathBuf>,
}

impl FakeStore {
    pub fn with_missing(path: &str) -> Self {
        let mut store = Self::default();
        store.missing.insert(PathBuf::from(path));
        store
    }

    pub fn id_of(&self, path: &str) -> Option<TextureId> {
        self.live.iter().find(|(_, p)| p == Path::new(path)).map(|(id, _)| *id)
    }
}

impl TextureStore for FakeStore {
    fn load(&mut self, path: &Path) -> Result<TextureId> {
        if self.missing.contains(path) {
            bail!("no such file: {}", path.display());
        }
        let id = TextureId(self.next_id);
        self.next_id += 1;
        self.live.push((id, path.to_path_buf()));
        Ok(id)
    }

    fn unload(&mut self, id: TextureId) {
        self.live.retain(|(live, _)| *live != id);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Clear((u8, u8, u8, u8)),
    Text { text: String, x: i32, y: i32, size: i32 },
    Texture { id: TextureId, x: f32, y: f32, scale: f32, alpha: u8 },
    Stretched { id: TextureId, dest: (f32, f32, f32, f32), alpha: u8 },
}

/// Records draw calls. Text is 10px wide per character at any size.
pub struct FakeCanvas {
    width: i32,
    height: i32,
    pub ops: Vec<Op>,
    pub texture_size: (i32, i32),
}

impl FakeCanvas {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height, ops: Vec::new(), texture_size: (640, 480) }
    }

    pub fn textures(&self) -> Vec<(TextureId, u8)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Texture { id, alpha, .. } | Op::Stretched { id, alpha, .. } => Some((*id, *alpha)),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for FakeCanvas {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn clear(&mut self, color: Color) {
        self.ops.push(Op::Clear((color.r, color.g, color.b, color.a)));
    }

    fn measure_text(&self, text: &str, _font_size: i32) -> i32 {
        text.chars().count() as i32 * 10
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, font_size: i32, _color: Color) {
        self.ops.push(Op::Text { text: text.to_string(), x, y, size: font_size });
    }

    fn texture_size(&self, _id: TextureId) -> Option<(i32, i32)> {
        Some(self.texture_size)
    }

    fn draw_texture(&mut self, id: TextureId, position: Vector2, scale: f32, tint: Color) {
        self.ops.push(Op::Texture { id, x: position.x, y: position.y, scale, alpha: tint.a });
    }

    fn draw_texture_stretched(&mut self, id: TextureId, dest: Rectangle, tint: Color) {
        self.ops.push(Op::Stretched {
            id,
            dest: (dest.x, dest.y, dest.width, dest.height),
            alpha: tint.a,
        });
    }
}
