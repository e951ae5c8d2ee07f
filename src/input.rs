use serde::Deserialize;

use crate::manager::NavigationManager;
use crate::screen::TextureStore;

/// Logical key identities the presentation reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Right,
    Left,
    Up,
    Down,
    Space,
    Enter,
    Backspace,
    F,
    Digit(u8),
}

impl Key {
    pub const ALL: [Key; 18] = [
        Key::Right,
        Key::Left,
        Key::Up,
        Key::Down,
        Key::Space,
        Key::Enter,
        Key::Backspace,
        Key::F,
        Key::Digit(0),
        Key::Digit(1),
        Key::Digit(2),
        Key::Digit(3),
        Key::Digit(4),
        Key::Digit(5),
        Key::Digit(6),
        Key::Digit(7),
        Key::Digit(8),
        Key::Digit(9),
    ];

    /// Only digits 0-9 exist on the keyboard.
    pub fn is_valid(self) -> bool {
        match self {
            Key::Digit(digit) => digit <= 9,
            _ => true,
        }
    }

    /// Whether the dispatcher already turns this key into navigation or fullscreen.
    pub fn is_command(self) -> bool {
        !commands(&KeySet::from_iter([self])).is_empty()
    }
}

/// Keys that went down this frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeySet {
    pressed: Vec<Key>,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        if !self.pressed.contains(&key) {
            self.pressed.push(key);
        }
    }

    pub fn contains(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}

impl FromIterator<Key> for KeySet {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut keys = KeySet::new();
        for key in iter {
            keys.press(key);
        }
        keys
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    ToggleFullscreen,
    GoTo(usize),
}

/// Translates this frame's key edges into commands, in a fixed order.
pub fn commands(keys: &KeySet) -> Vec<Command> {
    let mut commands = Vec::new();

    if keys.contains(Key::Right) || keys.contains(Key::Space) || keys.contains(Key::Enter) {
        commands.push(Command::Next);
    }

    if keys.contains(Key::Left) || keys.contains(Key::Backspace) {
        commands.push(Command::Previous);
    }

    if keys.contains(Key::F) {
        commands.push(Command::ToggleFullscreen);
    }

    // 1-9 jump to slides 0-8
    for digit in 1..=9u8 {
        if keys.contains(Key::Digit(digit)) {
            commands.push(Command::GoTo(digit as usize - 1));
        }
    }

    // 0 is the tenth slide
    if keys.contains(Key::Digit(0)) {
        commands.push(Command::GoTo(9));
    }

    commands
}

/// Runs navigation commands against the manager.
/// Returns true when the host should toggle fullscreen.
pub fn apply(commands: &[Command], manager: &mut NavigationManager, store: &mut dyn TextureStore) -> bool {
    let mut toggle_fullscreen = false;
    for command in commands {
        match *command {
            Command::Next => manager.next(store),
            Command::Previous => manager.previous(store),
            Command::GoTo(index) => manager.go_to(index, store),
            Command::ToggleFullscreen => toggle_fullscreen = !toggle_fullscreen,
        }
    }
    toggle_fullscreen
}
