//! Keyboard state: per-key tracking created lazily by key code.

use crate::keycode::KeyCode;
use crate::signal::{OwnerToken, Signal};
use std::collections::HashMap;

/// Fired on key down/up, both on the key itself and on the keyboard-level
/// aggregate signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
}

/// State of one key.
pub struct Key {
    pub code: KeyCode,
    pub down: bool,
    /// Was this key down last frame; advances only in the draw tick.
    pub last_down: bool,
    pub on_down: Signal<KeyEvent>,
    pub on_up: Signal<KeyEvent>,
}

impl Key {
    fn new(code: KeyCode) -> Self {
        Self {
            code,
            down: false,
            last_down: false,
            on_down: Signal::new(),
            on_up: Signal::new(),
        }
    }

    /// Was this key pressed between this and last frame.
    pub fn pressed(&self) -> bool {
        self.down && !self.last_down
    }

    /// Was this key released between this and last frame.
    pub fn released(&self) -> bool {
        !self.down && self.last_down
    }
}

/// All keys, created on first reference, plus aggregate signals that fire
/// for every key.
pub struct Keyboard {
    keys: HashMap<KeyCode, Key>,
    /// Triggers when any key goes down.
    pub on_down: Signal<KeyEvent>,
    /// Triggers when any key goes up.
    pub on_up: Signal<KeyEvent>,
    /// Owns the per-key → aggregate forwarding subscriptions.
    forward_owner: OwnerToken,
}

impl Keyboard {
    pub fn new() -> Self {
        Self {
            keys: HashMap::new(),
            on_down: Signal::new(),
            on_up: Signal::new(),
            forward_owner: OwnerToken::new(),
        }
    }

    /// The state for `code`, created on first use. Key-level signals are
    /// wired into the keyboard-level aggregates at creation.
    pub fn key(&mut self, code: KeyCode) -> &mut Key {
        let on_down = self.on_down.clone();
        let on_up = self.on_up.clone();
        let owner = self.forward_owner.clone();

        self.keys.entry(code).or_insert_with(|| {
            let key = Key::new(code);
            key.on_down.subscribe(&owner, move |event| on_down.emit(event));
            key.on_up.subscribe(&owner, move |event| on_up.emit(event));
            key
        })
    }

    /// The state for `code` without creating it.
    pub fn get(&self, code: KeyCode) -> Option<&Key> {
        self.keys.get(&code)
    }

    /// Every key referenced so far.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.keys.values()
    }

    pub(crate) fn advance_frame(&mut self) {
        for key in self.keys.values_mut() {
            key.last_down = key.down;
        }
    }
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new()
    }
}
