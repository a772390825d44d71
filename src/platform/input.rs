//! Keyboard latch
//!
//! Raw key events can arrive several times between two ticks. Each key keeps
//! two bits: `SEEN` means a tick should still observe it as held, `RELEASED`
//! means no key-up has been processed since the last tick sampled it. A press
//! and release that both land between ticks are therefore observed exactly
//! once.

use crate::sim::TickInput;

const SEEN: u8 = 1;
const RELEASED: u8 = 2;

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Escape,
}

impl Key {
    pub const ALL: [Key; 6] = [
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::Fire,
        Key::Escape,
    ];

    fn slot(self) -> usize {
        self as usize
    }
}

/// Per-key latch state
#[derive(Debug, Clone, Default)]
pub struct KeyLatch {
    keys: [u8; Key::ALL.len()],
}

impl KeyLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        self.keys[key.slot()] = SEEN | RELEASED;
    }

    pub fn key_up(&mut self, key: Key) {
        self.keys[key.slot()] &= RELEASED;
    }

    /// Whether a tick sampling now would see the key held
    pub fn is_held(&self, key: Key) -> bool {
        self.keys[key.slot()] != 0
    }

    pub fn quit_requested(&self) -> bool {
        self.is_held(Key::Escape)
    }

    /// Read the keys for one tick, then clear everything already released
    pub fn sample(&mut self) -> TickInput {
        let input = TickInput {
            accelerate: self.is_held(Key::Up),
            decelerate: self.is_held(Key::Down),
            turn_left: self.is_held(Key::Left),
            turn_right: self.is_held(Key::Right),
            fire: self.is_held(Key::Fire),
        };
        for state in &mut self.keys {
            *state &= SEEN;
        }
        input
    }
}
