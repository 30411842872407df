//! Keyboard and mouse input, one snapshot per frame.
//!
//! The window event handler feeds [`InputState`] with presses and releases as
//! they arrive. Once per frame the game loop calls
//! [`snapshot`](InputState::snapshot), which returns an immutable
//! [`InputSnapshot`] and clears the per-frame edges. Game code only ever
//! reads snapshots, so there is no global input state and a frame's view of
//! the keyboard cannot change halfway through an update.
//!
//! [`ActionMap`] binds game actions to one or more inputs and answers queries
//! against a snapshot.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::math::Vec2;

#[cfg(feature = "gpu")]
pub use winit::event::MouseButton;
#[cfg(feature = "gpu")]
pub use winit::keyboard::KeyCode;

/// Accumulates input events between snapshots.
///
/// - `held`: currently held down
/// - `just_pressed`: went down since the last snapshot
/// - `just_released`: went up since the last snapshot
#[derive(Debug, Clone)]
pub struct InputState<T: Eq + Hash + Copy> {
    held: HashSet<T>,
    just_pressed: HashSet<T>,
    just_released: HashSet<T>,
    cursor: Vec2,
}

impl<T: Eq + Hash + Copy> InputState<T> {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
            cursor: Vec2::ZERO,
        }
    }

    /// Record a press. Key repeat (pressing an input that is already held)
    /// does not count as a new press.
    pub fn press(&mut self, input: T) {
        if self.held.insert(input) {
            self.just_pressed.insert(input);
        }
    }

    /// Record a release. Releasing an input that was not held is ignored.
    pub fn release(&mut self, input: T) {
        if self.held.remove(&input) {
            self.just_released.insert(input);
        }
    }

    /// Cursor position in window pixels.
    pub fn set_cursor(&mut self, position: Vec2) {
        self.cursor = position;
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.just_released.extend(self.held.drain());
    }

    /// The state for this frame. Clears `just_pressed` and `just_released`.
    pub fn snapshot(&mut self) -> InputSnapshot<T> {
        InputSnapshot {
            held: self.held.clone(),
            just_pressed: std::mem::take(&mut self.just_pressed),
            just_released: std::mem::take(&mut self.just_released),
            cursor: self.cursor,
        }
    }
}

impl<T: Eq + Hash + Copy> Default for InputState<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "gpu")]
impl InputState<KeyCode> {
    /// Feed a winit keyboard event. Keys without a physical key code are
    /// ignored.
    pub fn handle_key_event(&mut self, event: &winit::event::KeyEvent) {
        use winit::event::ElementState;
        use winit::keyboard::PhysicalKey;

        if let PhysicalKey::Code(code) = event.physical_key {
            match event.state {
                ElementState::Pressed => self.press(code),
                ElementState::Released => self.release(code),
            }
        }
    }
}

/// Input as seen by one frame.
#[derive(Debug, Clone)]
pub struct InputSnapshot<T: Eq + Hash + Copy> {
    held: HashSet<T>,
    just_pressed: HashSet<T>,
    just_released: HashSet<T>,
    cursor: Vec2,
}

impl<T: Eq + Hash + Copy> InputSnapshot<T> {
    /// Returns `true` if the input is held down.
    pub fn held(&self, input: T) -> bool {
        self.held.contains(&input)
    }

    /// Returns `true` if the input went down this frame.
    pub fn just_pressed(&self, input: T) -> bool {
        self.just_pressed.contains(&input)
    }

    /// Returns `true` if the input went up this frame.
    pub fn just_released(&self, input: T) -> bool {
        self.just_released.contains(&input)
    }

    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }
}

/// Binds actions to inputs. An action is active if any of its inputs is.
#[derive(Debug, Clone)]
pub struct ActionMap<A: Eq + Hash, T: Eq + Hash + Copy> {
    bindings: HashMap<A, Vec<T>>,
}

impl<A: Eq + Hash, T: Eq + Hash + Copy> ActionMap<A, T> {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Add `input` to the inputs that trigger `action`.
    pub fn bind(&mut self, action: A, input: T) -> &mut Self {
        let inputs = self.bindings.entry(action).or_default();
        if !inputs.contains(&input) {
            inputs.push(input);
        }
        self
    }

    pub fn unbind_all(&mut self, action: &A) {
        self.bindings.remove(action);
    }

    pub fn bindings(&self, action: &A) -> &[T] {
        self.bindings.get(action).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Any bound input is held.
    pub fn down(&self, snapshot: &InputSnapshot<T>, action: &A) -> bool {
        self.bindings(action).iter().any(|&i| snapshot.held(i))
    }

    /// Any bound input went down this frame.
    pub fn pressed(&self, snapshot: &InputSnapshot<T>, action: &A) -> bool {
        self.bindings(action).iter().any(|&i| snapshot.just_pressed(i))
    }

    /// Any bound input went up this frame.
    pub fn released(&self, snapshot: &InputSnapshot<T>, action: &A) -> bool {
        self.bindings(action).iter().any(|&i| snapshot.just_released(i))
    }
}

impl<A: Eq + Hash, T: Eq + Hash + Copy> Default for ActionMap<A, T> {
    fn default() -> Self {
        Self::new()
    }
}
