//! Input abstraction consumed by the player controller.
//!
//! The core never polls a keyboard; whoever owns the real input device
//! implements `InputSource` and hands it to `GameEngine::update` each
//! tick. Tests and the headless harness use the plain `KeyState` value.

/// Four directional input signals. More than one may be active in the
/// same tick, which produces diagonal movement.
pub trait InputSource {
    fn left(&self) -> bool;
    fn right(&self) -> bool;
    fn up(&self) -> bool;
    fn down(&self) -> bool;
}

/// Value-type input snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl KeyState {
    pub fn idle() -> Self {
        Self::default()
    }
}

impl InputSource for KeyState {
    fn left(&self) -> bool {
        self.left
    }

    fn right(&self) -> bool {
        self.right
    }

    fn up(&self) -> bool {
        self.up
    }

    fn down(&self) -> bool {
        self.down
    }
}
