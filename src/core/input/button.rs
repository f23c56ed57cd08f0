//=========================================================================
// Button Tracker
//=========================================================================
//
// Held state and press counters for every (Control, Sign) pair.
//
// Frame lifecycle: press()/release() per event → axis() query in update
// → end_frame().
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::bindings::{Control, Sign};

//=== Button ==============================================================

/// State of one logical key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Button {
    /// Presses since the counter was last reset.
    pub downs: u32,
    /// Whether the key is currently held.
    pub pressed: bool,
}

//=== ButtonTracker =======================================================

/// Ten buttons: one per direction of each [`Control`].
#[derive(Debug, Clone, Default)]
pub struct ButtonTracker {
    buttons: [[Button; 2]; Control::ALL.len()],
}

impl ButtonTracker {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Event Processing -------------------------------------------------

    /// Registers a key-down: bumps the counter and marks the key held.
    pub fn press(&mut self, control: Control, sign: Sign) {
        let button = self.slot(control, sign);
        button.downs = button.downs.saturating_add(1);
        button.pressed = true;
    }

    /// Registers a key-up.
    pub fn release(&mut self, control: Control, sign: Sign) {
        self.slot(control, sign).pressed = false;
    }

    /// Clears the held flag of every button, keeping the counters.
    ///
    /// Used when the window loses focus and key-up events will not arrive.
    pub fn release_all(&mut self) {
        for button in self.buttons.iter_mut().flatten() {
            button.pressed = false;
        }
    }

    /// Zeroes the counters of controls that reset every frame.
    ///
    /// See [`Control::resets_each_frame`].
    pub fn end_frame(&mut self) {
        for control in Control::ALL {
            if control.resets_each_frame() {
                for button in &mut self.buttons[control.index()] {
                    button.downs = 0;
                }
            }
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn button(&self, control: Control, sign: Sign) -> Button {
        self.buttons[control.index()][sign.index()]
    }

    pub fn is_pressed(&self, control: Control, sign: Sign) -> bool {
        self.button(control, sign).pressed
    }

    /// `+1` when only the positive key is held, `-1` when only the negative
    /// one is, `0` otherwise.
    pub fn axis(&self, control: Control) -> f32 {
        let negative = self.is_pressed(control, Sign::Negative);
        let positive = self.is_pressed(control, Sign::Positive);
        match (negative, positive) {
            (false, true) => 1.0,
            (true, false) => -1.0,
            _ => 0.0,
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn slot(&mut self, control: Control, sign: Sign) -> &mut Button {
        &mut self.buttons[control.index()][sign.index()]
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
