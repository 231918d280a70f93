// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer input as delivered by the host shell.

use kurbo::Point;

/// Pointer buttons the viewer distinguishes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Usually the left button.
    Primary,
    /// Usually the right button.
    Secondary,
    /// Wheel button.
    Middle,
}

bitflags::bitflags! {
    /// Keyboard modifiers held during a pointer event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0001;
        /// Control.
        const CTRL  = 0b0010;
        /// Alt / Option.
        const ALT   = 0b0100;
        /// Meta / Command / Windows.
        const META  = 0b1000;
    }
}

/// A button press or release.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Position in device pixels, origin at the top-left of the viewport.
    pub position: Point,
    /// Button that changed state.
    pub button: PointerButton,
    /// Modifiers held at the time.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// A primary-button event without modifiers.
    pub fn primary(position: impl Into<Point>) -> Self {
        Self {
            position: position.into(),
            button: PointerButton::Primary,
            modifiers: Modifiers::empty(),
        }
    }

    /// Builder-style modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Alt alone with the primary button: pick starting from the root.
    pub fn is_alt_pick(&self) -> bool {
        self.button == PointerButton::Primary && self.modifiers == Modifiers::ALT
    }
}
