//! Pointer sink interface
//!
//! The synthesizer never talks to a windowing system directly. It emits
//! primitive pointer operations into a [`PointerSink`], which the host
//! implements on top of its own event-injection mechanism.

use crate::domain::core::PixelPoint;

/// Device id reserved for pointer events that originate from the touch panel
///
/// Matches the id windowing layers conventionally reserve for touch-emulated
/// mice, so downstream code can still tell the two apart if it cares to.
pub const TOUCH_POINTER_ID: u32 = u32::MAX;

/// Pointer buttons the synthesizer can press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
}

/// Whether a button went down or came up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// One synthesized pointer operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Absolute move to a surface pixel
    Motion { device: u32, position: PixelPoint },
    /// Button press or release at the current position
    Button {
        device: u32,
        button: PointerButton,
        state: ButtonState,
    },
}

/// Destination for synthesized pointer events
pub trait PointerSink {
    /// Moves the pointer of `device` to `position` in surface pixels
    fn move_to(&mut self, device: u32, position: PixelPoint);

    /// Changes the state of `button` on `device`
    fn button(&mut self, device: u32, button: PointerButton, state: ButtonState);
}

impl<S: PointerSink + ?Sized> PointerSink for &mut S {
    fn move_to(&mut self, device: u32, position: PixelPoint) {
        (**self).move_to(device, position);
    }

    fn button(&mut self, device: u32, button: PointerButton, state: ButtonState) {
        (**self).button(device, button, state);
    }
}

/// Sink that keeps every event in order of emission
///
/// Used by hosts that drain synthesized events into their own queue once per
/// frame, and by tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: Vec<PointerEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events, oldest first
    pub fn events(&self) -> &[PointerEvent] {
        &self.events
    }

    /// Removes and returns all recorded events
    pub fn drain(&mut self) -> Vec<PointerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Counts recorded button events with the given state
    pub fn count_buttons(&self, state: ButtonState) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, PointerEvent::Button { state: s, .. } if *s == state))
            .count()
    }
}

impl PointerSink for RecordingSink {
    fn move_to(&mut self, device: u32, position: PixelPoint) {
        self.events.push(PointerEvent::Motion { device, position });
    }

    fn button(&mut self, device: u32, button: PointerButton, state: ButtonState) {
        self.events.push(PointerEvent::Button { device, button, state });
    }
}
