//! Raw touch panel events
//!
//! Touch events arrive from the host's input polling step with coordinates
//! normalized to the panel, independent of the surface they will be mapped to.

/// Identifier of one contact point on a multi-touch panel
///
/// The identifier is stable from the contact's `Down` to its `Up`. Ids are
/// reused by the hardware once a contact is lifted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContactId(pub i64);

/// Phase of a touch contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    /// A finger touched the panel
    Down,
    /// A finger already on the panel moved
    Move,
    /// A finger was lifted from the panel
    Up,
}

/// One touch panel event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub contact: ContactId,
    /// Horizontal position in `[0, 1]`, left to right
    pub x: f32,
    /// Vertical position in `[0, 1]`, top to bottom
    pub y: f32,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, contact: ContactId, x: f32, y: f32) -> Self {
        Self { phase, contact, x, y }
    }

    pub fn down(contact: i64, x: f32, y: f32) -> Self {
        Self::new(TouchPhase::Down, ContactId(contact), x, y)
    }

    pub fn moved(contact: i64, x: f32, y: f32) -> Self {
        Self::new(TouchPhase::Move, ContactId(contact), x, y)
    }

    pub fn up(contact: i64, x: f32, y: f32) -> Self {
        Self::new(TouchPhase::Up, ContactId(contact), x, y)
    }
}
