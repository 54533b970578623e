//! Touch input handling
//!
//! Synthesizes a single pointer device from the touch panel's event stream.

pub mod pointer;
pub mod synthesizer;

pub use pointer::{
    ButtonState, PointerButton, PointerEvent, PointerSink, RecordingSink, TOUCH_POINTER_ID,
};
pub use synthesizer::{RenderSurface, TouchPointerSynthesizer};
