//! Touch-to-pointer synthesis
//!
//! Presents a multi-touch panel as a single pointer device to code that only
//! understands pointer semantics. Exactly one contact owns the pointer at a
//! time: from its `Down` until its matching `Up`, every other contact is
//! dropped.
//!
//! Threading: the synthesizer is driven from the host's input polling step
//! only. It holds a non-owning handle to the active surface, so it is neither
//! `Send` nor `Sync`.

use std::rc::{Rc, Weak};

use crate::domain::core::SurfaceSize;
use crate::domain::touch::{ContactId, TouchEvent, TouchPhase};
use crate::input::pointer::{ButtonState, PointerButton, PointerSink, TOUCH_POINTER_ID};

/// A rendering surface the pointer events are addressed to
pub trait RenderSurface {
    /// Current size of the drawable area in pixels
    fn pixel_size(&self) -> SurfaceSize;
}

/// Converts touch events into pointer events for the active surface
pub struct TouchPointerSynthesizer<S: PointerSink> {
    sink: S,
    surface: Option<Weak<dyn RenderSurface>>,
    tracked: Option<ContactId>,
}

impl<S: PointerSink> TouchPointerSynthesizer<S> {
    /// Creates a synthesizer with no active surface and no tracked contact
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            surface: None,
            tracked: None,
        }
    }

    /// Records the surface that becomes current
    ///
    /// Only a weak handle is kept. Replacing the surface does not reset the
    /// tracked contact.
    pub fn set_active_surface(&mut self, surface: &Rc<dyn RenderSurface>) {
        self.surface = Some(Rc::downgrade(surface));
    }

    /// Forgets the active surface; must be called when it is destroyed
    pub fn clear_active_surface(&mut self) {
        self.surface = None;
    }

    pub fn has_active_surface(&self) -> bool {
        self.surface
            .as_ref()
            .is_some_and(|surface| surface.strong_count() > 0)
    }

    /// Contact currently owning the pointer, if any
    pub fn tracked_contact(&self) -> Option<ContactId> {
        self.tracked
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Processes one touch event
    ///
    /// Without a live active surface this is a no-op. Otherwise the event is
    /// admitted only if no contact is tracked or it belongs to the tracked
    /// contact:
    /// - `Down` adopts the contact and emits a move followed by a press
    /// - `Move` emits a move
    /// - `Up` emits a release and clears the tracked contact
    ///
    /// On a surface with no addressable pixel `Down` and `Move` emit nothing,
    /// while `Up` still releases.
    pub fn on_touch_event(&mut self, event: &TouchEvent) {
        let Some(size) = self.active_surface_size() else {
            return;
        };

        if self.tracked.is_some_and(|tracked| tracked != event.contact) {
            tracing::trace!(contact = event.contact.0, phase = ?event.phase, "dropping untracked contact");
            return;
        }

        match event.phase {
            TouchPhase::Down => {
                // No addressable pixel: the contact is not adopted
                let Some(position) = size.to_pixel(event.x, event.y) else {
                    return;
                };
                self.tracked = Some(event.contact);
                self.sink.move_to(TOUCH_POINTER_ID, position);
                self.sink
                    .button(TOUCH_POINTER_ID, PointerButton::Primary, ButtonState::Pressed);
            }
            TouchPhase::Up => {
                self.tracked = None;
                self.sink
                    .button(TOUCH_POINTER_ID, PointerButton::Primary, ButtonState::Released);
            }
            TouchPhase::Move => {
                if let Some(position) = size.to_pixel(event.x, event.y) {
                    self.sink.move_to(TOUCH_POINTER_ID, position);
                }
            }
        }
    }

    /// Releases the pointer held by the tracked contact
    ///
    /// For hosts that lose a contact's `Up`, e.g. when the touch device is
    /// disconnected. Emits a release only if a contact is tracked.
    pub fn cancel_contact(&mut self) {
        if let Some(contact) = self.tracked.take() {
            tracing::debug!(contact = contact.0, "cancelling tracked contact");
            self.sink
                .button(TOUCH_POINTER_ID, PointerButton::Primary, ButtonState::Released);
        }
    }

    fn active_surface_size(&mut self) -> Option<SurfaceSize> {
        let surface = self.surface.as_ref()?.upgrade();
        match surface {
            Some(surface) => Some(surface.pixel_size()),
            None => {
                self.surface = None;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::core::PixelPoint;
    use crate::input::pointer::{PointerEvent, RecordingSink};
    use std::cell::Cell;

    struct FakeSurface {
        size: Cell<SurfaceSize>,
    }

    impl FakeSurface {
        fn new(width: u32, height: u32) -> Rc<Self> {
            Rc::new(Self {
                size: Cell::new(SurfaceSize::new(width, height)),
            })
        }
    }

    impl RenderSurface for FakeSurface {
        fn pixel_size(&self) -> SurfaceSize {
            self.size.get()
        }
    }

    fn motion(x: i32, y: i32) -> PointerEvent {
        PointerEvent::Motion {
            device: TOUCH_POINTER_ID,
            position: PixelPoint::new(x, y),
        }
    }

    fn button(state: ButtonState) -> PointerEvent {
        PointerEvent::Button {
            device: TOUCH_POINTER_ID,
            button: PointerButton::Primary,
            state,
        }
    }

    fn synthesizer_on(surface: &Rc<FakeSurface>) -> TouchPointerSynthesizer<RecordingSink> {
        let mut synthesizer = TouchPointerSynthesizer::new(RecordingSink::new());
        let surface: Rc<dyn RenderSurface> = surface.clone();
        synthesizer.set_active_surface(&surface);
        synthesizer
    }

    #[test]
    fn no_surface_is_noop() {
        let mut synthesizer = TouchPointerSynthesizer::new(RecordingSink::new());
        synthesizer.on_touch_event(&TouchEvent::down(1, 0.5, 0.5));

        assert!(synthesizer.sink().events().is_empty());
        assert_eq!(synthesizer.tracked_contact(), None);
    }

    #[test]
    fn tap_emits_move_press_release() {
        let surface = FakeSurface::new(800, 600);
        let mut synthesizer = synthesizer_on(&surface);

        synthesizer.on_touch_event(&TouchEvent::down(7, 0.5, 0.5));
        assert_eq!(synthesizer.tracked_contact(), Some(ContactId(7)));
        synthesizer.on_touch_event(&TouchEvent::up(7, 0.5, 0.5));

        assert_eq!(
            synthesizer.sink().events(),
            &[
                motion(400, 300),
                button(ButtonState::Pressed),
                button(ButtonState::Released),
            ]
        );
        assert_eq!(synthesizer.tracked_contact(), None);
    }

    #[test]
    fn drag_emits_moves_without_buttons() {
        let surface = FakeSurface::new(100, 100);
        let mut synthesizer = synthesizer_on(&surface);

        synthesizer.on_touch_event(&TouchEvent::down(1, 0.1, 0.1));
        synthesizer.on_touch_event(&TouchEvent::moved(1, 0.2, 0.3));
        synthesizer.on_touch_event(&TouchEvent::moved(1, 0.4, 0.6));
        synthesizer.on_touch_event(&TouchEvent::up(1, 0.4, 0.6));

        assert_eq!(
            synthesizer.sink().events(),
            &[
                motion(10, 10),
                button(ButtonState::Pressed),
                motion(20, 30),
                motion(40, 60),
                button(ButtonState::Released),
            ]
        );
    }

    #[test]
    fn second_contact_is_ignored_while_first_is_tracked() {
        let surface = FakeSurface::new(800, 600);
        let mut synthesizer = synthesizer_on(&surface);

        synthesizer.on_touch_event(&TouchEvent::down(1, 0.0, 0.0));
        let before = synthesizer.sink().events().len();

        synthesizer.on_touch_event(&TouchEvent::down(2, 0.9, 0.9));
        synthesizer.on_touch_event(&TouchEvent::moved(2, 0.8, 0.8));
        synthesizer.on_touch_event(&TouchEvent::up(2, 0.8, 0.8));

        assert_eq!(synthesizer.sink().events().len(), before);
        assert_eq!(synthesizer.tracked_contact(), Some(ContactId(1)));

        synthesizer.on_touch_event(&TouchEvent::up(1, 0.0, 0.0));
        assert_eq!(synthesizer.sink().count_buttons(ButtonState::Pressed), 1);
        assert_eq!(synthesizer.sink().count_buttons(ButtonState::Released), 1);
    }

    #[test]
    fn next_contact_is_admitted_after_release() {
        let surface = FakeSurface::new(800, 600);
        let mut synthesizer = synthesizer_on(&surface);

        synthesizer.on_touch_event(&TouchEvent::down(1, 0.0, 0.0));
        synthesizer.on_touch_event(&TouchEvent::up(1, 0.0, 0.0));
        synthesizer.on_touch_event(&TouchEvent::down(2, 1.0, 1.0));

        assert_eq!(synthesizer.tracked_contact(), Some(ContactId(2)));
        assert_eq!(synthesizer.sink().events()[3], motion(799, 599));
    }

    #[test]
    fn surface_replacement_keeps_tracking() {
        let first = FakeSurface::new(800, 600);
        let second = FakeSurface::new(200, 100);
        let mut synthesizer = synthesizer_on(&first);

        synthesizer.on_touch_event(&TouchEvent::down(3, 0.5, 0.5));
        let second_dyn: Rc<dyn RenderSurface> = second.clone();
        synthesizer.set_active_surface(&second_dyn);
        synthesizer.on_touch_event(&TouchEvent::moved(3, 0.5, 0.5));

        assert_eq!(synthesizer.tracked_contact(), Some(ContactId(3)));
        assert_eq!(synthesizer.sink().events()[2], motion(100, 50));
    }

    #[test]
    fn dropped_surface_makes_events_noop() {
        let surface = FakeSurface::new(800, 600);
        let mut synthesizer = synthesizer_on(&surface);
        drop(surface);

        synthesizer.on_touch_event(&TouchEvent::down(1, 0.5, 0.5));

        assert!(synthesizer.sink().events().is_empty());
        assert!(!synthesizer.has_active_surface());
    }

    #[test]
    fn cleared_surface_makes_events_noop() {
        let surface = FakeSurface::new(800, 600);
        let mut synthesizer = synthesizer_on(&surface);
        assert!(synthesizer.has_active_surface());

        synthesizer.clear_active_surface();
        synthesizer.on_touch_event(&TouchEvent::down(1, 0.5, 0.5));

        assert!(synthesizer.sink().events().is_empty());
    }

    #[test]
    fn surface_resize_is_picked_up_per_event() {
        let surface = FakeSurface::new(800, 600);
        let mut synthesizer = synthesizer_on(&surface);

        synthesizer.on_touch_event(&TouchEvent::down(1, 1.0, 1.0));
        surface.size.set(SurfaceSize::new(1280, 720));
        synthesizer.on_touch_event(&TouchEvent::moved(1, 1.0, 1.0));

        assert_eq!(synthesizer.sink().events()[0], motion(799, 599));
        assert_eq!(synthesizer.sink().events()[2], motion(1279, 719));
    }

    #[test]
    fn cancel_contact_releases_wedged_pointer() {
        let surface = FakeSurface::new(800, 600);
        let mut synthesizer = synthesizer_on(&surface);

        synthesizer.on_touch_event(&TouchEvent::down(1, 0.5, 0.5));
        synthesizer.cancel_contact();
        assert_eq!(synthesizer.tracked_contact(), None);
        assert_eq!(synthesizer.sink().count_buttons(ButtonState::Released), 1);

        synthesizer.on_touch_event(&TouchEvent::down(2, 0.5, 0.5));
        assert_eq!(synthesizer.tracked_contact(), Some(ContactId(2)));
    }

    #[test]
    fn cancel_without_contact_emits_nothing() {
        let mut synthesizer = TouchPointerSynthesizer::new(RecordingSink::new());
        synthesizer.cancel_contact();
        assert!(synthesizer.into_sink().events().is_empty());
    }

    #[test]
    fn release_survives_surface_collapsing_to_zero() {
        let surface = FakeSurface::new(800, 600);
        let mut synthesizer = synthesizer_on(&surface);

        synthesizer.on_touch_event(&TouchEvent::down(1, 0.5, 0.5));
        surface.size.set(SurfaceSize::new(0, 0));
        synthesizer.on_touch_event(&TouchEvent::moved(1, 0.6, 0.6));
        synthesizer.on_touch_event(&TouchEvent::up(1, 0.6, 0.6));

        assert_eq!(synthesizer.tracked_contact(), None);
        assert_eq!(synthesizer.sink().count_buttons(ButtonState::Pressed), 1);
        assert_eq!(synthesizer.sink().count_buttons(ButtonState::Released), 1);

        surface.size.set(SurfaceSize::new(800, 600));
        synthesizer.on_touch_event(&TouchEvent::down(2, 0.0, 0.0));
        assert_eq!(synthesizer.tracked_contact(), Some(ContactId(2)));
    }

    #[test]
    fn down_on_empty_surface_is_not_adopted() {
        let surface = FakeSurface::new(0, 600);
        let mut synthesizer = synthesizer_on(&surface);

        synthesizer.on_touch_event(&TouchEvent::down(1, 0.5, 0.5));

        assert_eq!(synthesizer.tracked_contact(), None);
        assert!(synthesizer.sink().events().is_empty());
    }

    #[test]
    fn borrowed_sink_is_drained_between_frames() {
        let surface = FakeSurface::new(800, 600);
        let surface_dyn: Rc<dyn RenderSurface> = surface.clone();
        let mut sink = RecordingSink::new();

        {
            let mut synthesizer = TouchPointerSynthesizer::new(&mut sink);
            synthesizer.set_active_surface(&surface_dyn);
            synthesizer.on_touch_event(&TouchEvent::down(4, 0.5, 0.5));
            assert_eq!(synthesizer.sink_mut().drain().len(), 2);

            synthesizer.on_touch_event(&TouchEvent::up(4, 0.5, 0.5));
        }

        assert_eq!(sink.events(), &[button(ButtonState::Released)]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn phase_from(index: u8) -> TouchPhase {
            match index {
                0 => TouchPhase::Down,
                1 => TouchPhase::Move,
                _ => TouchPhase::Up,
            }
        }

        proptest! {
            #[test]
            fn presses_and_releases_stay_paired(
                steps in proptest::collection::vec(
                    (0u8..3, 0i64..3, 0.0f32..1.0, 0.0f32..1.0, any::<bool>()),
                    0..48,
                ),
            ) {
                let surface = FakeSurface::new(800, 600);
                let mut synthesizer = synthesizer_on(&surface);

                for (phase, contact, x, y, collapsed) in steps {
                    let size = if collapsed {
                        SurfaceSize::new(0, 0)
                    } else {
                        SurfaceSize::new(800, 600)
                    };
                    surface.size.set(size);

                    let tracked = synthesizer.tracked_contact();
                    // Hardware never repeats a down for a contact it already reported
                    if phase_from(phase) == TouchPhase::Down && tracked == Some(ContactId(contact)) {
                        continue;
                    }
                    let emitted_before = synthesizer.sink().events().len();
                    synthesizer.on_touch_event(&TouchEvent::new(
                        phase_from(phase),
                        ContactId(contact),
                        x,
                        y,
                    ));

                    if tracked.is_some_and(|id| id != ContactId(contact)) {
                        prop_assert_eq!(synthesizer.sink().events().len(), emitted_before);
                        prop_assert_eq!(synthesizer.tracked_contact(), tracked);
                    }
                }

                if let Some(ContactId(id)) = synthesizer.tracked_contact() {
                    synthesizer.on_touch_event(&TouchEvent::up(id, 0.5, 0.5));
                }
                prop_assert_eq!(synthesizer.tracked_contact(), None);

                let mut held = false;
                for event in synthesizer.sink().events() {
                    if let PointerEvent::Button { state, .. } = event {
                        match state {
                            ButtonState::Pressed => {
                                prop_assert!(!held, "press while already pressed");
                                held = true;
                            }
                            ButtonState::Released => held = false,
                        }
                    }
                }
                prop_assert!(!held, "press without a following release");
            }
        }
    }
}
