//! Win32 pointer injection
//!
//! Lets desktop builds drive a real window with synthesized touch pointers.
//! Moves are applied with `SetCursorPos` after mapping client pixels to
//! screen coordinates; button changes go through `SendInput` tagged with the
//! pen/touch signature so receivers can tell them from a physical mouse.

use crate::domain::core::{PixelPoint, SurfaceSize};
use crate::input::pointer::{ButtonState, PointerButton, PointerSink};
use crate::input::synthesizer::RenderSurface;
use windows::Win32::Foundation::{HWND, POINT, RECT};
use windows::Win32::Graphics::Gdi::ClientToScreen;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    INPUT, INPUT_0, INPUT_MOUSE, MOUSE_EVENT_FLAGS, MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP,
    MOUSEINPUT, SendInput,
};
use windows::Win32::UI::WindowsAndMessaging::{GetClientRect, SetCursorPos};

/// `dwExtraInfo` signature marking mouse input synthesized from pen or touch
const TOUCH_INPUT_SIGNATURE: usize = 0xFF51_5700;

/// Client area of a window, as seen by the synthesizer
#[derive(Debug, Clone, Copy)]
pub struct Win32Surface {
    hwnd: HWND,
}

impl Win32Surface {
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }
}

impl RenderSurface for Win32Surface {
    fn pixel_size(&self) -> SurfaceSize {
        let mut rect = RECT::default();
        if unsafe { GetClientRect(self.hwnd, &mut rect) }.is_err() {
            return SurfaceSize::default();
        }

        SurfaceSize::new(
            (rect.right - rect.left).max(0) as u32,
            (rect.bottom - rect.top).max(0) as u32,
        )
    }
}

/// Injects pointer events into the Win32 input stream for one window
#[derive(Debug, Clone, Copy)]
pub struct Win32PointerSink {
    hwnd: HWND,
}

impl Win32PointerSink {
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }

    fn send_mouse(&self, flags: MOUSE_EVENT_FLAGS) {
        let input = INPUT {
            r#type: INPUT_MOUSE,
            Anonymous: INPUT_0 {
                mi: MOUSEINPUT {
                    dwFlags: flags,
                    dwExtraInfo: TOUCH_INPUT_SIGNATURE,
                    ..Default::default()
                },
            },
        };

        let sent = unsafe { SendInput(&[input], std::mem::size_of::<INPUT>() as i32) };
        if sent != 1 {
            tracing::warn!(flags = flags.0, "SendInput rejected synthesized button event");
        }
    }
}

impl PointerSink for Win32PointerSink {
    fn move_to(&mut self, _device: u32, position: PixelPoint) {
        let mut point = POINT {
            x: position.x,
            y: position.y,
        };

        unsafe {
            if !ClientToScreen(self.hwnd, &mut point).as_bool() {
                tracing::warn!(?position, "ClientToScreen failed");
                return;
            }
            if SetCursorPos(point.x, point.y).is_err() {
                tracing::warn!(x = point.x, y = point.y, "SetCursorPos failed");
            }
        }
    }

    fn button(&mut self, _device: u32, button: PointerButton, state: ButtonState) {
        let flags = match (button, state) {
            (PointerButton::Primary, ButtonState::Pressed) => MOUSEEVENTF_LEFTDOWN,
            (PointerButton::Primary, ButtonState::Released) => MOUSEEVENTF_LEFTUP,
        };
        self.send_mouse(flags);
    }
}
