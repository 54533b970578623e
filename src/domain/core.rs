//! Core geometry types for pointer synthesis
//!
//! This module defines pure types that work exclusively with surface pixels
//! and normalized panel coordinates. Nothing here knows about a windowing
//! system or a touch driver.

/// Pixel dimensions of a rendering surface
///
/// A surface with either dimension equal to zero has no addressable pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    /// Creates a new surface size
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if the surface has no addressable pixel
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Maps a normalized panel position onto this surface
    ///
    /// Each axis is scaled by the surface dimension, rounded to the nearest
    /// pixel and clamped into `[0, dim - 1]`, so `(1.0, 1.0)` lands on the
    /// last pixel rather than one past it.
    ///
    /// # Returns
    /// The pixel position, or `None` when the surface is empty
    pub fn to_pixel(&self, nx: f32, ny: f32) -> Option<PixelPoint> {
        if self.is_empty() {
            return None;
        }

        Some(PixelPoint {
            x: scale_axis(nx, self.width),
            y: scale_axis(ny, self.height),
        })
    }
}

/// Position on a surface in whole pixels, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    /// Creates a new pixel point
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

fn scale_axis(normalized: f32, dim: u32) -> i32 {
    let max = dim.saturating_sub(1).min(i32::MAX as u32) as i32;
    // NaN saturates to 0 in the float-to-int cast
    let scaled = (normalized as f64 * dim as f64).round() as i32;
    scaled.clamp(0, max)
}
