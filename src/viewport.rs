/// Width and height of the simulation surface's aspect ratio.
pub const ASPECT: [f64; 2] = [16.0, 9.0];

/// Size of the simulation surface for a given container.
///
/// Drawing happens in logical units; the backing buffer is the logical size
/// times the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

impl Viewport {
    /// Fill the container width and derive the height from the aspect ratio.
    pub fn fit(container_width: f64, pixel_ratio: f64) -> Self {
        let width = container_width.max(0.0);
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        Self {
            width,
            height: width * ASPECT[1] / ASPECT[0],
            pixel_ratio,
        }
    }

    /// Backing buffer dimensions in device pixels.
    pub fn backing_size(&self) -> [u32; 2] {
        [
            (self.width * self.pixel_ratio).round() as u32,
            (self.height * self.pixel_ratio).round() as u32,
        ]
    }

    /// Logical size as `[width, height]`.
    pub fn logical_size(&self) -> [f64; 2] {
        [self.width, self.height]
    }
}
