use glam::DVec2;

/// Host viewport as reported by the page: logical size plus device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub device_scale: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, device_scale: f64) -> Self {
        Self { width, height, device_scale }
    }
}

/// Backing resolution of the drawing surface.
///
/// Width and height are device pixels and never drop below 1, so
/// wraparound always has a positive modulus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    viewport: Viewport,
    device_scale: f64,
    width: u32,
    height: u32,
}

impl Surface {
    pub fn new(viewport: Viewport) -> Self {
        let mut surface = Self {
            viewport,
            device_scale: 1.0,
            width: 1,
            height: 1,
        };
        surface.resize(viewport);
        surface
    }

    /// Recompute the backing resolution. Returns true if the pixel size changed.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        let scale = if viewport.device_scale.is_finite() {
            viewport.device_scale.max(1.0)
        } else {
            1.0
        };
        let width = device_pixels(viewport.width, scale);
        let height = device_pixels(viewport.height, scale);
        if width == 1 || height == 1 {
            log::warn!(
                "starfield: degenerate viewport {}x{}, clamped to {}x{} px",
                viewport.width, viewport.height, width, height
            );
        }

        let changed = width != self.width || height != self.height;
        self.viewport = viewport;
        self.device_scale = scale;
        self.width = width;
        self.height = height;
        changed
    }

    /// Backing width in device pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Backing height in device pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width as f64, self.height as f64)
    }

    /// Effective device scale (`max(1, devicePixelRatio)`).
    pub fn device_scale(&self) -> f64 {
        self.device_scale
    }

    /// Logical (CSS) size of the surface.
    pub fn logical_size(&self) -> DVec2 {
        DVec2::new(self.viewport.width.max(0.0), self.viewport.height.max(0.0))
    }

    /// Map a device-space point into `[0, width) × [0, height)`.
    pub fn wrap(&self, p: DVec2) -> DVec2 {
        DVec2::new(
            wrap_coord(p.x, self.width as f64),
            wrap_coord(p.y, self.height as f64),
        )
    }
}

fn device_pixels(logical: f64, scale: f64) -> u32 {
    let px = (logical * scale).floor();
    if px.is_finite() && px >= 1.0 {
        px.min(u32::MAX as f64) as u32
    } else {
        1
    }
}

/// Wrap `v` into `[0, limit)` for a positive `limit`.
#[inline]
pub fn wrap_coord(v: f64, limit: f64) -> f64 {
    let r = v.rem_euclid(limit);
    // rem_euclid can round up to `limit` for tiny negative inputs.
    if r >= limit {
        0.0
    } else {
        r
    }
}
