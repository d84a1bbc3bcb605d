use glam::DVec2;

use crate::api::config::CameraSpeed;

/// Ultra-slow camera pan.
///
/// The accumulators only ever grow (for positive speeds); they offset the
/// parallax-weighted draw position and never touch stored star positions.
/// Wraparound at draw time keeps the rendered coordinates bounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraDrift {
    /// Accumulated pan in device pixels.
    pub offset: DVec2,
    /// Pan speed per millisecond, before device scaling.
    pub speed: DVec2,
}

impl CameraDrift {
    pub fn new(speed: CameraSpeed) -> Self {
        Self {
            offset: DVec2::ZERO,
            speed: DVec2::new(speed.x, speed.y),
        }
    }

    /// Advance the pan by `dt` milliseconds at the given device scale.
    pub fn advance(&mut self, dt: f64, device_scale: f64) {
        self.offset += self.speed * device_scale * dt;
    }

    /// Draw offset for something at the given parallax weight.
    pub fn parallax_offset(&self, parallax: f64) -> DVec2 {
        self.offset * parallax
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulators_strictly_increase() {
        let mut cam = CameraDrift::new(CameraSpeed::default());
        let mut prev = cam.offset;
        for dt in [1.0, 16.0, 0.5, 33.3, 250.0] {
            cam.advance(dt, 1.5);
            assert!(cam.offset.x > prev.x);
            assert!(cam.offset.y > prev.y);
            prev = cam.offset;
        }
    }

    #[test]
    fn zero_dt_does_not_move() {
        let mut cam = CameraDrift::new(CameraSpeed::default());
        cam.advance(0.0, 2.0);
        assert_eq!(cam.offset, DVec2::ZERO);
    }

    #[test]
    fn offset_scales_with_device_scale() {
        let mut a = CameraDrift::new(CameraSpeed::default());
        let mut b = CameraDrift::new(CameraSpeed::default());
        a.advance(1000.0, 1.0);
        b.advance(1000.0, 2.0);
        assert!((b.offset.x - 2.0 * a.offset.x).abs() < 1e-12);
    }

    #[test]
    fn parallax_weights_the_offset() {
        let mut cam = CameraDrift::new(CameraSpeed { x: 1.0, y: 0.5 });
        cam.advance(100.0, 1.0);
        assert_eq!(cam.parallax_offset(0.0), DVec2::ZERO);
        assert_eq!(cam.parallax_offset(1.0), DVec2::new(100.0, 50.0));
        let mid = cam.parallax_offset(0.35);
        assert!((mid - DVec2::new(35.0, 17.5)).length() < 1e-9);
    }
}
