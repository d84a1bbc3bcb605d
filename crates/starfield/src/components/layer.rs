use std::f64::consts::TAU;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::api::config::{finite, unit, Span, StarfieldConfig};
use crate::api::error::StarfieldResult;
use crate::components::star::{PeakPhase, Star};
use crate::core::rng::RandomSource;
use crate::renderer::surface::Surface;

/// Generation template for one depth layer.
///
/// Layers are listed far to near: nearer layers drift faster, follow the
/// camera more closely and shimmer harder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    /// Number of stars sampled for this layer.
    pub count: usize,
    /// Drift speed in logical pixels per millisecond.
    pub speed: f64,
    /// Camera drift weight (0 = static, 1 = full camera motion).
    pub parallax: f64,
    /// Radius range in logical pixels.
    pub radius: Span,
    pub base_alpha: f64,
    pub idle_amp: Span,
    pub peak_amp: Span,
    /// Oscillation period range in milliseconds.
    pub period: Span,
}

impl LayerConfig {
    /// The far / mid / near layers of the shipped look.
    pub fn default_layers() -> Vec<LayerConfig> {
        vec![
            LayerConfig {
                count: 70,
                speed: 0.005,
                parallax: 0.35,
                radius: Span::new(0.9, 1.7),
                base_alpha: 0.10,
                idle_amp: Span::new(0.08, 0.14),
                peak_amp: Span::new(0.22, 0.32),
                period: Span::new(9_000.0, 12_000.0),
            },
            LayerConfig {
                count: 45,
                speed: 0.009,
                parallax: 0.65,
                radius: Span::new(1.0, 2.0),
                base_alpha: 0.11,
                idle_amp: Span::new(0.10, 0.16),
                peak_amp: Span::new(0.24, 0.34),
                period: Span::new(8_000.0, 11_000.0),
            },
            LayerConfig {
                count: 30,
                speed: 0.015,
                parallax: 1.00,
                radius: Span::new(1.2, 2.4),
                base_alpha: 0.12,
                idle_amp: Span::new(0.12, 0.18),
                peak_amp: Span::new(0.26, 0.36),
                period: Span::new(7_000.0, 10_000.0),
            },
        ]
    }

    pub fn validate(&self, index: usize) -> StarfieldResult<()> {
        let name = |field: &str| format!("layers[{}].{}", index, field);
        finite(&name("speed"), self.speed)?;
        unit(&name("parallax"), self.parallax)?;
        unit(&name("base_alpha"), self.base_alpha)?;
        self.radius.validate_non_negative(&name("radius"))?;
        self.idle_amp.validate(&name("idle_amp"))?;
        self.peak_amp.validate(&name("peak_amp"))?;
        self.period.validate_positive(&name("period"))
    }

    /// Sample one star of this layer, placed uniformly over the surface.
    pub fn sample_star(
        &self,
        config: &StarfieldConfig,
        surface: &Surface,
        now: f64,
        rng: &mut impl RandomSource,
    ) -> Star {
        let scale = surface.device_scale();
        let size = surface.size();
        let direction = DVec2::from(config.drift_direction);
        let period = rng.sample(self.period);

        Star {
            position: DVec2::new(rng.next_f64() * size.x, rng.next_f64() * size.y),
            velocity: direction * self.speed * scale,
            radius: rng.sample(self.radius) * scale,
            base_alpha: self.base_alpha * rng.sample(config.base_alpha_jitter),
            idle_amp: rng.sample(self.idle_amp),
            peak_amp: rng.sample(self.peak_amp),
            phase: rng.next_f64() * TAU,
            angular_frequency: TAU / period,
            parallax: self.parallax,
            peak_duration: rng.sample(config.peak_duration),
            peak_gap: rng.sample(config.peak_gap),
            peak: PeakPhase::Idle {
                next_start: now + rng.sample(config.initial_peak_delay),
            },
        }
    }
}
