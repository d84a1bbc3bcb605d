use serde::{Deserialize, Serialize};

use crate::api::error::{StarfieldError, StarfieldResult};
use crate::components::layer::LayerConfig;
use crate::extensions::easing::{lerp, Easing};
use crate::renderer::frame::BlendMode;
use crate::systems::peaks::PeakAdmission;

/// Closed sampling range `[min, max]`, written as a two-element JSON array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span(pub f64, pub f64);

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self(min, max)
    }

    pub fn min(self) -> f64 {
        self.0
    }

    pub fn max(self) -> f64 {
        self.1
    }

    /// Point at fraction `t` of the way from `min` to `max`.
    #[inline]
    pub fn at(self, t: f64) -> f64 {
        lerp(self.0, self.1, t)
    }

    pub fn contains(self, v: f64) -> bool {
        v >= self.0 && v <= self.1
    }

    /// Reject inverted or non-finite ranges.
    pub fn validate(self, name: &str) -> StarfieldResult<()> {
        if !self.0.is_finite() || !self.1.is_finite() || self.0 > self.1 {
            return Err(StarfieldError::InvalidRange {
                name: name.to_string(),
                min: self.0,
                max: self.1,
            });
        }
        Ok(())
    }

    /// Like `validate`, but additionally requires `min >= 0`.
    pub(crate) fn validate_non_negative(self, name: &str) -> StarfieldResult<()> {
        self.validate(name)?;
        non_negative(name, self.0)
    }

    /// Like `validate`, but additionally requires `min > 0`.
    pub(crate) fn validate_positive(self, name: &str) -> StarfieldResult<()> {
        self.validate(name)?;
        if self.0 <= 0.0 {
            return Err(StarfieldError::InvalidConfig(format!(
                "`{}` must be strictly positive, got [{}, {}]",
                name, self.0, self.1
            )));
        }
        Ok(())
    }
}

/// Camera pan speed in device pixels per millisecond (before device scaling).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSpeed {
    pub x: f64,
    pub y: f64,
}

impl Default for CameraSpeed {
    fn default() -> Self {
        Self { x: 0.0032, y: 0.0007 }
    }
}

/// Timing and shape of the rare ambient glow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HaloConfig {
    /// Delay before the first activation, measured from field build.
    pub first_delay: Span,
    /// Idle gap between two activations (ms).
    pub gap: Span,
    /// Active duration (ms).
    pub duration: Span,
    /// Base radius in logical pixels.
    pub radius: Span,
    /// Alpha at full progress.
    pub peak_alpha: f64,
    /// Placement range as a fraction of the surface (central 80% by default).
    pub placement: Span,
    /// Radius multiplier at progress 0.
    pub radius_start: f64,
    /// Extra radius multiplier gained at progress 1.
    pub radius_growth: f64,
    /// Parallax weight applied to the camera drift.
    pub parallax: f64,
    pub easing: Easing,
}

impl Default for HaloConfig {
    fn default() -> Self {
        Self {
            first_delay: Span::new(40_000.0, 90_000.0),
            gap: Span::new(35_000.0, 80_000.0),
            duration: Span::new(14_000.0, 22_000.0),
            radius: Span::new(50.0, 110.0),
            peak_alpha: 0.18,
            placement: Span::new(0.1, 0.9),
            radius_start: 0.92,
            radius_growth: 0.18,
            parallax: 0.6,
            easing: Easing::QuadInOut,
        }
    }
}

/// How the drawing surface is attached to the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceStyle {
    /// Stable identifier used to find and replace a previous surface.
    pub element_id: String,
    pub opacity: f64,
    pub z_index: i32,
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self {
            element_id: "twinkle-stars".to_string(),
            opacity: 0.95,
            z_index: 0,
        }
    }
}

/// Every tunable of the engine. Defaults reproduce the shipped look.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    /// Depth layers, far to near.
    pub layers: Vec<LayerConfig>,
    pub camera_speed: CameraSpeed,
    /// Unit drift direction multiplied by each layer's speed (leftward, slightly down).
    pub drift_direction: [f64; 2],
    /// Multiplier range applied to each layer's base alpha.
    pub base_alpha_jitter: Span,
    /// Cap on concurrently peaking stars.
    pub max_simultaneous_peaks: usize,
    pub peak_admission: PeakAdmission,
    pub peak_duration: Span,
    pub peak_gap: Span,
    /// Offset of each star's first peak from field build.
    pub initial_peak_delay: Span,
    /// Flare blend of a star that is not peaking.
    pub idle_blend: f64,
    /// Blend above which a star is drawn as a soft gradient instead of a dot.
    pub flare_threshold: f64,
    /// Gradient radius as a multiple of the star radius.
    pub flare_radius_scale: f64,
    pub peak_easing: Easing,
    pub halo: HaloConfig,
    /// Largest frame delta (ms) the clock will accept.
    pub max_frame_dt: f64,
    /// Compositing for the whole frame; additive makes overlapping glows brighten.
    pub blend: BlendMode,
    pub global_alpha: f64,
    pub surface: SurfaceStyle,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            layers: LayerConfig::default_layers(),
            camera_speed: CameraSpeed::default(),
            drift_direction: [-0.8, 0.2],
            base_alpha_jitter: Span::new(0.9, 1.1),
            max_simultaneous_peaks: 4,
            peak_admission: PeakAdmission::InOrder,
            peak_duration: Span::new(10_000.0, 16_000.0),
            peak_gap: Span::new(18_000.0, 36_000.0),
            initial_peak_delay: Span::new(0.0, 12_000.0),
            idle_blend: 0.12,
            flare_threshold: 0.45,
            flare_radius_scale: 3.2,
            peak_easing: Easing::QuadInOut,
            halo: HaloConfig::default(),
            max_frame_dt: 250.0,
            blend: BlendMode::Additive,
            global_alpha: 1.0,
            surface: SurfaceStyle::default(),
        }
    }
}

impl StarfieldConfig {
    /// Parse a configuration from JSON, overlaying it on the defaults, and validate it.
    pub fn from_json(json: &str) -> StarfieldResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Total number of stars a field built from this config will hold.
    pub fn total_stars(&self) -> usize {
        self.layers.iter().map(|l| l.count).sum()
    }

    pub fn validate(&self) -> StarfieldResult<()> {
        if self.layers.is_empty() {
            return Err(StarfieldError::InvalidConfig("at least one layer is required".into()));
        }
        for (i, layer) in self.layers.iter().enumerate() {
            layer.validate(i)?;
        }

        finite("camera_speed.x", self.camera_speed.x)?;
        finite("camera_speed.y", self.camera_speed.y)?;
        finite("drift_direction[0]", self.drift_direction[0])?;
        finite("drift_direction[1]", self.drift_direction[1])?;

        self.base_alpha_jitter.validate("base_alpha_jitter")?;
        self.peak_duration.validate_positive("peak_duration")?;
        self.peak_gap.validate_non_negative("peak_gap")?;
        self.initial_peak_delay.validate_non_negative("initial_peak_delay")?;
        unit("idle_blend", self.idle_blend)?;
        unit("flare_threshold", self.flare_threshold)?;
        non_negative("flare_radius_scale", self.flare_radius_scale)?;

        let halo = &self.halo;
        halo.first_delay.validate_non_negative("halo.first_delay")?;
        halo.gap.validate_non_negative("halo.gap")?;
        halo.duration.validate_positive("halo.duration")?;
        halo.radius.validate_non_negative("halo.radius")?;
        halo.placement.validate("halo.placement")?;
        if !Span::new(0.0, 1.0).contains(halo.placement.min())
            || !Span::new(0.0, 1.0).contains(halo.placement.max())
        {
            return Err(StarfieldError::InvalidConfig(
                "`halo.placement` must lie within [0, 1]".into(),
            ));
        }
        unit("halo.peak_alpha", halo.peak_alpha)?;
        unit("halo.parallax", halo.parallax)?;
        non_negative("halo.radius_start", halo.radius_start)?;
        non_negative("halo.radius_growth", halo.radius_growth)?;

        if !(self.max_frame_dt.is_finite() && self.max_frame_dt > 0.0) {
            return Err(StarfieldError::InvalidConfig(format!(
                "`max_frame_dt` must be positive, got {}",
                self.max_frame_dt
            )));
        }
        unit("global_alpha", self.global_alpha)?;
        unit("surface.opacity", self.surface.opacity)?;
        if self.surface.element_id.is_empty() {
            return Err(StarfieldError::InvalidConfig("`surface.element_id` is empty".into()));
        }
        Ok(())
    }
}

pub(crate) fn finite(name: &str, v: f64) -> StarfieldResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(StarfieldError::InvalidConfig(format!("`{}` must be finite, got {}", name, v)))
    }
}

pub(crate) fn non_negative(name: &str, v: f64) -> StarfieldResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(StarfieldError::InvalidConfig(format!("`{}` must be finite and >= 0, got {}", name, v)))
    }
}

pub(crate) fn unit(name: &str, v: f64) -> StarfieldResult<()> {
    if (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(StarfieldError::InvalidConfig(format!("`{}` must lie within [0, 1], got {}", name, v)))
    }
}
