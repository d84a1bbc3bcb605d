//! A single star: drift, shimmer and its flare cycle.

use std::f64::consts::TAU;

use glam::DVec2;

use crate::extensions::easing::{lerp, Easing};
use crate::renderer::surface::Surface;

/// Where a star is in its flare cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PeakPhase {
    /// Resting; eligible to flare once simulated time reaches `next_start`.
    Idle { next_start: f64 },
    /// Flaring from `start` until `end`.
    Peaking { start: f64, end: f64 },
}

/// A star with drift, shimmer and flare state.
#[derive(Debug, Clone)]
pub struct Star {
    /// Stored position in device pixels, kept inside the surface.
    pub position: DVec2,
    /// Drift in device pixels per millisecond.
    pub velocity: DVec2,
    /// Radius in device pixels.
    pub radius: f64,
    pub base_alpha: f64,
    /// Shimmer amplitude at rest.
    pub idle_amp: f64,
    /// Shimmer amplitude at full flare.
    pub peak_amp: f64,
    /// Oscillation phase in [0, 2π).
    pub phase: f64,
    /// Radians per millisecond.
    pub angular_frequency: f64,
    /// Camera drift weight for this star's layer.
    pub parallax: f64,
    pub peak_duration: f64,
    pub peak_gap: f64,
    pub peak: PeakPhase,
}

impl Star {
    /// Drift and advance the oscillation by `dt` milliseconds.
    pub fn advance(&mut self, dt: f64, surface: &Surface) {
        self.position = surface.wrap(self.position + self.velocity * dt);
        self.phase = (self.phase + self.angular_frequency * dt).rem_euclid(TAU);
    }

    /// Smooth 0..1 shimmer, independent of flare state.
    #[inline]
    pub fn oscillation(&self) -> f64 {
        0.5 * (1.0 - self.phase.cos())
    }

    pub fn is_peaking(&self) -> bool {
        matches!(self.peak, PeakPhase::Peaking { .. })
    }

    /// Start of the current or next flare.
    pub fn peak_start(&self) -> f64 {
        match self.peak {
            PeakPhase::Idle { next_start } => next_start,
            PeakPhase::Peaking { start, .. } => start,
        }
    }

    /// Flare progress in [0, ∞) while peaking.
    pub fn peak_progress(&self, now: f64) -> Option<f64> {
        match self.peak {
            PeakPhase::Peaking { start, .. } => Some((now - start) / self.peak_duration),
            PeakPhase::Idle { .. } => None,
        }
    }

    /// Whether the star may begin flaring at `now`.
    pub fn is_due(&self, now: f64) -> bool {
        matches!(self.peak, PeakPhase::Idle { next_start } if now >= next_start)
    }

    pub fn begin_peak(&mut self, now: f64) {
        self.peak = PeakPhase::Peaking {
            start: now,
            end: now + self.peak_duration,
        };
    }

    /// Leave the flare and schedule the next one one gap from `now`.
    pub fn end_peak(&mut self, now: f64) {
        self.peak = PeakPhase::Idle {
            next_start: now + self.peak_gap,
        };
    }

    /// How far the shimmer amplitude has moved toward the peak amplitude.
    pub fn flare_blend(&self, now: f64, idle_blend: f64, easing: Easing) -> f64 {
        match self.peak_progress(now) {
            Some(t) if t < 1.0 => easing.apply(t),
            _ => idle_blend,
        }
    }

    /// Shimmer amplitude at the given blend.
    pub fn amplitude(&self, blend: f64) -> f64 {
        lerp(self.idle_amp, self.peak_amp, blend)
    }

    /// Instantaneous alpha, clamped to [0, 1].
    pub fn alpha(&self, blend: f64) -> f64 {
        (self.base_alpha + self.amplitude(blend) * self.oscillation()).clamp(0.0, 1.0)
    }
}
