//! The rare ambient glow. One `Halo` value holds one state, so at most one
//! glow exists at a time.

use glam::DVec2;

use crate::api::config::HaloConfig;
use crate::core::rng::RandomSource;
use crate::extensions::easing::ease;
use crate::renderer::surface::Surface;

/// An activated glow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveHalo {
    pub start: f64,
    pub duration: f64,
    /// Unshifted position in device pixels.
    pub origin: DVec2,
    /// Base radius in device pixels.
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HaloState {
    Idle { next_at: f64 },
    Active(ActiveHalo),
}

/// State change reported by `Halo::update`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HaloTransition {
    Activated(ActiveHalo),
    Expired { next_at: f64 },
}

/// What the render pipeline needs to draw the glow this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HaloSample {
    /// Unshifted position; the pipeline applies parallax and wraparound.
    pub origin: DVec2,
    pub radius: f64,
    pub alpha: f64,
}

#[derive(Debug, Clone)]
pub struct Halo {
    state: HaloState,
}

impl Halo {
    /// Idle halo whose first activation is `first_delay` after `now`.
    pub fn new(now: f64, config: &HaloConfig, rng: &mut impl RandomSource) -> Self {
        Self {
            state: HaloState::Idle {
                next_at: now + rng.sample(config.first_delay),
            },
        }
    }

    pub fn state(&self) -> HaloState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, HaloState::Active(_))
    }

    /// Advance the state machine to `now`.
    ///
    /// At most one transition per call: an expiring glow cannot reactivate
    /// in the same frame.
    pub fn update(
        &mut self,
        now: f64,
        surface: &Surface,
        config: &HaloConfig,
        rng: &mut impl RandomSource,
    ) -> Option<HaloTransition> {
        match self.state {
            HaloState::Active(halo) => {
                if (now - halo.start) / halo.duration < 1.0 {
                    return None;
                }
                let next_at = now + rng.sample(config.gap);
                self.state = HaloState::Idle { next_at };
                log::debug!("starfield: halo expired at {:.0}, next at {:.0}", now, next_at);
                Some(HaloTransition::Expired { next_at })
            }
            HaloState::Idle { next_at } => {
                if now < next_at {
                    return None;
                }
                let size = surface.size();
                let halo = ActiveHalo {
                    start: now,
                    duration: rng.sample(config.duration),
                    origin: DVec2::new(
                        rng.sample(config.placement) * size.x,
                        rng.sample(config.placement) * size.y,
                    ),
                    radius: rng.sample(config.radius) * surface.device_scale(),
                };
                self.state = HaloState::Active(halo);
                log::debug!(
                    "starfield: halo active at ({:.0}, {:.0}) r={:.0} for {:.0} ms",
                    halo.origin.x, halo.origin.y, halo.radius, halo.duration
                );
                Some(HaloTransition::Activated(halo))
            }
        }
    }

    /// Eased alpha and grown radius at `now`, if active and not yet finished.
    pub fn sample(&self, now: f64, config: &HaloConfig) -> Option<HaloSample> {
        let HaloState::Active(halo) = self.state else {
            return None;
        };
        let t = (now - halo.start) / halo.duration;
        if t >= 1.0 {
            return None;
        }
        let growth = ease(
            config.radius_start,
            config.radius_start + config.radius_growth,
            t,
            config.easing,
        );
        Some(HaloSample {
            origin: halo.origin,
            radius: halo.radius * growth,
            alpha: ease(0.0, config.peak_alpha, t, config.easing),
        })
    }
}
