use crate::api::config::StarfieldConfig;
use crate::components::star::Star;
use crate::core::rng::RandomSource;
use crate::renderer::surface::Surface;

/// The star population, sampled layer by layer.
///
/// Rebuilt from scratch on every resize; nothing carries over.
pub struct ParticleField {
    stars: Vec<Star>,
}

impl ParticleField {
    /// Sample every layer of `config` over `surface`.
    pub fn build(
        config: &StarfieldConfig,
        surface: &Surface,
        now: f64,
        rng: &mut impl RandomSource,
    ) -> Self {
        let mut stars = Vec::with_capacity(config.total_stars());
        for layer in &config.layers {
            for _ in 0..layer.count {
                stars.push(layer.sample_star(config, surface, now, rng));
            }
        }
        log::info!(
            "starfield: built {} stars over {}x{} px (scale {})",
            stars.len(),
            surface.width(),
            surface.height(),
            surface.device_scale()
        );
        Self { stars }
    }

    /// Drift every star and advance its shimmer.
    pub fn advance(&mut self, dt: f64, surface: &Surface) {
        for star in &mut self.stars {
            star.advance(dt, surface);
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn stars_mut(&mut self) -> &mut [Star] {
        &mut self.stars
    }

    pub fn iter(&self) -> impl Iterator<Item = &Star> {
        self.stars.iter()
    }

    /// Number of stars currently flaring.
    pub fn peaking_count(&self) -> usize {
        self.stars.iter().filter(|s| s.is_peaking()).count()
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::Rng;
    use crate::renderer::surface::Viewport;

    #[test]
    fn default_field_has_145_stars() {
        let config = StarfieldConfig::default();
        let surface = Surface::new(Viewport::new(1000.0, 800.0, 1.0));
        let field = ParticleField::build(&config, &surface, 0.0, &mut Rng::new(1));
        assert_eq!(field.len(), 145);
        assert_eq!(field.peaking_count(), 0);
    }

    #[test]
    fn stars_are_grouped_by_layer() {
        let config = StarfieldConfig::default();
        let surface = Surface::new(Viewport::new(1000.0, 800.0, 1.0));
        let field = ParticleField::build(&config, &surface, 0.0, &mut Rng::new(2));
        let parallax: Vec<f64> = field.iter().map(|s| s.parallax).collect();
        assert!(parallax[..70].iter().all(|&p| p == 0.35));
        assert!(parallax[70..115].iter().all(|&p| p == 0.65));
        assert!(parallax[115..].iter().all(|&p| p == 1.0));
    }

    #[test]
    fn same_seed_builds_same_field() {
        let config = StarfieldConfig::default();
        let surface = Surface::new(Viewport::new(640.0, 480.0, 1.5));
        let a = ParticleField::build(&config, &surface, 0.0, &mut Rng::new(77));
        let b = ParticleField::build(&config, &surface, 0.0, &mut Rng::new(77));
        for (sa, sb) in a.iter().zip(b.iter()) {
            assert_eq!(sa.position, sb.position);
            assert_eq!(sa.peak, sb.peak);
        }
    }

    #[test]
    fn advance_keeps_stars_on_surface() {
        let config = StarfieldConfig::default();
        let surface = Surface::new(Viewport::new(320.0, 200.0, 1.0));
        let mut field = ParticleField::build(&config, &surface, 0.0, &mut Rng::new(3));
        for _ in 0..5_000 {
            field.advance(250.0, &surface);
        }
        for s in field.iter() {
            assert!(s.position.x >= 0.0 && s.position.x < 320.0);
            assert!(s.position.y >= 0.0 && s.position.y < 200.0);
        }
    }
}
