use crate::api::config::StarfieldConfig;
use crate::core::field::ParticleField;
use crate::renderer::camera::CameraDrift;
use crate::renderer::frame::{BlendMode, DrawCommand, FrameBuffer, GradientStop, Rgba};
use crate::renderer::surface::Surface;
use crate::systems::halo::HaloSample;

/// Gradient stops of a flaring star at instantaneous `alpha`.
pub fn flare_stops(alpha: f64) -> [GradientStop; 3] {
    [
        GradientStop::new(0.0, Rgba::new(255, 255, 255, alpha * 0.9)),
        GradientStop::new(0.5, Rgba::new(200, 200, 255, alpha * 0.35)),
        GradientStop::new(1.0, Rgba::TRANSPARENT),
    ]
}

/// Gradient stops of the halo at `alpha`.
pub fn halo_stops(alpha: f64) -> [GradientStop; 3] {
    [
        GradientStop::new(0.0, Rgba::new(255, 255, 255, alpha * 0.9)),
        GradientStop::new(0.35, Rgba::new(180, 180, 255, alpha * 0.45)),
        GradientStop::new(1.0, Rgba::TRANSPARENT),
    ]
}

/// Build the frame's draw commands: one per star, then the halo on top.
///
/// Stars are placed at `wrap(stored + camera × parallax)`, so the camera pan
/// scrolls forever without growing the drawn coordinates.
pub fn build_frame(
    field: &ParticleField,
    halo: Option<HaloSample>,
    camera: &CameraDrift,
    surface: &Surface,
    config: &StarfieldConfig,
    now: f64,
    buffer: &mut FrameBuffer,
) {
    buffer.clear();
    buffer.width = surface.width();
    buffer.height = surface.height();
    buffer.blend = config.blend;
    buffer.global_alpha = config.global_alpha;

    for star in field.iter() {
        let center = surface.wrap(star.position + camera.parallax_offset(star.parallax));
        let blend = star.flare_blend(now, config.idle_blend, config.peak_easing);
        let alpha = star.alpha(blend);

        if blend > config.flare_threshold {
            buffer.push(DrawCommand::Flare {
                center,
                radius: star.radius * config.flare_radius_scale,
                stops: flare_stops(alpha),
            });
        } else {
            buffer.push(DrawCommand::Dot {
                center,
                radius: star.radius,
                alpha,
            });
        }
    }

    if let Some(glow) = halo {
        buffer.push(DrawCommand::Halo {
            center: surface.wrap(glow.origin + camera.parallax_offset(config.halo.parallax)),
            radius: glow.radius,
            stops: halo_stops(glow.alpha),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::star::PeakPhase;
    use crate::core::rng::Rng;
    use crate::renderer::surface::Viewport;
    use glam::DVec2;

    fn setup() -> (StarfieldConfig, Surface, ParticleField) {
        let config = StarfieldConfig::default();
        let surface = Surface::new(Viewport::new(500.0, 400.0, 1.0));
        let field = ParticleField::build(&config, &surface, 0.0, &mut Rng::new(21));
        (config, surface, field)
    }

    #[test]
    fn one_command_per_star_without_halo() {
        let (config, surface, field) = setup();
        let camera = CameraDrift::new(config.camera_speed);
        let mut buffer = FrameBuffer::default();
        build_frame(&field, None, &camera, &surface, &config, 0.0, &mut buffer);
        assert_eq!(buffer.len(), 145);
        assert!(buffer.halo().is_none());
        assert_eq!(buffer.blend, BlendMode::Additive);
        assert_eq!((buffer.width, buffer.height), (500, 400));
    }

    #[test]
    fn idle_stars_are_flat_dots_with_unit_alpha() {
        let (config, surface, field) = setup();
        let camera = CameraDrift::new(config.camera_speed);
        let mut buffer = FrameBuffer::default();
        build_frame(&field, None, &camera, &surface, &config, 0.0, &mut buffer);
        for cmd in buffer.iter() {
            match cmd {
                DrawCommand::Dot { alpha, .. } => assert!((0.0..=1.0).contains(alpha)),
                other => panic!("idle field drew {:?}", other),
            }
        }
    }

    #[test]
    fn positions_include_wrapped_parallax_offset() {
        let (config, surface, mut field) = setup();
        let mut camera = CameraDrift::new(config.camera_speed);
        camera.offset = DVec2::new(1_000.0, 250.0);
        field.stars_mut()[0].position = DVec2::new(100.0, 100.0);
        field.stars_mut()[0].parallax = 0.5;

        let mut buffer = FrameBuffer::default();
        build_frame(&field, None, &camera, &surface, &config, 0.0, &mut buffer);
        // (100 + 500, 100 + 125) wrapped into 500x400
        assert_eq!(buffer.commands[0].center(), DVec2::new(100.0, 225.0));
        for cmd in buffer.iter() {
            let c = cmd.center();
            assert!(c.x >= 0.0 && c.x < 500.0 && c.y >= 0.0 && c.y < 400.0);
        }
    }

    #[test]
    fn flaring_star_draws_gradient_past_threshold() {
        let (config, surface, mut field) = setup();
        let camera = CameraDrift::new(config.camera_speed);
        let star = &mut field.stars_mut()[3];
        star.peak_duration = 10_000.0;
        star.peak = PeakPhase::Peaking { start: 0.0, end: 10_000.0 };
        let radius = star.radius;

        let mut buffer = FrameBuffer::default();
        // t = 0.3 → blend 0.18, below the threshold
        build_frame(&field, None, &camera, &surface, &config, 3_000.0, &mut buffer);
        assert!(matches!(buffer.commands[3], DrawCommand::Dot { .. }));

        // t = 0.6 → blend 0.68
        build_frame(&field, None, &camera, &surface, &config, 6_000.0, &mut buffer);
        match &buffer.commands[3] {
            DrawCommand::Flare { radius: r, stops, .. } => {
                assert!((r - radius * 3.2).abs() < 1e-9);
                assert_eq!(stops[2].color, Rgba::TRANSPARENT);
                assert!(stops[0].color.a <= 0.9);
            }
            other => panic!("expected flare, got {:?}", other),
        }
    }

    #[test]
    fn blend_mode_follows_config() {
        let (mut config, surface, field) = setup();
        config.blend = BlendMode::Alpha;
        let camera = CameraDrift::new(config.camera_speed);
        let mut buffer = FrameBuffer::default();
        build_frame(&field, None, &camera, &surface, &config, 0.0, &mut buffer);
        assert_eq!(buffer.blend, BlendMode::Alpha);
    }

    #[test]
    fn halo_is_drawn_last() {
        let (config, surface, field) = setup();
        let camera = CameraDrift::new(config.camera_speed);
        let glow = HaloSample { origin: DVec2::new(250.0, 200.0), radius: 90.0, alpha: 0.1 };
        let mut buffer = FrameBuffer::default();
        build_frame(&field, Some(glow), &camera, &surface, &config, 0.0, &mut buffer);
        assert_eq!(buffer.len(), 146);
        match buffer.commands.last() {
            Some(DrawCommand::Halo { center, radius, stops }) => {
                assert_eq!(*center, DVec2::new(250.0, 200.0));
                assert_eq!(*radius, 90.0);
                assert!((stops[0].color.a - 0.09).abs() < 1e-12);
                assert!((stops[1].color.a - 0.045).abs() < 1e-12);
            }
            other => panic!("expected halo last, got {:?}", other),
        }
    }
}
