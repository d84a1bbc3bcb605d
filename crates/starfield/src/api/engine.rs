use crate::api::config::StarfieldConfig;
use crate::api::error::StarfieldResult;
use crate::core::field::ParticleField;
use crate::core::rng::{RandomSource, Rng};
use crate::core::time::SimClock;
use crate::renderer::camera::CameraDrift;
use crate::renderer::frame::FrameBuffer;
use crate::renderer::surface::{Surface, Viewport};
use crate::systems::halo::{Halo, HaloTransition};
use crate::systems::peaks::{PeakScheduler, PeakTransitions};
use crate::systems::render::build_frame;

/// Summary of one simulated frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    /// Accepted delta in milliseconds.
    pub dt: f64,
    pub peaks: PeakTransitions,
    pub halo: Option<HaloTransition>,
}

/// The whole starfield simulation, owned by one value.
///
/// Drive it with `frame(timestamp)` from a host frame callback, or with
/// `step(dt)` for deterministic tests. Each frame runs, in order: clock and
/// camera advance, peak and halo transitions, star drift and shimmer, and
/// finally the render pipeline into `frame_buffer()`.
pub struct Starfield<R: RandomSource = Rng> {
    config: StarfieldConfig,
    surface: Surface,
    field: ParticleField,
    peaks: PeakScheduler,
    halo: Halo,
    camera: CameraDrift,
    clock: SimClock,
    rng: R,
    buffer: FrameBuffer,
}

impl<R: RandomSource> Starfield<R> {
    /// Validate `config`, size the surface and build the first field at host time `now`.
    pub fn new(config: StarfieldConfig, viewport: Viewport, now: f64, mut rng: R) -> StarfieldResult<Self> {
        config.validate()?;
        let surface = Surface::new(viewport);
        let field = ParticleField::build(&config, &surface, now, &mut rng);
        let halo = Halo::new(now, &config.halo, &mut rng);
        let mut buffer = FrameBuffer::with_capacity(config.total_stars() + 1);
        buffer.width = surface.width();
        buffer.height = surface.height();

        Ok(Self {
            peaks: PeakScheduler::new(config.max_simultaneous_peaks, config.peak_admission),
            camera: CameraDrift::new(config.camera_speed),
            clock: SimClock::new(now, config.max_frame_dt),
            config,
            surface,
            field,
            halo,
            rng,
            buffer,
        })
    }

    /// Resize the surface and resample the field. The halo and camera carry over.
    pub fn resize(&mut self, viewport: Viewport) {
        self.surface.resize(viewport);
        self.field = ParticleField::build(&self.config, &self.surface, self.clock.now(), &mut self.rng);
        self.buffer.clear();
        self.buffer.width = self.surface.width();
        self.buffer.height = self.surface.height();
    }

    /// Run one frame for a host timestamp (ms).
    pub fn frame(&mut self, timestamp: f64) -> FrameReport {
        let dt = self.clock.tick(timestamp);
        self.simulate(dt)
    }

    /// Run one frame advancing simulated time by `dt` (ms, clamped like host frames).
    pub fn step(&mut self, dt: f64) -> FrameReport {
        let dt = self.clock.step(dt);
        self.simulate(dt)
    }

    fn simulate(&mut self, dt: f64) -> FrameReport {
        let now = self.clock.now();
        self.camera.advance(dt, self.surface.device_scale());

        let peaks = self.peaks.update(self.field.stars_mut(), now);
        let halo = self.halo.update(now, &self.surface, &self.config.halo, &mut self.rng);

        self.field.advance(dt, &self.surface);

        let glow = self.halo.sample(now, &self.config.halo);
        build_frame(
            &self.field,
            glow,
            &self.camera,
            &self.surface,
            &self.config,
            now,
            &mut self.buffer,
        );

        FrameReport { dt, peaks, halo }
    }

    pub fn config(&self) -> &StarfieldConfig {
        &self.config
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    pub fn halo(&self) -> &Halo {
        &self.halo
    }

    pub fn camera(&self) -> &CameraDrift {
        &self.camera
    }

    /// Current simulated time (ms).
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// Draw commands of the most recent frame.
    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.buffer
    }
}
