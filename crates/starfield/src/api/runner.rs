use crate::api::config::StarfieldConfig;
use crate::api::engine::{FrameReport, Starfield};
use crate::api::error::StarfieldResult;
use crate::core::rng::{RandomSource, Rng};
use crate::renderer::surface::Viewport;
use crate::renderer::traits::{Renderer, SurfaceHost};

/// Start the starfield on `host`.
///
/// Any surface already carrying the configured identifier is removed first,
/// so calling this repeatedly leaves exactly one surface behind.
pub fn start<H: SurfaceHost, R: RandomSource>(
    host: &mut H,
    config: StarfieldConfig,
    rng: R,
) -> StarfieldResult<StarfieldRunner<H::Backend, R>> {
    config.validate()?;
    let id = config.surface.element_id.clone();
    if host.remove_surface(&id) {
        log::info!("starfield: replaced existing surface #{}", id);
    }

    let mut backend = host.create_surface(&config.surface)?;
    let sized = Starfield::new(config, host.viewport(), host.now_ms(), rng)
        .and_then(|engine| backend.resize(engine.surface()).map(|()| engine));
    let engine = match sized {
        Ok(engine) => engine,
        Err(e) => {
            backend.detach();
            return Err(e);
        }
    };
    log::info!("starfield: started on {} backend", backend.backend());

    Ok(StarfieldRunner { engine, backend })
}

/// Wires an engine to a drawing backend.
///
/// The host's frame callback calls `frame`, its resize listener calls
/// `resize`; neither restarts the other.
pub struct StarfieldRunner<B: Renderer, R: RandomSource = Rng> {
    engine: Starfield<R>,
    backend: B,
}

impl<B: Renderer, R: RandomSource> StarfieldRunner<B, R> {
    /// Simulate and draw one frame for a host timestamp (ms).
    pub fn frame(&mut self, timestamp: f64) -> StarfieldResult<FrameReport> {
        let report = self.engine.frame(timestamp);
        self.backend.draw(self.engine.frame_buffer())?;
        Ok(report)
    }

    /// Apply a viewport change: new backing resolution and a fresh field.
    pub fn resize(&mut self, viewport: Viewport) -> StarfieldResult<()> {
        self.engine.resize(viewport);
        self.backend.resize(self.engine.surface())
    }

    pub fn engine(&self) -> &Starfield<R> {
        &self.engine
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Remove the surface. Call once the host stops delivering frames.
    pub fn detach(&mut self) {
        self.backend.detach();
        log::info!("starfield: {} surface detached", self.backend.backend());
    }
}
