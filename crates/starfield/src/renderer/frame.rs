use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Blend mode a backend uses for every command in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Standard alpha blending ("source-over").
    Alpha,
    /// Additive blending ("lighter"), so overlapping glows brighten.
    #[default]
    Additive,
}

impl BlendMode {
    /// Canvas 2D composite operation name.
    pub fn composite_operation(self) -> &'static str {
        match self {
            BlendMode::Alpha => "source-over",
            BlendMode::Additive => "lighter",
        }
    }
}

/// 8-bit colour with a fractional alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// CSS `rgba()` string, alpha rounded to three decimals.
    pub fn to_css(self) -> String {
        format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, self.a.clamp(0.0, 1.0))
    }
}

/// One stop of a radial gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Offset along the radius, 0.0 (centre) to 1.0 (edge).
    pub offset: f32,
    pub color: Rgba,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// A single draw operation, in device pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Flat white disc at `alpha`.
    Dot { center: DVec2, radius: f64, alpha: f64 },
    /// Soft gradient disc for a flaring star.
    Flare { center: DVec2, radius: f64, stops: [GradientStop; 3] },
    /// The ambient glow; always the last command of a frame.
    Halo { center: DVec2, radius: f64, stops: [GradientStop; 3] },
}

impl DrawCommand {
    pub fn center(&self) -> DVec2 {
        match self {
            DrawCommand::Dot { center, .. }
            | DrawCommand::Flare { center, .. }
            | DrawCommand::Halo { center, .. } => *center,
        }
    }

    pub fn radius(&self) -> f64 {
        match self {
            DrawCommand::Dot { radius, .. }
            | DrawCommand::Flare { radius, .. }
            | DrawCommand::Halo { radius, .. } => *radius,
        }
    }
}

/// Everything a backend needs to draw one frame: clear to transparent, set
/// the blend mode and global alpha, then replay `commands` in order.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    pub width: u32,
    pub height: u32,
    pub blend: BlendMode,
    pub global_alpha: f64,
    pub commands: Vec<DrawCommand>,
}

impl FrameBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            width: 1,
            height: 1,
            blend: BlendMode::Additive,
            global_alpha: 1.0,
            commands: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    /// The halo command of this frame, if any.
    pub fn halo(&self) -> Option<&DrawCommand> {
        self.commands.iter().find(|c| matches!(c, DrawCommand::Halo { .. }))
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::with_capacity(256)
    }
}
