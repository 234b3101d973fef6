use egui::{Color32, Pos2};

use crate::error::ConfigError;
use crate::preview::Preview;

/// Marker thickness used before any tool is chosen
pub const DEFAULT_THICKNESS: f32 = 2.0;

/// Settings of the freehand marker.
///
/// Only constructible through [`MarkerTool::new`], so a thickness that reaches
/// the session controller is always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerTool {
    thickness: f32,
    color: Option<Color32>,
}

impl MarkerTool {
    pub fn new(thickness: f32, color: Option<Color32>) -> Result<Self, ConfigError> {
        if !thickness.is_finite() || thickness <= 0.0 {
            return Err(ConfigError::InvalidThickness(thickness));
        }
        Ok(Self { thickness, color })
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn color(&self) -> Option<Color32> {
        self.color
    }
}

impl Default for MarkerTool {
    fn default() -> Self {
        Self {
            thickness: DEFAULT_THICKNESS,
            color: None,
        }
    }
}

/// A validated stamp label, ready to be selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampChoice(String);

impl StampChoice {
    pub fn new(label: impl Into<String>) -> Result<Self, ConfigError> {
        let label = label.into();
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyStampLabel);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn label(&self) -> &str {
        &self.0
    }
}

/// The stamp tool: a label and the rotation sampled when it was picked
#[derive(Debug, Clone, PartialEq)]
pub struct StampTool {
    glyph: String,
    rotation: f32,
}

impl StampTool {
    pub fn new(choice: StampChoice, rotation: f32) -> Self {
        Self {
            glyph: choice.0,
            rotation,
        }
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }
}

/// Exactly one tool is active at any time
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveTool {
    Marker(MarkerTool),
    Stamp(StampTool),
}

impl Default for ActiveTool {
    fn default() -> Self {
        Self::Marker(MarkerTool::default())
    }
}

impl ActiveTool {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Marker(_) => "Marker",
            Self::Stamp(_) => "Stamp",
        }
    }

    /// The cursor indicator this tool shows at `position`
    pub fn preview_at(&self, position: Pos2) -> Preview {
        match self {
            Self::Marker(marker) => Preview::Marker {
                position,
                thickness: marker.thickness,
            },
            Self::Stamp(stamp) => Preview::Stamp {
                position,
                glyph: stamp.glyph.clone(),
                rotation: stamp.rotation,
            },
        }
    }
}

/// Source of stamp rotations, in degrees within `[0, 360)`
#[derive(Debug, Clone)]
pub enum RotationSampler {
    Random(fastrand::Rng),
    Fixed(f32),
}

impl Default for RotationSampler {
    fn default() -> Self {
        Self::random()
    }
}

impl RotationSampler {
    pub fn random() -> Self {
        Self::Random(fastrand::Rng::new())
    }

    /// Reproducible sequence of rotations
    pub fn seeded(seed: u64) -> Self {
        Self::Random(fastrand::Rng::with_seed(seed))
    }

    pub fn fixed(degrees: f32) -> Self {
        Self::Fixed(degrees.rem_euclid(360.0))
    }

    pub fn sample(&mut self) -> f32 {
        match self {
            Self::Random(rng) => rng.f32() * 360.0,
            Self::Fixed(degrees) => *degrees,
        }
    }
}
