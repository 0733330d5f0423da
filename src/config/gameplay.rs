use serde::{Deserialize, Serialize};

use crate::components::FruitKind;
use crate::game::{
    DEFAULT_COLLISION_BUDGET, DEFAULT_DROPPER_HALF_HEIGHT, DEFAULT_DROPPER_HALF_WIDTH,
    DEFAULT_DROPPER_SPEED, DEFAULT_DROPPER_Y, DEFAULT_FRUITS, DEFAULT_PADDING,
    DEFAULT_PREVIEW_OFFSET, DEFAULT_PREVIEW_SCALE, DEFAULT_SMOOTHING, DEFAULT_VIEW_HALF_HEIGHT,
    DEFAULT_VIEW_HALF_WIDTH,
};
use crate::selector::SelectionMode;

// Fruit roster and how the next drop is picked
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FruitsConfig {
    pub kinds: Vec<KindConfig>, // Ordered smallest to largest
    pub selection: SelectionMode,
    pub seed: Option<u64>, // Fixed RNG seed for reproducible drop sequences
}

impl Default for FruitsConfig {
    fn default() -> Self {
        Self {
            kinds: DEFAULT_FRUITS
                .iter()
                .map(|&(name, radius)| KindConfig {
                    name: name.to_string(),
                    radius,
                })
                .collect(),
            selection: SelectionMode::Random,
            seed: None,
        }
    }
}

impl FruitsConfig {
    #[must_use]
    pub fn kind_list(&self) -> Vec<FruitKind> {
        self.kinds
            .iter()
            .map(|kind| FruitKind::new(kind.name.clone()))
            .collect()
    }
}

// One configured kind and its spawn data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KindConfig {
    pub name: String,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementAxis {
    #[default]
    Horizontal,
    Planar,
}

// Dropper movement and preview
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DropperConfig {
    pub speed: f32,
    pub smoothing: f32, // Must land in (0, 1]; see smoothing_factor()
    pub padding: f32,   // Extra gap kept from the screen edge
    pub half_width: f32,
    pub half_height: f32,
    pub axis: MovementAxis,
    pub start_y: f32,
    pub preview: PreviewConfig,
}

impl Default for DropperConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_DROPPER_SPEED,
            smoothing: DEFAULT_SMOOTHING,
            padding: DEFAULT_PADDING,
            half_width: DEFAULT_DROPPER_HALF_WIDTH,
            half_height: DEFAULT_DROPPER_HALF_HEIGHT,
            axis: MovementAxis::Horizontal,
            start_y: DEFAULT_DROPPER_Y,
            preview: PreviewConfig::default(),
        }
    }
}

impl DropperConfig {
    /// Smoothing factor clamped into (0, 1]. Zero or negative values would
    /// freeze the dropper, so they fall back to the default.
    #[must_use]
    pub fn smoothing_factor(&self) -> f32 {
        if self.smoothing.is_nan() || self.smoothing <= 0.0 {
            DEFAULT_SMOOTHING
        } else {
            self.smoothing.min(1.0)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub enabled: bool,
    pub offset_x: f32,
    pub offset_y: f32,
    pub scale: f32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            offset_x: DEFAULT_PREVIEW_OFFSET.0,
            offset_y: DEFAULT_PREVIEW_OFFSET.1,
            scale: DEFAULT_PREVIEW_SCALE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    pub collision_budget: u32,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            collision_budget: DEFAULT_COLLISION_BUDGET,
        }
    }
}

// Used when the host has no camera projection to offer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub half_width: f32,
    pub half_height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            half_width: DEFAULT_VIEW_HALF_WIDTH,
            half_height: DEFAULT_VIEW_HALF_HEIGHT,
        }
    }
}
