#![warn(clippy::all, clippy::pedantic)]

// Merge rules
pub const DEFAULT_COLLISION_BUDGET: u32 = 10; // Contact callbacks an instance will process before going inert
pub const BOUNDARY_NAME: &str = "Boundary";

// Dropper movement
pub const DEFAULT_DROPPER_SPEED: f32 = 8.0; // World units per second at full input
pub const DEFAULT_SMOOTHING: f32 = 0.2; // Fraction of the gap to raw input closed each tick
pub const DEFAULT_PADDING: f32 = 0.25;
pub const DEFAULT_DROPPER_HALF_WIDTH: f32 = 0.5;
pub const DEFAULT_DROPPER_HALF_HEIGHT: f32 = 0.5;
pub const DEFAULT_DROPPER_Y: f32 = 4.0;

// Fallback world extents when no camera projection is available
pub const DEFAULT_VIEW_HALF_WIDTH: f32 = 5.0;
pub const DEFAULT_VIEW_HALF_HEIGHT: f32 = 8.0;

// Preview decoration
pub const DEFAULT_PREVIEW_OFFSET: (f32, f32) = (0.0, -0.75);
pub const DEFAULT_PREVIEW_SCALE: f32 = 0.6;

// Time scale applied by the session controller
pub const NORMAL_TIME_SCALE: f32 = 1.0;
pub const FROZEN_TIME_SCALE: f32 = 0.0;

// Default fruit roster, smallest to largest, with collider radius
pub const DEFAULT_FRUITS: &[(&str, f32)] = &[
    ("Cherry", 0.25),
    ("Strawberry", 0.35),
    ("Grape", 0.45),
    ("Dekopon", 0.55),
    ("Persimmon", 0.7),
    ("Apple", 0.85),
    ("Pear", 1.0),
    ("Peach", 1.15),
    ("Pineapple", 1.3),
    ("Melon", 1.5),
    ("Watermelon", 1.75),
];
