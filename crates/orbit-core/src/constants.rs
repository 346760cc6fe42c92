// Shared layout/animation tuning constants used by the web and native surfaces.

// Relevance weights (one view is the unit)
pub const VIEWS_WEIGHT: f64 = 1.0;
pub const COMMENTS_WEIGHT: f64 = 50.0;
pub const CREDIBILITY_WEIGHT: f64 = 100.0;

// Global relevance range used to normalize sizes across passes
pub const RELEVANCE_FLOOR: f64 = 0.0;
pub const RELEVANCE_CEILING: f64 = 40_000.0;

// Rings, innermost first
pub const RING_RADII: [f32; 3] = [70.0, 150.0, 250.0]; // px from the centre
pub const RING_SIZE_RANGES: [[f32; 2]; 3] = [[10.0, 15.0], [15.0, 20.0], [20.0, 25.0]];
pub const RING_MAX_VIEWS: [Option<u64>; 3] = [Some(10_000), Some(20_000), None];

// Trajectory sampling
pub const TRAJECTORY_STEPS: usize = 36; // one keyframe every 10 degrees
pub const MIN_PHASE_MARGIN: f32 = 0.15; // radians kept clear at both ends of a segment
pub const MAX_MARGIN_FRACTION: f32 = 0.25; // margin never eats more than this share of a segment
pub const PERIOD_SECS_PER_PX: f32 = 0.5; // revolution period = radius * this
pub const RING_START_DELAY_SECS: f32 = 0.8; // per ring index
pub const COORD_PRECISION: f32 = 100.0; // keyframe coords rounded to 1/100 px

// Spotlight timing
pub const SPOTLIGHT_INITIAL_DELAY_MS: u64 = 2_000;
pub const SPOTLIGHT_INTERVAL_MS: u64 = 5_000;

// Display layers
pub const RING_LAYER_TOP: i32 = 10; // ring 0 sits here, outer rings below
pub const MIN_BASE_LAYER: i32 = 1;
pub const SPOTLIGHT_LAYER: i32 = 50;
pub const HOVER_LAYER: i32 = 100;

// Credibility color scale stops (lightcyan -> blue -> darkblue)
pub const CREDIBILITY_STOPS: [[u8; 3]; 3] = [[224, 255, 255], [0, 0, 255], [0, 0, 139]];

// Kind tiers
pub const MARKER_PX_INVESTIGATION: f32 = 24.0;
pub const MARKER_PX_OPINION: f32 = 20.0;
pub const MARKER_PX_REPORT: f32 = 16.0;
