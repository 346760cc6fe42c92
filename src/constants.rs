// DOM hooks and styling constants for the web surface.

// Element ids expected in index.html
pub const ORBIT_ROOT_ID: &str = "orbit-root";
pub const AUTO_TOGGLE_ID: &str = "orbit-auto-toggle";

// Feed endpoint; falls back to the bundled sample when unreachable
pub const FEED_URL: &str = "/api/articles";

// Class names shared with the stylesheet
pub const ORB_CLASS: &str = "orb";
pub const CARD_CLASS: &str = "hover-card";
pub const CARD_SHOW_CLASS: &str = "hover-card show";

// Orb decoration
pub const ORB_BORDER_PX: f32 = 2.0;
pub const REPORT_MARKER_PX: f32 = 16.0; // kind tiers are scaled relative to this
pub const HOVER_SCALE: f32 = 1.15; // while the pointer is on the orb

// Card placement (to the right of the orb)
pub const CARD_WIDTH_PX: u32 = 400;
pub const CARD_OFFSET_PX: i32 = -420;

// Toggle button labels
pub const AUTO_ON_LABEL: &str = "Automatisch: An";
pub const AUTO_OFF_LABEL: &str = "Automatisch: Aus";
