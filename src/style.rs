use crate::constants::*;
use orbit_core::{OrbDisplay, RenderedOrb};

/// Rendered diameter: relevance size scaled by the kind's marker tier.
#[inline]
pub fn orb_diameter(orb: &RenderedOrb) -> f32 {
    orb.visual_size * orb.marker_px / REPORT_MARKER_PX
}

/// Inline style placing an orb relative to the orbit centre.
pub fn orb_style(orb: &RenderedOrb) -> String {
    let d = orb_diameter(orb);
    let scale = if orb.display.interactive {
        format!(" scale({HOVER_SCALE})")
    } else {
        String::new()
    };
    format!(
        "position:absolute;top:50%;left:50%;width:{d:.2}px;height:{d:.2}px;\
         border-radius:50%;border:{ORB_BORDER_PX}px solid {accent};background:{color};\
         z-index:{layer};transform:translate(-50%,-50%) translate({x:.2}px,{y:.2}px){scale};",
        accent = orb.accent,
        color = orb.color,
        layer = orb.display.layer,
        x = orb.position.x,
        y = orb.position.y,
    )
}

#[inline]
pub fn card_class(display: &OrbDisplay) -> &'static str {
    if display.revealed {
        CARD_SHOW_CLASS
    } else {
        CARD_CLASS
    }
}

/// Cards only take pointer input while their orb is hovered.
pub fn card_style(display: &OrbDisplay) -> String {
    let events = if display.interactive { "auto" } else { "none" };
    format!(
        "position:absolute;width:{CARD_WIDTH_PX}px;right:{CARD_OFFSET_PX}px;top:50%;\
         transform:translateY(-50%);z-index:{layer};pointer-events:{events};",
        layer = display.layer,
    )
}

#[inline]
pub fn auto_button_label(automatic: bool) -> &'static str {
    if automatic {
        AUTO_ON_LABEL
    } else {
        AUTO_OFF_LABEL
    }
}
