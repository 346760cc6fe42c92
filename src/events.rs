use crate::constants::AUTO_TOGGLE_ID;
use crate::dom::{self, OrbElements};
use crate::style;
use crate::surface::Surface;
use orbit_core::OrbKey;
use std::cell::RefCell;
use std::rc::Weak;
use web_sys as web;

/// Forward pointer enter/leave on an orb element to the spotlight.
///
/// The handlers hold a weak handle so the surface can drop while they are
/// still attached.
pub fn wire_orb_pointer(
    surface: Weak<RefCell<Surface>>,
    els: &mut OrbElements,
    key: OrbKey,
) -> anyhow::Result<()> {
    let s = surface.clone();
    let k = key.clone();
    els.listen("pointerenter", move || {
        let Some(surface) = s.upgrade() else { return };
        if let Some(ev) = surface.borrow_mut().scene.pointer_enter(&k) {
            log::debug!("[pointer] {:?}", ev);
        }
    })?;

    els.listen("pointerleave", move || {
        let Some(surface) = surface.upgrade() else { return };
        if let Some(ev) = surface.borrow_mut().scene.pointer_leave(&key) {
            log::debug!("[pointer] {:?}", ev);
        }
    })
}

pub fn wire_auto_toggle(document: &web::Document, surface: Weak<RefCell<Surface>>) {
    dom::add_click_listener(document, AUTO_TOGGLE_ID, move || {
        let Some(surface) = surface.upgrade() else { return };
        let mut s = surface.borrow_mut();
        s.scene.toggle_automatic();
        let label = style::auto_button_label(s.scene.cycler().is_automatic());
        if let Some(btn) = s.document.get_element_by_id(AUTO_TOGGLE_ID) {
            btn.set_text_content(Some(label));
        }
        log::info!("[click] {}", label);
    });
}
