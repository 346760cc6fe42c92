use crate::constants::{CARD_CLASS, ORB_CLASS};
use orbit_core::RenderedOrb;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys as web;

/// DOM nodes backing one orb, plus the listeners attached to them.
///
/// Listeners are detached when the elements are dropped.
pub struct OrbElements {
    pub orb: web::Element,
    pub card: web::Element,
    pub title: web::Element,
    listeners: Vec<(&'static str, Closure<dyn FnMut()>)>,
}

impl OrbElements {
    pub fn listen(
        &mut self,
        event: &'static str,
        handler: impl FnMut() + 'static,
    ) -> anyhow::Result<()> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
        self.orb
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(js_err)?;
        self.listeners.push((event, closure));
        Ok(())
    }

    pub fn detach(&mut self) {
        for (event, closure) in self.listeners.drain(..) {
            let _ = self
                .orb
                .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for OrbElements {
    fn drop(&mut self) {
        self.detach();
    }
}

#[inline]
pub fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Wired once at init; the closure lives for the page.
#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Create the orb and its hover card under `root`.
pub fn create_orb(
    document: &web::Document,
    root: &web::Element,
    orb: &RenderedOrb,
) -> anyhow::Result<OrbElements> {
    let el = document.create_element("div").map_err(js_err)?;
    el.set_class_name(ORB_CLASS);
    el.set_attribute("data-orb", &orb.key.0).map_err(js_err)?;

    let card = document.create_element("div").map_err(js_err)?;
    card.set_class_name(CARD_CLASS);
    let title = document.create_element("h3").map_err(js_err)?;
    title.set_text_content(Some(&orb.headline));
    card.append_child(&title).map_err(js_err)?;

    el.append_child(&card).map_err(js_err)?;
    root.append_child(&el).map_err(js_err)?;
    Ok(OrbElements {
        orb: el,
        card,
        title,
        listeners: Vec::new(),
    })
}
