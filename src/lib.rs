#![cfg(target_arch = "wasm32")]
use orbit_core::OrbitScene;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod constants;
mod dom;
mod events;
mod feed;
mod frame;
mod reconcile;
mod style;
mod surface;

use constants::{FEED_URL, ORBIT_ROOT_ID};
use surface::Surface;

thread_local! {
    static SURFACE: RefCell<Option<Rc<RefCell<Surface>>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("orbit-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let root = document
        .get_element_by_id(ORBIT_ROOT_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", ORBIT_ROOT_ID))?;

    let items = feed::load_items(FEED_URL).await;
    let mut scene = OrbitScene::with_defaults(rand::random());
    scene.mount(&items);

    let surface = Rc::new(RefCell::new(Surface::new(document.clone(), root, scene)));
    surface::rebuild(&surface)?;
    events::wire_auto_toggle(&document, Rc::downgrade(&surface));
    frame::start_loop(Rc::downgrade(&surface));

    SURFACE.with(|s| *s.borrow_mut() = Some(surface));
    Ok(())
}

/// Re-fetch the feed and re-lay the orbit; the spotlight keeps running.
#[wasm_bindgen]
pub fn refresh() {
    let Some(surface) = SURFACE.with(|s| s.borrow().clone()) else {
        return;
    };
    spawn_local(async move {
        let items = feed::load_items(FEED_URL).await;
        if !surface.borrow().running {
            log::info!("[refresh] surface unmounted while fetching; dropped");
            return;
        }
        if let Some(ev) = surface.borrow_mut().scene.refresh(&items) {
            log::debug!("[refresh] {:?}", ev);
        }
        if let Err(e) = surface::rebuild(&surface) {
            log::error!("refresh error: {:?}", e);
        }
    });
}

/// Stop the frame loop and cancel the spotlight timers.
#[wasm_bindgen]
pub fn unmount() {
    if let Some(surface) = SURFACE.with(|s| s.borrow_mut().take()) {
        surface.borrow_mut().teardown();
    }
}
