use crate::dom::{self, OrbElements};
use crate::events;
use crate::reconcile;
use crate::style;
use fnv::FnvHashMap;
use instant::Instant;
use orbit_core::{OrbKey, OrbitScene};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use web_sys as web;

/// DOM rendering surface for one orbit scene.
pub struct Surface {
    pub document: web::Document,
    pub root: web::Element,
    pub scene: OrbitScene,
    pub elements: FnvHashMap<OrbKey, OrbElements>,
    pub started: Instant,
    pub last_frame: Instant,
    pub running: bool,
}

impl Surface {
    pub fn new(document: web::Document, root: web::Element, scene: OrbitScene) -> Self {
        let now = Instant::now();
        Self {
            document,
            root,
            scene,
            elements: FnvHashMap::default(),
            started: now,
            last_frame: now,
            running: true,
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_frame;
        self.last_frame = now;

        if let Some(ev) = self.scene.advance(dt) {
            log::debug!("[surface] {:?}", ev);
        }
        self.paint(now - self.started);
    }

    pub fn paint(&self, elapsed: Duration) {
        for orb in self.scene.render(elapsed) {
            let Some(el) = self.elements.get(&orb.key) else {
                continue;
            };
            let _ = el.orb.set_attribute("style", &style::orb_style(&orb));
            el.card.set_class_name(style::card_class(&orb.display));
            let _ = el.card.set_attribute("style", &style::card_style(&orb.display));
        }
    }

    /// Stop playing and detach every orb listener; nodes keep their last paint.
    pub fn teardown(&mut self) {
        self.scene.teardown();
        self.running = false;
        self.paint(self.started.elapsed());
        for el in self.elements.values_mut() {
            el.detach();
        }
    }
}

/// Bring the DOM nodes in line with the current layout.
///
/// Nodes are matched by orb key: surviving orbs keep their element and
/// listeners, departed orbs lose theirs, new orbs get fresh ones.
pub fn rebuild(surface: &Rc<RefCell<Surface>>) -> anyhow::Result<()> {
    let mut guard = surface.borrow_mut();
    let s = &mut *guard;
    let frame = s.scene.render(s.started.elapsed());
    let wanted: Vec<OrbKey> = frame.iter().map(|o| o.key.clone()).collect();
    let diff = reconcile::diff_elements(s.elements.keys(), &wanted);

    for key in &diff.stale {
        if let Some(el) = s.elements.remove(key) {
            el.orb.remove();
        }
    }
    for orb in &frame {
        match s.elements.get(&orb.key) {
            Some(el) => el.title.set_text_content(Some(&orb.headline)),
            None => {
                let mut els = dom::create_orb(&s.document, &s.root, orb)?;
                events::wire_orb_pointer(Rc::downgrade(surface), &mut els, orb.key.clone())?;
                s.elements.insert(orb.key.clone(), els);
            }
        }
    }
    log::info!(
        "[surface] {} orb elements ({} added, {} removed)",
        s.elements.len(),
        diff.missing.len(),
        diff.stale.len()
    );
    s.paint(s.started.elapsed());
    Ok(())
}
