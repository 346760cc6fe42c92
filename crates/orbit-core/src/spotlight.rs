//! Autonomous spotlight rotation with pointer override.
//!
//! The cycler owns the display state of every mounted orb (layer, whether its
//! card is revealed, whether the card takes pointer input). It has two
//! phases:
//!
//! - `Idle`: a one-shot initial delay followed by a repeating interval; each
//!   tick reveals one orb picked uniformly at random and returns every other
//!   orb to its resting layer.
//! - `Suppressed`: at least one orb is under the pointer. Both timers are
//!   dropped in the same call that enters this phase, so no tick can land
//!   afterwards. When the last pointed orb is left the timers restart from
//!   the initial delay.
//!
//! Time is fed in by the host through [`SpotlightCycler::advance`]; there are
//! no real timers to race against.

use crate::config::SpotlightConfig;
use crate::orb::{OrbKey, RingBuckets};
use fnv::FnvHashMap;
use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;
use smallvec::SmallVec;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpotlightPhase {
    Idle,
    Suppressed,
}

/// What a surface needs to style one orb.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct OrbDisplay {
    pub layer: i32,
    pub revealed: bool,
    /// Card accepts pointer input (only while hovered).
    pub interactive: bool,
    #[serde(skip)]
    base_layer: i32,
}

impl OrbDisplay {
    fn resting(base_layer: i32) -> Self {
        Self {
            layer: base_layer,
            revealed: false,
            interactive: false,
            base_layer,
        }
    }

    fn reset(&mut self) {
        *self = Self::resting(self.base_layer);
    }
}

/// Snapshot of the shared "currently revealed" indicator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpotlightState {
    pub revealed: Option<OrbKey>,
    pub suppressed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpotlightEvent {
    /// Timer tick revealed this orb.
    Revealed(OrbKey),
    /// Pointer entered this orb; autonomous rotation paused.
    Hovered(OrbKey),
    /// Last pointed orb was left; rotation restarts from the initial delay.
    Resumed,
    /// Autonomous reveals hidden (automatic mode switched off).
    Cleared,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Timer {
    Initial(Duration),
    Interval(Duration),
}

impl Timer {
    fn remaining(self) -> Duration {
        match self {
            Timer::Initial(d) | Timer::Interval(d) => d,
        }
    }
}

pub struct SpotlightCycler<R: Rng = StdRng> {
    config: SpotlightConfig,
    rng: R,
    registry: FnvHashMap<OrbKey, OrbDisplay>,
    // registration order; the random pick indexes into this
    order: Vec<OrbKey>,
    revealed: Option<OrbKey>,
    pointed: SmallVec<[OrbKey; 2]>,
    timer: Option<Timer>,
    automatic: bool,
    mounted: bool,
}

impl<R: Rng> SpotlightCycler<R> {
    pub fn new(config: SpotlightConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            registry: FnvHashMap::default(),
            order: Vec::new(),
            revealed: None,
            pointed: SmallVec::new(),
            timer: None,
            automatic: true,
            mounted: false,
        }
    }

    pub fn phase(&self) -> SpotlightPhase {
        if self.pointed.is_empty() {
            SpotlightPhase::Idle
        } else {
            SpotlightPhase::Suppressed
        }
    }

    pub fn is_suppressed(&self) -> bool {
        self.phase() == SpotlightPhase::Suppressed
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_automatic(&self) -> bool {
        self.automatic
    }

    pub fn state(&self) -> SpotlightState {
        SpotlightState {
            revealed: self.pointed.last().cloned().or_else(|| self.revealed.clone()),
            suppressed: self.is_suppressed(),
        }
    }

    pub fn display(&self, key: &OrbKey) -> Option<OrbDisplay> {
        self.registry.get(key).copied()
    }

    /// Time until the next autonomous reveal, if one is scheduled.
    pub fn next_tick_in(&self) -> Option<Duration> {
        self.timer.map(Timer::remaining)
    }

    pub fn orb_count(&self) -> usize {
        self.order.len()
    }

    /// Register the orbs of a fresh surface and reset all spotlight state.
    pub fn mount(&mut self, buckets: &RingBuckets) {
        self.registry.clear();
        self.order.clear();
        self.revealed = None;
        self.pointed.clear();
        self.register(buckets);
        self.mounted = true;
        self.restart_timers();
        log::info!("[spotlight] mounted with {} orbs", self.order.len());
    }

    /// Follow a feed refresh without resetting the cycle.
    ///
    /// Orbs are matched by key; a revealed or pointed orb that disappeared is
    /// forgotten, and if that empties the pointed set rotation resumes.
    pub fn sync(&mut self, buckets: &RingBuckets) -> Option<SpotlightEvent> {
        let previous = std::mem::take(&mut self.registry);
        self.order.clear();
        self.register(buckets);
        for (key, display) in self.registry.iter_mut() {
            if let Some(old) = previous.get(key) {
                display.layer = if old.layer == old.base_layer {
                    display.base_layer
                } else {
                    old.layer
                };
                display.revealed = old.revealed;
                display.interactive = old.interactive;
            }
        }
        if self
            .revealed
            .as_ref()
            .is_some_and(|k| !self.registry.contains_key(k))
        {
            log::debug!("[spotlight] revealed orb left the feed");
            self.revealed = None;
        }
        let was_suppressed = self.is_suppressed();
        let registry = &self.registry;
        self.pointed.retain(|k| registry.contains_key(k));
        if was_suppressed && !self.is_suppressed() && self.mounted {
            self.restart_timers();
            return Some(SpotlightEvent::Resumed);
        }
        None
    }

    /// Advance the timers by `dt`, revealing an orb if one falls due.
    pub fn advance(&mut self, dt: Duration) -> Option<SpotlightEvent> {
        if !self.mounted || self.is_suppressed() {
            return None;
        }
        let timer = self.timer?;
        let remaining = timer.remaining();
        if dt < remaining {
            self.timer = Some(match timer {
                Timer::Initial(_) => Timer::Initial(remaining - dt),
                Timer::Interval(_) => Timer::Interval(remaining - dt),
            });
            return None;
        }
        let interval = self.config.interval;
        let overshoot = (dt - remaining).as_nanos() % interval.as_nanos().max(1);
        self.timer = Some(Timer::Interval(
            interval - Duration::from_nanos(overshoot as u64),
        ));
        self.tick()
    }

    fn tick(&mut self) -> Option<SpotlightEvent> {
        self.clear_reveals();
        if self.order.is_empty() {
            return None;
        }
        let key = self.order[self.rng.gen_range(0..self.order.len())].clone();
        if let Some(display) = self.registry.get_mut(&key) {
            display.layer = self.config.spotlight_layer;
            display.revealed = true;
        }
        log::debug!("[spotlight] revealing {key}");
        self.revealed = Some(key.clone());
        Some(SpotlightEvent::Revealed(key))
    }

    pub fn pointer_enter(&mut self, key: &OrbKey) -> Option<SpotlightEvent> {
        if !self.mounted || !self.registry.contains_key(key) {
            return None;
        }
        self.timer = None;
        if !self.pointed.contains(key) {
            self.pointed.push(key.clone());
        }
        if let Some(prev) = self.revealed.take() {
            if let Some(display) = self.registry.get_mut(&prev) {
                display.reset();
            }
        }
        if let Some(display) = self.registry.get_mut(key) {
            display.layer = self.config.hover_layer;
            display.revealed = true;
            display.interactive = true;
        }
        log::debug!("[spotlight] pointer on {key}; rotation paused");
        Some(SpotlightEvent::Hovered(key.clone()))
    }

    pub fn pointer_leave(&mut self, key: &OrbKey) -> Option<SpotlightEvent> {
        let before = self.pointed.len();
        self.pointed.retain(|k| k != key);
        if self.pointed.len() == before {
            return None;
        }
        if let Some(display) = self.registry.get_mut(key) {
            display.reset();
        }
        if self.pointed.is_empty() && self.mounted {
            self.restart_timers();
            log::debug!("[spotlight] pointer gone; rotation resumes");
            return Some(SpotlightEvent::Resumed);
        }
        None
    }

    /// Switch autonomous rotation on or off.
    ///
    /// Switching off hides any autonomously revealed card; a hovered card
    /// stays as it is.
    pub fn set_automatic(&mut self, on: bool) -> Option<SpotlightEvent> {
        if self.automatic == on {
            return None;
        }
        self.automatic = on;
        log::info!("[spotlight] automatic mode {}", if on { "on" } else { "off" });
        if on {
            if self.mounted && !self.is_suppressed() {
                self.restart_timers();
            }
            return None;
        }
        self.timer = None;
        let had_reveal = self.revealed.is_some();
        self.clear_reveals();
        had_reveal.then_some(SpotlightEvent::Cleared)
    }

    pub fn toggle_automatic(&mut self) -> Option<SpotlightEvent> {
        self.set_automatic(!self.automatic)
    }

    /// Drop all timers; unless an orb is pointed at, reset every orb's display.
    pub fn teardown(&mut self) {
        self.timer = None;
        if !self.is_suppressed() {
            self.revealed = None;
            for display in self.registry.values_mut() {
                display.reset();
            }
        }
        self.mounted = false;
        log::info!("[spotlight] torn down");
    }

    fn register(&mut self, buckets: &RingBuckets) {
        for orb in buckets.orbs() {
            self.order.push(orb.key.clone());
            self.registry
                .insert(orb.key.clone(), OrbDisplay::resting(orb.base_layer()));
        }
    }

    fn restart_timers(&mut self) {
        self.timer = self
            .automatic
            .then_some(Timer::Initial(self.config.initial_delay));
    }

    fn clear_reveals(&mut self) {
        if let Some(prev) = self.revealed.take() {
            if let Some(display) = self.registry.get_mut(&prev) {
                if !self.pointed.contains(&prev) {
                    display.reset();
                }
            }
        }
    }
}
