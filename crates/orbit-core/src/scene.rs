use crate::config::{OrbitConfig, SpotlightConfig, VisualizerConfig};
use crate::content::{ContentFeed, ContentItem, FeedError};
use crate::orb::{allocate, Orb, OrbKey, RingBuckets};
use crate::spotlight::{OrbDisplay, SpotlightCycler, SpotlightEvent, SpotlightState};
use crate::trajectory::{build_trajectory, Trajectory};
use fnv::{FnvHashMap, FnvHashSet};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::time::Duration;

/// Everything a surface draws for one orb in one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderedOrb {
    pub key: OrbKey,
    pub seq: u32,
    pub ring_index: usize,
    pub headline: String,
    pub visual_size: f32,
    pub marker_px: f32,
    pub color: String,
    pub accent: &'static str,
    pub position: Vec2,
    pub display: OrbDisplay,
}

/// Feed → allocation → trajectories → spotlight, wired together.
///
/// Layout and spotlight draw from separate RNG streams derived from one seed,
/// so a refresh never shifts the spotlight's sequence of picks.
pub struct OrbitScene {
    config: OrbitConfig,
    layout_rng: StdRng,
    buckets: RingBuckets,
    trajectories: FnvHashMap<OrbKey, Trajectory>,
    cycler: SpotlightCycler<StdRng>,
    torn_down: bool,
}

impl OrbitScene {
    pub fn new(config: VisualizerConfig, seed: u64) -> Self {
        let ring_count = config.orbit.ring_count();
        Self {
            layout_rng: StdRng::seed_from_u64(seed),
            cycler: SpotlightCycler::new(
                config.spotlight,
                StdRng::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15),
            ),
            config: config.orbit,
            buckets: RingBuckets::empty(ring_count),
            trajectories: FnvHashMap::default(),
            torn_down: false,
        }
    }

    pub fn with_defaults(seed: u64) -> Self {
        Self::new(
            VisualizerConfig {
                orbit: OrbitConfig::default(),
                spotlight: SpotlightConfig::default(),
            },
            seed,
        )
    }

    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    pub fn buckets(&self) -> &RingBuckets {
        &self.buckets
    }

    pub fn cycler(&self) -> &SpotlightCycler<StdRng> {
        &self.cycler
    }

    pub fn trajectory(&self, key: &OrbKey) -> Option<&Trajectory> {
        self.trajectories.get(key)
    }

    pub fn spotlight(&self) -> SpotlightState {
        self.cycler.state()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// First load: lay out `items` and start the spotlight from scratch.
    pub fn mount(&mut self, items: &[ContentItem]) {
        self.torn_down = false;
        self.layout(items);
        self.cycler.mount(&self.buckets);
    }

    /// Later loads: new layout, spotlight keeps running.
    ///
    /// Ignored unless the scene is mounted; a torn-down scene stays down
    /// until [`OrbitScene::mount`] is called again.
    pub fn refresh(&mut self, items: &[ContentItem]) -> Option<SpotlightEvent> {
        if !self.cycler.is_mounted() {
            log::debug!("[scene] refresh ignored; scene is not mounted");
            return None;
        }
        self.layout(items);
        self.cycler.sync(&self.buckets)
    }

    /// Pull the feed; mounts on first use, refreshes afterwards.
    pub fn load(&mut self, feed: &dyn ContentFeed) -> Result<Option<SpotlightEvent>, FeedError> {
        if self.torn_down {
            log::debug!("[scene] load ignored after teardown");
            return Ok(None);
        }
        let items = feed.list_items()?;
        if self.cycler.is_mounted() {
            return Ok(self.refresh(&items));
        }
        self.mount(&items);
        Ok(None)
    }

    fn layout(&mut self, items: &[ContentItem]) {
        let mut seen = FnvHashSet::default();
        let unique: Vec<ContentItem> = items
            .iter()
            .filter(|item| {
                let first = seen.insert(item.id.as_str());
                if !first {
                    log::warn!("[scene] item {} repeated; keeping the first", item.id);
                }
                first
            })
            .cloned()
            .collect();
        self.buckets = allocate(&unique, &self.config, &mut self.layout_rng);
        let ring_count = self.config.ring_count();
        self.trajectories = self
            .buckets
            .orbs()
            .map(|orb| {
                let ring = &self.config.rings[orb.ring_index];
                (orb.key.clone(), build_trajectory(orb, ring, ring_count))
            })
            .collect();
        log::info!(
            "[scene] laid out {} orbs on {} rings",
            self.buckets.len(),
            ring_count
        );
    }

    pub fn advance(&mut self, dt: Duration) -> Option<SpotlightEvent> {
        self.cycler.advance(dt)
    }

    pub fn pointer_enter(&mut self, key: &OrbKey) -> Option<SpotlightEvent> {
        self.cycler.pointer_enter(key)
    }

    pub fn pointer_leave(&mut self, key: &OrbKey) -> Option<SpotlightEvent> {
        self.cycler.pointer_leave(key)
    }

    pub fn set_automatic(&mut self, on: bool) -> Option<SpotlightEvent> {
        self.cycler.set_automatic(on)
    }

    pub fn toggle_automatic(&mut self) -> Option<SpotlightEvent> {
        self.cycler.toggle_automatic()
    }

    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.cycler.teardown();
    }

    /// Snapshot every orb at `elapsed` since the surface started playing.
    pub fn render(&self, elapsed: Duration) -> Vec<RenderedOrb> {
        self.buckets
            .orbs()
            .filter_map(|orb| self.render_orb(orb, elapsed))
            .collect()
    }

    fn render_orb(&self, orb: &Orb, elapsed: Duration) -> Option<RenderedOrb> {
        let trajectory = self.trajectories.get(&orb.key)?;
        let display = self.cycler.display(&orb.key)?;
        Some(RenderedOrb {
            key: orb.key.clone(),
            seq: orb.seq,
            ring_index: orb.ring_index,
            headline: orb.source.headline.clone(),
            visual_size: orb.visual_size,
            marker_px: orb.source.kind.marker_px(),
            color: orb.color.hex(),
            accent: orb.source.kind.accent(),
            position: trajectory.position_at(elapsed),
            display,
        })
    }
}
