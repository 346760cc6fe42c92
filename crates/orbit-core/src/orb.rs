//! Orbit allocation: content items → orbs bucketed onto rings.

use crate::color::{credibility_color, Rgb};
use crate::config::{OrbitConfig, RingConfig};
use crate::constants::{MIN_BASE_LAYER, RING_LAYER_TOP};
use crate::content::ContentItem;
use crate::score::score;
use crate::trajectory::{draw_phase, Segment};
use rand::Rng;
use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;

/// Stable identity of an orb across allocation passes: its source item's id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct OrbKey(pub String);

impl fmt::Display for OrbKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for OrbKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Orb {
    /// Allocation-order number; fresh on every pass.
    pub seq: u32,
    pub key: OrbKey,
    pub source: ContentItem,
    pub ring_index: usize,
    pub relevance: f64,
    pub visual_size: f32,
    pub color: Rgb,
    pub segment: Segment,
    pub angular_phase: f32,
}

impl Orb {
    pub fn base_layer(&self) -> i32 {
        base_layer(self.ring_index)
    }
}

/// Resting display layer of a ring; inner rings draw above outer ones.
pub fn base_layer(ring_index: usize) -> i32 {
    let ring = i32::try_from(ring_index).unwrap_or(i32::MAX);
    RING_LAYER_TOP.saturating_sub(ring).max(MIN_BASE_LAYER)
}

/// Orbs grouped by ring, innermost first.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RingBuckets {
    rings: SmallVec<[Vec<Orb>; 3]>,
}

impl RingBuckets {
    pub fn empty(ring_count: usize) -> Self {
        Self {
            rings: (0..ring_count).map(|_| Vec::new()).collect(),
        }
    }

    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    pub fn ring(&self, index: usize) -> &[Orb] {
        self.rings.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rings(&self) -> impl Iterator<Item = &[Orb]> {
        self.rings.iter().map(Vec::as_slice)
    }

    /// All orbs, ring by ring.
    pub fn orbs(&self) -> impl Iterator<Item = &Orb> {
        self.rings.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.rings.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.iter().all(Vec::is_empty)
    }

    pub fn find(&self, key: &OrbKey) -> Option<&Orb> {
        self.orbs().find(|o| &o.key == key)
    }
}

/// Ring whose view bucket contains `views`.
///
/// Buckets are inclusive at the top; anything past every bounded ring lands
/// on the last, unbounded one.
pub fn ring_for_views(views: u64, rings: &[RingConfig]) -> usize {
    rings
        .iter()
        .position(|r| r.max_views.map_or(true, |max| views <= max))
        .unwrap_or(rings.len().saturating_sub(1))
}

/// Relevance scaled against the configured global range and clamped to 0..=1.
pub fn normalized_relevance(relevance: f64, config: &OrbitConfig) -> f32 {
    let span = config.relevance_ceiling - config.relevance_floor;
    if span <= 0.0 {
        return 0.0;
    }
    ((relevance - config.relevance_floor) / span).clamp(0.0, 1.0) as f32
}

pub fn visual_size(relevance: f64, ring: &RingConfig, config: &OrbitConfig) -> f32 {
    let n = normalized_relevance(relevance, config);
    ring.min_size + n * (ring.max_size - ring.min_size)
}

/// Allocate every item to a ring and draw each orb's phase.
///
/// Exactly one orb per item. `config` is expected to have passed
/// [`OrbitConfig::validate`]; with no rings configured nothing is placed.
pub fn allocate<R: Rng + ?Sized>(
    items: &[ContentItem],
    config: &OrbitConfig,
    rng: &mut R,
) -> RingBuckets {
    let mut buckets = RingBuckets::empty(config.ring_count());
    if config.rings.is_empty() {
        log::warn!("[orbit] no rings configured; {} items dropped", items.len());
        return buckets;
    }

    for (seq, item) in items.iter().enumerate() {
        let ring_index = ring_for_views(item.engagement.views, &config.rings);
        let relevance = score(&item.engagement);
        let orb = Orb {
            seq: seq as u32,
            key: OrbKey(item.id.clone()),
            source: item.clone(),
            ring_index,
            relevance,
            visual_size: visual_size(relevance, &config.rings[ring_index], config),
            color: credibility_color(item.engagement.credibility_percent),
            segment: Segment::new(0, 1),
            angular_phase: 0.0,
        };
        buckets.rings[ring_index].push(orb);
    }

    for ring in buckets.rings.iter_mut() {
        let count = ring.len();
        for (index, orb) in ring.iter_mut().enumerate() {
            orb.segment = Segment::new(index, count);
            orb.angular_phase = draw_phase(orb.segment, rng);
        }
    }

    log::debug!(
        "[orbit] allocated {} orbs: {:?}",
        buckets.len(),
        buckets.rings.iter().map(Vec::len).collect::<SmallVec<[usize; 3]>>()
    );
    buckets
}
