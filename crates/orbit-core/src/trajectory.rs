//! Circular keyframe paths for orbs.
//!
//! Each ring's circle is cut into one equal arc per orb. An orb's phase is
//! drawn once per allocation pass from the interior of its arc (a margin is
//! kept clear at both ends so neighbours never start on top of each other),
//! and its path is then a fixed 36-step sampling of the full circle shifted by
//! that phase plus a per-ring stagger.

use crate::config::RingConfig;
use crate::constants::*;
use crate::orb::Orb;
use glam::Vec2;
use rand::Rng;
use serde::Serialize;
use std::f32::consts::TAU;
use std::time::Duration;

/// An orb's share of its ring: arc `index` out of `count` equal arcs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub index: usize,
    pub count: usize,
}

impl Segment {
    pub fn new(index: usize, count: usize) -> Self {
        debug_assert!(index < count, "segment {index} out of {count}");
        Self { index, count }
    }

    pub fn width(&self) -> f32 {
        TAU / self.count.max(1) as f32
    }

    pub fn start(&self) -> f32 {
        self.index as f32 * self.width()
    }

    pub fn end(&self) -> f32 {
        self.start() + self.width()
    }

    /// Angle kept clear at each end of the arc.
    pub fn margin(&self) -> f32 {
        MIN_PHASE_MARGIN.min(self.width() * MAX_MARGIN_FRACTION)
    }

    /// Range a phase may be drawn from.
    pub fn interior(&self) -> (f32, f32) {
        let m = self.margin();
        (self.start() + m, self.end() - m)
    }
}

/// Draw a phase uniformly from the segment's interior.
pub fn draw_phase<R: Rng + ?Sized>(segment: Segment, rng: &mut R) -> f32 {
    let (lo, hi) = segment.interior();
    rng.gen_range(lo..hi)
}

/// Angle by which ring `ring_index` is rotated so rings don't start aligned.
pub fn ring_offset(ring_index: usize, ring_count: usize) -> f32 {
    TAU * ring_index as f32 / ring_count.max(1) as f32
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Easing {
    #[default]
    Linear,
}

/// Looping keyframe path handed to a rendering surface.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trajectory {
    /// `TRAJECTORY_STEPS + 1` points; the last repeats the first.
    pub points: Vec<Vec2>,
    /// Normalized keyframe times, 0..=1.
    pub times: Vec<f32>,
    pub period: Duration,
    pub delay: Duration,
    pub easing: Easing,
}

impl Trajectory {
    /// Position `elapsed` after the surface started playing.
    ///
    /// Holds the first keyframe during the start delay, then loops forever.
    pub fn position_at(&self, elapsed: Duration) -> Vec2 {
        let Some(&first) = self.points.first() else {
            return Vec2::ZERO;
        };
        let period = self.period.as_secs_f32();
        if elapsed <= self.delay || period <= 0.0 || self.points.len() < 2 {
            return first;
        }
        let t = ((elapsed - self.delay).as_secs_f32() / period).fract();
        let steps = (self.points.len() - 1) as f32;
        let pos = t * steps;
        let i = (pos.floor() as usize).min(self.points.len() - 2);
        self.points[i].lerp(self.points[i + 1], pos - i as f32)
    }
}

#[inline]
fn round_coord(v: f32) -> f32 {
    (v * COORD_PRECISION).round() / COORD_PRECISION
}

/// Sample the closed path of `orb` around `ring`.
pub fn build_trajectory(orb: &Orb, ring: &RingConfig, ring_count: usize) -> Trajectory {
    let radius = ring.radius;
    let shift = orb.angular_phase + ring_offset(orb.ring_index, ring_count);
    let steps = TRAJECTORY_STEPS;
    let points = (0..=steps)
        .map(|i| {
            let angle = i as f32 * TAU / steps as f32 + shift;
            Vec2::new(
                round_coord(radius * angle.cos()),
                round_coord(radius * angle.sin()),
            )
        })
        .collect();
    let times = (0..=steps).map(|i| i as f32 / steps as f32).collect();
    Trajectory {
        points,
        times,
        period: ring.period(),
        delay: Duration::from_secs_f32(orb.ring_index as f32 * RING_START_DELAY_SECS),
        easing: Easing::Linear,
    }
}
