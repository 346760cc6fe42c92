// Host-side tests for the spotlight cycler and the scene that drives it.

use orbit_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

fn items(n: usize) -> Vec<ContentItem> {
    (0..n)
        .map(|i| {
            ContentItem::new(
                format!("story-{i}"),
                ContentKind::Investigation,
                Engagement {
                    views: i as u64 * 6_000,
                    comments: i as u64,
                    credibility_percent: 60,
                },
            )
        })
        .collect()
}

fn mounted(n: usize) -> OrbitScene {
    let mut scene = OrbitScene::with_defaults(42);
    scene.mount(&items(n));
    scene
}

fn revealed(scene: &OrbitScene) -> Vec<OrbKey> {
    scene
        .buckets()
        .orbs()
        .filter(|o| scene.cycler().display(&o.key).is_some_and(|d| d.revealed))
        .map(|o| o.key.clone())
        .collect()
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn starts_idle_with_nothing_revealed() {
    let scene = mounted(4);
    assert_eq!(scene.cycler().phase(), SpotlightPhase::Idle);
    assert_eq!(scene.spotlight(), SpotlightState::default());
    assert!(revealed(&scene).is_empty());
    assert_eq!(scene.cycler().next_tick_in(), Some(ms(2_000)));
}

#[test]
fn first_reveal_after_initial_delay() {
    let mut scene = mounted(4);
    assert_eq!(scene.advance(ms(1_999)), None);
    assert!(revealed(&scene).is_empty());

    let ev = scene.advance(ms(1));
    let Some(SpotlightEvent::Revealed(key)) = ev else {
        panic!("expected a reveal, got {ev:?}");
    };
    assert_eq!(revealed(&scene), vec![key.clone()]);
    assert_eq!(scene.spotlight().revealed, Some(key.clone()));
    let display = scene.cycler().display(&key).unwrap();
    assert_eq!(display.layer, SPOTLIGHT_LAYER);
    assert!(!display.interactive);
}

#[test]
fn exactly_one_orb_revealed_per_interval() {
    let mut scene = mounted(6);
    scene.advance(ms(2_000));
    for _ in 0..20 {
        assert_eq!(revealed(&scene).len(), 1);
        assert!(scene.advance(ms(4_999)).is_none());
        assert!(scene.advance(ms(1)).is_some());
    }
    // layers of everything not in the spotlight are back at rest
    for orb in scene.buckets().orbs() {
        let d = scene.cycler().display(&orb.key).unwrap();
        if !d.revealed {
            assert_eq!(d.layer, orb.base_layer());
        }
    }
}

#[test]
fn pick_is_spread_across_orbs() {
    let mut scene = mounted(5);
    scene.advance(ms(2_000));
    let mut seen = std::collections::BTreeSet::new();
    for _ in 0..200 {
        if let Some(SpotlightEvent::Revealed(k)) = scene.advance(ms(5_000)) {
            seen.insert(k);
        }
    }
    assert_eq!(seen.len(), 5);
}

#[test]
fn pointer_enter_cancels_pending_reveal_in_same_tick() {
    let mut scene = mounted(3);
    scene.advance(ms(1_900));
    let key = OrbKey::from("story-1");
    assert_eq!(
        scene.pointer_enter(&key),
        Some(SpotlightEvent::Hovered(key.clone()))
    );
    assert!(scene.cycler().is_suppressed());
    assert_eq!(scene.cycler().next_tick_in(), None);
    // a tick that would have been due is never processed
    for _ in 0..10 {
        assert_eq!(scene.advance(ms(10_000)), None);
    }
    assert_eq!(revealed(&scene), vec![key.clone()]);
    let d = scene.cycler().display(&key).unwrap();
    assert_eq!(d.layer, HOVER_LAYER);
    assert!(d.interactive);
    assert_eq!(
        scene.spotlight(),
        SpotlightState {
            revealed: Some(key),
            suppressed: true
        }
    );
}

#[test]
fn hover_replaces_autonomous_spotlight() {
    let mut scene = mounted(3);
    let Some(SpotlightEvent::Revealed(auto)) = scene.advance(ms(2_000)) else {
        panic!("expected a reveal");
    };
    let other = scene
        .buckets()
        .orbs()
        .map(|o| o.key.clone())
        .find(|k| *k != auto)
        .unwrap();
    scene.pointer_enter(&other);
    assert_eq!(revealed(&scene), vec![other.clone()]);
    let d = scene.cycler().display(&auto).unwrap();
    assert!(!d.revealed);
}

#[test]
fn pointer_leave_restarts_from_initial_delay() {
    let mut scene = mounted(3);
    scene.advance(ms(2_000));
    let key = OrbKey::from("story-0");
    scene.pointer_enter(&key);
    scene.advance(ms(30_000));
    assert_eq!(scene.pointer_leave(&key), Some(SpotlightEvent::Resumed));
    assert_eq!(scene.cycler().phase(), SpotlightPhase::Idle);
    assert!(revealed(&scene).is_empty());
    assert_eq!(scene.cycler().next_tick_in(), Some(ms(2_000)));
    assert!(scene.advance(ms(1_999)).is_none());
    assert!(scene.advance(ms(1)).is_some());
}

#[test]
fn empty_scene_never_fires() {
    let mut scene = mounted(0);
    for _ in 0..50 {
        assert_eq!(scene.advance(ms(1_000)), None);
    }
    assert!(scene.render(ms(10_000)).is_empty());
    assert_eq!(scene.spotlight(), SpotlightState::default());
}

#[test]
fn refresh_to_empty_feed_is_a_quiet_no_op() {
    let mut scene = mounted(3);
    scene.advance(ms(2_000));
    scene.refresh(&[]);
    assert_eq!(scene.spotlight().revealed, None);
    assert_eq!(scene.advance(ms(5_000)), None);
}

#[test]
fn teardown_clears_reveals_and_timers() {
    let mut scene = mounted(3);
    scene.advance(ms(2_000));
    scene.teardown();
    assert!(revealed(&scene).is_empty());
    assert_eq!(scene.cycler().next_tick_in(), None);
    assert_eq!(scene.advance(ms(60_000)), None);
    assert!(!scene.cycler().is_mounted());
}

#[test]
fn teardown_while_hovered_keeps_hover_card() {
    let mut scene = mounted(3);
    let key = OrbKey::from("story-2");
    scene.pointer_enter(&key);
    scene.teardown();
    assert_eq!(revealed(&scene), vec![key]);
    assert_eq!(scene.cycler().next_tick_in(), None);
}

#[test]
fn automatic_off_hides_cards_and_stops_rotation() {
    let mut scene = mounted(3);
    scene.advance(ms(2_000));
    assert_eq!(scene.set_automatic(false), Some(SpotlightEvent::Cleared));
    assert!(revealed(&scene).is_empty());
    assert_eq!(scene.advance(ms(60_000)), None);

    // hovering still works with rotation off
    let key = OrbKey::from("story-0");
    scene.pointer_enter(&key);
    assert_eq!(revealed(&scene), vec![key.clone()]);
    scene.pointer_leave(&key);
    assert_eq!(scene.cycler().next_tick_in(), None);

    assert_eq!(scene.toggle_automatic(), None);
    assert!(scene.cycler().is_automatic());
    assert_eq!(scene.cycler().next_tick_in(), Some(ms(2_000)));
}

#[test]
fn spotlight_survives_refresh_when_item_stays() {
    let mut scene = mounted(4);
    let Some(SpotlightEvent::Revealed(key)) = scene.advance(ms(2_000)) else {
        panic!("expected a reveal");
    };
    let mut next = items(4);
    next.push(ContentItem::new(
        "late-breaking",
        ContentKind::Report,
        Engagement::default(),
    ));
    scene.refresh(&next);
    assert_eq!(scene.spotlight().revealed, Some(key.clone()));
    assert_eq!(revealed(&scene), vec![key]);
    assert_eq!(scene.cycler().orb_count(), 5);
    // the running interval is not restarted by a refresh
    assert_eq!(scene.cycler().next_tick_in(), Some(ms(5_000)));
}

#[test]
fn refresh_dropping_hovered_orb_resumes_rotation() {
    let mut scene = mounted(3);
    let key = OrbKey::from("story-2");
    scene.pointer_enter(&key);
    assert_eq!(scene.refresh(&items(2)), Some(SpotlightEvent::Resumed));
    assert!(!scene.cycler().is_suppressed());
    assert_eq!(scene.cycler().next_tick_in(), Some(ms(2_000)));
}

#[test]
fn load_reads_from_feed() {
    let mut scene = OrbitScene::with_defaults(1);
    let feed = JsonFeed::sample().expect("sample feed");
    scene.load(&feed).expect("load");
    assert_eq!(scene.buckets().len(), feed.catalog().articles().len());
    assert!(scene.cycler().is_mounted());
}

#[test]
fn render_reports_positions_on_rings() {
    let scene = mounted(5);
    let frame = scene.render(ms(7_300));
    assert_eq!(frame.len(), 5);
    for orb in &frame {
        let radius = scene.config().rings[orb.ring_index].radius;
        assert!((orb.position.length() - radius).abs() < 1.0);
        assert_eq!(orb.marker_px, ContentKind::Investigation.marker_px());
        assert!(orb.color.starts_with('#'));
    }
}

#[test]
fn cycler_with_injected_rng_is_reproducible() {
    let buckets = allocate(&items(6), &OrbitConfig::default(), &mut StdRng::seed_from_u64(1));
    let run = || {
        let mut c = SpotlightCycler::new(SpotlightConfig::default(), StdRng::seed_from_u64(99));
        c.mount(&buckets);
        (0..10)
            .filter_map(|_| c.advance(ms(5_000)))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn refresh_after_teardown_stays_down() {
    let mut scene = mounted(3);
    scene.teardown();
    assert_eq!(scene.refresh(&items(3)), None);
    assert!(scene.is_torn_down());
    assert!(!scene.cycler().is_mounted());
    assert_eq!(scene.cycler().next_tick_in(), None);
    assert_eq!(scene.pointer_enter(&OrbKey::from("story-0")), None);
    assert_eq!(scene.advance(ms(60_000)), None);
}

#[test]
fn load_after_teardown_is_ignored() {
    let mut scene = mounted(2);
    scene.teardown();
    let feed = JsonFeed::sample().expect("sample feed");
    assert!(matches!(scene.load(&feed), Ok(None)));
    assert_eq!(scene.buckets().len(), 2);
    assert!(!scene.cycler().is_mounted());

    // an explicit mount brings it back
    scene.mount(&items(2));
    assert!(!scene.is_torn_down());
    assert_eq!(scene.cycler().next_tick_in(), Some(ms(2_000)));
}

#[test]
fn refresh_before_mount_is_ignored() {
    let mut scene = OrbitScene::with_defaults(5);
    assert_eq!(scene.refresh(&items(3)), None);
    assert!(scene.buckets().is_empty());
    assert!(!scene.cycler().is_mounted());
}

#[test]
fn hovered_orb_kept_by_refresh_pauses_until_left() {
    let mut scene = mounted(3);
    let key = OrbKey::from("story-1");
    scene.pointer_enter(&key);
    assert_eq!(scene.refresh(&items(3)), None);
    assert!(scene.cycler().is_suppressed());
    assert_eq!(scene.spotlight().revealed, Some(key.clone()));

    // the surface keeps the element under the pointer, so its leave arrives
    assert_eq!(scene.pointer_leave(&key), Some(SpotlightEvent::Resumed));
    let reveals = (0..60)
        .filter_map(|_| scene.advance(ms(1_000)))
        .count();
    assert!(reveals >= 10, "only {reveals} reveals in 60s");
}

#[test]
fn repeated_ids_collapse_to_one_orb() {
    let mut feed = items(2);
    feed.push(feed[0].clone());
    let mut scene = OrbitScene::with_defaults(9);
    scene.mount(&feed);
    assert_eq!(scene.buckets().len(), 2);
    assert_eq!(scene.cycler().orb_count(), 2);
    assert_eq!(scene.render(ms(0)).len(), 2);
    assert!(scene.load(&feed).is_err());
}
