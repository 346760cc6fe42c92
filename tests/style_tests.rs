// Host-side tests for the web surface's style helpers.
// The surface crate is wasm-only, so we include the pure modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod style {
    include!("../src/style.rs");
}

use orbit_core::*;
use std::time::Duration;
use style::*;

fn scene_with(kind: ContentKind) -> OrbitScene {
    let mut scene = OrbitScene::with_defaults(3);
    scene.mount(&[ContentItem::new(
        "only",
        kind,
        Engagement {
            views: 5_000,
            comments: 10,
            credibility_percent: 80,
        },
    )]);
    scene
}

#[test]
fn diameter_scales_with_kind_tier() {
    let report = scene_with(ContentKind::Report).render(Duration::ZERO).remove(0);
    let investigation = scene_with(ContentKind::Investigation)
        .render(Duration::ZERO)
        .remove(0);
    assert!((orb_diameter(&report) - report.visual_size).abs() < 1e-5);
    assert!((orb_diameter(&investigation) - report.visual_size * 1.5).abs() < 1e-4);
}

#[test]
fn orb_style_carries_layer_color_and_position() {
    let orb = scene_with(ContentKind::Opinion).render(Duration::ZERO).remove(0);
    let css = orb_style(&orb);
    assert!(css.contains("z-index:10;"), "{css}");
    assert!(css.contains("background:#0000b9;"), "{css}");
    assert!(css.contains("var(--highlight-yellow)"), "{css}");
    assert!(css.contains(&format!("translate({:.2}px,{:.2}px)", orb.position.x, orb.position.y)));
}

#[test]
fn card_follows_display_state() {
    let mut scene = scene_with(ContentKind::Report);
    let key = OrbKey::from("only");

    let rest = scene.cycler().display(&key).unwrap();
    assert_eq!(card_class(&rest), "hover-card");
    assert!(card_style(&rest).contains("pointer-events:none"));

    scene.advance(Duration::from_secs(2));
    let spot = scene.cycler().display(&key).unwrap();
    assert_eq!(card_class(&spot), "hover-card show");
    assert!(card_style(&spot).contains("pointer-events:none"));

    scene.pointer_enter(&key);
    let hovered = scene.cycler().display(&key).unwrap();
    assert_eq!(card_class(&hovered), "hover-card show");
    assert!(card_style(&hovered).contains("pointer-events:auto"));
    assert!(card_style(&hovered).contains("z-index:100;"));
}

#[test]
fn toggle_labels() {
    assert_eq!(auto_button_label(true), "Automatisch: An");
    assert_eq!(auto_button_label(false), "Automatisch: Aus");
}

#[test]
fn hovered_orb_grows() {
    let mut scene = scene_with(ContentKind::Report);
    let key = OrbKey::from("only");
    let rest = orb_style(&scene.render(Duration::ZERO).remove(0));
    assert!(!rest.contains("scale("), "{rest}");

    scene.pointer_enter(&key);
    let hovered = orb_style(&scene.render(Duration::ZERO).remove(0));
    assert!(hovered.contains(") scale(1.15);"), "{hovered}");

    scene.pointer_leave(&key);
    let left = orb_style(&scene.render(Duration::ZERO).remove(0));
    assert!(!left.contains("scale("), "{left}");
}
