use anyhow::Context;
use orbit_core::{
    ContentFeed, JsonFeed, OrbKey, OrbitScene, SpotlightEvent, VisualizerConfig,
};
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(100);

struct Args {
    feed: Option<String>,
    config: Option<String>,
    seconds: u64,
    seed: u64,
    hover_at: Option<(u64, u64)>,
    json: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            feed: None,
            config: None,
            seconds: 30,
            seed: 42,
            hover_at: Some((12, 15)),
            json: false,
        }
    }
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(flag) = it.next() {
        let mut value = |name: &str| {
            it.next()
                .with_context(|| format!("{name} expects a value"))
        };
        match flag.as_str() {
            "--feed" => args.feed = Some(value("--feed")?),
            "--config" => args.config = Some(value("--config")?),
            "--seconds" => args.seconds = value("--seconds")?.parse()?,
            "--seed" => args.seed = value("--seed")?.parse()?,
            "--no-hover" => args.hover_at = None,
            "--json" => args.json = true,
            other => anyhow::bail!(
                "unknown argument {other}; usage: orbit-native [--feed FILE] [--config FILE] \
                 [--seconds N] [--seed N] [--no-hover] [--json]"
            ),
        }
    }
    Ok(args)
}

fn load_config(path: Option<&str>) -> anyhow::Result<VisualizerConfig> {
    let Some(path) = path else {
        return Ok(VisualizerConfig::default());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    VisualizerConfig::from_json(&text).with_context(|| format!("parsing {path}"))
}

fn load_feed(path: Option<&str>) -> anyhow::Result<JsonFeed> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            JsonFeed::from_json(&text).with_context(|| format!("parsing {path}"))
        }
        None => Ok(JsonFeed::sample()?),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = parse_args()?;

    let config = load_config(args.config.as_deref())?;
    let feed = load_feed(args.feed.as_deref())?;
    let items = feed.list_items()?;
    log::info!("[native] {} items, seed {}", items.len(), args.seed);

    let mut scene = OrbitScene::new(config, args.seed);
    scene.mount(&items);

    for (i, ring) in scene.buckets().rings().enumerate() {
        log::info!("[native] ring {} ({} orbs)", i, ring.len());
        for orb in ring {
            log::info!(
                "  #{:<2} {:<28} relevance={:>8.0} size={:>5.2} color={} phase={:.3}",
                orb.seq,
                orb.key,
                orb.relevance,
                orb.visual_size,
                orb.color,
                orb.angular_phase
            );
        }
    }

    let hover_key: Option<OrbKey> = scene.buckets().orbs().next().map(|o| o.key.clone());
    let total_frames = args.seconds * 1000 / FRAME.as_millis() as u64;
    let mut elapsed = Duration::ZERO;
    for _ in 0..total_frames {
        elapsed += FRAME;
        if let (Some((enter, leave)), Some(key)) = (args.hover_at, hover_key.as_ref()) {
            if elapsed == Duration::from_secs(enter) {
                report(elapsed, scene.pointer_enter(key));
            } else if elapsed == Duration::from_secs(leave) {
                report(elapsed, scene.pointer_leave(key));
            }
        }
        report(elapsed, scene.advance(FRAME));
    }

    if args.json {
        let frame = scene.render(elapsed);
        println!("{}", serde_json::to_string_pretty(&frame)?);
    }

    scene.teardown();
    Ok(())
}

fn report(at: Duration, event: Option<SpotlightEvent>) {
    if let Some(ev) = event {
        log::info!("[native] t={:>5.1}s {:?}", at.as_secs_f32(), ev);
    }
}
