use anyhow::Context;
use async_trait::async_trait;
use mapview::{
    background::tasks::{refresh_channel, RefreshSource, RefreshTask},
    constants::DEFAULT_REFRESH_INTERVAL_MS,
    ImageRefresh, InputEvent, MapDefinition, Marker, MarkerCategory, MarkerStore, Point,
    RecordingSurface, Size, StaticImageSource, ViewEvent, ViewportEngine,
};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const CONTAINER: Size = Size {
    width: 1200.0,
    height: 800.0,
};

const DEFAULT_DEFINITION: &str = r#"{
    "viewport": { "minZoom": 0.1, "maxZoom": 50 },
    "mapping": { "fractional": true },
    "image": { "path": "map.png", "width": 2000, "height": 1000 },
    "markers": {
        "bosses": [
            { "x": 0.48, "y": 0.43, "name": "Boss1" },
            { "x": 0.55, "y": 0.46, "name": "Dragon" },
            { "x": 0.52, "y": 0.44, "name": "Hacker" },
            { "x": 0.58, "y": 0.48, "name": "Boss3" }
        ],
        "orbs": [
            { "x": 0.42, "y": 0.45, "name": "Orb 1" },
            { "x": 0.46, "y": 0.47, "name": "Orb 2" },
            { "x": 0.50, "y": 0.44, "name": "Orb 3" }
        ],
        "players": [{ "x": 0.58, "y": 0.45, "name": "Marker 1" }]
    }
}"#;

/// Player feed that walks a small circle around its start position
struct WanderingPlayer {
    start: Point,
    step: AtomicU64,
}

#[async_trait]
impl RefreshSource for WanderingPlayer {
    type Output = Vec<Marker>;

    async fn fetch(&self) -> mapview::Result<Vec<Marker>> {
        let step = self.step.fetch_add(1, Ordering::SeqCst) as f64;
        let angle = step * 0.5;
        let position = Point::new(
            self.start.x + 0.01 * angle.cos(),
            self.start.y + 0.01 * angle.sin(),
        );
        Ok(vec![Marker::new(MarkerCategory::Player, position, "Marker 1")])
    }

    fn name(&self) -> &str {
        "player-feed"
    }
}

/// Scripted pointer input replayed once the map has been fitted
fn scripted_input() -> Vec<InputEvent> {
    let center = Point::new(CONTAINER.width / 2.0, CONTAINER.height / 2.0);
    let mut events = vec![InputEvent::DragStart { position: center }];
    for i in 1..=5 {
        events.push(InputEvent::DragMove {
            position: center.add(&Point::new(i as f64 * 20.0, i as f64 * -8.0)),
        });
    }
    events.push(InputEvent::DragEnd);
    for _ in 0..10 {
        events.push(InputEvent::wheel(Point::new(300.0, 250.0), -120.0));
    }
    events.push(InputEvent::wheel(Point::new(300.0, 250.0), 120.0));
    events
}

/// Headless map viewer driver
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mapview::init_logging();

    let definition = match std::env::args().nth(1) {
        Some(path) => MapDefinition::load(&path)
            .with_context(|| format!("failed to load map definition from {path}"))?,
        None => MapDefinition::from_json(DEFAULT_DEFINITION)?,
    };
    let image_size = definition
        .image
        .as_ref()
        .map(|image| image.size())
        .context("map definition has no image")?;

    let mut engine = ViewportEngine::new(definition.viewport.clone())?;
    let mut markers = MarkerStore::from_definition(&definition)?;
    let transform_events = Arc::new(AtomicUsize::new(0));
    let counter = transform_events.clone();
    engine.on("transformchanged", move |event: &ViewEvent| {
        counter.fetch_add(1, Ordering::Relaxed);
        log::trace!("{:?}", event);
    });
    engine.resize(CONTAINER);

    let start = markers
        .markers(MarkerCategory::Player)
        .first()
        .map(|m| m.world_pos())
        .unwrap_or_default();

    let interval = Duration::from_millis(DEFAULT_REFRESH_INTERVAL_MS);
    let (image_tx, image_rx) = refresh_channel();
    let image_task = RefreshTask::spawn(
        ImageRefresh::new(StaticImageSource::new(image_size)),
        interval,
        image_tx,
    );
    let (player_tx, player_rx) = refresh_channel();
    let player_task = RefreshTask::spawn(
        WanderingPlayer {
            start,
            step: AtomicU64::new(0),
        },
        interval,
        player_tx,
    );

    let mut surface = RecordingSurface::new();
    let mut script = Some(scripted_input());
    let mut frame = tokio::time::interval(Duration::from_millis(100));
    let deadline = tokio::time::sleep(Duration::from_secs(5));
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = &mut deadline => break,
            _ = tokio::signal::ctrl_c() => break,
            _ = frame.tick() => {}
        }

        engine.drain_refresh(&image_rx);
        for players in player_rx.try_iter() {
            if let Err(e) = markers.replace_category(MarkerCategory::Player, players) {
                log::warn!("ignoring player update: {}", e);
            }
        }

        if !engine.viewport().is_initialized() {
            continue;
        }
        if let Some(events) = script.take() {
            for event in events {
                engine.handle_event(event)?;
            }
            markers.set_visible(MarkerCategory::Orb, false);
        }

        // Only the newest transform is queued between frames
        if let Some(latest) = engine.drain_events().pop() {
            log::debug!("frame picks up {:?}", latest);
        }
        engine.render(&markers, &mut surface);
        if let Some(player) = surface
            .markers
            .iter()
            .find(|m| m.class.ends_with(MarkerCategory::Player.css_class()))
        {
            log::info!(
                "{} | zoom {} | {} at ({:.1}, {:.1}) {}",
                surface.wrapper_transform,
                surface.zoom_label,
                player.label,
                player.left,
                player.top,
                player.transform
            );
        }
    }

    image_task.stop();
    player_task.stop();
    log::info!(
        "rendered {} frames, {} transform events",
        surface.frames,
        transform_events.load(Ordering::Relaxed)
    );
    Ok(())
}
