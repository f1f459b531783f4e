use crate::{
    core::{
        config::ViewportConfig,
        geo::{Point, Size},
        viewport::{Viewport, ZoomDirection},
    },
    input::events::{InputEvent, ViewEvent},
    layers::manager::MarkerStore,
    prelude::{HashMap, VecDeque},
    rendering::surface::{render_frame, RenderSurface},
    Result,
};
use crossbeam_channel::Receiver;

/// Event listener callback type
pub type EventCallback = Box<dyn Fn(&ViewEvent) + Send + Sync>;

/// Dispatches view events to listeners and keeps them for polling hosts
#[derive(Default)]
pub struct EventManager {
    /// Event listeners by event type
    listeners: HashMap<String, Vec<EventCallback>>,
    /// Emitted events not yet drained, at most one per event type
    event_queue: VecDeque<ViewEvent>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, event_type: &str, callback: F)
    where
        F: Fn(&ViewEvent) + Send + Sync + 'static,
    {
        self.listeners
            .entry(event_type.to_string())
            .or_default()
            .push(Box::new(callback));
    }

    /// Calls the listeners for `event` right away and queues it.
    ///
    /// A newer event replaces a queued one of the same type, so a host that
    /// never drains holds one pending transform rather than the whole history.
    pub fn emit(&mut self, event: ViewEvent) {
        if let Some(callbacks) = self.listeners.get(event.event_type()) {
            for callback in callbacks {
                callback(&event);
            }
        }

        match self
            .event_queue
            .iter_mut()
            .find(|queued| queued.event_type() == event.event_type())
        {
            Some(queued) => *queued = event,
            None => self.event_queue.push_back(event),
        }
    }

    /// Takes every queued event, oldest first
    pub fn drain_events(&mut self) -> Vec<ViewEvent> {
        self.event_queue.drain(..).collect()
    }

    /// Get number of pending events
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }
}

/// Owns one viewport and turns host input into transform updates
///
/// All calls must come from one thread (or be serialized by the host); each
/// event is processed to completion before the next.
pub struct ViewportEngine {
    viewport: Viewport,
    event_manager: EventManager,
}

impl ViewportEngine {
    pub fn new(config: ViewportConfig) -> Result<Self> {
        Ok(Self {
            viewport: Viewport::new(config)?,
            event_manager: EventManager::new(),
        })
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Register an event listener (`"transformchanged"`)
    pub fn on<F>(&mut self, event_type: &str, callback: F)
    where
        F: Fn(&ViewEvent) + Send + Sync + 'static,
    {
        self.event_manager.on(event_type, callback);
    }

    pub fn drain_events(&mut self) -> Vec<ViewEvent> {
        self.event_manager.drain_events()
    }

    pub fn pending_events(&self) -> usize {
        self.event_manager.pending_events()
    }

    fn notify(&mut self) {
        let transform = self.viewport.transform();
        log::debug!(
            "transform changed: scale {:.4}, translate ({:.1}, {:.1})",
            transform.scale,
            transform.translate.x,
            transform.translate.y
        );
        self.event_manager.emit(ViewEvent::transform_changed(&transform));
    }

    pub fn initialize(&mut self, container_size: Size, image_size: Size) -> Result<()> {
        self.viewport.initialize(container_size, image_size)?;
        self.notify();
        Ok(())
    }

    pub fn drag_start(&mut self, position: Point) {
        self.viewport.on_drag_start(position);
    }

    pub fn drag_move(&mut self, position: Point) {
        if self.viewport.on_drag_move(position) {
            self.notify();
        }
    }

    pub fn drag_end(&mut self) {
        self.viewport.on_drag_end();
    }

    pub fn zoom(&mut self, position: Point, direction: ZoomDirection) {
        self.viewport.on_zoom(position, direction);
        self.notify();
    }

    pub fn resize(&mut self, size: Size) {
        self.viewport.resize(size);
        self.notify();
    }

    /// Fits the view on an initial load; later loads only swap the image size
    pub fn image_ready(&mut self, size: Size, is_initial_load: bool) -> Result<()> {
        self.viewport.image_ready(size, is_initial_load)?;
        self.notify();
        Ok(())
    }

    /// Handle a host input event
    pub fn handle_event(&mut self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::DragStart { position } => self.drag_start(position),
            InputEvent::DragMove { position } => self.drag_move(position),
            InputEvent::DragEnd => self.drag_end(),
            InputEvent::Zoom {
                position,
                direction,
            } => self.zoom(position, direction),
            InputEvent::Resize { size } => self.resize(size),
            InputEvent::ImageReady {
                size,
                is_initial_load,
            } => self.image_ready(size, is_initial_load)?,
        }
        Ok(())
    }

    /// Applies every update the background refresh has delivered so far.
    /// A rejected update is logged and skipped; returns how many applied.
    pub fn drain_refresh(&mut self, updates: &Receiver<InputEvent>) -> usize {
        let mut applied = 0;
        for event in updates.try_iter() {
            match self.handle_event(event) {
                Ok(()) => applied += 1,
                Err(e) => log::warn!("dropping refresh update: {}", e),
            }
        }
        applied
    }

    /// Pushes the current transform and visible markers to a surface
    pub fn render(&self, markers: &MarkerStore, surface: &mut dyn RenderSurface) {
        render_frame(&self.viewport, markers, surface);
    }
}

impl Default for ViewportEngine {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            event_manager: EventManager::new(),
        }
    }
}
