use orrery::{
    Body, Camera3D, FrameClock, InputEvent, OrreryRunner, PlanetarySystem, Scene, SelectionEvent,
    SelectionListener, SimConfig, SimResult, SystemGenerator,
};

/// Playback speed for the page: ten simulated days per real second, so a
/// one-year orbit takes about half a minute.
pub const PLAYBACK_TIME_SCALE: f64 = 10.0 * orrery::sim::units::SECONDS_PER_DAY;

/// Frame scheduling as seen from JS: Rust raises a flag, the page polls it
/// after each frame and calls `requestAnimationFrame` when it is set.
#[derive(Debug, Default)]
pub struct JsClock {
    frame_requested: bool,
    cancelled: bool,
}

impl JsClock {
    /// Read and clear the request flag.
    pub fn take_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

impl FrameClock for JsClock {
    fn request_frame(&mut self) {
        if !self.cancelled {
            self.frame_requested = true;
        }
    }

    fn cancel(&mut self) {
        self.cancelled = true;
        self.frame_requested = false;
    }
}

/// Selection changes packed as floats for the page to read after each call.
#[derive(Debug, Default)]
pub struct EventBuffer {
    events: Vec<SelectionEvent>,
}

impl EventBuffer {
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn events(&self) -> &[SelectionEvent] {
        &self.events
    }

    pub fn ptr(&self) -> *const f32 {
        self.events.as_ptr() as *const f32
    }

    /// Length in floats.
    pub fn len(&self) -> u32 {
        (self.events.len() * SelectionEvent::FLOATS) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl SelectionListener for EventBuffer {
    fn on_body_selected(&mut self, body: &Body) {
        self.events.push(SelectionEvent {
            kind: SelectionEvent::SELECTED,
            index: body.id.0 as f32,
            a: body.kind.mass() as f32,
            b: body.kind.radius() as f32,
        });
    }

    fn on_background_selected(&mut self) {
        self.events.push(SelectionEvent {
            kind: SelectionEvent::BACKGROUND,
            index: -1.0,
            a: 0.0,
            b: 0.0,
        });
    }
}

/// The browser-side runner: the generic runner over the in-memory scene.
///
/// wasm-bindgen cannot export generic structs, so `lib.rs` keeps one of
/// these in a `thread_local!` and forwards free functions to it.
pub struct WebRunner {
    inner: OrreryRunner<Scene, JsClock, EventBuffer>,
}

impl WebRunner {
    /// Generate a system under `config` and mirror it into a fresh scene.
    pub fn new(config: SimConfig) -> Self {
        let mut rng = orrery::rng_for(&config);
        let system = SystemGenerator::new(&config).generate(&mut rng);
        Self::with_system(config, system)
    }

    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(Self::new(SimConfig::from_json(json)?))
    }

    pub fn with_system(config: SimConfig, system: PlanetarySystem) -> Self {
        let mut inner = OrreryRunner::new(
            config,
            system,
            Scene::with_camera(Camera3D::default()),
            JsClock::default(),
            EventBuffer::default(),
        );
        inner.factory_mut().build_instances();
        Self { inner }
    }

    /// Run one frame at `now_ms` (milliseconds, as `requestAnimationFrame` reports).
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        let steps = self.inner.frame(now_ms / 1000.0);
        self.inner.factory_mut().build_instances();
        steps
    }

    /// Pointer events are handled immediately so selection events are
    /// readable as soon as the call returns.
    pub fn input(&mut self, event: InputEvent) {
        self.inner.listener_mut().clear();
        self.inner.handle_input(event);
        self.inner.factory_mut().build_instances();
    }

    pub fn shutdown(&mut self) {
        self.inner.shutdown();
        self.inner.factory_mut().build_instances();
    }

    pub fn take_frame_request(&mut self) -> bool {
        self.inner.clock_mut().take_request()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.inner.factory().instances().instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.inner.factory().instances().instance_count() as u32
    }

    pub fn events(&self) -> &EventBuffer {
        self.inner.listener()
    }

    pub fn body_name(&self, index: u32) -> Option<String> {
        self.inner.system().get(orrery::BodyId(index)).map(|b| b.name.clone())
    }

    pub fn runner(&self) -> &OrreryRunner<Scene, JsClock, EventBuffer> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> WebRunner {
        WebRunner::new(SimConfig { seed: Some(5), ..SimConfig::default() })
    }

    #[test]
    fn init_requests_a_frame_and_packs_instances() {
        let mut runner = seeded();
        assert!(runner.take_frame_request());
        assert!(!runner.take_frame_request());
        assert_eq!(runner.instance_count() as usize, runner.runner().system().len());
    }

    #[test]
    fn clicking_empty_space_emits_a_background_event() {
        let mut runner = seeded();
        runner.input(InputEvent::PointerDown { x: 1.0, y: 1.0 });
        runner.input(InputEvent::PointerUp { x: 1.0, y: 1.0 });
        let events = runner.events().events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, SelectionEvent::BACKGROUND);
        assert_eq!(runner.events().len(), 4);
    }

    #[test]
    fn clicking_the_star_emits_a_selection() {
        let mut runner = seeded();
        // The default camera looks straight at the star.
        let (w, h) = (800.0, 600.0);
        runner.input(InputEvent::Resize { width: w, height: h });
        runner.input(InputEvent::PointerDown { x: w / 2.0, y: h / 2.0 });
        runner.input(InputEvent::PointerUp { x: w / 2.0, y: h / 2.0 });
        let events = runner.events().events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, SelectionEvent::SELECTED);
        assert_eq!(events[0].index, 0.0);
    }

    #[test]
    fn shutdown_stops_frames() {
        let mut runner = seeded();
        runner.take_frame_request();
        runner.frame(0.0);
        assert!(runner.take_frame_request());
        runner.shutdown();
        runner.shutdown();
        assert_eq!(runner.frame(16.0), 0);
        assert!(!runner.take_frame_request());
        assert_eq!(runner.instance_count(), 0);
        assert!(runner.runner().clock().is_cancelled());
    }

    #[test]
    fn bad_config_json_is_an_error() {
        assert!(WebRunner::from_json("{ not json").is_err());
        assert!(WebRunner::from_json(r#"{ "fixed_dt": 0.0 }"#).is_err());
        assert!(WebRunner::from_json(r#"{ "planet_count": { "start": 5, "end": 1 } }"#).is_err());
        assert!(WebRunner::from_json(r#"{ "seed": 9 }"#).is_ok());
    }
}
