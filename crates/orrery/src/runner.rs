//! Frame driver: owns the system, its proxies, and pointer state.

use crate::api::config::SimConfig;
use crate::api::host::{FrameClock, Picker, ProxyFactory, SelectionListener};
use crate::input::queue::{InputEvent, InputQueue};
use crate::interaction::picking::{InteractionResult, InteractionSystem, PointerContext};
use crate::interaction::sync::ProxySync;
use crate::sim::integrator::OrbitalIntegrator;
use crate::sim::system::PlanetarySystem;

/// Single owner of all mutable simulation state.
///
/// Each [`OrreryRunner::frame`] drains queued pointer input, runs the owed
/// fixed sub-steps, pushes positions into the proxies and asks the clock
/// for another frame. Nothing is shared; hosts hold the runner and call in.
pub struct OrreryRunner<F, C, L>
where
    F: ProxyFactory + Picker,
    C: FrameClock,
    L: SelectionListener,
{
    config: SimConfig,
    system: PlanetarySystem,
    integrator: OrbitalIntegrator,
    sync: ProxySync,
    interaction: InteractionSystem,
    input: InputQueue,
    factory: F,
    clock: C,
    listener: L,
    frame_count: u64,
    shut_down: bool,
}

impl<F, C, L> OrreryRunner<F, C, L>
where
    F: ProxyFactory + Picker,
    C: FrameClock,
    L: SelectionListener,
{
    /// Mirror `system` into proxies and request the first frame.
    pub fn new(config: SimConfig, system: PlanetarySystem, mut factory: F, mut clock: C, listener: L) -> Self {
        let mut sync = ProxySync::new(&config);
        sync.create_all(&system, &mut factory);
        log::info!("orrery started: system {} with {} bodies", system.root().name, system.len());
        clock.request_frame();
        Self {
            integrator: OrbitalIntegrator::new(&config),
            interaction: InteractionSystem::new(config.drag_threshold),
            config,
            system,
            sync,
            input: InputQueue::new(),
            factory,
            clock,
            listener,
            frame_count: 0,
            shut_down: false,
        }
    }

    /// Queue a pointer or resize event for the next frame.
    pub fn push_input(&mut self, event: InputEvent) {
        if !self.shut_down {
            self.input.push(event);
        }
    }

    /// Handle one event now instead of at the next frame.
    pub fn handle_input(&mut self, event: InputEvent) -> InteractionResult {
        if self.shut_down {
            return InteractionResult::None;
        }
        let ctx = PointerContext {
            system: &self.system,
            sync: &self.sync,
            host: &mut self.factory,
            listener: &mut self.listener,
        };
        match event {
            InputEvent::PointerDown { x, y } => self.interaction.on_pointer_down((x, y).into(), ctx),
            InputEvent::PointerMove { x, y } => self.interaction.on_pointer_move((x, y).into(), ctx),
            InputEvent::PointerUp { x, y } => self.interaction.on_pointer_up((x, y).into(), ctx),
            InputEvent::Resize { width, height } => {
                ctx.host.set_viewport(width, height);
                InteractionResult::None
            }
        }
    }

    /// Run one display frame at `now` (seconds). Returns the sub-steps run.
    /// The first frame only records the time.
    pub fn frame(&mut self, now: f64) -> u32 {
        if self.shut_down {
            return 0;
        }
        for event in self.input.drain() {
            self.handle_input(event);
        }
        let steps = self.integrator.advance_to(&mut self.system, now);
        self.sync.push_positions(&self.system, &mut self.factory);
        self.frame_count += 1;
        self.clock.request_frame();
        steps
    }

    /// Cancel the clock and destroy every proxy. Later calls do nothing.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.clock.cancel();
        self.input.drain();
        self.interaction.reset();
        let destroyed = self.sync.teardown(&mut self.factory);
        log::info!("orrery shut down after {} frames, {} proxies destroyed", self.frame_count, destroyed);
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn system(&self) -> &PlanetarySystem {
        &self.system
    }

    pub fn sync(&self) -> &ProxySync {
        &self.sync
    }

    pub fn interaction(&self) -> &InteractionSystem {
        &self.interaction
    }

    pub fn integrator(&self) -> &OrbitalIntegrator {
        &self.integrator
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
