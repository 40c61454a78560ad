pub mod api;
pub mod core;
pub mod components;
pub mod renderer;
pub mod input;
pub mod sim;
pub mod interaction;
pub mod runner;
pub mod error;

#[cfg(test)]
pub(crate) mod testing;

// Re-export key types at crate root for convenience
pub use api::config::SimConfig;
pub use api::host::{FrameClock, Picker, ProxyFactory, SelectionListener};
pub use api::types::{BodyId, Color, ProxyHandle, SelectionEvent};
pub use components::proxy::Proxy;
pub use core::camera::{Camera3D, Ray};
pub use core::scene::Scene;
pub use core::time::{FixedTimestep, TimestepState};
pub use error::{SimError, SimResult};
pub use input::queue::{InputEvent, InputQueue};
pub use interaction::picking::{InteractionMode, InteractionResult, InteractionSystem, PointerContext};
pub use interaction::sync::{ProxyRecord, ProxySync};
pub use renderer::instance::{InstanceBuffer, ProxyInstance};
pub use runner::OrreryRunner;
pub use sim::body::{Body, BodyKind, Planet, PlanetSpec, Star, StarClass};
pub use sim::formulas::{HabitableZone, HabitableZoneBand};
pub use sim::generator::{rng_for, SystemGenerator};
pub use sim::integrator::OrbitalIntegrator;
pub use sim::position::OrbitalPosition;
pub use sim::system::PlanetarySystem;
