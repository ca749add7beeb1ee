//! Frame-by-frame viewer for a generation-based simulation.
//!
//! A [`scheduler::FrameScheduler`] renders and steps the simulation once per
//! frame; a [`fast_forward::FastForwardController`] can take over stepping
//! for a bounded burst of generations without drawing. The engine itself is
//! behind [`engine::Engine`], with [`foraging`] as the built-in one.

pub mod animal;
pub mod config;
pub mod context;
pub mod controls;
pub mod engine;
pub mod error;
pub mod fast_forward;
pub mod food;
pub mod foraging;
pub mod genetics;
pub mod headless;
pub mod render;
pub mod scheduler;
pub mod simulation;
pub mod simulation_stats;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod viewport;
pub mod window;

pub use config::{Settings, SimulationConfig};
pub use context::RunContext;
pub use error::Error;
