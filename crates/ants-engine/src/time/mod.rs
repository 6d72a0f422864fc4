//! Time subsystem.
//!
//! Provides stable, testable timing utilities without coupling to the runtime:
//! - `SimulationClock`: the fixed-step seed clock owned by the frame driver
//! - `FramePacer`: fixed-cadence redraw deadlines for the event loop

mod frame_pacer;
mod sim_clock;

pub use frame_pacer::FramePacer;
pub use sim_clock::SimulationClock;
