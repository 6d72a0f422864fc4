//! Ants engine crate.
//!
//! GPU runtime pieces (window loop, device/surface, quad rendering) and the
//! double-buffered pattern simulation that runs on top of them.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod sim;
