//! Environment overrides for the simulation settings.

use ants_engine::sim::{SimConfig, TransferStrategy};

pub const FPS_VAR: &str = "ANTS_FPS";
pub const TRANSFER_VAR: &str = "ANTS_TRANSFER";

/// Applies `ANTS_FPS` and `ANTS_TRANSFER` on top of `config`.
///
/// Invalid values are logged and ignored.
pub fn apply_overrides(
    mut config: SimConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> SimConfig {
    if let Some(raw) = lookup(FPS_VAR) {
        match raw.trim().parse::<u32>() {
            Ok(fps) if fps > 0 => config.target_fps = fps,
            _ => log::warn!("ignoring {FPS_VAR}={raw:?}: expected a positive integer"),
        }
    }

    if let Some(raw) = lookup(TRANSFER_VAR) {
        match raw.parse::<TransferStrategy>() {
            Ok(strategy) => config.transfer = strategy,
            Err(err) => log::warn!("ignoring {TRANSFER_VAR}: {err}"),
        }
    }

    config
}

/// `apply_overrides` against the process environment.
pub fn from_env() -> SimConfig {
    apply_overrides(SimConfig::default(), |key| std::env::var(key).ok())
}
