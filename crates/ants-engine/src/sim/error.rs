use std::fmt;

/// Failures of the simulation/display pipeline.
///
/// Per-frame conditions (`Allocation`, `NoDrawable`) skip the tick and leave
/// previous state valid. `PipelineCompile` is raised during startup only.
/// `DeviceFatal` ends the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Texture creation was refused (zero size, over the device limit, ...).
    Allocation {
        width: u32,
        height: u32,
        reason: String,
    },
    /// The surface had no presentable target this tick.
    NoDrawable,
    /// A shader failed to parse or validate.
    PipelineCompile {
        label: &'static str,
        message: String,
    },
    /// The device or surface cannot continue (commonly out of memory).
    DeviceFatal(String),
}

impl SimError {
    pub(crate) fn allocation(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::Allocation {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// `true` if the error only costs the current tick.
    #[inline]
    pub fn is_per_frame(&self) -> bool {
        matches!(self, SimError::Allocation { .. } | SimError::NoDrawable)
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Allocation { width, height, reason } => {
                write!(f, "failed to allocate {width}x{height} pattern textures: {reason}")
            }
            SimError::NoDrawable => f.write_str("no drawable available"),
            SimError::PipelineCompile { label, message } => {
                write!(f, "failed to build `{label}`: {message}")
            }
            SimError::DeviceFatal(msg) => write!(f, "fatal device error: {msg}"),
        }
    }
}

impl std::error::Error for SimError {}
