//! WGSL validation and shader module creation.
//!
//! wgpu reports shader errors asynchronously through the device error
//! callback. Validating with naga first turns a broken program into a
//! `SimError::PipelineCompile` at startup instead of a panic on first use.

use crate::sim::SimError;

/// Parses and validates `source`, returning the naga module on success.
pub fn validate_wgsl(label: &'static str, source: &str) -> Result<naga::Module, SimError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| SimError::PipelineCompile {
        label,
        message: e.emit_to_string(source),
    })?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    )
    .validate(&module)
    .map_err(|e| SimError::PipelineCompile {
        label,
        message: e.emit_to_string(source),
    })?;

    Ok(module)
}

/// Returns `true` if `module` exports an entry point called `name`.
pub fn has_entry_point(module: &naga::Module, name: &str) -> bool {
    module.entry_points.iter().any(|ep| ep.name == name)
}

/// Validates `source` and creates the wgpu shader module.
pub fn create_validated_module(
    device: &wgpu::Device,
    label: &'static str,
    source: &str,
    entry_points: &[&str],
) -> Result<wgpu::ShaderModule, SimError> {
    let module = validate_wgsl(label, source)?;
    if let Some(missing) = entry_points.iter().find(|ep| !has_entry_point(&module, ep)) {
        return Err(SimError::PipelineCompile {
            label,
            message: format!("missing entry point `{missing}`"),
        });
    }

    log::debug!("shader `{label}` validated");

    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    }))
}
