//! Shader programs.
//!
//! A "program" here is a single WGSL module holding both the `vs_main` and
//! `fs_main` stages. Sources are embedded at compile time.

use super::{RenderCtx, RendererError};

/// Color vertices transformed by one MVP matrix.
pub const COLOR_MVP_WGSL: &str = include_str!("shaders/color_mvp.wgsl");

/// Textured quad sampled with a linear sampler.
pub const TEXTURED_WGSL: &str = include_str!("shaders/textured.wgsl");

/// Quads expanded per instance by a 2x2 scale/rotation and an offset.
pub const INSTANCED_WGSL: &str = include_str!("shaders/instanced.wgsl");

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Compiles `source` and checks the compiler's diagnostics.
///
/// Module creation runs inside a validation error scope, so a source the
/// device rejects fails with [`RendererError::ShaderCompile`] instead of
/// reaching the uncaptured-error handler. Warnings are logged.
pub fn create_program(
    ctx: &RenderCtx<'_>,
    label: &str,
    source: &str,
) -> Result<wgpu::ShaderModule, RendererError> {
    let scope = ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    if let Some(err) = pollster::block_on(scope.pop()) {
        return Err(RendererError::ShaderCompile {
            label: label.to_string(),
            message: err.to_string(),
        });
    }

    let info = pollster::block_on(module.get_compilation_info());
    let mut errors = Vec::new();
    for msg in &info.messages {
        match msg.message_type {
            wgpu::CompilationMessageType::Error => errors.push(msg.message.clone()),
            wgpu::CompilationMessageType::Warning => {
                log::warn!("shader `{label}`: {}", msg.message)
            }
            _ => log::debug!("shader `{label}`: {}", msg.message),
        }
    }

    if !errors.is_empty() {
        return Err(RendererError::ShaderCompile {
            label: label.to_string(),
            message: errors.join("\n"),
        });
    }

    log::debug!("shader `{label}` compiled");
    Ok(module)
}
