//! Reference WGSL sources handed to backends through
//! [`PipelineDesc`](crate::backend::PipelineDesc).
//!
//! Bind group layout expected by both shaders:
//!
//! ```text
//! group(0) binding(0): Pass     { projection }         per pass
//! group(1) binding(0): Sprite   { QuadUniforms }       per draw (dynamic offset)
//! group(1) binding(1): texture_2d<f32>                 per draw, unit 0
//! group(1) binding(2): sampler
//! ```

/// Sprite shader: unit quad scaled by `transform`, UVs from `uv_rect`,
/// texel × tint with an optional greyscale step.
pub const SPRITE_WGSL: &str = r"
struct Pass {
    projection: mat4x4<f32>,
};

struct Sprite {
    uv_rect: vec4<f32>,
    transform: vec4<f32>,
    color: vec4<f32>,
    grayscale: f32,
};

@group(0) @binding(0) var<uniform> pass: Pass;
@group(1) @binding(0) var<uniform> sprite: Sprite;
@group(1) @binding(1) var tex0: texture_2d<f32>;
@group(1) @binding(2) var samp0: sampler;

struct VsOut {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@location(0) v_position: vec2<f32>) -> VsOut {
    var out: VsOut;
    let pos = sprite.transform.xy + v_position * sprite.transform.zw;
    out.position = pass.projection * vec4<f32>(pos, 0.0, 1.0);
    out.uv = sprite.uv_rect.xy + v_position * sprite.uv_rect.zw;
    return out;
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    var texel = textureSample(tex0, samp0, in.uv);
    if (sprite.grayscale > 0.0) {
        let l = dot(texel.rgb, vec3<f32>(0.299, 0.587, 0.114));
        texel = vec4<f32>(l, l, l, texel.a);
    }
    return texel * sprite.color;
}
";

/// Fan shader: per-vertex color, same projection as sprites.
pub const FAN_WGSL: &str = r"
struct Pass {
    projection: mat4x4<f32>,
};

@group(0) @binding(0) var<uniform> pass: Pass;

struct VsOut {
    @builtin(position) position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(@location(0) position: vec2<f32>, @location(1) color: vec4<f32>) -> VsOut {
    var out: VsOut;
    out.position = pass.projection * vec4<f32>(position, 0.0, 1.0);
    out.color = color;
    return out;
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    return in.color;
}
";
