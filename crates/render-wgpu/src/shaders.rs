/// WGSL translation of the kinetic-gold surface program.
///
/// The fragment math is the shader-side twin of
/// `suitespace_scene::animation::shade`; constants must stay in lockstep.
/// WGSL `%` is trunc-based, so the flow wrap spells out the floor-based mod,
/// and the falling pulse edge uses `1.0 - smoothstep(lo, hi, x)` which is
/// identical to the reversed-edge form.
pub const KINETIC_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
    camera_pos: vec3<f32>,
    time: f32,
    accent: vec4<f32>,
    base_color: vec4<f32>,
    grid_color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) block_0: vec4<f32>,
    @location(3) block_1: vec4<f32>,
    @location(4) block_2: vec4<f32>,
    @location(5) block_3: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let block = mat4x4<f32>(
        instance.block_0,
        instance.block_1,
        instance.block_2,
        instance.block_3,
    );
    let world_pos = uniforms.model * block * vec4<f32>(vertex.position, 1.0);
    let world_normal = (uniforms.model * block * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    out.world_position = world_pos.xyz;
    out.world_normal = normalize(world_normal);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let view_dir = normalize(uniforms.camera_pos - in.world_position);
    let normal = normalize(in.world_normal);
    let fresnel = pow(1.0 - max(dot(view_dir, normal), 0.0), 2.0);

    // Architectural grid over world X/Y.
    let grid_x = step(0.95, fract(in.world_position.x * 4.0));
    let grid_y = step(0.95, fract(in.world_position.y * 4.0));
    let grid = max(grid_x, grid_y);

    // Upward-traveling pulse band, wrapped every 5 units (floor-based mod).
    let flow_raw = in.world_position.y - uniforms.time * 2.0
        + in.world_position.x * 0.3;
    let flow = flow_raw - 5.0 * floor(flow_raw / 5.0);
    let pulse = smoothstep(0.0, 0.8, flow) * (1.0 - smoothstep(0.8, 2.5, flow));

    // Fast secondary flicker.
    let flicker = step(0.98, sin(in.world_position.y * 20.0 - uniforms.time * 10.0));

    var color = uniforms.base_color.rgb;
    let active_grid = mix(
        uniforms.grid_color.rgb,
        uniforms.accent.rgb,
        vec3<f32>(pulse * 1.5 + flicker * 0.8),
    );
    color = mix(color, active_grid, vec3<f32>(grid));
    color += uniforms.accent.rgb * pulse * 0.35;
    color += uniforms.accent.rgb * fresnel * 0.8 * pulse;

    let alpha = 0.02 + fresnel * 0.1 + pulse * 0.3;
    return vec4<f32>(color, alpha);
}
"#;

/// WGSL shader for the per-block edge outlines.
pub const EDGE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
    camera_pos: vec3<f32>,
    time: f32,
    accent: vec4<f32>,
    base_color: vec4<f32>,
    grid_color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct EdgeVertex {
    @location(0) position: vec3<f32>,
};

struct EdgeInstance {
    @location(1) block_0: vec4<f32>,
    @location(2) block_1: vec4<f32>,
    @location(3) block_2: vec4<f32>,
    @location(4) block_3: vec4<f32>,
    @location(5) color: vec4<f32>,
};

struct EdgeOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_edge(vertex: EdgeVertex, instance: EdgeInstance) -> EdgeOutput {
    let block = mat4x4<f32>(
        instance.block_0,
        instance.block_1,
        instance.block_2,
        instance.block_3,
    );
    var out: EdgeOutput;
    out.clip_position = uniforms.view_proj * uniforms.model * block
        * vec4<f32>(vertex.position, 1.0);
    out.color = instance.color;
    return out;
}

@fragment
fn fs_edge(in: EdgeOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
