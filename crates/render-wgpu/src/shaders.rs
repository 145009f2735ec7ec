/// WGSL shader for the lit scene: figure cubes and the ground plane.
pub const SCENE_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    light_view_proj: mat4x4<f32>,
    figure_model: mat4x4<f32>,
    // xyz: unit vector toward the sun
    light_dir: vec4<f32>,
    sun_color: vec4<f32>,
    ambient_color: vec4<f32>,
    // x: shadows on, y: depth bias, z: encode output to sRGB by hand
    params: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

@group(1) @binding(0)
var shadow_map: texture_depth_2d;
@group(1) @binding(1)
var shadow_sampler: sampler_comparison;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct CubeInstance {
    @location(2) offset: vec4<f32>,
    @location(3) color: vec4<f32>,
};

struct GroundVertex {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) color: vec3<f32>,
};

@vertex
fn vs_cube(vertex: VertexInput, instance: CubeInstance) -> VertexOutput {
    let world = globals.figure_model * vec4<f32>(vertex.position + instance.offset.xyz, 1.0);
    let normal = (globals.figure_model * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = globals.view_proj * world;
    out.world_pos = world.xyz;
    out.world_normal = normalize(normal);
    out.color = instance.color.rgb;
    return out;
}

@vertex
fn vs_ground(vertex: GroundVertex) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = globals.view_proj * vec4<f32>(vertex.position, 1.0);
    out.world_pos = vertex.position;
    out.world_normal = vertex.normal;
    out.color = vertex.color;
    return out;
}

fn shadow_factor(world_pos: vec3<f32>) -> f32 {
    let light_clip = globals.light_view_proj * vec4<f32>(world_pos, 1.0);
    let ndc = light_clip.xyz / light_clip.w;
    let uv = vec2<f32>(ndc.x * 0.5 + 0.5, ndc.y * -0.5 + 0.5);
    let lit = textureSampleCompare(shadow_map, shadow_sampler, uv, ndc.z - globals.params.y);
    let inside = all(uv >= vec2<f32>(0.0)) && all(uv <= vec2<f32>(1.0)) && ndc.z <= 1.0;
    return select(1.0, lit, inside && globals.params.x > 0.5);
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.world_normal);
    let diffuse = max(dot(n, globals.light_dir.xyz), 0.0);
    let shadow = shadow_factor(in.world_pos);
    let light = globals.ambient_color.rgb + globals.sun_color.rgb * diffuse * shadow;
    let linear = in.color * light;
    let encoded = pow(max(linear, vec3<f32>(0.0)), vec3<f32>(1.0 / 2.2));
    return vec4<f32>(select(linear, encoded, globals.params.z > 0.5), 1.0);
}
"#;

/// Depth-only WGSL shader rendering the figure from the sun.
pub const SHADOW_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    light_view_proj: mat4x4<f32>,
    figure_model: mat4x4<f32>,
    light_dir: vec4<f32>,
    sun_color: vec4<f32>,
    ambient_color: vec4<f32>,
    params: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct CubeInstance {
    @location(2) offset: vec4<f32>,
    @location(3) color: vec4<f32>,
};

@vertex
fn vs_shadow(vertex: VertexInput, instance: CubeInstance) -> @builtin(position) vec4<f32> {
    let world = globals.figure_model * vec4<f32>(vertex.position + instance.offset.xyz, 1.0);
    return globals.light_view_proj * world;
}
"#;
