/// WGSL shader for the glass sphere. The fragment math is the WGSL port of
/// `glaze_material::GlassMaterial::shade`; parameters arrive via uniforms.
pub const SPHERE_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    inv_view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
    tint: vec4<f32>,
    fresnel_glow: vec4<f32>,
    eta: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var env_texture: texture_2d<f32>;
@group(1) @binding(1)
var env_sampler: sampler;

const PI: f32 = 3.14159265359;

fn dir_to_equirectangular(dir: vec3<f32>) -> vec2<f32> {
    let x = atan2(dir.z, dir.x) / (2.0 * PI) + 0.5;
    let y = acos(clamp(dir.y, -1.0, 1.0)) / PI;
    return vec2<f32>(x, y);
}

fn sample_environment(dir: vec3<f32>) -> vec3<f32> {
    let uv = dir_to_equirectangular(normalize(dir));
    return textureSample(env_texture, env_sampler, uv).rgb;
}

// Refraction with k clamped at zero: total internal reflection degrades to
// a grazing vector instead of the builtin's zero vector.
fn refract_clamped(incident: vec3<f32>, normal: vec3<f32>, eta: f32) -> vec3<f32> {
    let cos_i = dot(normal, incident);
    let k = max(1.0 - eta * eta * (1.0 - cos_i * cos_i), 0.0);
    return eta * incident - (eta * cos_i + sqrt(k)) * normal;
}

fn reinhard_luminance(color: vec3<f32>) -> vec3<f32> {
    let l = dot(color, vec3<f32>(0.2126, 0.7152, 0.0722));
    return color / (1.0 + l);
}

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
};

@vertex
fn vs_sphere(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.world_position = vertex.position;
    out.world_normal = vertex.normal;
    out.clip_position = uniforms.view_proj * vec4<f32>(vertex.position, 1.0);
    return out;
}

@fragment
fn fs_sphere(
    in: VertexOutput,
    @builtin(front_facing) front_facing: bool,
) -> @location(0) vec4<f32> {
    let n = normalize(in.world_normal);
    let v = normalize(uniforms.camera_pos.xyz - in.world_position);
    let n_dot_v = max(dot(n, v), 0.0001);

    var fresnel = clamp(1.0 - n_dot_v, 0.0, 1.0);
    fresnel = pow(fresnel, uniforms.fresnel_glow.x) * uniforms.fresnel_glow.y;

    let glow = pow(n_dot_v, uniforms.fresnel_glow.z) * uniforms.fresnel_glow.w;
    let tint = mix(vec3<f32>(0.0), uniforms.tint.rgb, glow);

    let reflection = sample_environment(reflect(-v, n));
    let refraction = sample_environment(refract_clamped(-v, n, uniforms.eta.x));

    let total = tint * refraction + reflection * (fresnel + uniforms.tint.w);
    return vec4<f32>(reinhard_luminance(total), 0.0);
}
"#;

/// WGSL shader for the equirectangular background (fullscreen triangle,
/// rays unprojected through the inverse view-projection).
pub const BACKGROUND_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    inv_view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
    tint: vec4<f32>,
    fresnel_glow: vec4<f32>,
    eta: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var env_texture: texture_2d<f32>;
@group(1) @binding(1)
var env_sampler: sampler;

const PI: f32 = 3.14159265359;

fn dir_to_equirectangular(dir: vec3<f32>) -> vec2<f32> {
    let x = atan2(dir.z, dir.x) / (2.0 * PI) + 0.5;
    let y = acos(clamp(dir.y, -1.0, 1.0)) / PI;
    return vec2<f32>(x, y);
}

fn reinhard_luminance(color: vec3<f32>) -> vec3<f32> {
    let l = dot(color, vec3<f32>(0.2126, 0.7152, 0.0722));
    return color / (1.0 + l);
}

struct BackgroundOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) ndc: vec2<f32>,
};

@vertex
fn vs_background(@builtin(vertex_index) index: u32) -> BackgroundOutput {
    let ndc = vec2<f32>(f32((index << 1u) & 2u), f32(index & 2u)) * 2.0 - 1.0;
    var out: BackgroundOutput;
    out.clip_position = vec4<f32>(ndc, 0.0, 1.0);
    out.ndc = ndc;
    return out;
}

@fragment
fn fs_background(in: BackgroundOutput) -> @location(0) vec4<f32> {
    let near = uniforms.inv_view_proj * vec4<f32>(in.ndc, 0.0, 1.0);
    let far = uniforms.inv_view_proj * vec4<f32>(in.ndc, 1.0, 1.0);
    let dir = normalize(far.xyz / far.w - near.xyz / near.w);
    let uv = dir_to_equirectangular(dir);
    let color = textureSample(env_texture, env_sampler, uv).rgb;
    return vec4<f32>(reinhard_luminance(color), 1.0);
}
"#;
