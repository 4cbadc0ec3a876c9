/// WGSL raymarch shader: one fullscreen triangle in the vertex stage,
/// a DDA walk through the voxel volume in the fragment stage.
///
/// The uniform block must stay field-for-field in sync with
/// `SceneUniforms` in `uniforms.rs`.
pub const RAYMARCH_SHADER: &str = r#"
struct SceneUniforms {
    camera_to_world: mat4x4<f32>,
    view_pos: vec3<f32>,
    voxel_density: f32,
    voxel_width: f32,
    voxel_count: i32,
    screen_ratio: f32,
    pad: f32,
};

@group(0) @binding(0)
var<uniform> scene: SceneUniforms;

@group(0) @binding(1)
var voxels: texture_3d<u32>;

const MATERIAL_GLASS: u32 = 1u;
const MATERIAL_SOLID: u32 = 2u;
const MATERIAL_SEMI_SOLID: u32 = 3u;

const BACKGROUND: vec3<f32> = vec3<f32>(0.1, 0.1, 0.3);

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) ndc: vec2<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> VertexOutput {
    // One oversized triangle covering the whole screen.
    let x = f32(i32((index << 1u) & 2u)) * 2.0 - 1.0;
    let y = f32(i32(index & 2u)) * 2.0 - 1.0;

    var out: VertexOutput;
    out.clip_position = vec4<f32>(x, y, 0.0, 1.0);
    out.ndc = vec2<f32>(x, y);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = scene.voxel_count;
    let extent = f32(n) * scene.voxel_width;

    // Rays start at the view reference point behind the camera and
    // pass through the camera plane, which carries the screen.
    let screen = vec3<f32>(in.ndc.x * scene.screen_ratio, in.ndc.y, 0.0);
    let pixel_world = (scene.camera_to_world * vec4<f32>(screen, 1.0)).xyz;
    let origin = scene.view_pos;
    let dir = normalize(pixel_world - origin);

    // Slab test against the grid bounds [0, extent]^3.
    let inv = vec3<f32>(1.0) / dir;
    let t0 = (vec3<f32>(0.0) - origin) * inv;
    let t1 = (vec3<f32>(extent) - origin) * inv;
    let t_lo = min(t0, t1);
    let t_hi = max(t0, t1);
    let t_enter = max(max(t_lo.x, t_lo.y), t_lo.z);
    let t_exit = min(min(t_hi.x, t_hi.y), t_hi.z);

    if (t_exit < max(t_enter, 0.0)) {
        return vec4<f32>(BACKGROUND, 1.0);
    }

    // DDA setup at the entry point.
    let t_start = max(t_enter, 0.0) + 1e-4;
    let entry = origin + t_start * dir;
    var cell = clamp(
        vec3<i32>(floor(entry * scene.voxel_density)),
        vec3<i32>(0),
        vec3<i32>(n - 1),
    );
    let step = vec3<i32>(sign(dir));
    let t_delta = abs(scene.voxel_width * inv);
    let boundary = (vec3<f32>(cell) + max(vec3<f32>(step), vec3<f32>(0.0))) * scene.voxel_width;
    var t_max = t_start + (boundary - entry) * inv;
    t_max = select(t_max, vec3<f32>(1e30), step == vec3<i32>(0));

    var color = vec3<f32>(0.0);
    var transmit = vec3<f32>(1.0);
    var normal = -dir;

    let max_steps = 3 * n + 2;
    for (var i = 0; i < max_steps; i = i + 1) {
        let material = textureLoad(voxels, cell, 0).r;

        if (material == MATERIAL_SOLID) {
            let light_dir = normalize(vec3<f32>(0.3, 1.0, 0.5));
            let diffuse = max(dot(normal, light_dir), 0.0);
            let wall = vec3<f32>(0.55, 0.5, 0.45) * (0.25 + 0.75 * diffuse);
            color += transmit * wall;
            transmit = vec3<f32>(0.0);
            break;
        } else if (material == MATERIAL_GLASS) {
            transmit *= vec3<f32>(0.75, 0.9, 0.95);
        } else if (material == MATERIAL_SEMI_SOLID) {
            color += transmit * vec3<f32>(0.95, 0.65, 0.25) * 0.35;
            transmit *= 0.8;
        }

        // Advance to the neighbor across the nearest cell face and
        // remember that face as the shading normal.
        if (t_max.x < t_max.y && t_max.x < t_max.z) {
            cell.x += step.x;
            t_max.x += t_delta.x;
            normal = vec3<f32>(-f32(step.x), 0.0, 0.0);
        } else if (t_max.y < t_max.z) {
            cell.y += step.y;
            t_max.y += t_delta.y;
            normal = vec3<f32>(0.0, -f32(step.y), 0.0);
        } else {
            cell.z += step.z;
            t_max.z += t_delta.z;
            normal = vec3<f32>(0.0, 0.0, -f32(step.z));
        }

        if (any(cell < vec3<i32>(0)) || any(cell >= vec3<i32>(n))) {
            break;
        }
    }

    color += transmit * BACKGROUND;
    return vec4<f32>(color, 1.0);
}
"#;
