use crate::shaders;
use crate::shadow::{SHADOW_FORMAT, ShadowMap};
use bytemuck::{Pod, Zeroable};
use pixelboy_common::{Rgb, Viewport};
use pixelboy_scene::{FigureGroup, Scene};
use wgpu::util::DeviceExt;

pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
/// Depth offset in light clip space applied before the shadow comparison.
const SHADOW_BIAS: f32 = 0.002;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    light_view_proj: [[f32; 4]; 4],
    figure_model: [[f32; 4]; 4],
    light_dir: [f32; 4],
    sun_color: [f32; 4],
    ambient_color: [f32; 4],
    params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct CubeInstance {
    offset: [f32; 4],
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct GroundVertex {
    position: [f32; 3],
    normal: [f32; 3],
    color: [f32; 3],
}

/// Generate unit cube vertices and indices.
fn cube_mesh() -> (Vec<Vertex>, Vec<u16>) {
    let p = 0.5_f32;
    #[rustfmt::skip]
    let vertices = vec![
        // +Z face
        Vertex { position: [-p, -p,  p], normal: [0.0, 0.0, 1.0] },
        Vertex { position: [ p, -p,  p], normal: [0.0, 0.0, 1.0] },
        Vertex { position: [ p,  p,  p], normal: [0.0, 0.0, 1.0] },
        Vertex { position: [-p,  p,  p], normal: [0.0, 0.0, 1.0] },
        // -Z face
        Vertex { position: [ p, -p, -p], normal: [0.0, 0.0, -1.0] },
        Vertex { position: [-p, -p, -p], normal: [0.0, 0.0, -1.0] },
        Vertex { position: [-p,  p, -p], normal: [0.0, 0.0, -1.0] },
        Vertex { position: [ p,  p, -p], normal: [0.0, 0.0, -1.0] },
        // +X face
        Vertex { position: [ p, -p,  p], normal: [1.0, 0.0, 0.0] },
        Vertex { position: [ p, -p, -p], normal: [1.0, 0.0, 0.0] },
        Vertex { position: [ p,  p, -p], normal: [1.0, 0.0, 0.0] },
        Vertex { position: [ p,  p,  p], normal: [1.0, 0.0, 0.0] },
        // -X face
        Vertex { position: [-p, -p, -p], normal: [-1.0, 0.0, 0.0] },
        Vertex { position: [-p, -p,  p], normal: [-1.0, 0.0, 0.0] },
        Vertex { position: [-p,  p,  p], normal: [-1.0, 0.0, 0.0] },
        Vertex { position: [-p,  p, -p], normal: [-1.0, 0.0, 0.0] },
        // +Y face
        Vertex { position: [-p,  p,  p], normal: [0.0, 1.0, 0.0] },
        Vertex { position: [ p,  p,  p], normal: [0.0, 1.0, 0.0] },
        Vertex { position: [ p,  p, -p], normal: [0.0, 1.0, 0.0] },
        Vertex { position: [-p,  p, -p], normal: [0.0, 1.0, 0.0] },
        // -Y face
        Vertex { position: [-p, -p, -p], normal: [0.0, -1.0, 0.0] },
        Vertex { position: [ p, -p, -p], normal: [0.0, -1.0, 0.0] },
        Vertex { position: [ p, -p,  p], normal: [0.0, -1.0, 0.0] },
        Vertex { position: [-p, -p,  p], normal: [0.0, -1.0, 0.0] },
    ];
    #[rustfmt::skip]
    let indices: Vec<u16> = vec![
        0,1,2, 2,3,0,       // +Z
        4,5,6, 6,7,4,       // -Z
        8,9,10, 10,11,8,    // +X
        12,13,14, 14,15,12, // -X
        16,17,18, 18,19,16, // +Y
        20,21,22, 22,23,20, // -Y
    ];
    (vertices, indices)
}

/// Colors are authored in sRGB; shading happens in linear space.
fn shading_color(rgb: Rgb) -> [f32; 3] {
    rgb.to_linear()
}

/// One instance per figure cube, in the figure's local frame.
fn cube_instances(figure: &FigureGroup) -> Vec<CubeInstance> {
    figure
        .cubes()
        .iter()
        .map(|c| {
            let [r, g, b] = shading_color(c.color);
            CubeInstance {
                offset: [c.position.x, c.position.y, c.position.z, 0.0],
                color: [r, g, b, 1.0],
            }
        })
        .collect()
}

/// Two triangles covering the ground quad, already in world space.
fn ground_vertices(scene: &Scene) -> Vec<GroundVertex> {
    let ground = &scene.ground;
    let normal = ground.normal().to_array();
    let color = shading_color(ground.color);
    let [a, b, c, d] = ground.corners();
    [a, b, c, c, d, a]
        .into_iter()
        .map(|p| GroundVertex {
            position: p.to_array(),
            normal,
            color,
        })
        .collect()
}

fn scaled(rgb: Rgb, intensity: f32) -> [f32; 4] {
    let [r, g, b] = shading_color(rgb);
    [r * intensity, g * intensity, b * intensity, 1.0]
}

fn globals(scene: &Scene, figure: &FigureGroup, encode_srgb: bool) -> Globals {
    let lighting = &scene.lighting;
    let sun = &lighting.sun;
    Globals {
        view_proj: scene.camera.view_projection().to_cols_array_2d(),
        light_view_proj: sun.shadow_view_projection().to_cols_array_2d(),
        figure_model: figure.model_matrix().to_cols_array_2d(),
        light_dir: sun.to_light().extend(0.0).to_array(),
        sun_color: scaled(sun.color, sun.intensity),
        ambient_color: scaled(lighting.ambient.color, lighting.ambient.intensity),
        params: [
            if sun.casts_shadow { 1.0 } else { 0.0 },
            SHADOW_BIAS,
            if encode_srgb { 1.0 } else { 0.0 },
            0.0,
        ],
    }
}

/// Clear color for the target: linear for sRGB surfaces, raw otherwise.
fn clear_color(background: Rgb, srgb_target: bool) -> wgpu::Color {
    let [r, g, b] = if srgb_target {
        background.to_linear()
    } else {
        background.to_srgb()
    };
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: 1.0,
    }
}

/// Size-dependent render targets.
struct FrameTargets {
    depth: wgpu::TextureView,
    /// Multisampled color target, resolved into the surface each frame.
    msaa: Option<wgpu::TextureView>,
}

impl FrameTargets {
    fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        sample_count: u32,
        viewport: Viewport,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: viewport.width.max(1),
            height: viewport.height.max(1),
            depth_or_array_layers: 1,
        };
        let depth = device
            .create_texture(&wgpu::TextureDescriptor {
                label: Some("depth_texture"),
                size,
                mip_level_count: 1,
                sample_count,
                dimension: wgpu::TextureDimension::D2,
                format: DEPTH_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            })
            .create_view(&Default::default());
        let msaa = (sample_count > 1).then(|| {
            device
                .create_texture(&wgpu::TextureDescriptor {
                    label: Some("msaa_color_texture"),
                    size,
                    mip_level_count: 1,
                    sample_count,
                    dimension: wgpu::TextureDimension::D2,
                    format,
                    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                    view_formats: &[],
                })
                .create_view(&Default::default())
        });
        Self { depth, msaa }
    }
}

/// wgpu scene renderer: shadow pass, ground plane, instanced figure cubes.
///
/// Cube instances are uploaded once at construction. Per frame only the
/// globals uniform (camera, light and the figure group transform) changes.
pub struct WgpuRenderer {
    cube_pipeline: wgpu::RenderPipeline,
    ground_pipeline: wgpu::RenderPipeline,
    shadow_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    shadow_map: ShadowMap,
    cube_vertex_buffer: wgpu::Buffer,
    cube_index_buffer: wgpu::Buffer,
    cube_index_count: u32,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
    ground_vertex_buffer: wgpu::Buffer,
    ground_vertex_count: u32,
    targets: FrameTargets,
    surface_format: wgpu::TextureFormat,
    sample_count: u32,
    clear_color: wgpu::Color,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        sample_count: u32,
        viewport: Viewport,
        scene: &Scene,
        figure: &FigureGroup,
    ) -> Self {
        let srgb_target = surface_format.is_srgb();

        // Globals uniform
        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals_buffer"),
            contents: bytemuck::bytes_of(&globals(scene, figure, !srgb_target)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bind_group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let shadow_layout = ShadowMap::bind_group_layout(device);
        let shadow_map = ShadowMap::new(
            device,
            &shadow_layout,
            scene.lighting.sun.shadow_map_size,
        );

        let scene_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pipeline_layout"),
            bind_group_layouts: &[&globals_layout, &shadow_layout],
            push_constant_ranges: &[],
        });
        let shadow_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("shadow_pipeline_layout"),
                bind_group_layouts: &[&globals_layout],
                push_constant_ranges: &[],
            });

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SCENE_SHADER.into()),
        });
        let shadow_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shadow_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SHADOW_SHADER.into()),
        });

        let cube_buffers = [
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![
                    0 => Float32x3,
                    1 => Float32x3,
                ],
            },
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<CubeInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &wgpu::vertex_attr_array![
                    2 => Float32x4,
                    3 => Float32x4,
                ],
            },
        ];
        let ground_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GroundVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![
                0 => Float32x3,
                1 => Float32x3,
                2 => Float32x3,
            ],
        }];

        let color_targets = [Some(wgpu::ColorTargetState {
            format: surface_format,
            blend: Some(wgpu::BlendState::REPLACE),
            write_mask: wgpu::ColorWrites::ALL,
        })];
        // LessEqual: where cubes coincide exactly, the later instance wins.
        let depth_stencil = wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: Default::default(),
            bias: Default::default(),
        };
        let multisample = wgpu::MultisampleState {
            count: sample_count,
            ..Default::default()
        };

        // Cube pipeline
        let cube_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("cube_pipeline"),
            layout: Some(&scene_layout),
            vertex: wgpu::VertexState {
                module: &scene_shader,
                entry_point: Some("vs_cube"),
                compilation_options: Default::default(),
                buffers: &cube_buffers,
            },
            fragment: Some(wgpu::FragmentState {
                module: &scene_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &color_targets,
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(depth_stencil.clone()),
            multisample,
            multiview: None,
            cache: None,
        });

        // Ground pipeline
        let ground_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("ground_pipeline"),
            layout: Some(&scene_layout),
            vertex: wgpu::VertexState {
                module: &scene_shader,
                entry_point: Some("vs_ground"),
                compilation_options: Default::default(),
                buffers: &ground_buffers,
            },
            fragment: Some(wgpu::FragmentState {
                module: &scene_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &color_targets,
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(depth_stencil),
            multisample,
            multiview: None,
            cache: None,
        });

        // Shadow pipeline: depth only, from the sun
        let shadow_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("shadow_pipeline"),
            layout: Some(&shadow_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shadow_shader,
                entry_point: Some("vs_shadow"),
                compilation_options: Default::default(),
                buffers: &cube_buffers,
            },
            fragment: None,
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: SHADOW_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: Default::default(),
                bias: wgpu::DepthBiasState {
                    constant: 2,
                    slope_scale: 2.0,
                    clamp: 0.0,
                },
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // Cube mesh
        let (cube_verts, cube_indices) = cube_mesh();
        let cube_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_vertex_buffer"),
            contents: bytemuck::cast_slice(&cube_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let cube_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube_index_buffer"),
            contents: bytemuck::cast_slice(&cube_indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let cube_index_count = cube_indices.len() as u32;

        // Figure instances, uploaded once
        let instances = cube_instances(figure);
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("instance_buffer"),
            contents: bytemuck::cast_slice(&instances),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instance_count = instances.len() as u32;

        // Ground mesh
        let ground_verts = ground_vertices(scene);
        let ground_vertex_count = ground_verts.len() as u32;
        let ground_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ground_vertex_buffer"),
            contents: bytemuck::cast_slice(&ground_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let targets = FrameTargets::new(device, surface_format, sample_count, viewport);

        tracing::debug!(
            "renderer ready: {instance_count} cube instances, {sample_count}x MSAA, shadow map {}px",
            shadow_map.size()
        );

        Self {
            cube_pipeline,
            ground_pipeline,
            shadow_pipeline,
            globals_buffer,
            globals_bind_group,
            shadow_map,
            cube_vertex_buffer,
            cube_index_buffer,
            cube_index_count,
            instance_buffer,
            instance_count,
            ground_vertex_buffer,
            ground_vertex_count,
            targets,
            surface_format,
            sample_count,
            clear_color: clear_color(scene.background, srgb_target),
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, viewport: Viewport) {
        self.targets = FrameTargets::new(device, self.surface_format, self.sample_count, viewport);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Record one frame into `encoder`: shadow pass, then ground and cubes.
    pub fn render(
        &self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        scene: &Scene,
        figure: &FigureGroup,
    ) {
        let uniforms = globals(scene, figure, !self.surface_format.is_srgb());
        queue.write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&uniforms));

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("shadow_pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.shadow_map.view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            if scene.lighting.sun.casts_shadow {
                pass.set_pipeline(&self.shadow_pipeline);
                pass.set_bind_group(0, &self.globals_bind_group, &[]);
                pass.set_vertex_buffer(0, self.cube_vertex_buffer.slice(..));
                pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
                pass.set_index_buffer(self.cube_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..self.cube_index_count, 0, 0..self.instance_count);
            }
        }

        let (color_view, resolve_target, store) = match &self.targets.msaa {
            Some(msaa) => (msaa, Some(view), wgpu::StoreOp::Discard),
            None => (view, None, wgpu::StoreOp::Store),
        };

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_bind_group(0, &self.globals_bind_group, &[]);
            pass.set_bind_group(1, self.shadow_map.bind_group(), &[]);

            // Ground plane
            pass.set_pipeline(&self.ground_pipeline);
            pass.set_vertex_buffer(0, self.ground_vertex_buffer.slice(..));
            pass.draw(0..self.ground_vertex_count, 0..1);

            // Figure cubes
            pass.set_pipeline(&self.cube_pipeline);
            pass.set_vertex_buffer(0, self.cube_vertex_buffer.slice(..));
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            pass.set_index_buffer(self.cube_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..self.cube_index_count, 0, 0..self.instance_count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec3};
    use pixelboy_figure::build_layout;
    use pixelboy_scene::{IdlePose, SceneConfig};

    fn fixture() -> (Scene, FigureGroup) {
        let scene = Scene::new(&SceneConfig::default(), Viewport::new(1024, 768));
        let figure = FigureGroup::from_layout(build_layout());
        (scene, figure)
    }

    #[test]
    fn cube_mesh_faces_point_outward() {
        let (verts, indices) = cube_mesh();
        assert_eq!(verts.len(), 24);
        assert_eq!(indices.len(), 36);
        for tri in indices.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|i| Vec3::from(verts[tri[i] as usize].position));
            let face = (b - a).cross(c - a).normalize();
            let normal = Vec3::from(verts[tri[0] as usize].normal);
            assert!((face - normal).length() < 1e-5);
        }
    }

    #[test]
    fn one_instance_per_cube() {
        let (_, figure) = fixture();
        let instances = cube_instances(&figure);
        assert_eq!(instances.len(), figure.len());
        for (inst, cube) in instances.iter().zip(figure.cubes()) {
            assert_eq!(inst.offset[..3], cube.position.to_array());
            assert_eq!(inst.color[..3], cube.color.to_linear());
        }
    }

    #[test]
    fn instances_ignore_group_pose() {
        let (_, mut figure) = fixture();
        let before = cube_instances(&figure);
        figure.apply_pose(IdlePose {
            rotation: 0.3,
            offset: 0.3,
        });
        assert_eq!(cube_instances(&figure), before);
    }

    #[test]
    fn ground_is_two_upward_triangles() {
        let (scene, _) = fixture();
        let verts = ground_vertices(&scene);
        assert_eq!(verts.len(), 6);
        for tri in verts.chunks(3) {
            let [a, b, c] = [0, 1, 2].map(|i| Vec3::from(tri[i].position));
            assert!((b - a).cross(c - a).y > 0.0);
        }
        assert!(verts.iter().all(|v| (v.position[1] + 0.5).abs() < 1e-5));
    }

    #[test]
    fn globals_carry_group_transform_and_lights() {
        let (scene, mut figure) = fixture();
        figure.apply_pose(IdlePose {
            rotation: 0.1,
            offset: 0.2,
        });
        let g = globals(&scene, &figure, false);
        assert_eq!(Mat4::from_cols_array_2d(&g.figure_model), figure.model_matrix());
        assert_eq!(
            Mat4::from_cols_array_2d(&g.view_proj),
            scene.camera.view_projection()
        );
        assert!((g.ambient_color[0] - 0.6).abs() < 1e-6);
        assert!((g.sun_color[0] - 0.8).abs() < 1e-6);
        assert_eq!(g.params[0], 1.0);
        assert_eq!(g.params[2], 0.0);
        assert_eq!(std::mem::size_of::<Globals>() % 16, 0);
    }

    #[test]
    fn clear_color_follows_target_encoding() {
        let sky = Rgb::from_hex(0x87ceeb);
        let raw = clear_color(sky, false);
        let linear = clear_color(sky, true);
        assert!((raw.r - 0x87 as f64 / 255.0).abs() < 1e-6);
        assert!(linear.r < raw.r);
        assert_eq!(linear.a, 1.0);
    }
}
