use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use suitespace_scene::SuiteCamera;
use suitespace_scene::animation::{self, ACCENT, BASE, GRID};
use suitespace_scene::layout::{Block, FLOOR_PLAN};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    camera_pos: [f32; 3],
    time: f32,
    accent: [f32; 4],
    base_color: [f32; 4],
    grid_color: [f32; 4],
}

impl Uniforms {
    fn new(camera: &SuiteCamera, elapsed: f32) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            model: animation::assembly_transform(elapsed).to_cols_array_2d(),
            camera_pos: camera.eye.to_array(),
            time: elapsed,
            accent: ACCENT.extend(1.0).to_array(),
            base_color: BASE.extend(1.0).to_array(),
            grid_color: GRID.extend(1.0).to_array(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct BlockInstance {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct EdgeInstance {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
    color: [f32; 4],
}

/// Unit cube with per-face normals, built face by face.
fn cube_mesh() -> (Vec<Vertex>, Vec<u16>) {
    // (face normal, in-plane U axis, in-plane V axis)
    const FACES: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u, v) in FACES {
        let base = vertices.len() as u16;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let corner = (normal + u * su + v * sv) * 0.5;
            vertices.push(Vertex {
                position: corner.to_array(),
                normal: normal.to_array(),
            });
        }
        indices.extend([base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    (vertices, indices)
}

/// The 12 edges of a unit cube as a line list over its 8 corners.
fn edge_mesh() -> (Vec<[f32; 3]>, Vec<u16>) {
    let mut corners = Vec::with_capacity(8);
    for i in 0..8u16 {
        corners.push([
            if i & 1 != 0 { 0.5 } else { -0.5 },
            if i & 2 != 0 { 0.5 } else { -0.5 },
            if i & 4 != 0 { 0.5 } else { -0.5 },
        ]);
    }
    // Corner pairs differing in exactly one axis bit.
    let mut indices = Vec::with_capacity(24);
    for a in 0..8u16 {
        for bit in [1, 2, 4] {
            let b = a ^ bit;
            if a < b {
                indices.extend([a, b]);
            }
        }
    }
    (corners, indices)
}

fn block_model(block: &Block) -> Mat4 {
    Mat4::from_translation(block.center) * Mat4::from_scale(block.size)
}

fn block_instances() -> Vec<BlockInstance> {
    FLOOR_PLAN
        .iter()
        .map(|block| {
            let cols = block_model(block).to_cols_array_2d();
            BlockInstance {
                model_0: cols[0],
                model_1: cols[1],
                model_2: cols[2],
                model_3: cols[3],
            }
        })
        .collect()
}

fn edge_instances() -> Vec<EdgeInstance> {
    FLOOR_PLAN
        .iter()
        .map(|block| {
            let cols = block_model(block).to_cols_array_2d();
            let [r, g, b] = block.edge_color;
            EdgeInstance {
                model_0: cols[0],
                model_1: cols[1],
                model_2: cols[2],
                model_3: cols[3],
                color: [r, g, b, 1.0],
            }
        })
        .collect()
}

/// Renders the rotating suite: edge outlines plus translucent kinetic boxes.
///
/// The floor plan is static, so both instance buffers are written once at
/// construction; per frame only the uniform buffer changes.
pub struct SceneRenderer {
    kinetic_pipeline: wgpu::RenderPipeline,
    edge_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    cube_vertex_buffer: wgpu::Buffer,
    cube_index_buffer: wgpu::Buffer,
    cube_index_count: u32,
    edge_vertex_buffer: wgpu::Buffer,
    edge_index_buffer: wgpu::Buffer,
    edge_index_count: u32,
    block_instance_buffer: wgpu::Buffer,
    edge_instance_buffer: wgpu::Buffer,
    instance_count: u32,
    depth_texture: wgpu::TextureView,
}

impl SceneRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scene_uniforms"),
            contents: bytemuck::bytes_of(&Uniforms::new(&SuiteCamera::default(), 0.0)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        // Kinetic pipeline: double-sided translucent boxes. Alpha blended,
        // depth-tested against the edge pass but not depth-writing.
        let kinetic_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("kinetic_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::KINETIC_SHADER.into()),
        });

        let kinetic_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("kinetic_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &kinetic_shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![
                            0 => Float32x3,
                            1 => Float32x3,
                        ],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<BlockInstance>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            2 => Float32x4,
                            3 => Float32x4,
                            4 => Float32x4,
                            5 => Float32x4,
                        ],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &kinetic_shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // Edge pipeline
        let edge_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("edge_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::EDGE_SHADER.into()),
        });

        let edge_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("edge_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &edge_shader,
                entry_point: Some("vs_edge"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<[f32; 3]>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![
                            0 => Float32x3,
                        ],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<EdgeInstance>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            1 => Float32x4,
                            2 => Float32x4,
                            3 => Float32x4,
                            4 => Float32x4,
                            5 => Float32x4,
                        ],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &edge_shader,
                entry_point: Some("fs_edge"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // Static geometry
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

        let (edge_verts, edge_indices) = edge_mesh();
        let edge_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("edge_vertex_buffer"),
            contents: bytemuck::cast_slice(&edge_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let edge_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("edge_index_buffer"),
            contents: bytemuck::cast_slice(&edge_indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let edge_index_count = edge_indices.len() as u32;

        // The floor plan never changes: instances are written once.
        let blocks = block_instances();
        let block_instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("block_instance_buffer"),
            contents: bytemuck::cast_slice(&blocks),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let edges = edge_instances();
        let edge_instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("edge_instance_buffer"),
            contents: bytemuck::cast_slice(&edges),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        tracing::debug!(blocks = blocks.len(), "scene renderer ready");

        Self {
            kinetic_pipeline,
            edge_pipeline,
            uniform_buffer,
            uniform_bind_group,
            cube_vertex_buffer,
            cube_index_buffer,
            cube_index_count,
            edge_vertex_buffer,
            edge_index_buffer,
            edge_index_count,
            block_instance_buffer,
            edge_instance_buffer,
            instance_count: blocks.len() as u32,
            depth_texture,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    /// Render one frame of the suite at the given elapsed time.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        camera: &SuiteCamera,
        elapsed: f32,
    ) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms::new(camera, elapsed)),
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("scene_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            // Edges first: they depth-write, so glass panels behind them
            // blend correctly in the translucent pass.
            pass.set_pipeline(&self.edge_pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_vertex_buffer(0, self.edge_vertex_buffer.slice(..));
            pass.set_vertex_buffer(1, self.edge_instance_buffer.slice(..));
            pass.set_index_buffer(self.edge_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..self.edge_index_count, 0, 0..self.instance_count);

            pass.set_pipeline(&self.kinetic_pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_vertex_buffer(0, self.cube_vertex_buffer.slice(..));
            pass.set_vertex_buffer(1, self.block_instance_buffer.slice(..));
            pass.set_index_buffer(self.cube_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..self.cube_index_count, 0, 0..self.instance_count);
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("scene_depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_mesh_shape() {
        let (verts, indices) = cube_mesh();
        assert_eq!(verts.len(), 24);
        assert_eq!(indices.len(), 36);
        for v in &verts {
            let n = Vec3::from_array(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-6);
            // Each corner sits on the unit cube surface.
            let p = Vec3::from_array(v.position);
            assert!((p.abs().max_element() - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn edge_mesh_has_twelve_unit_edges() {
        let (verts, indices) = edge_mesh();
        assert_eq!(verts.len(), 8);
        assert_eq!(indices.len(), 24);
        for pair in indices.chunks(2) {
            let a = Vec3::from_array(verts[pair[0] as usize]);
            let b = Vec3::from_array(verts[pair[1] as usize]);
            assert!((a.distance(b) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn block_model_places_corners() {
        // The bed block: center (-1.5, 0.2, -1.5), size (1.8, 0.4, 2.2).
        let bed = FLOOR_PLAN.iter().find(|b| b.label == "bed").unwrap();
        let corner = block_model(bed).transform_point3(Vec3::splat(0.5));
        assert!(corner.abs_diff_eq(Vec3::new(-0.6, 0.4, -0.4), 1e-6));
    }

    #[test]
    fn one_instance_per_block() {
        assert_eq!(block_instances().len(), FLOOR_PLAN.len());
        assert_eq!(edge_instances().len(), FLOOR_PLAN.len());
        let edges = edge_instances();
        assert!(edges.iter().all(|e| e.color[3] == 1.0));
    }
}
