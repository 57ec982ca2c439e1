use crate::constants::{HDR_FORMAT, MSAA_SAMPLES};
use crate::core::connector::LINE_VERTEX_FLOATS;
use crate::core::sprite::SpriteInstance;
use glam::Mat4;
use wgpu;

const SPRITE_ATTRS: [wgpu::VertexAttribute; 4] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32, 2 => Float32x4, 3 => Float32x4];
const LINE_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];

const LINE_STRIDE: u64 = (LINE_VERTEX_FLOATS * std::mem::size_of::<f32>()) as u64;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneGlobals {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) cam_right: [f32; 4],
    pub(crate) cam_up: [f32; 4],
    pub(crate) cam_pos: [f32; 4], // w = elapsed seconds
    pub(crate) fog_color: [f32; 4],
    pub(crate) fog_range: [f32; 4],
}

impl SceneGlobals {
    pub(crate) fn new(
        view_proj: Mat4,
        right: glam::Vec3,
        up: glam::Vec3,
        eye: glam::Vec3,
        time: f32,
        fog_color: glam::Vec3,
        fog_range: [f32; 2],
    ) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            cam_right: right.extend(0.0).to_array(),
            cam_up: up.extend(0.0).to_array(),
            cam_pos: eye.extend(time).to_array(),
            fog_color: fog_color.extend(1.0).to_array(),
            fog_range: [fog_range[0], fog_range[1], 0.0, 0.0],
        }
    }
}

/// Pipelines and buffers of the multisampled scene pass.
pub(crate) struct SceneResources {
    pub(crate) globals_buffer: wgpu::Buffer,
    pub(crate) globals_bind_group: wgpu::BindGroup,
    pub(crate) sprite_pipeline: wgpu::RenderPipeline,
    pub(crate) line_pipeline: wgpu::RenderPipeline,
    pub(crate) sprite_buffer: wgpu::Buffer,
    pub(crate) sprite_capacity: usize,
    pub(crate) line_buffer: wgpu::Buffer,
    /// Line vertex capacity (two per segment).
    pub(crate) line_capacity: usize,
}

fn scene_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    entries: (&str, &str),
    buffer: wgpu::VertexBufferLayout<'_>,
    topology: wgpu::PrimitiveTopology,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(entries.0),
            buffers: &[buffer],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState {
            count: MSAA_SAMPLES,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(entries.1),
            targets: &[Some(wgpu::ColorTargetState {
                format: HDR_FORMAT,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

pub(crate) fn create_scene_resources(
    device: &wgpu::Device,
    sprite_capacity: usize,
    line_capacity: usize,
) -> SceneResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("scene_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
    });
    let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("scene_globals"),
        size: std::mem::size_of::<SceneGlobals>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_bgl"),
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
    let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("scene_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: globals_buffer.as_entire_binding(),
        }],
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("scene_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });

    let sprite_pipeline = scene_pipeline(
        device,
        "sprite_pipeline",
        &layout,
        &shader,
        ("vs_sprite", "fs_sprite"),
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &SPRITE_ATTRS,
        },
        wgpu::PrimitiveTopology::TriangleList,
    );
    let line_pipeline = scene_pipeline(
        device,
        "line_pipeline",
        &layout,
        &shader,
        ("vs_line", "fs_line"),
        wgpu::VertexBufferLayout {
            array_stride: LINE_STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &LINE_ATTRS,
        },
        wgpu::PrimitiveTopology::LineList,
    );

    let sprite_buffer = super::helpers::create_vertex_buffer(
        device,
        "sprite_instances",
        (sprite_capacity * std::mem::size_of::<SpriteInstance>()) as u64,
    );
    let line_buffer =
        super::helpers::create_vertex_buffer(device, "line_vertices", line_capacity as u64 * LINE_STRIDE);

    SceneResources {
        globals_buffer,
        globals_bind_group,
        sprite_pipeline,
        line_pipeline,
        sprite_buffer,
        sprite_capacity,
        line_buffer,
        line_capacity,
    }
}

impl SceneResources {
    /// Upload sprites; anything past capacity is dropped. Returns the count uploaded.
    pub(crate) fn upload_sprites(&self, queue: &wgpu::Queue, sprites: &[SpriteInstance]) -> u32 {
        let n = sprites.len().min(self.sprite_capacity);
        if n > 0 {
            queue.write_buffer(&self.sprite_buffer, 0, bytemuck::cast_slice(&sprites[..n]));
        }
        n as u32
    }

    /// Upload consecutive line vertex runs; returns the total vertex count.
    pub(crate) fn upload_lines(&self, queue: &wgpu::Queue, runs: &[&[f32]]) -> u32 {
        let mut vertices = 0usize;
        for run in runs {
            let n = (run.len() / LINE_VERTEX_FLOATS).min(self.line_capacity - vertices);
            if n == 0 {
                continue;
            }
            queue.write_buffer(
                &self.line_buffer,
                vertices as u64 * LINE_STRIDE,
                bytemuck::cast_slice(&run[..n * LINE_VERTEX_FLOATS]),
            );
            vertices += n;
        }
        vertices as u32
    }
}
