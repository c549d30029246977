//! Particle field rendering system

use crate::viewport::{Viewport, ViewportUniform};
use particle_simulation::{CircleInstance, LineVertex, Scene};

const INITIAL_CIRCLE_CAPACITY: usize = 512;
const INITIAL_LINK_VERTEX_CAPACITY: usize = 4096;

/// Catppuccin Mocha base #1e1e2e RGB(30,30,46) in linear
const BACKGROUND: wgpu::Color = wgpu::Color {
    r: 0.01176,
    g: 0.01176,
    b: 0.02447,
    a: 1.0,
};

/// Vertex buffer layout for per-instance circle attributes
pub const fn circle_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRIBUTES: &[wgpu::VertexAttribute] = &[
        // center: vec2<f32> at location 0
        wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x2,
        },
        // radius: f32 at location 1
        wgpu::VertexAttribute {
            offset: 8,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32,
        },
        // softness: f32 at location 2
        wgpu::VertexAttribute {
            offset: 12,
            shader_location: 2,
            format: wgpu::VertexFormat::Float32,
        },
        // color: vec4<f32> at location 3
        wgpu::VertexAttribute {
            offset: 16,
            shader_location: 3,
            format: wgpu::VertexFormat::Float32x4,
        },
    ];

    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<CircleInstance>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: ATTRIBUTES,
    }
}

/// Vertex buffer layout for link line endpoints
pub const fn link_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRIBUTES: &[wgpu::VertexAttribute] = &[
        wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x2,
        },
        // skips LineVertex::_padding
        wgpu::VertexAttribute {
            offset: 16,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x4,
        },
    ];

    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: ATTRIBUTES,
    }
}

pub struct FieldRenderer {
    circle_pipeline: wgpu::RenderPipeline,
    link_pipeline: wgpu::RenderPipeline,
    viewport_buffer: wgpu::Buffer,
    viewport_bind_group: wgpu::BindGroup,

    circle_buffer: wgpu::Buffer,
    circle_capacity: usize,
    link_buffer: wgpu::Buffer,
    link_capacity: usize,

    viewport: Viewport,
}

impl FieldRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_config: &wgpu::SurfaceConfiguration,
        scale_factor: f32,
    ) -> Self {
        let viewport = Viewport::new(surface_config.width, surface_config.height, scale_factor);

        let viewport_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Viewport Buffer"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Field Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/field.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Field Bind Group Layout"),
            entries: &[
                // Viewport (Uniform) - Binding 0
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        // The viewport buffer never changes identity, so one bind group serves every frame
        let viewport_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Field Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Field Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let circle_pipeline = Self::create_pipeline(
            device,
            &pipeline_layout,
            &shader,
            surface_config.format,
            PipelineKind::Circle,
        );
        let link_pipeline = Self::create_pipeline(
            device,
            &pipeline_layout,
            &shader,
            surface_config.format,
            PipelineKind::Link,
        );

        let circle_buffer = Self::create_vertex_buffer(
            device,
            "Circle Instance Buffer",
            INITIAL_CIRCLE_CAPACITY * std::mem::size_of::<CircleInstance>(),
        );
        let link_buffer = Self::create_vertex_buffer(
            device,
            "Link Vertex Buffer",
            INITIAL_LINK_VERTEX_CAPACITY * std::mem::size_of::<LineVertex>(),
        );

        log::info!(
            "Field renderer ready ({:?}, {}x{} @ {}x)",
            surface_config.format,
            surface_config.width,
            surface_config.height,
            viewport.scale_factor
        );

        Self {
            circle_pipeline,
            link_pipeline,
            viewport_buffer,
            viewport_bind_group,
            circle_buffer,
            circle_capacity: INITIAL_CIRCLE_CAPACITY,
            link_buffer,
            link_capacity: INITIAL_LINK_VERTEX_CAPACITY,
            viewport,
        }
    }

    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        format: wgpu::TextureFormat,
        kind: PipelineKind,
    ) -> wgpu::RenderPipeline {
        let (label, vs, fs, buffers, topology) = match kind {
            PipelineKind::Circle => (
                "Circle Pipeline",
                "vs_circle",
                "fs_circle",
                [circle_layout()],
                wgpu::PrimitiveTopology::TriangleList,
            ),
            PipelineKind::Link => (
                "Link Pipeline",
                "vs_link",
                "fs_link",
                [link_layout()],
                wgpu::PrimitiveTopology::LineList,
            ),
        };

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some(vs),
                buffers: &buffers,
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some(fs),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            // Painter's order, no depth
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    fn create_vertex_buffer(device: &wgpu::Device, label: &str, size: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: size as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    pub fn resize(&mut self, new_config: &wgpu::SurfaceConfiguration) {
        self.viewport.resize(new_config.width, new_config.height);
    }

    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        self.viewport.set_scale_factor(scale_factor);
    }

    /// Logical drawing area; scene coordinates are in these units
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Clear the target and draw `scene`: links first, circles on top
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_view: &wgpu::TextureView,
        scene: &Scene,
    ) {
        queue.write_buffer(
            &self.viewport_buffer,
            0,
            bytemuck::cast_slice(&[self.viewport.to_uniform()]),
        );

        if scene.circles.len() > self.circle_capacity {
            self.circle_capacity = (scene.circles.len() * 2).next_power_of_two();
            log::debug!("Growing circle buffer to {} instances", self.circle_capacity);
            self.circle_buffer = Self::create_vertex_buffer(
                device,
                "Circle Instance Buffer",
                self.circle_capacity * std::mem::size_of::<CircleInstance>(),
            );
        }

        if scene.links.len() > self.link_capacity {
            self.link_capacity = (scene.links.len() * 2).next_power_of_two();
            log::debug!("Growing link buffer to {} vertices", self.link_capacity);
            self.link_buffer = Self::create_vertex_buffer(
                device,
                "Link Vertex Buffer",
                self.link_capacity * std::mem::size_of::<LineVertex>(),
            );
        }

        if !scene.circles.is_empty() {
            queue.write_buffer(&self.circle_buffer, 0, bytemuck::cast_slice(&scene.circles));
        }
        if !scene.links.is_empty() {
            queue.write_buffer(&self.link_buffer, 0, bytemuck::cast_slice(&scene.links));
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Field Render Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Field Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(BACKGROUND),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &self.viewport_bind_group, &[]);

            if !scene.links.is_empty() {
                render_pass.set_pipeline(&self.link_pipeline);
                render_pass.set_vertex_buffer(0, self.link_buffer.slice(..));
                render_pass.draw(0..scene.links.len() as u32, 0..1);
            }

            if !scene.circles.is_empty() {
                render_pass.set_pipeline(&self.circle_pipeline);
                render_pass.set_vertex_buffer(0, self.circle_buffer.slice(..));
                // 6 vertices (quad) per circle instance
                render_pass.draw(0..6, 0..scene.circles.len() as u32);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }
}

#[derive(Clone, Copy)]
enum PipelineKind {
    Circle,
    Link,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layouts_cover_structs() {
        let circle = circle_layout();
        assert_eq!(circle.array_stride, 32);
        assert_eq!(circle.step_mode, wgpu::VertexStepMode::Instance);
        assert_eq!(circle.attributes.len(), 4);

        let link = link_layout();
        assert_eq!(link.array_stride, 32);
        assert_eq!(link.step_mode, wgpu::VertexStepMode::Vertex);
        // color sits after position and padding
        assert_eq!(link.attributes[1].offset, 16);
    }
}
