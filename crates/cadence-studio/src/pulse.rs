use std::f64::consts::TAU;

use bytemuck::{Pod, Zeroable};
use cadence_engine::core::EngineClient;
use cadence_engine::device::GpuContext;

/// Seconds per full pulse cycle.
const PERIOD_S: f64 = 2.0;

/// Smallest and largest side of the pulsing square, as a fraction of the
/// shorter viewport side.
const MIN_FRACTION: f64 = 0.2;
const MAX_FRACTION: f64 = 0.6;

const CLEAR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.03,
    a: 1.0,
};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct PulseUniform {
    rect: [f32; 4],
    color: [f32; 4],
    viewport: [f32; 4],
}

/// Square centered in a `width` x `height` viewport, breathing with `elapsed_ms`.
fn pulse_at(elapsed_ms: f64, height: f64, width: f64) -> PulseUniform {
    let phase = ((elapsed_ms / 1000.0) * TAU / PERIOD_S).sin() * 0.5 + 0.5;
    let side = height.min(width).max(0.0) * (MIN_FRACTION + (MAX_FRACTION - MIN_FRACTION) * phase);

    let x = (width - side) * 0.5;
    let y = (height - side) * 0.5;

    // Premultiplied: scale rgb by alpha.
    let a = 0.6 + 0.4 * phase;
    let (r, g, b) = (0.25 + 0.5 * phase, 0.55, 0.95 - 0.4 * phase);

    PulseUniform {
        rect: [x as f32, y as f32, side as f32, side as f32],
        color: [(r * a) as f32, (g * a) as f32, (b * a) as f32, a as f32],
        viewport: [width as f32, height as f32, 0.0, 0.0],
    }
}

/// Demo engine: a square that pulses in the middle of the surface.
pub struct PulseClient {
    gpu: GpuContext,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    ubo: wgpu::Buffer,
    params: PulseUniform,
}

impl PulseClient {
    pub fn new(gpu: &GpuContext) -> Self {
        let device = gpu.device();

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("pulse shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/pulse.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("pulse bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<PulseUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pulse pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("pulse pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.surface_format(),
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("pulse ubo"),
            size: std::mem::size_of::<PulseUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("pulse bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        log::debug!("pulse pipeline ready ({:?})", gpu.surface_format());

        Self {
            gpu: gpu.clone(),
            pipeline,
            bind_group,
            ubo,
            params: PulseUniform::zeroed(),
        }
    }
}

impl EngineClient for PulseClient {
    fn update(&mut self, elapsed_ms: f64, height: f64, width: f64) -> anyhow::Result<()> {
        self.params = pulse_at(elapsed_ms, height, width);
        Ok(())
    }

    fn render(&mut self) -> anyhow::Result<()> {
        let Some(mut frame) = self.gpu.begin_frame()? else {
            return Ok(());
        };

        self.gpu
            .queue()
            .write_buffer(&self.ubo, 0, bytemuck::bytes_of(&self.params));

        let vp = self.gpu.viewport();
        {
            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("pulse pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if vp.width > 0 && vp.height > 0 {
                rpass.set_viewport(
                    vp.x as f32,
                    vp.y as f32,
                    vp.width as f32,
                    vp.height as f32,
                    0.0,
                    1.0,
                );
                rpass.set_pipeline(&self.pipeline);
                rpass.set_bind_group(0, &self.bind_group, &[]);
                rpass.draw(0..6, 0..1);
            }
        }

        self.gpu.submit(frame);
        Ok(())
    }
}
