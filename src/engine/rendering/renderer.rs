use super::error::*;
use crate::core::Vertex3D;
use crate::ensure_aligned;
use crate::rendering::{DEPTH_FORMAT, State};
use crate::scene::{CameraUniform, PointLightUniform, SceneHost};
use log::error;
use nalgebra::{Matrix4, Vector3};
use snafu::ResultExt;
use std::sync::Arc;
use wgpu::util::{BufferInitDescriptor, DeviceExt};
use wgpu::{
    BindGroup, BindGroupDescriptor, BindGroupEntry, BindGroupLayout, BindGroupLayoutDescriptor,
    BindGroupLayoutEntry, BindingType, Buffer, BufferBindingType, BufferUsages, Color,
    CommandEncoder, CommandEncoderDescriptor, CompareFunction, DepthStencilState, FragmentState,
    LoadOp, Operations, PipelineLayoutDescriptor, PrimitiveState, PrimitiveTopology, RenderPass,
    RenderPassColorAttachment, RenderPassDepthStencilAttachment, RenderPassDescriptor,
    RenderPipeline, RenderPipelineDescriptor, ShaderModuleDescriptor, ShaderSource, ShaderStages,
    StoreOp, SurfaceError, SurfaceTexture, TextureView, TextureViewDescriptor, VertexState,
};
use winit::dpi::PhysicalSize;
use winit::window::Window;

const SHADER_SOURCE: &str = include_str!("shaders/object3d.wgsl");

const CLEAR_COLOR: Color = Color {
    r: 0.045,
    g: 0.055,
    b: 0.085,
    a: 1.0,
};

/// Per-node uniform: model matrix plus the flat presentation color.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    pub model_mat: Matrix4<f32>,
    pub color: Vector3<f32>,
    pub _padding: u32,
}

ensure_aligned!(ModelUniform { model_mat, color }, align <= 16 * 5 => size);

/// GPU residency of one scene node. Created the first time the renderer
/// sees the node, destroyed when the node leaves the scene.
pub struct GpuMesh {
    vertex_buffer: Buffer,
    index_buffer: Buffer,
    index_count: u32,
    model_buffer: Buffer,
    bind_group: BindGroup,
}

impl GpuMesh {
    pub fn destroy(&self) {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
        self.model_buffer.destroy();
    }
}

pub struct RenderContext {
    pub output: SurfaceTexture,
    pub color_view: TextureView,
    pub depth_view: TextureView,
    pub encoder: CommandEncoder,
}

/// Draws the scene once per frame and keeps the per-node GPU resources in
/// step with the scene graph.
pub struct Renderer {
    pub state: Box<State>,
    window: Arc<Window>,

    pipeline: RenderPipeline,
    camera_data: Box<CameraUniform>,
    camera_buffer: Buffer,
    camera_bind_group: BindGroup,
    light_bgl: BindGroupLayout,
    model_bgl: BindGroupLayout,
}

impl Renderer {
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let state = Box::new(State::new(window.clone()).await.context(StateErr)?);
        let device = &state.device;

        let camera_bgl = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Camera Bind Group Layout"),
            entries: &[BindGroupLayoutEntry {
                binding: 0,
                visibility: ShaderStages::VERTEX_FRAGMENT,
                ty: BindingType::Buffer {
                    ty: BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let light_bgl = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Light Bind Group Layout"),
            entries: &[
                BindGroupLayoutEntry {
                    binding: 0,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Buffer {
                        ty: BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                BindGroupLayoutEntry {
                    binding: 1,
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindingType::Buffer {
                        ty: BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let model_bgl = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Model Bind Group Layout"),
            entries: &[BindGroupLayoutEntry {
                binding: 0,
                visibility: ShaderStages::VERTEX_FRAGMENT,
                ty: BindingType::Buffer {
                    ty: BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let shader = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("Object Shader"),
            source: ShaderSource::Wgsl(SHADER_SOURCE.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("Object Pipeline Layout"),
            bind_group_layouts: &[&camera_bgl, &light_bgl, &model_bgl],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&RenderPipelineDescriptor {
            label: Some("Object Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex3D::continuous_descriptor()],
            },
            fragment: Some(FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(state.config.format.into())],
            }),
            primitive: PrimitiveState {
                topology: PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let camera_data = Box::new(CameraUniform::empty());
        let camera_buffer = device.create_buffer_init(&BufferInitDescriptor {
            label: Some("Camera Uniform Buffer"),
            contents: bytemuck::bytes_of(camera_data.as_ref()),
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        });
        let camera_bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bgl,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        Ok(Renderer {
            state,
            window,
            pipeline,
            camera_data,
            camera_buffer,
            camera_bind_group,
            light_bgl,
            model_bgl,
        })
    }

    /// Renders one frame. Returns `false` when the frame loop should stop
    /// because the device is gone for good.
    pub fn render_scene(&mut self, scene: &mut SceneHost) -> bool {
        let mut ctx = match self.begin_render() {
            Ok(ctx) => ctx,
            Err(RenderError::Surface {
                source: SurfaceError::Lost,
            }) => {
                self.state.resize(self.state.size);
                return true; // drop frame but don't cancel
            }
            Err(RenderError::Surface {
                source: SurfaceError::OutOfMemory,
            }) => {
                error!("The application ran out of GPU memory!");
                return false;
            }
            Err(e) => {
                error!("Surface error: {e}");
                return false;
            }
        };

        self.render(&mut ctx, scene);
        self.end_render(ctx);

        true
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.state.resize(new_size);
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    fn begin_render(&mut self) -> Result<RenderContext> {
        let mut output = self
            .state
            .surface
            .get_current_texture()
            .context(SurfaceErr)?;
        if output.suboptimal {
            drop(output);
            self.state.recreate_surface();
            output = self
                .state
                .surface
                .get_current_texture()
                .context(SurfaceErr)?;
        }

        let color_view = output
            .texture
            .create_view(&TextureViewDescriptor::default());
        let depth_view = self
            .state
            .depth_texture
            .create_view(&TextureViewDescriptor::default());
        let encoder = self
            .state
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("Main Encoder"),
            });

        Ok(RenderContext {
            output,
            color_view,
            depth_view,
            encoder,
        })
    }

    fn render(&mut self, ctx: &mut RenderContext, scene: &mut SceneHost) {
        self.update_camera_data(scene);
        let light_bind_group = self.setup_lights(scene);
        self.upload_nodes(scene);

        let mut rpass = self.prepare_render_pass(ctx);

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.camera_bind_group, &[]);
        rpass.set_bind_group(1, &light_bind_group, &[]);

        for (_, node) in scene.nodes() {
            let Some(gpu) = &node.gpu else {
                continue;
            };

            rpass.set_bind_group(2, &gpu.bind_group, &[]);
            rpass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
            rpass.set_index_buffer(gpu.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..gpu.index_count, 0, 0..1);
        }
    }

    fn end_render(&mut self, ctx: RenderContext) {
        self.state.queue.submit(Some(ctx.encoder.finish()));
        ctx.output.present();
        self.window.request_redraw();
    }

    fn update_camera_data(&mut self, scene: &SceneHost) {
        self.camera_data.update(&scene.camera);
        self.state.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(self.camera_data.as_ref()),
        );
    }

    /// Uploads the current light rig. Rebuilt every frame; the rig is tiny
    /// and may change size at any time.
    fn setup_lights(&self, scene: &SceneHost) -> BindGroup {
        const DUMMY_POINT_LIGHT: PointLightUniform = PointLightUniform::zero();

        let light_count = scene.lights.len() as u32;
        let light_data: &[PointLightUniform] = if scene.lights.is_empty() {
            &[DUMMY_POINT_LIGHT]
        } else {
            &scene.lights
        };

        let count_buffer = self.state.device.create_buffer_init(&BufferInitDescriptor {
            label: Some("Light Count Buffer"),
            contents: bytemuck::bytes_of(&light_count),
            usage: BufferUsages::UNIFORM,
        });
        let storage_buffer = self.state.device.create_buffer_init(&BufferInitDescriptor {
            label: Some("Light Storage Buffer"),
            contents: bytemuck::cast_slice(light_data),
            usage: BufferUsages::STORAGE,
        });

        self.state.device.create_bind_group(&BindGroupDescriptor {
            label: Some("Light Bind Group"),
            layout: &self.light_bgl,
            entries: &[
                BindGroupEntry {
                    binding: 0,
                    resource: count_buffer.as_entire_binding(),
                },
                BindGroupEntry {
                    binding: 1,
                    resource: storage_buffer.as_entire_binding(),
                },
            ],
        })
    }

    /// Creates GPU buffers for nodes seen for the first time and refreshes
    /// every node's model uniform.
    fn upload_nodes(&self, scene: &mut SceneHost) {
        let device = &self.state.device;
        let queue = &self.state.queue;

        for node in scene.nodes_mut() {
            if node.gpu.is_none() {
                let vertex_buffer = device.create_buffer_init(&BufferInitDescriptor {
                    label: Some(&format!("{} Vertex Buffer", node.label)),
                    contents: bytemuck::cast_slice(&node.mesh.vertices),
                    usage: BufferUsages::VERTEX,
                });
                let index_buffer = device.create_buffer_init(&BufferInitDescriptor {
                    label: Some(&format!("{} Index Buffer", node.label)),
                    contents: bytemuck::cast_slice(&node.mesh.indices),
                    usage: BufferUsages::INDEX,
                });
                let model_buffer = device.create_buffer_init(&BufferInitDescriptor {
                    label: Some(&format!("{} Model Buffer", node.label)),
                    contents: bytemuck::bytes_of(&ModelUniform {
                        model_mat: Matrix4::identity(),
                        color: node.color,
                        _padding: 0,
                    }),
                    usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
                });
                let bind_group = device.create_bind_group(&BindGroupDescriptor {
                    label: Some(&format!("{} Bind Group", node.label)),
                    layout: &self.model_bgl,
                    entries: &[BindGroupEntry {
                        binding: 0,
                        resource: model_buffer.as_entire_binding(),
                    }],
                });

                node.gpu = Some(GpuMesh {
                    vertex_buffer,
                    index_buffer,
                    index_count: node.mesh.indices.len() as u32,
                    model_buffer,
                    bind_group,
                });
            }

            let Some(gpu) = &node.gpu else {
                continue;
            };
            let uniform = ModelUniform {
                model_mat: *node.transform.full_matrix(),
                color: node.color,
                _padding: 0,
            };
            queue.write_buffer(&gpu.model_buffer, 0, bytemuck::bytes_of(&uniform));
        }
    }

    fn prepare_render_pass<'a>(&self, ctx: &'a mut RenderContext) -> RenderPass<'a> {
        ctx.encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Scene Render Pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: &ctx.color_view,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Clear(CLEAR_COLOR),
                    store: StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                view: &ctx.depth_view,
                depth_ops: Some(Operations {
                    load: LoadOp::Clear(1.0),
                    store: StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            ..RenderPassDescriptor::default()
        })
    }
}
