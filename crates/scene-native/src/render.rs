use glam::{Mat4, Vec3};
use scene_core::{SceneDirector, SpriteInstance, CAMERA_Z};
use winit::dpi::PhysicalSize;

// One stroke draw = one ring orientation or one trail.
const STROKE_UNIFORM_STRIDE: u64 = 256;
const RING_SEGMENTS: usize = 64;
const RING_ORIENTATIONS: usize = 3;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.016,
    g: 0.012,
    b: 0.035,
    a: 1.0,
};

const RING_COLOR: [f32; 4] = [0.70, 0.75, 0.90, 0.35];

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    group: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct StrokeUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

pub struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    sprite_pipeline: wgpu::RenderPipeline,
    stroke_pipeline: wgpu::RenderPipeline,
    scene_uniform_buffer: wgpu::Buffer,
    stroke_uniform_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    stroke_bind_group: wgpu::BindGroup,
    quad_vb: wgpu::Buffer,
    instance_vb: wgpu::Buffer,
    instance_capacity: usize,
    instances: Vec<SpriteInstance>,
    trail_vbs: Vec<(wgpu::Buffer, u32)>,
    ring_vb: wgpu::Buffer,
    ring_vertex_count: u32,
    pixel_ratio_cap: f32,
    scale_factor: f64,
    width: u32,
    height: u32,
}

impl<'w> GpuState<'w> {
    pub async fn new(
        window: &'w winit::window::Window,
        director: &SceneDirector,
    ) -> anyhow::Result<Self> {
        use wgpu::util::DeviceExt;

        let pixel_ratio_cap = director.profile().pixel_ratio_cap;
        let scale_factor = window.scale_factor();
        let (width, height) = capped_size(window.inner_size(), scale_factor, pixel_ratio_cap);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(surface_caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(scene_core::SCENE_WGSL.into()),
        });

        let scene_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let stroke_slots =
            director.trails().len() + director.spheres().len() * RING_ORIENTATIONS;
        let stroke_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("stroke_uniforms"),
            size: STROKE_UNIFORM_STRIDE * stroke_slots.max(1) as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Quad vertices for two triangles
        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let instance_capacity = director.field().len() + director.swarm_instances().len();
        let instance_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_vb"),
            size: (std::mem::size_of::<SpriteInstance>() * instance_capacity.max(1)) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Static polyline geometry: one buffer per trail, one shared unit ring.
        let trail_vbs = director
            .trails()
            .iter()
            .map(|trail| {
                let points: Vec<[f32; 3]> =
                    trail.points().iter().map(|p| p.to_array()).collect();
                let vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("trail_vb"),
                    contents: bytemuck::cast_slice(&points),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                (vb, points.len() as u32)
            })
            .collect();

        let ring_points: Vec<[f32; 3]> = (0..=RING_SEGMENTS)
            .map(|s| {
                let theta = s as f32 / RING_SEGMENTS as f32 * std::f32::consts::TAU;
                [theta.cos(), theta.sin(), 0.0]
            })
            .collect();
        let ring_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ring_vb"),
            contents: bytemuck::cast_slice(&ring_points),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let stroke_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("stroke_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_uniform_buffer.as_entire_binding(),
            }],
        });
        let stroke_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("stroke_bg"),
            layout: &stroke_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &stroke_uniform_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<StrokeUniforms>() as u64),
                }),
            }],
        });

        let sprite_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sprite_pl"),
            bind_group_layouts: &[&scene_bgl],
            push_constant_ranges: &[],
        });
        let stroke_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("stroke_pl"),
            bind_group_layouts: &[&scene_bgl, &stroke_bgl],
            push_constant_ranges: &[],
        });

        let sprite_buffers = [
            // slot 0: quad corners
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            // slot 1: instance data
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<SpriteInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 1,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32,
                        offset: 12,
                        shader_location: 2,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 16,
                        shader_location: 3,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32,
                        offset: 32,
                        shader_location: 4,
                    },
                ],
            },
        ];
        let sprite_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sprite_pipeline"),
            layout: Some(&sprite_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_sprite"),
                buffers: &sprite_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_sprite"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let stroke_buffers = [wgpu::VertexBufferLayout {
            array_stride: (std::mem::size_of::<f32>() * 3) as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            }],
        }];
        let stroke_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("stroke_pipeline"),
            layout: Some(&stroke_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_stroke"),
                buffers: &stroke_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineStrip,
                ..wgpu::PrimitiveState::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_stroke"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            sprite_pipeline,
            stroke_pipeline,
            scene_uniform_buffer,
            stroke_uniform_buffer,
            scene_bind_group,
            stroke_bind_group,
            quad_vb,
            instance_vb,
            instance_capacity,
            instances: Vec::with_capacity(instance_capacity),
            trail_vbs,
            ring_vb,
            ring_vertex_count: ring_points.len() as u32,
            pixel_ratio_cap,
            scale_factor,
            width,
            height,
        })
    }

    pub fn window(&self) -> &winit::window::Window {
        self.window
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        let (width, height) = capped_size(new_size, self.scale_factor, self.pixel_ratio_cap);
        self.width = width;
        self.height = height;
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn reconfigure(&mut self) {
        self.resize(self.window.inner_size());
    }

    fn view_proj(&self) -> Mat4 {
        let aspect = self.width as f32 / self.height.max(1) as f32;
        let proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, aspect, 0.1, 100.0);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, CAMERA_Z), Vec3::ZERO, Vec3::Y);
        proj * view
    }

    pub fn render(&mut self, director: &SceneDirector) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            &self.scene_uniform_buffer,
            0,
            bytemuck::bytes_of(&SceneUniforms {
                view_proj: self.view_proj().to_cols_array_2d(),
                group: director.group_transform().to_cols_array_2d(),
            }),
        );

        // Sprite instances: particles first, swarm nodes after. Counts are
        // fixed per construction, so the buffer never grows.
        self.instances.clear();
        let field = director.field();
        for idx in 0..field.len() {
            let c = field.color_of(idx);
            self.instances.push(SpriteInstance {
                pos: field.positions()[idx].to_array(),
                scale: field.size(),
                color: [c[0], c[1], c[2], field.alpha_of(idx)],
                rotation: 0.0,
                _pad: [0.0; 3],
            });
        }
        self.instances.extend_from_slice(director.swarm_instances());
        debug_assert!(self.instances.len() <= self.instance_capacity);
        self.queue
            .write_buffer(&self.instance_vb, 0, bytemuck::cast_slice(&self.instances));

        // Stroke uniforms: one slot per trail, then three rings per sphere.
        let mut slot = 0u64;
        for trail in director.trails() {
            let c = trail.color();
            write_stroke(
                &self.queue,
                &self.stroke_uniform_buffer,
                slot,
                Mat4::IDENTITY,
                [c[0], c[1], c[2], trail.opacity()],
            );
            slot += 1;
        }
        for sphere in director.spheres() {
            let base = sphere.transform().matrix();
            for orientation in ring_orientations() {
                write_stroke(
                    &self.queue,
                    &self.stroke_uniform_buffer,
                    slot,
                    base * orientation,
                    RING_COLOR,
                );
                slot += 1;
            }
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_pipeline(&self.stroke_pipeline);
            rpass.set_bind_group(0, &self.scene_bind_group, &[]);
            let mut draw = 0u32;
            for (vb, count) in &self.trail_vbs {
                rpass.set_bind_group(
                    1,
                    &self.stroke_bind_group,
                    &[draw * STROKE_UNIFORM_STRIDE as u32],
                );
                rpass.set_vertex_buffer(0, vb.slice(..));
                rpass.draw(0..*count, 0..1);
                draw += 1;
            }
            for _ in 0..director.spheres().len() * RING_ORIENTATIONS {
                rpass.set_bind_group(
                    1,
                    &self.stroke_bind_group,
                    &[draw * STROKE_UNIFORM_STRIDE as u32],
                );
                rpass.set_vertex_buffer(0, self.ring_vb.slice(..));
                rpass.draw(0..self.ring_vertex_count, 0..1);
                draw += 1;
            }

            rpass.set_pipeline(&self.sprite_pipeline);
            rpass.set_bind_group(0, &self.scene_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.instance_vb.slice(..));
            rpass.draw(0..6, 0..self.instances.len() as u32);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn write_stroke(
    queue: &wgpu::Queue,
    buffer: &wgpu::Buffer,
    slot: u64,
    model: Mat4,
    color: [f32; 4],
) {
    queue.write_buffer(
        buffer,
        slot * STROKE_UNIFORM_STRIDE,
        bytemuck::bytes_of(&StrokeUniforms {
            model: model.to_cols_array_2d(),
            color,
        }),
    );
}

fn ring_orientations() -> [Mat4; RING_ORIENTATIONS] {
    [
        Mat4::IDENTITY,
        Mat4::from_rotation_x(std::f32::consts::FRAC_PI_2),
        Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2),
    ]
}

fn capped_size(size: PhysicalSize<u32>, scale_factor: f64, cap: f32) -> (u32, u32) {
    let ratio = (cap as f64 / scale_factor).min(1.0);
    (
        ((size.width as f64 * ratio) as u32).max(1),
        ((size.height as f64 * ratio) as u32).max(1),
    )
}
