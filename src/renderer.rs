// renderer.rs — 核心渲染器：星空、地球、云层、标记四个管线

use std::sync::Arc;

use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use image::RgbaImage;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::assets::{self, TextureSlot};
use crate::camera::Camera;
use crate::geo::{MarkerPlacement, CLOUD_RADIUS, GLOBE_RADIUS};
use crate::interaction::RotationState;
use crate::mesh::{self, MeshData};

pub const SPHERE_SEGMENTS: usize = 64;
pub const SPHERE_RINGS: usize = 32;

// 场景常量，均已换算到线性空间
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0123, // #00001d
    a: 1.0,
};
const GLOBE_TINT: [f32; 3] = [0.2158, 0.5271, 0.3563]; // #80c0a1
const AMBIENT: [f32; 3] = [0.2461, 0.2461, 0.2461]; // #888888
const LIGHT_DIR: [f32; 3] = [0.4082, 0.4082, 0.8165]; // normalize(50, 50, 100)
const LIGHT_INTENSITY: f32 = 0.8;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniform {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    globe_model: [[f32; 4]; 4],
    clouds_model: [[f32; 4]; 4],
    light_dir: [f32; 4], // xyz 方向，w 强度
    ambient: [f32; 4],
    tint: [f32; 4],
}

impl SceneUniform {
    fn new(camera: &Camera) -> Self {
        Self {
            view: camera.view().to_cols_array_2d(),
            proj: camera.proj().to_cols_array_2d(),
            globe_model: Mat4::IDENTITY.to_cols_array_2d(),
            clouds_model: Mat4::IDENTITY.to_cols_array_2d(),
            light_dir: [LIGHT_DIR[0], LIGHT_DIR[1], LIGHT_DIR[2], LIGHT_INTENSITY],
            ambient: [AMBIENT[0], AMBIENT[1], AMBIENT[2], 0.0],
            tint: [GLOBE_TINT[0], GLOBE_TINT[1], GLOBE_TINT[2], 0.0],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 3],
    uv: [f32; 2],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }

    fn interleave(mesh: &MeshData) -> Vec<Vertex> {
        mesh.positions
            .iter()
            .zip(&mesh.uvs)
            .map(|(position, uv)| Vertex {
                position: *position,
                uv: *uv,
            })
            .collect()
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct MarkerInstance {
    center: [f32; 3],
    scale: f32,
}

impl MarkerInstance {
    const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![5 => Float32x3, 6 => Float32];

    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MarkerInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, mesh: &MeshData, label: &str) -> Self {
        let vertices = Vertex::interleave(mesh);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }
}

pub struct Renderer {
    surface: wgpu::Surface,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pub size: winit::dpi::PhysicalSize<u32>,
    pub camera: Camera,

    star_pipeline: wgpu::RenderPipeline,
    globe_pipeline: wgpu::RenderPipeline,
    clouds_pipeline: wgpu::RenderPipeline,
    marker_pipeline: wgpu::RenderPipeline,
    depth_view: wgpu::TextureView,

    // Uniform 资源
    scene_uniform: SceneUniform,
    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,

    // 纹理资源，按槽位各挂一个 bind group
    texture_bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    earth_bind_group: wgpu::BindGroup,
    clouds_bind_group: wgpu::BindGroup,
    marker_bind_group: wgpu::BindGroup,

    globe_mesh: GpuMesh,
    clouds_mesh: GpuMesh,
    stars_mesh: GpuMesh,
    marker_instances: wgpu::Buffer,
    marker_count: u32,

    // UI
    pub egui_ctx: egui::Context,
    pub egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Renderer {
    pub async fn new(
        window: Arc<Window>,
        placements: &[MarkerPlacement],
        star_centers: &[Vec3],
        vsync: bool,
    ) -> Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = unsafe { instance.create_surface(window.as_ref()) }
            .context("create window surface")?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no suitable GPU adapter")?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    features: wgpu::Features::empty(),
                    limits: wgpu::Limits::default().using_resolution(adapter.limits()),
                    label: None,
                },
                None,
            )
            .await
            .context("request GPU device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: if vsync {
                wgpu::PresentMode::Fifo
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let camera = Camera::new(size.width as f32 / size.height as f32);

        // --- 1. Uniform Setup ---
        let scene_uniform = SceneUniform::new(&camera);
        let scene_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Buffer"),
            contents: bytemuck::cast_slice(&[scene_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let scene_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
                label: Some("scene_bind_group_layout"),
            });

        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &scene_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
            label: Some("scene_bind_group"),
        });

        // --- 2. Texture Setup (占位图，正式纹理到货后替换) ---
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::Repeat, // 等距柱状贴图水平循环
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            multisampled: false,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
                label: Some("texture_bind_group_layout"),
            });

        let earth_bind_group = upload_texture(
            &device,
            &queue,
            &texture_bind_group_layout,
            &sampler,
            &assets::placeholder(TextureSlot::Earth),
            "earth_texture",
        );
        let clouds_bind_group = upload_texture(
            &device,
            &queue,
            &texture_bind_group_layout,
            &sampler,
            &assets::placeholder(TextureSlot::Clouds),
            "clouds_texture",
        );
        let marker_bind_group = upload_texture(
            &device,
            &queue,
            &texture_bind_group_layout,
            &sampler,
            &assets::placeholder(TextureSlot::MarkerIcon),
            "marker_icon",
        );

        // --- 3. Meshes ---
        let globe_mesh = GpuMesh::upload(
            &device,
            &mesh::build_sphere(GLOBE_RADIUS, SPHERE_RINGS, SPHERE_SEGMENTS),
            "globe_mesh",
        );
        let clouds_mesh = GpuMesh::upload(
            &device,
            &mesh::build_sphere(CLOUD_RADIUS, SPHERE_RINGS, SPHERE_SEGMENTS),
            "clouds_mesh",
        );
        let stars_mesh = GpuMesh::upload(
            &device,
            &mesh::build_star_field(star_centers, mesh::STAR_RADIUS, mesh::STAR_SEGMENTS),
            "stars_mesh",
        );

        let instances: Vec<MarkerInstance> = placements
            .iter()
            .map(|p| MarkerInstance {
                center: p.position.to_array(),
                scale: p.scale,
            })
            .collect();
        let marker_instances = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("marker_instances"),
            contents: bytemuck::cast_slice(&instances),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let marker_count = instances.len() as u32;

        // --- 4. Pipeline Setup ---
        let globe_shader = device.create_shader_module(wgpu::include_wgsl!("shader_globe.wgsl"));
        let marker_shader =
            device.create_shader_module(wgpu::include_wgsl!("shader_markers.wgsl"));
        let star_shader = device.create_shader_module(wgpu::include_wgsl!("shader_stars.wgsl"));

        let scene_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Scene Pipeline Layout"),
                bind_group_layouts: &[&scene_bind_group_layout],
                push_constant_ranges: &[],
            });
        let textured_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Textured Pipeline Layout"),
                bind_group_layouts: &[&scene_bind_group_layout, &texture_bind_group_layout],
                push_constant_ranges: &[],
            });

        let star_pipeline = build_pipeline(
            &device,
            &scene_pipeline_layout,
            &star_shader,
            ("vs_main", "fs_main"),
            &[Vertex::desc()],
            wgpu::BlendState::REPLACE,
            false,
            config.format,
            "Star Pipeline",
        );
        let globe_pipeline = build_pipeline(
            &device,
            &textured_pipeline_layout,
            &globe_shader,
            ("vs_globe", "fs_globe"),
            &[Vertex::desc()],
            wgpu::BlendState::REPLACE,
            true,
            config.format,
            "Globe Pipeline",
        );
        let clouds_pipeline = build_pipeline(
            &device,
            &textured_pipeline_layout,
            &globe_shader,
            ("vs_clouds", "fs_clouds"),
            &[Vertex::desc()],
            wgpu::BlendState::ALPHA_BLENDING,
            false,
            config.format,
            "Clouds Pipeline",
        );
        let marker_pipeline = build_pipeline(
            &device,
            &textured_pipeline_layout,
            &marker_shader,
            ("vs_main", "fs_main"),
            &[MarkerInstance::desc()],
            wgpu::BlendState::ALPHA_BLENDING,
            false,
            config.format,
            "Marker Pipeline",
        );

        let depth_view = create_depth_view(&device, &config);

        // --- 5. Egui Setup ---
        let egui_ctx = egui::Context::default();
        let mut egui_state = egui_winit::State::new(window.as_ref());
        // 高 DPI 显示器需要显式设置 pixels_per_point
        egui_state.set_pixels_per_point(window.scale_factor() as f32);
        let egui_renderer = egui_wgpu::Renderer::new(&device, config.format, None, 1);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            camera,
            star_pipeline,
            globe_pipeline,
            clouds_pipeline,
            marker_pipeline,
            depth_view,
            scene_uniform,
            scene_buffer,
            scene_bind_group,
            texture_bind_group_layout,
            sampler,
            earth_bind_group,
            clouds_bind_group,
            marker_bind_group,
            globe_mesh,
            clouds_mesh,
            stars_mesh,
            marker_instances,
            marker_count,
            egui_ctx,
            egui_state,
            egui_renderer,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, &self.config);
            self.camera
                .set_aspect(new_size.width as f32, new_size.height as f32);
        }
    }

    /// Push the current rotation (and camera, after a resize) to the GPU.
    pub fn update_scene(&mut self, rotation: &RotationState) {
        self.scene_uniform.view = self.camera.view().to_cols_array_2d();
        self.scene_uniform.proj = self.camera.proj().to_cols_array_2d();
        self.scene_uniform.globe_model =
            Mat4::from_rotation_y(rotation.globe_yaw).to_cols_array_2d();
        self.scene_uniform.clouds_model =
            Mat4::from_rotation_y(rotation.cloud_yaw).to_cols_array_2d();

        self.queue
            .write_buffer(&self.scene_buffer, 0, bytemuck::cast_slice(&[self.scene_uniform]));
    }

    /// Swap a texture slot for a freshly decoded image. Oversized images
    /// are scaled down to the GPU limit first.
    pub fn load_texture(&mut self, slot: TextureSlot, img: RgbaImage) {
        let max_dim = self.device.limits().max_texture_dimension_2d;
        let (src_w, src_h) = img.dimensions();

        let img = if src_w > max_dim || src_h > max_dim {
            let scale = (max_dim as f32 / src_w.max(src_h) as f32).min(1.0);
            let new_w = ((src_w as f32 * scale) as u32).max(1);
            let new_h = ((src_h as f32 * scale) as u32).max(1);
            log::warn!(
                "{slot:?} texture is {src_w}x{src_h}, above the GPU limit {max_dim}; scaling to {new_w}x{new_h}"
            );
            image::DynamicImage::ImageRgba8(img)
                .resize(new_w, new_h, image::imageops::FilterType::Lanczos3)
                .to_rgba8()
        } else {
            img
        };

        let label = match slot {
            TextureSlot::Earth => "earth_texture",
            TextureSlot::Clouds => "clouds_texture",
            TextureSlot::MarkerIcon => "marker_icon",
        };
        let bind_group = upload_texture(
            &self.device,
            &self.queue,
            &self.texture_bind_group_layout,
            &self.sampler,
            &img,
            label,
        );

        match slot {
            TextureSlot::Earth => self.earth_bind_group = bind_group,
            TextureSlot::Clouds => self.clouds_bind_group = bind_group,
            TextureSlot::MarkerIcon => self.marker_bind_group = bind_group,
        }
    }

    pub fn render_with_ui(
        &mut self,
        window: &Window,
        run_ui: impl FnOnce(&egui::Context),
    ) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        // 1. Render Scene
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: true,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: false,
                    }),
                    stencil_ops: None,
                }),
            });

            render_pass.set_bind_group(0, &self.scene_bind_group, &[]);

            // 由远及近：星空、地球、云层、标记
            render_pass.set_pipeline(&self.star_pipeline);
            render_pass.set_vertex_buffer(0, self.stars_mesh.vertex_buffer.slice(..));
            render_pass
                .set_index_buffer(self.stars_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..self.stars_mesh.index_count, 0, 0..1);

            render_pass.set_pipeline(&self.globe_pipeline);
            render_pass.set_bind_group(1, &self.earth_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.globe_mesh.vertex_buffer.slice(..));
            render_pass
                .set_index_buffer(self.globe_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..self.globe_mesh.index_count, 0, 0..1);

            render_pass.set_pipeline(&self.clouds_pipeline);
            render_pass.set_bind_group(1, &self.clouds_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.clouds_mesh.vertex_buffer.slice(..));
            render_pass
                .set_index_buffer(self.clouds_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..self.clouds_mesh.index_count, 0, 0..1);

            if self.marker_count > 0 {
                render_pass.set_pipeline(&self.marker_pipeline);
                render_pass.set_bind_group(1, &self.marker_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.marker_instances.slice(..));
                render_pass.draw(0..6, 0..self.marker_count);
            }
        }

        // 2. Render UI
        let raw_input = self.egui_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, run_ui);

        self.egui_state
            .handle_platform_output(window, &self.egui_ctx, full_output.platform_output);
        let clipped_primitives = self.egui_ctx.tessellate(full_output.shapes);

        let screen_descriptor = egui_wgpu::renderer::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: window.scale_factor() as f32,
        };

        for (id, delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, delta);
        }

        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &clipped_primitives,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: true,
                    },
                })],
                depth_stencil_attachment: None,
            });
            self.egui_renderer
                .render(&mut render_pass, &clipped_primitives, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn upload_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    img: &RgbaImage,
    label: &str,
) -> wgpu::BindGroup {
    let (width, height) = img.dimensions();
    let texture_size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        size: texture_size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        label: Some(label),
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::ImageCopyTexture {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        img,
        wgpu::ImageDataLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        texture_size,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
        label: Some(label),
    })
}

#[allow(clippy::too_many_arguments)]
fn build_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    (vs_entry, fs_entry): (&str, &str),
    buffers: &[wgpu::VertexBufferLayout],
    blend: wgpu::BlendState,
    depth_write: bool,
    format: wgpu::TextureFormat,
    label: &str,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: vs_entry,
            buffers,
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: fs_entry,
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None, // 球体双面渲染，星星与标记也无需剔除
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: depth_write,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}

fn create_depth_view(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        size: wgpu::Extent3d {
            width: config.width.max(1),
            height: config.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        label: Some("depth_texture"),
        view_formats: &[],
    });

    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
