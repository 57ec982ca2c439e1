use crate::core::palette::linear_from_hex;
use crate::core::{EffectsParams, SceneController, SceneParams};
use web_sys as web;

mod helpers;
mod post;
mod scene_pass;
mod targets;
use post::{PostBindGroups, PostResources};
use scene_pass::{SceneGlobals, SceneResources};
use targets::RenderTargets;

// ===================== WebGPU state =====================

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    scene: SceneResources,
    // Post-processing resources
    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    post: PostResources,
    post_groups: PostBindGroups,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    fog_color: glam::Vec3,
    fog_range: [f32; 2],
    effects: EffectsParams,
}

impl GpuState<'static> {
    /// The surface owns its canvas handle, so the state is `'static`.
    pub async fn new(
        canvas: web::HtmlCanvasElement,
        params: &SceneParams,
        sprite_capacity: usize,
        line_vertex_capacity: usize,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {}x{} format={:?}", width, height, format);

        let targets = RenderTargets::new(&device, width, height);
        let scene = scene_pass::create_scene_resources(&device, sprite_capacity, line_vertex_capacity);

        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::POST_WGSL.into()),
        });
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let post = post::create_post_resources(
            &device,
            &post_shader,
            crate::constants::HDR_FORMAT,
            format,
        );
        let post_groups = post::build_bind_groups(
            &device,
            &post,
            &linear_sampler,
            &targets.hdr_view,
            &targets.bloom_a_view,
            &targets.bloom_b_view,
        );

        let clear = linear_from_hex(params.clear_color);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            scene,
            targets,
            linear_sampler,
            post,
            post_groups,
            width,
            height,
            clear_color: wgpu::Color {
                r: clear.x as f64,
                g: clear.y as f64,
                b: clear.z as f64,
                a: 1.0,
            },
            fog_color: clear,
            fog_range: params.fog_range,
            effects: params.effects,
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);

            // Recreate offscreen render targets and dependent bind groups
            self.targets.recreate(&self.device, width, height);
            self.rebuild_post_bind_groups();
        }
    }

    /// Re-apply the current configuration after a lost or outdated surface.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, scene: &SceneController) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let camera = scene.camera();
        let aspect = self.width as f32 / self.height.max(1) as f32;
        let (right, up) = camera.billboard_axes();
        let globals = SceneGlobals::new(
            camera.view_projection(aspect),
            right,
            up,
            camera.eye,
            scene.elapsed(),
            self.fog_color,
            self.fog_range,
        );
        self.queue
            .write_buffer(&self.scene.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let sprite_total = self.scene.upload_sprites(&self.queue, scene.sprites());
        let background = (scene.background_sprite_count() as u32).min(sprite_total);
        let line_vertices = self.scene.upload_lines(
            &self.queue,
            &[scene.ring_vertices(), scene.connector().buffer().vertex_floats()],
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.msaa_view,
                    resolve_target: Some(&self.targets.hdr_view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Discard,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.scene.globals_bind_group, &[]);

            // Background sprites, then lines, then nodes and the core.
            rpass.set_pipeline(&self.scene.sprite_pipeline);
            rpass.set_vertex_buffer(0, self.scene.sprite_buffer.slice(..));
            if background > 0 {
                rpass.draw(0..6, 0..background);
            }
            if line_vertices > 0 {
                rpass.set_pipeline(&self.scene.line_pipeline);
                rpass.set_vertex_buffer(0, self.scene.line_buffer.slice(..));
                rpass.draw(0..line_vertices, 0..1);
                rpass.set_pipeline(&self.scene.sprite_pipeline);
                rpass.set_vertex_buffer(0, self.scene.sprite_buffer.slice(..));
            }
            if sprite_total > background {
                rpass.draw(0..6, background..sprite_total);
            }
        }

        let time = scene.elapsed();
        let half_res = [
            (self.width / 2).max(1) as f32,
            (self.height / 2).max(1) as f32,
        ];
        let effects = self.effects;
        let bloom = effects.bloom_strength > 0.0;
        post::write_post_uniforms(
            &self.queue,
            &self.post.uniforms.base,
            half_res,
            time,
            &effects,
            [0.0, 0.0],
        );

        if bloom {
            post::write_post_uniforms(
                &self.queue,
                &self.post.uniforms.blur_h,
                half_res,
                time,
                &effects,
                [1.0, 0.0],
            );
            post::write_post_uniforms(
                &self.queue,
                &self.post.uniforms.blur_v,
                half_res,
                time,
                &effects,
                [0.0, 1.0],
            );
            // Bright pass → bloom_a, blur H → bloom_b, blur V → bloom_a
            post::blit(
                &mut encoder,
                "bright_pass",
                &self.targets.bloom_a_view,
                wgpu::Color::BLACK,
                &self.post.bright_pipeline,
                &self.post_groups.from_hdr,
                None,
            );
            post::blit(
                &mut encoder,
                "blur_h",
                &self.targets.bloom_b_view,
                wgpu::Color::BLACK,
                &self.post.blur_pipeline,
                &self.post_groups.blur_h,
                None,
            );
            post::blit(
                &mut encoder,
                "blur_v",
                &self.targets.bloom_a_view,
                wgpu::Color::BLACK,
                &self.post.blur_pipeline,
                &self.post_groups.blur_v,
                None,
            );
        }

        // Composite to swapchain
        post::blit(
            &mut encoder,
            "composite",
            &view,
            self.clear_color,
            &self.post.composite_pipeline,
            &self.post_groups.from_hdr,
            Some(&self.post_groups.bloom_a_only),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl<'a> GpuState<'a> {
    fn rebuild_post_bind_groups(&mut self) {
        self.post_groups = post::build_bind_groups(
            &self.device,
            &self.post,
            &self.linear_sampler,
            &self.targets.hdr_view,
            &self.targets.bloom_a_view,
            &self.targets.bloom_b_view,
        );
    }
}
