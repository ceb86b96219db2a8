//! Scene controller.
//!
//! ## Tick
//!
//! ```text
//! 1. active == 0            → no-op
//! 2. effect params          → uniform (write_buffer)
//! 3. [active, mode]         → queue params
//! 4. header, slots, status  → reset to initial values
//! 5. workgroups = max(1, ceil(active / 64))
//! 6. one compute pass: enqueue (group 0) then worker (groups 0 + 1)
//! 7. copy particles → readback, submit
//! 8. map readback (the only await), copy out, unmap
//! 9. decode onto the scene's canvas
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use ember_core::{Effect, QueueControl, QueueLayout, WorkList};
use ember_effects::{
    AssetLoader, AssetResult, Fetcher, KernelAssembler, KernelParts, ENQUEUE_ENTRY, WORKER_ENTRY,
};
use ember_rendering::{render_effect, Canvas2d, DrawStats, SceneExtras};

use crate::buffers::{ParticleBuffers, QueueBuffers};
use crate::context::GpuContext;
use crate::error::{GpuError, GpuResult};
use crate::state::{SceneSpec, SceneState};

/// Payload words per job; each job carries its particle index.
pub const PAYLOAD_WORDS: u32 = 1;

/// Queue and worker kernels shared by every scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelSources {
    /// Lock-free queue kernel.
    pub queue_wgsl: String,
    /// Generic worker kernel.
    pub worker_wgsl: String,
}

impl KernelSources {
    /// Loads both kernels through `loader`.
    ///
    /// # Errors
    ///
    /// Any load error.
    pub async fn load<F: Fetcher>(
        loader: &AssetLoader<F>,
        queue_path: &str,
        worker_path: &str,
    ) -> AssetResult<Self> {
        let queue_wgsl = loader.load_source(queue_path).await?;
        let worker_wgsl = loader.load_source(worker_path).await?;
        Ok(Self { queue_wgsl, worker_wgsl })
    }
}

/// One effect instance: buffers, pipelines, state and its canvas.
pub struct Scene {
    ctx: Arc<GpuContext>,
    effect: Effect,
    label: String,
    state: SceneState,
    extras: SceneExtras,
    control: QueueControl,
    queue_buffers: QueueBuffers,
    particles: ParticleBuffers,
    queue_bind_group: wgpu::BindGroup,
    effect_bind_group: wgpu::BindGroup,
    enqueue_pipeline: wgpu::ComputePipeline,
    worker_pipeline: wgpu::ComputePipeline,
    canvas: Box<dyn Canvas2d>,
    last_stats: DrawStats,
}

impl Scene {
    /// Loads the effect's kernels, builds its pipelines and buffers, and
    /// uploads the initial particles and static work list.
    ///
    /// # Errors
    ///
    /// Invalid spec or canvas, unknown effect or job, asset failures, layout
    /// overflow, or a device error raised while building.
    pub async fn create<F, A>(
        ctx: Arc<GpuContext>,
        loader: &AssetLoader<F>,
        assembler: &A,
        kernels: &KernelSources,
        spec: SceneSpec,
        canvas: Box<dyn Canvas2d>,
    ) -> GpuResult<Self>
    where
        F: Fetcher,
        A: KernelAssembler,
    {
        spec.validate()?;
        let (width, height) = (canvas.width(), canvas.height());
        let drawable = width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0;
        if !drawable {
            return Err(GpuError::InvalidScene(format!(
                "{}.{}: canvas must be non-empty, got {width}x{height}",
                spec.effect, spec.job
            )));
        }

        let prelude_wgsl = loader.load_prelude(spec.effect.name()).await?;
        let job = loader.load_job(spec.effect.name(), &spec.job).await?;
        let label = job.label.clone();
        let jobs = [job];
        let module_source = assembler.assemble(&KernelParts {
            queue_wgsl: &kernels.queue_wgsl,
            worker_wgsl: &kernels.worker_wgsl,
            prelude_wgsl: &prelude_wgsl,
            jobs: &jobs,
        })?;

        let device = ctx.device();
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&label),
            source: wgpu::ShaderSource::Wgsl(Cow::Owned(module_source)),
        });
        let enqueue_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("particles.enqueue.layout"),
            bind_group_layouts: &[ctx.queue_layout()],
            push_constant_ranges: &[],
        });
        let worker_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("particles.worker.layout"),
            bind_group_layouts: &[ctx.queue_layout(), ctx.effect_layout()],
            push_constant_ranges: &[],
        });
        let enqueue_pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("particles.enqueue"),
            layout: Some(&enqueue_layout),
            module: &module,
            entry_point: ENQUEUE_ENTRY,
        });
        let worker_pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("particles.worker"),
            layout: Some(&worker_layout),
            module: &module,
            entry_point: WORKER_ENTRY,
        });

        let layout = QueueLayout::new(spec.max_count, PAYLOAD_WORDS)?;
        let queue_buffers = QueueBuffers::new(device, layout, &label);
        let particles = ParticleBuffers::new(device, spec.max_count, &label);
        let queue_bind_group = queue_buffers.bind_group(device, ctx.queue_layout());
        let effect_bind_group = particles.bind_group(device, ctx.effect_layout());

        let state = SceneState::new(&spec);
        particles.upload_records(ctx.queue(), &state.initial_particles(spec.rng_seed));
        queue_buffers.upload_work_list(ctx.queue(), &WorkList::per_particle(&layout));

        if let Err(err) = ctx.check_device() {
            tracing::error!(scene = %label, error = %err, "scene creation failed");
            return Err(err);
        }

        tracing::info!(
            scene = %label,
            max_count = spec.max_count,
            capacity = layout.capacity(),
            slots_bytes = layout.slots_size(),
            payload_bytes = layout.payload_size(),
            particle_bytes = particles.size(),
            active = state.active_count(),
            "scene created"
        );

        Ok(Self {
            control: layout.control(),
            ctx,
            effect: spec.effect,
            label,
            state,
            extras: spec.extras,
            queue_buffers,
            particles,
            queue_bind_group,
            effect_bind_group,
            enqueue_pipeline,
            worker_pipeline,
            canvas,
            last_stats: DrawStats::default(),
        })
    }

    /// Runs one simulate-and-render tick.
    ///
    /// Returns `None` when there was nothing to dispatch. A validated scene
    /// always has at least one active job, so this only guards the dispatch.
    ///
    /// # Errors
    ///
    /// Mapping failures and device errors. The scene is not usable after
    /// an error.
    pub async fn step(&mut self, time: f32, dt: f32) -> GpuResult<Option<DrawStats>> {
        if self.state.is_idle() {
            return Ok(None);
        }
        let job_count = self.state.active_count();
        let (device, queue) = (self.ctx.device(), self.ctx.queue());

        self.particles.upload_params(queue, &self.state.effect_params(time, dt));
        self.queue_buffers.reset(queue, &self.control, &self.state.queue_params());

        let workgroups = self.state.workgroups();
        tracing::trace!(scene = %self.label, job_count, workgroups, "dispatch");

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some(&self.label),
        });
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("particles.tick"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.enqueue_pipeline);
            pass.set_bind_group(0, &self.queue_bind_group, &[]);
            pass.dispatch_workgroups(workgroups, 1, 1);

            pass.set_pipeline(&self.worker_pipeline);
            pass.set_bind_group(0, &self.queue_bind_group, &[]);
            pass.set_bind_group(1, &self.effect_bind_group, &[]);
            pass.dispatch_workgroups(workgroups, 1, 1);
        }
        self.particles.copy_to_readback(&mut encoder);
        queue.submit(std::iter::once(encoder.finish()));

        let records = match self.particles.read_back(device).await {
            Ok(records) => records,
            Err(err) => {
                tracing::error!(scene = %self.label, error = %err, "readback failed");
                return Err(err);
            }
        };
        self.ctx.check_device()?;

        let stats = render_effect(
            self.effect,
            self.canvas.as_mut(),
            &records,
            job_count as usize,
            &self.extras,
            time,
        );
        self.last_stats = stats;
        Ok(Some(stats))
    }

    /// Applies a new intensity and returns the percent readout.
    pub fn set_intensity(&mut self, value: f32) -> i32 {
        self.state.set_intensity(value)
    }

    /// Effect drawn by this scene.
    #[must_use]
    pub fn effect(&self) -> Effect {
        self.effect
    }

    /// `particles.<effect>.<job>`.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// CPU-side state.
    #[must_use]
    pub fn state(&self) -> &SceneState {
        &self.state
    }

    /// Queue layout the buffers were sized from.
    #[must_use]
    pub fn layout(&self) -> &QueueLayout {
        self.queue_buffers.layout()
    }

    /// Statistics of the last decoded frame.
    #[must_use]
    pub fn last_stats(&self) -> DrawStats {
        self.last_stats
    }

    /// The scene's drawing surface.
    #[must_use]
    pub fn canvas(&self) -> &dyn Canvas2d {
        self.canvas.as_ref()
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("label", &self.label)
            .field("state", &self.state)
            .field("last_stats", &self.last_stats)
            .finish_non_exhaustive()
    }
}
