//! GPU buffers for one scene.
//!
//! Two lifetimes, kept apart:
//! - the work list (input jobs + input payload) is uploaded once at creation;
//! - control state (header, slots, status, params) is re-uploaded every tick
//!   because the enqueue kernel consumes it destructively.

use ember_core::{
    decode_particles, EffectParams, ParticleRecord, QueueBinding, QueueControl, QueueLayout,
    QueueParams, WorkList, PARTICLE_STRIDE_BYTES,
};
use tokio::sync::oneshot;

use crate::error::{GpuError, GpuResult};

/// The eight queue buffers, indexed by [`QueueBinding`].
pub struct QueueBuffers {
    layout: QueueLayout,
    buffers: [wgpu::Buffer; 8],
}

impl QueueBuffers {
    /// Allocates every queue buffer at its layout size. Nothing is uploaded.
    #[must_use]
    pub fn new(device: &wgpu::Device, layout: QueueLayout, label: &str) -> Self {
        let buffers = QueueBinding::ORDER.map(|binding| {
            let usage = if binding.is_uniform() {
                wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST
            } else {
                wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST
            };
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&format!("{label}.queue.{binding:?}")),
                size: layout.binding_size(binding),
                usage,
                mapped_at_creation: false,
            })
        });
        Self { layout, buffers }
    }

    /// The layout these buffers were sized from.
    #[must_use]
    pub fn layout(&self) -> &QueueLayout {
        &self.layout
    }

    /// Buffer behind `binding`.
    #[must_use]
    pub fn buffer(&self, binding: QueueBinding) -> &wgpu::Buffer {
        &self.buffers[binding.index() as usize]
    }

    /// Uploads the static work list. Called once.
    pub fn upload_work_list(&self, queue: &wgpu::Queue, work: &WorkList) {
        queue.write_buffer(self.buffer(QueueBinding::InputJobs), 0, work.jobs_bytes());
        queue.write_buffer(self.buffer(QueueBinding::InputPayload), 0, work.payload_bytes());
    }

    /// Schedules the per-tick control uploads: params, header, slot identity
    /// map and zeroed status.
    pub fn reset(&self, queue: &wgpu::Queue, control: &QueueControl, params: &QueueParams) {
        queue.write_buffer(self.buffer(QueueBinding::Params), 0, bytemuck::bytes_of(params));
        queue.write_buffer(self.buffer(QueueBinding::Header), 0, control.header_bytes());
        queue.write_buffer(self.buffer(QueueBinding::Slots), 0, control.slots_bytes());
        queue.write_buffer(self.buffer(QueueBinding::Status), 0, control.status_bytes());
    }

    /// Bind group 0.
    #[must_use]
    pub fn bind_group(&self, device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> wgpu::BindGroup {
        let entries = QueueBinding::ORDER.map(|binding| wgpu::BindGroupEntry {
            binding: binding.index(),
            resource: self.buffer(binding).as_entire_binding(),
        });
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("particles.queue.bind_group"),
            layout,
            entries: &entries,
        })
    }
}

/// Particle state, its readback copy and the effect parameter block.
pub struct ParticleBuffers {
    records: wgpu::Buffer,
    readback: wgpu::Buffer,
    params: wgpu::Buffer,
    size: u64,
}

impl ParticleBuffers {
    /// Allocates buffers for `count` records.
    #[must_use]
    pub fn new(device: &wgpu::Device, count: u32, label: &str) -> Self {
        let size = u64::from(count) * PARTICLE_STRIDE_BYTES as u64;
        let records = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label}.particles")),
            size,
            usage: wgpu::BufferUsages::STORAGE
                | wgpu::BufferUsages::COPY_DST
                | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });
        let readback = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label}.readback")),
            size,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });
        let params = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label}.params")),
            size: EffectParams::SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self { records, readback, params, size }
    }

    /// Size in bytes of the particle buffer.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Writes initial records.
    pub fn upload_records(&self, queue: &wgpu::Queue, records: &[ParticleRecord]) {
        queue.write_buffer(&self.records, 0, bytemuck::cast_slice(records));
    }

    /// Schedules this tick's effect parameters.
    pub fn upload_params(&self, queue: &wgpu::Queue, params: &EffectParams) {
        queue.write_buffer(&self.params, 0, params.as_bytes());
    }

    /// Records the particle-to-readback copy into `encoder`.
    pub fn copy_to_readback(&self, encoder: &mut wgpu::CommandEncoder) {
        encoder.copy_buffer_to_buffer(&self.records, 0, &self.readback, 0, self.size);
    }

    /// Bind group 1.
    #[must_use]
    pub fn bind_group(&self, device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("particles.effect.bind_group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: self.records.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 1, resource: self.params.as_entire_binding() },
            ],
        })
    }

    /// Maps the readback buffer, copies it into owned records and unmaps.
    ///
    /// The copy must already be submitted. The mapping never outlives this
    /// call.
    ///
    /// # Errors
    ///
    /// [`GpuError::MapFailed`] or [`GpuError::MapChannelClosed`].
    pub async fn read_back(&self, device: &wgpu::Device) -> GpuResult<Vec<ParticleRecord>> {
        let slice = self.readback.slice(..);
        let (tx, rx) = oneshot::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            // Receiver gone means the tick was dropped; nothing to report to.
            let _ = tx.send(result);
        });
        let _ = device.poll(wgpu::Maintain::Wait);

        rx.await.map_err(|_| GpuError::MapChannelClosed)??;

        let records = {
            let mapped = slice.get_mapped_range();
            decode_particles(&mapped)
        };
        self.readback.unmap();
        Ok(records)
    }
}
