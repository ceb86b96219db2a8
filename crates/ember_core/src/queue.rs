//! Job-queue buffer layout.
//!
//! The compute kernel owns the queue algorithm; this module only fixes the
//! shape of the buffers it consumes:
//!
//! ```text
//! binding 0  header          [head, tail, capacity, capacity - 1]     16 B
//! binding 1  slots           capacity × [index, 0, 0, 0]              capacity × 16 B
//! binding 2  input jobs      max_jobs × [opcode, particle, enabled, 0] max_jobs × 16 B
//! binding 3  output jobs     same shape as input jobs
//! binding 4  input payload   max_jobs × payload_words × u32
//! binding 5  output payload  same shape as input payload
//! binding 6  status          max_jobs × u32, zeroed every tick
//! binding 7  params          [job_count, mode, 0, 0]                  16 B
//! ```
//!
//! Two lifetimes live here. [`WorkList`] is the static work description,
//! uploaded once per scene. [`QueueControl`] is the dynamic control state the
//! kernel consumes destructively, re-uploaded every tick.

use bytemuck::{Pod, Zeroable};

use crate::error::{CoreError, CoreResult};

/// Threads per compute workgroup; dispatch width is `ceil(jobs / 64)`.
pub const WORKGROUP_SIZE: u32 = 64;

/// Queue mode written into [`QueueParams`] for scene dispatch.
pub const DISPATCH_MODE: u32 = 1;

/// Smallest power of two `>= value`. `next_power_of_two(0)` is 1.
///
/// # Errors
///
/// Returns [`CoreError::CapacityOverflow`] above `2^31`.
pub fn next_power_of_two(value: u32) -> CoreResult<u32> {
    value
        .max(1)
        .checked_next_power_of_two()
        .ok_or(CoreError::CapacityOverflow { max_jobs: value })
}

/// Queue header: ring cursors plus capacity and wrap mask.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct QueueHeader {
    /// Dequeue cursor.
    pub head: u32,
    /// Enqueue cursor.
    pub tail: u32,
    /// Ring capacity (power of two).
    pub capacity: u32,
    /// `capacity - 1`, for wraparound addressing.
    pub mask: u32,
}

/// One slot of the queue's indirection ring.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct SlotRecord {
    /// Slot index; identity-mapped at reset.
    pub index: u32,
    /// Kernel-owned words.
    pub reserved: [u32; 3],
}

/// A job descriptor in the input/output job arrays.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct JobDescriptor {
    /// Job opcode.
    pub opcode: u32,
    /// Particle record this job updates.
    pub particle_index: u32,
    /// Non-zero when the job is live.
    pub enabled: u32,
    /// Reserved.
    pub reserved: u32,
}

/// Control block read by the enqueue kernel.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct QueueParams {
    /// Number of jobs to enqueue this tick.
    pub job_count: u32,
    /// Queue mode.
    pub mode: u32,
    /// Padding to 16 bytes.
    pub pad: [u32; 2],
}

impl QueueParams {
    /// Params for a tick that enqueues `job_count` jobs.
    #[must_use]
    pub const fn dispatch(job_count: u32) -> Self {
        Self { job_count, mode: DISPATCH_MODE, pad: [0; 2] }
    }
}

/// Queue buffer bindings, in bind-group order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueBinding {
    /// Ring header.
    Header,
    /// Slot ring.
    Slots,
    /// Input job descriptors.
    InputJobs,
    /// Output job descriptors.
    OutputJobs,
    /// Input payload words.
    InputPayload,
    /// Output payload words.
    OutputPayload,
    /// Per-job status words.
    Status,
    /// Control params (uniform).
    Params,
}

impl QueueBinding {
    /// Bind-group order. Reordering breaks every kernel.
    pub const ORDER: [QueueBinding; 8] = [
        QueueBinding::Header,
        QueueBinding::Slots,
        QueueBinding::InputJobs,
        QueueBinding::OutputJobs,
        QueueBinding::InputPayload,
        QueueBinding::OutputPayload,
        QueueBinding::Status,
        QueueBinding::Params,
    ];

    /// Binding index inside the queue bind group.
    #[must_use]
    pub const fn index(self) -> u32 {
        self as u32
    }

    /// True for bindings the kernel only reads from storage.
    #[must_use]
    pub const fn is_read_only(self) -> bool {
        matches!(self, QueueBinding::InputJobs | QueueBinding::InputPayload)
    }

    /// True for the uniform binding.
    #[must_use]
    pub const fn is_uniform(self) -> bool {
        matches!(self, QueueBinding::Params)
    }
}

/// Effect buffer bindings, in bind-group order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectBinding {
    /// Particle records (storage, read-write).
    Particles,
    /// Effect parameter block (uniform).
    Params,
}

impl EffectBinding {
    /// Bind-group order.
    pub const ORDER: [EffectBinding; 2] = [EffectBinding::Particles, EffectBinding::Params];

    /// Binding index inside the effect bind group.
    #[must_use]
    pub const fn index(self) -> u32 {
        self as u32
    }
}

/// Deterministic sizes for one scene's queue buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueLayout {
    max_jobs: u32,
    payload_words: u32,
    capacity: u32,
}

impl QueueLayout {
    /// Header size in bytes.
    pub const HEADER_SIZE: u64 = std::mem::size_of::<QueueHeader>() as u64;
    /// Slot stride in bytes.
    pub const SLOT_STRIDE: u64 = std::mem::size_of::<SlotRecord>() as u64;
    /// Job descriptor stride in bytes.
    pub const JOB_STRIDE: u64 = std::mem::size_of::<JobDescriptor>() as u64;
    /// Control params size in bytes.
    pub const PARAMS_SIZE: u64 = std::mem::size_of::<QueueParams>() as u64;

    /// Sizes a queue for `max_jobs` jobs of `payload_words` words each.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CapacityOverflow`] if `max_jobs` cannot be
    /// rounded to a `u32` power of two.
    pub fn new(max_jobs: u32, payload_words: u32) -> CoreResult<Self> {
        Ok(Self {
            max_jobs,
            payload_words,
            capacity: next_power_of_two(max_jobs)?,
        })
    }

    /// Maximum jobs per tick.
    #[must_use]
    pub const fn max_jobs(&self) -> u32 {
        self.max_jobs
    }

    /// Payload words per job.
    #[must_use]
    pub const fn payload_words(&self) -> u32 {
        self.payload_words
    }

    /// Ring capacity.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Slots buffer size in bytes.
    #[must_use]
    pub const fn slots_size(&self) -> u64 {
        self.capacity as u64 * Self::SLOT_STRIDE
    }

    /// Size of each job descriptor buffer in bytes.
    #[must_use]
    pub const fn jobs_size(&self) -> u64 {
        self.max_jobs as u64 * Self::JOB_STRIDE
    }

    /// Size of each payload buffer in bytes.
    #[must_use]
    pub const fn payload_size(&self) -> u64 {
        self.max_jobs as u64 * self.payload_words as u64 * 4
    }

    /// Status buffer size in bytes.
    #[must_use]
    pub const fn status_size(&self) -> u64 {
        self.max_jobs as u64 * 4
    }

    /// Size in bytes of the buffer behind `binding`.
    #[must_use]
    pub const fn binding_size(&self, binding: QueueBinding) -> u64 {
        match binding {
            QueueBinding::Header => Self::HEADER_SIZE,
            QueueBinding::Slots => self.slots_size(),
            QueueBinding::InputJobs | QueueBinding::OutputJobs => self.jobs_size(),
            QueueBinding::InputPayload | QueueBinding::OutputPayload => self.payload_size(),
            QueueBinding::Status => self.status_size(),
            QueueBinding::Params => Self::PARAMS_SIZE,
        }
    }

    /// Initial header: empty ring.
    #[must_use]
    pub const fn initial_header(&self) -> QueueHeader {
        QueueHeader {
            head: 0,
            tail: 0,
            capacity: self.capacity,
            mask: self.capacity - 1,
        }
    }

    /// Builds the dynamic control state for this layout.
    #[must_use]
    pub fn control(&self) -> QueueControl {
        QueueControl::new(self)
    }
}

/// Control state the kernel consumes destructively: reset every tick.
#[derive(Debug, Clone)]
pub struct QueueControl {
    header: QueueHeader,
    slots: Vec<SlotRecord>,
    status: Vec<u32>,
}

impl QueueControl {
    /// Builds the initial header, identity slot map and zeroed status words.
    #[must_use]
    pub fn new(layout: &QueueLayout) -> Self {
        let slots = (0..layout.capacity())
            .map(|index| SlotRecord { index, reserved: [0; 3] })
            .collect();
        Self {
            header: layout.initial_header(),
            slots,
            status: vec![0; layout.max_jobs() as usize],
        }
    }

    /// Initial header.
    #[must_use]
    pub const fn header(&self) -> &QueueHeader {
        &self.header
    }

    /// Identity-mapped slots.
    #[must_use]
    pub fn slots(&self) -> &[SlotRecord] {
        &self.slots
    }

    /// Header bytes for upload.
    #[must_use]
    pub fn header_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.header)
    }

    /// Slot bytes for upload.
    #[must_use]
    pub fn slots_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.slots)
    }

    /// Zeroed status bytes for upload.
    #[must_use]
    pub fn status_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.status)
    }
}

/// Static work description: uploaded once, re-enqueued every tick.
#[derive(Debug, Clone)]
pub struct WorkList {
    jobs: Vec<JobDescriptor>,
    payloads: Vec<u32>,
}

impl WorkList {
    /// One enabled job per particle, opcode 0, first payload word = index.
    #[must_use]
    pub fn per_particle(layout: &QueueLayout) -> Self {
        let words = layout.payload_words() as usize;
        let jobs = (0..layout.max_jobs())
            .map(|i| JobDescriptor {
                opcode: 0,
                particle_index: i,
                enabled: 1,
                reserved: 0,
            })
            .collect();
        let mut payloads = vec![0u32; layout.max_jobs() as usize * words];
        if words > 0 {
            for (i, chunk) in payloads.chunks_exact_mut(words).enumerate() {
                chunk[0] = i as u32;
            }
        }
        Self { jobs, payloads }
    }

    /// Job descriptors.
    #[must_use]
    pub fn jobs(&self) -> &[JobDescriptor] {
        &self.jobs
    }

    /// Payload words.
    #[must_use]
    pub fn payloads(&self) -> &[u32] {
        &self.payloads
    }

    /// Job bytes for upload.
    #[must_use]
    pub fn jobs_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.jobs)
    }

    /// Payload bytes for upload.
    #[must_use]
    pub fn payload_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.payloads)
    }
}
