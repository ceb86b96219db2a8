//! Shared GPU device.
//!
//! One [`GpuContext`] per process. Scenes hold it behind an `Arc` and only
//! append to its queue; the two bind-group layouts are created here once
//! and shared by every scene.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{GpuError, GpuResult};
use crate::layout::{create_effect_layout, create_queue_layout};

/// Device, queue and the shared bind-group layouts.
pub struct GpuContext {
    device: wgpu::Device,
    queue: wgpu::Queue,
    adapter_info: wgpu::AdapterInfo,
    queue_layout: wgpu::BindGroupLayout,
    effect_layout: wgpu::BindGroupLayout,
    /// Errors raised by the device outside any call, oldest first.
    device_errors: Arc<Mutex<Vec<String>>>,
}

impl GpuContext {
    /// Requests a high-performance adapter and a device on it.
    ///
    /// # Errors
    ///
    /// [`GpuError::AdapterUnavailable`] when no adapter exists, or
    /// [`GpuError::RequestDevice`].
    pub async fn new() -> GpuResult<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::AdapterUnavailable)?;

        let adapter_info = adapter.get_info();
        tracing::info!(
            adapter = %adapter_info.name,
            backend = ?adapter_info.backend,
            device_type = ?adapter_info.device_type,
            "GPU adapter selected"
        );

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("ember.device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        let device_errors = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&device_errors);
        device.on_uncaptured_error(Box::new(move |err: wgpu::Error| {
            tracing::error!(error = %err, "uncaptured GPU error");
            sink.lock().push(err.to_string());
        }));

        let queue_layout = create_queue_layout(&device);
        let effect_layout = create_effect_layout(&device);

        Ok(Self { device, queue, adapter_info, queue_layout, effect_layout, device_errors })
    }

    /// The device.
    #[must_use]
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// The submission queue.
    #[must_use]
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Adapter description.
    #[must_use]
    pub fn adapter_info(&self) -> &wgpu::AdapterInfo {
        &self.adapter_info
    }

    /// Queue bind-group layout (group 0).
    #[must_use]
    pub fn queue_layout(&self) -> &wgpu::BindGroupLayout {
        &self.queue_layout
    }

    /// Effect bind-group layout (group 1).
    #[must_use]
    pub fn effect_layout(&self) -> &wgpu::BindGroupLayout {
        &self.effect_layout
    }

    /// Fails with the oldest pending device error, draining the rest.
    ///
    /// # Errors
    ///
    /// [`GpuError::DeviceError`] if the device reported anything since the
    /// last check.
    pub fn check_device(&self) -> GpuResult<()> {
        let mut errors = self.device_errors.lock();
        if errors.is_empty() {
            return Ok(());
        }
        let first = errors.remove(0);
        errors.clear();
        Err(GpuError::DeviceError(first))
    }
}

impl std::fmt::Debug for GpuContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GpuContext")
            .field("adapter", &self.adapter_info.name)
            .field("backend", &self.adapter_info.backend)
            .finish_non_exhaustive()
    }
}
