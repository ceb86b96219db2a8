//! Bind-group layouts for the queue and effect groups.
//!
//! Binding order is the kernel contract:
//!
//! ```text
//! group 0 (queue):  0 header   1 slots   2 input jobs (ro)   3 output jobs
//!                   4 input payload (ro) 5 output payload    6 status
//!                   7 params (uniform)
//! group 1 (effect): 0 particles          1 effect params (uniform)
//! ```

use ember_core::{EffectBinding, QueueBinding};

/// Buffer binding type for a queue binding.
#[must_use]
pub fn queue_binding_type(binding: QueueBinding) -> wgpu::BufferBindingType {
    if binding.is_uniform() {
        wgpu::BufferBindingType::Uniform
    } else {
        wgpu::BufferBindingType::Storage { read_only: binding.is_read_only() }
    }
}

/// Buffer binding type for an effect binding.
#[must_use]
pub fn effect_binding_type(binding: EffectBinding) -> wgpu::BufferBindingType {
    match binding {
        EffectBinding::Particles => wgpu::BufferBindingType::Storage { read_only: false },
        EffectBinding::Params => wgpu::BufferBindingType::Uniform,
    }
}

fn compute_entry(binding: u32, ty: wgpu::BufferBindingType) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::Buffer { ty, has_dynamic_offset: false, min_binding_size: None },
        count: None,
    }
}

/// Layout entries of the queue group, in binding order.
#[must_use]
pub fn queue_layout_entries() -> [wgpu::BindGroupLayoutEntry; 8] {
    QueueBinding::ORDER.map(|b| compute_entry(b.index(), queue_binding_type(b)))
}

/// Layout entries of the effect group, in binding order.
#[must_use]
pub fn effect_layout_entries() -> [wgpu::BindGroupLayoutEntry; 2] {
    EffectBinding::ORDER.map(|b| compute_entry(b.index(), effect_binding_type(b)))
}

/// Creates the queue bind-group layout.
#[must_use]
pub fn create_queue_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("particles.queue.layout"),
        entries: &queue_layout_entries(),
    })
}

/// Creates the effect bind-group layout.
#[must_use]
pub fn create_effect_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("particles.effect.layout"),
        entries: &effect_layout_entries(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_type(entry: &wgpu::BindGroupLayoutEntry) -> wgpu::BufferBindingType {
        match entry.ty {
            wgpu::BindingType::Buffer { ty, .. } => ty,
            ref other => panic!("not a buffer binding: {other:?}"),
        }
    }

    #[test]
    fn test_queue_entries_follow_kernel_contract() {
        use wgpu::BufferBindingType::{Storage, Uniform};

        let entries = queue_layout_entries();
        let expected = [
            Storage { read_only: false },
            Storage { read_only: false },
            Storage { read_only: true },
            Storage { read_only: false },
            Storage { read_only: true },
            Storage { read_only: false },
            Storage { read_only: false },
            Uniform,
        ];
        for (i, (entry, ty)) in entries.iter().zip(expected).enumerate() {
            assert_eq!(entry.binding, i as u32);
            assert_eq!(buffer_type(entry), ty, "binding {i}");
            assert_eq!(entry.visibility, wgpu::ShaderStages::COMPUTE);
        }
    }

    #[test]
    fn test_effect_entries() {
        let entries = effect_layout_entries();
        assert_eq!(entries[0].binding, 0);
        assert_eq!(buffer_type(&entries[0]), wgpu::BufferBindingType::Storage { read_only: false });
        assert_eq!(entries[1].binding, 1);
        assert_eq!(buffer_type(&entries[1]), wgpu::BufferBindingType::Uniform);
    }
}
