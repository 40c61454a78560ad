use bytemuck::{Pod, Zeroable};

/// Per-proxy render data read by the JavaScript renderer out of wasm memory.
/// 8 floats = 32 bytes per instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ProxyInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub radius: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub rotation: f32,
}

impl ProxyInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Packed proxy instances, rebuilt once per frame.
pub struct InstanceBuffer {
    instances: Vec<ProxyInstance>,
}

impl InstanceBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: ProxyInstance) {
        self.instances.push(instance);
    }

    pub fn instances(&self) -> &[ProxyInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    /// View the buffer as flat floats.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for InstanceBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxy_instance_is_32_bytes() {
        assert_eq!(std::mem::size_of::<ProxyInstance>(), ProxyInstance::STRIDE_BYTES);
        assert_eq!(ProxyInstance::FLOATS, 8);
    }

    #[test]
    fn buffer_push_and_flatten() {
        let mut buf = InstanceBuffer::new();
        buf.push(ProxyInstance { x: 1.0, radius: 2.0, ..Default::default() });
        buf.push(ProxyInstance::default());
        assert_eq!(buf.instance_count(), 2);
        let floats = buf.as_floats();
        assert_eq!(floats.len(), 16);
        assert_eq!(floats[0], 1.0);
        assert_eq!(floats[3], 2.0);
        buf.clear();
        assert_eq!(buf.instance_count(), 0);
    }
}
