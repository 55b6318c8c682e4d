/// Software frame buffer — color, depth and stencil planes in host memory.
///
/// Row 0 is the top of the image. Color is RGBA8, depth is `[0, 1]`
/// (1.0 = far), stencil is 8 bits per pixel.

/// RGBA8 pixel
pub type Rgba8 = [u8; 4];

pub struct SoftwareFrameBuffer {
    width: u32,
    height: u32,
    color: Vec<Rgba8>,
    depth: Vec<f32>,
    stencil: Vec<u8>,
}

/// Quantize a normalized color to RGBA8.
pub fn to_rgba8(color: [f32; 4]) -> Rgba8 {
    color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

impl SoftwareFrameBuffer {
    /// Buffers cleared to black, far depth and zero stencil.
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            color: vec![[0, 0, 0, 0]; len],
            depth: vec![1.0; len],
            stencil: vec![0; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reallocate every plane. Contents are reset.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    #[inline]
    pub(crate) fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }

    // ===== CLEARS =====

    pub fn fill_color(&mut self, color: Rgba8) {
        self.color.fill(color);
    }

    pub fn fill_depth(&mut self, depth: f32) {
        self.depth.fill(depth);
    }

    /// Reset the bits of `write_mask` to 0, keep the others.
    pub fn clear_stencil(&mut self, write_mask: u8) {
        for s in &mut self.stencil {
            *s &= !write_mask;
        }
    }

    // ===== PIXEL ACCESS =====

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        self.index(x, y).map(|i| self.color[i])
    }

    pub fn depth_at(&self, x: u32, y: u32) -> Option<f32> {
        self.index(x, y).map(|i| self.depth[i])
    }

    pub fn stencil_at(&self, x: u32, y: u32) -> Option<u8> {
        self.index(x, y).map(|i| self.stencil[i])
    }

    pub(crate) fn color_mut(&mut self, index: usize) -> &mut Rgba8 {
        &mut self.color[index]
    }

    pub(crate) fn depth_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.depth[index]
    }

    pub(crate) fn stencil_mut(&mut self, index: usize) -> &mut u8 {
        &mut self.stencil[index]
    }

    // ===== WHOLE-PLANE VIEWS =====

    /// Color plane as tightly packed RGBA8 bytes, row by row.
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.color)
    }

    pub fn depth_plane(&self) -> &[f32] {
        &self.depth
    }

    pub fn stencil_plane(&self) -> &[u8] {
        &self.stencil
    }

    /// Number of pixels whose stencil equals `value`.
    pub fn count_stencil(&self, value: u8) -> usize {
        self.stencil.iter().filter(|&&s| s == value).count()
    }

    /// Number of pixels whose color equals `color`.
    pub fn count_color(&self, color: Rgba8) -> usize {
        self.color.iter().filter(|&&c| c == color).count()
    }
}

#[cfg(test)]
#[path = "software_frame_buffer_tests.rs"]
mod tests;
