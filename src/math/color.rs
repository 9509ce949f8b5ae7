use glam::Vec3;

/// Unpacks a `0xRRGGBB` literal into linear `[0, 1]` channels.
pub fn rgb_from_hex(hex: u32) -> Vec3 {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    Vec3::new(r, g, b)
}

pub fn lerp_rgb(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    from + (to - from) * t
}
