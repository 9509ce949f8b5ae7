mod affine;
mod color;

pub use affine::{
    approx_eq, compose, identity, is_affine, position_of, rotation_x, rotation_y, rotation_z,
    scaling, translation, Transform,
};
pub use color::{lerp_rgb, rgb_from_hex};
