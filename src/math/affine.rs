use glam::{Mat4, Vec3, Vec4};

/// Homogeneous 4x4 affine map. Every constructor in this module keeps the
/// bottom row at `[0, 0, 0, 1]`.
pub type Transform = Mat4;

// Matrices below are written row by row and transposed into glam's
// column-major storage, so they read like the textbook forms.
fn from_rows(rows: [[f32; 4]; 4]) -> Transform {
    Mat4::from_cols_array_2d(&rows).transpose()
}

pub fn identity() -> Transform {
    Mat4::IDENTITY
}

pub fn translation(tx: f32, ty: f32, tz: f32) -> Transform {
    from_rows([
        [1.0, 0.0, 0.0, tx],
        [0.0, 1.0, 0.0, ty],
        [0.0, 0.0, 1.0, tz],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

pub fn scaling(sx: f32, sy: f32, sz: f32) -> Transform {
    from_rows([
        [sx, 0.0, 0.0, 0.0],
        [0.0, sy, 0.0, 0.0],
        [0.0, 0.0, sz, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

pub fn rotation_x(theta: f32) -> Transform {
    let (s, c) = theta.sin_cos();
    from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, c, -s, 0.0],
        [0.0, s, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

pub fn rotation_y(theta: f32) -> Transform {
    let (s, c) = theta.sin_cos();
    from_rows([
        [c, 0.0, s, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [-s, 0.0, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

pub fn rotation_z(theta: f32) -> Transform {
    let (s, c) = theta.sin_cos();
    from_rows([
        [c, -s, 0.0, 0.0],
        [s, c, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns `outer * inner`: `inner` is applied first, `outer` last.
///
/// NaN or infinite entries propagate unchanged; callers own input sanity.
pub fn compose(outer: Transform, inner: Transform) -> Transform {
    outer * inner
}

/// Translation column of `t`, i.e. where the local origin lands.
pub fn position_of(t: Transform) -> Vec3 {
    t.w_axis.truncate()
}

pub fn is_affine(t: Transform, eps: f32) -> bool {
    t.row(3).abs_diff_eq(Vec4::W, eps)
}

pub fn approx_eq(a: Transform, b: Transform, eps: f32) -> bool {
    a.abs_diff_eq(b, eps)
}
