/// CSS transform function matrices in column-major `matrix3d` order
///
/// Every constructor returns a fresh 16-value array laid out as
/// `index = column * 4 + row`, the same layout a `matrix3d(...)` declaration
/// uses.
use std::f64::consts::PI;

/// A raw 4x4 homogeneous matrix, column-major.
pub type Matrix3D = [f64; 16];

/// The identity matrix.
pub const IDENTITY: Matrix3D = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

pub fn identity() -> Matrix3D {
    IDENTITY
}

/// Expand a 2D affine `matrix(a, b, c, d, e, f)` into its 3D form.
pub fn from_affine(values: [f64; 6]) -> Matrix3D {
    let [a, b, c, d, e, f] = values;
    let mut m = IDENTITY;
    m[0] = a;
    m[1] = b;
    m[4] = c;
    m[5] = d;
    m[12] = e;
    m[13] = f;
    m
}

/// CSS `perspective(depth)`.
///
/// Only the `-1/depth` term in row 3, column 2 differs from identity. A depth of
/// zero yields an infinite term; no guard is applied.
pub fn perspective(depth: f64) -> Matrix3D {
    let mut m = IDENTITY;
    m[11] = -1.0 / depth;
    m
}

/// CSS `translate(x, y)`.
pub fn translate(x: f64, y: f64) -> Matrix3D {
    translate3d(x, y, 0.0)
}

/// CSS `translate3d(x, y, z)`.
pub fn translate3d(x: f64, y: f64, z: f64) -> Matrix3D {
    let mut m = IDENTITY;
    m[12] = x;
    m[13] = y;
    m[14] = z;
    m
}

/// CSS `rotateX(deg)`.
pub fn rotate_x(degrees: f64) -> Matrix3D {
    let (sin, cos) = sin_cos(degrees);
    let mut m = IDENTITY;
    m[5] = cos;
    m[6] = sin;
    m[9] = -sin;
    m[10] = cos;
    m
}

/// CSS `rotateY(deg)`.
///
/// Positive angles turn the +X axis towards -Z, matching the platform's
/// right-handed convention.
pub fn rotate_y(degrees: f64) -> Matrix3D {
    let (sin, cos) = sin_cos(degrees);
    let mut m = IDENTITY;
    m[0] = cos;
    m[2] = -sin;
    m[8] = sin;
    m[10] = cos;
    m
}

/// CSS `rotateZ(deg)`, the same as 2D `rotate(deg)`.
pub fn rotate_z(degrees: f64) -> Matrix3D {
    let (sin, cos) = sin_cos(degrees);
    let mut m = IDENTITY;
    m[0] = cos;
    m[1] = sin;
    m[4] = -sin;
    m[5] = cos;
    m
}

/// CSS `scale(sx, sy)`.
pub fn scale(sx: f64, sy: f64) -> Matrix3D {
    scale3d(sx, sy, 1.0)
}

/// CSS `scale3d(sx, sy, sz)`.
pub fn scale3d(sx: f64, sy: f64, sz: f64) -> Matrix3D {
    let mut m = IDENTITY;
    m[0] = sx;
    m[5] = sy;
    m[10] = sz;
    m
}

fn sin_cos(degrees: f64) -> (f64, f64) {
    let theta = PI / 180.0 * degrees;
    (theta.sin(), theta.cos())
}
