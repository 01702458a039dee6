/// The flipbook transform engine: one owned 4x4 homogeneous matrix with
/// CSS-style composition and a projected-x query
use std::fmt;
use std::str::FromStr;

use nalgebra::Matrix4;

use crate::css;
use crate::error::{Error, Result};
use crate::transform::{self, Matrix3D};

/// An owned, mutable 4x4 homogeneous transform.
///
/// Values are stored column-major (`index = column * 4 + row`), exactly as a
/// `matrix3d(...)` declaration lists them. Composition methods mutate in place
/// and return `&mut Self` so calls chain:
///
/// ```
/// use flipbook_core::Matrix;
///
/// let x = Matrix::new()
///     .rotate_y(30.0)
///     .translate3d(0.0, 0.0, -200.0)
///     .perspective(800.0)
///     .project(50.0);
/// assert!(x.is_finite());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    m: Matrix3D,
}

impl Matrix {
    /// The identity transform.
    pub fn new() -> Self {
        Self {
            m: transform::identity(),
        }
    }

    /// Take ownership of a copy of `values`. No validation is performed.
    pub fn from_values(values: Matrix3D) -> Self {
        Self { m: values }
    }

    /// A copy of the 16 stored values.
    pub fn values(&self) -> Matrix3D {
        self.m
    }

    /// Compose `other` after the accumulated transform.
    ///
    /// The product is `current · other` in column-vector terms, which is the
    /// order a CSS transform list `current other` is evaluated in. Each entry
    /// is summed left to right so results stay bit-for-bit reproducible.
    pub fn multiply(&mut self, other: &Matrix3D) -> &mut Self {
        let a = &self.m;
        let mut product = [0.0; 16];
        for i in 0..4 {
            let row = [a[i], a[i + 4], a[i + 8], a[i + 12]];
            for j in 0..4 {
                let k = j * 4;
                let col = [other[k], other[k + 1], other[k + 2], other[k + 3]];
                product[i + k] =
                    row[0] * col[0] + row[1] * col[1] + row[2] * col[2] + row[3] * col[3];
            }
        }
        self.m = product;
        self
    }

    pub fn perspective(&mut self, depth: f64) -> &mut Self {
        self.multiply(&transform::perspective(depth))
    }

    pub fn translate(&mut self, x: f64, y: f64) -> &mut Self {
        self.multiply(&transform::translate(x, y))
    }

    pub fn translate3d(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.multiply(&transform::translate3d(x, y, z))
    }

    pub fn rotate_x(&mut self, degrees: f64) -> &mut Self {
        self.multiply(&transform::rotate_x(degrees))
    }

    /// Rotate about the vertical axis; angle in degrees.
    pub fn rotate_y(&mut self, degrees: f64) -> &mut Self {
        self.multiply(&transform::rotate_y(degrees))
    }

    pub fn rotate_z(&mut self, degrees: f64) -> &mut Self {
        self.multiply(&transform::rotate_z(degrees))
    }

    pub fn scale(&mut self, sx: f64, sy: f64) -> &mut Self {
        self.multiply(&transform::scale(sx, sy))
    }

    pub fn scale3d(&mut self, sx: f64, sy: f64, sz: f64) -> &mut Self {
        self.multiply(&transform::scale3d(sx, sy, sz))
    }

    /// Projected horizontal position of the point `(x, 0, 0)`.
    ///
    /// Computes `(x·m0 + m12) / (x·m3 + m15)`. A zero divisor yields an
    /// infinite or NaN result; callers must check `is_finite`.
    pub fn project(&self, x: f64) -> f64 {
        let m = &self.m;
        (x * m[0] + m[12]) / (x * m[3] + m[15])
    }

    /// Copy into an nalgebra matrix (same column-major order).
    pub fn to_matrix4(&self) -> Matrix4<f64> {
        Matrix4::from_column_slice(&self.m)
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Matrix3D> for Matrix {
    fn as_ref(&self) -> &Matrix3D {
        &self.m
    }
}

impl From<Matrix3D> for Matrix {
    fn from(values: Matrix3D) -> Self {
        Self::from_values(values)
    }
}

impl From<Matrix4<f64>> for Matrix {
    fn from(matrix: Matrix4<f64>) -> Self {
        let mut m = [0.0; 16];
        m.copy_from_slice(matrix.as_slice());
        Self { m }
    }
}

impl TryFrom<&[f64]> for Matrix {
    type Error = Error;

    /// Accepts 16 values, or 6 values read as a 2D affine `matrix(a..f)`.
    fn try_from(values: &[f64]) -> Result<Self> {
        match values.len() {
            16 => {
                let mut m = [0.0; 16];
                m.copy_from_slice(values);
                Ok(Self { m })
            }
            6 => {
                let mut affine = [0.0; 6];
                affine.copy_from_slice(values);
                Ok(Self {
                    m: transform::from_affine(affine),
                })
            }
            n => Err(Error::Length(n)),
        }
    }
}

impl fmt::Display for Matrix {
    /// Writes a `matrix3d(...)` declaration.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("matrix3d(")?;
        for (i, v) in self.m.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            css::write_number(f, *v)?;
        }
        f.write_str(")")
    }
}

impl FromStr for Matrix {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        css::parse_transform(s).map(Self::from_values)
    }
}
