/// Point projection through a homogeneous [`Matrix`]
use nalgebra::{Point3, Vector4};

use crate::matrix::Matrix;

/// Apply `matrix` to `point` (w = 1) without dividing.
pub fn transform_point(matrix: &Matrix, point: &Point3<f64>) -> Vector4<f64> {
    let m = matrix.as_ref();
    let (x, y, z) = (point.x, point.y, point.z);
    Vector4::new(
        x * m[0] + y * m[4] + z * m[8] + m[12],
        x * m[1] + y * m[5] + z * m[9] + m[13],
        x * m[2] + y * m[6] + z * m[10] + m[14],
        x * m[3] + y * m[7] + z * m[11] + m[15],
    )
}

/// Apply `matrix` to `point` and perform the perspective divide.
///
/// Like [`Matrix::project`] there is no guard: a zero `w` gives non-finite
/// components.
pub fn project_point(matrix: &Matrix, point: &Point3<f64>) -> Point3<f64> {
    let h = transform_point(matrix, point);
    Point3::new(h.x / h.w, h.y / h.w, h.z / h.w)
}

/// Whether the unit XY plane faces away from the viewer after `matrix`.
///
/// Projects the origin and the unit X/Y axes, then checks the sign of the
/// resulting normal's Z component, the same test `backface-visibility: hidden`
/// uses.
pub fn backface_is_hidden(matrix: &Matrix) -> bool {
    let p0 = project_point(matrix, &Point3::origin());
    let p1 = project_point(matrix, &Point3::new(1.0, 0.0, 0.0));
    let p2 = project_point(matrix, &Point3::new(0.0, 1.0, 0.0));

    let normal = (p1 - p0).cross(&(p2 - p0));
    normal.z < 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_projection() {
        let point = Point3::new(3.0, -4.0, 5.0);
        assert_eq!(project_point(&Matrix::new(), &point), point);
    }

    #[test]
    fn test_agrees_with_project() {
        let mut matrix = Matrix::new();
        matrix
            .translate(400.0, 0.0)
            .perspective(1200.0)
            .translate(-400.0, 0.0)
            .rotate_y(-35.0);
        for x in [0.0, 50.0, 200.0] {
            let point = project_point(&matrix, &Point3::new(x, 0.0, 0.0));
            assert!((point.x - matrix.project(x)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_homogeneous_w() {
        let matrix = Matrix::from_values(crate::transform::perspective(100.0));
        let h = transform_point(&matrix, &Point3::new(0.0, 0.0, 50.0));
        assert!((h.w - 0.5).abs() < 1e-12);
        let projected = project_point(&matrix, &Point3::new(10.0, 0.0, 50.0));
        assert!((projected.x - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_w_is_not_finite() {
        let matrix = Matrix::from_values(crate::transform::perspective(64.0));
        let projected = project_point(&matrix, &Point3::new(1.0, 1.0, 64.0));
        assert!(!projected.x.is_finite());
    }

    #[test]
    fn test_backface() {
        assert!(!backface_is_hidden(&Matrix::new()));

        let mut flipped = Matrix::new();
        flipped.rotate_y(180.0);
        assert!(backface_is_hidden(&flipped));

        let mut turned = Matrix::new();
        turned.rotate_y(60.0);
        assert!(!backface_is_hidden(&turned));
    }
}
