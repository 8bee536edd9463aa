use glam::{Mat3, Mat4};

/// Temporary storage for matrix math done while scopes are active.
///
/// Results are written into the scratch and borrowed out, so a result is only
/// valid until the next call.
#[derive(Debug, Clone)]
pub struct MatrixScratch {
    mat4: Mat4,
    mat3: Mat3,
}

impl Default for MatrixScratch {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixScratch {
    pub fn new() -> Self {
        Self {
            mat4: Mat4::IDENTITY,
            mat3: Mat3::IDENTITY,
        }
    }

    /// Inverts `matrix`, returning `None` if it is singular.
    ///
    /// Only an exactly zero determinant or a non-finite result count as
    /// singular, so uniformly tiny or huge scales still invert.
    pub fn inverse(&mut self, matrix: &Mat4) -> Option<&Mat4> {
        if matrix.determinant() == 0.0 {
            return None;
        }
        let inverse = matrix.inverse();
        if !inverse.is_finite() {
            return None;
        }
        self.mat4 = inverse;
        Some(&self.mat4)
    }

    /// Computes the matrix that transforms normals under `matrix`: the inverse
    /// transpose of its upper-left 3x3. Returns `None` if that 3x3 is singular.
    pub fn normal_matrix(&mut self, matrix: &Mat4) -> Option<&Mat3> {
        let upper = Mat3::from_mat4(*matrix);
        if upper.determinant() == 0.0 {
            return None;
        }
        let normal = upper.inverse().transpose();
        if !normal.is_finite() {
            return None;
        }
        self.mat3 = normal;
        Some(&self.mat3)
    }

    /// Multiplies `lhs * rhs` into the scratch.
    pub fn multiply(&mut self, lhs: &Mat4, rhs: &Mat4) -> &Mat4 {
        self.mat4 = lhs.mul_mat4(rhs);
        &self.mat4
    }
}

#[cfg(test)]
mod tests {
    use glam::{Mat3, Mat4, Quat, Vec3};

    use super::MatrixScratch;

    #[test]
    fn singular_matrix_has_no_inverse() {
        let mut scratch = MatrixScratch::new();
        assert!(scratch.inverse(&Mat4::ZERO).is_none());
        assert!(scratch.normal_matrix(&Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0))).is_none());
    }

    #[test]
    fn small_uniform_scale_is_invertible() {
        let mut scratch = MatrixScratch::new();
        let matrix = Mat4::from_scale(Vec3::splat(1e-4));

        let inverse = *scratch.inverse(&matrix).unwrap();
        assert!((inverse * matrix).abs_diff_eq(Mat4::IDENTITY, 1e-5));

        let normal = *scratch.normal_matrix(&matrix).unwrap();
        assert!(normal.abs_diff_eq(Mat3::from_diagonal(Vec3::splat(1e4)), 1e-1));
    }

    #[test]
    fn non_finite_matrix_has_no_inverse() {
        let mut scratch = MatrixScratch::new();
        assert!(scratch.inverse(&Mat4::from_scale(Vec3::splat(f32::NAN))).is_none());
        assert!(scratch.normal_matrix(&Mat4::from_scale(Vec3::splat(f32::INFINITY))).is_none());
    }

    #[test]
    fn inverse_undoes_matrix() {
        let mut scratch = MatrixScratch::new();
        let matrix = Mat4::from_scale_rotation_translation(
            Vec3::new(2.0, 3.0, 4.0),
            Quat::from_rotation_z(1.0),
            Vec3::new(5.0, -6.0, 7.0),
        );
        let inverse = *scratch.inverse(&matrix).unwrap();
        assert!((inverse * matrix).abs_diff_eq(Mat4::IDENTITY, 1e-5));
    }

    #[test]
    fn normal_matrix_of_rotation_is_rotation() {
        let mut scratch = MatrixScratch::new();
        let rotation = Quat::from_rotation_x(0.7);
        let normal = *scratch.normal_matrix(&Mat4::from_quat(rotation)).unwrap();
        assert!(normal.abs_diff_eq(Mat3::from_quat(rotation), 1e-6));
    }

    #[test]
    fn normal_matrix_keeps_normals_perpendicular_under_non_uniform_scale() {
        let mut scratch = MatrixScratch::new();
        let model = Mat4::from_scale(Vec3::new(4.0, 1.0, 1.0));
        let normal = *scratch.normal_matrix(&model).unwrap();

        // A 45 degree surface in the XY plane.
        let tangent = Vec3::new(1.0, -1.0, 0.0);
        let surface_normal = Vec3::new(1.0, 1.0, 0.0);
        let transformed_tangent = model.transform_vector3(tangent);
        let transformed_normal = normal * surface_normal;
        assert!(transformed_tangent.dot(transformed_normal).abs() < 1e-6);
    }
}
