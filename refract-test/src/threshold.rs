use glam::{Mat3, Mat4};

/// How close a computed matrix must be to the expected one.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Threshold {
    /// Bit-for-bit equality.
    Exact,
    /// Largest allowed difference of any single element.
    Max(f32),
}

impl Threshold {
    fn check_elements(&self, actual: &[f32], expected: &[f32]) -> bool {
        let max_difference = actual
            .iter()
            .zip(expected)
            .map(|(a, e)| (a - e).abs())
            .fold(0.0_f32, f32::max);

        let within = match *self {
            Self::Exact => actual == expected,
            Self::Max(v) => max_difference <= v,
        };
        println!(
            "    Expected difference ({:.6}) to be within {:?}: {}",
            max_difference,
            self,
            if within { "PASS" } else { "FAIL" }
        );
        within
    }

    pub fn check_mat4(&self, actual: &Mat4, expected: &Mat4) -> bool {
        self.check_elements(&actual.to_cols_array(), &expected.to_cols_array())
    }

    pub fn check_mat3(&self, actual: &Mat3, expected: &Mat3) -> bool {
        self.check_elements(&actual.to_cols_array(), &expected.to_cols_array())
    }
}
