//! Turning projection descriptions into matrices.
//!
//! All matrices map the view volume to a 0..1 depth range, like glam's
//! non-`_gl` constructors.

use glam::{Mat4, Vec4};

use crate::types::{Handedness, Projection};

/// Builds the matrix a [`Projection`] describes.
pub fn materialize(projection: &Projection, handedness: Handedness) -> Mat4 {
    match *projection {
        Projection::Orthographic {
            left,
            right,
            bottom,
            top,
            near,
            far,
        } => match handedness {
            Handedness::Left => Mat4::orthographic_lh(left, right, bottom, top, near, far),
            Handedness::Right => Mat4::orthographic_rh(left, right, bottom, top, near, far),
        },
        Projection::Frustum {
            left,
            right,
            bottom,
            top,
            near,
            far,
        } => frustum(handedness, left, right, bottom, top, near, far),
        Projection::Perspective { vfov, aspect, near, far } => match handedness {
            Handedness::Left => Mat4::perspective_lh(vfov.to_radians(), aspect, near, far),
            Handedness::Right => Mat4::perspective_rh(vfov.to_radians(), aspect, near, far),
        },
        Projection::Raw(proj) => proj,
    }
}

fn frustum(handedness: Handedness, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let width = right - left;
    let height = top - bottom;
    let x = 2.0 * near / width;
    let y = 2.0 * near / height;
    let a = (right + left) / width;
    let b = (top + bottom) / height;

    match handedness {
        Handedness::Left => {
            let depth = far / (far - near);
            Mat4::from_cols(
                Vec4::new(x, 0.0, 0.0, 0.0),
                Vec4::new(0.0, y, 0.0, 0.0),
                Vec4::new(-a, -b, depth, 1.0),
                Vec4::new(0.0, 0.0, -depth * near, 0.0),
            )
        }
        Handedness::Right => {
            let depth = far / (near - far);
            Mat4::from_cols(
                Vec4::new(x, 0.0, 0.0, 0.0),
                Vec4::new(0.0, y, 0.0, 0.0),
                Vec4::new(a, b, depth, -1.0),
                Vec4::new(0.0, 0.0, depth * near, 0.0),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Vec3, Vec4Swizzles};

    use super::materialize;
    use crate::types::{Handedness, Projection};

    fn symmetric_frustum(vfov: f32, aspect: f32, near: f32, far: f32) -> Projection {
        let top = near * (vfov.to_radians() * 0.5).tan();
        let right = top * aspect;
        Projection::Frustum {
            left: -right,
            right,
            bottom: -top,
            top,
            near,
            far,
        }
    }

    #[test]
    fn raw_is_passed_through() {
        let matrix = Mat4::from_cols_array(&[
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0,
        ]);
        assert_eq!(materialize(&Projection::Raw(matrix), Handedness::Left), matrix);
    }

    #[test]
    fn symmetric_frustum_matches_perspective() {
        for handedness in [Handedness::Left, Handedness::Right] {
            let frustum = materialize(&symmetric_frustum(70.0, 1.5, 0.5, 200.0), handedness);
            let perspective = materialize(
                &Projection::Perspective {
                    vfov: 70.0,
                    aspect: 1.5,
                    near: 0.5,
                    far: 200.0,
                },
                handedness,
            );
            assert!(
                frustum.abs_diff_eq(perspective, 1e-5),
                "{:?}: {} != {}",
                handedness,
                frustum,
                perspective
            );
        }
    }

    #[test]
    fn off_center_frustum_maps_corners() {
        let projection = Projection::Frustum {
            left: -1.0,
            right: 3.0,
            bottom: -2.0,
            top: 1.0,
            near: 1.0,
            far: 10.0,
        };
        let left = materialize(&projection, Handedness::Left);
        let corner = left.project_point3(Vec3::new(3.0, 1.0, 1.0));
        assert!(corner.abs_diff_eq(Vec3::new(1.0, 1.0, 0.0), 1e-5), "{}", corner);

        let right = materialize(&projection, Handedness::Right);
        let corner = right * Vec3::new(-10.0, -20.0, -10.0).extend(1.0);
        let corner = corner.xyz() / corner.w;
        assert!(corner.abs_diff_eq(Vec3::new(-1.0, -1.0, 1.0), 1e-5), "{}", corner);
    }
}
