use glam::Mat4;

use crate::{
    pool::Mat4Slot,
    projection,
    transform::{ProjectiveInstanceScope, ScopeState, TransformContext},
    types::{InstanceRef, LightProjective},
};

/// Handle to the active projective light scope.
#[derive(Debug)]
pub struct ProjectiveLightScope<'a> {
    pub(super) context: &'a mut TransformContext,
}

impl<'a> ProjectiveLightScope<'a> {
    pub(super) fn enter(context: &'a mut TransformContext, light: &LightProjective) -> Self {
        context.enter(ScopeState::PROJECTIVE_LIGHT, ScopeState::OBSERVER);
        let mut scope = Self { context };
        let TransformContext { handedness, pool, .. } = &mut *scope.context;

        pool.set_mat4(Mat4Slot::ProjectiveView, light_view(light));
        pool.set_mat4(
            Mat4Slot::ProjectiveProjection,
            projection::materialize(&light.projection, *handedness),
        );

        scope
    }

    /// Enters the scope of an instance lit by this light, runs `body`, and
    /// leaves the scope again, whether `body` returns or unwinds.
    pub fn with_instance<'i, T>(
        &mut self,
        instance: impl Into<InstanceRef<'i>>,
        body: impl FnOnce(&mut ProjectiveInstanceScope<'_>) -> T,
    ) -> T {
        profiling::scope!("ProjectiveLightScope::with_instance");

        let mut scope = ProjectiveInstanceScope::enter(self.context, instance.into());
        body(&mut scope)
    }
}

/// World to light eye space: the inverse of placing the light at its position
/// with its orientation.
fn light_view(light: &LightProjective) -> Mat4 {
    Mat4::from_quat(light.orientation.inverse()) * Mat4::from_translation(-light.position)
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Quat, Vec3};

    use super::light_view;
    use crate::types::{LightProjective, Projection, RawTexture2DHandle};

    #[test]
    fn light_view_inverts_light_placement() {
        let position = Vec3::new(1.0, 5.0, -2.0);
        let orientation = Quat::from_rotation_y(0.8) * Quat::from_rotation_x(-0.3);
        let light = LightProjective::new(position, orientation, Projection::default(), RawTexture2DHandle::new(0));

        let placement = Mat4::from_rotation_translation(orientation, position);
        assert!((light_view(&light) * placement).abs_diff_eq(Mat4::IDENTITY, 1e-5));
        assert!(light_view(&light).transform_point3(position).abs_diff_eq(Vec3::ZERO, 1e-5));
    }
}
