use glam::Mat4;

use crate::{
    pool::Mat4Slot,
    projection,
    transform::{InstanceScope, ProjectiveLightScope, ScopeState, TransformContext},
    types::{InstanceRef, LightProjective, Projection},
};

/// Handle to the active observer scope.
#[derive(Debug)]
pub struct ObserverScope<'a> {
    pub(super) context: &'a mut TransformContext,
}

impl<'a> ObserverScope<'a> {
    pub(super) fn enter(context: &'a mut TransformContext, view: &Mat4, projection: &Projection) -> Self {
        context.enter(ScopeState::OBSERVER, ScopeState::empty());
        // Constructed before any computation so that a panic below still
        // leaves the scope.
        let mut scope = Self { context };
        let TransformContext {
            handedness,
            pool,
            scratch,
            ..
        } = &mut *scope.context;

        let proj = projection::materialize(projection, *handedness);
        pool.set_mat4(Mat4Slot::View, *view);
        pool.set_mat4(Mat4Slot::Projection, proj);
        pool.set_mat4(Mat4Slot::ViewProjection, proj * *view);

        match scratch.inverse(view) {
            Some(inverse) => pool.set_mat4(Mat4Slot::ViewInverse, *inverse),
            None => panic!("Observer view matrix is not invertible: {}", view),
        }

        scope
    }

    /// Enters the scope of a projective light, runs `body`, and leaves the
    /// scope again, whether `body` returns or unwinds.
    pub fn with_projective_light<T>(
        &mut self,
        light: &LightProjective,
        body: impl FnOnce(&mut ProjectiveLightScope<'_>) -> T,
    ) -> T {
        profiling::scope!("ObserverScope::with_projective_light");

        let mut scope = ProjectiveLightScope::enter(self.context, light);
        body(&mut scope)
    }

    /// Enters the scope of an instance, runs `body`, and leaves the scope
    /// again, whether `body` returns or unwinds.
    pub fn with_instance<'i, T>(
        &mut self,
        instance: impl Into<InstanceRef<'i>>,
        body: impl FnOnce(&mut InstanceScope<'_>) -> T,
    ) -> T {
        profiling::scope!("ObserverScope::with_instance");

        let mut scope = InstanceScope::enter(self.context, instance.into());
        body(&mut scope)
    }
}
