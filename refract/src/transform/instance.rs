use glam::{Mat3, Mat4};

use crate::{
    pool::{Mat3Slot, Mat4Slot},
    transform::{ScopeState, TransformContext},
    types::InstanceRef,
};

/// Handle to the active instance scope under an observer.
#[derive(Debug)]
pub struct InstanceScope<'a> {
    pub(super) context: &'a mut TransformContext,
}

impl<'a> InstanceScope<'a> {
    pub(super) fn enter(context: &'a mut TransformContext, instance: InstanceRef<'_>) -> Self {
        context.enter(ScopeState::INSTANCE, ScopeState::OBSERVER);
        let mut scope = Self { context };
        compute_instance(scope.context, instance);
        scope
    }
}

/// Handle to the active instance scope under a projective light.
#[derive(Debug)]
pub struct ProjectiveInstanceScope<'a> {
    pub(super) context: &'a mut TransformContext,
}

impl<'a> ProjectiveInstanceScope<'a> {
    pub(super) fn enter(context: &'a mut TransformContext, instance: InstanceRef<'_>) -> Self {
        context.enter(ScopeState::INSTANCE, ScopeState::OBSERVER | ScopeState::PROJECTIVE_LIGHT);
        let mut scope = Self { context };
        compute_instance(scope.context, instance);

        let pool = &mut scope.context.pool;
        let projective_model_view = *pool.mat4(Mat4Slot::ProjectiveView) * *pool.mat4(Mat4Slot::Model);
        pool.set_mat4(Mat4Slot::ProjectiveModelView, projective_model_view);

        scope
    }

    /// Object to light eye space.
    pub fn projective_model_view(&self) -> &Mat4 {
        self.context.pool.mat4(Mat4Slot::ProjectiveModelView)
    }
}

fn compute_instance(context: &mut TransformContext, instance: InstanceRef<'_>) {
    let TransformContext { pool, scratch, .. } = context;

    let model = instance.transform().to_matrix();
    let model_view = *pool.mat4(Mat4Slot::View) * model;
    pool.set_mat4(Mat4Slot::Model, model);
    pool.set_mat4(Mat4Slot::ModelView, model_view);

    let normal = scratch.normal_matrix(&model_view).copied().unwrap_or(Mat3::ZERO);
    pool.set_mat3(Mat3Slot::Normal, normal);

    pool.set_mat3(Mat3Slot::Uv, *instance.uv_matrix() * *instance.material_uv_matrix());
}
