//! Fixed storage for every matrix the transform scopes compute.
//!
//! The pool is allocated once with its [`TransformContext`](crate::TransformContext)
//! and written in place on every scope entry, so steady-state rendering never
//! touches the heap.

use glam::{Mat3, Mat4};

/// The kinds of scope, in nesting order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Observer,
    ProjectiveLight,
    Instance,
}

/// 4x4 matrices held by the pool.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Mat4Slot {
    View,
    ViewInverse,
    Projection,
    ViewProjection,
    ProjectiveView,
    ProjectiveProjection,
    Model,
    ModelView,
    ProjectiveModelView,
}

impl Mat4Slot {
    pub const COUNT: usize = 9;

    pub const ARRAY: [Self; Self::COUNT] = [
        Self::View,
        Self::ViewInverse,
        Self::Projection,
        Self::ViewProjection,
        Self::ProjectiveView,
        Self::ProjectiveProjection,
        Self::Model,
        Self::ModelView,
        Self::ProjectiveModelView,
    ];

    /// The scope that writes this slot.
    pub const fn scope(self) -> ScopeKind {
        match self {
            Self::View | Self::ViewInverse | Self::Projection | Self::ViewProjection => ScopeKind::Observer,
            Self::ProjectiveView | Self::ProjectiveProjection => ScopeKind::ProjectiveLight,
            Self::Model | Self::ModelView | Self::ProjectiveModelView => ScopeKind::Instance,
        }
    }
}

/// 3x3 matrices held by the pool.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Mat3Slot {
    Normal,
    Uv,
}

impl Mat3Slot {
    pub const COUNT: usize = 2;

    pub const ARRAY: [Self; Self::COUNT] = [Self::Normal, Self::Uv];

    pub const fn scope(self) -> ScopeKind {
        match self {
            Self::Normal | Self::Uv => ScopeKind::Instance,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatrixPool {
    mat4: [Mat4; Mat4Slot::COUNT],
    mat3: [Mat3; Mat3Slot::COUNT],
}

impl Default for MatrixPool {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixPool {
    pub fn new() -> Self {
        Self {
            mat4: [Mat4::IDENTITY; Mat4Slot::COUNT],
            mat3: [Mat3::IDENTITY; Mat3Slot::COUNT],
        }
    }

    pub fn mat4(&self, slot: Mat4Slot) -> &Mat4 {
        &self.mat4[slot as usize]
    }

    pub fn mat3(&self, slot: Mat3Slot) -> &Mat3 {
        &self.mat3[slot as usize]
    }

    pub(crate) fn mat4_mut(&mut self, slot: Mat4Slot) -> &mut Mat4 {
        &mut self.mat4[slot as usize]
    }

    pub(crate) fn mat3_mut(&mut self, slot: Mat3Slot) -> &mut Mat3 {
        &mut self.mat3[slot as usize]
    }

    pub(crate) fn set_mat4(&mut self, slot: Mat4Slot, value: Mat4) {
        *self.mat4_mut(slot) = value;
    }

    pub(crate) fn set_mat3(&mut self, slot: Mat3Slot, value: Mat3) {
        *self.mat3_mut(slot) = value;
    }
}

#[cfg(test)]
mod tests {
    use glam::{Mat3, Mat4, Vec3};

    use super::{Mat3Slot, Mat4Slot, MatrixPool, ScopeKind};

    #[test]
    fn slot_arrays_are_in_index_order() {
        for (idx, slot) in Mat4Slot::ARRAY.iter().enumerate() {
            assert_eq!(*slot as usize, idx);
        }
        for (idx, slot) in Mat3Slot::ARRAY.iter().enumerate() {
            assert_eq!(*slot as usize, idx);
        }
    }

    #[test]
    fn slots_are_independent() {
        let mut pool = MatrixPool::new();
        let translation = Mat4::from_translation(Vec3::X);
        pool.set_mat4(Mat4Slot::Model, translation);
        pool.set_mat3(Mat3Slot::Uv, Mat3::ZERO);

        for slot in Mat4Slot::ARRAY {
            let expected = if slot == Mat4Slot::Model {
                translation
            } else {
                Mat4::IDENTITY
            };
            assert_eq!(*pool.mat4(slot), expected, "{:?}", slot);
        }
        assert_eq!(*pool.mat3(Mat3Slot::Normal), Mat3::IDENTITY);
        assert_eq!(*pool.mat3(Mat3Slot::Uv), Mat3::ZERO);
    }

    #[test]
    fn only_observer_slots_belong_to_observer() {
        let observer: Vec<_> = Mat4Slot::ARRAY
            .into_iter()
            .filter(|slot| slot.scope() == ScopeKind::Observer)
            .collect();
        assert_eq!(
            observer,
            [
                Mat4Slot::View,
                Mat4Slot::ViewInverse,
                Mat4Slot::Projection,
                Mat4Slot::ViewProjection
            ]
        );
        assert_eq!(Mat3Slot::Normal.scope(), ScopeKind::Instance);
    }
}
