//! Scoped computation of the matrices every draw needs.
//!
//! A frame enters an observer scope for the camera, optionally a projective
//! light scope per light, and an instance scope per object:
//!
//! ```
//! use refract::{
//!     types::{
//!         glam::Mat4, InstanceOpaqueRegular, MaterialOpaqueRegular, MeshFeatures, Projection,
//!     },
//!     InstanceMatrices, TransformContext, TransformOptions,
//! };
//!
//! let mut context = TransformContext::new(TransformOptions::default());
//! let instance = InstanceOpaqueRegular::new(MeshFeatures::NORMALS, MaterialOpaqueRegular::default());
//!
//! let model_view = context.with_observer(&Mat4::IDENTITY, &Projection::default(), |observer| {
//!     observer.with_instance(&instance, |instance| *instance.model_view())
//! });
//! assert_eq!(model_view, Mat4::IDENTITY);
//! ```
//!
//! Every scope hands its body a handle that mutably borrows the parent handle,
//! so a scope cannot be entered twice, and a child cannot be entered without
//! its parent. Matrices borrowed from a handle cannot outlive the body, as the
//! pool slots they live in are overwritten by the next scope of the same kind.
//!
//! ```compile_fail
//! # use refract::{types::{glam::Mat4, InstanceOpaqueRegular, MaterialOpaqueRegular, MeshFeatures, Projection}, TransformContext, TransformOptions};
//! # let mut context = TransformContext::new(TransformOptions::default());
//! # let instance = InstanceOpaqueRegular::new(MeshFeatures::NORMALS, MaterialOpaqueRegular::default());
//! context.with_observer(&Mat4::IDENTITY, &Projection::default(), |observer| {
//!     observer.with_instance(&instance, |_| {
//!         // The observer is already borrowed by the active instance scope.
//!         observer.with_instance(&instance, |_| ());
//!     });
//! });
//! ```
//!
//! ```compile_fail
//! # use refract::{types::{glam::Mat4, InstanceOpaqueRegular, MaterialOpaqueRegular, MeshFeatures, Projection}, InstanceMatrices, TransformContext, TransformOptions};
//! # let mut context = TransformContext::new(TransformOptions::default());
//! # let instance = InstanceOpaqueRegular::new(MeshFeatures::NORMALS, MaterialOpaqueRegular::default());
//! let leaked: &Mat4 = context.with_observer(&Mat4::IDENTITY, &Projection::default(), |observer| {
//!     observer.with_instance(&instance, |instance| instance.model())
//! });
//! ```

use glam::{Mat3, Mat4, Vec3};

use crate::{
    options::TransformOptions,
    pool::{Mat3Slot, Mat4Slot, MatrixPool},
    scratch::MatrixScratch,
    types::{Camera, Handedness, Projection},
};

mod instance;
mod light;
mod observer;

pub use instance::*;
pub use light::*;
pub use observer::*;

bitflags::bitflags! {
    /// The scopes currently active on a [`TransformContext`].
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct ScopeState : u8 {
        const OBSERVER =         0b0001;
        const PROJECTIVE_LIGHT = 0b0010;
        const INSTANCE =         0b0100;
    }
}

/// Owner of the matrix pool, and entry point of the scope hierarchy.
#[derive(Debug)]
pub struct TransformContext {
    handedness: Handedness,
    pool: MatrixPool,
    scratch: MatrixScratch,
    active: ScopeState,
}

impl TransformContext {
    pub fn new(options: TransformOptions) -> Self {
        log::debug!("Creating transform context with {:?} handedness", options.handedness);

        Self {
            handedness: options.handedness,
            pool: MatrixPool::new(),
            scratch: MatrixScratch::new(),
            active: ScopeState::empty(),
        }
    }

    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    /// The scopes currently active. Always empty when observable from outside
    /// a scope body; scope handles report their own view of it.
    pub fn active_scopes(&self) -> ScopeState {
        self.active
    }

    /// Enters the observer scope for the given view and projection, runs
    /// `body`, and leaves the scope again, whether `body` returns or unwinds.
    ///
    /// # Panics
    ///
    /// Panics if `view` is not invertible.
    pub fn with_observer<T>(
        &mut self,
        view: &Mat4,
        projection: &Projection,
        body: impl FnOnce(&mut ObserverScope<'_>) -> T,
    ) -> T {
        profiling::scope!("TransformContext::with_observer");

        let mut scope = ObserverScope::enter(self, view, projection);
        body(&mut scope)
    }

    /// [`Self::with_observer`] for a [`Camera`].
    pub fn with_camera<T>(&mut self, camera: &Camera, body: impl FnOnce(&mut ObserverScope<'_>) -> T) -> T {
        self.with_observer(&camera.view, &camera.projection, body)
    }

    fn enter(&mut self, kind: ScopeState, parent: ScopeState) {
        assert!(
            self.active.contains(parent),
            "{:?} scope entered without its parent {:?} scope (active: {:?})",
            kind,
            parent,
            self.active
        );
        assert!(
            !self.active.intersects(kind),
            "{:?} scope entered while already active",
            kind
        );
        self.active.insert(kind);
    }

    fn exit(&mut self, kind: ScopeState) {
        assert!(self.active.contains(kind), "{:?} scope exited while inactive", kind);
        self.active.remove(kind);
    }
}

mod private {
    use crate::pool::MatrixPool;

    pub trait Sealed {
        fn pool(&self) -> &MatrixPool;
    }
}

/// Matrices of the active observer. Available from every scope handle.
pub trait ObserverMatrices: private::Sealed {
    /// World to eye space.
    fn view(&self) -> &Mat4 {
        self.pool().mat4(Mat4Slot::View)
    }

    /// Eye to world space.
    fn view_inverse(&self) -> &Mat4 {
        self.pool().mat4(Mat4Slot::ViewInverse)
    }

    /// Eye to clip space.
    fn projection(&self) -> &Mat4 {
        self.pool().mat4(Mat4Slot::Projection)
    }

    /// World to clip space.
    fn view_projection(&self) -> &Mat4 {
        self.pool().mat4(Mat4Slot::ViewProjection)
    }

    /// World space location of the observer.
    fn observer_position(&self) -> Vec3 {
        self.view_inverse().w_axis.truncate()
    }
}

/// Matrices of the active projective light.
pub trait ProjectiveMatrices: ObserverMatrices {
    /// World to light eye space.
    fn projective_view(&self) -> &Mat4 {
        self.pool().mat4(Mat4Slot::ProjectiveView)
    }

    /// Light eye to light clip space.
    fn projective_projection(&self) -> &Mat4 {
        self.pool().mat4(Mat4Slot::ProjectiveProjection)
    }
}

/// Matrices of the active instance.
pub trait InstanceMatrices: ObserverMatrices {
    /// Object to world space.
    fn model(&self) -> &Mat4 {
        self.pool().mat4(Mat4Slot::Model)
    }

    /// Object to eye space.
    fn model_view(&self) -> &Mat4 {
        self.pool().mat4(Mat4Slot::ModelView)
    }

    /// Object to eye space for normals. Zero if the model-view matrix is
    /// singular.
    fn normal(&self) -> &Mat3 {
        self.pool().mat3(Mat3Slot::Normal)
    }

    /// The instance's UV matrix composed with its material's.
    fn uv(&self) -> &Mat3 {
        self.pool().mat3(Mat3Slot::Uv)
    }
}

macro_rules! scope_common {
    ($name:ident, $kind:expr) => {
        impl<'a> $name<'a> {
            /// The scratch context for matrix math inside this scope.
            pub fn scratch(&mut self) -> &mut MatrixScratch {
                &mut self.context.scratch
            }

            pub fn active_scopes(&self) -> ScopeState {
                self.context.active
            }

            pub fn handedness(&self) -> Handedness {
                self.context.handedness
            }
        }

        impl private::Sealed for $name<'_> {
            fn pool(&self) -> &MatrixPool {
                &self.context.pool
            }
        }

        impl ObserverMatrices for $name<'_> {}

        impl Drop for $name<'_> {
            fn drop(&mut self) {
                self.context.exit($kind);
            }
        }
    };
}

scope_common!(ObserverScope, ScopeState::OBSERVER);
scope_common!(ProjectiveLightScope, ScopeState::PROJECTIVE_LIGHT);
scope_common!(InstanceScope, ScopeState::INSTANCE);
scope_common!(ProjectiveInstanceScope, ScopeState::INSTANCE);

impl ProjectiveMatrices for ProjectiveLightScope<'_> {}
impl InstanceMatrices for InstanceScope<'_> {}
impl InstanceMatrices for ProjectiveInstanceScope<'_> {}
impl ProjectiveMatrices for ProjectiveInstanceScope<'_> {}
