//! Type declarations for the refract transform and shading-label kernel.
//!
//! This is reexported in the refract crate proper and includes everything the
//! kernel reads from the scene: projections, transforms, materials, instances
//! and lights.

use std::{
    fmt::Debug,
    hash::Hash,
    marker::PhantomData,
    sync::atomic::{AtomicUsize, Ordering},
};

/// Reexport of the glam version refract is using.
pub use glam;
use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod instance;
mod light;
mod material;

pub use instance::*;
pub use light::*;
pub use material::*;

/// Non-owning resource handle.
///
/// Textures are allocated by the graphics layer and only referred to here.
/// Instances and lights allocate their own handle on construction, which the
/// label cache uses as their identity.
pub struct RawResourceHandle<T> {
    /// Underlying value of the handle.
    pub idx: usize,
    _phantom: PhantomData<T>,
}

/// Shared between every handle kind so that no two identities ever collide.
static NEXT_HANDLE: AtomicUsize = AtomicUsize::new(0);

impl<T> RawResourceHandle<T> {
    /// Creates a new handle with the given value
    pub const fn new(idx: usize) -> Self {
        Self {
            idx,
            _phantom: PhantomData,
        }
    }

    /// Creates a handle that has never been handed out before.
    pub fn allocate() -> Self {
        Self::new(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed))
    }
}

// Need Debug/Copy/Clone impls that don't require T: Trait.
impl<T> Debug for RawResourceHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawResourceHandle").field("idx", &self.idx).finish()
    }
}

impl<T> Copy for RawResourceHandle<T> {}

impl<T> Clone for RawResourceHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for RawResourceHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.idx == other.idx
    }
}

impl<T> Eq for RawResourceHandle<T> {}

impl<T> Hash for RawResourceHandle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.idx.hash(state);
    }
}

/// Tag type for differentiating Texture2Ds on the type level.
#[doc(hidden)]
pub struct Texture2DTag;
/// Tag type for differentiating TextureCubes on the type level.
#[doc(hidden)]
pub struct TextureCubeTag;
/// Tag type for differentiating Instances on the type level.
#[doc(hidden)]
pub struct InstanceTag;
/// Tag type for differentiating Lights on the type level.
#[doc(hidden)]
pub struct LightTag;

/// Non-owning handle to a Texture2D owned by the graphics layer
pub type RawTexture2DHandle = RawResourceHandle<Texture2DTag>;
/// Non-owning handle to a TextureCube owned by the graphics layer
pub type RawTextureCubeHandle = RawResourceHandle<TextureCubeTag>;
/// Identity of an [`Instance`].
pub type InstanceId = RawResourceHandle<InstanceTag>;
/// Identity of a [`Light`].
pub type LightId = RawResourceHandle<LightTag>;

/// Error returned from projection validation.
#[derive(Debug, Error, PartialEq)]
pub enum ProjectionValidationError {
    #[error("Near plane must be positive and finite, is {near}")]
    InvalidNearPlane { near: f32 },
    #[error("Far plane ({far}) must be finite and further away than the near plane ({near})")]
    InvalidFarPlane { near: f32, far: f32 },
    #[error("Projection has an empty extent: [{min}, {max}]")]
    EmptyExtent { min: f32, max: f32 },
    #[error("Vertical field of view must be within (0, 180) degrees, is {vfov}")]
    InvalidFieldOfView { vfov: f32 },
    #[error("Aspect ratio must be positive and finite, is {aspect}")]
    InvalidAspectRatio { aspect: f32 },
    #[error("Raw projection matrix contains non-finite values")]
    NonFiniteMatrix,
}

/// Describes how a scene is projected into an observer's or a light's clip
/// space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Projection {
    /// Parallel projection of the given box.
    Orthographic {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    },
    /// Perspective projection of an (optionally off-center) view frustum. The
    /// extents are given on the near plane.
    Frustum {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    },
    /// Symmetric perspective projection.
    Perspective {
        /// Vertical field of view in degrees.
        vfov: f32,
        /// Width divided by height.
        aspect: f32,
        near: f32,
        far: f32,
    },
    /// Matrix supplied as-is.
    Raw(Mat4),
}

impl Default for Projection {
    fn default() -> Self {
        Self::Perspective {
            vfov: 60.0,
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Projection {
    /// Checks that the projection describes a non-degenerate volume.
    pub fn validate(&self) -> Result<(), ProjectionValidationError> {
        match *self {
            Self::Orthographic {
                left,
                right,
                bottom,
                top,
                near,
                far,
            } => {
                validate_extent(left, right)?;
                validate_extent(bottom, top)?;
                if !near.is_finite() || !far.is_finite() || far == near {
                    return Err(ProjectionValidationError::InvalidFarPlane { near, far });
                }
                Ok(())
            }
            Self::Frustum {
                left,
                right,
                bottom,
                top,
                near,
                far,
            } => {
                validate_extent(left, right)?;
                validate_extent(bottom, top)?;
                validate_planes(near, far)
            }
            Self::Perspective { vfov, aspect, near, far } => {
                if !(vfov > 0.0 && vfov < 180.0) {
                    return Err(ProjectionValidationError::InvalidFieldOfView { vfov });
                }
                if !(aspect > 0.0 && aspect.is_finite()) {
                    return Err(ProjectionValidationError::InvalidAspectRatio { aspect });
                }
                validate_planes(near, far)
            }
            Self::Raw(matrix) => {
                if matrix.is_finite() {
                    Ok(())
                } else {
                    Err(ProjectionValidationError::NonFiniteMatrix)
                }
            }
        }
    }
}

fn validate_extent(min: f32, max: f32) -> Result<(), ProjectionValidationError> {
    // Written so NaN fails the check.
    if min < max && min.is_finite() && max.is_finite() {
        Ok(())
    } else {
        Err(ProjectionValidationError::EmptyExtent { min, max })
    }
}

fn validate_planes(near: f32, far: f32) -> Result<(), ProjectionValidationError> {
    if !(near > 0.0 && near.is_finite()) {
        return Err(ProjectionValidationError::InvalidNearPlane { near });
    }
    if !(far > near && far.is_finite()) {
        return Err(ProjectionValidationError::InvalidFarPlane { near, far });
    }
    Ok(())
}

/// Describes where an observer is and how it sees the scene.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Camera {
    pub projection: Projection,
    /// View matrix
    pub view: Mat4,
}

/// Object-to-world transform of an instance.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Transform {
    Matrix(Mat4),
    /// Scale, then rotate, then translate.
    OrientationScaleTranslation {
        orientation: Quat,
        scale: Vec3,
        translation: Vec3,
    },
}

impl Default for Transform {
    fn default() -> Self {
        Self::Matrix(Mat4::IDENTITY)
    }
}

impl Transform {
    pub fn to_matrix(&self) -> Mat4 {
        match *self {
            Self::Matrix(matrix) => matrix,
            Self::OrientationScaleTranslation {
                orientation,
                scale,
                translation,
            } => Mat4::from_scale_rotation_translation(scale, orientation, translation),
        }
    }
}

bitflags::bitflags! {
    /// Features of the graphics implementation that change how lights can be
    /// shaded.
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Capabilities : u32 {
        /// Depth textures can be sampled, so basic shadow maps need no packing.
        const DEPTH_TEXTURES =       0b0000_0001;
        /// Floating point color attachments, required for variance shadow maps.
        const FLOAT_RENDER_TARGETS = 0b0000_0010;
    }
}

bitflags::bitflags! {
    /// Vertex attributes present in an instance's mesh.
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct MeshFeatures : u32 {
        const NORMALS =             0b0000_0001;
        const TANGENTS =            0b0000_0010;
        const TEXTURE_COORDINATES = 0b0000_0100;
    }
}

/// Describes the "Handedness" of a given coordinate system. Affects math done
/// in the space.
///
/// While a weird term, if you make your thumb X, your pointer Y,
/// and your middle finger Z, the handedness can be determined by which hand can
/// contort to represent the coordinate system.
///
/// For example
/// +X right, +Y up, +Z _into_ the screen is left handed.
/// +X right, +Y up, +Z _out of_ the screen is right handed.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    #[default]
    Left,
    Right,
}
