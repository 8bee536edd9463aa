//! Material components and the materials composed from them.
//!
//! Only the parts of a material that influence which shader variant is used
//! are described in detail; the rest is passed through to the graphics layer.

use glam::{Mat3, Vec3, Vec4};

use crate::{RawTexture2DHandle, RawTextureCubeHandle};

/// How the base color of a surface is determined.
#[derive(Debug, Clone, PartialEq)]
pub struct AlbedoComponent {
    pub color: Vec4,
    /// How much of the texture is blended over `color`.
    pub mix: f32,
    pub texture: Option<RawTexture2DHandle>,
}

impl Default for AlbedoComponent {
    fn default() -> Self {
        Self {
            color: Vec4::ONE,
            mix: 0.0,
            texture: None,
        }
    }
}

impl AlbedoComponent {
    pub fn color(color: Vec4) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn textured(texture: RawTexture2DHandle) -> Self {
        Self {
            color: Vec4::ONE,
            mix: 1.0,
            texture: Some(texture),
        }
    }
}

/// Light emitted by the surface itself.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum EmissiveComponent {
    #[default]
    None,
    Constant(f32),
    Mapped {
        emission: f32,
        texture: RawTexture2DHandle,
    },
}

/// Reflection of an environment map.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum EnvironmentComponent {
    #[default]
    None,
    Reflection {
        texture: RawTextureCubeHandle,
        mix: f32,
        /// Per-texel reflection amount. Scales `mix` when present.
        mix_map: Option<RawTexture2DHandle>,
    },
}

/// Where surface normals come from.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum NormalComponent {
    /// Interpolated vertex normals, if the mesh has any.
    #[default]
    Vertex,
    /// Tangent space normal map.
    Mapped(RawTexture2DHandle),
}

/// Specular highlights.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum SpecularComponent {
    #[default]
    None,
    Constant {
        color: Vec3,
        exponent: f32,
    },
    Mapped {
        color: Vec3,
        exponent: f32,
        texture: RawTexture2DHandle,
    },
}

/// Opacity of a translucent surface.
#[derive(Debug, Clone, PartialEq)]
pub enum AlphaComponent {
    Constant(f32),
    /// Opacity grows towards the silhouette: `1 - dot(n, v)`, scaled by
    /// `factor`. Needs normals.
    OneMinusDot { factor: f32 },
    Mapped {
        opacity: f32,
        texture: RawTexture2DHandle,
    },
}

impl Default for AlphaComponent {
    fn default() -> Self {
        Self::Constant(1.0)
    }
}

/// Source of the screen-space offsets a refractive surface applies.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum RefractiveSource {
    /// Offsets follow the surface normals.
    #[default]
    Normals,
    /// Offsets are read from a delta texture.
    Delta(RawTexture2DHandle),
}

/// Refraction of the scene behind a translucent surface.
#[derive(Debug, Clone, PartialEq)]
pub struct RefractiveComponent {
    pub scale: f32,
    /// Only refract the scene where the object itself was rendered to the
    /// refraction mask.
    pub masked: bool,
    pub source: RefractiveSource,
}

impl Default for RefractiveComponent {
    fn default() -> Self {
        Self {
            scale: 0.05,
            masked: false,
            source: RefractiveSource::default(),
        }
    }
}

/// The regular lit-surface components shared by opaque and translucent
/// regular materials.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialRegular {
    pub albedo: AlbedoComponent,
    pub emissive: EmissiveComponent,
    pub environment: EnvironmentComponent,
    pub normal: NormalComponent,
    pub specular: SpecularComponent,
    pub uv_matrix: Mat3,
}

impl Default for MaterialRegular {
    fn default() -> Self {
        Self {
            albedo: AlbedoComponent::default(),
            emissive: EmissiveComponent::default(),
            environment: EnvironmentComponent::default(),
            normal: NormalComponent::default(),
            specular: SpecularComponent::default(),
            uv_matrix: Mat3::IDENTITY,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct MaterialOpaqueRegular {
    pub regular: MaterialRegular,
}

/// Opaque material whose fragments are discarded where albedo alpha falls
/// below a threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialOpaqueAlphaDepth {
    pub regular: MaterialRegular,
    pub alpha_threshold: f32,
}

impl Default for MaterialOpaqueAlphaDepth {
    fn default() -> Self {
        Self {
            regular: MaterialRegular::default(),
            alpha_threshold: 0.5,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct MaterialTranslucentRegular {
    pub regular: MaterialRegular,
    pub alpha: AlphaComponent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialTranslucentRefractive {
    pub normal: NormalComponent,
    pub refractive: RefractiveComponent,
    pub uv_matrix: Mat3,
}

impl Default for MaterialTranslucentRefractive {
    fn default() -> Self {
        Self {
            normal: NormalComponent::default(),
            refractive: RefractiveComponent::default(),
            uv_matrix: Mat3::IDENTITY,
        }
    }
}

/// Translucent material that only contributes specular highlights, such as
/// glass.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialTranslucentSpecularOnly {
    pub alpha: AlphaComponent,
    pub normal: NormalComponent,
    pub specular: SpecularComponent,
    pub uv_matrix: Mat3,
}

impl Default for MaterialTranslucentSpecularOnly {
    fn default() -> Self {
        Self {
            alpha: AlphaComponent::default(),
            normal: NormalComponent::default(),
            specular: SpecularComponent::default(),
            uv_matrix: Mat3::IDENTITY,
        }
    }
}

/// Anything an [`Instance`](crate::Instance) can be rendered with.
pub trait Material: Send + Sync + 'static {
    fn normal(&self) -> &NormalComponent;

    /// Transform applied to texture coordinates after the instance's own.
    fn uv_matrix(&self) -> &Mat3;
}

/// Materials with specular highlights.
pub trait SpecularMaterial: Material {
    fn specular(&self) -> &SpecularComponent;
}

/// Materials built from [`MaterialRegular`].
pub trait RegularMaterial: SpecularMaterial {
    fn regular(&self) -> &MaterialRegular;
}

/// Regular materials that write depth.
pub trait OpaqueMaterial: RegularMaterial {
    /// The alpha threshold below which fragments are discarded, if the
    /// material discards any.
    fn alpha_threshold(&self) -> Option<f32>;
}

macro_rules! regular_material {
    ($name:ty) => {
        impl Material for $name {
            fn normal(&self) -> &NormalComponent {
                &self.regular.normal
            }

            fn uv_matrix(&self) -> &Mat3 {
                &self.regular.uv_matrix
            }
        }

        impl SpecularMaterial for $name {
            fn specular(&self) -> &SpecularComponent {
                &self.regular.specular
            }
        }

        impl RegularMaterial for $name {
            fn regular(&self) -> &MaterialRegular {
                &self.regular
            }
        }
    };
}

regular_material!(MaterialOpaqueRegular);
regular_material!(MaterialOpaqueAlphaDepth);
regular_material!(MaterialTranslucentRegular);

impl OpaqueMaterial for MaterialOpaqueRegular {
    fn alpha_threshold(&self) -> Option<f32> {
        None
    }
}

impl OpaqueMaterial for MaterialOpaqueAlphaDepth {
    fn alpha_threshold(&self) -> Option<f32> {
        Some(self.alpha_threshold)
    }
}

impl Material for MaterialTranslucentRefractive {
    fn normal(&self) -> &NormalComponent {
        &self.normal
    }

    fn uv_matrix(&self) -> &Mat3 {
        &self.uv_matrix
    }
}

impl Material for MaterialTranslucentSpecularOnly {
    fn normal(&self) -> &NormalComponent {
        &self.normal
    }

    fn uv_matrix(&self) -> &Mat3 {
        &self.uv_matrix
    }
}

impl SpecularMaterial for MaterialTranslucentSpecularOnly {
    fn specular(&self) -> &SpecularComponent {
        &self.specular
    }
}
