use glam::Mat3;

use crate::{
    InstanceId, Material, MaterialOpaqueAlphaDepth, MaterialOpaqueRegular, MaterialTranslucentRefractive,
    MaterialTranslucentRegular, MaterialTranslucentSpecularOnly, MeshFeatures, Transform,
};

/// A mesh placed in the world with a material.
///
/// The mesh features and material decide which shader variant draws the
/// instance, and the label cache remembers that decision under the instance's
/// [`InstanceId`]. They are therefore read-only: replacing either with
/// [`Instance::with_material`] or [`Instance::with_mesh`] produces an instance
/// with a new identity. The transform and UV matrix can be changed freely.
#[derive(Debug, Clone)]
pub struct Instance<M> {
    id: InstanceId,
    mesh: MeshFeatures,
    material: M,
    pub transform: Transform,
    /// Transform applied to texture coordinates before the material's own.
    pub uv_matrix: Mat3,
}

impl<M: Material> Instance<M> {
    pub fn new(mesh: MeshFeatures, material: M) -> Self {
        Self {
            id: InstanceId::allocate(),
            mesh,
            material,
            transform: Transform::default(),
            uv_matrix: Mat3::IDENTITY,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_uv_matrix(mut self, uv_matrix: Mat3) -> Self {
        self.uv_matrix = uv_matrix;
        self
    }

    /// Replaces the material. The result is a different instance as far as
    /// cached labels are concerned.
    pub fn with_material<N: Material>(self, material: N) -> Instance<N> {
        Instance {
            id: InstanceId::allocate(),
            mesh: self.mesh,
            material,
            transform: self.transform,
            uv_matrix: self.uv_matrix,
        }
    }

    /// Replaces the mesh features. The result is a different instance as far
    /// as cached labels are concerned.
    pub fn with_mesh(self, mesh: MeshFeatures) -> Self {
        Self {
            id: InstanceId::allocate(),
            mesh,
            ..self
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn mesh(&self) -> MeshFeatures {
        self.mesh
    }

    pub fn material(&self) -> &M {
        &self.material
    }
}

pub type InstanceOpaqueRegular = Instance<MaterialOpaqueRegular>;
pub type InstanceOpaqueAlphaDepth = Instance<MaterialOpaqueAlphaDepth>;
pub type InstanceTranslucentRegular = Instance<MaterialTranslucentRegular>;
pub type InstanceTranslucentRefractive = Instance<MaterialTranslucentRefractive>;
pub type InstanceTranslucentSpecularOnly = Instance<MaterialTranslucentSpecularOnly>;

/// Borrow of any kind of instance.
#[derive(Debug, Copy, Clone)]
pub enum InstanceRef<'a> {
    OpaqueRegular(&'a InstanceOpaqueRegular),
    OpaqueAlphaDepth(&'a InstanceOpaqueAlphaDepth),
    TranslucentRegular(&'a InstanceTranslucentRegular),
    TranslucentRefractive(&'a InstanceTranslucentRefractive),
    TranslucentSpecularOnly(&'a InstanceTranslucentSpecularOnly),
}

impl<'a> InstanceRef<'a> {
    pub fn id(self) -> InstanceId {
        match self {
            Self::OpaqueRegular(i) => i.id,
            Self::OpaqueAlphaDepth(i) => i.id,
            Self::TranslucentRegular(i) => i.id,
            Self::TranslucentRefractive(i) => i.id,
            Self::TranslucentSpecularOnly(i) => i.id,
        }
    }

    pub fn transform(self) -> &'a Transform {
        match self {
            Self::OpaqueRegular(i) => &i.transform,
            Self::OpaqueAlphaDepth(i) => &i.transform,
            Self::TranslucentRegular(i) => &i.transform,
            Self::TranslucentRefractive(i) => &i.transform,
            Self::TranslucentSpecularOnly(i) => &i.transform,
        }
    }

    /// The instance's own UV matrix.
    pub fn uv_matrix(self) -> &'a Mat3 {
        match self {
            Self::OpaqueRegular(i) => &i.uv_matrix,
            Self::OpaqueAlphaDepth(i) => &i.uv_matrix,
            Self::TranslucentRegular(i) => &i.uv_matrix,
            Self::TranslucentRefractive(i) => &i.uv_matrix,
            Self::TranslucentSpecularOnly(i) => &i.uv_matrix,
        }
    }

    /// The UV matrix of the instance's material.
    pub fn material_uv_matrix(self) -> &'a Mat3 {
        match self {
            Self::OpaqueRegular(i) => i.material.uv_matrix(),
            Self::OpaqueAlphaDepth(i) => i.material.uv_matrix(),
            Self::TranslucentRegular(i) => i.material.uv_matrix(),
            Self::TranslucentRefractive(i) => i.material.uv_matrix(),
            Self::TranslucentSpecularOnly(i) => i.material.uv_matrix(),
        }
    }

    pub fn is_opaque(self) -> bool {
        matches!(self, Self::OpaqueRegular(_) | Self::OpaqueAlphaDepth(_))
    }
}

macro_rules! instance_ref_from {
    ($variant:ident, $ty:ty) => {
        impl<'a> From<&'a $ty> for InstanceRef<'a> {
            fn from(instance: &'a $ty) -> Self {
                Self::$variant(instance)
            }
        }
    };
}

instance_ref_from!(OpaqueRegular, InstanceOpaqueRegular);
instance_ref_from!(OpaqueAlphaDepth, InstanceOpaqueAlphaDepth);
instance_ref_from!(TranslucentRegular, InstanceTranslucentRegular);
instance_ref_from!(TranslucentRefractive, InstanceTranslucentRefractive);
instance_ref_from!(TranslucentSpecularOnly, InstanceTranslucentSpecularOnly);
