use glam::{Quat, Vec3};

use crate::{LightId, Projection, RawTexture2DHandle};

/// Light infinitely far away, shining in one direction.
#[derive(Debug, Clone)]
pub struct LightDirectional {
    id: LightId,
    pub color: Vec3,
    pub intensity: f32,
    pub direction: Vec3,
}

impl LightDirectional {
    pub fn new(direction: Vec3) -> Self {
        Self {
            id: LightId::allocate(),
            color: Vec3::ONE,
            intensity: 1.0,
            direction,
        }
    }

    pub fn id(&self) -> LightId {
        self.id
    }
}

/// Point light with a spherical falloff.
#[derive(Debug, Clone)]
pub struct LightSpherical {
    id: LightId,
    pub color: Vec3,
    pub intensity: f32,
    pub position: Vec3,
    pub radius: f32,
    pub falloff: f32,
}

impl LightSpherical {
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self {
            id: LightId::allocate(),
            color: Vec3::ONE,
            intensity: 1.0,
            position,
            radius,
            falloff: 1.0,
        }
    }

    pub fn id(&self) -> LightId {
        self.id
    }
}

/// Shadow map with a single depth per texel.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowBasic {
    /// The shadow map is `2^size_exponent` texels square.
    pub size_exponent: u8,
    pub depth_bias: f32,
    pub factor_min: f32,
    pub factor_max: f32,
}

impl Default for ShadowBasic {
    fn default() -> Self {
        Self {
            size_exponent: 10,
            depth_bias: 0.001,
            factor_min: 0.2,
            factor_max: 1.0,
        }
    }
}

/// Shadow map storing depth moments for filtered, soft shadows.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowVariance {
    /// The shadow map is `2^size_exponent` texels square.
    pub size_exponent: u8,
    pub minimum_variance: f32,
    pub light_bleed_reduction: f32,
    pub factor_min: f32,
    pub factor_max: f32,
}

impl Default for ShadowVariance {
    fn default() -> Self {
        Self {
            size_exponent: 10,
            minimum_variance: 0.00002,
            light_bleed_reduction: 0.2,
            factor_min: 0.2,
            factor_max: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shadow {
    Basic(ShadowBasic),
    Variance(ShadowVariance),
}

/// Light that projects a texture into the scene through its own view and
/// projection, optionally casting shadows.
///
/// The shadow configuration takes part in label derivation, so it can only be
/// replaced through [`LightProjective::with_shadow`], which gives the light a
/// new identity.
#[derive(Debug, Clone)]
pub struct LightProjective {
    id: LightId,
    shadow: Option<Shadow>,
    pub color: Vec3,
    pub intensity: f32,
    pub position: Vec3,
    pub orientation: Quat,
    pub projection: Projection,
    pub texture: RawTexture2DHandle,
    pub range: f32,
    pub falloff: f32,
}

impl LightProjective {
    pub fn new(position: Vec3, orientation: Quat, projection: Projection, texture: RawTexture2DHandle) -> Self {
        Self {
            id: LightId::allocate(),
            shadow: None,
            color: Vec3::ONE,
            intensity: 1.0,
            position,
            orientation,
            projection,
            texture,
            range: 100.0,
            falloff: 1.0,
        }
    }

    pub fn with_shadow(self, shadow: Option<Shadow>) -> Self {
        Self {
            id: LightId::allocate(),
            shadow,
            ..self
        }
    }

    pub fn id(&self) -> LightId {
        self.id
    }

    pub fn shadow(&self) -> Option<&Shadow> {
        self.shadow.as_ref()
    }
}

#[derive(Debug, Clone)]
pub enum Light {
    Directional(LightDirectional),
    Spherical(LightSpherical),
    Projective(LightProjective),
}

impl Light {
    pub fn id(&self) -> LightId {
        match self {
            Self::Directional(l) => l.id,
            Self::Spherical(l) => l.id,
            Self::Projective(l) => l.id,
        }
    }
}

impl From<LightDirectional> for Light {
    fn from(light: LightDirectional) -> Self {
        Self::Directional(light)
    }
}

impl From<LightSpherical> for Light {
    fn from(light: LightSpherical) -> Self {
        Self::Spherical(light)
    }
}

impl From<LightProjective> for Light {
    fn from(light: LightProjective) -> Self {
        Self::Projective(light)
    }
}
