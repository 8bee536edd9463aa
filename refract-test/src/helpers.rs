use glam::{Quat, Vec3, Vec4};
use refract::types::{
    AlbedoComponent, AlphaComponent, EnvironmentComponent, InstanceOpaqueAlphaDepth, InstanceOpaqueRegular,
    InstanceTranslucentRefractive, InstanceTranslucentRegular, InstanceTranslucentSpecularOnly, Light,
    LightDirectional, LightProjective, LightSpherical, MaterialOpaqueAlphaDepth, MaterialOpaqueRegular,
    MaterialRegular, MaterialTranslucentRefractive, MaterialTranslucentRegular, MaterialTranslucentSpecularOnly,
    MeshFeatures, NormalComponent, Projection, RawTexture2DHandle, RawTextureCubeHandle, Shadow, SpecularComponent,
};

pub const ALBEDO_TEXTURE: RawTexture2DHandle = RawTexture2DHandle::new(1);
pub const NORMAL_TEXTURE: RawTexture2DHandle = RawTexture2DHandle::new(2);
pub const SPECULAR_TEXTURE: RawTexture2DHandle = RawTexture2DHandle::new(3);
pub const PROJECTED_TEXTURE: RawTexture2DHandle = RawTexture2DHandle::new(4);
pub const ENVIRONMENT_TEXTURE: RawTextureCubeHandle = RawTextureCubeHandle::new(5);

/// Normals, tangents and texture coordinates.
pub fn full_mesh() -> MeshFeatures {
    MeshFeatures::all()
}

pub fn coloured_regular(color: Vec4) -> MaterialRegular {
    MaterialRegular {
        albedo: AlbedoComponent::color(color),
        ..Default::default()
    }
}

/// Textured albedo, a normal map, a specular map and an environment
/// reflection.
pub fn detailed_regular() -> MaterialRegular {
    MaterialRegular {
        albedo: AlbedoComponent::textured(ALBEDO_TEXTURE),
        environment: EnvironmentComponent::Reflection {
            texture: ENVIRONMENT_TEXTURE,
            mix: 0.5,
            mix_map: None,
        },
        normal: NormalComponent::Mapped(NORMAL_TEXTURE),
        specular: SpecularComponent::Mapped {
            color: Vec3::ONE,
            exponent: 64.0,
            texture: SPECULAR_TEXTURE,
        },
        ..Default::default()
    }
}

pub fn opaque(regular: MaterialRegular) -> InstanceOpaqueRegular {
    InstanceOpaqueRegular::new(full_mesh(), MaterialOpaqueRegular { regular })
}

pub fn opaque_alpha_depth(regular: MaterialRegular) -> InstanceOpaqueAlphaDepth {
    InstanceOpaqueAlphaDepth::new(
        full_mesh(),
        MaterialOpaqueAlphaDepth {
            regular,
            ..Default::default()
        },
    )
}

pub fn translucent(regular: MaterialRegular, alpha: AlphaComponent) -> InstanceTranslucentRegular {
    InstanceTranslucentRegular::new(full_mesh(), MaterialTranslucentRegular { regular, alpha })
}

pub fn refractive() -> InstanceTranslucentRefractive {
    InstanceTranslucentRefractive::new(full_mesh(), MaterialTranslucentRefractive::default())
}

pub fn specular_only(alpha: AlphaComponent) -> InstanceTranslucentSpecularOnly {
    InstanceTranslucentSpecularOnly::new(
        full_mesh(),
        MaterialTranslucentSpecularOnly {
            alpha,
            specular: SpecularComponent::Constant {
                color: Vec3::ONE,
                exponent: 32.0,
            },
            ..Default::default()
        },
    )
}

pub fn directional() -> Light {
    LightDirectional::new(Vec3::NEG_Y).into()
}

pub fn spherical() -> Light {
    LightSpherical::new(Vec3::new(0.0, 4.0, 0.0), 10.0).into()
}

/// Projective light at `position` looking down its own +Z axis.
pub fn projective(position: Vec3, orientation: Quat, shadow: Option<Shadow>) -> LightProjective {
    LightProjective::new(
        position,
        orientation,
        Projection::Perspective {
            vfov: 60.0,
            aspect: 1.0,
            near: 0.1,
            far: 50.0,
        },
        PROJECTED_TEXTURE,
    )
    .with_shadow(shadow)
}
