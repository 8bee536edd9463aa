//! Pure derivation of each leaf label from the scene description.
//!
//! These never touch a cache. [`LabelCache`](super::LabelCache) memoizes them
//! and composes the results into composite labels.

use crate::{
    label::{
        AlbedoLabel, AlphaLabel, DepthLabel, EmissiveLabel, EnvironmentLabel, LightLabel, NormalLabel,
        RefractiveLabel, SpecularLabel,
    },
    types::{
        AlbedoComponent, AlphaComponent, Capabilities, EmissiveComponent, EnvironmentComponent, Light, MeshFeatures,
        NormalComponent, RefractiveComponent, RefractiveSource, Shadow, SpecularComponent,
    },
};

fn has_uvs(mesh: MeshFeatures) -> bool {
    mesh.contains(MeshFeatures::TEXTURE_COORDINATES)
}

pub fn derive_albedo(mesh: MeshFeatures, albedo: &AlbedoComponent) -> AlbedoLabel {
    match albedo.texture {
        Some(_) if has_uvs(mesh) => AlbedoLabel::Textured,
        _ => AlbedoLabel::Coloured,
    }
}

pub fn derive_emissive(mesh: MeshFeatures, emissive: &EmissiveComponent) -> EmissiveLabel {
    match emissive {
        EmissiveComponent::None => EmissiveLabel::None,
        EmissiveComponent::Mapped { .. } if has_uvs(mesh) => EmissiveLabel::Mapped,
        EmissiveComponent::Constant(_) | EmissiveComponent::Mapped { .. } => EmissiveLabel::Constant,
    }
}

pub fn derive_environment(mesh: MeshFeatures, environment: &EnvironmentComponent) -> EnvironmentLabel {
    match environment {
        EnvironmentComponent::None => EnvironmentLabel::None,
        EnvironmentComponent::Reflection {
            mix_map: Some(_), ..
        } if has_uvs(mesh) => EnvironmentLabel::ReflectionMapped,
        EnvironmentComponent::Reflection { .. } => EnvironmentLabel::Reflection,
    }
}

/// Normal maps need the full tangent frame as well as coordinates to sample
/// the map with.
pub fn derive_normal(mesh: MeshFeatures, normal: &NormalComponent) -> NormalLabel {
    let tangent_frame = MeshFeatures::NORMALS | MeshFeatures::TANGENTS | MeshFeatures::TEXTURE_COORDINATES;
    match normal {
        NormalComponent::Mapped(_) if mesh.contains(tangent_frame) => NormalLabel::Mapped,
        _ if mesh.contains(MeshFeatures::NORMALS) => NormalLabel::Vertex,
        _ => NormalLabel::None,
    }
}

pub fn derive_specular(mesh: MeshFeatures, specular: &SpecularComponent) -> SpecularLabel {
    match specular {
        SpecularComponent::None => SpecularLabel::None,
        SpecularComponent::Mapped { .. } if has_uvs(mesh) => SpecularLabel::Mapped,
        SpecularComponent::Constant { .. } | SpecularComponent::Mapped { .. } => SpecularLabel::Constant,
    }
}

/// `alpha_threshold` is `None` for materials that never discard fragments.
pub fn derive_depth(albedo: AlbedoLabel, alpha_threshold: Option<f32>) -> DepthLabel {
    match (alpha_threshold, albedo) {
        (None, _) => DepthLabel::Constant,
        (Some(_), AlbedoLabel::Textured) => DepthLabel::Mapped,
        (Some(_), AlbedoLabel::Coloured) => DepthLabel::Uniform,
    }
}

pub fn derive_alpha(mesh: MeshFeatures, normal: NormalLabel, alpha: &AlphaComponent) -> AlphaLabel {
    match alpha {
        AlphaComponent::OneMinusDot { .. } if !normal.is_none() => AlphaLabel::OneMinusDot,
        AlphaComponent::Mapped { .. } if has_uvs(mesh) => AlphaLabel::Mapped,
        AlphaComponent::Constant(_) | AlphaComponent::OneMinusDot { .. } | AlphaComponent::Mapped { .. } => {
            AlphaLabel::Constant
        }
    }
}

pub fn derive_refractive(refractive: &RefractiveComponent) -> RefractiveLabel {
    match (refractive.masked, &refractive.source) {
        (false, RefractiveSource::Normals) => RefractiveLabel::UnmaskedNormals,
        (false, RefractiveSource::Delta(_)) => RefractiveLabel::UnmaskedDelta,
        (true, RefractiveSource::Normals) => RefractiveLabel::MaskedNormals,
        (true, RefractiveSource::Delta(_)) => RefractiveLabel::MaskedDelta,
    }
}

/// Shadow maps fall back to cheaper encodings when the graphics
/// implementation lacks the capability the better one needs.
pub fn derive_light(light: &Light, capabilities: Capabilities) -> LightLabel {
    let basic = if capabilities.contains(Capabilities::DEPTH_TEXTURES) {
        LightLabel::ProjectiveShadowBasic
    } else {
        LightLabel::ProjectiveShadowBasicPacked
    };

    match light {
        Light::Directional(_) => LightLabel::Directional,
        Light::Spherical(_) => LightLabel::Spherical,
        Light::Projective(projective) => match projective.shadow() {
            None => LightLabel::Projective,
            Some(Shadow::Basic(_)) => basic,
            Some(Shadow::Variance(_)) if capabilities.contains(Capabilities::FLOAT_RENDER_TARGETS) => {
                LightLabel::ProjectiveShadowVariance
            }
            Some(Shadow::Variance(_)) => basic,
        },
    }
}
