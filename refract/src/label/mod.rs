//! Labels classify materials, instances and lights into the shader variant
//! that draws them.
//!
//! Leaf labels each describe one axis (albedo, normals, the light kind, ...).
//! Composite labels bundle the leaves a forward-rendering shader depends on.
//! Every label has a [`Label::code`], such as `BT_NM_SC`, which names the
//! shader variant.

use crate::util::typedefs::SsoString;

mod cache;
mod derive;

pub use cache::*;
pub use derive::*;

pub trait Label: Copy + Eq + std::hash::Hash + std::fmt::Debug {
    /// Shader variant code. Empty if the label contributes nothing.
    fn code(&self) -> SsoString;
}

macro_rules! leaf_label {
    ($(#[$outer:meta])* pub enum $name:ident { $($(#[$inner:meta])* $variant:ident => $code:literal),* $(,)? }) => {
        $(#[$outer])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$inner])* $variant),*
        }

        impl $name {
            pub const ARRAY: &'static [Self] = &[$(Self::$variant),*];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $code),*
                }
            }
        }

        impl Label for $name {
            fn code(&self) -> SsoString {
                SsoString::from(self.as_str())
            }
        }
    };
}

leaf_label! {
    pub enum AlbedoLabel {
        Coloured => "BC",
        Textured => "BT",
    }
}

leaf_label! {
    pub enum EmissiveLabel {
        None => "",
        Constant => "EC",
        Mapped => "EM",
    }
}

leaf_label! {
    pub enum EnvironmentLabel {
        None => "",
        Reflection => "EL",
        /// Reflection amount read from a texture.
        ReflectionMapped => "ELM",
    }
}

leaf_label! {
    pub enum NormalLabel {
        None => "",
        Vertex => "NV",
        Mapped => "NM",
    }
}

leaf_label! {
    pub enum SpecularLabel {
        None => "",
        Constant => "SC",
        Mapped => "SM",
    }
}

leaf_label! {
    /// How an opaque instance writes depth.
    pub enum DepthLabel {
        /// Every fragment is written.
        Constant => "DC",
        /// Fragments are discarded by the albedo color's alpha.
        Uniform => "DU",
        /// Fragments are discarded by the albedo texture's alpha.
        Mapped => "DM",
    }
}

leaf_label! {
    /// Opacity of a translucent instance.
    pub enum AlphaLabel {
        Constant => "AC",
        OneMinusDot => "AD",
        Mapped => "AM",
    }
}

leaf_label! {
    pub enum RefractiveLabel {
        UnmaskedNormals => "RUN",
        UnmaskedDelta => "RUD",
        MaskedNormals => "RMN",
        MaskedDelta => "RMD",
    }
}

leaf_label! {
    pub enum LightLabel {
        Directional => "LD",
        Spherical => "LS",
        Projective => "LP",
        ProjectiveShadowBasic => "LPSB",
        /// Basic shadow map with depth packed into a color attachment.
        ProjectiveShadowBasicPacked => "LPSBP",
        ProjectiveShadowVariance => "LPSV",
    }
}

impl NormalLabel {
    pub fn is_none(self) -> bool {
        self == Self::None
    }
}

/// Joins non-empty codes with `_`.
fn join_codes(codes: &[&str]) -> SsoString {
    let mut buffer = SsoString::new();
    for code in codes.iter().filter(|code| !code.is_empty()) {
        if !buffer.is_empty() {
            buffer.push('_');
        }
        buffer.push_str(code);
    }
    buffer
}

/// Everything a lit regular surface needs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ForwardRegularLabel {
    pub albedo: AlbedoLabel,
    pub emissive: EmissiveLabel,
    pub environment: EnvironmentLabel,
    pub normal: NormalLabel,
    pub specular: SpecularLabel,
}

impl Label for ForwardRegularLabel {
    fn code(&self) -> SsoString {
        join_codes(&[
            self.albedo.as_str(),
            self.emissive.as_str(),
            self.environment.as_str(),
            self.normal.as_str(),
            self.specular.as_str(),
        ])
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ForwardOpaqueUnlitLabel {
    pub albedo: AlbedoLabel,
    pub environment: EnvironmentLabel,
    pub normal: NormalLabel,
}

impl Label for ForwardOpaqueUnlitLabel {
    fn code(&self) -> SsoString {
        join_codes(&[self.albedo.as_str(), self.environment.as_str(), self.normal.as_str()])
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ForwardOpaqueLitLabel {
    pub light: LightLabel,
    pub regular: ForwardRegularLabel,
}

impl Label for ForwardOpaqueLitLabel {
    fn code(&self) -> SsoString {
        // The albedo code is never empty.
        crate::format_sso!("{}_{}", self.light.as_str(), self.regular.code())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ForwardTranslucentRefractiveLabel {
    pub refractive: RefractiveLabel,
    pub normal: NormalLabel,
}

impl Label for ForwardTranslucentRefractiveLabel {
    fn code(&self) -> SsoString {
        join_codes(&[self.refractive.as_str(), self.normal.as_str()])
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ForwardTranslucentRegularUnlitLabel {
    pub albedo: AlbedoLabel,
    pub environment: EnvironmentLabel,
    pub normal: NormalLabel,
    pub alpha: AlphaLabel,
}

impl Label for ForwardTranslucentRegularUnlitLabel {
    fn code(&self) -> SsoString {
        join_codes(&[
            self.albedo.as_str(),
            self.environment.as_str(),
            self.normal.as_str(),
            self.alpha.as_str(),
        ])
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ForwardTranslucentRegularLitLabel {
    pub light: LightLabel,
    pub regular: ForwardRegularLabel,
    pub alpha: AlphaLabel,
}

impl Label for ForwardTranslucentRegularLitLabel {
    fn code(&self) -> SsoString {
        crate::format_sso!("{}_{}_{}", self.light.as_str(), self.regular.code(), self.alpha.as_str())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ForwardTranslucentSpecularOnlyLabel {
    pub normal: NormalLabel,
    pub specular: SpecularLabel,
}

impl Label for ForwardTranslucentSpecularOnlyLabel {
    fn code(&self) -> SsoString {
        join_codes(&[self.normal.as_str(), self.specular.as_str()])
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ForwardTranslucentSpecularOnlyLitLabel {
    pub light: LightLabel,
    pub specular_only: ForwardTranslucentSpecularOnlyLabel,
    pub alpha: AlphaLabel,
}

impl Label for ForwardTranslucentSpecularOnlyLitLabel {
    fn code(&self) -> SsoString {
        join_codes(&[self.light.as_str(), self.specular_only.code().as_str(), self.alpha.as_str()])
    }
}
