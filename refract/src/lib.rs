//! Per-frame transform scopes and shading-label derivation for a forward
//! renderer.
//!
//! [`TransformContext`] computes the view, projection, model and normal
//! matrices of each nested observer, projective light and instance scope in
//! a fixed pool of slots. [`LabelCache`] classifies instances and lights into
//! the shader variants that draw them, memoizing the result per identity.

pub mod cache;
mod error;
pub mod label;
mod options;
pub mod pool;
pub mod projection;
pub mod scratch;
mod transform;
pub mod util;

pub use error::*;
pub use label::{Label, LabelCache, LabelCacheOccupancy};
pub use options::*;
pub use pool::{Mat3Slot, Mat4Slot, MatrixPool, ScopeKind};
pub use projection::materialize;
pub use scratch::MatrixScratch;
pub use transform::*;

/// Reexport of [`refract_types`] with all types needed to describe a scene.
pub use refract_types as types;
