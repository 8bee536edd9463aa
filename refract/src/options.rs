use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::{
    error::OptionsError,
    types::{Capabilities, Handedness},
};

/// Entries per label cache unless configured otherwise.
pub const DEFAULT_MAX_CACHE_ENTRIES: usize = 1024;

const DEFAULT_MAX_ENTRIES: NonZeroUsize = match NonZeroUsize::new(DEFAULT_MAX_CACHE_ENTRIES) {
    Some(max) => max,
    None => panic!("default cache capacity must be non-zero"),
};

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOptions {
    #[serde(default)]
    pub handedness: Handedness,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LabelCacheOptions {
    /// Only consulted when deriving light labels.
    pub capabilities: Capabilities,
    /// Bound applied to every individual cache.
    pub max_entries: NonZeroUsize,
}

impl Default for LabelCacheOptions {
    fn default() -> Self {
        Self {
            capabilities: Capabilities::empty(),
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

/// Serialized form of [`LabelCacheOptions`], as found in configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCacheConfig {
    #[serde(default)]
    pub capabilities: Capabilities,
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_max_entries() -> usize {
    DEFAULT_MAX_CACHE_ENTRIES
}

impl Default for LabelCacheConfig {
    fn default() -> Self {
        Self {
            capabilities: Capabilities::empty(),
            max_entries: DEFAULT_MAX_CACHE_ENTRIES,
        }
    }
}

impl TryFrom<LabelCacheConfig> for LabelCacheOptions {
    type Error = OptionsError;

    fn try_from(config: LabelCacheConfig) -> Result<Self, Self::Error> {
        let max_entries = NonZeroUsize::new(config.max_entries).ok_or(OptionsError::ZeroCacheCapacity)?;
        Ok(Self {
            capabilities: config.capabilities,
            max_entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{LabelCacheConfig, LabelCacheOptions, TransformOptions, DEFAULT_MAX_CACHE_ENTRIES};
    use crate::{
        error::OptionsError,
        types::{Capabilities, Handedness},
    };

    #[test]
    fn empty_config_uses_defaults() {
        let config: LabelCacheConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, LabelCacheConfig::default());

        let options = LabelCacheOptions::try_from(config).unwrap();
        assert_eq!(options, LabelCacheOptions::default());
        assert_eq!(options.max_entries.get(), DEFAULT_MAX_CACHE_ENTRIES);
    }

    #[test]
    fn config_reads_capabilities() {
        let config: LabelCacheConfig =
            serde_json::from_str(r#"{ "capabilities": "DEPTH_TEXTURES", "max_entries": 16 }"#).unwrap();
        let options = LabelCacheOptions::try_from(config).unwrap();
        assert_eq!(options.capabilities, Capabilities::DEPTH_TEXTURES);
        assert_eq!(options.max_entries.get(), 16);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let config = LabelCacheConfig {
            max_entries: 0,
            ..Default::default()
        };
        assert_eq!(LabelCacheOptions::try_from(config), Err(OptionsError::ZeroCacheCapacity));
    }

    #[test]
    fn transform_options_read_handedness() {
        let options: TransformOptions = serde_json::from_str(r#"{ "handedness": "Right" }"#).unwrap();
        assert_eq!(options.handedness, Handedness::Right);
    }
}
