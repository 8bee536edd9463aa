use thiserror::Error;

/// Reason why a configuration could not be turned into options.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum OptionsError {
    #[error("Label caches must be able to hold at least one entry")]
    ZeroCacheCapacity,
}
