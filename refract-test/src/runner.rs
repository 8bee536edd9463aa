use std::ops::{Deref, DerefMut};

use anyhow::{ensure, Context, Result};
use glam::{Mat3, Mat4};
use refract::{
    types::{Capabilities, Handedness},
    LabelCache, LabelCacheConfig, LabelCacheOptions, TransformContext, TransformOptions,
};

use crate::Threshold;

#[derive(Default)]
pub struct TestRunnerBuilder {
    handedness: Option<Handedness>,
    capabilities: Option<Capabilities>,
    max_entries: Option<usize>,
}

impl TestRunnerBuilder {
    pub fn new() -> Self {
        TestRunnerBuilder::default()
    }

    pub fn handedness(mut self, handedness: Handedness) -> Self {
        self.handedness = Some(handedness);
        self
    }

    pub fn capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    pub fn max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries);
        self
    }

    pub fn build(self) -> Result<TestRunner> {
        crate::init_logger();

        let mut config = LabelCacheConfig::default();
        if let Some(capabilities) = self.capabilities {
            config.capabilities = capabilities;
        }
        if let Some(max_entries) = self.max_entries {
            config.max_entries = max_entries;
        }
        let label_options = LabelCacheOptions::try_from(config).context("Invalid label cache configuration")?;

        Ok(TestRunner {
            transforms: TransformContext::new(TransformOptions {
                handedness: self.handedness.unwrap_or_default(),
            }),
            labels: LabelCache::new(label_options),
        })
    }
}

/// A transform context and a label cache, as one frame of a renderer uses
/// them.
pub struct TestRunner {
    pub transforms: TransformContext,
    pub labels: LabelCache,
}

impl Deref for TestRunner {
    type Target = TransformContext;

    fn deref(&self) -> &Self::Target {
        &self.transforms
    }
}

impl DerefMut for TestRunner {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.transforms
    }
}

impl TestRunner {
    pub fn builder() -> TestRunnerBuilder {
        TestRunnerBuilder::new()
    }

    pub fn compare_mat4(name: &str, actual: &Mat4, expected: &Mat4, threshold: Threshold) -> Result<()> {
        println!("Comparing {}", name);
        ensure!(
            threshold.check_mat4(actual, expected),
            "{} mismatch\n  actual: {}\nexpected: {}",
            name,
            actual,
            expected
        );
        Ok(())
    }

    pub fn compare_mat3(name: &str, actual: &Mat3, expected: &Mat3, threshold: Threshold) -> Result<()> {
        println!("Comparing {}", name);
        ensure!(
            threshold.check_mat3(actual, expected),
            "{} mismatch\n  actual: {}\nexpected: {}",
            name,
            actual,
            expected
        );
        Ok(())
    }
}
