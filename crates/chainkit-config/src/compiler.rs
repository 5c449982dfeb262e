//! Compiler profile
//!
//! An ordered list of compiler releases with their optimizer settings, as
//! handed to the external compilation step.

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Optimizer settings for one compiler release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizerSettings {
    pub enabled: bool,
    /// Expected number of contract invocations; trades bytecode size for
    /// runtime gas. Always at least 1.
    pub runs: u32,
}

/// One compiler release and how to drive it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerSpec {
    pub version: Version,
    pub optimizer: OptimizerSettings,
}

/// Validated, non-empty sequence of compiler specs in definition order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CompilerProfile {
    compilers: Vec<CompilerSpec>,
}

impl CompilerProfile {
    pub fn new(compilers: Vec<CompilerSpec>) -> Result<Self> {
        if compilers.is_empty() {
            return Err(Error::invalid(
                "compilers",
                "at least one compiler must be defined",
            ));
        }
        Ok(Self { compilers })
    }

    pub fn compilers(&self) -> &[CompilerSpec] {
        &self.compilers
    }

    /// The first listed compiler, used when a source does not pin a version
    pub fn primary(&self) -> &CompilerSpec {
        &self.compilers[0]
    }

    pub fn len(&self) -> usize {
        self.compilers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compilers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompilerSpec> {
        self.compilers.iter()
    }
}

impl<'a> IntoIterator for &'a CompilerProfile {
    type Item = &'a CompilerSpec;
    type IntoIter = std::slice::Iter<'a, CompilerSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Parse a compiler version, reporting `field` on failure.
pub(crate) fn parse_version(field: &str, raw: &str) -> Result<Version> {
    Version::parse(raw.trim())
        .map_err(|e| Error::invalid(field, format!("'{raw}' is not a semantic version: {e}")))
}

/// Validate an optimizer run count, reporting `field` on failure.
pub(crate) fn parse_runs(field: &str, raw: i64) -> Result<u32> {
    if raw < 1 {
        return Err(Error::invalid(
            field,
            format!("optimizer runs must be a positive integer, got {raw}"),
        ));
    }
    u32::try_from(raw)
        .map_err(|_| Error::invalid(field, format!("optimizer runs {raw} exceeds {}", u32::MAX)))
}
