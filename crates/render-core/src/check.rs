//! Check reports
//!
//! Aggregates the verify results of several managed files into one status.

use serde::{Deserialize, Serialize};

use crate::managed::{FileStatus, ManagedFile};
use crate::Result;

/// Overall status of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// Every target matches its rendering
    Healthy,
    /// Some targets do not exist yet
    Missing,
    /// Some targets differ in content or mode
    Drifted,
}

/// A target that is missing or has drifted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftItem {
    /// Template the target is rendered from
    pub source: String,
    pub file: String,
    pub status: FileStatus,
}

/// Report from checking managed files against disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    pub status: CheckStatus,
    pub drifted: Vec<DriftItem>,
    pub missing: Vec<DriftItem>,
}

impl CheckReport {
    /// Create a healthy check report with no issues
    pub fn healthy() -> Self {
        Self {
            status: CheckStatus::Healthy,
            drifted: Vec::new(),
            missing: Vec::new(),
        }
    }

    /// Verify each file and collect the results.
    pub fn collect<'a>(files: impl IntoIterator<Item = &'a ManagedFile>) -> Result<Self> {
        let mut report = Self::healthy();
        for file in files {
            let status = file.verify()?;
            report = report.merge(Self::single(file, status));
        }
        Ok(report)
    }

    /// Report for one file with a known status.
    pub fn single(file: &ManagedFile, status: FileStatus) -> Self {
        let item = || DriftItem {
            source: file.source.clone(),
            file: file.target.to_string(),
            status,
        };
        match status {
            FileStatus::UpToDate => Self::healthy(),
            FileStatus::Missing => Self {
                status: CheckStatus::Missing,
                drifted: Vec::new(),
                missing: vec![item()],
            },
            FileStatus::ContentDrift | FileStatus::ModeDrift => Self {
                status: CheckStatus::Drifted,
                drifted: vec![item()],
                missing: Vec::new(),
            },
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == CheckStatus::Healthy
    }

    /// Merge two check reports, combining their issues
    ///
    /// The resulting status is the worst of the two:
    /// Drifted > Missing > Healthy
    pub fn merge(mut self, other: CheckReport) -> Self {
        self.drifted.extend(other.drifted);
        self.missing.extend(other.missing);

        self.status = match (self.status, other.status) {
            (CheckStatus::Drifted, _) | (_, CheckStatus::Drifted) => CheckStatus::Drifted,
            (CheckStatus::Missing, _) | (_, CheckStatus::Missing) => CheckStatus::Missing,
            (CheckStatus::Healthy, CheckStatus::Healthy) => CheckStatus::Healthy,
        };

        self
    }
}
