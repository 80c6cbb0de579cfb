//! Cleaning operations that can be selected for a cleaning pass.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SieveError};

/// Every selectable cleaning option, by its public id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationId {
    RemoveNa,
    FillMean,
    FillMedian,
    Interpolate,
    RemoveDuplicates,
    KeepFirst,
    RemoveOutliers,
    CapOutliers,
    Normalize,
    Standardize,
    LogTransform,
}

/// Grouping used when listing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationCategory {
    MissingValues,
    Duplicates,
    Outliers,
    Transformations,
}

impl OperationId {
    /// The full catalog, in display order.
    pub const ALL: [OperationId; 11] = [
        OperationId::RemoveNa,
        OperationId::FillMean,
        OperationId::FillMedian,
        OperationId::Interpolate,
        OperationId::RemoveDuplicates,
        OperationId::KeepFirst,
        OperationId::RemoveOutliers,
        OperationId::CapOutliers,
        OperationId::Normalize,
        OperationId::Standardize,
        OperationId::LogTransform,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationId::RemoveNa => "remove-na",
            OperationId::FillMean => "fill-mean",
            OperationId::FillMedian => "fill-median",
            OperationId::Interpolate => "interpolate",
            OperationId::RemoveDuplicates => "remove-duplicates",
            OperationId::KeepFirst => "keep-first",
            OperationId::RemoveOutliers => "remove-outliers",
            OperationId::CapOutliers => "cap-outliers",
            OperationId::Normalize => "normalize",
            OperationId::Standardize => "standardize",
            OperationId::LogTransform => "log-transform",
        }
    }

    pub fn category(&self) -> OperationCategory {
        match self {
            OperationId::RemoveNa
            | OperationId::FillMean
            | OperationId::FillMedian
            | OperationId::Interpolate => OperationCategory::MissingValues,
            OperationId::RemoveDuplicates | OperationId::KeepFirst => OperationCategory::Duplicates,
            OperationId::RemoveOutliers | OperationId::CapOutliers => OperationCategory::Outliers,
            OperationId::Normalize | OperationId::Standardize | OperationId::LogTransform => {
                OperationCategory::Transformations
            }
        }
    }

    /// Human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            OperationId::RemoveNa => "Remove rows with null values",
            OperationId::FillMean => "Fill nulls with the column mean",
            OperationId::FillMedian => "Fill nulls with the column median",
            OperationId::Interpolate => "Linear interpolation of nulls",
            OperationId::RemoveDuplicates => "Remove duplicate rows",
            OperationId::KeepFirst => "Keep the first occurrence of duplicates",
            OperationId::RemoveOutliers => "Remove outliers (z-score > 3)",
            OperationId::CapOutliers => "Cap extreme values (IQR)",
            OperationId::Normalize => "Min-max normalization (0-1)",
            OperationId::Standardize => "Standardization (z-score)",
            OperationId::LogTransform => "Logarithmic transform",
        }
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationId {
    type Err = SieveError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        OperationId::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| SieveError::UnknownOperation(s.to_string()))
    }
}

/// Operations with defined row-removal semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StructuralOp {
    RemoveNa,
    RemoveDuplicates,
}

/// A cleaning operation as the engine sees it.
///
/// `Unimplemented` operations are accepted intents with no numeric contract;
/// the engine never lets them alter its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum CleaningOperation {
    Structural(StructuralOp),
    Unimplemented(OperationId),
}

impl CleaningOperation {
    pub fn id(&self) -> OperationId {
        match self {
            CleaningOperation::Structural(StructuralOp::RemoveNa) => OperationId::RemoveNa,
            CleaningOperation::Structural(StructuralOp::RemoveDuplicates) => {
                OperationId::RemoveDuplicates
            }
            CleaningOperation::Unimplemented(id) => *id,
        }
    }
}

impl From<OperationId> for CleaningOperation {
    fn from(id: OperationId) -> Self {
        match id {
            OperationId::RemoveNa => CleaningOperation::Structural(StructuralOp::RemoveNa),
            OperationId::RemoveDuplicates => {
                CleaningOperation::Structural(StructuralOp::RemoveDuplicates)
            }
            other => CleaningOperation::Unimplemented(other),
        }
    }
}

/// The selected operations for one cleaning pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationSet {
    operations: BTreeSet<CleaningOperation>,
}

impl OperationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a list of operation ids, failing on the first unknown one.
    pub fn parse<S: AsRef<str>>(ids: &[S]) -> Result<Self> {
        ids.iter()
            .map(|s| s.as_ref().parse::<OperationId>())
            .collect::<Result<Vec<_>>>()
            .map(Self::from_ids)
    }

    pub fn from_ids(ids: impl IntoIterator<Item = OperationId>) -> Self {
        Self {
            operations: ids.into_iter().map(CleaningOperation::from).collect(),
        }
    }

    pub fn with(mut self, id: OperationId) -> Self {
        self.operations.insert(id.into());
        self
    }

    pub fn contains(&self, op: StructuralOp) -> bool {
        self.operations.contains(&CleaningOperation::Structural(op))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CleaningOperation> {
        self.operations.iter()
    }

    /// Ids of the selected operations, in catalog order.
    pub fn ids(&self) -> Vec<OperationId> {
        let mut ids: Vec<OperationId> = self.operations.iter().map(|op| op.id()).collect();
        ids.sort();
        ids
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }
}

impl FromIterator<OperationId> for OperationSet {
    fn from_iter<I: IntoIterator<Item = OperationId>>(iter: I) -> Self {
        Self::from_ids(iter)
    }
}
