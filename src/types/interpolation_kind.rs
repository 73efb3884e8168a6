//! This module defines the canonical, type-safe representation of the
//! interpolation kinds understood by the routine layer and the persisted
//! result schema.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CurveCacheError;

/// The canonical, internal representation of an interpolation kind.
///
/// This enum replaces the fragile string-based kind names of the persisted
/// schema with a safe enum, enabling compile-time checks and eliminating an
/// entire class of runtime errors. The string form produced by `Display` is
/// what lands in the `interpolation_type` column.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationKind {
    Linear,
    Polynomial,
    Spline,
    Lagrange,
}

impl InterpolationKind {
    /// Parses the persisted column form back into an `InterpolationKind`.
    pub fn from_name(name: &str) -> Result<Self, CurveCacheError> {
        match name {
            "linear" => Ok(Self::Linear),
            "polynomial" => Ok(Self::Polynomial),
            "spline" => Ok(Self::Spline),
            "lagrange" => Ok(Self::Lagrange),
            other => Err(CurveCacheError::UnknownKind(other.to_string())),
        }
    }

    /// The canonical column form. Inverse of [`InterpolationKind::from_name`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Polynomial => "polynomial",
            Self::Spline => "spline",
            Self::Lagrange => "lagrange",
        }
    }

    /// Returns `true` if the kind consumes the `polynomial_degree` request
    /// field.
    pub fn uses_degree(&self) -> bool {
        matches!(self, Self::Polynomial)
    }
}

/// Provides the canonical string representation for an `InterpolationKind`.
impl fmt::Display for InterpolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // These string representations are part of the persisted contract.
        f.write_str(self.as_str())
    }
}

impl FromStr for InterpolationKind {
    type Err = CurveCacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
