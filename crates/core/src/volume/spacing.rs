//! Per-axis physical voxel size

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Physical size of one voxel along each image axis.
///
/// Spacings are strictly positive; operators that honor physical units
/// scale their per-axis parameters by the squared spacing of that axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spacing(Vec<f64>);

impl Spacing {
    /// Unit spacing (1.0 on every axis)
    pub fn unit(ndim: usize) -> Self {
        Self(vec![1.0; ndim])
    }

    /// Create a spacing from explicit per-axis values.
    ///
    /// Every value must be finite and strictly positive.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        for (axis, &s) in values.iter().enumerate() {
            if !s.is_finite() || s <= 0.0 {
                return Err(Error::InvalidParameter {
                    name: "spacing",
                    value: format!("{s}"),
                    reason: format!("axis {axis} spacing must be finite and > 0"),
                });
            }
        }
        Ok(Self(values))
    }

    /// Number of axes
    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    /// Spacing along axis `d`
    pub fn axis(&self, d: usize) -> f64 {
        self.0[d]
    }

    /// All per-axis values
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Whether every axis has unit spacing
    pub fn is_unit(&self) -> bool {
        self.0.iter().all(|&s| s == 1.0)
    }
}
