//! # Paramorph Core
//!
//! Core types and traits for the paramorph morphology library.
//!
//! This crate provides:
//! - `Volume<T>`: generic N-dimensional scalar image
//! - `Spacing`: per-axis physical voxel size
//! - `VoxelElement`: trait bounding the scalar types a volume can hold
//! - The `Algorithm` trait for a consistent operator API

pub mod error;
pub mod volume;

pub use error::{Error, Result};
pub use volume::{Spacing, Volume, VoxelElement};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::volume::{Spacing, Volume, VoxelElement};
    pub use crate::Algorithm;
}

/// Core trait for all operators in paramorph.
///
/// Operators are pure functions that transform input data according to
/// parameters; there is no cached state and no incremental recomputation.
pub trait Algorithm {
    /// Input type for the operator
    type Input;
    /// Output type for the operator
    type Output;
    /// Parameters controlling operator behavior
    type Params: Default;
    /// Error type for operator execution
    type Error: std::error::Error;

    /// Returns the operator name
    fn name(&self) -> &'static str;

    /// Returns a description of what the operator does
    fn description(&self) -> &'static str;

    /// Execute the operator
    fn execute(
        &self,
        input: Self::Input,
        params: Self::Params,
    ) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
