//! Parabolic opening (erosion followed by dilation)
//!
//! Removes bright features narrower than the structuring parabola while
//! preserving the shape of larger bright regions. Runs as two in-place
//! stages over one output buffer.

use paramorph_core::{Algorithm, Error, Result, Volume, VoxelElement};

use super::separable::{open_close, ParabolicParams};

/// Opening operator
#[derive(Debug, Clone, Default)]
pub struct Opening;

impl Algorithm for Opening {
    type Input = Volume<f64>;
    type Output = Volume<f64>;
    type Params = ParabolicParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "ParabolicOpening"
    }

    fn description(&self) -> &'static str {
        "Parabolic opening (erosion then dilation) to suppress narrow bright features"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        opening(&input, &params)
    }
}

/// Perform parabolic opening on a volume
///
/// # Arguments
/// * `volume` - Input volume
/// * `params` - Scale per axis, spacing handling and kernel choice
pub fn opening<T: VoxelElement>(
    volume: &Volume<T>,
    params: &ParabolicParams,
) -> Result<Volume<f64>> {
    open_close(volume, params, true)
}
