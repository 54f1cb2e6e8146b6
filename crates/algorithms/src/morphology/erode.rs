//! Parabolic erosion
//!
//! Replaces each voxel with the minimum of `f(q) + Σ_d m_d·(p_d − q_d)²`
//! over the whole volume, where the per-axis curvature is
//! `m_d = spacing_d² / (2·σ_d)`. Pulls bright features down toward their
//! surroundings; the exact grayscale dual of [`dilate`](super::dilate).

use paramorph_core::{Algorithm, Error, Result, Volume, VoxelElement};

use super::separable::{morph, MorphMode, ParabolicParams};

/// Erosion operator
#[derive(Debug, Clone, Default)]
pub struct Erode;

impl Algorithm for Erode {
    type Input = Volume<f64>;
    type Output = Volume<f64>;
    type Params = ParabolicParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "ParabolicErode"
    }

    fn description(&self) -> &'static str {
        "Separable parabolic erosion (grayscale minimum under a quadratic structuring function)"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        erode(&input, &params)
    }
}

/// Perform parabolic erosion on a volume
///
/// The result is exact: the separable axis passes compose to the full
/// N-dimensional envelope. Scale 0 on an axis skips it.
///
/// # Arguments
/// * `volume` - Input volume
/// * `params` - Scale per axis, spacing handling and kernel choice
pub fn erode<T: VoxelElement>(volume: &Volume<T>, params: &ParabolicParams) -> Result<Volume<f64>> {
    morph(volume, params, MorphMode::Erode)
}
