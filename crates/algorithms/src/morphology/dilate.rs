//! Parabolic dilation
//!
//! Replaces each voxel with the maximum of `f(q) − Σ_d m_d·(p_d − q_d)²`
//! over the whole volume, where the per-axis curvature is
//! `m_d = spacing_d² / (2·σ_d)`. Spreads bright features outward under a
//! quadratic profile.

use paramorph_core::{Algorithm, Error, Result, Volume, VoxelElement};

use super::separable::{morph, MorphMode, ParabolicParams};

/// Dilation operator
#[derive(Debug, Clone, Default)]
pub struct Dilate;

impl Algorithm for Dilate {
    type Input = Volume<f64>;
    type Output = Volume<f64>;
    type Params = ParabolicParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "ParabolicDilate"
    }

    fn description(&self) -> &'static str {
        "Separable parabolic dilation (grayscale maximum under a quadratic structuring function)"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        dilate(&input, &params)
    }
}

/// Perform parabolic dilation on a volume
///
/// The result is exact: the separable axis passes compose to the full
/// N-dimensional envelope. Scale 0 on an axis skips it.
///
/// # Arguments
/// * `volume` - Input volume
/// * `params` - Scale per axis, spacing handling and kernel choice
pub fn dilate<T: VoxelElement>(
    volume: &Volume<T>,
    params: &ParabolicParams,
) -> Result<Volume<f64>> {
    morph(volume, params, MorphMode::Dilate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::Scale;
    use approx::assert_abs_diff_eq;

    #[test]
    fn dilation_is_extensive() {
        let mut vol: Volume<f64> = Volume::new(&[5, 5]);
        vol.set(&[2, 2], 7.0).unwrap();
        vol.set(&[0, 4], -3.0).unwrap();
        let out = dilate(&vol, &ParabolicParams::default()).unwrap();
        for (o, i) in out.data().iter().zip(vol.data().iter()) {
            assert!(o >= i, "dilation must dominate the input");
        }
    }

    #[test]
    fn impulse_spreads_as_a_parabola() {
        let mut vol: Volume<f64> = Volume::new(&[1, 7]);
        vol.set(&[0, 3], 10.0).unwrap();
        let params = ParabolicParams {
            scale: Scale::Uniform(0.5),
            ..Default::default()
        };
        let out = dilate(&vol, &params).unwrap();
        let expected = [1.0, 6.0, 9.0, 10.0, 9.0, 6.0, 1.0];
        for (j, &e) in expected.iter().enumerate() {
            assert_abs_diff_eq!(out.get(&[0, j]).unwrap(), e, epsilon = 1e-12);
        }
    }

    #[test]
    fn physical_spacing_sets_the_curvature() {
        use paramorph_core::Spacing;
        let mut vol: Volume<f64> = Volume::new(&[1, 7]);
        vol.set(&[0, 3], 10.0).unwrap();
        let vol = vol
            .with_spacing(Spacing::new(vec![1.0, 2.0]).unwrap())
            .unwrap();
        let params = ParabolicParams {
            scale: Scale::Uniform(0.5),
            use_spacing: true,
            algorithm: Default::default(),
        };
        let out = dilate(&vol, &params).unwrap();
        // curvature = spacing²/(2·0.5) = 4: one voxel away drops by 4
        assert_abs_diff_eq!(out.get(&[0, 2]).unwrap(), 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out.get(&[0, 1]).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn executes_through_the_algorithm_trait() {
        let vol: Volume<f64> = Volume::new(&[4, 4]);
        let out = Dilate.execute_default(vol).unwrap();
        assert_eq!(out.shape(), &[4, 4]);
    }
}
