//! Parabolic closing (dilation followed by erosion)
//!
//! Fills dark features narrower than the structuring parabola while
//! preserving the shape of larger dark regions. Runs as two in-place
//! stages over one output buffer.

use paramorph_core::{Algorithm, Error, Result, Volume, VoxelElement};

use super::separable::{open_close, ParabolicParams};

/// Closing operator
#[derive(Debug, Clone, Default)]
pub struct Closing;

impl Algorithm for Closing {
    type Input = Volume<f64>;
    type Output = Volume<f64>;
    type Params = ParabolicParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "ParabolicClosing"
    }

    fn description(&self) -> &'static str {
        "Parabolic closing (dilation then erosion) to fill narrow dark features"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        closing(&input, &params)
    }
}

/// Perform parabolic closing on a volume
///
/// # Arguments
/// * `volume` - Input volume
/// * `params` - Scale per axis, spacing handling and kernel choice
pub fn closing<T: VoxelElement>(
    volume: &Volume<T>,
    params: &ParabolicParams,
) -> Result<Volume<f64>> {
    open_close(volume, params, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::{opening, Scale};
    use approx::assert_abs_diff_eq;

    fn dip_line() -> Volume<f64> {
        Volume::from_vec(&[1, 7], vec![10.0, 10.0, 10.0, 0.0, 10.0, 10.0, 10.0]).unwrap()
    }

    #[test]
    fn closing_lifts_a_narrow_dip() {
        let vol = dip_line();
        let params = ParabolicParams {
            scale: Scale::Uniform(1.0),
            ..Default::default()
        };
        let out = closing(&vol, &params).unwrap();
        // dilation raises the dip to 9.5, erosion cannot deepen it again
        assert_abs_diff_eq!(out.get(&[0, 3]).unwrap(), 9.5, epsilon = 1e-12);
        for j in [0, 1, 2, 4, 5, 6] {
            assert_abs_diff_eq!(out.get(&[0, j]).unwrap(), 10.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn closing_is_extensive() {
        let vol = dip_line();
        let out = closing(&vol, &ParabolicParams::default()).unwrap();
        for (o, i) in out.data().iter().zip(vol.data().iter()) {
            assert!(*o >= *i - 1e-12);
        }
    }

    #[test]
    fn closing_is_idempotent() {
        let data: Vec<f64> = (0..35).map(|i| (((i * 5 + 9) % 19) as f64) * 0.8).collect();
        let vol = Volume::from_vec(&[5, 7], data).unwrap();
        let params = ParabolicParams {
            scale: Scale::Uniform(1.3),
            ..Default::default()
        };
        let once = closing(&vol, &params).unwrap();
        let twice = closing(&once, &params).unwrap();
        for (x, y) in once.data().iter().zip(twice.data().iter()) {
            assert_abs_diff_eq!(x, y, epsilon = 1e-9);
        }
    }

    #[test]
    fn closing_is_the_dual_of_opening() {
        let data: Vec<f64> = (0..24).map(|i| (((i * 3 + 1) % 13) as f64) - 6.0).collect();
        let vol = Volume::from_vec(&[4, 6], data).unwrap();
        let params = ParabolicParams {
            scale: Scale::Uniform(0.8),
            ..Default::default()
        };
        let closed = closing(&vol, &params).unwrap();
        let negated = Volume::from_array(vol.data().mapv(|v| -v));
        let dual = opening(&negated, &params).unwrap();
        for (x, y) in closed.data().iter().zip(dual.data().iter()) {
            assert_abs_diff_eq!(*x, -*y, epsilon = 1e-9);
        }
    }

    #[test]
    fn executes_through_the_algorithm_trait() {
        let out = Closing.execute_default(dip_line()).unwrap();
        assert_eq!(out.shape(), &[1, 7]);
    }
}
