//! Per-voxel combiner for the signed distance transform.
//!
//! The thresholded indicator offsets both envelope results by the image
//! diagonal bound, so the square roots below recover plain Euclidean
//! distances with the sign carried by the indicator.

use ndarray::Zip;

use paramorph_core::{Error, Result, Volume};

/// Combine erosion, dilation and indicator into a signed distance field.
///
/// Per voxel: `+√(A + max_dist)` where the indicator `C` is positive,
/// `−√(max_dist − B)` elsewhere, with `A` the parabolic erosion and `B`
/// the parabolic dilation of the indicator. Radicands are clamped at 0:
/// accumulated rounding in the envelope passes may leave them a few ulp
/// negative.
pub fn sdt_combine(
    eroded: &Volume<f64>,
    dilated: &Volume<f64>,
    mask: &Volume<f64>,
    max_dist: f64,
) -> Result<Volume<f64>> {
    for other in [eroded, dilated] {
        if other.shape() != mask.shape() {
            return Err(Error::ShapeMismatch {
                expected: mask.shape().to_vec(),
                actual: other.shape().to_vec(),
            });
        }
    }
    let mut out = mask.with_same_meta::<f64>();
    Zip::from(out.data_mut())
        .and(eroded.data())
        .and(dilated.data())
        .and(mask.data())
        .for_each(|o, &a, &b, &c| {
            *o = if c > 0.0 {
                (a + max_dist).max(0.0).sqrt()
            } else {
                -(max_dist - b).max(0.0).sqrt()
            };
        });
    Ok(out)
}
