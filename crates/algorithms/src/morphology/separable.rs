//! Separable N-D driver for the 1-D parabolic kernels.
//!
//! An N-D parabolic transform is the composition of 1-D transforms along
//! each axis: axis 0 streams lines from the input volume into the output,
//! every later axis re-filters the output in place. Rows along the pass
//! axis are independent, so each pass is parallelized by slicing the
//! volume into slabs along a different axis and giving every worker its
//! own line buffers.

use log::debug;
use ndarray::{ArrayD, ArrayView1, ArrayViewMut1, Axis};

use paramorph_core::{Error, Result, Spacing, Volume, VoxelElement};

use crate::maybe_rayon::*;
use crate::partition;

use super::line::{
    contact_point, intersection, EnvelopeScratch, ParabolicAlgorithm, CONTACT_POINT_MAX_SCALE,
};

/// Direction of a morphological pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MorphMode {
    Dilate,
    Erode,
}

/// Structuring parabola scale, per axis.
///
/// A scale of 0 on an axis skips that axis entirely (the first axis then
/// degenerates to a copy, later axes to no-ops).
#[derive(Debug, Clone, PartialEq)]
pub enum Scale {
    /// The same scale on every axis
    Uniform(f64),
    /// An explicit scale per axis
    PerAxis(Vec<f64>),
}

impl Default for Scale {
    fn default() -> Self {
        Scale::Uniform(1.0)
    }
}

impl Scale {
    /// Expand to one value per axis, validating sign and length.
    pub(crate) fn resolve(&self, ndim: usize) -> Result<Vec<f64>> {
        let values = match self {
            Scale::Uniform(s) => vec![*s; ndim],
            Scale::PerAxis(v) => v.clone(),
        };
        if values.len() != ndim {
            return Err(Error::InvalidParameter {
                name: "scale",
                value: format!("{} axes", values.len()),
                reason: format!("volume has {ndim} axes"),
            });
        }
        for &s in &values {
            if !s.is_finite() || s < 0.0 {
                return Err(Error::InvalidParameter {
                    name: "scale",
                    value: format!("{s}"),
                    reason: "scales must be finite and >= 0".to_string(),
                });
            }
        }
        Ok(values)
    }
}

/// Parameters shared by the parabolic morphology operators.
#[derive(Debug, Clone)]
pub struct ParabolicParams {
    /// Structuring parabola scale (σ); larger means wider smoothing
    pub scale: Scale,
    /// Interpret scales in physical units via the volume spacing
    pub use_spacing: bool,
    /// 1-D kernel selection
    pub algorithm: ParabolicAlgorithm,
}

impl Default for ParabolicParams {
    fn default() -> Self {
        Self {
            scale: Scale::default(),
            use_spacing: false,
            algorithm: ParabolicAlgorithm::default(),
        }
    }
}

/// Everything a pass needs besides the per-axis scale.
#[derive(Debug, Clone, Copy)]
struct PassContext {
    mode: MorphMode,
    algorithm: ParabolicAlgorithm,
    use_spacing: bool,
    /// (most negative, most positive) of the input element type, widened
    extremes: (f64, f64),
}

/// Per-worker line filter: one line buffer plus the scratch of the
/// selected kernel, reused across all rows of a slab.
struct LinePass {
    kernel: Kernel,
    dilate: bool,
    magnitude: f64,
    extreme: f64,
    buf: Vec<f64>,
}

enum Kernel {
    ContactPoint { tmp: Vec<f64> },
    Intersection { env: EnvelopeScratch },
}

impl LinePass {
    fn new(len: usize, sigma: f64, iscale: f64, ctx: &PassContext) -> Self {
        let use_contact = match ctx.algorithm {
            ParabolicAlgorithm::ContactPoint => true,
            ParabolicAlgorithm::Intersection => false,
            ParabolicAlgorithm::Auto => 2.0 * sigma < CONTACT_POINT_MAX_SCALE,
        };
        let dilate = ctx.mode == MorphMode::Dilate;
        // written as s²/(2σ) rather than 1/(2σ/s²) to limit rounding error
        let magnitude = if use_contact {
            let sign = if dilate { 1.0 } else { -1.0 };
            (sign * iscale * iscale) / (2.0 * sigma)
        } else {
            (iscale * iscale) / (2.0 * sigma)
        };
        let extreme = if dilate { ctx.extremes.0 } else { ctx.extremes.1 };
        let kernel = if use_contact {
            Kernel::ContactPoint {
                tmp: vec![0.0; len],
            }
        } else {
            Kernel::Intersection {
                env: EnvelopeScratch::new(len),
            }
        };
        Self {
            kernel,
            dilate,
            magnitude,
            extreme,
            buf: vec![0.0; len],
        }
    }

    fn run_buffer(&mut self) {
        match &mut self.kernel {
            Kernel::ContactPoint { tmp } => {
                if self.dilate {
                    contact_point::<true>(&mut self.buf, tmp, self.magnitude, self.extreme);
                } else {
                    contact_point::<false>(&mut self.buf, tmp, self.magnitude, self.extreme);
                }
            }
            Kernel::Intersection { env } => {
                if self.dilate {
                    intersection::<true>(&mut self.buf, env, self.magnitude);
                } else {
                    intersection::<false>(&mut self.buf, env, self.magnitude);
                }
            }
        }
    }

    fn apply_from<T: VoxelElement>(
        &mut self,
        input: &ArrayView1<'_, T>,
        output: &mut ArrayViewMut1<'_, f64>,
    ) {
        for (b, v) in self.buf.iter_mut().zip(input.iter()) {
            *b = v.to_real();
        }
        self.run_buffer();
        for (o, &b) in output.iter_mut().zip(self.buf.iter()) {
            *o = b;
        }
    }

    fn apply_in_place(&mut self, lane: &mut ArrayViewMut1<'_, f64>) {
        for (b, &v) in self.buf.iter_mut().zip(lane.iter()) {
            *b = v;
        }
        self.run_buffer();
        for (o, &b) in lane.iter_mut().zip(self.buf.iter()) {
            *o = b;
        }
    }
}

fn element_extremes<T: VoxelElement>() -> (f64, f64) {
    (T::min_value().to_real(), T::max_value().to_real())
}

fn axis_scale(spacing: &Spacing, axis: usize, use_spacing: bool) -> f64 {
    if use_spacing {
        spacing.axis(axis)
    } else {
        1.0
    }
}

/// First-axis pass: input → output.
fn pass_from_input<T: VoxelElement>(
    input: &ArrayD<T>,
    output: &mut ArrayD<f64>,
    axis: usize,
    sigma: f64,
    iscale: f64,
    ctx: &PassContext,
) {
    let shape = output.shape().to_vec();
    let line_len = shape[axis];
    match partition::split_axis(&shape, axis) {
        Some(split) => {
            let piece = partition::piece_len(shape[split], worker_count());
            output
                .axis_chunks_iter_mut(Axis(split), piece)
                .into_par_iter()
                .zip(input.axis_chunks_iter(Axis(split), piece))
                .for_each(|(mut slab_out, slab_in)| {
                    let mut pass = LinePass::new(line_len, sigma, iscale, ctx);
                    for (mut olane, ilane) in slab_out
                        .lanes_mut(Axis(axis))
                        .into_iter()
                        .zip(slab_in.lanes(Axis(axis)))
                    {
                        pass.apply_from(&ilane, &mut olane);
                    }
                });
        }
        None => {
            let mut pass = LinePass::new(line_len, sigma, iscale, ctx);
            for (mut olane, ilane) in output
                .lanes_mut(Axis(axis))
                .into_iter()
                .zip(input.lanes(Axis(axis)))
            {
                pass.apply_from(&ilane, &mut olane);
            }
        }
    }
}

/// Later-axis pass: output → output.
fn pass_in_place(
    output: &mut ArrayD<f64>,
    axis: usize,
    sigma: f64,
    iscale: f64,
    ctx: &PassContext,
) {
    let shape = output.shape().to_vec();
    let line_len = shape[axis];
    match partition::split_axis(&shape, axis) {
        Some(split) => {
            let piece = partition::piece_len(shape[split], worker_count());
            output
                .axis_chunks_iter_mut(Axis(split), piece)
                .into_par_iter()
                .for_each(|mut slab| {
                    let mut pass = LinePass::new(line_len, sigma, iscale, ctx);
                    for mut lane in slab.lanes_mut(Axis(axis)) {
                        pass.apply_in_place(&mut lane);
                    }
                });
        }
        None => {
            let mut pass = LinePass::new(line_len, sigma, iscale, ctx);
            for mut lane in output.lanes_mut(Axis(axis)) {
                pass.apply_in_place(&mut lane);
            }
        }
    }
}

fn copy_into_real<T: VoxelElement>(input: &ArrayD<T>, output: &mut ArrayD<f64>) {
    output.zip_mut_with(input, |o, v| *o = v.to_real());
}

/// One full sweep over every axis: axis 0 from the input (a verbatim copy
/// when its scale is 0), later axes in place (skipped when 0).
fn run_stage<T: VoxelElement>(
    input: &ArrayD<T>,
    output: &mut ArrayD<f64>,
    spacing: &Spacing,
    scale: &[f64],
    ctx: &PassContext,
) {
    if scale[0] > 0.0 {
        pass_from_input(
            input,
            output,
            0,
            scale[0],
            axis_scale(spacing, 0, ctx.use_spacing),
            ctx,
        );
    } else {
        copy_into_real(input, output);
    }
    for (d, &sigma) in scale.iter().enumerate().skip(1) {
        if sigma > 0.0 {
            pass_in_place(output, d, sigma, axis_scale(spacing, d, ctx.use_spacing), ctx);
        }
    }
}

/// Single-stage N-D parabolic transform.
pub(crate) fn morph<T: VoxelElement>(
    volume: &Volume<T>,
    params: &ParabolicParams,
    mode: MorphMode,
) -> Result<Volume<f64>> {
    let scale = params.scale.resolve(volume.ndim())?;
    let mut output = volume.with_same_meta::<f64>();
    if volume.is_empty() {
        return Ok(output);
    }
    debug!(
        "parabolic {mode:?}: scale {scale:?}, use_spacing {}",
        params.use_spacing
    );
    let ctx = PassContext {
        mode,
        algorithm: params.algorithm,
        use_spacing: params.use_spacing,
        extremes: element_extremes::<T>(),
    };
    run_stage(
        volume.data(),
        output.data_mut(),
        volume.spacing(),
        &scale,
        &ctx,
    );
    Ok(output)
}

/// Two-stage open/close sharing one output buffer: stage 1 writes
/// input → output with one mode over every axis, stage 2 re-runs every
/// axis output → output with the dual mode.
pub(crate) fn open_close<T: VoxelElement>(
    volume: &Volume<T>,
    params: &ParabolicParams,
    do_open: bool,
) -> Result<Volume<f64>> {
    let scale = params.scale.resolve(volume.ndim())?;
    let mut output = volume.with_same_meta::<f64>();
    if volume.is_empty() {
        return Ok(output);
    }
    debug!(
        "parabolic {}: scale {scale:?}, use_spacing {}",
        if do_open { "opening" } else { "closing" },
        params.use_spacing
    );
    let extremes = element_extremes::<T>();
    let stage1 = PassContext {
        mode: if do_open {
            MorphMode::Erode
        } else {
            MorphMode::Dilate
        },
        algorithm: params.algorithm,
        use_spacing: params.use_spacing,
        extremes,
    };
    run_stage(
        volume.data(),
        output.data_mut(),
        volume.spacing(),
        &scale,
        &stage1,
    );

    let stage2 = PassContext {
        mode: if do_open {
            MorphMode::Dilate
        } else {
            MorphMode::Erode
        },
        ..stage1
    };
    let spacing = volume.spacing().clone();
    for (d, &sigma) in scale.iter().enumerate() {
        if sigma > 0.0 {
            pass_in_place(
                output.data_mut(),
                d,
                sigma,
                axis_scale(&spacing, d, stage2.use_spacing),
                &stage2,
            );
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{Dimension, IxDyn};

    /// Full N-D envelope by definition: the separable result must equal
    /// the joint optimum over all voxels with the additive quadratic
    /// structuring function.
    fn brute_force(
        vol: &Volume<f64>,
        scale: &[f64],
        use_spacing: bool,
        dilate: bool,
    ) -> Volume<f64> {
        let mut out = vol.with_same_meta::<f64>();
        let shape = vol.shape().to_vec();
        let curvature: Vec<f64> = scale
            .iter()
            .enumerate()
            .map(|(d, &s)| {
                let sp = if use_spacing { vol.spacing().axis(d) } else { 1.0 };
                if s > 0.0 {
                    sp * sp / (2.0 * s)
                } else {
                    0.0
                }
            })
            .collect();
        let indices: Vec<Vec<usize>> = vol
            .data()
            .indexed_iter()
            .map(|(ix, _)| ix.slice().to_vec())
            .collect();
        for p in &indices {
            let mut best = if dilate {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            };
            for q in &indices {
                // axes with zero scale admit no displacement
                if shape
                    .iter()
                    .enumerate()
                    .any(|(d, _)| scale[d] == 0.0 && p[d] != q[d])
                {
                    continue;
                }
                let quad: f64 = (0..shape.len())
                    .map(|d| {
                        let diff = p[d] as f64 - q[d] as f64;
                        curvature[d] * diff * diff
                    })
                    .sum();
                let v = vol.data()[IxDyn(q)];
                let t = if dilate { v - quad } else { v + quad };
                best = if dilate { best.max(t) } else { best.min(t) };
            }
            out.data_mut()[IxDyn(p)] = best;
        }
        out
    }

    fn synthetic_volume(shape: &[usize], seed: usize) -> Volume<f64> {
        let len: usize = shape.iter().product();
        let data: Vec<f64> = (0..len)
            .map(|i| (((i * 7 + seed * 13 + 5) % 23) as f64) * 0.9 - 6.0)
            .collect();
        Volume::from_vec(shape, data).unwrap()
    }

    fn assert_volumes_close(a: &Volume<f64>, b: &Volume<f64>, tol: f64) {
        for (x, y) in a.data().iter().zip(b.data().iter()) {
            assert_abs_diff_eq!(x, y, epsilon = tol);
        }
    }

    #[test]
    fn two_d_matches_brute_force() {
        let vol = synthetic_volume(&[6, 9], 0);
        for dilate in [true, false] {
            for algorithm in [
                ParabolicAlgorithm::Intersection,
                ParabolicAlgorithm::ContactPoint,
            ] {
                let params = ParabolicParams {
                    scale: Scale::Uniform(1.5),
                    use_spacing: false,
                    algorithm,
                };
                let mode = if dilate {
                    MorphMode::Dilate
                } else {
                    MorphMode::Erode
                };
                let got = morph(&vol, &params, mode).unwrap();
                let want = brute_force(&vol, &[1.5, 1.5], false, dilate);
                assert_volumes_close(&got, &want, 1e-9);
            }
        }
    }

    #[test]
    fn three_d_matches_brute_force() {
        let vol = synthetic_volume(&[4, 5, 3], 3);
        let params = ParabolicParams {
            scale: Scale::PerAxis(vec![0.5, 2.0, 1.0]),
            use_spacing: false,
            algorithm: ParabolicAlgorithm::Intersection,
        };
        let got = morph(&vol, &params, MorphMode::Dilate).unwrap();
        let want = brute_force(&vol, &[0.5, 2.0, 1.0], false, true);
        assert_volumes_close(&got, &want, 1e-9);
    }

    #[test]
    fn spacing_scales_the_parabola() {
        let vol = synthetic_volume(&[5, 7], 1)
            .with_spacing(Spacing::new(vec![2.0, 0.5]).unwrap())
            .unwrap();
        let params = ParabolicParams {
            scale: Scale::Uniform(1.0),
            use_spacing: true,
            algorithm: ParabolicAlgorithm::Intersection,
        };
        let got = morph(&vol, &params, MorphMode::Erode).unwrap();
        let want = brute_force(&vol, &[1.0, 1.0], true, false);
        assert_volumes_close(&got, &want, 1e-9);
    }

    #[test]
    fn zero_scale_on_first_axis_copies() {
        let vol = synthetic_volume(&[4, 6], 2);
        let params = ParabolicParams {
            scale: Scale::PerAxis(vec![0.0, 0.0]),
            use_spacing: false,
            algorithm: ParabolicAlgorithm::Intersection,
        };
        let got = morph(&vol, &params, MorphMode::Dilate).unwrap();
        assert_volumes_close(&got, &vol, 0.0);
    }

    #[test]
    fn zero_scale_skips_only_that_axis() {
        let vol = synthetic_volume(&[4, 6], 4);
        let params = ParabolicParams {
            scale: Scale::PerAxis(vec![1.0, 0.0]),
            use_spacing: false,
            algorithm: ParabolicAlgorithm::Intersection,
        };
        let got = morph(&vol, &params, MorphMode::Erode).unwrap();
        let want = brute_force(&vol, &[1.0, 0.0], false, false);
        assert_volumes_close(&got, &want, 1e-9);
    }

    #[test]
    fn auto_selection_runs_both_regimes() {
        let vol = synthetic_volume(&[8, 8], 6);
        for sigma in [0.05, 3.0] {
            let params = ParabolicParams {
                scale: Scale::Uniform(sigma),
                use_spacing: false,
                algorithm: ParabolicAlgorithm::Auto,
            };
            let got = morph(&vol, &params, MorphMode::Dilate).unwrap();
            let want = brute_force(&vol, &[sigma, sigma], false, true);
            assert_volumes_close(&got, &want, 1e-9);
        }
    }

    #[test]
    fn generic_integer_input() {
        let vol = Volume::from_vec(&[3, 3], vec![0u8, 0, 0, 0, 200, 0, 0, 0, 0]).unwrap();
        let params = ParabolicParams {
            scale: Scale::Uniform(0.5),
            use_spacing: false,
            algorithm: ParabolicAlgorithm::Intersection,
        };
        let got = morph(&vol, &params, MorphMode::Dilate).unwrap();
        // curvature 1: the impulse spreads as 200 − d²
        assert_abs_diff_eq!(got.get(&[1, 1]).unwrap(), 200.0, epsilon = 1e-12);
        assert_abs_diff_eq!(got.get(&[0, 1]).unwrap(), 199.0, epsilon = 1e-12);
        assert_abs_diff_eq!(got.get(&[0, 0]).unwrap(), 198.0, epsilon = 1e-12);
    }

    #[test]
    fn scale_validation() {
        let vol = synthetic_volume(&[4, 4], 0);
        let bad_len = ParabolicParams {
            scale: Scale::PerAxis(vec![1.0]),
            ..Default::default()
        };
        assert!(morph(&vol, &bad_len, MorphMode::Erode).is_err());
        let negative = ParabolicParams {
            scale: Scale::Uniform(-2.0),
            ..Default::default()
        };
        assert!(morph(&vol, &negative, MorphMode::Erode).is_err());
    }

    #[test]
    fn open_close_two_stage_matches_composition() {
        let vol = synthetic_volume(&[7, 5], 8);
        let params = ParabolicParams {
            scale: Scale::Uniform(1.0),
            use_spacing: false,
            algorithm: ParabolicAlgorithm::Intersection,
        };
        let opened = open_close(&vol, &params, true).unwrap();
        let eroded = morph(&vol, &params, MorphMode::Erode).unwrap();
        let then_dilated = morph(&eroded, &params, MorphMode::Dilate).unwrap();
        assert_volumes_close(&opened, &then_dilated, 1e-9);
    }
}
