//! # Paramorph Algorithms
//!
//! Separable parabolic morphology on N-dimensional scalar volumes, and
//! the exact signed Euclidean distance transform built on top of it.
//!
//! ## Available operator categories
//!
//! - **morphology**: parabolic erosion, dilation, opening, closing and
//!   toggle-contrast sharpening, all exact and separable
//! - **distance**: morphological signed Euclidean distance transform

pub mod distance;
pub mod morphology;

mod maybe_rayon;
mod partition;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::morphology::{
        closing, dilate, erode, opening, parabolic_sharpen, sharpen,
        Closing, Dilate, Erode, Opening, ParabolicAlgorithm, ParabolicParams, Scale, Sharpen,
    };
    pub use crate::distance::{
        sdt_combine, signed_distance_transform, SdtParams, SignedDistance,
    };
    pub use paramorph_core::prelude::*;
}
