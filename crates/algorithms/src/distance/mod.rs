//! Distance transforms
//!
//! The exact signed Euclidean distance transform of a binary mask,
//! computed as a composition of parabolic erosion and dilation over a
//! thresholded indicator volume.

mod combine;
mod sdt;

pub use combine::sdt_combine;
pub use sdt::{signed_distance_transform, SdtParams, SignedDistance};
