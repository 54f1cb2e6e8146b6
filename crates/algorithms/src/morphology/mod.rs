//! Parabolic grayscale morphology
//!
//! Morphology with quadratic structuring functions, computed exactly and
//! separably along each axis:
//! - **Erosion**: minimum under `+m·d²` (pulls bright features down)
//! - **Dilation**: maximum under `−m·d²` (spreads bright features)
//! - **Opening**: erosion then dilation (suppresses narrow peaks)
//! - **Closing**: dilation then erosion (fills narrow valleys)
//! - **Sharpening**: toggle contrast between dilation and erosion

mod closing;
mod dilate;
mod erode;
mod line;
mod opening;
mod separable;
mod sharpen;

pub use closing::{closing, Closing};
pub use dilate::{dilate, Dilate};
pub use erode::{erode, Erode};
pub use line::ParabolicAlgorithm;
pub use opening::{opening, Opening};
pub use separable::{ParabolicParams, Scale};
pub use sharpen::{parabolic_sharpen, sharpen, Sharpen};
