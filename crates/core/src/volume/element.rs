//! Voxel element trait for generic scalar values

use num_traits::{NumCast, Zero};
use std::fmt::Debug;

/// Trait for types that can be stored in a volume voxel.
///
/// Beyond the usual numeric bounds, elements expose their representable
/// extremes: the contact-point envelope kernel seeds its comparisons from
/// the extreme of the *input* element type, so every supported kind must
/// provide them.
pub trait VoxelElement:
    Copy + Clone + Debug + PartialOrd + PartialEq + NumCast + Zero + Send + Sync + 'static
{
    /// Minimum value representable by this type
    fn min_value() -> Self;

    /// Maximum value representable by this type
    fn max_value() -> Self;

    /// Whether this type is a floating point type
    fn is_float() -> bool;

    /// Widen to the internal computation type
    fn to_real(self) -> f64;
}

macro_rules! impl_voxel_element_int {
    ($t:ty) => {
        impl VoxelElement for $t {
            fn min_value() -> Self {
                <$t>::MIN
            }

            fn max_value() -> Self {
                <$t>::MAX
            }

            fn is_float() -> bool {
                false
            }

            fn to_real(self) -> f64 {
                self as f64
            }
        }
    };
}

macro_rules! impl_voxel_element_float {
    ($t:ty) => {
        impl VoxelElement for $t {
            fn min_value() -> Self {
                <$t>::MIN
            }

            fn max_value() -> Self {
                <$t>::MAX
            }

            fn is_float() -> bool {
                true
            }

            fn to_real(self) -> f64 {
                self as f64
            }
        }
    };
}

impl_voxel_element_int!(i8);
impl_voxel_element_int!(i16);
impl_voxel_element_int!(i32);
impl_voxel_element_int!(i64);
impl_voxel_element_int!(u8);
impl_voxel_element_int!(u16);
impl_voxel_element_int!(u32);
impl_voxel_element_int!(u64);
impl_voxel_element_float!(f32);
impl_voxel_element_float!(f64);

#[cfg(test)]
mod tests {
    use super::VoxelElement;

    #[test]
    fn integer_extremes() {
        assert_eq!(<u8 as VoxelElement>::min_value(), 0);
        assert_eq!(<u8 as VoxelElement>::max_value(), 255);
        assert_eq!(<i16 as VoxelElement>::min_value(), i16::MIN);
        assert!(!<u8 as VoxelElement>::is_float());
    }

    #[test]
    fn float_extremes_are_finite() {
        assert!(<f64 as VoxelElement>::min_value().is_finite());
        assert!(<f64 as VoxelElement>::max_value().is_finite());
        assert!(<f32 as VoxelElement>::is_float());
    }

    #[test]
    fn to_real_widens() {
        assert_eq!(200u8.to_real(), 200.0);
        assert_eq!((-7i32).to_real(), -7.0);
        assert_eq!(1.5f32.to_real(), 1.5);
    }
}
