//! Main Volume type

use ndarray::{ArrayD, ArrayViewD, ArrayViewMutD, IxDyn};

use crate::error::{Error, Result};
use crate::volume::{Spacing, VoxelElement};

/// An N-dimensional scalar image with physical voxel spacing.
///
/// `Volume<T>` stores values of type `T` in a dense N-dimensional grid
/// (row-major) together with the physical size of one voxel along each
/// axis.
///
/// # Type Parameters
///
/// - `T`: The voxel value type, must implement [`VoxelElement`]
///
/// # Example
///
/// ```ignore
/// use paramorph_core::Volume;
///
/// // Create a 64x64x32 volume filled with zeros
/// let mut vol: Volume<f64> = Volume::new(&[64, 64, 32]);
///
/// // Set a value
/// vol.set(&[10, 20, 5], 42.0)?;
///
/// // Get a value
/// let value = vol.get(&[10, 20, 5])?;
/// ```
#[derive(Debug, Clone)]
pub struct Volume<T: VoxelElement> {
    /// Voxel data in row-major order
    data: ArrayD<T>,
    /// Physical size of one voxel along each axis
    spacing: Spacing,
}

impl<T: VoxelElement> Volume<T> {
    /// Create a new volume filled with zeros and unit spacing
    pub fn new(shape: &[usize]) -> Self {
        Self {
            data: ArrayD::zeros(IxDyn(shape)),
            spacing: Spacing::unit(shape.len()),
        }
    }

    /// Create a new volume filled with a specific value
    pub fn filled(shape: &[usize], value: T) -> Self {
        Self {
            data: ArrayD::from_elem(IxDyn(shape), value),
            spacing: Spacing::unit(shape.len()),
        }
    }

    /// Create a volume from existing data in row-major order
    pub fn from_vec(shape: &[usize], data: Vec<T>) -> Result<Self> {
        let array = ArrayD::from_shape_vec(IxDyn(shape), data)
            .map_err(|_| Error::InvalidDimensions(shape.to_vec()))?;
        Ok(Self::from_array(array))
    }

    /// Create a volume from an ndarray, with unit spacing
    pub fn from_array(data: ArrayD<T>) -> Self {
        let ndim = data.ndim();
        Self {
            data,
            spacing: Spacing::unit(ndim),
        }
    }

    /// Replace the spacing, checking that its rank matches the data
    pub fn with_spacing(mut self, spacing: Spacing) -> Result<Self> {
        if spacing.ndim() != self.ndim() {
            return Err(Error::InvalidParameter {
                name: "spacing",
                value: format!("{} axes", spacing.ndim()),
                reason: format!("volume has {} axes", self.ndim()),
            });
        }
        self.spacing = spacing;
        Ok(self)
    }

    /// Create a volume with the same shape and spacing but a different
    /// element type, filled with zeros
    pub fn with_same_meta<U: VoxelElement>(&self) -> Volume<U> {
        Volume {
            data: ArrayD::zeros(self.data.raw_dim()),
            spacing: self.spacing.clone(),
        }
    }

    /// Create a volume with the same shape and spacing, filled with a value
    pub fn like(&self, fill_value: T) -> Self {
        Self {
            data: ArrayD::from_elem(self.data.raw_dim(), fill_value),
            spacing: self.spacing.clone(),
        }
    }

    // Dimensions

    /// Number of axes
    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// Per-axis sizes
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Total number of voxels
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the volume has no voxels
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // Data access

    /// Get value at an index
    pub fn get(&self, index: &[usize]) -> Result<T> {
        self.data
            .get(IxDyn(index))
            .copied()
            .ok_or_else(|| Error::IndexOutOfBounds {
                index: index.to_vec(),
                shape: self.shape().to_vec(),
            })
    }

    /// Set value at an index
    pub fn set(&mut self, index: &[usize], value: T) -> Result<()> {
        let shape = self.shape().to_vec();
        match self.data.get_mut(IxDyn(index)) {
            Some(v) => {
                *v = value;
                Ok(())
            }
            None => Err(Error::IndexOutOfBounds {
                index: index.to_vec(),
                shape,
            }),
        }
    }

    /// Get a view of the underlying data
    pub fn view(&self) -> ArrayViewD<'_, T> {
        self.data.view()
    }

    /// Get a mutable view of the underlying data
    pub fn view_mut(&mut self) -> ArrayViewMutD<'_, T> {
        self.data.view_mut()
    }

    /// Get a reference to the underlying array
    pub fn data(&self) -> &ArrayD<T> {
        &self.data
    }

    /// Get a mutable reference to the underlying array
    pub fn data_mut(&mut self) -> &mut ArrayD<T> {
        &mut self.data
    }

    /// Consume the volume and return the underlying array
    pub fn into_array(self) -> ArrayD<T> {
        self.data
    }

    // Metadata

    /// Physical voxel spacing
    pub fn spacing(&self) -> &Spacing {
        &self.spacing
    }

    /// Replace the spacing without a rank check; prefer [`Self::with_spacing`]
    pub fn set_spacing(&mut self, spacing: Spacing) -> Result<()> {
        if spacing.ndim() != self.ndim() {
            return Err(Error::InvalidParameter {
                name: "spacing",
                value: format!("{} axes", spacing.ndim()),
                reason: format!("volume has {} axes", self.ndim()),
            });
        }
        self.spacing = spacing;
        Ok(())
    }

    /// Widen every voxel to the internal computation type
    pub fn to_real(&self) -> Volume<f64> {
        Volume {
            data: self.data.mapv(VoxelElement::to_real),
            spacing: self.spacing.clone(),
        }
    }

    /// Squared length of the volume's bounding diagonal.
    ///
    /// In physical units (`Σ (size·spacing)²`) when `physical` is true,
    /// voxel units otherwise. This bounds every squared inter-voxel
    /// distance in the image.
    pub fn bounding_diagonal_sq(&self, physical: bool) -> f64 {
        self.shape()
            .iter()
            .enumerate()
            .map(|(d, &sz)| {
                let extent = if physical {
                    sz as f64 * self.spacing.axis(d)
                } else {
                    sz as f64
                };
                extent * extent
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_creation() {
        let vol: Volume<f32> = Volume::new(&[4, 5, 6]);
        assert_eq!(vol.ndim(), 3);
        assert_eq!(vol.shape(), &[4, 5, 6]);
        assert_eq!(vol.len(), 120);
        assert!(vol.spacing().is_unit());
    }

    #[test]
    fn volume_access() {
        let mut vol: Volume<f64> = Volume::new(&[3, 3]);
        vol.set(&[1, 2], 42.0).unwrap();
        assert_eq!(vol.get(&[1, 2]).unwrap(), 42.0);
        assert!(vol.get(&[3, 0]).is_err());
        assert!(vol.set(&[0, 3], 1.0).is_err());
    }

    #[test]
    fn from_vec_shape_check() {
        assert!(Volume::from_vec(&[2, 3], vec![0u8; 6]).is_ok());
        assert!(Volume::from_vec(&[2, 3], vec![0u8; 5]).is_err());
    }

    #[test]
    fn spacing_rank_check() {
        let vol: Volume<f64> = Volume::new(&[4, 4]);
        assert!(vol
            .clone()
            .with_spacing(Spacing::new(vec![1.0, 2.0]).unwrap())
            .is_ok());
        assert!(vol
            .with_spacing(Spacing::new(vec![1.0, 2.0, 3.0]).unwrap())
            .is_err());
    }

    #[test]
    fn with_same_meta_keeps_shape_and_spacing() {
        let vol = Volume::<u8>::new(&[2, 7])
            .with_spacing(Spacing::new(vec![0.5, 3.0]).unwrap())
            .unwrap();
        let out: Volume<f64> = vol.with_same_meta();
        assert_eq!(out.shape(), vol.shape());
        assert_eq!(out.spacing(), vol.spacing());
    }

    #[test]
    fn to_real_widens_every_voxel() {
        let vol = Volume::from_vec(&[2, 2], vec![1u8, 2, 3, 255]).unwrap();
        let real = vol.to_real();
        assert_eq!(real.get(&[1, 1]).unwrap(), 255.0);
        assert_eq!(real.get(&[0, 1]).unwrap(), 2.0);
    }

    #[test]
    fn bounding_diagonal() {
        let vol = Volume::<f64>::new(&[3, 4])
            .with_spacing(Spacing::new(vec![2.0, 1.0]).unwrap())
            .unwrap();
        assert_eq!(vol.bounding_diagonal_sq(false), 9.0 + 16.0);
        assert_eq!(vol.bounding_diagonal_sq(true), 36.0 + 16.0);
    }
}
