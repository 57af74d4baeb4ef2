use crate::error::ImageError;

/// Image size in pixels
///
/// # Examples
///
/// ```
/// use facemorph_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Trait for image data types.
///
/// Send and Sync is required for the row-parallel pixel fill.
pub trait ImageDtype: Copy + Default + Into<f32> + Send + Sync {
    /// Convert a f32 value to the image data type.
    fn from_f32(x: f32) -> Self;
}

impl ImageDtype for f32 {
    fn from_f32(x: f32) -> Self {
        x
    }
}

impl ImageDtype for u8 {
    fn from_f32(x: f32) -> Self {
        x.round().clamp(0.0, 255.0) as u8
    }
}

/// Represents an image with pixel data.
///
/// The pixel data is stored row-major with interleaved channels (H, W, C),
/// top-left origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const C: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const C: usize> Image<T, C>
where
    T: Clone,
{
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use facemorph_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///    ImageSize {
    ///       width: 10,
    ///       height: 20,
    ///    },
    ///    vec![0u8; 10 * 20 * 3],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        if data.len() != size.width * size.height * C {
            return Err(ImageError::InvalidChannelShape(
                data.len(),
                size.width * size.height * C,
            ));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size and default pixel value.
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError> {
        let data = vec![val; size.width * size.height * C];
        Image::new(size, data)
    }

    /// Cast the pixel data of the image to a different type.
    pub fn cast<U>(&self) -> Result<Image<U, C>, ImageError>
    where
        U: num_traits::NumCast + Clone,
        T: num_traits::NumCast,
    {
        let casted_data = self
            .data
            .iter()
            .map(|x| U::from(x.clone()).ok_or(ImageError::CastError))
            .collect::<Result<Vec<U>, ImageError>>()?;

        Image::new(self.size, casted_data)
    }

    /// Get the pixel value at the given coordinate.
    ///
    /// # Errors
    ///
    /// If the coordinate is out of the image bounds, an error is returned.
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<[T; C], ImageError>
    where
        T: Copy + Default,
    {
        if x >= self.size.width || y >= self.size.height {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.size.width,
                self.size.height,
            ));
        }

        let base = (y * self.size.width + x) * C;
        let mut pixel = [T::default(); C];
        pixel.copy_from_slice(&self.data[base..base + C]);

        Ok(pixel)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels of the image.
    pub fn num_channels(&self) -> usize {
        C
    }

    /// Get the pixel data of the image as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the pixel data of the image as a mutable slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the image and return the pixel data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            vec![0u8; 10 * 20 * 3],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.cols(), 10);
        assert_eq!(image.rows(), 20);
        assert_eq!(image.num_channels(), 3);

        Ok(())
    }

    #[test]
    fn image_data_mismatch() {
        let res = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0u8; 11],
        );
        assert!(matches!(res, Err(ImageError::InvalidChannelShape(11, 12))));
    }

    #[test]
    fn image_from_size_val() -> Result<(), ImageError> {
        let image = Image::<u8, 4>::from_size_val(
            ImageSize {
                width: 3,
                height: 2,
            },
            7u8,
        )?;
        assert_eq!(image.as_slice().len(), 3 * 2 * 4);
        assert!(image.as_slice().iter().all(|&x| x == 7));

        Ok(())
    }

    #[test]
    fn image_cast() -> Result<(), ImageError> {
        let data = vec![0u8, 1, 2, 3, 4, 5];
        let image_u8 = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            data,
        )?;
        let image_f32 = image_u8.cast::<f32>()?;
        assert_eq!(image_f32.as_slice(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);

        Ok(())
    }

    #[test]
    fn image_get_pixel() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![1, 2, 3, 4, 5, 6],
        )?;
        assert_eq!(image.get_pixel(1, 0)?, [4, 5, 6]);
        assert!(image.get_pixel(2, 0).is_err());

        Ok(())
    }

    #[test]
    fn image_dtype_clamps() {
        assert_eq!(u8::from_f32(-3.0), 0);
        assert_eq!(u8::from_f32(127.5), 128);
        assert_eq!(u8::from_f32(300.0), 255);
    }
}
