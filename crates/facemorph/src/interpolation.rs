use facemorph_image::{Image, ImageDtype};

/// Bilinearly samples an image at the fractional coordinate `(u, v)`.
///
/// The coordinate is clamped into the image bounds first and the four integer
/// neighbors are clamped to the last row/column, so any input (including
/// negative coordinates or coordinates past the last pixel) yields a finite,
/// in-range color without ever indexing out of bounds.
///
/// # Arguments
///
/// * `image` - The source image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
///
/// # Returns
///
/// The interpolated pixel values, one per channel.
pub fn bilinear_sample<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
) -> [f32; C] {
    let (rows, cols) = (image.rows(), image.cols());
    if rows == 0 || cols == 0 {
        return [0.0; C];
    }

    let u = u.clamp(0.0, (cols - 1) as f32);
    let v = v.clamp(0.0, (rows - 1) as f32);

    let iu0 = u.trunc() as usize;
    let iv0 = v.trunc() as usize;
    let iu1 = if iu0 + 1 < cols { iu0 + 1 } else { iu0 };
    let iv1 = if iv0 + 1 < rows { iv0 + 1 } else { iv0 };

    let frac_u = u.fract();
    let frac_v = v.fract();

    let w00 = (1.0 - frac_u) * (1.0 - frac_v);
    let w01 = frac_u * (1.0 - frac_v);
    let w10 = (1.0 - frac_u) * frac_v;
    let w11 = frac_u * frac_v;

    let data = image.as_slice();
    let base00 = (iv0 * cols + iu0) * C;
    let base01 = (iv0 * cols + iu1) * C;
    let base10 = (iv1 * cols + iu0) * C;
    let base11 = (iv1 * cols + iu1) * C;

    let mut pixel = [0.0; C];
    for k in 0..C {
        pixel[k] = data[base00 + k].into() * w00
            + data[base01 + k].into() * w01
            + data[base10 + k].into() * w10
            + data[base11 + k].into() * w11;
    }

    pixel
}
