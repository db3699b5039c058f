use image::RgbImage;
use ndarray::{ArrayBase, Axis, Data, Ix3};

/// An abstraction of a read-only RGB image of shape (height, width, channels)
pub trait RgbPixels {
    /// Return image height
    fn height(&self) -> usize;
    /// Return image width
    fn width(&self) -> usize;
    /// Return channel count, a valid RGB image has exactly 3
    fn channels(&self) -> usize;
    /// Iterate over pixels in row-major order
    ///
    /// Only meaningful when `channels() == 3`
    fn rgb_pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_;

    /// Return the number of pixels
    fn pixel_count(&self) -> usize {
        self.height() * self.width()
    }
}

impl<S> RgbPixels for ArrayBase<S, Ix3>
where
    S: Data<Elem = u8>,
{
    fn height(&self) -> usize {
        self.len_of(Axis(0))
    }

    fn width(&self) -> usize {
        self.len_of(Axis(1))
    }

    fn channels(&self) -> usize {
        self.len_of(Axis(2))
    }

    fn rgb_pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.lanes(Axis(2)).into_iter().map(|p| [p[0], p[1], p[2]])
    }
}

impl RgbPixels for RgbImage {
    fn height(&self) -> usize {
        RgbImage::height(self) as usize
    }

    fn width(&self) -> usize {
        RgbImage::width(self) as usize
    }

    fn channels(&self) -> usize {
        3
    }

    fn rgb_pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.pixels().map(|p| p.0)
    }
}

impl<T: RgbPixels> RgbPixels for &T {
    fn height(&self) -> usize {
        (**self).height()
    }

    fn width(&self) -> usize {
        (**self).width()
    }

    fn channels(&self) -> usize {
        (**self).channels()
    }

    fn rgb_pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        (**self).rgb_pixels()
    }
}
