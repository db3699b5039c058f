use std::fmt;
use std::str::FromStr;

use ndarray::Array2;

use crate::error::{Error, Result};
use crate::pixels::RgbPixels;

/// 单个通道允许的最大分桶数量
///
/// 这是内存上限：稠密直方图有 bin_size³ 个 u64，256³ 约占 128 MiB，
/// 且每张数据库图片各持有一份。整除量化下一个通道最多只会用到 ⌈256 / bin_size⌉ 个桶，
/// bin_size 为 256 时所有像素都落在 (0, 0, 0)。
pub const MAX_BIN_SIZE: u32 = 256;

/// 每个颜色通道的分桶数量，同时也是量化时的除数
///
/// 合法范围为 `1..=MAX_BIN_SIZE`，查询图片和数据库图片必须使用同一个值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BinSize(u32);

impl BinSize {
    pub fn new(bin_size: u32) -> Result<Self> {
        if bin_size == 0 || bin_size > MAX_BIN_SIZE {
            return Err(Error::InvalidParameter(format!(
                "bin_size 必须在 1 到 {MAX_BIN_SIZE} 之间，实际为 {bin_size}"
            )));
        }
        Ok(Self(bin_size))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// 单个轴上的桶数量
    pub fn bins(self) -> usize {
        self.0 as usize
    }

    /// 展平后的直方图长度，即 bin_size³
    pub fn histogram_len(self) -> usize {
        self.bins().pow(3)
    }

    /// 将单个通道值映射到桶坐标
    ///
    /// 整除后超出范围的值归入最后一个桶
    #[inline(always)]
    pub fn quantize_value(self, value: u8) -> u8 {
        (value as u32 / self.0).min(self.0 - 1) as u8
    }
}

impl FromStr for BinSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let v = s
            .trim()
            .parse::<u32>()
            .map_err(|e| Error::InvalidParameter(format!("无效的 bin_size {s:?}: {e}")))?;
        Self::new(v)
    }
}

impl fmt::Display for BinSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 检查图片是否可以被量化：必须是 3 通道且至少有一个像素
pub(crate) fn check_image(image: &impl RgbPixels) -> Result<()> {
    if image.channels() != 3 {
        return Err(Error::InvalidInput(format!(
            "图片必须有 3 个通道，实际为 {}",
            image.channels()
        )));
    }
    if image.pixel_count() == 0 {
        return Err(Error::InvalidInput(format!(
            "图片尺寸为 {}x{}，没有任何像素",
            image.height(),
            image.width()
        )));
    }
    Ok(())
}

/// 将图片量化为逐像素的桶坐标
///
/// 返回形状为 (height * width, 3) 的数组，按行优先顺序排列，每个坐标都在 `[0, bin_size)` 内
pub fn quantize(image: &impl RgbPixels, bin_size: BinSize) -> Result<Array2<u8>> {
    check_image(image)?;

    let mut data = Vec::with_capacity(image.pixel_count() * 3);
    for pixel in image.rgb_pixels() {
        data.extend(pixel.map(|v| bin_size.quantize_value(v)));
    }

    Array2::from_shape_vec((image.pixel_count(), 3), data)
        .map_err(|e| Error::InvalidInput(format!("像素数量与图片尺寸不一致: {e}")))
}

#[cfg(test)]
mod tests {
    use ndarray::{Array3, array};

    use super::*;

    #[test]
    fn bin_size_range() {
        assert!(matches!(BinSize::new(0), Err(Error::InvalidParameter(_))));
        assert!(matches!(BinSize::new(257), Err(Error::InvalidParameter(_))));
        assert_eq!(BinSize::new(1).unwrap().get(), 1);
        assert_eq!(BinSize::new(256).unwrap().histogram_len(), 256 * 256 * 256);
    }

    #[test]
    fn bin_size_from_str() {
        assert_eq!("16".parse::<BinSize>().unwrap(), BinSize::new(16).unwrap());
        assert!(matches!("0".parse::<BinSize>(), Err(Error::InvalidParameter(_))));
        assert!(matches!("-3".parse::<BinSize>(), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn floor_division() {
        let b = BinSize::new(16).unwrap();
        assert_eq!(b.quantize_value(0), 0);
        assert_eq!(b.quantize_value(15), 0);
        assert_eq!(b.quantize_value(16), 1);
        assert_eq!(b.quantize_value(255), 15);
    }

    #[test]
    fn overflow_goes_to_top_bin() {
        let b = BinSize::new(2).unwrap();
        assert_eq!(b.quantize_value(1), 0);
        assert_eq!(b.quantize_value(2), 1);
        assert_eq!(b.quantize_value(255), 1);
    }

    #[test]
    fn sparse_upper_bins() {
        // 255 / 100 = 2，桶 99 永远不会被用到
        let b = BinSize::new(100).unwrap();
        assert_eq!(b.quantize_value(255), 2);
    }

    #[test]
    fn quantize_keeps_pixel_order() {
        let img = Array3::from_shape_vec((1, 2, 3), vec![255, 0, 17, 32, 64, 128]).unwrap();
        let q = quantize(&img, BinSize::new(16).unwrap()).unwrap();
        assert_eq!(q, array![[15, 0, 1], [2, 4, 8]]);
    }

    #[test]
    fn quantize_empty_image() {
        let b = BinSize::new(4).unwrap();
        let img = Array3::<u8>::zeros((0, 5, 3));
        assert!(matches!(quantize(&img, b), Err(Error::InvalidInput(_))));
        let img = Array3::<u8>::zeros((5, 0, 3));
        assert!(matches!(quantize(&img, b), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn quantize_wrong_channels() {
        let img = Array3::<u8>::zeros((2, 2, 4));
        assert!(matches!(quantize(&img, BinSize::new(4).unwrap()), Err(Error::InvalidInput(_))));
    }
}
