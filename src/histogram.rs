use ndarray::{Array1, Array3, ArrayView1};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::pixels::RgbPixels;
use crate::quantize::{BinSize, quantize};
use crate::similarity::cosine_similarity;

/// 三维 RGB 联合颜色直方图
///
/// 计数按 (R, G, B) 行优先顺序展平，下标为 `(r * b + g) * b + bl`，长度为 bin_size³。
/// 所有计数之和等于原图的像素数量。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    bin_size: BinSize,
    counts: Array1<u64>,
}

/// 直方图中的一个非空桶
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bin {
    pub r: u32,
    pub g: u32,
    pub b: u32,
    pub count: u64,
}

impl Histogram {
    /// 量化图片并统计颜色直方图
    pub fn build(image: &impl RgbPixels, bin_size: BinSize) -> Result<Self> {
        let quantized = quantize(image, bin_size)?;

        let n = bin_size.bins();
        let mut dense = Array3::<u64>::zeros((n, n, n));
        for px in quantized.rows() {
            dense[[px[0] as usize, px[1] as usize, px[2] as usize]] += 1;
        }

        let counts = dense
            .into_shape_with_order(bin_size.histogram_len())
            .map_err(|e| Error::InvalidInput(format!("直方图展平失败: {e}")))?;
        Ok(Self { bin_size, counts })
    }

    /// 直接从展平后的计数构造直方图
    pub fn from_counts(bin_size: BinSize, counts: Vec<u64>) -> Result<Self> {
        if counts.len() != bin_size.histogram_len() {
            return Err(Error::InvalidInput(format!(
                "bin_size 为 {} 时直方图长度应为 {}，实际为 {}",
                bin_size,
                bin_size.histogram_len(),
                counts.len()
            )));
        }
        Ok(Self { bin_size, counts: Array1::from(counts) })
    }

    pub fn bin_size(&self) -> BinSize {
        self.bin_size
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn counts(&self) -> ArrayView1<'_, u64> {
        self.counts.view()
    }

    /// 所有桶计数之和
    pub fn total(&self) -> u64 {
        self.counts.sum()
    }

    /// 欧几里得范数
    pub fn norm(&self) -> f64 {
        self.counts.iter().map(|&c| (c as f64).powi(2)).sum::<f64>().sqrt()
    }

    /// 按展平顺序遍历所有非空桶
    pub fn nonzero_bins(&self) -> impl Iterator<Item = Bin> + '_ {
        let n = self.bin_size.bins();
        self.counts.iter().enumerate().filter(|(_, c)| **c != 0).map(move |(i, &count)| Bin {
            r: (i / (n * n)) as u32,
            g: (i / n % n) as u32,
            b: (i % n) as u32,
            count,
        })
    }

    /// 与另一个直方图的余弦相似度，两者必须使用相同的 bin_size
    pub fn similarity(&self, other: &Histogram) -> Result<f64> {
        if self.bin_size != other.bin_size {
            return Err(Error::InvalidInput(format!(
                "无法比较 bin_size 不同的直方图: {} 与 {}",
                self.bin_size, other.bin_size
            )));
        }
        cosine_similarity(self.counts(), other.counts())
    }
}

/// 计算图片的展平颜色直方图
pub fn histogram(image: &impl RgbPixels, bin_size: u32) -> Result<Histogram> {
    Histogram::build(image, BinSize::new(bin_size)?)
}
