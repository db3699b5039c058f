use ndarray::{ArrayView1, Zip};

use crate::error::{Error, Result};
use crate::histogram::Histogram;

/// 两个直方图的余弦相似度，见 [`Histogram::similarity`]
pub fn similarity(a: &Histogram, b: &Histogram) -> Result<f64> {
    a.similarity(b)
}

/// 计算两个计数向量的余弦相似度
///
/// cos(a, b) = (a · b) / (‖a‖ × ‖b‖)
///
/// 使用 f64 在全部维度上累加，复杂度为 O(bin_size³)。
/// 输入为非负向量，结果截断到 `[0, 1]` 以消除舍入误差。
///
/// 参数：
/// - a, b: 长度相同的直方图计数
pub fn cosine_similarity(a: ArrayView1<u64>, b: ArrayView1<u64>) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::InvalidInput(format!(
            "直方图长度不一致: {} 与 {}",
            a.len(),
            b.len()
        )));
    }

    let (mut dot, mut norm_a, mut norm_b) = (0f64, 0f64, 0f64);
    Zip::from(&a).and(&b).for_each(|&x, &y| {
        let (x, y) = (x as f64, y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    });

    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(Error::DegenerateSimilarity);
    }

    Ok((dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn identical() {
        let a = array![3u64, 0, 7, 1];
        let sim = cosine_similarity(a.view(), a.view()).unwrap();
        assert!((sim - 1.0).abs() < 1e-12);
    }

    #[test]
    fn disjoint() {
        let a = array![4u64, 0, 0, 0];
        let b = array![0u64, 0, 0, 4];
        assert_eq!(cosine_similarity(a.view(), b.view()).unwrap(), 0.0);
    }

    #[test]
    fn scale_invariant() {
        let a = array![1u64, 2, 3];
        let b = array![10u64, 20, 30];
        let sim = cosine_similarity(a.view(), b.view()).unwrap();
        assert!((sim - 1.0).abs() < 1e-12);
    }

    #[test]
    fn known_value() {
        // (1*1) / (sqrt(2) * 1)
        let a = array![1u64, 1];
        let b = array![1u64, 0];
        let sim = cosine_similarity(a.view(), b.view()).unwrap();
        assert!((sim - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn symmetric() {
        let a = array![5u64, 1, 0, 9, 2];
        let b = array![0u64, 3, 8, 1, 1];
        assert_eq!(
            cosine_similarity(a.view(), b.view()).unwrap(),
            cosine_similarity(b.view(), a.view()).unwrap()
        );
    }

    #[test]
    fn length_mismatch() {
        let a = array![1u64, 2];
        let b = array![1u64, 2, 3];
        assert!(matches!(cosine_similarity(a.view(), b.view()), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn zero_norm() {
        let a = array![0u64, 0, 0];
        let b = array![1u64, 2, 3];
        assert_eq!(cosine_similarity(a.view(), b.view()), Err(Error::DegenerateSimilarity));
        assert_eq!(cosine_similarity(b.view(), a.view()), Err(Error::DegenerateSimilarity));
    }
}
