use log::debug;

use crate::error::{Error, Result};
use crate::histogram::Histogram;
use crate::pixels::RgbPixels;
use crate::quantize::BinSize;

/// 排序结果中的一项
#[derive(Debug, Clone, Copy)]
pub struct Ranked<'a, I> {
    /// 在输入数据库中的位置
    pub index: usize,
    pub image: &'a I,
    pub score: f64,
}

/// 按相似度从高到低排列的完整数据库
///
/// 分数与返回顺序对齐；输入顺序的分数另行保存在 `input_scores` 中
#[derive(Debug, Clone)]
pub struct Ranking<'a, I> {
    entries: Vec<Ranked<'a, I>>,
    input_scores: Vec<f64>,
}

impl<'a, I> Ranking<'a, I> {
    pub fn entries(&self) -> &[Ranked<'a, I>] {
        &self.entries
    }

    /// 排序后的图片
    pub fn images(&self) -> impl Iterator<Item = &'a I> + '_ {
        self.entries.iter().map(|e| e.image)
    }

    /// 与排序后图片一一对应的分数
    pub fn scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|e| e.score)
    }

    /// 按输入顺序排列的分数
    pub fn input_scores(&self) -> &[f64] {
        &self.input_scores
    }

    /// 排序后每一项在输入中的位置
    pub fn order(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.index).collect()
    }

    /// 拆分为 (排序后的图片, 对齐的分数)
    pub fn into_parts(self) -> (Vec<&'a I>, Vec<f64>) {
        self.entries.into_iter().map(|e| (e.image, e.score)).unzip()
    }
}

/// 按颜色直方图相似度对数据库中的图片排序
///
/// 返回全部图片的排列，而不是 top-k。分数相同的图片保持输入顺序。
///
/// 参数：
/// - database: 数据库图片，不能为空，尺寸可以各不相同
/// - query: 查询图片
/// - bin_size: 每个通道的分桶数量
pub fn rank<'a, I: RgbPixels>(
    database: &'a [I],
    query: &impl RgbPixels,
    bin_size: u32,
) -> Result<Ranking<'a, I>> {
    let bin_size = BinSize::new(bin_size)?;
    if database.is_empty() {
        return Err(Error::InvalidInput("数据库中没有图片".to_string()));
    }

    let hists = database
        .iter()
        .map(|image| Histogram::build(image, bin_size))
        .collect::<Result<Vec<_>>>()?;
    let query = Histogram::build(query, bin_size)?;

    let input_scores = rank_histograms(&hists, &query)?;
    let mut entries = database
        .iter()
        .zip(&input_scores)
        .enumerate()
        .map(|(index, (image, &score))| Ranked { index, image, score })
        .collect::<Vec<_>>();
    // sort_by 是稳定排序
    entries.sort_by(|a, b| b.score.total_cmp(&a.score));

    debug!(
        "对 {} 张图片完成排序，bin_size = {}，最高分 = {:.4}",
        entries.len(),
        bin_size,
        entries[0].score
    );

    Ok(Ranking { entries, input_scores })
}

/// 计算每个数据库直方图与查询直方图的相似度，按输入顺序返回
pub fn rank_histograms(database: &[Histogram], query: &Histogram) -> Result<Vec<f64>> {
    database.iter().map(|hist| query.similarity(hist)).collect()
}

#[cfg(test)]
mod tests {
    use ndarray::Array3;

    use super::*;

    fn solid(h: usize, w: usize, rgb: [u8; 3]) -> Array3<u8> {
        Array3::from_shape_fn((h, w, 3), |(_, _, c)| rgb[c])
    }

    #[test]
    fn red_before_blue() {
        let red = solid(2, 2, [255, 0, 0]);
        let blue = solid(2, 2, [0, 0, 255]);
        let db = vec![blue.clone(), red.clone()];

        let ranking = rank(&db, &red, 2).unwrap();
        assert_eq!(ranking.order(), vec![1, 0]);
        assert_eq!(ranking.input_scores(), &[0.0, 1.0]);

        let (images, scores) = ranking.into_parts();
        assert_eq!(images, vec![&red, &blue]);
        assert_eq!(scores, vec![1.0, 0.0]);
    }

    #[test]
    fn stable_ties() {
        let a = solid(2, 2, [10, 10, 10]);
        let b = solid(3, 1, [10, 10, 10]);
        let c = solid(1, 1, [200, 200, 200]);
        let db = vec![c.clone(), a.clone(), b.clone()];

        let ranking = rank(&db, &a, 8).unwrap();
        assert_eq!(ranking.order(), vec![1, 2, 0]);
    }

    #[test]
    fn empty_database() {
        let q = solid(1, 1, [0, 0, 0]);
        let db: Vec<Array3<u8>> = vec![];
        assert!(matches!(rank(&db, &q, 4), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn invalid_bin_size_first() {
        let q = solid(1, 1, [0, 0, 0]);
        let db: Vec<Array3<u8>> = vec![];
        assert!(matches!(rank(&db, &q, 0), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn empty_image_fails_whole_ranking() {
        let q = solid(1, 1, [0, 0, 0]);
        let db = vec![solid(1, 1, [0, 0, 0]), solid(0, 4, [0, 0, 0])];
        assert!(matches!(rank(&db, &q, 4), Err(Error::InvalidInput(_))));
        assert!(matches!(rank(&db[..1], &solid(4, 0, [0, 0, 0]), 4), Err(Error::InvalidInput(_))));
    }
}
