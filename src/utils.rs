use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};
use log::{info, warn};
use regex::Regex;
use walkdir::WalkDir;

use crate::pixels::RgbPixels;

/// 进度条的统一样式
pub fn pb_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
        .expect("failed to build progress style")
}

/// 根据逗号分隔的后缀名构造不区分大小写的匹配正则
pub fn suffix_regex(suffix: &str) -> Result<Regex> {
    let re = format!("(?i)^({})$", suffix.replace(',', "|"));
    Regex::new(&re).with_context(|| format!("无效的后缀名: {suffix}"))
}

/// 读取图片并转换为 8 位 RGB
pub fn imread<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
    let path = path.as_ref();
    let img = image::open(path).with_context(|| format!("无法读取图片: {}", path.display()))?;
    Ok(img.to_rgb8())
}

/// 一张已解码的数据库图片
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub path: PathBuf,
    pub image: RgbImage,
}

impl RgbPixels for ImageFile {
    fn height(&self) -> usize {
        RgbPixels::height(&self.image)
    }

    fn width(&self) -> usize {
        RgbPixels::width(&self.image)
    }

    fn channels(&self) -> usize {
        RgbPixels::channels(&self.image)
    }

    fn rgb_pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.image.rgb_pixels()
    }
}

/// 列出目录中后缀名匹配的文件，按文件名排序
///
/// 参数：
/// - dir: 图片所在目录
/// - suffix: 后缀名匹配规则
/// - recursive: 是否扫描子目录
pub fn scan_images(dir: &Path, suffix: &Regex, recursive: bool) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("图片目录不存在或不是目录: {}", dir.display());
    }
    let max_depth = if recursive { usize::MAX } else { 1 };
    let paths = WalkDir::new(dir)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("跳过无法访问的路径: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension().map(|s| suffix.is_match(&s.to_string_lossy())) == Some(true)
        })
        .collect();
    Ok(paths)
}

/// 解码所有图片，任何一张失败都会中止
pub fn load_images(paths: &[PathBuf]) -> Result<Vec<ImageFile>> {
    let pb = ProgressBar::new(paths.len() as u64).with_style(pb_style());
    pb.set_message("读取图片");
    let images = paths
        .iter()
        .progress_with(pb.clone())
        .map(|path| -> Result<ImageFile> {
            Ok(ImageFile { path: path.clone(), image: imread(path)? })
        })
        .collect::<Result<Vec<_>>>()?;
    pb.finish_and_clear();
    info!("共读取 {} 张图片", images.len());
    Ok(images)
}

/// 将若干图片等比缩放后拼接成网格，每张图片居中放在 cell × cell 的格子里
///
/// 画布尺寸超出 u32 范围时返回错误
pub fn render_grid(images: &[&RgbImage], columns: u32, cell: u32) -> Result<RgbImage> {
    let columns = columns.max(1);
    let cell = cell.max(1);
    let rows = u32::try_from(images.len())
        .context("网格中的图片数量过多")?
        .div_ceil(columns)
        .max(1);
    let (Some(width), Some(height)) = (columns.checked_mul(cell), rows.checked_mul(cell)) else {
        bail!("网格尺寸溢出: --columns {columns} × --cell-size {cell}，共 {rows} 行");
    };
    let mut canvas = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));

    for (i, img) in images.iter().enumerate() {
        let (w, h) = img.dimensions();
        if w == 0 || h == 0 {
            continue;
        }
        let scale = (cell as f64 / w as f64).min(cell as f64 / h as f64);
        let nw = ((w as f64 * scale).round() as u32).clamp(1, cell);
        let nh = ((h as f64 * scale).round() as u32).clamp(1, cell);
        let thumb = imageops::resize(*img, nw, nh, FilterType::Triangle);

        let (col, row) = (i as u32 % columns, i as u32 / columns);
        let x = col * cell + (cell - nw) / 2;
        let y = row * cell + (cell - nh) / 2;
        imageops::overlay(&mut canvas, &thumb, x as i64, y as i64);
    }
    Ok(canvas)
}
