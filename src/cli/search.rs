use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;

use crate::cli::SubCommandExtend;
use crate::config::{HistogramOptions, Opts, OutputFormat};
use crate::rank;
use crate::utils::{imread, load_images, render_grid, scan_images, suffix_regex};

#[derive(Parser, Debug, Clone)]
pub struct SearchCommand {
    #[command(flatten)]
    pub hist: HistogramOptions,
    /// 图片库所在目录
    pub dir: PathBuf,
    /// 被搜索的图片路径
    #[arg(default_value = "query.jpg")]
    pub query: PathBuf,
    /// 显示的结果数量
    #[arg(long, value_name = "COUNT", default_value_t = 5)]
    pub count: usize,
    /// 扫描的文件后缀名，多个后缀用逗号分隔
    #[arg(short, long, default_value = "jpg,jpeg,png,bmp,gif,webp,tiff")]
    pub suffix: String,
    /// 是否扫描子目录
    #[arg(short, long)]
    pub recursive: bool,
    /// 输出格式
    #[arg(long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Table)]
    pub output_format: OutputFormat,
    /// 将排名靠前的图片拼接成网格并保存到文件。网格中只有缩略图，相似度分数见表格或 JSON 输出
    #[arg(long, value_name = "PATH")]
    pub grid: Option<PathBuf>,
    /// 网格的列数
    #[arg(
        long,
        value_name = "N",
        default_value_t = 3,
        value_parser = clap::value_parser!(u32).range(1..=64)
    )]
    pub columns: u32,
    /// 网格中每个格子的边长（像素）
    #[arg(
        long,
        value_name = "PIXELS",
        default_value_t = 256,
        value_parser = clap::value_parser!(u32).range(1..=4096)
    )]
    pub cell_size: u32,
}

#[derive(Debug, Serialize)]
struct SearchResult {
    score: f64,
    path: String,
}

impl SubCommandExtend for SearchCommand {
    fn run(&self, _opts: &Opts) -> Result<()> {
        let re_suf = suffix_regex(&self.suffix)?;
        let paths = scan_images(&self.dir, &re_suf, self.recursive)?;
        info!("在 {} 中找到 {} 张图片", self.dir.display(), paths.len());

        let database = load_images(&paths)?;
        let query = imread(&self.query)?;

        let ranking = rank(&database, &query, self.hist.bin_size.get())?;

        let result = ranking
            .entries()
            .iter()
            .take(self.count)
            .map(|e| SearchResult {
                score: e.score,
                path: e.image.path.to_string_lossy().into_owned(),
            })
            .collect::<Vec<_>>();
        print_result(&result, self.output_format)?;

        if let Some(path) = &self.grid {
            let images = ranking.images().take(self.count).map(|f| &f.image).collect::<Vec<_>>();
            render_grid(&images, self.columns, self.cell_size)?
                .save(path)
                .with_context(|| format!("无法保存网格图片: {}", path.display()))?;
            info!("结果网格已保存到 {}", path.display());
        }

        Ok(())
    }
}

fn print_result(result: &[SearchResult], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?)
        }
        OutputFormat::Table => {
            for r in result {
                println!("{:.4}\t{}", r.score, r.path);
            }
        }
    }
    Ok(())
}
