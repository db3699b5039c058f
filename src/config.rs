use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::*;
use crate::quantize::BinSize;

#[derive(Parser, Debug, Clone)]
pub struct HistogramOptions {
    /// 每个颜色通道的分桶数量，同时也是量化时的除数，范围 1 到 256
    #[arg(short, long, value_name = "N", default_value = "16", value_parser = parse_bin_size)]
    pub bin_size: BinSize,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "colorindex", version)]
pub struct Opts {
    #[command(subcommand)]
    pub subcmd: SubCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SubCommand {
    /// 按颜色直方图相似度对目录中的图片排序
    Search(SearchCommand),
    /// 计算两张图片的颜色直方图相似度
    Compare(CompareCommand),
    /// 显示图片颜色直方图中的非空桶
    Show(ShowCommand),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

fn parse_bin_size(s: &str) -> Result<BinSize, crate::Error> {
    s.parse()
}
