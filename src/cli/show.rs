use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;

use crate::Histogram;
use crate::cli::SubCommandExtend;
use crate::config::{HistogramOptions, Opts, OutputFormat};
use crate::utils::imread;

#[derive(Parser, Debug, Clone)]
pub struct ShowCommand {
    #[command(flatten)]
    pub hist: HistogramOptions,
    /// 图片路径
    pub image: PathBuf,
    /// 只显示计数最多的 N 个桶
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
    /// 输出格式
    #[arg(long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Table)]
    pub output_format: OutputFormat,
}

impl SubCommandExtend for ShowCommand {
    fn run(&self, _opts: &Opts) -> Result<()> {
        let hist = Histogram::build(&imread(&self.image)?, self.hist.bin_size)?;

        let mut bins = hist.nonzero_bins().collect::<Vec<_>>();
        info!("共 {} 个像素，{} / {} 个桶非空", hist.total(), bins.len(), hist.len());
        if let Some(top) = self.top {
            bins.sort_by(|a, b| b.count.cmp(&a.count));
            bins.truncate(top);
        }

        match self.output_format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&bins)?),
            OutputFormat::Table => {
                for bin in bins {
                    println!("{}\t{}\t{}\t{}", bin.r, bin.g, bin.b, bin.count);
                }
            }
        }
        Ok(())
    }
}
