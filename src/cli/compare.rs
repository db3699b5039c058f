use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::debug;

use crate::Histogram;
use crate::cli::SubCommandExtend;
use crate::config::{HistogramOptions, Opts};
use crate::utils::imread;

#[derive(Parser, Debug, Clone)]
pub struct CompareCommand {
    #[command(flatten)]
    pub hist: HistogramOptions,
    /// 第一张图片路径
    pub image1: PathBuf,
    /// 第二张图片路径
    pub image2: PathBuf,
}

impl SubCommandExtend for CompareCommand {
    fn run(&self, _opts: &Opts) -> Result<()> {
        let bin_size = self.hist.bin_size;
        let hist1 = Histogram::build(&imread(&self.image1)?, bin_size)?;
        let hist2 = Histogram::build(&imread(&self.image2)?, bin_size)?;
        debug!("非空桶数量: {} / {}", hist1.nonzero_bins().count(), hist2.nonzero_bins().count());
        debug!("直方图范数: {:.2} / {:.2}", hist1.norm(), hist2.norm());

        println!("{:.4}", hist1.similarity(&hist2)?);
        Ok(())
    }
}
