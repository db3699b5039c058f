pub mod cli;
pub mod config;
pub mod error;
pub mod histogram;
pub mod pixels;
pub mod quantize;
pub mod ranker;
pub mod similarity;
pub mod utils;

pub use config::Opts;
pub use error::{Error, Result};
pub use histogram::{Histogram, histogram};
pub use pixels::RgbPixels;
pub use quantize::{BinSize, quantize};
pub use ranker::{Ranking, rank};
pub use similarity::{cosine_similarity, similarity};
