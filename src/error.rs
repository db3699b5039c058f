use thiserror::Error;

/// 颜色索引过程中可能出现的错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// 参数不合法，在任何计算开始之前返回
    #[error("无效的参数: {0}")]
    InvalidParameter(String),
    /// 输入数据不合法，如空数据库、零像素图片、直方图维度不一致
    #[error("无效的输入: {0}")]
    InvalidInput(String),
    /// 直方图的模为零，无法计算余弦相似度
    #[error("直方图为空，相似度无定义")]
    DegenerateSimilarity,
}

pub type Result<T> = std::result::Result<T, Error>;
