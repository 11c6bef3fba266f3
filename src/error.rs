//! 错误类型定义
//!
//! 储蓄债券估值流程中的错误分类：服务端错误、页面解析错误、金额格式错误

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BondError>;

#[derive(Error, Debug)]
pub enum BondError {
    /// 估值服务返回非成功状态码
    #[error("估值服务返回异常状态: {status}")]
    Service { status: reqwest::StatusCode },

    /// 网络层错误（连接失败、超时等）
    #[error("请求估值服务失败: {0}")]
    Transport(#[from] reqwest::Error),

    /// 响应页面结构不符合预期
    #[error("解析估值页面失败: {0}")]
    Extraction(String),

    /// 当前价值字段无法解析为金额
    #[error("无法解析金额: {value:?}")]
    Format { value: String },

    /// 债券查询参数缺失或为空
    #[error("债券参数无效: {0}")]
    InvalidQuery(String),

    #[error("配置错误: {0}")]
    Config(String),
}
