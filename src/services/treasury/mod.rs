//! TreasuryDirect 储蓄债券估值服务
//!
//! 估值请求与结果页面解析

pub mod client;
pub mod common;
pub mod extract;

// 重新导出常用函数，保持对外接口一致
pub use client::{PriceSource, TreasuryClient};
pub use extract::extract_valuation_record;
