//! 业务逻辑服务模块
//!
//! 封装估值请求、页面解析和报表输出

pub mod bond_list; // 债券列表
pub mod pipeline;  // 估值流程
pub mod report;    // 报表输出
pub mod treasury;  // TreasuryDirect 估值服务
