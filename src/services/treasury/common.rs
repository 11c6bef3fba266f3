//! 公共常量和辅助函数

use chrono::Utc;
use chrono_tz::America::New_York;

// ==================== TreasuryDirect 常量 ====================

/// 储蓄债券估值计算器
pub const TREASURY_SBC_PRICE_URL: &str = "https://www.treasurydirect.gov/BC/SBCPrice";
/// 估值结果表格选择器
pub const BOND_TABLE_SELECTOR: &str = "table.bnddata";
/// 触发计算动作的表单字段
pub const CALCULATE_FIELD: (&str, &str) = ("btnAdd.x", "CALCULATE");

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// 获取美东时间当前月份（MM/YYYY），作为默认估值日期
pub fn current_month() -> String {
    Utc::now().with_timezone(&New_York).format("%m/%Y").to_string()
}

/// 去掉单元格首尾的 HTML 排版空白（空格、换行、制表符），其余内容保持原样
pub fn clean_cell_text(s: &str) -> String {
    s.trim_matches(|c: char| c.is_ascii_whitespace()).to_string()
}
