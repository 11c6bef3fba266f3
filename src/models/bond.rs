//! 储蓄债券数据模型
//!
//! 定义估值查询参数、估值结果以及报表相关的数据结构

use serde::{Deserialize, Serialize};

use crate::error::{BondError, Result};

/// 估值结果表格中的列数
pub const VALUATION_FIELD_COUNT: usize = 10;

/// 债券估值查询参数
///
/// 通过 [`BondQuery::new`] 创建，保证五个字段均非空
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BondQuery {
    serial: String,
    series: String,
    denomination: String,
    issue_date: String,
    date: String,
}

impl BondQuery {
    /// 创建查询参数，任一字段为空时返回 `InvalidQuery`
    ///
    /// # 参数
    /// - serial: 债券序列号
    /// - series: 债券系列（EE、I 等）
    /// - denomination: 面值
    /// - issue_date: 发行日期（MM/YYYY）
    /// - date: 估值日期（MM/YYYY）
    pub fn new(
        serial: impl Into<String>,
        series: impl Into<String>,
        denomination: impl Into<String>,
        issue_date: impl Into<String>,
        date: impl Into<String>,
    ) -> Result<Self> {
        let query = Self {
            serial: serial.into().trim().to_string(),
            series: series.into().trim().to_string(),
            denomination: denomination.into().trim().to_string(),
            issue_date: issue_date.into().trim().to_string(),
            date: date.into().trim().to_string(),
        };

        let fields = [
            ("serial", &query.serial),
            ("series", &query.series),
            ("denomination", &query.denomination),
            ("issue_date", &query.issue_date),
            ("date", &query.date),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| value.is_empty()) {
            return Err(BondError::InvalidQuery(format!("字段 {} 不能为空", name)));
        }

        Ok(query)
    }

    pub fn serial(&self) -> &str {
        &self.serial
    }

    pub fn series(&self) -> &str {
        &self.series
    }

    pub fn denomination(&self) -> &str {
        &self.denomination
    }

    pub fn issue_date(&self) -> &str {
        &self.issue_date
    }

    /// 估值（赎回）日期
    pub fn date(&self) -> &str {
        &self.date
    }
}

/// 债券估值结果
///
/// 字段顺序与估值页面表格的列顺序一致，所有值保持页面原样文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuationRecord {
    /// 序列号
    pub serial: String,
    /// 系列
    pub series: String,
    /// 面值
    pub denomination: String,
    /// 发行日期
    pub issue_date: String,
    /// 下次计息日期
    pub next_accrual: String,
    /// 最终到期日期
    pub final_maturity: String,
    /// 发行价格
    pub issue_price: String,
    /// 累计利息
    pub interest: String,
    /// 利率
    pub interest_rate: String,
    /// 当前价值（如 "$52.40"）
    pub value: String,
}

impl ValuationRecord {
    /// 按列顺序从表格单元格构造记录，单元格不足十个时返回 `Extraction`
    pub fn from_cells(cells: Vec<String>) -> Result<Self> {
        if cells.len() < VALUATION_FIELD_COUNT {
            return Err(BondError::Extraction(format!(
                "数据行只有 {} 列，期望 {} 列",
                cells.len(),
                VALUATION_FIELD_COUNT
            )));
        }

        let mut cells = cells.into_iter();
        let mut next = || cells.next().unwrap_or_default();

        Ok(Self {
            serial: next(),
            series: next(),
            denomination: next(),
            issue_date: next(),
            next_accrual: next(),
            final_maturity: next(),
            issue_price: next(),
            interest: next(),
            interest_rate: next(),
            value: next(),
        })
    }

    /// 按列顺序返回所有字段
    pub fn fields(&self) -> [&str; VALUATION_FIELD_COUNT] {
        [
            &self.serial,
            &self.series,
            &self.denomination,
            &self.issue_date,
            &self.next_accrual,
            &self.final_maturity,
            &self.issue_price,
            &self.interest,
            &self.interest_rate,
            &self.value,
        ]
    }
}

/// 跳过模式下记录的失败债券
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BondFailure {
    pub serial: String,
    pub series: String,
    pub reason: String,
}

/// 报表排序方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// 保持输入顺序
    #[default]
    Input,
    Serial,
    IssueDate,
    Value,
}

/// 单只债券查询失败时的处理策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnError {
    /// 终止整个流程
    #[default]
    Abort,
    /// 记录失败并继续处理后续债券
    Skip,
}
