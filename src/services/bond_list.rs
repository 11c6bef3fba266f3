//! 债券列表
//!
//! 从 JSON 文件读取持有的债券并校验必填字段，文件格式:
//!
//! ```json
//! [
//!   {"serial": "xxxxxxxxxx", "series": "EE", "denomination": 50, "issue_date": "01/2000"},
//!   {"serial": "yyyyyyyyyy", "series": "EE", "denomination": 200, "issue_date": "03/2011", "date": "06/2024"}
//! ]
//! ```
//!
//! 未填写 `date` 时使用当前月份作为估值日期

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::treasury::common::current_month;
use crate::error::{BondError, Result};
use crate::models::BondQuery;

/// 面值，允许数字或字符串
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Denomination {
    Number(u64),
    Text(String),
}

impl Denomination {
    fn into_string(self) -> String {
        match self {
            Denomination::Number(n) => n.to_string(),
            Denomination::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
struct BondEntry {
    #[serde(default)]
    serial: String,
    #[serde(default)]
    series: String,
    denomination: Option<Denomination>,
    #[serde(default)]
    issue_date: String,
    date: Option<String>,
}

/// 解析债券列表 JSON 并校验
pub fn parse_bond_list(content: &str, default_date: &str) -> Result<Vec<BondQuery>> {
    let entries: Vec<BondEntry> = serde_json::from_str(content)
        .map_err(|e| BondError::InvalidQuery(format!("债券列表格式错误: {}", e)))?;

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            BondQuery::new(
                entry.serial,
                entry.series,
                entry.denomination.map(Denomination::into_string).unwrap_or_default(),
                entry.issue_date,
                entry.date.unwrap_or_else(|| default_date.to_string()),
            )
            .map_err(|e| match e {
                BondError::InvalidQuery(msg) => {
                    BondError::InvalidQuery(format!("第 {} 条: {}", index + 1, msg))
                }
                other => other,
            })
        })
        .collect()
}

/// 从文件加载债券列表
pub fn load_bond_list<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<BondQuery>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("读取债券列表 {} 失败", path.display()))?;

    let bonds = parse_bond_list(&content, &current_month())?;
    log::info!("从 {} 加载 {} 只债券", path.display(), bonds.len());
    Ok(bonds)
}
