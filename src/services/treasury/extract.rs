//! 估值结果页面解析

use scraper::{ElementRef, Html, Selector};

use super::common::{clean_cell_text, BOND_TABLE_SELECTOR};
use crate::error::{BondError, Result};
use crate::models::ValuationRecord;

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| BondError::Extraction(format!("无效的选择器 {}: {:?}", css, e)))
}

fn cell_text(cell: ElementRef) -> String {
    clean_cell_text(&cell.text().collect::<Vec<_>>().join(""))
}

/// 从估值页面提取债券数据
///
/// 定位 `table.bnddata`，第 0 行为表头，读取第 1 行的前十个单元格
pub fn extract_valuation_record(html: &str) -> Result<ValuationRecord> {
    let document = Html::parse_document(html);

    let table_selector = selector(BOND_TABLE_SELECTOR)?;
    let tr_selector = selector("tr")?;
    let td_selector = selector("td")?;

    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| BondError::Extraction(format!("未找到数据表格({})", BOND_TABLE_SELECTOR)))?;

    let row = table
        .select(&tr_selector)
        .nth(1)
        .ok_or_else(|| BondError::Extraction("数据表格缺少数据行".to_string()))?;

    let cells: Vec<String> = row.select(&td_selector).map(cell_text).collect();

    ValuationRecord::from_cells(cells)
}
