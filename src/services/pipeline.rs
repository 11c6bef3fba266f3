//! 估值流程
//!
//! 逐只债券请求估值页面并解析，结果顺序与输入顺序一致

use super::treasury::{extract_valuation_record, PriceSource};
use crate::error::Result;
use crate::models::{BondFailure, BondQuery, OnError, ValuationRecord};

/// 一次运行的结果
#[derive(Debug, Default)]
pub struct PipelineOutput {
    pub records: Vec<ValuationRecord>,
    /// 仅在跳过模式下非空
    pub failures: Vec<BondFailure>,
}

/// 获取并解析单只债券
pub async fn value_bond<S: PriceSource>(source: &S, query: &BondQuery) -> Result<ValuationRecord> {
    let html = source.fetch(query).await?;
    extract_valuation_record(&html)
}

/// 顺序处理所有债券
///
/// `OnError::Abort` 时遇到第一个错误即返回；`OnError::Skip` 时记录失败并继续
pub async fn run<S: PriceSource>(
    source: &S,
    queries: &[BondQuery],
    on_error: OnError,
) -> Result<PipelineOutput> {
    let mut output = PipelineOutput::default();

    for query in queries {
        match value_bond(source, query).await {
            Ok(record) => output.records.push(record),
            Err(e) if on_error == OnError::Skip => {
                log::warn!("跳过债券 {} ({}): {}", query.serial(), query.series(), e);
                output.failures.push(BondFailure {
                    serial: query.serial().to_string(),
                    series: query.series().to_string(),
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                log::error!("债券 {} ({}) 估值失败: {}", query.serial(), query.series(), e);
                return Err(e);
            }
        }
    }

    log::info!(
        "估值完成: 成功 {} 只, 失败 {} 只",
        output.records.len(),
        output.failures.len()
    );
    Ok(output)
}
