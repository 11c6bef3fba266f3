//! 债券报表
//!
//! 固定宽度表格、合计行、失败列表以及排序

use chrono::NaiveDate;
use regex::Regex;
use std::cmp::Ordering;
use std::sync::OnceLock;

use crate::error::{BondError, Result};
use crate::models::{BondFailure, SortKey, ValuationRecord, VALUATION_FIELD_COUNT};

/// 表头
pub const HEADER: [&str; VALUATION_FIELD_COUNT] = [
    "Serial",
    "Series",
    "Denom",
    "IssueDate",
    "NextAccrual",
    "FinalMaturity",
    "IssuePrice",
    "Interest",
    "InterestRate",
    "Value",
];

/// 各列最小宽度（左对齐，超长不截断）
pub const COLUMN_WIDTHS: [usize; VALUATION_FIELD_COUNT] = [10, 6, 6, 10, 11, 13, 10, 8, 12, 5];

const SEPARATOR_WIDTH: usize = 103;

/// 合计金额起始列，与 Value 列对齐
fn value_column() -> usize {
    COLUMN_WIDTHS[..VALUATION_FIELD_COUNT - 1].iter().sum::<usize>() + VALUATION_FIELD_COUNT - 1
}

fn format_row(fields: [&str; VALUATION_FIELD_COUNT]) -> String {
    let cells: Vec<String> = fields
        .iter()
        .zip(COLUMN_WIDTHS.iter())
        .map(|(field, width)| format!("{:<width$}", field, width = *width))
        .collect();
    cells.join(" ")
}

/// 渲染表头及每只债券一行，保持输入顺序
pub fn render_table(records: &[ValuationRecord]) -> String {
    let mut out = format_row(HEADER);
    out.push('\n');

    for record in records {
        out.push_str(&format_row(record.fields()));
        out.push('\n');
    }

    out
}

fn currency_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^-?(\d{1,3}(,\d{3})+(\.\d*)?|\d+(\.\d*)?|\.\d+)$").unwrap()
    })
}

/// 解析金额字符串，如 "$1,234.56" 或 "56.80"
pub fn parse_currency(s: &str) -> Result<f64> {
    let trimmed = s.trim();
    let number = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();

    // 千位分隔符只允许出现在三位数字分组之间
    if !currency_regex().is_match(number) {
        return Err(BondError::Format { value: s.to_string() });
    }

    number.replace(',', "").parse::<f64>().map_err(|_| BondError::Format { value: s.to_string() })
}

/// 按输入顺序累加所有债券的当前价值
pub fn total_value(records: &[ValuationRecord]) -> Result<f64> {
    records
        .iter()
        .try_fold(0.0, |total, record| -> Result<f64> {
            Ok(total + parse_currency(&record.value)?)
        })
}

/// 金额文本：保留 f64 最短表示的全部精度，小数部分至少两位
fn format_amount(amount: f64) -> String {
    let text = amount.to_string();
    match text.split_once('.') {
        Some((_, fraction)) if fraction.len() >= 2 => text,
        Some(_) => format!("{}0", text),
        None => format!("{}.00", text),
    }
}

/// 渲染分隔线和合计行
pub fn render_total(records: &[ValuationRecord]) -> Result<String> {
    let total = total_value(records)?;

    Ok(format!(
        "{}\n{:<width$}${}\n",
        "-".repeat(SEPARATOR_WIDTH),
        "Total",
        format_amount(total),
        width = value_column()
    ))
}

/// 渲染跳过模式下失败的债券列表，无失败时为空
pub fn render_failures(failures: &[BondFailure]) -> String {
    if failures.is_empty() {
        return String::new();
    }

    let mut out = format!("\nFailed ({})\n", failures.len());
    for failure in failures {
        out.push_str(&format!(
            "{:<10} {:<6} {}\n",
            failure.serial, failure.series, failure.reason
        ));
    }
    out
}

/// 解析 MM/YYYY 格式的日期
fn parse_month(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("01/{}", s.trim()), "%d/%m/%Y").ok()
}

/// 可解析的值排在前面，无法解析的保持相对顺序排在最后
fn compare_optional<T: PartialOrd>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// 稳定排序
pub fn sort_records(records: &mut [ValuationRecord], key: SortKey) {
    match key {
        SortKey::Input => {}
        SortKey::Serial => records.sort_by(|a, b| a.serial.cmp(&b.serial)),
        SortKey::IssueDate => records.sort_by(|a, b| {
            compare_optional(parse_month(&a.issue_date), parse_month(&b.issue_date))
        }),
        SortKey::Value => records.sort_by(|a, b| {
            compare_optional(parse_currency(&a.value).ok(), parse_currency(&b.value).ok())
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(serial: &str, issue_date: &str, value: &str) -> ValuationRecord {
        ValuationRecord {
            serial: serial.to_string(),
            series: "EE".to_string(),
            denomination: "$50".to_string(),
            issue_date: issue_date.to_string(),
            next_accrual: "07/2024".to_string(),
            final_maturity: "01/2030".to_string(),
            issue_price: "$25.00".to_string(),
            interest: "$25.00".to_string(),
            interest_rate: "2.52%".to_string(),
            value: value.to_string(),
        }
    }

    fn serials(records: &[ValuationRecord]) -> Vec<&str> {
        records.iter().map(|r| r.serial.as_str()).collect()
    }

    #[test]
    fn test_render_table_empty_is_header_only() {
        let out = render_table(&[]);
        assert_eq!(
            out,
            "Serial     Series Denom  IssueDate  NextAccrual FinalMaturity IssuePrice Interest InterestRate Value\n"
        );
    }

    #[test]
    fn test_render_table_row_layout() {
        let out = render_table(&[record("1234567890", "01/2000", "$56.80")]);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "1234567890 EE     $50    01/2000    07/2024     01/2030       $25.00     $25.00   2.52%        $56.80"
        );
    }

    #[test]
    fn test_render_table_preserves_input_order() {
        let records = vec![
            record("CCCCCCCCCC", "03/2011", "$1.00"),
            record("AAAAAAAAAA", "01/2000", "$3.00"),
            record("BBBBBBBBBB", "02/2003", "$2.00"),
        ];
        let out = render_table(&records);
        let firsts: Vec<&str> = out
            .lines()
            .skip(1)
            .map(|line| line.split_whitespace().next().unwrap_or(""))
            .collect();

        assert_eq!(firsts, ["CCCCCCCCCC", "AAAAAAAAAA", "BBBBBBBBBB"]);
    }

    #[test]
    fn test_render_total_sum() {
        let records = vec![
            record("A", "01/2000", "$50.00"),
            record("B", "01/2000", "$75.50"),
            record("C", "01/2000", "$124.50"),
        ];

        assert_eq!(total_value(&records).unwrap(), 250.0);

        let out = render_total(&records).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "-".repeat(103));
        assert!(lines[1].starts_with("Total "));
        assert!(lines[1].ends_with("$250.00"));
        assert_eq!(lines[1].find('$'), Some(95));
    }

    #[test]
    fn test_render_total_empty() {
        assert_eq!(total_value(&[]).unwrap(), 0.0);
        assert!(render_total(&[]).unwrap().ends_with("$0.00\n"));
    }

    #[test]
    fn test_render_total_keeps_full_precision() {
        let records = vec![
            record("A", "01/2000", "$0.10"),
            record("B", "01/2000", "$0.20"),
            record("C", "01/2000", "$0.004"),
        ];

        let total = total_value(&records).unwrap();
        println!("  合计: {}", total);
        assert_eq!(total, 0.1 + 0.2 + 0.004);

        let out = render_total(&records).unwrap();
        assert!(out.ends_with(&format!("${}\n", total)));
        assert!(!out.ends_with("$0.30\n"));
    }

    #[test]
    fn test_format_amount() {
        let cases = vec![
            (250.0, "250.00"),
            (0.0, "0.00"),
            (52.2, "52.20"),
            (1234.56, "1234.56"),
            (0.125, "0.125"),
        ];

        for (input, expected) in cases {
            assert_eq!(format_amount(input), expected);
        }
    }

    #[test]
    fn test_render_total_rejects_unparseable_value() {
        let records = vec![record("A", "01/2000", "$50.00"), record("B", "01/2000", "N/A")];
        match render_total(&records) {
            Err(BondError::Format { value }) => assert_eq!(value, "N/A"),
            other => panic!("期望 Format 错误，实际: {:?}", other),
        }
    }

    #[test]
    fn test_parse_currency() {
        let cases = vec![
            ("$50.00", Some(50.0)),
            ("75.5", Some(75.5)),
            (" $1,234.56 ", Some(1234.56)),
            ("$.50", Some(0.5)),
            ("N/A", None),
            ("$", None),
            ("", None),
            ("$12abc", None),
            ("$1,234", Some(1234.0)),
            ("$12,345,678.90", Some(12345678.9)),
            ("$1,2,3", None),
            ("12,34", None),
            ("$1234,567", None),
        ];

        for (input, expected) in cases {
            let result = parse_currency(input).ok();
            println!("  {:?} -> {:?} (期望: {:?})", input, result, expected);
            assert_eq!(result, expected);
        }
    }

    #[test]
    fn test_render_failures() {
        assert_eq!(render_failures(&[]), "");

        let out = render_failures(&[BondFailure {
            serial: "1234567890".to_string(),
            series: "EE".to_string(),
            reason: "估值服务返回异常状态: 500 Internal Server Error".to_string(),
        }]);
        assert!(out.contains("Failed (1)"));
        assert!(out.contains("1234567890 EE     估值服务返回异常状态"));
    }

    #[test]
    fn test_sort_by_issue_date() {
        let mut records = vec![
            record("A", "03/2011", "$1.00"),
            record("B", "bad", "$1.00"),
            record("C", "12/1999", "$1.00"),
            record("D", "02/2003", "$1.00"),
        ];
        sort_records(&mut records, SortKey::IssueDate);
        assert_eq!(serials(&records), ["C", "D", "A", "B"]);
    }

    #[test]
    fn test_sort_by_value_and_serial() {
        let mut records = vec![
            record("B", "01/2000", "$200.00"),
            record("C", "01/2000", "N/A"),
            record("A", "01/2000", "$50.00"),
        ];

        sort_records(&mut records, SortKey::Value);
        assert_eq!(serials(&records), ["A", "B", "C"]);

        sort_records(&mut records, SortKey::Input);
        assert_eq!(serials(&records), ["A", "B", "C"]);

        records.reverse();
        sort_records(&mut records, SortKey::Serial);
        assert_eq!(serials(&records), ["A", "B", "C"]);
    }
}
