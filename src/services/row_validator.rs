//! 行结构校验能力
//!
//! 字段数量是硬性关卡：数量不对说明模型对这份文档的提取不可靠，
//! 宁可整行失败也不能写入残缺的表格行。
//! 字段内容的格式检查只发警告，不拦截（内容以模型输出为准）

use crate::error::{AppError, AppResult};
use crate::models::lease::{LeaseRecord, LEASE_FIELDS, LEASE_FIELD_COUNT};
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]+ \d{1,2}, \d{4}$").expect("日期正则应合法"));
static CURRENCY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$\d{1,3}(,\d{3})*(\.\d+)?$").expect("金额正则应合法"));

/// 日期字段下标：Effective Date / Possession Date / Commencement Date
const DATE_FIELD_INDEXES: [usize; 3] = [0, 7, 8];
/// 年度租金字段下标区间（Year 1 到 Year 10）
const RENT_FIELD_RANGE: std::ops::Range<usize> = 10..20;

/// 校验解码出的字段序列并构造租约记录
///
/// # 失败
/// - `SchemaMismatch`: 字段数量不等于 27
pub fn validate(fields: Vec<String>) -> AppResult<LeaseRecord> {
    if fields.len() != LEASE_FIELD_COUNT {
        return Err(AppError::SchemaMismatch {
            expected: LEASE_FIELD_COUNT,
            actual: fields.len(),
        });
    }

    warn_on_format_drift(&fields);

    Ok(LeaseRecord::new_unchecked(fields))
}

/// 内容级格式检查（只警告，不拦截）
fn warn_on_format_drift(fields: &[String]) {
    for idx in DATE_FIELD_INDEXES {
        let value = &fields[idx];
        if !value.is_empty() && !DATE_RE.is_match(value) {
            warn!(
                "字段 '{}' 的日期格式可疑: '{}'",
                LEASE_FIELDS[idx], value
            );
        }
    }

    for idx in RENT_FIELD_RANGE {
        let value = &fields[idx];
        if !value.is_empty() && !CURRENCY_RE.is_match(value) {
            warn!(
                "字段 '{}' 的金额格式可疑: '{}'",
                LEASE_FIELDS[idx], value
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 构造一行合法的 27 字段测试数据（5 年租期，后 5 年租金为空）
    fn sample_fields() -> Vec<String> {
        let mut fields = vec![
            "June 1, 2025".to_string(),
            "Landlord Properties Inc.".to_string(),
            "Tenant Coffee Ltd.".to_string(),
            "Units 13, 14".to_string(),
            "123 Main Street, Toronto".to_string(),
            "2,450".to_string(),
            "$9,800.00".to_string(),
            "May 1, 2025".to_string(),
            "June 1, 2025".to_string(),
            "5".to_string(),
        ];
        for year in 1..=5 {
            fields.push(format!("${}.00", 18 + year));
        }
        for _ in 6..=10 {
            fields.push(String::new());
        }
        fields.extend(
            [
                "Two 5-year options",
                "Coffee shop",
                "$5M commercial general liability",
                "60 days",
                "$200.00/month",
                "$75.00/stall/month",
                "Yes",
            ]
            .map(String::from),
        );
        fields
    }

    #[test]
    fn test_exactly_27_fields_pass() {
        let fields = sample_fields();
        assert_eq!(fields.len(), 27);

        let record = validate(fields).unwrap();
        assert_eq!(record.fields().len(), 27);
        // 空字符串是"租期不足 10 年"的合法哨兵值
        assert_eq!(record.fields()[19], "");
    }

    #[test]
    fn test_wrong_arity_fails() {
        let fields: Vec<String> = (0..20).map(|i| i.to_string()).collect();
        let result = validate(fields);
        assert!(matches!(
            result,
            Err(AppError::SchemaMismatch {
                expected: 27,
                actual: 20,
            })
        ));
    }

    #[test]
    fn test_no_silent_padding_or_truncation() {
        let fields: Vec<String> = (0..28).map(|i| i.to_string()).collect();
        assert!(validate(fields).is_err());
    }

    #[test]
    fn test_format_drift_does_not_fail() {
        // 内容格式检查是可选的附加检查，不是硬性关卡
        let mut fields = sample_fields();
        fields[0] = "2025-06-01".to_string();
        fields[10] = "19 dollars".to_string();
        assert!(validate(fields).is_ok());
    }

    #[test]
    fn test_date_regex_shape() {
        assert!(DATE_RE.is_match("June 1, 2025"));
        assert!(DATE_RE.is_match("December 31, 1999"));
        assert!(!DATE_RE.is_match("2025-06-01"));
    }

    #[test]
    fn test_currency_regex_shape() {
        assert!(CURRENCY_RE.is_match("$19.00"));
        assert!(CURRENCY_RE.is_match("$1,250.50"));
        assert!(!CURRENCY_RE.is_match("19.00"));
    }
}
