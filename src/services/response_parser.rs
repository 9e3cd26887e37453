//! LLM 响应解析能力
//!
//! 模型被要求只返回一个方括号列表，但实际响应前后经常夹带说明文字。
//! 这里先用正则定位方括号区间（从第一个 `[` 贪婪匹配到最后一个 `]`，
//! 与原始行为一致），再把区间内容解码为扁平的字符串序列

use crate::error::{AppError, AppResult};
use crate::utils::logging::truncate_text;
use regex::Regex;
use std::iter::Peekable;
use std::str::Chars;
use std::sync::LazyLock;

static LIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("列表正则应合法"));

/// 从原始响应中解析字段列表
///
/// # 失败
/// - `NoListFound`: 响应中没有方括号区间
/// - `MalformedList`: 区间内不是扁平的字符串/数字字面量序列
pub fn parse_field_list(raw: &str) -> AppResult<Vec<String>> {
    let span = LIST_RE
        .find(raw)
        .ok_or_else(|| AppError::no_list_found(truncate_text(raw, 80)))?;

    decode_list(span.as_str())
}

/// 解码一个形如 `[ "a", 'b', 5, "" ]` 的字面量列表
///
/// 容忍单双引号、反斜杠转义、裸数字和末尾逗号；
/// 拒绝嵌套结构、未闭合引号和括号内的多余文字
fn decode_list(span: &str) -> AppResult<Vec<String>> {
    // 调用方保证 span 以 [ 开头、以 ] 结尾
    let inner = &span[1..span.len() - 1];

    let mut fields = Vec::new();
    let mut chars = inner.chars().peekable();

    loop {
        skip_whitespace(&mut chars);
        match chars.peek() {
            None => break,
            Some('\'') | Some('"') => {
                let quote = chars.next().unwrap_or('"');
                fields.push(read_quoted(&mut chars, quote)?);
            }
            Some('[') | Some('{') | Some('(') => {
                return Err(AppError::malformed_list("列表中包含嵌套结构"));
            }
            Some(',') => {
                return Err(AppError::malformed_list("列表中出现空元素"));
            }
            Some(_) => {
                fields.push(read_bare(&mut chars)?);
            }
        }

        // 元素之后只允许逗号或结束
        skip_whitespace(&mut chars);
        match chars.next() {
            None => break,
            Some(',') => continue,
            Some(c) => {
                return Err(AppError::malformed_list(format!(
                    "元素之间出现意外字符 '{}'",
                    c
                )));
            }
        }
    }

    Ok(fields)
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
        chars.next();
    }
}

/// 读取一个带引号的字符串（起始引号已被消费）
fn read_quoted(chars: &mut Peekable<Chars<'_>>, quote: char) -> AppResult<String> {
    let mut value = String::new();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some(other) => value.push(other),
                None => return Err(AppError::malformed_list("字符串以反斜杠结尾")),
            }
        } else if c == quote {
            return Ok(value);
        } else {
            value.push(c);
        }
    }
    Err(AppError::malformed_list("引号未闭合"))
}

/// 读取一个不带引号的裸值，只接受数字字面量
///
/// 括号里夹带的说明文字会落到这里，按格式错误处理
fn read_bare(chars: &mut Peekable<Chars<'_>>) -> AppResult<String> {
    let mut token = String::new();
    while let Some(&c) = chars.peek() {
        if c == ',' {
            break;
        }
        if matches!(c, '[' | ']' | '{' | '}' | '\'' | '"') {
            return Err(AppError::malformed_list(format!(
                "裸值中出现意外字符 '{}'",
                c
            )));
        }
        token.push(c);
        chars.next();
    }

    let token = token.trim().to_string();
    if token.parse::<f64>().is_ok() {
        Ok(token)
    } else {
        Err(AppError::malformed_list(format!(
            "无法识别的裸值: '{}'",
            truncate_text(&token, 40)
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;

    #[test]
    fn test_roundtrip_with_surrounding_prose() {
        let raw = r#"Some preamble text [ "a", "b", "" , "c" ] trailing notes"#;
        let fields = parse_field_list(raw).unwrap();
        assert_eq!(fields, vec!["a", "b", "", "c"]);
    }

    #[test]
    fn test_no_list_found() {
        let raw = "I'm sorry, the document does not appear to be a lease.";
        let result = parse_field_list(raw);
        assert!(matches!(
            result,
            Err(AppError::Parse(ParseError::NoListFound { .. }))
        ));
    }

    #[test]
    fn test_single_quotes_and_escapes() {
        let raw = r#"['June 1, 2025', "O\'Brien Holdings Ltd.", "5\" unit"]"#;
        let fields = parse_field_list(raw).unwrap();
        assert_eq!(
            fields,
            vec!["June 1, 2025", "O'Brien Holdings Ltd.", "5\" unit"]
        );
    }

    #[test]
    fn test_bare_numbers_are_accepted() {
        let fields = parse_field_list(r#"["Unit 13", 5, 2450.50]"#).unwrap();
        assert_eq!(fields, vec!["Unit 13", "5", "2450.50"]);
    }

    #[test]
    fn test_trailing_comma_is_tolerated() {
        let fields = parse_field_list(r#"["a", "b",]"#).unwrap();
        assert_eq!(fields, vec!["a", "b"]);
    }

    #[test]
    fn test_nested_structure_is_malformed() {
        let result = parse_field_list(r#"["a", ["b", "c"]]"#);
        assert!(matches!(
            result,
            Err(AppError::Parse(ParseError::MalformedList { .. }))
        ));
    }

    #[test]
    fn test_unclosed_quote_is_malformed() {
        let result = parse_field_list(r#"["a", "b]"#);
        assert!(matches!(
            result,
            Err(AppError::Parse(ParseError::MalformedList { .. }))
        ));
    }

    #[test]
    fn test_prose_inside_brackets_is_malformed() {
        let result = parse_field_list(r#"["a" here is my explanation, "b"]"#);
        assert!(matches!(
            result,
            Err(AppError::Parse(ParseError::MalformedList { .. }))
        ));
    }

    #[test]
    fn test_two_lists_span_to_last_bracket() {
        // 与原始行为一致：从第一个 [ 贪婪到最后一个 ]，
        // 两个列表之间的文字会导致格式错误而不是悄悄取第一个
        let result = parse_field_list(r#"["a"] and also ["b"]"#);
        assert!(matches!(
            result,
            Err(AppError::Parse(ParseError::MalformedList { .. }))
        ));
    }

    #[test]
    fn test_empty_list_decodes_to_zero_fields() {
        let fields = parse_field_list("[]").unwrap();
        assert!(fields.is_empty());
    }
}
