//! 令牌预算检查能力
//!
//! 在调用 LLM 之前估算文本的令牌占用，超出上限的文件直接跳过，
//! 避免注定失败或被截断的计费调用

use crate::error::{AppError, AppResult};

/// 估算用的每令牌字符数
///
/// 真实比例约为 4 字符/令牌，这里取 3 故意高估，
/// 宁可误跳过也不让端点悄悄截断
const CHARS_PER_TOKEN: usize = 3;

/// 估算文本的令牌数（保守，向上取整）
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_TOKEN)
}

/// 检查文本是否在令牌预算内
///
/// # 返回
/// 预算内返回估算令牌数，超出则返回 `SizeExceeded`
pub fn check(text: &str, ceiling: usize) -> AppResult<usize> {
    let estimated = estimate_tokens(text);
    if estimated > ceiling {
        return Err(AppError::SizeExceeded {
            estimated_tokens: estimated,
            ceiling,
        });
    }
    Ok(estimated)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CEILING: usize = 12_000;

    #[test]
    fn test_over_ceiling_is_skipped() {
        // 39_000 字符 / 3 = 13_000 令牌 > 12_000
        let text = "a".repeat(39_000);
        assert_eq!(estimate_tokens(&text), 13_000);

        let result = check(&text, CEILING);
        assert!(matches!(
            result,
            Err(AppError::SizeExceeded {
                estimated_tokens: 13_000,
                ceiling: CEILING,
            })
        ));
    }

    #[test]
    fn test_under_ceiling_proceeds() {
        // 35_997 字符 / 3 = 11_999 令牌 < 12_000
        let text = "a".repeat(35_997);
        assert_eq!(check(&text, CEILING).unwrap(), 11_999);
    }

    #[test]
    fn test_exactly_at_ceiling_proceeds() {
        let text = "a".repeat(36_000);
        assert_eq!(check(&text, CEILING).unwrap(), 12_000);
    }

    #[test]
    fn test_estimate_rounds_up() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("ab"), 1);
        assert_eq!(estimate_tokens("abcd"), 2);
    }
}
