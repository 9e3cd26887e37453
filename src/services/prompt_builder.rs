//! 提示词渲染能力
//!
//! 模板文本是权威的输出契约：27 个字段、固定顺序、格式规则，
//! 以及"只返回一个方括号列表"的硬性要求。运行时只做占位符替换，
//! 不得改写模板措辞

/// 文档文本的占位符
const LEASE_TEXT_PLACEHOLDER: &str = "{lease_text}";

/// 提取指令模板
pub const PROMPT_TEMPLATE: &str = r#"Extract the following lease information from the text below:
- Effective Date
- Landlord
- Tenant
- Leased Premises (unit numbers, e.g., 13, 14)
- Leased Premises Address
- Square Footage (sum if more than one unit, numbers only, no labels like "sq. ft.")
- Security Deposit
- Possession Date
- Commencement Date
- Term (Years)
- Minimum Rent Year 1 to Year 10 (in $/sf, calculated from total square footage)
- Renewal Option
- Permitted Use
- Insurance Requirement
- Fixturing Period
- Signage Rent
- Parking Rent
- Right of First Refusal

Return exactly one row as a Python list. Each field must be wrapped in double quotes to prevent commas from splitting fields.

Use consistent formatting:
- All dates must be written as 'Month D, YYYY' (e.g., June 1, 2025)
- Minimum Rent values must be formatted as dollar amounts, e.g., $19.00
- Lease terms must be expressed as numbers (e.g., 5 not "FIVE")
- Leased Premises must be described by unit name/number, not just a count

If the lease is shorter than 10 years, leave the remaining minimum rent year fields as empty strings ("").
Do not include any explanation before or after the list.

Order: Effective Date, Landlord, Tenant, Leased Premises, Leased Premises Address, Square Footage, Security Deposit, Possession Date, Commencement Date, Term (Years), Minimum Rent Year 1 ($/sf), Minimum Rent Year 2 ($/sf), Minimum Rent Year 3 ($/sf), Minimum Rent Year 4 ($/sf), Minimum Rent Year 5 ($/sf), Minimum Rent Year 6 ($/sf), Minimum Rent Year 7 ($/sf), Minimum Rent Year 8 ($/sf), Minimum Rent Year 9 ($/sf), Minimum Rent Year 10 ($/sf), Renewal Option, Permitted Use, Insurance Requirement, Fixturing Period, Signage Rent, Parking Rent, Right of First Refusal

TEXT:
"""{lease_text}"""
"#;

/// 把文档文本代入模板，生成发送给 LLM 的完整提示词
///
/// 同一段文本渲染两次得到的提示词逐字节相同
pub fn build_prompt(lease_text: &str) -> String {
    PROMPT_TEMPLATE.replace(LEASE_TEXT_PLACEHOLDER, lease_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_substituted() {
        let prompt = build_prompt("THE LEASE BODY");
        assert!(prompt.contains("THE LEASE BODY"));
        assert!(!prompt.contains(LEASE_TEXT_PLACEHOLDER));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let a = build_prompt("some lease text");
        let b = build_prompt("some lease text");
        assert_eq!(a, b);
    }

    #[test]
    fn test_template_states_output_contract() {
        let prompt = build_prompt("x");
        // 输出契约的关键句必须在模板里
        assert!(prompt.contains("Return exactly one row as a Python list"));
        assert!(prompt.contains("Do not include any explanation before or after the list"));
        assert!(prompt.contains("Minimum Rent Year 10 ($/sf)"));
    }
}
