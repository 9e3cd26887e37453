//! 租约字段表
//!
//! 字段顺序与 Google 表格的列顺序一一对应，顺序不可改动

/// 租约表字段数量
pub const LEASE_FIELD_COUNT: usize = 27;

/// 租约表字段名（与表格列顺序一致）
pub const LEASE_FIELDS: [&str; LEASE_FIELD_COUNT] = [
    "Effective Date",
    "Landlord",
    "Tenant",
    "Leased Premises",
    "Leased Premises Address",
    "Square Footage",
    "Security Deposit",
    "Possession Date",
    "Commencement Date",
    "Term (Years)",
    "Minimum Rent Year 1 ($/sf)",
    "Minimum Rent Year 2 ($/sf)",
    "Minimum Rent Year 3 ($/sf)",
    "Minimum Rent Year 4 ($/sf)",
    "Minimum Rent Year 5 ($/sf)",
    "Minimum Rent Year 6 ($/sf)",
    "Minimum Rent Year 7 ($/sf)",
    "Minimum Rent Year 8 ($/sf)",
    "Minimum Rent Year 9 ($/sf)",
    "Minimum Rent Year 10 ($/sf)",
    "Renewal Option",
    "Permitted Use",
    "Insurance Requirement",
    "Fixturing Period",
    "Signage Rent",
    "Parking Rent",
    "Right of First Refusal",
];

/// 一份租约对应的 27 个字段值
///
/// 所有值都是字符串；租期不足 10 年时，多余的年度租金字段为空字符串。
/// 只能通过 `row_validator::validate` 构造，保证字段数量恒为 27
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaseRecord {
    fields: Vec<String>,
}

impl LeaseRecord {
    /// 由校验层调用，调用方必须已确认字段数量
    pub(crate) fn new_unchecked(fields: Vec<String>) -> Self {
        debug_assert_eq!(fields.len(), LEASE_FIELD_COUNT);
        Self { fields }
    }

    /// 按表格列顺序返回字段值
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_count_is_27() {
        assert_eq!(LEASE_FIELDS.len(), 27);
        assert_eq!(LEASE_FIELDS.len(), LEASE_FIELD_COUNT);
    }

    #[test]
    fn test_field_order_endpoints() {
        // 首尾字段固定，防止列顺序被意外改动
        assert_eq!(LEASE_FIELDS[0], "Effective Date");
        assert_eq!(LEASE_FIELDS[9], "Term (Years)");
        assert_eq!(LEASE_FIELDS[10], "Minimum Rent Year 1 ($/sf)");
        assert_eq!(LEASE_FIELDS[19], "Minimum Rent Year 10 ($/sf)");
        assert_eq!(LEASE_FIELDS[26], "Right of First Refusal");
    }
}
