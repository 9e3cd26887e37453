/// 单份租约的处理上下文
///
/// 只携带汇报和日志需要的定位信息
#[derive(Debug, Clone)]
pub struct LeaseCtx {
    /// 批次内的序号（从 1 开始）
    pub index: usize,
    /// 文件名
    pub file_name: String,
}

impl LeaseCtx {
    pub fn new(index: usize, file_name: impl Into<String>) -> Self {
        Self {
            index,
            file_name: file_name.into(),
        }
    }
}
