//! 提取任务与状态机
//!
//! 一个任务对应一个上传的 PDF 文件，只在单次批处理运行期间存在于内存中

use crate::error::{AppError, ErrorKind};

/// 任务状态
///
/// 正常路径：Queued → Extracted → SizeChecked → Prompted → Completed →
/// Parsed → Validated → Written
///
/// Extracted 之后的任意一步都可能进入终态 SkippedTooLarge 或 Failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Queued,
    Extracted,
    SizeChecked,
    Prompted,
    Completed,
    Parsed,
    Validated,
    Written,
    SkippedTooLarge,
    Failed,
}

/// 单个任务的最终结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// 成功写入表格
    Success,
    /// 文本超出令牌预算，未调用 LLM
    SkippedTooLarge { estimated_tokens: usize },
    /// 处理失败，批次继续
    Failed { kind: ErrorKind, message: String },
}

impl JobOutcome {
    /// 从错误构造失败结果，保留错误种类
    pub fn failed(err: &AppError) -> Self {
        JobOutcome::Failed {
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, JobOutcome::Success)
    }
}

/// 单个 PDF 文件的提取任务
#[derive(Debug)]
pub struct ExtractionJob {
    /// 文件名（用于汇报）
    pub file_name: String,
    /// PDF 原始字节
    pub bytes: Vec<u8>,
    /// 提取出的文本（提取步骤之后填充）
    pub text: Option<String>,
    /// 当前状态
    pub state: JobState,
}

impl ExtractionJob {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
            text: None,
            state: JobState::Queued,
        }
    }
}
