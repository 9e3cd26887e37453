//! 业务能力层
//!
//! 每个服务只描述"我能做什么"，只处理单个文档，不关心批次流程

pub mod llm_service;
pub mod pdf_service;
pub mod prompt_builder;
pub mod response_parser;
pub mod row_validator;
pub mod sheet_service;
pub mod size_guard;

pub use llm_service::LlmService;
pub use sheet_service::SheetService;

use crate::error::AppResult;

/// 补全后端接口
///
/// 把"一段提示词 → 一段原始文本"隔离成独立接口，
/// 便于替换提取后端（不同模型、规则引擎、测试桩）而不动流程层
pub trait CompletionBackend {
    /// 把渲染好的提示词作为单条 user 消息发送，返回原始响应文本
    fn complete(&self, prompt: &str) -> impl std::future::Future<Output = AppResult<String>>;
}

/// 行写入接口
///
/// 把"一行字段值 → 持久化"隔离成独立接口，测试中可用内存桩替代
pub trait RowSink {
    /// 按表格列顺序追加一行
    fn append_row(&self, row: &[String]) -> impl std::future::Future<Output = AppResult<()>>;
}
