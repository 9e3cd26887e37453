//! # Lease Reader
//!
//! 一个从租约 PDF 中提取结构化条款并写入 Google 表格的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 租约字段表、提取任务与状态机
//! - `LeaseRecord` - 一份租约对应的 27 个字段值
//! - `ExtractionJob` - 单个 PDF 文件的处理任务
//! - `loaders/pdf_loader` - 扫描文件夹并加载待处理的 PDF
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个文档
//! - `pdf_service` - PDF 文本提取能力
//! - `size_guard` - 令牌预算检查能力
//! - `prompt_builder` - 提示词渲染能力
//! - `LlmService` - LLM 提取能力（`CompletionBackend`）
//! - `response_parser` / `row_validator` - 响应解析与结构校验能力
//! - `SheetService` - Google 表格追加能力（`RowSink`）
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一份租约"的完整处理流程
//! - `LeaseCtx` - 上下文封装（文件名 + 序号）
//! - `LeaseFlow` - 流程编排（提取 → 预算检查 → LLM → 解析 → 校验 → 写入）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量处理器，顺序执行并限速
//! - `App` - 应用入口，组装真实服务并汇总统计

pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, ErrorKind};
pub use models::job::{ExtractionJob, JobOutcome, JobState};
pub use models::lease::{LeaseRecord, LEASE_FIELDS, LEASE_FIELD_COUNT};
pub use orchestrator::{App, BatchProcessor, BatchReport};
pub use services::{CompletionBackend, RowSink};
pub use workflow::{LeaseCtx, LeaseFlow};
