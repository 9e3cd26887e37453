//! 租约处理流程 - 流程层
//!
//! 核心职责：定义"一份租约"的完整处理流程
//!
//! 流程顺序：
//! 1. 提取 PDF 文本 → 2. 令牌预算检查 → 3. 渲染提示词 →
//! 4. LLM 补全 → 5. 解析列表 → 6. 结构校验 → 7. 追加到表格
//!
//! 任何一步失败都把任务置为终态并返回原因，批次继续处理后续文件

use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::job::{ExtractionJob, JobOutcome, JobState};
use crate::services::{
    pdf_service, prompt_builder, response_parser, row_validator, size_guard, CompletionBackend,
    RowSink,
};
use crate::utils::logging::truncate_text;
use crate::workflow::lease_ctx::LeaseCtx;

/// 提取文本短于该字符数时提示可能是扫描件
const NEAR_EMPTY_TEXT_CHARS: usize = 40;

/// 租约处理流程
///
/// - 编排单份文档的完整处理步骤并推进任务状态机
/// - 不持有批次资源，不决定处理顺序和限速
/// - 只依赖业务能力接口（`CompletionBackend` / `RowSink`）
pub struct LeaseFlow<C, S> {
    backend: C,
    sink: S,
    token_ceiling: usize,
    verbose_logging: bool,
}

impl<C: CompletionBackend, S: RowSink> LeaseFlow<C, S> {
    /// 创建新的租约处理流程
    pub fn new(backend: C, sink: S, config: &Config) -> Self {
        Self {
            backend,
            sink,
            token_ceiling: config.token_ceiling,
            verbose_logging: config.verbose_logging,
        }
    }

    /// 处理单份租约，返回最终结果
    ///
    /// 所有错误都在这里收敛为 `JobOutcome`，不向批次层传播
    pub async fn run(&self, job: &mut ExtractionJob, ctx: &LeaseCtx) -> JobOutcome {
        match self.run_inner(job, ctx).await {
            Ok(outcome) => outcome,
            Err(e) => {
                job.state = JobState::Failed;
                error!("[租约 {}] ❌ {} 处理失败: {}", ctx.index, ctx.file_name, e);
                JobOutcome::failed(&e)
            }
        }
    }

    async fn run_inner(
        &self,
        job: &mut ExtractionJob,
        ctx: &LeaseCtx,
    ) -> AppResult<JobOutcome> {
        // ========== 步骤 1: 提取文本 ==========
        let text = pdf_service::extract_text(&job.bytes)?;
        job.state = JobState::Extracted;

        if text.trim().chars().count() < NEAR_EMPTY_TEXT_CHARS {
            warn!(
                "[租约 {}] ⚠️ {} 几乎没有可提取文本，可能是纯图片扫描件",
                ctx.index, ctx.file_name
            );
        }

        // ========== 步骤 2: 令牌预算检查 ==========
        let estimated_tokens = match size_guard::check(&text, self.token_ceiling) {
            Ok(estimated) => estimated,
            Err(AppError::SizeExceeded {
                estimated_tokens,
                ceiling,
            }) => {
                job.state = JobState::SkippedTooLarge;
                warn!(
                    "[租约 {}] ⚠️ {} 文本过长，跳过: 估算 {} 令牌, 上限 {}",
                    ctx.index, ctx.file_name, estimated_tokens, ceiling
                );
                return Ok(JobOutcome::SkippedTooLarge { estimated_tokens });
            }
            Err(e) => return Err(e),
        };
        job.state = JobState::SizeChecked;
        info!(
            "[租约 {}] 📄 文本提取完成，估算 {} 令牌",
            ctx.index, estimated_tokens
        );

        // ========== 步骤 3: 渲染提示词 ==========
        let prompt = prompt_builder::build_prompt(&text);
        job.text = Some(text);
        job.state = JobState::Prompted;

        // ========== 步骤 4: LLM 补全 ==========
        info!("[租约 {}] 🤖 正在调用 LLM 提取租约条款...", ctx.index);
        let raw_response = self.backend.complete(&prompt).await?;
        job.state = JobState::Completed;

        if self.verbose_logging {
            info!(
                "[租约 {}] LLM 响应预览: {}",
                ctx.index,
                truncate_text(&raw_response, 120)
            );
        }

        // ========== 步骤 5: 解析列表 ==========
        let fields = response_parser::parse_field_list(&raw_response)?;
        job.state = JobState::Parsed;

        // ========== 步骤 6: 结构校验 ==========
        let record = row_validator::validate(fields)?;
        job.state = JobState::Validated;

        // ========== 步骤 7: 追加到表格 ==========
        self.sink.append_row(record.fields()).await?;
        job.state = JobState::Written;

        info!(
            "[租约 {}] ✅ {} 已写入表格",
            ctx.index, ctx.file_name
        );

        Ok(JobOutcome::Success)
    }
}
