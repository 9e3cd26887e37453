//! 批量租约处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量文件的处理和节奏控制。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：启动日志、组装真实服务（LLM + 表格）
//! 2. **批量加载**：扫描并加载所有待处理的 PDF（`Vec<ExtractionJob>`）
//! 3. **顺序执行**：严格逐个处理，作为对端点限速和表格写入配额的背压
//! 4. **调用间隔**：相邻两次处理之间固定等待，遵守服务商限速
//! 5. **协作取消**：每个任务开始前检查取消标志，批次可在文件之间中止
//! 6. **失败隔离**：单个文件失败不影响其余文件
//! 7. **全局统计**：汇总所有文件的处理结果

use crate::config::Config;
use crate::models::job::{ExtractionJob, JobOutcome};
use crate::models::loaders::pdf_loader;
use crate::services::{CompletionBackend, LlmService, RowSink, SheetService};
use crate::utils::logging::init_log_file;
use crate::workflow::{LeaseCtx, LeaseFlow};
use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// 批次处理报告
#[derive(Debug, Default)]
pub struct BatchReport {
    /// 批次内文件总数
    pub total: usize,
    /// 成功写入表格的数量
    pub success: usize,
    /// 因超出令牌预算被跳过的数量
    pub skipped: usize,
    /// 失败数量
    pub failed: usize,
    /// 因取消而未处理的数量
    pub cancelled: usize,
    /// 每个文件的最终结果（按处理顺序）
    pub outcomes: Vec<(String, JobOutcome)>,
}

/// 批量处理器
///
/// 顺序执行是有意为之：单个工作者 + 固定间隔就是限速机制本身。
/// 如需并行必须另行串行化表格写入并对端点并发加信号量
pub struct BatchProcessor<C, S> {
    flow: LeaseFlow<C, S>,
    inter_call_delay: Duration,
    cancel_flag: Arc<AtomicBool>,
}

impl<C: CompletionBackend, S: RowSink> BatchProcessor<C, S> {
    /// 创建新的批量处理器
    pub fn new(flow: LeaseFlow<C, S>, inter_call_delay: Duration) -> Self {
        Self {
            flow,
            inter_call_delay,
            cancel_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// 返回取消句柄，可在批次进行中从其他任务请求中止
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancel_flag.clone()
    }

    /// 顺序处理一批任务
    ///
    /// 取消只在文件之间生效，不会打断进行中的任务
    pub async fn run(&self, mut jobs: Vec<ExtractionJob>) -> BatchReport {
        let total = jobs.len();
        let mut report = BatchReport {
            total,
            ..Default::default()
        };

        for (idx, job) in jobs.iter_mut().enumerate() {
            if self.cancel_flag.load(Ordering::SeqCst) {
                report.cancelled = total - idx;
                warn!("⚠️ 收到取消请求，剩余 {} 个文件未处理", report.cancelled);
                break;
            }

            // 相邻两个文件之间固定等待，首个文件不等
            if idx > 0 {
                tokio::time::sleep(self.inter_call_delay).await;
            }

            let ctx = LeaseCtx::new(idx + 1, job.file_name.clone());
            let outcome = self.flow.run(job, &ctx).await;

            match &outcome {
                JobOutcome::Success => report.success += 1,
                JobOutcome::SkippedTooLarge { .. } => report.skipped += 1,
                JobOutcome::Failed { .. } => report.failed += 1,
            }
            log_outcome(&ctx, &outcome);

            report.outcomes.push((ctx.file_name, outcome));
        }

        report
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    processor: BatchProcessor<LlmService, SheetService>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup(&config);

        // 组装真实服务
        let llm_service = LlmService::new(&config);
        let sheet_service = SheetService::new(&config);
        let flow = LeaseFlow::new(llm_service, sheet_service, &config);
        let processor =
            BatchProcessor::new(flow, Duration::from_millis(config.inter_call_delay_ms));

        Ok(Self { config, processor })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        // 加载所有待处理的 PDF
        info!("\n📁 正在扫描待处理的租约 PDF...");
        let jobs = pdf_loader::load_pdf_jobs(&self.config.pdf_folder).await?;

        if jobs.is_empty() {
            warn!("⚠️ 没有找到待处理的PDF文件，程序结束");
            return Ok(());
        }

        log_jobs_loaded(jobs.len(), self.config.inter_call_delay_ms);

        // 顺序处理所有文件
        let report = self.processor.run(jobs).await;

        // 输出最终统计
        print_final_stats(&report, &self.config);

        Ok(())
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 租约批量提取模式");
    info!("📊 模型: {}", config.llm_model_name);
    info!("📋 目标工作表: {}", config.worksheet_name);
    info!("{}", "=".repeat(60));
}

fn log_jobs_loaded(total: usize, delay_ms: u64) {
    info!("✓ 找到 {} 个待处理的租约 PDF", total);
    info!("💡 逐个顺序处理，相邻调用间隔 {} 毫秒\n", delay_ms);
}

fn log_outcome(ctx: &LeaseCtx, outcome: &JobOutcome) {
    match outcome {
        JobOutcome::Success => {
            info!("[租约 {}] ✅ {} 处理成功", ctx.index, ctx.file_name);
        }
        JobOutcome::SkippedTooLarge { estimated_tokens } => {
            warn!(
                "[租约 {}] ⏭️ {} 已跳过 (估算 {} 令牌)",
                ctx.index, ctx.file_name, estimated_tokens
            );
        }
        JobOutcome::Failed { kind, message } => {
            warn!(
                "[租约 {}] ❌ {} 失败 ({}): {}",
                ctx.index,
                ctx.file_name,
                kind,
                message
            );
        }
    }
}

fn print_final_stats(report: &BatchReport, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", report.success, report.total);
    info!("⏭️ 跳过: {}", report.skipped);
    info!("❌ 失败: {}", report.failed);
    if report.cancelled > 0 {
        info!("🚫 已取消: {}", report.cancelled);
    }
    for (file_name, outcome) in &report.outcomes {
        if let JobOutcome::Failed { kind, .. } = outcome {
            info!("   ↳ {} 失败原因: {}", file_name, kind);
        }
    }
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", config.output_log_file);
}
