use crate::models::job::ExtractionJob;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从单个 PDF 文件构建提取任务
pub async fn load_pdf_job(pdf_path: &Path) -> Result<ExtractionJob> {
    let bytes = fs::read(pdf_path)
        .await
        .with_context(|| format!("无法读取PDF文件: {}", pdf_path.display()))?;

    let file_name = pdf_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| pdf_path.display().to_string());

    Ok(ExtractionJob::new(file_name, bytes))
}

/// 扫描文件夹并为每个 PDF 文件构建提取任务
///
/// 按文件名排序，保证批次内的处理顺序稳定
pub async fn load_pdf_jobs(folder_path: &str) -> Result<Vec<ExtractionJob>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut pdf_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_pdf = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if is_pdf {
            pdf_files.push(path);
        }
    }

    pdf_files.sort();

    let mut jobs = Vec::new();
    for path in &pdf_files {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_pdf_job(path).await {
            Ok(job) => {
                tracing::info!("成功加载 {} ({} 字节)", job.file_name, job.bytes.len());
                jobs.push(job);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(jobs)
}
