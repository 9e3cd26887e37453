//! PDF 文本提取能力
//!
//! 按页序提取纯文本并拼接；纯图片扫描件会得到空文本，这不是错误，
//! 由流程层负责提示

use crate::error::{AppError, AppResult, ExtractionError};
use lopdf::Document;
use tracing::{debug, warn};

/// 从 PDF 字节流中提取全文
///
/// # 参数
/// - `bytes`: PDF 原始字节
///
/// # 返回
/// 按页序拼接的纯文本；无可提取文本时返回空字符串
pub fn extract_text(bytes: &[u8]) -> AppResult<String> {
    if bytes.is_empty() {
        return Err(AppError::Extraction(ExtractionError::EmptyInput));
    }

    let doc = Document::load_mem(bytes)?;
    let pages = doc.get_pages();

    debug!("PDF共 {} 页", pages.len());

    // BTreeMap 的键已按页码升序排列
    let mut text = String::new();
    for page_number in pages.keys() {
        match doc.extract_text(&[*page_number]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => {
                // 单页失败不中断整份文档
                warn!("第 {} 页文本提取失败: {}", page_number, e);
            }
        }
    }

    Ok(text)
}
