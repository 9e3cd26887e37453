//! Google 表格追加能力
//!
//! 通过 Sheets v4 REST 接口向指定工作表末尾追加一行。
//! 使用 USER_ENTERED 写入模式，让表格自行把日期、数字样式的字符串
//! 解析成对应的单元格类型

use crate::config::Config;
use crate::error::{AppError, AppResult, PersistenceError};
use crate::services::RowSink;
use serde_json::json;
use tracing::debug;

/// Sheets API 基础地址
const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Google 表格服务
pub struct SheetService {
    client: reqwest::Client,
    spreadsheet_id: String,
    worksheet_name: String,
    access_token: String,
}

impl SheetService {
    /// 创建新的表格服务
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            worksheet_name: config.worksheet_name.clone(),
            access_token: config.sheets_access_token.clone(),
        }
    }

    /// 追加接口的完整 URL
    fn append_url(&self) -> String {
        format!(
            "{}/{}/values/{}:append?valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS",
            SHEETS_API_BASE,
            self.spreadsheet_id,
            encode_range(&self.worksheet_name)
        )
    }

    /// 向工作表末尾追加一行
    async fn append(&self, row: &[String]) -> AppResult<()> {
        let url = self.append_url();
        debug!("追加行到表格: {} 个字段", row.len());

        let body = json!({
            "majorDimension": "ROWS",
            "values": [row],
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(AppError::sheet_request_failed)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AppError::Persistence(PersistenceError::BadStatus {
                status: status.as_u16(),
                message,
            }));
        }

        debug!("表格追加成功");
        Ok(())
    }
}

impl RowSink for SheetService {
    async fn append_row(&self, row: &[String]) -> AppResult<()> {
        self.append(row).await
    }
}

/// 把工作表名编码为 URL 路径中的 A1 区间
///
/// 只处理工作表名里实际会出现的保留字符
fn encode_range(worksheet_name: &str) -> String {
    let encoded = worksheet_name
        .replace('%', "%25")
        .replace(' ', "%20")
        .replace('#', "%23")
        .replace('?', "%3F")
        .replace('&', "%26");
    format!("{}!A1", encoded)
}
