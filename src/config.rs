use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::path::Path;

/// 默认配置文件路径
const CONFIG_FILE: &str = "lease_reader.toml";

/// 程序配置
///
/// 显式传入编排层，不使用全局状态，保证多次独立运行（例如测试）互不干扰
#[derive(Clone, Debug)]
pub struct Config {
    /// 待处理租约 PDF 的存放目录
    pub pdf_folder: String,
    /// 是否显示详细日志（含 LLM 响应预览）
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// LLM 响应令牌上限
    pub max_response_tokens: u32,
    /// 提取文本的令牌预算上限，超过则跳过该文件
    pub token_ceiling: usize,
    /// 相邻两次 LLM 调用之间的间隔（毫秒），用于遵守限速
    pub inter_call_delay_ms: u64,
    // --- Google 表格配置 ---
    pub spreadsheet_id: String,
    pub worksheet_name: String,
    /// Google Sheets OAuth 访问令牌（获取方式在本程序范围之外）
    pub sheets_access_token: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pdf_folder: "lease_pdfs".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4-turbo".to_string(),
            max_response_tokens: 2048,
            token_ceiling: 12_000,
            inter_call_delay_ms: 5_000,
            spreadsheet_id: "1eySt6Xk3PP7WBHvGMt-yEhagbxsnJnW2pKj8iBZ62kw".to_string(),
            worksheet_name: "Lease extraction".to_string(),
            sheets_access_token: String::new(),
        }
    }
}

/// 配置文件结构（所有字段可选，缺省回退到默认值）
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub pdf_folder: Option<String>,
    pub verbose_logging: Option<bool>,
    pub output_log_file: Option<String>,
    pub llm_api_key: Option<String>,
    pub llm_api_base_url: Option<String>,
    pub llm_model_name: Option<String>,
    pub max_response_tokens: Option<u32>,
    pub token_ceiling: Option<usize>,
    pub inter_call_delay_ms: Option<u64>,
    pub spreadsheet_id: Option<String>,
    pub worksheet_name: Option<String>,
    pub sheets_access_token: Option<String>,
}

impl Config {
    /// 加载配置：先读配置文件（如果存在），再用环境变量覆盖
    pub fn load() -> AppResult<Self> {
        let base = if Path::new(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        Ok(base.overlay_env())
    }

    /// 从 TOML 配置文件加载
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::config_read_failed(path, e))?;
        let file: ConfigFile =
            toml::from_str(&content).map_err(|e| AppError::config_parse_failed(path, e))?;
        Ok(Self::default().merge(file))
    }

    /// 合并配置文件中提供的字段
    pub fn merge(self, file: ConfigFile) -> Self {
        Self {
            pdf_folder: file.pdf_folder.unwrap_or(self.pdf_folder),
            verbose_logging: file.verbose_logging.unwrap_or(self.verbose_logging),
            output_log_file: file.output_log_file.unwrap_or(self.output_log_file),
            llm_api_key: file.llm_api_key.unwrap_or(self.llm_api_key),
            llm_api_base_url: file.llm_api_base_url.unwrap_or(self.llm_api_base_url),
            llm_model_name: file.llm_model_name.unwrap_or(self.llm_model_name),
            max_response_tokens: file.max_response_tokens.unwrap_or(self.max_response_tokens),
            token_ceiling: file.token_ceiling.unwrap_or(self.token_ceiling),
            inter_call_delay_ms: file.inter_call_delay_ms.unwrap_or(self.inter_call_delay_ms),
            spreadsheet_id: file.spreadsheet_id.unwrap_or(self.spreadsheet_id),
            worksheet_name: file.worksheet_name.unwrap_or(self.worksheet_name),
            sheets_access_token: file.sheets_access_token.unwrap_or(self.sheets_access_token),
        }
    }

    /// 用环境变量覆盖当前配置
    pub fn overlay_env(self) -> Self {
        Self {
            pdf_folder: std::env::var("PDF_FOLDER").unwrap_or(self.pdf_folder),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(self.output_log_file),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(self.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
            max_response_tokens: std::env::var("MAX_RESPONSE_TOKENS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.max_response_tokens),
            token_ceiling: std::env::var("TOKEN_CEILING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.token_ceiling),
            inter_call_delay_ms: std::env::var("INTER_CALL_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.inter_call_delay_ms),
            spreadsheet_id: std::env::var("SPREADSHEET_ID").unwrap_or(self.spreadsheet_id),
            worksheet_name: std::env::var("WORKSHEET_NAME").unwrap_or(self.worksheet_name),
            sheets_access_token: std::env::var("SHEETS_ACCESS_TOKEN").unwrap_or(self.sheets_access_token),
        }
    }
}
