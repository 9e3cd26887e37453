use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// PDF 文本提取错误
    Extraction(ExtractionError),
    /// 文本超出令牌预算（策略性跳过，不是真正的错误）
    SizeExceeded {
        estimated_tokens: usize,
        ceiling: usize,
    },
    /// LLM 端点调用错误
    Endpoint(EndpointError),
    /// LLM 响应解析错误
    Parse(ParseError),
    /// 字段数量与租约表结构不符
    SchemaMismatch { expected: usize, actual: usize },
    /// Google 表格写入错误
    Persistence(PersistenceError),
    /// 配置错误
    Config(ConfigError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Extraction(e) => write!(f, "PDF提取错误: {}", e),
            AppError::SizeExceeded {
                estimated_tokens,
                ceiling,
            } => write!(
                f,
                "文本超出令牌预算: 估算 {} 令牌, 上限 {}",
                estimated_tokens, ceiling
            ),
            AppError::Endpoint(e) => write!(f, "LLM端点错误: {}", e),
            AppError::Parse(e) => write!(f, "响应解析错误: {}", e),
            AppError::SchemaMismatch { expected, actual } => {
                write!(f, "字段数量不符: 期望 {} 个, 实际 {} 个", expected, actual)
            }
            AppError::Persistence(e) => write!(f, "表格写入错误: {}", e),
            AppError::Config(e) => write!(f, "配置错误: {}", e),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Extraction(e) => Some(e),
            AppError::Endpoint(e) => Some(e),
            AppError::Parse(e) => Some(e),
            AppError::Persistence(e) => Some(e),
            AppError::Config(e) => Some(e),
            _ => None,
        }
    }
}

/// PDF 文本提取错误
#[derive(Debug)]
pub enum ExtractionError {
    /// 字节流为空
    EmptyInput,
    /// 字节流不是可解析的 PDF
    UnreadablePdf {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionError::EmptyInput => write!(f, "输入字节流为空"),
            ExtractionError::UnreadablePdf { source } => {
                write!(f, "无法解析PDF: {}", source)
            }
        }
    }
}

impl std::error::Error for ExtractionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtractionError::UnreadablePdf { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// LLM 端点调用错误
#[derive(Debug)]
pub enum EndpointError {
    /// API 调用失败（网络、鉴权或限速）
    CallFailed {
        model: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回结果为空
    EmptyResponse { model: String },
    /// 返回内容为空
    EmptyContent { model: String },
}

impl fmt::Display for EndpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointError::CallFailed { model, source } => {
                write!(f, "LLM API调用失败 (模型: {}): {}", model, source)
            }
            EndpointError::EmptyResponse { model } => {
                write!(f, "LLM返回结果为空 (模型: {})", model)
            }
            EndpointError::EmptyContent { model } => {
                write!(f, "LLM返回内容为空 (模型: {})", model)
            }
        }
    }
}

impl std::error::Error for EndpointError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EndpointError::CallFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// LLM 响应解析错误
#[derive(Debug)]
pub enum ParseError {
    /// 响应中没有方括号列表
    NoListFound { response_preview: String },
    /// 方括号内不是扁平的字符串字面量序列
    MalformedList { reason: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::NoListFound { response_preview } => {
                write!(f, "响应中未找到列表: {}", response_preview)
            }
            ParseError::MalformedList { reason } => {
                write!(f, "列表格式不合法: {}", reason)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Google 表格写入错误
#[derive(Debug)]
pub enum PersistenceError {
    /// 网络请求失败
    RequestFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// API 返回错误状态
    BadStatus { status: u16, message: String },
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::RequestFailed { source } => {
                write!(f, "表格API请求失败: {}", source)
            }
            PersistenceError::BadStatus { status, message } => {
                write!(f, "表格API返回错误状态 {}: {}", status, message)
            }
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::RequestFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// 读取配置文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// TOML 解析失败
    ParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ReadFailed { path, source } => {
                write!(f, "读取配置文件失败 ({}): {}", path, source)
            }
            ConfigError::ParseFailed { path, source } => {
                write!(f, "解析配置文件失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ReadFailed { source, .. } | ConfigError::ParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}

/// 错误种类，用于单个任务的结果汇报
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Extraction,
    SizeExceeded,
    Endpoint,
    NoListFound,
    MalformedList,
    SchemaMismatch,
    Persistence,
    Config,
    Other,
}

impl ErrorKind {
    /// 英文标签，用于结果行的稳定展示
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Extraction => "extraction",
            ErrorKind::SizeExceeded => "size_exceeded",
            ErrorKind::Endpoint => "endpoint",
            ErrorKind::NoListFound => "no_list_found",
            ErrorKind::MalformedList => "malformed_list",
            ErrorKind::SchemaMismatch => "schema_mismatch",
            ErrorKind::Persistence => "persistence",
            ErrorKind::Config => "config",
            ErrorKind::Other => "other",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AppError {
    /// 返回本错误对应的种类标签
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Extraction(_) => ErrorKind::Extraction,
            AppError::SizeExceeded { .. } => ErrorKind::SizeExceeded,
            AppError::Endpoint(_) => ErrorKind::Endpoint,
            AppError::Parse(ParseError::NoListFound { .. }) => ErrorKind::NoListFound,
            AppError::Parse(ParseError::MalformedList { .. }) => ErrorKind::MalformedList,
            AppError::SchemaMismatch { .. } => ErrorKind::SchemaMismatch,
            AppError::Persistence(_) => ErrorKind::Persistence,
            AppError::Config(_) => ErrorKind::Config,
            AppError::Other(_) => ErrorKind::Other,
        }
    }
}

// ========== 从常见错误类型转换 ==========

impl From<lopdf::Error> for AppError {
    fn from(err: lopdf::Error) -> Self {
        AppError::Extraction(ExtractionError::UnreadablePdf {
            source: Box::new(err),
        })
    }
}

impl From<async_openai::error::OpenAIError> for AppError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        AppError::Endpoint(EndpointError::CallFailed {
            model: String::new(),
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建 PDF 解析错误
    pub fn unreadable_pdf(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AppError::Extraction(ExtractionError::UnreadablePdf {
            source: Box::new(source),
        })
    }

    /// 创建 LLM 调用错误
    pub fn endpoint_call_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Endpoint(EndpointError::CallFailed {
            model: model.into(),
            source: Box::new(source),
        })
    }

    /// 创建未找到列表错误
    pub fn no_list_found(response_preview: impl Into<String>) -> Self {
        AppError::Parse(ParseError::NoListFound {
            response_preview: response_preview.into(),
        })
    }

    /// 创建列表格式错误
    pub fn malformed_list(reason: impl Into<String>) -> Self {
        AppError::Parse(ParseError::MalformedList {
            reason: reason.into(),
        })
    }

    /// 创建表格请求错误
    pub fn sheet_request_failed(
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Persistence(PersistenceError::RequestFailed {
            source: Box::new(source),
        })
    }

    /// 创建配置文件读取错误
    pub fn config_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Config(ConfigError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建配置文件解析错误
    pub fn config_parse_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Config(ConfigError::ParseFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
