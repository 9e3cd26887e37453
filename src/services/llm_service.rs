//! LLM 提取能力 - 业务能力层
//!
//! 只负责"提示词 → 原始响应"，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, EndpointError};
use crate::services::CompletionBackend;

/// LLM 服务
///
/// 职责：
/// - 把渲染好的提示词作为单条 user 消息发送
/// - 限制响应令牌数，返回原始文本
/// - 不解析、不校验、不重试
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    max_response_tokens: u32,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
            max_response_tokens: config.max_response_tokens,
        }
    }

    /// 发送一次补全请求，返回去除首尾空白的原始响应
    async fn send(&self, prompt: &str) -> AppResult<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("提示词长度: {} 字符", prompt.len());

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .temperature(0.0)
            .max_tokens(self.max_response_tokens)
            .build()?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            AppError::endpoint_call_failed(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        let choice = response.choices.first().ok_or_else(|| {
            AppError::Endpoint(EndpointError::EmptyResponse {
                model: self.model_name.clone(),
            })
        })?;

        let content = choice.message.content.clone().ok_or_else(|| {
            AppError::Endpoint(EndpointError::EmptyContent {
                model: self.model_name.clone(),
            })
        })?;

        Ok(content.trim().to_string())
    }
}

impl CompletionBackend for LlmService {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        self.send(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::prompt_builder;

    /// 测试 LLM API 连接性
    ///
    /// 运行方式：
    /// ```bash
    /// LLM_API_KEY=sk-... cargo test test_llm_extraction_live -- --ignored --nocapture
    /// ```
    #[tokio::test]
    #[ignore]
    async fn test_llm_extraction_live() {
        let _ = tracing_subscriber::fmt::try_init();

        let config = Config::load().expect("加载配置失败");
        let service = LlmService::new(&config);

        let lease_text = "This lease is made effective June 1, 2025 between \
                          Landlord Properties Inc. and Tenant Coffee Ltd. for \
                          Units 13 and 14 at 123 Main Street, totalling 2,450 \
                          square feet, for a term of 5 years.";
        let prompt = prompt_builder::build_prompt(lease_text);

        let response = service.send(&prompt).await;

        match response {
            Ok(content) => {
                println!("\n========== LLM 响应 ==========");
                println!("{}", content);
                println!("==============================\n");
                assert!(!content.is_empty());
            }
            Err(e) => {
                panic!("LLM API 测试失败: {}", e);
            }
        }
    }
}
