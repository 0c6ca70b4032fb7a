//! OpenAI-compatible LLM provider implementation.
//!
//! A single [`OpenAiCompatibleProvider`] serves Google Gemini (through its
//! OpenAI-compatible endpoint) and OpenAI, selected by base URL.
//!
//! Uses [`async_openai`] for type-safe request/response handling and
//! built-in SSE streaming.

pub mod config;
pub mod streaming;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};
use futures_util::StreamExt;
use secrecy::ExposeSecret;

use termai_core::llm::provider::{EventStream, LlmProvider};
use termai_types::llm::{CompletionRequest, CompletionResponse, LlmError, StopReason, Usage};

use self::config::OpenAiCompatConfig;
use self::streaming::{map_openai_stream, stop_reason};

/// Unified provider for any OpenAI-compatible API.
///
/// Does NOT derive Debug: the `async_openai::Client` holds the API key.
pub struct OpenAiCompatibleProvider {
    /// `None` when no key was found at startup.
    client: Option<Client<OpenAIConfig>>,
    provider_name: String,
    api_key_env: String,
    model: String,
}

impl OpenAiCompatibleProvider {
    /// Create a new OpenAI-compatible provider from a configuration.
    pub fn new(config: OpenAiCompatConfig) -> Self {
        let client = config.api_key.as_ref().map(|key| {
            Client::with_config(
                OpenAIConfig::new()
                    .with_api_key(key.expose_secret())
                    .with_api_base(&config.base_url),
            )
        });

        Self {
            client,
            provider_name: config.provider_name,
            api_key_env: config.api_key_env,
            model: config.model,
        }
    }

    fn client(&self) -> Result<&Client<OpenAIConfig>, LlmError> {
        self.client.as_ref().ok_or_else(|| LlmError::MissingApiKey {
            env_var: self.api_key_env.clone(),
        })
    }

    /// Build a [`CreateChatCompletionRequest`] from a generic [`CompletionRequest`].
    fn build_request(
        &self,
        request: &CompletionRequest,
        stream: bool,
    ) -> Result<CreateChatCompletionRequest, LlmError> {
        if request.messages.is_empty() {
            return Err(LlmError::InvalidRequest(
                "at least one message is required".to_string(),
            ));
        }

        let system = request.system.iter().map(|text| {
            ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                content: ChatCompletionRequestSystemMessageContent::Text(text.clone()),
                name: None,
            })
        });
        let users = request.messages.iter().map(|msg| {
            ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(msg.content.clone()),
                name: None,
            })
        });
        let messages: Vec<ChatCompletionRequestMessage> = system.chain(users).collect();

        let model = if request.model.is_empty() {
            self.model.clone()
        } else {
            request.model.clone()
        };

        // No stream_options: the Gemini endpoint rejects include_usage on
        // some models, and usage is only logged.
        Ok(CreateChatCompletionRequest {
            model,
            messages,
            max_completion_tokens: request.max_tokens,
            temperature: request.temperature.map(|t| t as f32),
            stream: stream.then_some(true),
            ..Default::default()
        })
    }
}

impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let client = self.client()?;
        let oai_request = self.build_request(request, false)?;

        let response = client
            .chat()
            .create(oai_request)
            .await
            .map_err(map_openai_error)?;

        let first = response.choices.first();
        let content = first
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();
        let stop_reason = first
            .and_then(|c| c.finish_reason.as_ref())
            .map(stop_reason)
            .unwrap_or(StopReason::EndTurn);

        let usage = response
            .usage
            .map(|u| Usage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            id: response.id,
            content,
            model: response.model,
            stop_reason,
            usage,
        })
    }

    fn stream(&self, request: CompletionRequest) -> EventStream {
        // Errors surface as the first stream item, never at call time.
        let prepared = self
            .client()
            .cloned()
            .and_then(|client| Ok((client, self.build_request(&request, true)?)));
        let (client, oai_request) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => {
                return Box::pin(futures_util::stream::once(async move { Err(e) }));
            }
        };

        Box::pin(async_stream::try_stream! {
            let oai_stream = client
                .chat()
                .create_stream(oai_request)
                .await
                .map_err(map_openai_error)?;

            let mut inner = map_openai_stream(oai_stream);
            while let Some(event) = inner.next().await {
                match event {
                    Ok(ev) => yield ev,
                    Err(e) => Err(e)?,
                }
            }
        })
    }
}

/// Map an `async_openai::error::OpenAIError` to an [`LlmError`].
pub(crate) fn map_openai_error(err: async_openai::error::OpenAIError) -> LlmError {
    use async_openai::error::OpenAIError;

    match &err {
        OpenAIError::ApiError(api_err) => {
            let code = api_err.code.as_deref().unwrap_or("");
            let error_type = api_err.r#type.as_deref().unwrap_or("");

            if code == "authentication_error"
                || code == "invalid_api_key"
                || error_type == "authentication_error"
                || api_err.message.contains("Incorrect API key")
                || api_err.message.contains("Invalid API key")
                || api_err.message.contains("API key not valid")
            {
                LlmError::AuthenticationFailed
            } else {
                LlmError::Provider {
                    message: api_err.message.clone(),
                }
            }
        }
        OpenAIError::Reqwest(reqwest_err) => match reqwest_err.status() {
            Some(status) if matches!(status.as_u16(), 401 | 403) => LlmError::AuthenticationFailed,
            Some(_) => LlmError::Provider {
                message: err.to_string(),
            },
            None => LlmError::Transport(err.to_string()),
        },
        OpenAIError::JSONDeserialize(_, content) => {
            LlmError::Deserialization(format!("failed to parse response: {content}"))
        }
        OpenAIError::StreamError(stream_err) => LlmError::Stream(stream_err.to_string()),
        OpenAIError::InvalidArgument(msg) => LlmError::InvalidRequest(msg.clone()),
        _ => LlmError::Provider {
            message: err.to_string(),
        },
    }
}
