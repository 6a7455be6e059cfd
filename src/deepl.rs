//! DeepL JSON-RPC 客户端
//!
//! 封装同一接口上的两个远程调用：
//! - `LMT_split_into_sentences` 分句
//! - `LMT_handle_jobs` 逐句翻译
//!
//! 每次请求使用配置中的超时时间，不做任何重试。

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::api_constants::{api_config, error_messages};
use crate::config::TranslateConfig;
use crate::error::{Result, TranslationError};
use crate::translation_error;

/// 句子翻译后端
///
/// 编排器只依赖该trait，测试中可替换为模拟实现。
#[async_trait]
pub trait SentenceTranslator: Send + Sync {
    /// 将一段文本切分为句子
    async fn split_into_sentences(
        &self,
        text: &str,
        config: &TranslateConfig,
    ) -> Result<Vec<String>>;

    /// 翻译句子列表
    ///
    /// 没有候选译文的句子不产生输出，返回结果可能比输入短
    async fn translate_sentences(
        &self,
        sentences: &[String],
        config: &TranslateConfig,
    ) -> Result<Vec<String>>;
}

/// 分句前的文本规范化
///
/// 远端接口不接受换行和不规则空格：换行替换为空格，连续空格合并，首尾去空白。
pub fn normalize_for_segmentation(text: &str) -> Result<String> {
    let spaces = Regex::new(r" +").context("编译正则表达式失败")?;
    let text = text.replace(['\r', '\n'], " ");
    Ok(spaces.replace_all(&text, " ").trim().to_string())
}

/// JSON-RPC 响应外壳
#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct SplitResult {
    #[serde(default)]
    splitted_texts: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct JobsResult {
    translations: Vec<JobTranslation>,
}

#[derive(Debug, Deserialize)]
struct JobTranslation {
    beams: Vec<Beam>,
}

#[derive(Debug, Deserialize)]
struct Beam {
    postprocessed_sentence: String,
}

/// 构建分句请求体
pub fn build_split_request(text: &str, source_lang: &str) -> Value {
    json!({
        "jsonrpc": api_config::JSONRPC_VERSION,
        "method": api_config::METHOD_SPLIT_INTO_SENTENCES,
        "params": {
            "texts": [text],
            "lang": {
                "lang_user_selected": source_lang
            }
        },
        "id": api_config::SPLIT_REQUEST_ID
    })
}

/// 构建翻译任务请求体
pub fn build_jobs_request(
    sentences: &[String],
    user_preferred_langs: &[String],
    target_lang: &str,
) -> Value {
    let jobs: Vec<Value> = sentences
        .iter()
        .map(|sentence| {
            json!({
                "kind": api_config::DEFAULT_JOB_KIND,
                "raw_en_sentence": sentence
            })
        })
        .collect();

    json!({
        "jsonrpc": api_config::JSONRPC_VERSION,
        "method": api_config::METHOD_HANDLE_JOBS,
        "params": {
            "jobs": jobs,
            "lang": {
                "user_preferred_langs": user_preferred_langs,
                "target_lang": target_lang
            }
        },
        "id": api_config::JOBS_REQUEST_ID
    })
}

/// 解析JSON-RPC响应，取出result
fn parse_result<T: DeserializeOwned>(method: &str, body: &str) -> Result<T> {
    let response: RpcResponse<T> = serde_json::from_str(body)
        .map_err(|e| translation_error!(protocol, method, e))?;

    match (response.result, response.error) {
        (Some(result), _) => Ok(result),
        (None, Some(error)) => Err(translation_error!(
            protocol,
            method,
            format!("{} (code {}: {})", error_messages::MISSING_RESULT, error.code, error.message)
        )),
        (None, None) => Err(translation_error!(protocol, method, error_messages::MISSING_RESULT)),
    }
}

/// 解析分句响应
///
/// 只使用 `splitted_texts` 的第一个元素；列表缺失或为空时返回空结果。
pub fn parse_split_response(body: &str) -> Result<Vec<String>> {
    let result: SplitResult = parse_result(api_config::METHOD_SPLIT_INTO_SENTENCES, body)?;
    Ok(result.splitted_texts.into_iter().next().unwrap_or_default())
}

/// 解析翻译任务响应
///
/// 每个任务取排名第一的候选译文；没有候选的任务直接丢弃。
pub fn parse_jobs_response(body: &str) -> Result<Vec<String>> {
    let result: JobsResult = parse_result(api_config::METHOD_HANDLE_JOBS, body)?;
    Ok(result
        .translations
        .into_iter()
        .filter_map(|translation| translation.beams.into_iter().next())
        .map(|beam| beam.postprocessed_sentence)
        .collect())
}

/// 基于reqwest的DeepL客户端
#[derive(Debug, Clone)]
pub struct DeepLClient {
    client: Client,
}

impl DeepLClient {
    /// 创建客户端
    pub fn new(config: &TranslateConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent())
            .build()
            .map_err(|e| translation_error!(network, format!("创建HTTP客户端失败: {}", e)))?;

        Ok(Self { client })
    }

    /// 使用外部构建的HTTP客户端
    pub fn with_http_client(client: Client) -> Self {
        Self { client }
    }

    /// 发送一次JSON-RPC请求，返回响应文本
    async fn post(&self, method: &str, body: &Value, config: &TranslateConfig) -> Result<String> {
        let timeout_ms = config.timeout_ms();
        let response = self
            .client
            .post(config.endpoint())
            .timeout(Duration::from_millis(timeout_ms))
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(e, timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            warn!("❌ {} 返回错误状态: {}", method, status);
            return Err(translation_error!(
                network,
                format!("{} 返回错误状态: {}", method, status),
                status.as_u16()
            ));
        }

        response.text().await.map_err(|e| transport_error(e, timeout_ms))
    }
}

/// 将reqwest错误归类为超时或网络错误
fn transport_error(error: reqwest::Error, timeout_ms: u64) -> TranslationError {
    if error.is_timeout() {
        TranslationError::Timeout { timeout_ms }
    } else {
        error.into()
    }
}

#[async_trait]
impl SentenceTranslator for DeepLClient {
    async fn split_into_sentences(
        &self,
        text: &str,
        config: &TranslateConfig,
    ) -> Result<Vec<String>> {
        let text = normalize_for_segmentation(text)?;
        debug!("分句请求: {} 字符", text.chars().count());

        let body = build_split_request(&text, config.source_lang());
        let response = self
            .post(api_config::METHOD_SPLIT_INTO_SENTENCES, &body, config)
            .await?;

        let sentences = parse_split_response(&response)?;
        debug!("分句完成: {} 句", sentences.len());
        Ok(sentences)
    }

    async fn translate_sentences(
        &self,
        sentences: &[String],
        config: &TranslateConfig,
    ) -> Result<Vec<String>> {
        if sentences.is_empty() {
            return Ok(vec![]);
        }

        debug!("翻译请求: {} 句 -> {}", sentences.len(), config.target_lang());
        let body = build_jobs_request(
            sentences,
            config.user_preferred_langs(),
            config.target_lang(),
        );
        let response = self.post(api_config::METHOD_HANDLE_JOBS, &body, config).await?;

        let translations = parse_jobs_response(&response)?;
        if translations.len() < sentences.len() {
            debug!(
                "{} 句没有候选译文，已丢弃",
                sentences.len() - translations.len()
            );
        }
        Ok(translations)
    }
}
