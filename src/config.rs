//! 配置管理模块
//!
//! 提供CLI参数解析和翻译配置管理功能

// 标准库导入
use std::path::PathBuf;

// 第三方crate导入
use clap::Parser;

// 本地模块导入
use crate::api_constants::{api_config, is_valid_endpoint, parse_lang_list, service_config};
use crate::error::Result;
use crate::translation_error;

/// 翻译配置结构体
///
/// 由宿主在调用时注入客户端和编排器，不依赖任何全局状态。
/// 支持Builder模式进行链式配置。
///
/// # Examples
///
/// ```rust
/// use translate_deepl::config::TranslateConfig;
///
/// let config = TranslateConfig::new()
///     .target_language("DE")
///     .preferred_languages(vec!["EN".to_string(), "FR".to_string()])
///     .with_timeout_ms(5000)
///     .with_wrap_margin(80);
///
/// assert_eq!(config.target_lang(), "DE");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct TranslateConfig {
    /// JSON-RPC接口地址
    endpoint: String,
    /// 用户选择的源语言 ("auto" 表示自动检测)
    source_lang: String,
    /// 目标语言代码 (如: EN, DE, ZH)
    target_lang: String,
    /// 偏好源语言列表（有序）
    user_preferred_langs: Vec<String>,
    /// 单次请求超时（毫秒）
    timeout_ms: u64,
    /// 译文换行宽度，0表示不换行
    wrap_margin: usize,
    /// HTTP User-Agent
    user_agent: String,
}

impl TranslateConfig {
    /// 创建新的配置实例
    ///
    /// 返回具有默认值的配置实例：
    /// - 接口地址: DeepL JSON-RPC
    /// - 源语言: "auto"
    /// - 目标语言: "EN"
    /// - 偏好源语言: ["EN", "DE"]
    /// - 超时: 10000ms
    /// - 换行宽度: 0（不换行）
    pub fn new() -> Self {
        Self {
            endpoint: api_config::DEFAULT_ENDPOINT.to_string(),
            source_lang: service_config::AUTO_SOURCE_LANG.to_string(),
            target_lang: service_config::DEFAULT_TARGET_LANG.to_string(),
            user_preferred_langs: service_config::DEFAULT_PREFERRED_LANGS
                .iter()
                .map(|lang| lang.to_string())
                .collect(),
            timeout_ms: service_config::DEFAULT_TIMEOUT_MS,
            wrap_margin: service_config::DEFAULT_WRAP_MARGIN,
            user_agent: api_config::DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// 获取接口地址
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 获取源语言
    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    /// 获取目标语言代码
    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    /// 获取偏好源语言列表
    pub fn user_preferred_langs(&self) -> &[String] {
        &self.user_preferred_langs
    }

    /// 获取请求超时（毫秒）
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// 获取换行宽度
    pub fn wrap_margin(&self) -> usize {
        self.wrap_margin
    }

    /// 获取User-Agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// 设置接口地址
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// 设置源语言
    pub fn source_language(mut self, lang: &str) -> Self {
        self.source_lang = lang.to_string();
        self
    }

    /// 设置目标语言代码
    pub fn target_language(mut self, lang: &str) -> Self {
        self.target_lang = lang.to_string();
        self
    }

    /// 设置偏好源语言列表
    pub fn preferred_languages(mut self, langs: Vec<String>) -> Self {
        self.user_preferred_langs = langs;
        self
    }

    /// 设置请求超时（毫秒）
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// 设置换行宽度
    pub fn with_wrap_margin(mut self, margin: usize) -> Self {
        self.wrap_margin = margin;
        self
    }

    /// 设置User-Agent
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        if !is_valid_endpoint(&self.endpoint) {
            return Err(translation_error!(
                config,
                "endpoint",
                format!("不是有效的HTTP地址: {}", self.endpoint)
            ));
        }
        if self.target_lang.trim().is_empty() {
            return Err(translation_error!(config, "target_lang", "目标语言不能为空"));
        }
        if self.source_lang.trim().is_empty() {
            return Err(translation_error!(config, "source_lang", "源语言不能为空"));
        }
        if self.timeout_ms == 0 {
            return Err(translation_error!(config, "timeout_ms", "超时时间必须大于0"));
        }
        Ok(())
    }
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// CLI参数结构
#[derive(Parser, Debug)]
#[command(author, version, about = "选中文本翻译工具 - 调用DeepL接口并将译文插入原文之后", long_about = None)]
pub struct Cli {
    /// 输入文件路径 (省略时从标准输入读取)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// 输出文件路径 (可选，默认为输入文件名+语言代码)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// 将结果写到标准输出
    #[arg(long)]
    pub stdout: bool,

    /// 选中的行范围 (从1开始，闭区间)，如 3:10；默认选中全文
    #[arg(long, value_name = "START:END")]
    pub lines: Option<String>,

    /// 目标语言代码 (如: EN, DE, ZH)
    #[arg(short, long, default_value = service_config::DEFAULT_TARGET_LANG)]
    pub target_lang: String,

    /// 源语言 ("auto" 表示自动检测)
    #[arg(short, long, default_value = service_config::AUTO_SOURCE_LANG)]
    pub source_lang: String,

    /// 偏好源语言列表，逗号分隔
    #[arg(short, long, default_value = "EN,DE")]
    pub preferred_langs: String,

    /// 单次请求超时（毫秒）
    #[arg(long, default_value_t = service_config::DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// 译文换行宽度 (0 表示不换行)
    #[arg(short, long, default_value_t = service_config::DEFAULT_WRAP_MARGIN)]
    pub wrap_margin: usize,

    /// 翻译API地址
    #[arg(long, default_value = api_config::DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// 详细输出模式
    #[arg(short, long)]
    pub verbose: bool,

    /// 静默模式 (仅输出错误)
    #[arg(short, long)]
    pub quiet: bool,

    /// 显示运行统计
    #[arg(long)]
    pub stats: bool,
}

impl Cli {
    /// 由命令行参数构建翻译配置
    pub fn to_config(&self) -> TranslateConfig {
        TranslateConfig::new()
            .with_endpoint(&self.endpoint)
            .source_language(&self.source_lang)
            .target_language(&self.target_lang)
            .preferred_languages(parse_lang_list(&self.preferred_langs))
            .with_timeout_ms(self.timeout_ms)
            .with_wrap_margin(self.wrap_margin)
    }
}
