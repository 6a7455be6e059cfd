/// 翻译API配置常量
///
/// 该文件定义了DeepL JSON-RPC接口相关的常量配置，方便统一管理和维护

/// 默认翻译API配置
pub mod api_config {
    /// 默认JSON-RPC接口地址
    pub const DEFAULT_ENDPOINT: &str = "https://www.deepl.com/jsonrpc";

    /// JSON-RPC协议版本
    pub const JSONRPC_VERSION: &str = "2.0";

    /// 分句方法名
    pub const METHOD_SPLIT_INTO_SENTENCES: &str = "LMT_split_into_sentences";

    /// 翻译任务方法名
    pub const METHOD_HANDLE_JOBS: &str = "LMT_handle_jobs";

    /// 分句请求ID
    pub const SPLIT_REQUEST_ID: u64 = 1;

    /// 翻译请求ID
    pub const JOBS_REQUEST_ID: u64 = 2;

    /// 翻译任务类型
    pub const DEFAULT_JOB_KIND: &str = "default";

    /// 默认User-Agent
    pub const DEFAULT_USER_AGENT: &str =
        concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
}

/// 翻译服务配置
pub mod service_config {
    /// 自动检测源语言
    pub const AUTO_SOURCE_LANG: &str = "auto";

    /// 默认目标语言
    pub const DEFAULT_TARGET_LANG: &str = "EN";

    /// 默认偏好源语言（按顺序）
    pub const DEFAULT_PREFERRED_LANGS: &[&str] = &["EN", "DE"];

    /// 请求超时时间（毫秒）
    pub const DEFAULT_TIMEOUT_MS: u64 = 10 * 1000;

    /// 默认换行宽度，0表示不换行
    pub const DEFAULT_WRAP_MARGIN: usize = 0;
}

/// 编辑器相关常量
pub mod editor_config {
    /// 翻译进行中的状态栏提示
    pub const TRANSLATING_STATUS: &str = "Translating...";

    /// 原文与译文之间的分隔
    pub const INSERT_SEPARATOR: &str = "\n\n";

    /// 段落之间的分隔
    pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

    /// 句子之间的分隔
    pub const SENTENCE_SEPARATOR: &str = " ";
}

/// 错误消息常量
pub mod error_messages {
    /// 未选择文本
    pub const NO_TEXT_SELECTED: &str = "未选择文本";

    /// 没有活动的编辑器
    pub const NO_ACTIVE_EDITOR: &str = "没有活动的编辑器";

    /// 响应缺少result字段
    pub const MISSING_RESULT: &str = "响应缺少result字段";
}

/// 验证API地址是否有效
pub fn is_valid_endpoint(endpoint: &str) -> bool {
    match url::Url::parse(endpoint) {
        Ok(url) => url.scheme() == "http" || url.scheme() == "https",
        Err(_) => false,
    }
}

/// 解析逗号分隔的语言列表
pub fn parse_lang_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|lang| lang.trim().to_uppercase())
        .filter(|lang| !lang.is_empty())
        .collect()
}
