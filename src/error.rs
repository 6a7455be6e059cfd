//! 统一错误处理模块
//!
//! 提供translate-deepl项目的统一错误类型定义和处理机制

// 标准库导入
use std::fmt;

// 第三方crate导入
use anyhow::Error as AnyhowError;

/// 错误类别
///
/// 调用方据此区分"无事可做"与"出了问题"，无需解析错误消息文本
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 前置条件不满足（无编辑器、未选择文本），未发起任何网络请求
    Precondition,
    /// 网络传输错误（不可达、超时、非成功状态码）
    Transport,
    /// 响应结构不符合预期
    Protocol,
    /// 其他错误（配置、内部）
    Other,
}

/// translate-deepl 统一错误类型
#[derive(Debug)]
pub enum TranslationError {
    /// 前置条件错误
    Precondition {
        /// 失败原因
        reason: String,
    },

    /// 网络请求相关错误
    Network {
        /// 错误消息
        message: String,
        /// HTTP状态码（如果适用）
        status_code: Option<u16>,
    },

    /// 请求超时
    Timeout {
        /// 配置的超时时间（毫秒）
        timeout_ms: u64,
    },

    /// 响应结构错误
    Protocol {
        /// JSON-RPC方法名
        method: String,
        /// 具体错误信息
        details: String,
    },

    /// 配置相关错误
    Configuration {
        /// 配置项名称
        field: String,
        /// 错误原因
        reason: String,
    },

    /// 内部处理错误（包装anyhow::Error）
    Internal {
        /// 包装的错误
        source: AnyhowError,
    },
}

impl TranslationError {
    /// 获取错误类别
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranslationError::Precondition { .. } => ErrorKind::Precondition,
            TranslationError::Network { .. } | TranslationError::Timeout { .. } => {
                ErrorKind::Transport
            }
            TranslationError::Protocol { .. } => ErrorKind::Protocol,
            TranslationError::Configuration { .. } | TranslationError::Internal { .. } => {
                ErrorKind::Other
            }
        }
    }

    /// 是否为前置条件错误
    pub fn is_precondition(&self) -> bool {
        self.kind() == ErrorKind::Precondition
    }
}

impl fmt::Display for TranslationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationError::Precondition { reason } => write!(f, "{}", reason),
            TranslationError::Network { message, status_code } => {
                if let Some(code) = status_code {
                    write!(f, "网络请求失败 [{}]: {}", code, message)
                } else {
                    write!(f, "网络请求失败: {}", message)
                }
            }
            TranslationError::Timeout { timeout_ms } => {
                write!(f, "请求超时: 超过 {}ms 未响应", timeout_ms)
            }
            TranslationError::Protocol { method, details } => {
                write!(f, "响应格式错误 [{}]: {}", method, details)
            }
            TranslationError::Configuration { field, reason } => {
                write!(f, "配置错误 [{}]: {}", field, reason)
            }
            TranslationError::Internal { source } => {
                write!(f, "内部处理错误: {}", source)
            }
        }
    }
}

impl std::error::Error for TranslationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TranslationError::Internal { source } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// translate-deepl 结果类型别名
pub type Result<T> = std::result::Result<T, TranslationError>;

/// 便捷的错误创建宏
#[macro_export]
macro_rules! translation_error {
    (precondition, $reason:expr) => {
        $crate::error::TranslationError::Precondition {
            reason: $reason.to_string(),
        }
    };
    (network, $msg:expr) => {
        $crate::error::TranslationError::Network {
            message: $msg.to_string(),
            status_code: None,
        }
    };
    (network, $msg:expr, $code:expr) => {
        $crate::error::TranslationError::Network {
            message: $msg.to_string(),
            status_code: Some($code),
        }
    };
    (protocol, $method:expr, $details:expr) => {
        $crate::error::TranslationError::Protocol {
            method: $method.to_string(),
            details: $details.to_string(),
        }
    };
    (config, $field:expr, $reason:expr) => {
        $crate::error::TranslationError::Configuration {
            field: $field.to_string(),
            reason: $reason.to_string(),
        }
    };
}

/// 从anyhow::Error转换为TranslationError
impl From<AnyhowError> for TranslationError {
    fn from(error: AnyhowError) -> Self {
        TranslationError::Internal { source: error }
    }
}

/// 从reqwest::Error转换为TranslationError
impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        let status_code = error.status().map(|s| s.as_u16());
        TranslationError::Network {
            message: error.to_string(),
            status_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TranslationError::Network {
            message: "Connection failed".to_string(),
            status_code: Some(500),
        };

        assert_eq!(format!("{}", err), "网络请求失败 [500]: Connection failed");

        let err = TranslationError::Timeout { timeout_ms: 250 };
        assert_eq!(format!("{}", err), "请求超时: 超过 250ms 未响应");
    }

    #[test]
    fn test_error_macro() {
        let err = translation_error!(network, "Test error", 404);
        match err {
            TranslationError::Network { message, status_code } => {
                assert_eq!(message, "Test error");
                assert_eq!(status_code, Some(404));
            }
            _ => panic!("Wrong error type"),
        }

        let err = translation_error!(protocol, "LMT_handle_jobs", "missing result");
        match err {
            TranslationError::Protocol { method, details } => {
                assert_eq!(method, "LMT_handle_jobs");
                assert_eq!(details, "missing result");
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            translation_error!(precondition, "未选择文本").kind(),
            ErrorKind::Precondition
        );
        assert_eq!(translation_error!(network, "down").kind(), ErrorKind::Transport);
        assert_eq!(
            TranslationError::Timeout { timeout_ms: 1 }.kind(),
            ErrorKind::Transport
        );
        assert_eq!(
            translation_error!(protocol, "m", "bad").kind(),
            ErrorKind::Protocol
        );
        assert_eq!(
            translation_error!(config, "timeout_ms", "zero").kind(),
            ErrorKind::Other
        );
        assert!(translation_error!(precondition, "x").is_precondition());
    }

    #[test]
    fn test_anyhow_conversion() {
        let anyhow_err = anyhow::anyhow!("Test anyhow error");
        let translation_err: TranslationError = anyhow_err.into();

        match &translation_err {
            TranslationError::Internal { .. } => {}
            _ => panic!("Wrong error type"),
        }
        assert_eq!(translation_err.kind(), ErrorKind::Other);
        assert!(std::error::Error::source(&translation_err).is_some());
    }
}
