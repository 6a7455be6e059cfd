//! translate-deepl - 选中文本翻译工具库
//!
//! 这个库提供段落切分、DeepL JSON-RPC 客户端、按段落并发翻译和编辑器命令处理等核心功能。

pub mod api_constants;
pub mod config;
pub mod deepl;
pub mod editor;
pub mod error;
pub mod paragraph;
pub mod stats;
pub mod translator;
pub mod utils;

pub use config::TranslateConfig;
pub use deepl::{DeepLClient, SentenceTranslator};
pub use editor::{translate_selection, Editor, StatusBar, TextBuffer};
pub use error::{ErrorKind, TranslationError};
pub use paragraph::split_into_paragraphs;
pub use translator::{translate_text, TranslatedText};
