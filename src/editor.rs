//! 编辑器命令处理
//!
//! 宿主编辑器的文本缓冲区、选区和状态栏通过trait抽象：
//! - `Editor` 读取选区、插入文本、更新选区并滚动到可见范围
//! - `StatusBar` 显示/清除临时状态提示
//!
//! `TextBuffer` 是内存中的实现，供命令行宿主和测试使用。

use tracing::{debug, info};

use crate::api_constants::{editor_config, error_messages};
use crate::config::TranslateConfig;
use crate::deepl::SentenceTranslator;
use crate::error::Result;
use crate::translation_error;
use crate::translator::{translate_text_detailed, TranslatedText};
use crate::utils::wrap_text;

/// 文档位置（行、列均从0开始，列按字符计）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl Position {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

/// 选区
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: Position,
    pub end: Position,
}

impl Selection {
    /// 创建选区，起止位置会被排序
    pub fn new(a: Position, b: Position) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// 宿主编辑器
pub trait Editor {
    /// 当前选区
    fn selection(&self) -> Selection;

    /// 选区内的文本
    fn text_in(&self, selection: &Selection) -> String;

    /// 在指定位置插入文本，返回插入文本末尾的位置
    fn insert(&mut self, position: Position, text: &str) -> Position;

    /// 更新选区
    fn set_selection(&mut self, selection: Selection);

    /// 将范围滚动到可见区域
    fn reveal_range(&mut self, range: Selection);

    /// 文档使用的换行符
    fn eol(&self) -> &'static str {
        "\n"
    }
}

/// 宿主状态栏
pub trait StatusBar {
    fn show(&self, message: &str);
    fn clear(&self);
}

/// 状态提示守卫，离开作用域时清除提示（成功或失败都会清除，且只清除一次）
pub struct StatusGuard<'a, S: StatusBar + ?Sized> {
    status: &'a S,
}

impl<'a, S: StatusBar + ?Sized> StatusGuard<'a, S> {
    pub fn show(status: &'a S, message: &str) -> Self {
        status.show(message);
        Self { status }
    }
}

impl<S: StatusBar + ?Sized> Drop for StatusGuard<'_, S> {
    fn drop(&mut self) {
        self.status.clear();
    }
}

/// 命令执行结果
#[derive(Debug, Clone)]
pub struct SelectionOutcome {
    /// 新插入译文的选区
    pub selection: Selection,
    /// 翻译统计
    pub report: TranslatedText,
}

/// 翻译当前选区并将译文插入选区之后
///
/// 没有活动编辑器或选区为空时直接返回前置条件错误，不发起网络请求。
/// 翻译失败时文档保持不变。
pub async fn translate_selection<E, S>(
    editor: Option<&mut E>,
    status: &S,
    translator: &dyn SentenceTranslator,
    config: &TranslateConfig,
) -> Result<SelectionOutcome>
where
    E: Editor + ?Sized,
    S: StatusBar + ?Sized,
{
    let editor =
        editor.ok_or_else(|| translation_error!(precondition, error_messages::NO_ACTIVE_EDITOR))?;

    let selection = editor.selection();
    if selection.is_empty() {
        return Err(translation_error!(precondition, error_messages::NO_TEXT_SELECTED));
    }

    let text = editor.text_in(&selection);
    debug!("选中 {} 个字符", text.chars().count());

    let report = {
        let _status = StatusGuard::show(status, editor_config::TRANSLATING_STATUS);
        translate_text_detailed(&text, translator, config).await?
    };

    let translated = if config.wrap_margin() > 0 {
        wrap_text(&report.text, config.wrap_margin())
    } else {
        report.text.clone()
    };

    // 译文插入到原选区之后，前后以空行分隔
    let cursor = selection.end;
    let mut insertion = format!(
        "{sep}{}{sep}",
        translated,
        sep = editor_config::INSERT_SEPARATOR
    );
    let eol = editor.eol();
    if eol != "\n" {
        insertion = insertion.replace('\n', eol);
    }
    let inserted_end = editor.insert(cursor, &insertion);

    let new_selection = Selection::new(cursor, inserted_end);
    editor.set_selection(new_selection);
    editor.reveal_range(Selection::new(
        Position::new(cursor.line, 0),
        Position::new(cursor.line + 1, 0),
    ));

    info!(
        "✅ 已插入译文: 第 {} 行至第 {} 行",
        new_selection.start.line + 1,
        new_selection.end.line + 1
    );

    Ok(SelectionOutcome {
        selection: new_selection,
        report,
    })
}

/// 内存文本缓冲区
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    text: String,
    selection: Selection,
    revealed: Option<Selection>,
}

impl TextBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// 最近一次滚动到可见区域的范围
    pub fn revealed(&self) -> Option<Selection> {
        self.revealed
    }

    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// 选中全文
    pub fn select_all(&mut self) {
        let end = self.end_position();
        self.selection = Selection::new(Position::default(), end);
    }

    /// 整行选区（行号从0开始，闭区间），超出范围时截断到文档末尾
    pub fn line_selection(&self, start_line: usize, end_line: usize) -> Selection {
        let last_line = self.line_count() - 1;
        let start_line = start_line.min(last_line);
        let end_line = end_line.min(last_line).max(start_line);
        let end_chars = self.line(end_line).chars().count();
        Selection::new(
            Position::new(start_line, 0),
            Position::new(end_line, end_chars),
        )
    }

    /// 行内容（不含换行符）
    fn line(&self, line: usize) -> &str {
        self.text
            .split('\n')
            .nth(line)
            .map(|content| content.strip_suffix('\r').unwrap_or(content))
            .unwrap_or("")
    }

    fn end_position(&self) -> Position {
        let last_line = self.line_count() - 1;
        Position::new(last_line, self.line(last_line).chars().count())
    }

    /// 位置转换为字节偏移，越界时截断
    pub fn offset_of(&self, position: Position) -> usize {
        let mut offset = 0;
        for (index, line) in self.text.split('\n').enumerate() {
            if index == position.line {
                let content = line.strip_suffix('\r').unwrap_or(line);
                return offset
                    + content
                        .char_indices()
                        .nth(position.character)
                        .map(|(byte, _)| byte)
                        .unwrap_or(content.len());
            }
            offset += line.len() + 1;
        }
        self.text.len()
    }
}

impl Editor for TextBuffer {
    fn selection(&self) -> Selection {
        self.selection
    }

    fn text_in(&self, selection: &Selection) -> String {
        let start = self.offset_of(selection.start);
        let end = self.offset_of(selection.end);
        self.text[start..end].to_string()
    }

    fn insert(&mut self, position: Position, text: &str) -> Position {
        let offset = self.offset_of(position);
        self.text.insert_str(offset, text);

        // 插入点按截断后的实际位置计算
        let prefix = &self.text[..offset];
        let line = prefix.matches('\n').count();
        let character = prefix.rsplit('\n').next().unwrap_or("").chars().count();

        match text.rfind('\n') {
            Some(last_newline) => Position::new(
                line + text.matches('\n').count(),
                text[last_newline + 1..].chars().count(),
            ),
            None => Position::new(line, character + text.chars().count()),
        }
    }

    fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    fn reveal_range(&mut self, range: Selection) {
        self.revealed = Some(range);
    }

    fn eol(&self) -> &'static str {
        if self.text.contains("\r\n") {
            "\r\n"
        } else {
            "\n"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, TranslationError};
    use crate::translator::tests::MockTranslator;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingStatus {
        shown: AtomicUsize,
        cleared: AtomicUsize,
    }

    impl StatusBar for CountingStatus {
        fn show(&self, message: &str) {
            assert_eq!(message, "Translating...");
            self.shown.fetch_add(1, Ordering::SeqCst);
        }

        fn clear(&self) {
            self.cleared.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_position_math() {
        let mut buffer = TextBuffer::new("héllo\nworld");
        assert_eq!(buffer.offset_of(Position::new(0, 2)), 3);
        assert_eq!(buffer.offset_of(Position::new(1, 0)), 7);
        assert_eq!(buffer.offset_of(Position::new(1, 99)), buffer.text().len());
        assert_eq!(buffer.offset_of(Position::new(9, 0)), buffer.text().len());

        let end = buffer.insert(Position::new(0, 5), "\n\nX\nYZ");
        assert_eq!(end, Position::new(3, 2));
        assert_eq!(buffer.text(), "héllo\n\nX\nYZ\nworld");

        let end = buffer.insert(Position::new(0, 1), "ab");
        assert_eq!(end, Position::new(0, 3));
    }

    #[test]
    fn test_line_selection() {
        let mut buffer = TextBuffer::new("one\ntwo\nthree\n");
        let selection = buffer.line_selection(1, 2);
        assert_eq!(buffer.text_in(&selection), "two\nthree");

        let selection = buffer.line_selection(1, 50);
        assert_eq!(selection.end, Position::new(3, 0));

        buffer.select_all();
        assert_eq!(buffer.text_in(&buffer.selection()), "one\ntwo\nthree\n");
    }

    #[tokio::test]
    async fn test_translate_selection_inserts_after_selection() {
        let mut buffer = TextBuffer::new("intro\nhallo. welt\n\nzwei\nend");
        let selection = buffer.line_selection(1, 3);
        buffer.set_selection(selection);
        let status = CountingStatus::default();
        let mock = MockTranslator::default();

        let outcome = translate_selection(Some(&mut buffer), &status, &mock, &TranslateConfig::new())
            .await
            .unwrap();

        assert_eq!(
            buffer.text(),
            "intro\nhallo. welt\n\nzwei\n\nHALLO WELT\n\nZWEI\n\n\nend"
        );
        assert_eq!(outcome.selection.start, Position::new(3, 4));
        assert_eq!(outcome.selection.end, Position::new(9, 0));
        assert_eq!(buffer.selection(), outcome.selection);
        assert_eq!(
            buffer.revealed(),
            Some(Selection::new(Position::new(3, 0), Position::new(4, 0)))
        );
        assert_eq!(outcome.report.paragraphs, 2);
        assert_eq!(status.shown.load(Ordering::SeqCst), 1);
        assert_eq!(status.cleared.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_translate_selection_keeps_crlf_line_endings() {
        let mut buffer = TextBuffer::new("intro\r\nhallo. welt\r\n\r\nzwei\r\nend");
        let selection = buffer.line_selection(1, 3);
        buffer.set_selection(selection);
        assert_eq!(buffer.text_in(&selection), "hallo. welt\r\n\r\nzwei");

        let status = CountingStatus::default();
        let mock = MockTranslator::default();
        let outcome = translate_selection(Some(&mut buffer), &status, &mock, &TranslateConfig::new())
            .await
            .unwrap();

        assert_eq!(
            buffer.text(),
            "intro\r\nhallo. welt\r\n\r\nzwei\r\n\r\nHALLO WELT\r\n\r\nZWEI\r\n\r\n\r\nend"
        );
        assert!(!buffer.text().replace("\r\n", "").contains('\n'));
        assert_eq!(outcome.selection.start, Position::new(3, 4));
        assert_eq!(outcome.selection.end, Position::new(9, 0));
    }

    #[tokio::test]
    async fn test_translate_selection_wraps_output() {
        let mut buffer = TextBuffer::new("aaa bbb ccc ddd");
        buffer.select_all();
        let status = CountingStatus::default();
        let mock = MockTranslator::default();
        let config = TranslateConfig::new().with_wrap_margin(8);

        translate_selection(Some(&mut buffer), &status, &mock, &config)
            .await
            .unwrap();

        assert_eq!(buffer.text(), "aaa bbb ccc ddd\n\nAAA BBB\nCCC DDD\n\n");
    }

    #[tokio::test]
    async fn test_empty_selection_is_precondition_error() {
        let mut buffer = TextBuffer::new("text");
        let status = CountingStatus::default();
        let mock = MockTranslator::default();

        let err = translate_selection(Some(&mut buffer), &status, &mock, &TranslateConfig::new())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Precondition);
        assert_eq!(err.to_string(), "未选择文本");
        assert_eq!(mock.split_calls.load(Ordering::SeqCst), 0);
        assert_eq!(status.shown.load(Ordering::SeqCst), 0);
        assert_eq!(buffer.text(), "text");
    }

    #[tokio::test]
    async fn test_missing_editor_is_precondition_error() {
        let status = CountingStatus::default();
        let mock = MockTranslator::default();

        let err = translate_selection::<TextBuffer, _>(None, &status, &mock, &TranslateConfig::new())
            .await
            .unwrap_err();

        assert!(err.is_precondition());
        assert_eq!(mock.split_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failure_clears_status_and_leaves_document() {
        let mut buffer = TextBuffer::new("ok\n\nFAIL now\n");
        buffer.select_all();
        let status = CountingStatus::default();
        let mock = MockTranslator::default();

        let err = translate_selection(Some(&mut buffer), &status, &mock, &TranslateConfig::new())
            .await
            .unwrap_err();

        assert!(matches!(err, TranslationError::Network { .. }));
        assert_eq!(buffer.text(), "ok\n\nFAIL now\n");
        assert_eq!(status.shown.load(Ordering::SeqCst), 1);
        assert_eq!(status.cleared.load(Ordering::SeqCst), 1);
    }
}
