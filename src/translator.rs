use futures::future::try_join_all;
use tracing::{debug, info, warn};

use crate::api_constants::editor_config;
use crate::config::TranslateConfig;
use crate::deepl::SentenceTranslator;
use crate::error::Result;
use crate::paragraph::split_into_paragraphs;

/// 翻译结果及统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslatedText {
    /// 按原顺序拼接的译文
    pub text: String,
    /// 段落数
    pub paragraphs: usize,
    /// 分句得到的句子数
    pub sentences: usize,
    /// 实际得到译文的句子数
    pub translated: usize,
}

impl TranslatedText {
    /// 没有候选译文而被丢弃的句子数
    pub fn dropped(&self) -> usize {
        self.sentences.saturating_sub(self.translated)
    }
}

/// 单个段落的翻译结果
#[derive(Debug)]
struct ParagraphOutcome {
    text: String,
    sentences: usize,
    translated: usize,
}

/// 翻译文本，返回拼接后的译文
pub async fn translate_text(
    text: &str,
    translator: &dyn SentenceTranslator,
    config: &TranslateConfig,
) -> Result<String> {
    Ok(translate_text_detailed(text, translator, config).await?.text)
}

/// 按段落并发翻译
///
/// 每个段落依次执行分句、翻译、以空格拼接句子；所有段落同时发起，
/// 任一段落失败则整体失败，不返回部分结果。结果按段落索引归位，与完成顺序无关。
pub async fn translate_text_detailed(
    text: &str,
    translator: &dyn SentenceTranslator,
    config: &TranslateConfig,
) -> Result<TranslatedText> {
    let paragraphs = split_into_paragraphs(text);

    if paragraphs.is_empty() {
        return Ok(TranslatedText::default());
    }

    info!("📝 {} 个段落，目标语言: {}", paragraphs.len(), config.target_lang());

    // 并发处理所有段落
    let tasks = paragraphs.iter().enumerate().map(|(index, paragraph)| async move {
        let result = translate_paragraph(paragraph, translator, config).await;

        match &result {
            Ok(outcome) => {
                debug!(
                    "✅ 段落 {} 完成: {}/{} 句",
                    index + 1,
                    outcome.translated,
                    outcome.sentences
                );
            }
            Err(e) => {
                warn!("❌ 段落 {} 失败: {}", index + 1, e);
            }
        }

        result.map(|outcome| (index, outcome))
    });

    // 等待所有段落完成，首个失败即中止
    let results = try_join_all(tasks).await?;

    // 按索引归位
    let mut slots: Vec<Option<ParagraphOutcome>> = Vec::new();
    slots.resize_with(paragraphs.len(), || None);
    for (index, outcome) in results {
        slots[index] = Some(outcome);
    }

    let mut translated = TranslatedText {
        paragraphs: paragraphs.len(),
        ..Default::default()
    };
    let mut texts = Vec::with_capacity(paragraphs.len());
    for outcome in slots.into_iter().flatten() {
        translated.sentences += outcome.sentences;
        translated.translated += outcome.translated;
        texts.push(outcome.text);
    }
    translated.text = texts.join(editor_config::PARAGRAPH_SEPARATOR);

    if translated.dropped() > 0 {
        warn!("⚠️  {} 句没有候选译文，已省略", translated.dropped());
    }
    info!(
        "📊 翻译完成: {} 段，{}/{} 句",
        translated.paragraphs, translated.translated, translated.sentences
    );

    Ok(translated)
}

/// 翻译单个段落
async fn translate_paragraph(
    paragraph: &str,
    translator: &dyn SentenceTranslator,
    config: &TranslateConfig,
) -> Result<ParagraphOutcome> {
    let sentences = translator.split_into_sentences(paragraph, config).await?;
    let translations = translator.translate_sentences(&sentences, config).await?;

    Ok(ParagraphOutcome {
        text: translations.join(editor_config::SENTENCE_SEPARATOR),
        sentences: sentences.len(),
        translated: translations.len(),
    })
}
