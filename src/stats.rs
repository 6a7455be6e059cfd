use std::time::Duration;

use crate::translator::TranslatedText;

/// 运行统计结构
#[derive(Debug)]
pub struct TranslationStats {
    pub file_read_time: Duration,
    pub translation_time: Duration,
    pub file_write_time: Duration,
    pub selected_chars: usize,
    pub translated_chars: usize,
    pub paragraphs: usize,
    pub sentences: usize,
    pub translated_sentences: usize,
}

impl TranslationStats {
    /// 由翻译结果填充句子与段落计数
    pub fn with_report(mut self, report: &TranslatedText) -> Self {
        self.paragraphs = report.paragraphs;
        self.sentences = report.sentences;
        self.translated_sentences = report.translated;
        self.translated_chars = report.text.chars().count();
        self
    }

    /// 没有候选译文的句子数
    pub fn dropped_sentences(&self) -> usize {
        self.sentences.saturating_sub(self.translated_sentences)
    }
}

/// 打印运行统计
pub fn print_performance_stats(stats: &TranslationStats, total_duration: Duration) {
    println!("\n📊 运行统计报告:");
    println!("═══════════════════════════════════════");

    // 时间分解
    println!("⏱️  时间分解:");
    println!("   文件读取: {}", format_duration(stats.file_read_time));
    println!("   翻译执行: {}", format_duration(stats.translation_time));
    println!("   文件写入: {}", format_duration(stats.file_write_time));
    println!("   总耗时: {}", format_duration(total_duration));

    // 文本统计
    println!("\n📏 文本统计:");
    println!("   选中字符: {}", stats.selected_chars);
    println!("   译文字符: {}", stats.translated_chars);

    // 翻译统计
    println!("\n🔤 翻译统计:");
    println!("   段落: {} 个", stats.paragraphs);
    println!("   句子: {} 句", stats.sentences);
    println!("   已翻译: {} 句", stats.translated_sentences);
    if stats.dropped_sentences() > 0 {
        println!("   无候选译文: {} 句", stats.dropped_sentences());
    }

    if !stats.translation_time.is_zero() && stats.paragraphs > 0 {
        println!("\n🚀 性能指标:");
        println!(
            "   处理速度: {:.1} 字符/秒",
            stats.selected_chars as f64 / stats.translation_time.as_secs_f64()
        );
    }
}

/// 格式化持续时间
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.3}s", duration.as_secs_f64())
    }
}
