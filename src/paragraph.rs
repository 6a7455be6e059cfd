//! 段落切分
//!
//! 远端接口对单次请求的字符数有限制，因此按空行把文本切成段落，逐段翻译。

/// 按空行把文本切分为段落
///
/// 每个非空行连同结尾换行符一起累积到当前段落；遇到空行（trim后为空）时
/// 输出当前段落。连续空行不会产生空段落，返回的段落均不为空白。
pub fn split_into_paragraphs(text: &str) -> Vec<String> {
    let text = text.replace("\r\n", "\n");

    let mut paragraphs = Vec::new();
    let mut paragraph = String::new();

    for line in text.split('\n') {
        if !line.trim().is_empty() {
            paragraph.push_str(line);
            paragraph.push('\n');
        } else if !paragraph.is_empty() {
            paragraphs.push(std::mem::take(&mut paragraph));
        }
    }

    if !paragraph.is_empty() {
        paragraphs.push(paragraph);
    }

    paragraphs
}
