use anyhow::Result;
use std::path::{Path, PathBuf};

/// 初始化日志系统
pub fn init_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}

/// 验证输入文件
pub fn validate_input_file(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("输入文件不存在: {}", path.display());
    }

    if !path.is_file() {
        anyhow::bail!("输入路径不是文件: {}", path.display());
    }

    Ok(())
}

/// 生成输出文件路径
pub fn generate_output_path(input: &Path, output: &Option<PathBuf>, lang: &str) -> PathBuf {
    if let Some(output_path) = output {
        return output_path.clone();
    }

    // 自动生成输出路径: notes_en.md
    let stem = input.file_stem().unwrap_or_default();
    let output_name = match input.extension() {
        Some(extension) => format!(
            "{}_{}.{}",
            stem.to_string_lossy(),
            lang.to_lowercase(),
            extension.to_string_lossy()
        ),
        None => format!("{}_{}", stem.to_string_lossy(), lang.to_lowercase()),
    };

    if let Some(parent) = input.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}

/// 解析行范围参数 "START:END"（从1开始，闭区间），返回从0开始的行号
pub fn parse_line_range(raw: &str) -> Result<(usize, usize)> {
    let (start, end) = raw
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("行范围格式应为 START:END: {}", raw))?;

    let start: usize = start.trim().parse()?;
    let end: usize = end.trim().parse()?;

    if start == 0 || end < start {
        anyhow::bail!("无效的行范围: {}", raw);
    }

    Ok((start - 1, end - 1))
}

/// 按指定宽度换行，保留原有的换行和空行
///
/// 只在空格处断行；超过宽度的单词（URL、标识符等）整体保留在一行，不拆分
pub fn wrap_text(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }
    let options = textwrap::Options::new(width)
        .break_words(false)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
        .word_splitter(textwrap::WordSplitter::NoHyphenation);
    textwrap::fill(text, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_output_path() {
        let path = generate_output_path(Path::new("/tmp/notes.md"), &None, "EN");
        assert_eq!(path, PathBuf::from("/tmp/notes_en.md"));

        let path = generate_output_path(Path::new("README"), &None, "DE");
        assert_eq!(path, PathBuf::from("README_de"));

        let custom = Some(PathBuf::from("out.txt"));
        assert_eq!(
            generate_output_path(Path::new("in.txt"), &custom, "EN"),
            PathBuf::from("out.txt")
        );
    }

    #[test]
    fn test_parse_line_range() {
        assert_eq!(parse_line_range("3:10").unwrap(), (2, 9));
        assert_eq!(parse_line_range("1:1").unwrap(), (0, 0));
        assert!(parse_line_range("0:2").is_err());
        assert!(parse_line_range("5:2").is_err());
        assert!(parse_line_range("7").is_err());
    }

    #[test]
    fn test_wrap_text_keeps_paragraphs() {
        let wrapped = wrap_text("one two three four\n\nfive six", 9);
        assert_eq!(wrapped, "one two\nthree\nfour\n\nfive six");
        assert_eq!(wrap_text("untouched text", 0), "untouched text");
    }

    #[test]
    fn test_wrap_text_keeps_long_words_whole() {
        assert_eq!(
            wrap_text("see https://example.com/a/very/long/path now", 10),
            "see\nhttps://example.com/a/very/long/path\nnow"
        );
        assert_eq!(
            wrap_text("a well-known fact", 8),
            "a\nwell-known\nfact"
        );
    }

    #[test]
    fn test_validate_input_file() {
        assert!(validate_input_file(Path::new("/definitely/not/here.txt")).is_err());
        assert!(validate_input_file(&std::env::temp_dir()).is_err());
    }
}
