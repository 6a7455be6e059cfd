use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::time::Instant;
use tracing::{debug, error, info};

use translate_deepl::config::Cli;
use translate_deepl::editor::{translate_selection, Editor, StatusBar, TextBuffer};
use translate_deepl::stats::{format_duration, print_performance_stats, TranslationStats};
use translate_deepl::utils::{
    generate_output_path, init_logging, parse_line_range, validate_input_file,
};
use translate_deepl::DeepLClient;

/// 通过日志输出状态提示
struct LogStatusBar;

impl StatusBar for LogStatusBar {
    fn show(&self, message: &str) {
        info!("⏳ {}", message);
    }

    fn clear(&self) {
        debug!("状态提示已清除");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志系统
    init_logging(cli.verbose, cli.quiet);

    let total_start = Instant::now();

    match run(&cli).await {
        Ok(stats) => {
            let total_duration = total_start.elapsed();

            if !cli.quiet {
                info!("✅ 翻译完成！总耗时: {}", format_duration(total_duration));
            }

            if cli.stats {
                print_performance_stats(&stats, total_duration);
            }
        }
        Err(e) => {
            error!("❌ 翻译失败: {:#}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// 读取输入、翻译选区并写出结果
async fn run(cli: &Cli) -> Result<TranslationStats> {
    let config = cli.to_config();
    config.validate()?;

    // 读取输入
    let read_start = Instant::now();
    let content = match &cli.input {
        Some(path) => {
            validate_input_file(path)?;
            std::fs::read_to_string(path)
                .with_context(|| format!("读取文件失败: {}", path.display()))?
        }
        None => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("读取标准输入失败")?;
            content
        }
    };
    let file_read_time = read_start.elapsed();

    // 设置选区
    let mut buffer = TextBuffer::new(content);
    match &cli.lines {
        Some(range) => {
            let (start, end) = parse_line_range(range)?;
            let selection = buffer.line_selection(start, end);
            buffer.set_selection(selection);
        }
        None => buffer.select_all(),
    }
    let selected_chars = buffer.text_in(&buffer.selection()).chars().count();

    if !cli.quiet {
        if let Some(path) = &cli.input {
            info!("📂 输入文件: {}", path.display());
        }
        info!("🌐 目标语言: {}", config.target_lang());
    }

    // 执行翻译
    let client = DeepLClient::new(&config)?;
    let translate_start = Instant::now();
    let outcome = translate_selection(Some(&mut buffer), &LogStatusBar, &client, &config).await?;
    let translation_time = translate_start.elapsed();

    // 写出结果
    let write_start = Instant::now();
    let output_path = match (&cli.input, &cli.output) {
        _ if cli.stdout => None,
        (Some(input), output) => Some(generate_output_path(input, output, config.target_lang())),
        (None, output) => output.clone(),
    };
    match output_path {
        Some(output_path) => {
            std::fs::write(&output_path, buffer.text())
                .with_context(|| format!("写入文件失败: {}", output_path.display()))?;
            if !cli.quiet {
                info!("📄 输出文件: {}", output_path.display());
            }
        }
        None => print!("{}", buffer.text()),
    }
    let file_write_time = write_start.elapsed();

    let stats = TranslationStats {
        file_read_time,
        translation_time,
        file_write_time,
        selected_chars,
        translated_chars: 0,
        paragraphs: 0,
        sentences: 0,
        translated_sentences: 0,
    }
    .with_report(&outcome.report);

    Ok(stats)
}
