//! 结果展示：文本报告与 JSON 报告

use serde_json::{json, Value as JsonValue};
use std::fmt::Write as _;
use std::path::Path;

use crate::models::BodySource;
use crate::utils::logging::with_thousands;
use crate::workflow::ProcessResult;

/// 正文预览的字符数
pub const PREVIEW_CHARS: usize = 500;

/// 文本报告：文章信息 + 名词排名表
pub fn format_report(result: &ProcessResult) -> String {
    let mut out = String::new();
    let article = &result.article;

    if let Some(notice) = &result.notice {
        let _ = writeln!(out, "ℹ️  {}", notice.message());
    }
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out, "📰 기사 정보");
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out, "제목: {}", article.title);
    let _ = writeln!(out, "URL: {}", article.url);
    let _ = writeln!(out, "본문 길이: {}자", with_thousands(article.body_len()));
    let _ = writeln!(out, "\n본문 미리보기:\n{}", article.preview(PREVIEW_CHARS));

    let _ = writeln!(out, "\n{}", "=".repeat(60));
    let _ = writeln!(out, "🏆 상위 {}개 명사", result.top.len());
    let _ = writeln!(out, "{}", "=".repeat(60));
    if result.top.is_empty() {
        let _ = writeln!(out, "(명사 없음)");
    } else {
        let width = result
            .top
            .iter()
            .map(|row| display_width(&row.noun))
            .fold(display_width("명사"), usize::max);
        let _ = writeln!(
            out,
            "{}  {}  {}",
            pad_left("순위", 4),
            pad_right("명사", width),
            pad_left("빈도", 6)
        );
        for row in &result.top {
            let _ = writeln!(
                out,
                "{:>4}  {}  {:>6}",
                row.rank,
                pad_right(&row.noun, width),
                row.count
            );
        }
    }

    out
}

/// 终端显示宽度：韩文、汉字等全角字符占 2 列
fn display_width(s: &str) -> usize {
    s.chars().map(|c| if is_wide(c) { 2 } else { 1 }).sum()
}

fn is_wide(c: char) -> bool {
    matches!(
        c as u32,
        0x1100..=0x115F | 0x2E80..=0xA4CF | 0xAC00..=0xD7A3 | 0xF900..=0xFAFF | 0xFF00..=0xFF60 | 0xFFE0..=0xFFE6
    )
}

/// 按显示宽度在右侧补空格
fn pad_right(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(display_width(s))))
}

fn pad_left(s: &str, width: usize) -> String {
    format!("{}{}", " ".repeat(width.saturating_sub(display_width(s))), s)
}

/// JSON 报告
pub fn json_report(result: &ProcessResult, image_path: Option<&Path>) -> JsonValue {
    let body_source = match &result.body_source {
        BodySource::Container(css) => json!({ "kind": "container", "selector": css }),
        BodySource::Fallback => json!({ "kind": "fallback" }),
    };

    json!({
        "url": result.article.url,
        "title": result.article.title,
        "body_length": result.article.body_len(),
        "body_preview": result.article.preview(PREVIEW_CHARS),
        "body_source": body_source,
        "notice": result.notice.as_ref().map(|n| n.message()),
        "noun_count": result.raw_counts.len(),
        "filtered_noun_count": result.filtered.len(),
        "top_nouns": result.top,
        "wordcloud": {
            "path": image_path.map(|p| p.display().to_string()),
            "placed_words": result.cloud.image().map(|img| img.words.len()),
            "message": result.cloud.message(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Article, NounFrequencyMap};
    use crate::workflow::CloudOutcome;

    fn sample() -> ProcessResult {
        let filtered: NounFrequencyMap = [("정부", 1200usize), ("국회", 3)].into_iter().collect();
        ProcessResult {
            notice: None,
            article: Article {
                url: "https://www.joongang.co.kr/article/1".to_string(),
                title: "예산안 합의".to_string(),
                body_text: "가".repeat(1234),
            },
            body_source: BodySource::Container("div#article_body".to_string()),
            raw_counts: filtered.clone(),
            top: filtered.top(50),
            filtered,
            cloud: CloudOutcome::NoWords,
        }
    }

    #[test]
    fn test_text_report() {
        let text = format_report(&sample());
        assert!(text.contains("제목: 예산안 합의"));
        assert!(text.contains("본문 길이: 1,234자"));
        assert!(text.contains("..."));
        let first_row = text.lines().find(|l| l.contains("정부")).unwrap();
        assert!(first_row.trim_start().starts_with('1'));
        assert!(first_row.ends_with("1200"));
    }

    #[test]
    fn test_table_columns_align_by_display_width() {
        let filtered: NounFrequencyMap = [("예산안", 12usize), ("AI", 7), ("국회", 3)].into_iter().collect();
        let result = ProcessResult {
            top: filtered.top(50),
            filtered,
            ..sample()
        };
        let text = format_report(&result);
        let rows: Vec<&str> = text
            .lines()
            .skip_while(|l| !l.contains("순위"))
            .collect();
        assert_eq!(rows.len(), 4);
        let widths: Vec<usize> = rows.iter().map(|l| display_width(l)).collect();
        assert!(widths.iter().all(|w| *w == widths[0]), "{:?}", rows);
        assert_eq!(display_width("예산안"), 6);
        assert_eq!(display_width("AI"), 2);
    }

    #[test]
    fn test_json_report() {
        let value = json_report(&sample(), None);
        assert_eq!(value["body_length"], 1234);
        assert_eq!(value["body_source"]["selector"], "div#article_body");
        assert_eq!(value["top_nouns"][0]["noun"], "정부");
        assert_eq!(value["top_nouns"][1]["rank"], 2);
        assert!(value["wordcloud"]["path"].is_null());
        assert!(value["wordcloud"]["message"].is_string());
    }
}
