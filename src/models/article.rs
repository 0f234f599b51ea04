use serde::Serialize;

/// 没有标题元素时使用的占位标题
pub const UNTITLED: &str = "제목 없음";

/// 一篇抓取到的新闻文章
///
/// 每次请求创建，渲染后丢弃，不做持久化。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub url: String,
    pub title: String,
    pub body_text: String,
}

/// 正文来自哪条提取路径
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BodySource {
    /// 命中了正文容器选择器
    Container(String),
    /// 未找到容器，收集了全文中较长的段落
    Fallback,
}

impl Article {
    /// 正文字符数（按 Unicode 字符计）
    pub fn body_len(&self) -> usize {
        self.body_text.chars().count()
    }

    /// 正文预览，超过 `max_chars` 时截断并追加 "..."
    pub fn preview(&self, max_chars: usize) -> String {
        crate::utils::logging::truncate_text(&self.body_text, max_chars)
    }

    /// 根据标题生成输出文件名：`wordcloud_<标题前20字>.png`
    ///
    /// 文件系统不允许的字符替换为 `_`；标题为空时使用时间戳。
    pub fn image_file_name(&self) -> String {
        let stem: String = self
            .title
            .chars()
            .take(20)
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();
        let stem = stem.trim();

        if stem.is_empty() {
            format!(
                "wordcloud_{}.png",
                chrono::Local::now().format("%Y-%m-%d-%H-%M-%S")
            )
        } else {
            format!("wordcloud_{}.png", stem)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, body: &str) -> Article {
        Article {
            url: "https://www.joongang.co.kr/article/1".to_string(),
            title: title.to_string(),
            body_text: body.to_string(),
        }
    }

    #[test]
    fn test_body_len_counts_chars() {
        assert_eq!(article("t", "한국어 본문").body_len(), 6);
    }

    #[test]
    fn test_image_file_name_truncates_and_sanitizes() {
        let a = article("정부/여당: 예산안 합의?  그리고 아주 긴 제목이 계속 이어진다", "");
        let name = a.image_file_name();
        assert!(name.starts_with("wordcloud_정부_여당_ 예산안 합의_"));
        assert!(name.ends_with(".png"));
        let stem = name.trim_start_matches("wordcloud_").trim_end_matches(".png");
        assert!(stem.chars().count() <= 20);
    }

    #[test]
    fn test_image_file_name_for_blank_title_uses_timestamp() {
        let name = article("   ", "").image_file_name();
        assert!(name.starts_with("wordcloud_20"));
    }
}
