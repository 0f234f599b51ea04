use std::sync::Arc;
use std::time::Duration;

use article_cloud::clients::ArticleClient;
use article_cloud::config::Config;
use article_cloud::models::{AnalysisOptions, BodySource, RenderOptions};
use article_cloud::orchestrator::App;
use article_cloud::services::{KoreanAnalyzer, Typesetter};
use article_cloud::workflow::ArticleCloudFlow;
use image::GrayImage;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// 每个字符占 size×size 的方块，不依赖系统字体
struct BlockTypesetter;

impl Typesetter for BlockTypesetter {
    fn measure(&self, word: &str, font_size: u32) -> (u32, u32) {
        (word.chars().count() as u32 * font_size, font_size)
    }

    fn rasterize(&self, word: &str, font_size: u32) -> GrayImage {
        let (w, h) = self.measure(word, font_size);
        GrayImage::from_pixel(w, h, image::Luma([255]))
    }
}

const ARTICLE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>중앙일보 - 예산안</title></head>
<body>
  <nav><p>로그인</p></nav>
  <h1 class="headline">여야, 내년도 예산안 처리 합의</h1>
  <div id="article_body">
    <p>(서울=연합뉴스) 홍길동 기자 = 여야는 내년도 예산안을 국회 본회의에서 처리하기로 합의했다.</p>
    <p>정부는 경제 회복과 민생 안정을 위해 예산안을 제출했으며 국회는 예산안 심사를 마쳤다.</p>
    <p>정부 관계자는 예산안 처리가 경제에 긍정적인 신호가 될 것이라고 밝혔다.</p>
  </div>
  <footer><p>무단 전재 및 재배포 금지</p></footer>
</body>
</html>"#;

/// 在本地端口上应答一次页面
async fn serve_once(html: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let header = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            html.len()
        );
        socket.write_all(header.as_bytes()).await.unwrap();
        socket.write_all(html.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });
    format!("http://{}/article/25398258", addr)
}

fn flow() -> ArticleCloudFlow {
    let client = ArticleClient::with_settings("integration-test", Duration::from_secs(5)).unwrap();
    ArticleCloudFlow::with_components(
        client,
        Arc::new(KoreanAnalyzer::new()),
        Some(Arc::new(BlockTypesetter)),
    )
    .unwrap()
}

fn options() -> AnalysisOptions {
    AnalysisOptions {
        top_n: 10,
        render: RenderOptions {
            width: 600,
            height: 300,
            ..RenderOptions::default()
        },
        ..AnalysisOptions::default()
    }
}

#[tokio::test]
async fn test_article_to_wordcloud() {
    let url = serve_once(ARTICLE_HTML).await;
    let result = flow().run(&url, &options()).await.unwrap();

    assert_eq!(result.article.title, "여야, 내년도 예산안 처리 합의");
    assert_eq!(
        result.body_source,
        BodySource::Container("div#article_body".to_string())
    );
    assert!(!result.article.body_text.contains("로그인"));

    // 默认停用词在过滤前存在、过滤后消失
    assert!(result.raw_counts.contains("기자"));
    assert!(!result.filtered.contains("기자"));
    assert!(!result.filtered.contains("연합뉴스"));

    assert_eq!(result.top[0].noun, "예산안");
    assert_eq!(result.top[0].count, 4);
    assert!(result.top.len() <= 10);
    assert!(result.top.windows(2).all(|w| w[0].count >= w[1].count));

    let image = result.cloud.image().expect("应生成词云");
    assert_eq!((image.width(), image.height()), (600, 300));
    assert_eq!(image.words[0].word, "예산안");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(result.article.image_file_name());
    image.save(&path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..4], b"\x89PNG");
}

#[tokio::test]
async fn test_custom_stopwords_change_ranking() {
    let url = serve_once(ARTICLE_HTML).await;
    let options = AnalysisOptions {
        custom_stopwords: vec!["예산안".to_string()],
        ..options()
    };
    let result = flow().run(&url, &options).await.unwrap();
    assert!(!result.filtered.contains("예산안"));
    assert!(result.top.iter().all(|row| row.noun != "예산안"));
    assert!(result.raw_counts.contains("예산안"));
}

#[tokio::test]
async fn test_unreachable_server_is_reported() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = flow()
        .run(&format!("http://{}/article/1", addr), &options())
        .await
        .unwrap_err();
    assert!(err.is_article_failure());
    assert_eq!(err.user_message(), "연결 실패");
    assert!(err
        .failure_message()
        .starts_with("❌ 기사를 가져올 수 없습니다.\n\n📝 연결 실패\n\n💡"));
}

#[tokio::test]
async fn test_app_run_once_writes_output() {
    let url = serve_once(ARTICLE_HTML).await;
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        output_dir: dir.path().display().to_string(),
        width: 600,
        height: 300,
        ..Config::default()
    };

    let app = App::with_config(config).unwrap();
    assert_eq!(app.options().top_n, 50);

    let output = dir.path().join("cloud.png");
    let ok = app
        .run_once(&url, Some(output.to_str().unwrap()), true)
        .await;
    assert!(ok);
}

#[tokio::test]
async fn test_app_run_once_reports_failure() {
    let app = App::with_config(Config::default()).unwrap();
    assert!(!app.run_once("   ", None, false).await);
}
