//! Integration tests for the crawler
//!
//! These tests stand up a mock wiki with wiremock and run the full crawl
//! cycle end-to-end: hub page, champion list, category page, and character
//! detail pages.

use fandex::config::Config;
use fandex::crawl::Coordinator;
use fandex::FandexError;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at a mock server
fn test_config(data_dir: &TempDir, limit: usize) -> Config {
    let mut config = Config::default();
    config.crawler.record_limit = limit;
    config.crawler.max_concurrent_fetches = 3;
    config.wiki.allowed_domain = "127.0.0.1".to_string();
    config.output.data_dir = data_dir.path().display().to_string();
    config
}

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html")
}

/// Hub page with gallery links; the champions link is keyword-hinted
fn hub_page() -> String {
    r#"<html><body>
        <div class="wikia-gallery-item">
            <a class="link-internal" href="/wiki/Champions">Champions</a>
        </div>
        <div class="wikia-gallery-item">
            <a class="link-internal" href="/wiki/Lore">Lore</a>
        </div>
    </body></html>"#
        .to_string()
}

/// Champion list page with detail links and a category link
fn list_page(detail_paths: &[&str]) -> String {
    let rows: String = detail_paths
        .iter()
        .map(|p| format!(r#"<a href="{}">{}</a>"#, p, p))
        .collect();
    format!(
        r#"<html><body>
        <div class="article-table">{}</div>
        <a href="/wiki/Category:Characters">All characters</a>
        </body></html>"#,
        rows
    )
}

/// Category page listing member links
fn category_page(member_paths: &[&str]) -> String {
    let members: String = member_paths
        .iter()
        .map(|p| format!(r#"<a href="{}">{}</a>"#, p, p))
        .collect();
    format!(
        r#"<html><body><div class="category-page__members">{}</div></body></html>"#,
        members
    )
}

/// Character detail page: infobox + attribute label push the evidence
/// score to 2, and the render image carries CDN transforms to clean away
fn detail_page(name: &str) -> String {
    format!(
        r#"<html><body>
        <h1 class="page-header__title">{name}</h1>
        <aside class="portable-infobox">
            <div class="pi-item">
                <h3 class="pi-data-label">Species</h3>
                <div class="pi-data-value">Vastaya</div>
            </div>
            <figure class="pi-image">
                <img alt="{name} Render"
                     src="//images.wiki/{name}.png/scale-to-width-down/200/revision/latest?cb=1">
            </figure>
        </aside>
        </body></html>"#
    )
}

/// Mounts the standard three-character mock wiki
async fn mount_standard_wiki(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(hub_page()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wiki/Champions"))
        .respond_with(html_response(list_page(&["/wiki/Ahri", "/wiki/Garen"])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wiki/Category:Characters"))
        .respond_with(html_response(category_page(&["/wiki/Lux"])))
        .mount(server)
        .await;

    // A page with no recognizable structure: falls back to its Hub hint
    // and expands to nothing
    Mock::given(method("GET"))
        .and(path("/wiki/Lore"))
        .respond_with(html_response(
            "<html><body><p>Old stories.</p></body></html>".to_string(),
        ))
        .mount(server)
        .await;

    for name in ["Ahri", "Garen", "Lux"] {
        Mock::given(method("GET"))
            .and(path(format!("/wiki/{}", name)))
            .respond_with(html_response(detail_page(name)))
            .mount(server)
            .await;
    }
}

#[tokio::test]
async fn test_full_crawl_commits_characters() {
    let server = MockServer::start().await;
    mount_standard_wiki(&server).await;

    let data_dir = TempDir::new().unwrap();
    let config = test_config(&data_dir, 10);

    let mut coordinator = Coordinator::new(config, &server.uri(), None).unwrap();
    let report = coordinator.run().await.expect("crawl failed");

    // Frontier exhausted before the limit
    assert!(!report.limit_reached);
    assert_eq!(report.committed_count(), 3);

    let mut names: Vec<&str> = report.records.iter().map(|r| r.name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["Ahri", "Garen", "Lux"]);

    // Image URLs were cleaned of CDN transforms
    let ahri = report.records.iter().find(|r| r.name == "Ahri").unwrap();
    assert_eq!(
        ahri.image_url.as_deref(),
        Some("https://images.wiki/Ahri.png")
    );
    assert_eq!(ahri.kind.as_deref(), Some("Vastaya"));

    // Hub, list, category, lore, and three detail pages were all fetched
    assert!(report.pages_fetched >= 5);
    assert_eq!(report.candidates_extracted, 3);
}

#[tokio::test]
async fn test_snapshot_matches_committed_set() {
    let server = MockServer::start().await;
    mount_standard_wiki(&server).await;

    let data_dir = TempDir::new().unwrap();
    let config = test_config(&data_dir, 10);

    let mut coordinator = Coordinator::new(config, &server.uri(), None).unwrap();
    let snapshot_path = coordinator.snapshot_path().to_path_buf();
    let report = coordinator.run().await.expect("crawl failed");

    let content = std::fs::read_to_string(&snapshot_path).expect("snapshot missing");
    let persisted: Vec<fandex::CharacterRecord> = serde_json::from_str(&content).unwrap();
    assert_eq!(persisted, report.records);
}

#[tokio::test]
async fn test_record_limit_stops_crawl() {
    let server = MockServer::start().await;
    mount_standard_wiki(&server).await;

    let data_dir = TempDir::new().unwrap();
    let config = test_config(&data_dir, 1);

    let mut coordinator = Coordinator::new(config, &server.uri(), None).unwrap();
    let snapshot_path = coordinator.snapshot_path().to_path_buf();
    let report = coordinator.run().await.expect("crawl failed");

    // Exactly one record, never more, even with fetches in flight
    assert_eq!(report.committed_count(), 1);
    assert!(report.limit_reached);

    let content = std::fs::read_to_string(&snapshot_path).unwrap();
    let persisted: Vec<fandex::CharacterRecord> = serde_json::from_str(&content).unwrap();
    assert_eq!(persisted.len(), 1);
}

#[tokio::test]
async fn test_unavailable_pages_are_discarded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(hub_page()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wiki/Champions"))
        .respond_with(html_response(list_page(&["/wiki/Ahri", "/wiki/Missing"])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wiki/Ahri"))
        .respond_with(html_response(detail_page("Ahri")))
        .mount(&server)
        .await;

    // Everything unmocked (including /wiki/Missing and /wiki/Lore and the
    // category page) 404s; the crawl must absorb that and continue
    let data_dir = TempDir::new().unwrap();
    let config = test_config(&data_dir, 10);

    let mut coordinator = Coordinator::new(config, &server.uri(), None).unwrap();
    let report = coordinator.run().await.expect("crawl failed");

    assert_eq!(report.committed_count(), 1);
    assert_eq!(report.records[0].name, "Ahri");
    assert!(report.pages_unavailable >= 1);
}

#[tokio::test]
async fn test_same_page_under_query_variants_committed_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(hub_page()))
        .mount(&server)
        .await;

    // The list names the same character twice with different query strings;
    // both fetches succeed, but cleaning collapses them to one source URL
    // and dedup rejects the second
    Mock::given(method("GET"))
        .and(path("/wiki/Champions"))
        .respond_with(html_response(list_page(&[
            "/wiki/Ahri",
            "/wiki/Ahri?ref=sidebar",
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wiki/Ahri"))
        .respond_with(html_response(detail_page("Ahri")))
        .mount(&server)
        .await;

    let data_dir = TempDir::new().unwrap();
    let config = test_config(&data_dir, 10);

    let mut coordinator = Coordinator::new(config, &server.uri(), None).unwrap();
    let report = coordinator.run().await.expect("crawl failed");

    assert_eq!(report.committed_count(), 1);
    assert_eq!(report.total_rejections(), 1);
}

#[tokio::test]
async fn test_wrong_domain_seed_is_fatal() {
    let data_dir = TempDir::new().unwrap();
    let mut config = test_config(&data_dir, 10);
    config.wiki.allowed_domain = "fandom.com".to_string();

    let result = Coordinator::new(config, "example.com", None);
    assert!(matches!(result, Err(FandexError::InvalidSeedUrl { .. })));
}

#[tokio::test]
async fn test_schemeless_fandom_seed_accepted() {
    let data_dir = TempDir::new().unwrap();
    let mut config = test_config(&data_dir, 10);
    config.wiki.allowed_domain = "fandom.com".to_string();

    let coordinator =
        Coordinator::new(config, "leagueoflegends.fandom.com", None).unwrap();
    assert_eq!(
        coordinator.seed().as_str(),
        "https://leagueoflegends.fandom.com/"
    );
}
