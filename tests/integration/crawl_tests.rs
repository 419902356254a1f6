//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small catalogue and run the full
//! listing -> detail -> record cycle end-to-end.

use catalogue_crawler::book::Availability;
use catalogue_crawler::config::{CatalogueConfig, Config, HttpConfig};
use catalogue_crawler::crawler::{crawl_catalogue, run_crawl, CrawlOutcome, Crawler};
use catalogue_crawler::state::SkipReason;
use rust_decimal::Decimal;
use std::str::FromStr;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock catalogue
fn create_test_config(base_url: &str) -> Config {
    Config {
        catalogue: CatalogueConfig {
            root_url: format!("{}/catalogue/", base_url),
            first_page: "page-1.html".to_string(),
        },
        http: HttpConfig {
            user_agent: "TestBot/1.0".to_string(),
            timeout_secs: 5,
            connect_timeout_secs: 2,
        },
        ..Config::default()
    }
}

/// Listing page with one card per slug and an optional "next" link
fn listing_page(slugs: &[String], next: Option<&str>) -> String {
    let cards: String = slugs
        .iter()
        .map(|slug| {
            format!(
                r#"<li><article class="product_pod">
                    <h3><a href="{slug}/index.html" title="{slug}">{slug}</a></h3>
                    <p class="price_color">£10.00</p>
                </article></li>"#
            )
        })
        .collect();

    let pager = next
        .map(|href| format!(r#"<ul class="pager"><li class="next"><a href="{href}">next</a></li></ul>"#))
        .unwrap_or_default();

    format!(
        r#"<html><body><ol class="row">{cards}</ol>{pager}</body></html>"#
    )
}

/// Detail page with every field present
fn detail_page(title: &str, genre: &str, price: &str, stock: &str, rating: &str) -> String {
    format!(
        r#"<html><body>
        <ul class="breadcrumb">
            <li><a href="../../index.html">Home</a></li>
            <li><a href="../category/books_1/index.html">Books</a></li>
            <li><a href="../category/books/x_2/index.html">{genre}</a></li>
            <li class="active">{title}</li>
        </ul>
        <div class="product_main">
            <h1>{title}</h1>
            <p class="price_color">{price}</p>
            <p class="instock availability"><i class="icon-ok"></i> {stock} </p>
            <p class="star-rating {rating}"></p>
        </div>
        </body></html>"#
    )
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Mounts listing pages `1..=cards_per_page.len()` with the given number of
/// cards each, plus a valid detail page per card
async fn mount_catalogue(server: &MockServer, cards_per_page: &[usize]) {
    let pages = cards_per_page.len();

    for (index, &count) in cards_per_page.iter().enumerate() {
        let page = index + 1;
        let slugs: Vec<String> = (1..=count).map(|n| format!("book-{}-{}", page, n)).collect();
        let next = (page < pages).then(|| format!("page-{}.html", page + 1));

        mount_html(
            server,
            &format!("/catalogue/page-{}.html", page),
            listing_page(&slugs, next.as_deref()),
        )
        .await;

        for slug in &slugs {
            mount_html(
                server,
                &format!("/catalogue/{}/index.html", slug),
                detail_page(slug, "Poetry", "£51.77", "In stock (22 available)", "Three"),
            )
            .await;
        }
    }
}

#[tokio::test]
async fn test_full_crawl_across_pages() {
    let mock_server = MockServer::start().await;
    mount_catalogue(&mock_server, &[3, 0, 2]).await;

    let config = create_test_config(&mock_server.uri());
    let report = run_crawl(&config).await.expect("Crawl failed");

    // One record per card across all pages, including an empty middle page
    assert_eq!(report.outcome, CrawlOutcome::Completed);
    assert_eq!(report.pages_visited, 3);
    assert_eq!(report.records().len(), 5);
    assert!(report.skipped().is_empty());

    // Document order is preserved
    let titles: Vec<&str> = report.records().iter().map(|r| r.title()).collect();
    assert_eq!(
        titles,
        vec!["book-1-1", "book-1-2", "book-1-3", "book-3-1", "book-3-2"]
    );

    let first = &report.records()[0];
    assert_eq!(first.genre(), "Poetry");
    assert_eq!(first.price(), Decimal::from_str("51.77").unwrap());
    assert_eq!(first.rating(), 3);
    assert_eq!(first.availability(), Availability::Available);
}

#[tokio::test]
async fn test_listing_failure_stops_traversal() {
    let mock_server = MockServer::start().await;

    // 20 pages with one book each; page 5 fails
    for page in 1..=20 {
        let route = format!("/catalogue/page-{}.html", page);
        let slug = format!("book-{}", page);
        let next = (page < 20).then(|| format!("page-{}.html", page + 1));

        if page == 5 {
            Mock::given(method("GET"))
                .and(path(route.as_str()))
                .respond_with(ResponseTemplate::new(500))
                .expect(1)
                .mount(&mock_server)
                .await;
            continue;
        }

        let expected_calls = if page < 5 { 1 } else { 0 };
        Mock::given(method("GET"))
            .and(path(route.as_str()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(listing_page(&[slug.clone()], next.as_deref())),
            )
            .expect(expected_calls)
            .mount(&mock_server)
            .await;

        mount_html(
            &mock_server,
            &format!("/catalogue/{}/index.html", slug),
            detail_page(&slug, "Fiction", "£5.00", "In stock", "One"),
        )
        .await;
    }

    let config = create_test_config(&mock_server.uri());
    let report = run_crawl(&config).await.expect("Aborted crawl is not an error");

    let titles: Vec<&str> = report.records().iter().map(|r| r.title()).collect();
    assert_eq!(titles, vec!["book-1", "book-2", "book-3", "book-4"]);
    assert_eq!(report.pages_visited, 4);

    match &report.outcome {
        CrawlOutcome::Aborted { page, url, reason } => {
            assert_eq!(*page, 5);
            assert!(url.ends_with("/catalogue/page-5.html"));
            assert_eq!(reason, "HTTP 500");
        }
        other => panic!("Expected aborted crawl, got {:?}", other),
    }

    // Wiremock verifies that pages 6..=20 were never requested when it drops
}

#[tokio::test]
async fn test_malformed_detail_pages_are_skipped() {
    let mock_server = MockServer::start().await;

    let slugs: Vec<String> = ["good", "no-price", "bad-price", "gone", "also-good"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    mount_html(
        &mock_server,
        "/catalogue/page-1.html",
        listing_page(&slugs, None),
    )
    .await;

    mount_html(
        &mock_server,
        "/catalogue/good/index.html",
        detail_page("Good", "Poetry", "£1.00", "In stock", "Two"),
    )
    .await;
    mount_html(
        &mock_server,
        "/catalogue/no-price/index.html",
        detail_page("No Price", "Poetry", "£1.00", "In stock", "Two").replace("price_color", "price"),
    )
    .await;
    mount_html(
        &mock_server,
        "/catalogue/bad-price/index.html",
        detail_page("Bad Price", "Poetry", "ask us", "In stock", "Two"),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/catalogue/gone/index.html"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    mount_html(
        &mock_server,
        "/catalogue/also-good/index.html",
        detail_page("Also Good", "Poetry", "£2.00", "Out of stock", "Five"),
    )
    .await;

    let config = create_test_config(&mock_server.uri());
    let report = run_crawl(&config).await.expect("Crawl failed");

    // Skip-and-continue: the crawl completes with the well-formed books
    assert!(report.outcome.is_completed());
    let titles: Vec<&str> = report.records().iter().map(|r| r.title()).collect();
    assert_eq!(titles, vec!["Good", "Also Good"]);
    assert_eq!(
        report.records()[1].availability(),
        Availability::OutOfStock
    );

    let skipped = report.skipped();
    assert_eq!(skipped.len(), 3);

    assert!(skipped[0].url.ends_with("/catalogue/no-price/index.html"));
    assert!(matches!(&skipped[0].reason, SkipReason::Extract(e) if e.field() == "price"));

    assert!(skipped[1].url.ends_with("/catalogue/bad-price/index.html"));
    assert_eq!(skipped[1].reason.kind(), "malformed_price");

    assert!(skipped[2].url.ends_with("/catalogue/gone/index.html"));
    assert_eq!(skipped[2].reason, SkipReason::Fetch("HTTP 404".to_string()));
}

#[tokio::test]
async fn test_card_without_link_is_skipped() {
    let mock_server = MockServer::start().await;

    let html = r#"<html><body><ol>
        <li><article class="product_pod"><h3>Untitled</h3></article></li>
        <li><article class="product_pod"><h3><a href="linked/index.html">Linked</a></h3></article></li>
    </ol></body></html>"#;
    mount_html(&mock_server, "/catalogue/page-1.html", html.to_string()).await;
    mount_html(
        &mock_server,
        "/catalogue/linked/index.html",
        detail_page("Linked", "Travel", "£9.99", "In stock", "Four"),
    )
    .await;

    let config = create_test_config(&mock_server.uri());
    let report = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.records().len(), 1);
    assert_eq!(report.records()[0].title(), "Linked");
    assert_eq!(report.skipped().len(), 1);
    assert_eq!(report.skipped()[0].reason, SkipReason::MissingLink);
    assert!(report.skipped()[0].url.ends_with("/catalogue/page-1.html"));
}

#[tokio::test]
async fn test_misdecoded_currency_symbol() {
    let mock_server = MockServer::start().await;

    mount_html(
        &mock_server,
        "/catalogue/page-1.html",
        listing_page(&["latin".to_string(), "utf8".to_string()], None),
    )
    .await;

    // UTF-8 bytes labelled as Latin-1 decode to "Â£51.77"
    let body = detail_page("Latin", "Poetry", "£51.77", "In stock", "One");
    Mock::given(method("GET"))
        .and(path("/catalogue/latin/index.html"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body.into_bytes(), "text/html; charset=iso-8859-1"),
        )
        .mount(&mock_server)
        .await;
    mount_html(
        &mock_server,
        "/catalogue/utf8/index.html",
        detail_page("Utf8", "Poetry", "£51.77", "In stock", "One"),
    )
    .await;

    let config = create_test_config(&mock_server.uri());
    let report = run_crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.records().len(), 2);
    assert_eq!(report.records()[0].price(), report.records()[1].price());
    assert_eq!(
        report.records()[0].price(),
        Decimal::from_str("51.77").unwrap()
    );
}

#[tokio::test]
async fn test_next_link_loop_stops_traversal() {
    let mock_server = MockServer::start().await;

    // Page 2 links "next" back to page 1
    Mock::given(method("GET"))
        .and(path("/catalogue/page-1.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_page(&["first".to_string()], Some("page-2.html"))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/catalogue/page-2.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_page(&["second".to_string()], Some("page-1.html"))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    for slug in ["first", "second"] {
        mount_html(
            &mock_server,
            &format!("/catalogue/{}/index.html", slug),
            detail_page(slug, "Poetry", "£3.00", "In stock", "Two"),
        )
        .await;
    }

    let config = create_test_config(&mock_server.uri());
    let report = run_crawl(&config).await.expect("Crawl failed");

    let titles: Vec<&str> = report.records().iter().map(|r| r.title()).collect();
    assert_eq!(titles, vec!["first", "second"]);
    assert_eq!(report.pages_visited, 2);
    match &report.outcome {
        CrawlOutcome::Aborted { page, url, .. } => {
            assert_eq!(*page, 3);
            assert!(url.ends_with("/catalogue/page-1.html"));
        }
        other => panic!("Expected aborted crawl, got {:?}", other),
    }
}

#[tokio::test]
async fn test_first_page_failure_yields_no_records() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/catalogue/page-1.html"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let report = run_crawl(&config).await.expect("Crawl failed");

    assert!(report.records().is_empty());
    assert_eq!(report.pages_visited, 0);
    assert!(matches!(
        report.outcome,
        CrawlOutcome::Aborted { page: 1, .. }
    ));
}

#[tokio::test]
async fn test_empty_catalogue_completes() {
    let mock_server = MockServer::start().await;
    mount_catalogue(&mock_server, &[0]).await;

    let config = create_test_config(&mock_server.uri());
    let report = run_crawl(&config).await.expect("Crawl failed");

    // Zero records from a finished traversal, as opposed to an aborted one
    assert!(report.records().is_empty());
    assert_eq!(report.outcome, CrawlOutcome::Completed);
    assert_eq!(report.pages_visited, 1);
}

#[tokio::test]
async fn test_crawl_catalogue_returns_records() {
    let mock_server = MockServer::start().await;
    mount_catalogue(&mock_server, &[2, 2]).await;

    // Root without a trailing slash still resolves links beneath it
    let root = Url::parse(&format!("{}/catalogue", mock_server.uri())).unwrap();
    let records = crawl_catalogue(&root).await.expect("Crawl failed");

    assert_eq!(records.len(), 4);
    assert!(records.iter().all(|r| r.rating() == 3));
}

#[tokio::test]
async fn test_step_by_step_traversal() {
    let mock_server = MockServer::start().await;
    mount_catalogue(&mock_server, &[1, 1]).await;

    let config = create_test_config(&mock_server.uri());
    let mut crawler = Crawler::new(&config).expect("Failed to create crawler");

    let mut steps = 0;
    while crawler.step().await.expect("Invalid transition") {
        steps += 1;
    }

    // Per page: fetch listing, process one card, finish page
    assert_eq!(steps, 6);
    assert_eq!(crawler.state().records().len(), 2);
    assert_eq!(crawler.state().page(), 2);
    assert!(crawler.state().phase().is_terminal());
}
