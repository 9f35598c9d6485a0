//! Single-page fetch behavior against a mock server

use crate::{create_fetcher, create_test_config, create_test_fetcher, page};
use encoding_rs::{Encoding, UTF_8};
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use title_finder::config::resolve_proxy;
use title_finder::crawler::{EncodingStrategy, FetchError, HttpTitleFetcher, Job, TitleFetcher};
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_title_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(page("Home"))
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher();
    let job = Job {
        position: 0,
        url: format!("{}/", mock_server.uri()),
    };

    let result = fetcher.fetch_title(&job).await;

    assert_eq!(result.position, 0);
    assert_eq!(result.url, job.url);
    assert_eq!(result.title(), Some("Home"));
}

#[tokio::test]
async fn test_missing_scheme_defaults_to_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page("Page")))
        .expect(2)
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher();
    let address = mock_server.address();

    let bare = fetcher.fetch(&format!("{}/page", address)).await;
    let explicit = fetcher.fetch(&format!("http://{}/page", address)).await;

    assert_eq!(bare, Ok("Page".to_string()));
    assert_eq!(bare, explicit);
}

#[tokio::test]
async fn test_not_found_reports_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string(page("Not Found")))
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher();
    let error = fetcher
        .fetch(&format!("{}/missing", mock_server.uri()))
        .await
        .unwrap_err();

    assert_eq!(error, FetchError::HttpStatus(StatusCode::NOT_FOUND));
    assert_eq!(error.to_string(), "HTTP error: 404 Not Found");
}

#[tokio::test]
async fn test_server_error_reports_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher();
    let error = fetcher.fetch(&mock_server.uri()).await.unwrap_err();

    assert_eq!(error.to_string(), "HTTP error: 503 Service Unavailable");
}

#[tokio::test]
async fn test_empty_title_is_no_title() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page("   ")))
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher();
    let error = fetcher.fetch(&mock_server.uri()).await.unwrap_err();

    assert_eq!(error, FetchError::NoTitle);
}

#[tokio::test]
async fn test_page_without_title_is_no_title() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body>No head here</body></html>"),
        )
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher();
    let error = fetcher.fetch(&mock_server.uri()).await.unwrap_err();

    assert_eq!(error.to_string(), "no title found");
}

#[tokio::test]
async fn test_redirect_is_followed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", "/new"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page("Moved Here")))
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher();
    let title = fetcher
        .fetch(&format!("{}/old", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(title, "Moved Here");
}

#[tokio::test]
async fn test_header_charset_is_honored() {
    let mock_server = MockServer::start().await;
    let html = page("Привет, мир");
    let (body, _, _) = encoding_rs::WINDOWS_1251.encode(&html);

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(body.into_owned(), "text/html; charset=windows-1251"),
        )
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher();
    let title = fetcher.fetch(&mock_server.uri()).await.unwrap();

    assert_eq!(title, "Привет, мир");
}

#[tokio::test]
async fn test_meta_charset_is_honored() {
    let mock_server = MockServer::start().await;
    let html = "<html><head><meta charset=\"windows-1251\"><title>Новости</title></head></html>";
    let (body, _, _) = encoding_rs::WINDOWS_1251.encode(html);

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body.into_owned())
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher();
    let title = fetcher.fetch(&mock_server.uri()).await.unwrap();

    assert_eq!(title, "Новости");
}

#[tokio::test]
async fn test_unknown_charset_falls_back_to_meta() {
    let mock_server = MockServer::start().await;
    let html = "<html><head><meta charset=\"windows-1251\"><title>Привет</title></head></html>";
    let (body, _, _) = encoding_rs::WINDOWS_1251.encode(html);

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(body.into_owned(), "text/html; charset=x-klingon"),
        )
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher();
    let title = fetcher.fetch(&mock_server.uri()).await.unwrap();

    assert_eq!(title, "Привет");
}

#[tokio::test]
async fn test_untranscodable_charset_is_encoding_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(page("Qapla").into_bytes(), "text/html; charset=iso-2022-kr"),
        )
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher();
    let error = fetcher.fetch(&mock_server.uri()).await.unwrap_err();

    assert!(matches!(error, FetchError::Encoding(_)));
    assert!(error.to_string().starts_with("failed to decode body: "));
}

/// Always answers with one encoding, whatever the response says
struct FixedEncoding(&'static Encoding);

impl EncodingStrategy for FixedEncoding {
    fn detect_encoding(
        &self,
        _headers: &HeaderMap,
        _body: &[u8],
    ) -> Result<&'static Encoding, FetchError> {
        Ok(self.0)
    }
}

#[tokio::test]
async fn test_custom_encoding_strategy_overrides_detection() {
    let mock_server = MockServer::start().await;

    // UTF-8 bytes labelled as windows-1251 in both the header and a meta tag
    let html = "<html><head><meta charset=\"windows-1251\"><title>Привет</title></head></html>";

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(html.as_bytes().to_vec(), "text/html; charset=windows-1251"),
        )
        .mount(&mock_server)
        .await;

    let sniffing = create_test_fetcher();
    let misread = sniffing.fetch(&mock_server.uri()).await.unwrap();
    assert_ne!(misread, "Привет");

    let fixed = create_test_fetcher().with_strategy(FixedEncoding(UTF_8));
    let title = fixed.fetch(&mock_server.uri()).await.unwrap();

    assert_eq!(title, "Привет");
}

#[tokio::test]
async fn test_browser_headers_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header_exists("user-agent"))
        .and(header_exists("accept-language"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page("Headers")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = create_test_fetcher();
    let title = fetcher.fetch(&mock_server.uri()).await.unwrap();

    assert_eq!(title, "Headers");
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(page("Too Late"))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(1);
    config.fetcher.request_timeout = 1;
    let fetcher = create_fetcher(&config.fetcher);

    let error = fetcher.fetch(&mock_server.uri()).await.unwrap_err();

    assert!(matches!(error, FetchError::Network(_)));
    assert!(error.to_string().starts_with("request failed: "));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Bind and release a port so nothing is listening on it
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let fetcher = create_test_fetcher();
    let error = fetcher
        .fetch(&format!("http://127.0.0.1:{}/", port))
        .await
        .unwrap_err();

    assert!(matches!(error, FetchError::Network(_)));
}

#[tokio::test]
async fn test_invalid_url_is_invalid_request() {
    let fetcher = create_test_fetcher();
    let error = fetcher.fetch("bad://url").await.unwrap_err();

    assert!(matches!(error, FetchError::InvalidRequest(_)));
    assert!(error.to_string().starts_with("failed to create request: "));
}

#[tokio::test]
async fn test_requests_go_through_configured_proxy() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page("Direct")))
        .expect(0)
        .mount(&mock_server)
        .await;

    // Nothing listens on the proxy port, so a proxied request must fail
    let proxy_port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let mut config = create_test_config(1);
    config.proxy = Some(format!("127.0.0.1:{}", proxy_port));
    let proxy = resolve_proxy(&config).unwrap();
    let fetcher = HttpTitleFetcher::new(&config.fetcher, proxy.as_ref()).unwrap();

    let error = fetcher.fetch(&mock_server.uri()).await.unwrap_err();

    assert!(matches!(error, FetchError::Network(_)));
}
