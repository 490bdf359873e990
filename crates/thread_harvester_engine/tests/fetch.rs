use std::time::Duration;

use thread_harvester_engine::{
    FailureKind, FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_USER_AGENT,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> FetchSettings {
    FetchSettings {
        mirror_base_url: server.uri(),
        ..FetchSettings::default()
    }
}

#[test]
fn mirror_url_is_keyed_by_item_id() {
    let settings = FetchSettings::default();
    assert_eq!(
        settings.mirror_url("1700000000000000000"),
        "https://threadreaderapp.com/thread/1700000000000000000.html"
    );
    assert_eq!(settings.request_timeout, Duration::from_secs(30));

    let trailing = FetchSettings {
        mirror_base_url: "http://localhost:1234/".to_string(),
        ..FetchSettings::default()
    };
    assert_eq!(trailing.mirror_url("9"), "http://localhost:1234/thread/9.html");
}

#[tokio::test]
async fn fetcher_returns_decoded_body_with_browser_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/thread/42.html"))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html>ok</html>", "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(settings_for(&server));
    let output = fetcher.fetch_rendered_page("42").await.expect("fetch ok");

    assert_eq!(output.status, 200);
    assert_eq!(output.body, "<html>ok</html>");
    assert_eq!(
        output.metadata.request_url,
        format!("{}/thread/42.html", server.uri())
    );
    assert_eq!(output.metadata.final_url, output.metadata.request_url);
    assert_eq!(output.metadata.redirect_count, 0);
    assert_eq!(output.metadata.encoding_label, "UTF-8");
    assert!(output
        .metadata
        .content_type
        .unwrap()
        .starts_with("text/html"));
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/thread/404.html"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(settings_for(&server));
    let err = fetcher.fetch_rendered_page("404").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn fetcher_treats_non_200_success_as_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(settings_for(&server));
    let err = fetcher.fetch_rendered_page("5").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(204));
}

#[tokio::test]
async fn fetcher_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("slow"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let fetcher = ReqwestFetcher::new(settings);
    let err = fetcher.fetch_rendered_page("2").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetcher_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/html")
                .set_body_string("01234567890"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..settings_for(&server)
    };
    let fetcher = ReqwestFetcher::new(settings);
    let err = fetcher.fetch_rendered_page("3").await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

#[tokio::test]
async fn fetcher_rejects_non_html_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(settings_for(&server));
    let err = fetcher.fetch_rendered_page("4").await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::UnsupportedContentType {
            content_type: "application/json".to_string()
        }
    );
}

#[tokio::test]
async fn unreachable_mirror_is_a_network_failure() {
    // Bind then drop a server so the port is closed.
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };
    let settings = FetchSettings {
        mirror_base_url: uri,
        connect_timeout: Duration::from_secs(2),
        ..FetchSettings::default()
    };
    let fetcher = ReqwestFetcher::new(settings);
    let err = fetcher.fetch_rendered_page("1").await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::Network | FailureKind::Timeout));
}

fn redirect_to(server: &MockServer, to: &str) -> ResponseTemplate {
    ResponseTemplate::new(302).insert_header("location", format!("{}{to}", server.uri()))
}

#[tokio::test]
async fn fetcher_follows_redirects_up_to_the_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/thread/7.html"))
        .respond_with(redirect_to(&server, "/hop1"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/hop1"))
        .respond_with(redirect_to(&server, "/final"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/final"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html>moved</html>", "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let settings = FetchSettings {
        redirect_limit: 2,
        ..settings_for(&server)
    };
    let output = ReqwestFetcher::new(settings)
        .fetch_rendered_page("7")
        .await
        .expect("two redirects are within a limit of two");

    assert_eq!(output.body, "<html>moved</html>");
    assert_eq!(output.metadata.redirect_count, 2);
    assert!(output.metadata.final_url.ends_with("/final"));
    assert!(output.metadata.request_url.ends_with("/thread/7.html"));
}

#[tokio::test]
async fn fetcher_stops_when_redirect_chain_exceeds_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/thread/1.html"))
        .respond_with(redirect_to(&server, "/hop1"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/hop1"))
        .respond_with(redirect_to(&server, "/hop2"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/hop2"))
        .respond_with(redirect_to(&server, "/hop3"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/hop3"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
        .expect(0)
        .mount(&server)
        .await;

    let settings = FetchSettings {
        redirect_limit: 2,
        ..settings_for(&server)
    };
    let err = ReqwestFetcher::new(settings)
        .fetch_rendered_page("1")
        .await
        .expect_err("third redirect must be refused");

    assert_eq!(err.kind, FailureKind::RedirectLimitExceeded);
}

#[tokio::test]
async fn fetcher_keeps_body_with_malformed_bytes() {
    let server = MockServer::start().await;
    let mut body = b"<html><body>caf".to_vec();
    body.push(0xff);
    body.extend_from_slice(b"</body></html>");
    Mock::given(method("GET"))
        .and(path("/thread/5.html"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8"))
        .mount(&server)
        .await;

    let output = ReqwestFetcher::new(settings_for(&server))
        .fetch_rendered_page("5")
        .await
        .expect("malformed bytes are replaced, not fatal");

    assert_eq!(output.body, "<html><body>caf\u{FFFD}</body></html>");
    assert_eq!(output.metadata.encoding_label, "UTF-8");
}
