//! Integration tests for the GitHub page source and full runs against it.
//!
//! A wiremock server stands in for the REST API, so these tests exercise
//! real HTTP, real `Link` headers and the real status-code mapping.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use quarterlog::changelog::{self, LinkStyle};
use quarterlog::core::window::{Quarter, Window};
use quarterlog::forge::github::GitHubForge;
use quarterlog::forge::{ForgeError, PageSource, PaginationStop, RepoEndpoints};

const TOKEN: &str = "tok";

fn q2_2024() -> Window {
    Quarter::new(2024, 2).unwrap().window().unwrap()
}

fn endpoints(server: &MockServer) -> RepoEndpoints {
    RepoEndpoints::new(server.uri(), "o/r".parse().unwrap())
}

fn pr(number: u64, title: &str, sha: &str, merged_at: Option<&str>) -> serde_json::Value {
    json!({
        "number": number,
        "title": title,
        "html_url": format!("https://github.com/o/r/pull/{}", number),
        "merge_commit_sha": sha,
        "merged_at": merged_at,
    })
}

fn commit(sha: &str, message: &str, date: &str) -> serde_json::Value {
    json!({
        "sha": sha,
        "html_url": format!("https://github.com/o/r/commit/{}", sha),
        "commit": {"message": message, "committer": {"date": date}},
    })
}

/// A quarter with two pages of pull requests, three commits in the window,
/// one of which is a collected merge commit and one of which belongs to a
/// pull request merged elsewhere.
async fn mount_quarter(server: &MockServer) {
    let page_two = format!("{}/repositories/7/pulls?state=closed&page=2", server.uri());
    let link = format!(
        "<{page_two}>; rel=\"next\", <{page_two}>; rel=\"last\"",
        page_two = page_two
    );

    Mock::given(method("GET"))
        .and(path("/repos/o/r/pulls"))
        .and(query_param("state", "closed"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", link.as_str())
                .set_body_json(json!([
                    pr(3, "Fix crash on empty input", "cccc333", Some("2024-06-30T23:00:00Z")),
                    pr(2, "Abandoned idea", "bbbb222", None),
                ])),
        )
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repositories/7/pulls"))
        .and(query_param("page", "2"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            pr(1, "Add importer", "aaaa111", Some("2024-04-05T12:00:00Z")),
            pr(4, "Next quarter work", "dddd444", Some("2024-07-02T00:00:00Z")),
        ])))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/commits"))
        .and(query_param("since", "2024-04-01T00:00:00Z"))
        .and(query_param("until", "2024-07-01T00:00:00Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            commit("aaaa111", "Add importer (#1)", "2024-04-05T12:00:00Z"),
            commit("c0ffee1234", "Tidy docs\n\nLonger body text", "2024-05-10T08:30:00Z"),
            commit("feed123456", "Part of a release branch", "2024-05-20T00:00:00Z"),
        ])))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/commits/c0ffee1234/pulls"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/commits/feed123456/pulls"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"number": 9}])))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/commits/aaaa111/pulls"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(server)
        .await;
}

const EXPECTED: &str = "\
- Add importer ([#1](https://github.com/o/r/pull/1))

- Tidy docs ([commit c0ffee1](https://github.com/o/r/commit/c0ffee1234))

- Fix crash on empty input ([#3](https://github.com/o/r/pull/3))

";

mod page_source {
    use super::*;

    #[tokio::test]
    async fn sends_github_headers_and_returns_link() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/o/r/pulls"))
            .and(header("authorization", "Bearer tok"))
            .and(header("accept", "application/vnd.github+json"))
            .and(header("user-agent", "quarterlog-test"))
            .and(header("x-github-api-version", "2022-11-28"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Link", "<https://next.test/p2>; rel=\"next\"")
                    .set_body_string("[]"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let forge = GitHubForge::new(Some(TOKEN.into())).with_user_agent("quarterlog-test");
        let page = forge
            .get_page(&format!("{}/repos/o/r/pulls", server.uri()))
            .await
            .unwrap();

        assert_eq!(page.body, b"[]");
        assert_eq!(
            page.link.as_deref(),
            Some("<https://next.test/p2>; rel=\"next\"")
        );
    }

    #[tokio::test]
    async fn anonymous_requests_carry_no_authorization() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/x"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;

        let forge = GitHubForge::new(None);
        forge.get_page(&format!("{}/x", server.uri())).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn status_codes_map_to_errors() {
        let server = MockServer::start().await;
        Mock::given(path("/unauthorized"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(path("/exhausted"))
            .respond_with(
                ResponseTemplate::new(403)
                    .insert_header("X-RateLimit-Remaining", "0")
                    .set_body_json(json!({"message": "API rate limit exceeded"})),
            )
            .mount(&server)
            .await;
        Mock::given(path("/forbidden"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({"message": "Resource not accessible"})),
            )
            .mount(&server)
            .await;
        Mock::given(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
            .mount(&server)
            .await;
        Mock::given(path("/slow-down"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;
        Mock::given(path("/broken"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let forge = GitHubForge::new(None);
        let get = |p: &str| {
            let url = format!("{}{}", server.uri(), p);
            let forge = forge.clone();
            async move { forge.get_page(&url).await.unwrap_err() }
        };

        assert!(matches!(get("/unauthorized").await, ForgeError::AuthFailed(_)));
        assert!(matches!(get("/exhausted").await, ForgeError::RateLimited));
        match get("/forbidden").await {
            ForgeError::AuthFailed(msg) => assert!(msg.contains("Resource not accessible")),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(matches!(get("/missing").await, ForgeError::NotFound(_)));
        assert!(matches!(get("/slow-down").await, ForgeError::RateLimited));
        assert!(matches!(
            get("/broken").await,
            ForgeError::ApiError { status: 502, .. }
        ));
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let server = MockServer::start().await;
        let url = format!("{}/gone", server.uri());
        drop(server);

        let err = GitHubForge::new(None).get_page(&url).await.unwrap_err();
        assert!(matches!(err, ForgeError::NetworkError(_)));
    }
}

mod full_run {
    use super::*;

    #[tokio::test]
    async fn follows_pages_and_dedupes_commits() {
        let server = MockServer::start().await;
        mount_quarter(&server).await;

        let forge = GitHubForge::new(Some(TOKEN.into()));
        let report = changelog::generate(&forge, &endpoints(&server), &q2_2024(), LinkStyle::Plain)
            .await
            .unwrap();

        assert_eq!(report.render(), EXPECTED);
        assert_eq!(report.pull_request_entries, 2);
        assert_eq!(report.commit_entries, 1);
        assert_eq!(report.commits_with_pulls, 1);

        // Both listings ended on a page without a next link.
        assert_eq!(report.diagnostics.len(), 2);
        assert!(report
            .diagnostics
            .iter()
            .all(|d| matches!(d.reason, PaginationStop::NoNextLink { .. })));
    }

    #[tokio::test]
    async fn small_links_wrap_reference_group() {
        let server = MockServer::start().await;
        mount_quarter(&server).await;

        let forge = GitHubForge::new(Some(TOKEN.into()));
        let report = changelog::generate(&forge, &endpoints(&server), &q2_2024(), LinkStyle::Small)
            .await
            .unwrap();

        assert!(report
            .render()
            .starts_with("- Add importer <small>([#1](https://github.com/o/r/pull/1))</small>\n\n"));
    }

    #[tokio::test]
    async fn server_error_on_commit_listing_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(path("/repos/o/r/pulls"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(path("/repos/o/r/commits"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let forge = GitHubForge::new(None);
        let err = changelog::generate(&forge, &endpoints(&server), &q2_2024(), LinkStyle::Plain)
            .await
            .unwrap_err();
        assert!(matches!(err, ForgeError::ApiError { status: 500, .. }));
    }

    #[tokio::test]
    async fn undecodable_page_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(path("/repos/o/r/pulls"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let forge = GitHubForge::new(None);
        let err = changelog::generate(&forge, &endpoints(&server), &q2_2024(), LinkStyle::Plain)
            .await
            .unwrap_err();
        assert!(matches!(err, ForgeError::Decode { .. }));
    }
}

mod cli {
    use super::*;
    use assert_cmd::Command;
    use predicates::prelude::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn workspace(api_base: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("global.toml"), "").unwrap();
        std::fs::write(
            dir.path().join("quarterlog.toml"),
            format!("repo = \"o/r\"\napi_base = \"{}\"\n", api_base),
        )
        .unwrap();
        std::fs::write(dir.path().join("access_token.txt"), format!("{}\n", TOKEN)).unwrap();
        dir
    }

    fn quarterlog(dir: &Path) -> Command {
        let mut cmd = Command::cargo_bin("quarterlog").unwrap();
        cmd.env_remove("RUST_LOG")
            .arg("--cwd")
            .arg(dir)
            .arg("--config")
            .arg(dir.join("global.toml"));
        cmd
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn generate_writes_output_file() {
        let server = MockServer::start().await;
        mount_quarter(&server).await;
        let dir = workspace(&server.uri());
        let root = dir.path().to_path_buf();

        tokio::task::spawn_blocking(move || {
            quarterlog(&root)
                .args(["generate", "--quarter", "2024-Q2"])
                .assert()
                .success()
                .stdout(predicate::str::contains("Wrote 3 entries"));
        })
        .await
        .unwrap();

        let written = std::fs::read_to_string(dir.path().join("output.md")).unwrap();
        assert_eq!(written, EXPECTED);
        assert!(!dir.path().join("output.md.tmp").exists());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn generate_to_stdout() {
        let server = MockServer::start().await;
        mount_quarter(&server).await;
        let dir = workspace(&server.uri());
        let root = dir.path().to_path_buf();

        tokio::task::spawn_blocking(move || {
            quarterlog(&root)
                .args(["generate", "--quarter", "2024-Q2", "-o", "-"])
                .assert()
                .success()
                .stdout(EXPECTED);
        })
        .await
        .unwrap();

        assert!(!dir.path().join("output.md").exists());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn failed_run_leaves_no_output() {
        let server = MockServer::start().await;
        Mock::given(path("/repos/o/r/pulls"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let dir = workspace(&server.uri());
        std::fs::write(dir.path().join("output.md"), "previous run\n").unwrap();
        let root = dir.path().to_path_buf();

        tokio::task::spawn_blocking(move || {
            quarterlog(&root)
                .args(["generate", "--quarter", "2024-Q2"])
                .assert()
                .failure()
                .stderr(predicate::str::contains("failed to collect changes for o/r"))
                .stderr(predicate::str::contains("500"));
        })
        .await
        .unwrap();

        let kept = std::fs::read_to_string(dir.path().join("output.md")).unwrap();
        assert_eq!(kept, "previous run\n");
    }
}
