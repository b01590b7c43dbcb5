use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::de::Error as _;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use super::{Reply, ThreadNode, ThreadSource};
use crate::error::FetchError;

pub const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
pub const API_BASE: &str = "https://oauth.reddit.com";
/// Refresh this long before the token actually expires.
const TOKEN_MARGIN: Duration = Duration::from_secs(60);
const DELETED_AUTHOR: &str = "[deleted]";

/// Script-app credentials for the password grant.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub request_interval: Duration,
    pub timeout: Duration,
    pub token_url: String,
    pub api_base: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions {
            request_interval: Duration::from_secs(1),
            timeout: Duration::from_secs(30),
            token_url: TOKEN_URL.to_string(),
            api_base: API_BASE.to_string(),
        }
    }
}

struct Token {
    access: String,
    expires_at: Instant,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Deserialize)]
struct ListingData {
    children: Vec<Child>,
}

#[derive(Deserialize)]
struct Child {
    kind: String,
    data: serde_json::Value,
}

#[derive(Deserialize)]
struct CommentData {
    author: Option<String>,
    #[serde(default)]
    body: String,
}

/// Blocking Reddit API client, one request at a time.
pub struct RedditClient {
    http: Client,
    credentials: Credentials,
    options: ClientOptions,
    token: Option<Token>,
    last_request: Option<Instant>,
}

impl RedditClient {
    /// Build the client and obtain a first token. Bad credentials fail here,
    /// before any record is touched.
    pub fn login(credentials: Credentials, options: ClientOptions) -> Result<Self> {
        let http = Client::builder()
            .user_agent(credentials.user_agent.clone())
            .timeout(options.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        let mut client = RedditClient {
            http,
            credentials,
            options,
            token: None,
            last_request: None,
        };
        client
            .refresh_token()
            .with_context(|| format!("Reddit login failed for {}", client.credentials.username))?;
        info!("Logged in to Reddit as {}", client.credentials.username);
        Ok(client)
    }

    fn throttle(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.options.request_interval {
                thread::sleep(self.options.request_interval - elapsed);
            }
        }
        self.last_request = Some(Instant::now());
    }

    fn refresh_token(&mut self) -> Result<(), FetchError> {
        self.throttle();
        let resp = self
            .http
            .post(&self.options.token_url)
            .basic_auth(&self.credentials.client_id, Some(&self.credentials.client_secret))
            .form(&[
                ("grant_type", "password"),
                ("username", self.credentials.username.as_str()),
                ("password", self.credentials.password.as_str()),
            ])
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::from_status(status.as_u16()));
        }

        // Reddit answers a bad password with 200 and an "error" field.
        let body: TokenResponse = serde_json::from_str(&resp.text()?)?;
        let access = match (body.access_token, body.error) {
            (Some(token), None) => token,
            (_, error) => {
                debug!("Token request rejected: {:?}", error);
                return Err(FetchError::AccessDenied);
            }
        };
        let lifetime = Duration::from_secs(body.expires_in.unwrap_or(3600));
        self.token = Some(Token {
            access,
            expires_at: Instant::now() + lifetime,
        });
        Ok(())
    }

    fn bearer(&mut self) -> Result<String, FetchError> {
        let stale = match &self.token {
            Some(t) => Instant::now() + TOKEN_MARGIN >= t.expires_at,
            None => true,
        };
        if stale {
            debug!("Refreshing Reddit token");
            self.refresh_token()?;
        }
        match &self.token {
            Some(t) => Ok(t.access.clone()),
            None => Err(FetchError::AccessDenied),
        }
    }
}

impl ThreadSource for RedditClient {
    fn fetch_top_level_replies(&mut self, thread_url: &str) -> Result<Vec<ThreadNode>, FetchError> {
        let id = thread_id_from_url(thread_url)
            .ok_or_else(|| FetchError::InvalidThreadUrl(thread_url.to_string()))?;
        let token = self.bearer()?;

        self.throttle();
        let resp = self
            .http
            .get(format!("{}/comments/{}", self.options.api_base.trim_end_matches('/'), id))
            .query(&[("raw_json", "1")])
            .bearer_auth(token)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::from_status(status.as_u16()));
        }
        parse_thread(&resp.text()?)
    }
}

/// The base36 id that follows `comments` in a thread path.
pub fn thread_id_from_url(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    let mut segments = url.path_segments()?;
    segments.find(|s| *s == "comments")?;
    let id = segments.next()?;
    if !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(id.to_string())
    } else {
        None
    }
}

/// Turn a `/comments/{id}` response into top-level nodes. The response is
/// `[submission listing, comment listing]`; only the second is read.
pub fn parse_thread(body: &str) -> Result<Vec<ThreadNode>, FetchError> {
    let listings: Vec<Listing> = serde_json::from_str(body)?;
    let comments = listings
        .into_iter()
        .nth(1)
        .ok_or_else(|| serde_json::Error::custom("no comment listing"))?;

    let mut nodes = Vec::new();
    for child in comments.data.children {
        match child.kind.as_str() {
            "t1" => {
                let data: CommentData = serde_json::from_value(child.data)?;
                let author = data.author.filter(|a| a != DELETED_AUTHOR);
                nodes.push(ThreadNode::Reply(Reply {
                    author,
                    body: data.body,
                }));
            }
            "more" => nodes.push(ThreadNode::LoadMore),
            _ => {}
        }
    }
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::{candidates_by, select_comment};
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap()
    }

    fn credentials() -> Credentials {
        Credentials {
            client_id: "id".into(),
            client_secret: "secret".into(),
            username: "dram_taster".into(),
            password: "pw".into(),
            user_agent: "whisky_reddit_test".into(),
        }
    }

    fn local_options(server: &MockServer) -> ClientOptions {
        ClientOptions {
            request_interval: Duration::ZERO,
            timeout: Duration::from_secs(5),
            token_url: format!("{}/api/v1/access_token", server.uri()),
            api_base: server.uri(),
        }
    }

    /// Password grant with basic auth for "id:secret".
    fn token_endpoint() -> wiremock::MockBuilder {
        Mock::given(method("POST"))
            .and(path("/api/v1/access_token"))
            .and(header("authorization", "Basic aWQ6c2VjcmV0"))
            .and(body_string_contains("grant_type=password"))
    }

    fn thread_link(id: &str) -> String {
        format!("https://www.reddit.com/r/scotch/comments/{}/some_review/", id)
    }

    fn fixture() -> String {
        std::fs::read_to_string("tests/fixtures/thread.json").unwrap()
    }

    #[test]
    fn thread_id_from_full_link() {
        assert_eq!(
            thread_id_from_url("https://www.reddit.com/r/scotch/comments/1abcde/laphroaig_10_review/"),
            Some("1abcde".into())
        );
        assert_eq!(
            thread_id_from_url("https://www.reddit.com/comments/xyz12"),
            Some("xyz12".into())
        );
    }

    #[test]
    fn thread_id_missing() {
        assert_eq!(thread_id_from_url("https://www.reddit.com/r/scotch/"), None);
        assert_eq!(thread_id_from_url("https://www.reddit.com/r/scotch/comments/"), None);
        assert_eq!(thread_id_from_url("not a url"), None);
    }

    #[test]
    fn thread_fixture() {
        let body = std::fs::read_to_string("tests/fixtures/thread.json").unwrap();
        let nodes = parse_thread(&body).unwrap();
        assert_eq!(nodes.len(), 4);
        assert!(matches!(&nodes[0], ThreadNode::Reply(r)
            if r.author.as_deref() == Some("dram_taster") && r.body.starts_with("Nose")));
        assert!(matches!(&nodes[2], ThreadNode::Reply(r) if r.author.is_none()));
        assert!(matches!(nodes[3], ThreadNode::LoadMore));
    }

    #[test]
    fn fixture_feeds_selection() {
        let body = std::fs::read_to_string("tests/fixtures/thread.json").unwrap();
        let nodes = parse_thread(&body).unwrap();
        let picked = select_comment(candidates_by(nodes, "Dram_Taster"));
        assert!(picked.unwrap().contains("Finish: long"));
    }

    #[test]
    fn empty_comment_listing() {
        let body = r#"[{"kind":"Listing","data":{"children":[{"kind":"t3","data":{}}]}},
                       {"kind":"Listing","data":{"children":[]}}]"#;
        assert!(parse_thread(body).unwrap().is_empty());
    }

    #[test]
    fn malformed_bodies() {
        assert!(matches!(parse_thread("{}"), Err(FetchError::Malformed(_))));
        assert!(matches!(parse_thread("[]"), Err(FetchError::Malformed(_))));
        assert!(matches!(parse_thread("<html>"), Err(FetchError::Malformed(_))));
    }

    #[test]
    fn default_options_point_at_reddit() {
        let opts = ClientOptions::default();
        assert_eq!(opts.token_url, TOKEN_URL);
        assert_eq!(opts.api_base, API_BASE);
    }

    #[test]
    fn fetch_sends_bearer_and_raw_json() {
        let rt = runtime();
        let server = rt.block_on(MockServer::start());
        rt.block_on(async {
            token_endpoint()
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(json!({"access_token": "tok1", "expires_in": 3600})),
                )
                .expect(1)
                .mount(&server)
                .await;
            Mock::given(method("GET"))
                .and(path("/comments/abc12"))
                .and(query_param("raw_json", "1"))
                .and(header("authorization", "Bearer tok1"))
                .respond_with(ResponseTemplate::new(200).set_body_string(fixture()))
                .expect(2)
                .mount(&server)
                .await;
        });

        let mut client = RedditClient::login(credentials(), local_options(&server)).unwrap();
        let first = client.fetch_top_level_replies(&thread_link("abc12")).unwrap();
        assert_eq!(first.len(), 4);
        assert!(matches!(first[3], ThreadNode::LoadMore));
        // a fresh token is reused
        assert_eq!(client.fetch_top_level_replies(&thread_link("abc12")).unwrap().len(), 4);
        rt.block_on(server.verify());
    }

    #[test]
    fn token_error_field_is_access_denied() {
        let rt = runtime();
        let server = rt.block_on(MockServer::start());
        rt.block_on(
            token_endpoint()
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "invalid_grant"})))
                .mount(&server),
        );

        let err = RedditClient::login(credentials(), local_options(&server))
            .err()
            .expect("login should fail");
        assert!(matches!(err.downcast_ref::<FetchError>(), Some(FetchError::AccessDenied)));
        assert!(err.to_string().contains("dram_taster"));
    }

    #[test]
    fn token_status_is_mapped() {
        let rt = runtime();
        let server = rt.block_on(MockServer::start());
        rt.block_on(
            Mock::given(method("POST"))
                .and(path("/api/v1/access_token"))
                .respond_with(ResponseTemplate::new(401))
                .mount(&server),
        );

        let err = RedditClient::login(credentials(), local_options(&server))
            .err()
            .expect("login should fail");
        assert!(matches!(err.downcast_ref::<FetchError>(), Some(FetchError::AccessDenied)));
    }

    #[test]
    fn thread_statuses_map_to_fetch_errors() {
        let rt = runtime();
        let server = rt.block_on(MockServer::start());
        rt.block_on(async {
            token_endpoint()
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(json!({"access_token": "tok1", "expires_in": 3600})),
                )
                .mount(&server)
                .await;
            for (id, status) in [("gone1", 404u16), ("slow1", 429), ("priv1", 403), ("boom1", 500)] {
                Mock::given(method("GET"))
                    .and(path(format!("/comments/{}", id)))
                    .respond_with(ResponseTemplate::new(status))
                    .mount(&server)
                    .await;
            }
            Mock::given(method("GET"))
                .and(path("/comments/html1"))
                .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
                .mount(&server)
                .await;
        });

        let mut client = RedditClient::login(credentials(), local_options(&server)).unwrap();
        let mut fetch = |id: &str| client.fetch_top_level_replies(&thread_link(id));
        assert!(matches!(fetch("gone1"), Err(FetchError::NotFound)));
        assert!(matches!(fetch("slow1"), Err(FetchError::RateLimited)));
        assert!(matches!(fetch("priv1"), Err(FetchError::AccessDenied)));
        assert!(matches!(fetch("boom1"), Err(FetchError::Http(500))));
        assert!(matches!(fetch("html1"), Err(FetchError::Malformed(_))));

        assert!(matches!(
            client.fetch_top_level_replies("https://www.reddit.com/r/scotch/"),
            Err(FetchError::InvalidThreadUrl(_))
        ));
    }

    #[test]
    fn expiring_token_is_refreshed_before_fetch() {
        let rt = runtime();
        let server = rt.block_on(MockServer::start());
        rt.block_on(async {
            // first grant is already inside the refresh margin
            token_endpoint()
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(json!({"access_token": "old", "expires_in": 30})),
                )
                .up_to_n_times(1)
                .expect(1)
                .mount(&server)
                .await;
            token_endpoint()
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(json!({"access_token": "new", "expires_in": 3600})),
                )
                .expect(1)
                .mount(&server)
                .await;
            Mock::given(method("GET"))
                .and(path("/comments/abc12"))
                .and(header("authorization", "Bearer new"))
                .respond_with(ResponseTemplate::new(200).set_body_string(fixture()))
                .expect(2)
                .mount(&server)
                .await;
        });

        let mut client = RedditClient::login(credentials(), local_options(&server)).unwrap();
        assert!(client.fetch_top_level_replies(&thread_link("abc12")).is_ok());
        assert!(client.fetch_top_level_replies(&thread_link("abc12")).is_ok());
        rt.block_on(server.verify());
    }
}
