use anyhow::Context;
use reqwest::RequestBuilder;
use url::Url;

/// Where the CLI talks to and with which credentials
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub token: Option<String>,
    pub http: reqwest::Client,
}

impl ClientConfig {
    pub fn new(base_url: &str, token: Option<String>) -> anyhow::Result<Self> {
        let mut base_url =
            Url::parse(base_url).with_context(|| format!("invalid server URL '{}'", base_url))?;

        // Url::join drops the last segment unless the base ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            token: token.filter(|t| !t.trim().is_empty()),
            http: reqwest::Client::new(),
        })
    }

    /// Resolve an API path (no leading slash) against the base URL
    pub fn endpoint(&self, path: &str) -> anyhow::Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .with_context(|| format!("invalid endpoint path '{}'", path))
    }

    /// Attach the bearer token, failing early when none is configured
    pub fn authorized(&self, request: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        let token = self
            .token
            .as_deref()
            .context("no token configured; pass --token or set TRACKR_TOKEN")?;
        Ok(request.bearer_auth(token))
    }
}
