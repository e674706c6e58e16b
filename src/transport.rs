//! Outbound HTTP for the remote fetch effect.

use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::effect::BoxFuture;
use crate::error::FetchError;

/// HTTP method of a [`RequestDescriptor`](crate::RequestDescriptor).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
        }
    }
}

/// A fully interpolated request, ready for a [`Transport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    /// Relative target, e.g. `api/now/table/sys_user?sysparm_limit=10`.
    pub target: String,
}

/// Executes requests and decodes the JSON body.
///
/// Implementations resolve with the decoded body on a success status and with
/// a [`FetchError`] otherwise. They must not retry.
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> BoxFuture<Result<Value, FetchError>>;
}

/// Basic-auth credentials for the instance.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// [`Transport`] backed by `reqwest`, rooted at an instance URL.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
    credentials: Option<Credentials>,
}

impl ReqwestTransport {
    /// Create a transport rooted at `base_url`.
    ///
    /// A trailing slash is added when missing so that relative targets are
    /// joined under the full path rather than replacing its last segment.
    pub fn new(base_url: &str, credentials: Option<Credentials>) -> Result<Self, FetchError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            client: Client::new(),
            base_url,
            credentials,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for a relative request target.
    pub fn resolve(&self, target: &str) -> Result<Url, FetchError> {
        Ok(self.base_url.join(target.trim_start_matches('/'))?)
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> BoxFuture<Result<Value, FetchError>> {
        let client = self.client.clone();
        let credentials = self.credentials.clone();
        let url = self.resolve(&request.target);

        Box::pin(async move {
            let url = url?;
            tracing::debug!(method = request.method.as_str(), %url, "sending request");

            let mut builder = match request.method {
                Method::Get => client.get(url),
            };
            builder = builder.header(ACCEPT, "application/json");
            if let Some(credentials) = credentials {
                builder = builder.basic_auth(credentials.username, Some(credentials.password));
            }

            let response = builder.send().await?;
            let status = response.status();
            let body = response.text().await?;
            if !status.is_success() {
                return Err(FetchError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            Ok(serde_json::from_str(&body)?)
        })
    }
}
