//! eAPI (JSON-RPC over HTTP/HTTPS) connection.
//!
//! Every call to [`Connection::execute`] is one `runCmds` request. The device
//! runs the commands in order and stops at the first one it rejects, so the
//! batch is accepted as a whole or reported as [`ConnectionError::CommandRejected`].

use std::net::Ipv6Addr;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use url::Url;

use super::{Command, Connection, ConnectionError, ConnectionResult};

// ============================================================================
// Constants
// ============================================================================

/// Default eAPI HTTPS port
pub const EAPI_DEFAULT_HTTPS_PORT: u16 = 443;

/// Default eAPI HTTP port
pub const EAPI_DEFAULT_HTTP_PORT: u16 = 80;

/// Default timeout for eAPI requests (seconds)
pub const EAPI_DEFAULT_TIMEOUT: u64 = 30;

const EAPI_PATH: &str = "/command-api";

// ============================================================================
// Transport Types
// ============================================================================

/// Wire transport for eAPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EapiTransport {
    /// Plain HTTP
    Http,
    /// HTTP over TLS (default)
    #[default]
    Https,
}

impl EapiTransport {
    /// Port used when none is configured.
    pub fn default_port(self) -> u16 {
        match self {
            EapiTransport::Http => EAPI_DEFAULT_HTTP_PORT,
            EapiTransport::Https => EAPI_DEFAULT_HTTPS_PORT,
        }
    }

    fn scheme(self) -> &'static str {
        match self {
            EapiTransport::Http => "http",
            EapiTransport::Https => "https",
        }
    }
}

impl std::fmt::Display for EapiTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.scheme())
    }
}

impl std::str::FromStr for EapiTransport {
    type Err = ConnectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" => Ok(EapiTransport::Http),
            "https" | "eapi" => Ok(EapiTransport::Https),
            _ => Err(ConnectionError::InvalidConfig(format!(
                "Invalid transport '{}'. Valid options: http, https",
                s
            ))),
        }
    }
}

// ============================================================================
// eAPI Wire Types
// ============================================================================

/// eAPI JSON-RPC request format
#[derive(Debug, Serialize)]
struct EapiRequest<'a> {
    jsonrpc: &'static str,
    method: &'static str,
    params: EapiParams<'a>,
    id: String,
}

#[derive(Debug, Serialize)]
struct EapiParams<'a> {
    version: u32,
    cmds: &'a [Command],
    format: &'static str,
}

/// eAPI JSON-RPC response format
#[derive(Debug, Deserialize)]
struct EapiResponse {
    #[serde(default)]
    result: Option<Vec<EapiResult>>,
    #[serde(default)]
    error: Option<EapiError>,
}

#[derive(Debug, Deserialize)]
struct EapiResult {
    #[serde(default)]
    output: String,
}

#[derive(Debug, Deserialize)]
struct EapiError {
    code: i64,
    message: String,
    #[serde(default)]
    data: Vec<EapiErrorData>,
}

#[derive(Debug, Default, Deserialize)]
struct EapiErrorData {
    #[serde(default)]
    errors: Vec<String>,
}

impl EapiResponse {
    fn into_outputs(self, expected: usize) -> ConnectionResult<Vec<String>> {
        if let Some(error) = self.error {
            return Err(ConnectionError::CommandRejected {
                code: error.code,
                message: error.message,
                errors: error.data.into_iter().flat_map(|d| d.errors).collect(),
            });
        }

        let results = self.result.ok_or_else(|| {
            ConnectionError::InvalidResponse("eAPI returned neither result nor error".to_string())
        })?;

        if results.len() != expected {
            return Err(ConnectionError::InvalidResponse(format!(
                "expected {} results, got {}",
                expected,
                results.len()
            )));
        }

        Ok(results.into_iter().map(|r| r.output).collect())
    }
}

// ============================================================================
// Connection
// ============================================================================

/// Builder for [`EapiConnection`].
#[derive(Debug, Clone)]
pub struct EapiConnectionBuilder {
    host: String,
    port: Option<u16>,
    transport: EapiTransport,
    username: String,
    password: String,
    timeout: u64,
    validate_certs: bool,
}

impl EapiConnectionBuilder {
    /// Start a builder for `host`.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: None,
            transport: EapiTransport::default(),
            username: "admin".to_string(),
            password: String::new(),
            timeout: EAPI_DEFAULT_TIMEOUT,
            validate_certs: true,
        }
    }

    /// Override the port (defaults to the transport's well-known port).
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Select HTTP or HTTPS.
    pub fn transport(mut self, transport: EapiTransport) -> Self {
        self.transport = transport;
        self
    }

    /// Basic-auth credentials.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Per-request timeout in seconds.
    pub fn timeout(mut self, secs: u64) -> Self {
        self.timeout = secs;
        self
    }

    /// Whether to validate the device's TLS certificate.
    pub fn validate_certs(mut self, validate: bool) -> Self {
        self.validate_certs = validate;
        self
    }

    /// Endpoint URL for the configured host, port and transport.
    pub fn endpoint(&self) -> ConnectionResult<Url> {
        if self.host.trim().is_empty() {
            return Err(ConnectionError::InvalidConfig(
                "eAPI host must not be empty".to_string(),
            ));
        }

        // IPv6 literals need brackets inside a URL authority.
        let host = match self.host.parse::<Ipv6Addr>() {
            Ok(addr) => format!("[{}]", addr),
            Err(_) => self.host.clone(),
        };
        let port = self.port.unwrap_or_else(|| self.transport.default_port());
        let raw = format!(
            "{}://{}:{}{}",
            self.transport.scheme(),
            host,
            port,
            EAPI_PATH
        );
        Url::parse(&raw).map_err(|e| {
            ConnectionError::InvalidConfig(format!("Invalid eAPI endpoint '{}': {}", raw, e))
        })
    }

    /// Build the connection. No network traffic happens here.
    pub fn build(self) -> ConnectionResult<EapiConnection> {
        let url = self.endpoint()?;

        let builder = Client::builder().timeout(Duration::from_secs(self.timeout));
        let builder = if self.transport == EapiTransport::Https && !self.validate_certs {
            builder.danger_accept_invalid_certs(true)
        } else {
            builder
        };

        let client = builder.build().map_err(|e| {
            ConnectionError::InvalidConfig(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(EapiConnection {
            client,
            url,
            username: self.username,
            password: self.password,
            timeout: self.timeout,
        })
    }
}

/// Blocking eAPI connection to one device.
pub struct EapiConnection {
    client: Client,
    url: Url,
    username: String,
    password: String,
    timeout: u64,
}

impl EapiConnection {
    /// Start building a connection to `host`.
    pub fn builder(host: impl Into<String>) -> EapiConnectionBuilder {
        EapiConnectionBuilder::new(host)
    }

    /// The `/command-api` endpoint this connection posts to.
    pub fn url(&self) -> &Url {
        &self.url
    }

    fn map_send_error(&self, err: reqwest::Error) -> ConnectionError {
        if err.is_timeout() {
            ConnectionError::Timeout(self.timeout)
        } else {
            ConnectionError::ConnectionFailed(format!("eAPI request to {} failed: {}", self.url, err))
        }
    }
}

impl std::fmt::Debug for EapiConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EapiConnection")
            .field("url", &self.url.as_str())
            .field("username", &self.username)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Connection for EapiConnection {
    fn execute(&self, commands: &[Command]) -> ConnectionResult<Vec<String>> {
        let request = EapiRequest {
            jsonrpc: "2.0",
            method: "runCmds",
            params: EapiParams {
                version: 1,
                cmds: commands,
                format: "text",
            },
            id: uuid::Uuid::new_v4().to_string(),
        };

        debug!(url = %self.url, count = commands.len(), id = %request.id, "Sending eAPI request");

        let response = self
            .client
            .post(self.url.clone())
            .basic_auth(&self.username, Some(&self.password))
            .json(&request)
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ConnectionError::AuthenticationFailed(format!(
                "eAPI rejected credentials for user '{}'",
                self.username
            )));
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ConnectionError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body: EapiResponse = response.json().map_err(|e| {
            ConnectionError::InvalidResponse(format!("Failed to parse eAPI response: {}", e))
        })?;

        let outputs = body.into_outputs(commands.len())?;
        trace!(outputs = ?outputs, "eAPI response");
        Ok(outputs)
    }
}
