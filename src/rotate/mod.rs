//! Identity and proxy rotation
//!
//! Round-robin pools used to vary the outbound request fingerprint between
//! fetch attempts. Both rotators share the same contract: a fixed ordered
//! list plus a cursor that advances exactly once per call and wraps at the
//! end. An empty pool never fails; it yields a fixed default instead
//! (constant identity / direct connection).

use serde::Deserialize;

/// User agent sent when no identity pool is configured
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:124.0) Gecko/20100101 Firefox/124.0";

/// Cycles through a pool of user-agent strings
#[derive(Debug, Clone)]
pub struct IdentityRotator {
    agents: Vec<String>,
    cursor: usize,
}

impl IdentityRotator {
    /// Creates a rotator over the given user-agent pool
    pub fn new(agents: Vec<String>) -> Self {
        if agents.is_empty() {
            tracing::info!("IdentityRotator initialized with no agents (constant identity)");
        } else {
            tracing::info!("IdentityRotator initialized with {} agents", agents.len());
        }
        Self { agents, cursor: 0 }
    }

    /// Returns the next user-agent string, advancing the cursor once
    pub fn next_identity(&mut self) -> &str {
        if self.agents.is_empty() {
            return DEFAULT_USER_AGENT;
        }
        let agent = &self.agents[self.cursor];
        self.cursor = (self.cursor + 1) % self.agents.len();
        agent
    }
}

/// Scheme-specific proxy endpoints for one upstream proxy
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProxyConfig {
    /// Proxy endpoint for plain HTTP requests
    pub http: String,

    /// Proxy endpoint for HTTPS requests
    pub https: String,
}

/// Cycles through a pool of proxy configurations
///
/// An empty pool means direct connection: [`ProxyRotator::next_proxy`]
/// returns `None` on every call.
#[derive(Debug, Clone)]
pub struct ProxyRotator {
    proxies: Vec<ProxyConfig>,
    cursor: usize,
}

impl ProxyRotator {
    /// Creates a rotator over the given proxy pool
    pub fn new(proxies: Vec<ProxyConfig>) -> Self {
        if proxies.is_empty() {
            tracing::info!("ProxyRotator initialized with no proxies (direct connection)");
        } else {
            tracing::info!("ProxyRotator initialized with {} proxies", proxies.len());
        }
        Self { proxies, cursor: 0 }
    }

    /// Builds a rotator from plain endpoint strings, using each endpoint
    /// for both HTTP and HTTPS traffic
    pub fn from_endpoints(endpoints: &[String]) -> Self {
        let proxies = endpoints
            .iter()
            .map(|e| e.trim())
            .filter(|e| !e.is_empty())
            .map(|e| ProxyConfig {
                http: e.to_string(),
                https: e.to_string(),
            })
            .collect();
        Self::new(proxies)
    }

    /// Returns the next proxy configuration, or `None` for direct connection
    pub fn next_proxy(&mut self) -> Option<&ProxyConfig> {
        if self.proxies.is_empty() {
            return None;
        }
        let proxy = &self.proxies[self.cursor];
        self.cursor = (self.cursor + 1) % self.proxies.len();
        Some(proxy)
    }
}
