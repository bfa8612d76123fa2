//! `vless://` share links.

use crate::document::VISION_FLOW;

/// Public endpoint clients connect to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEndpoint {
    pub host: String,
    pub port: u16,
}

impl ServerEndpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Share link for a client created with the vision flow over TLS/TCP.
    ///
    /// The email is placed in the fragment as-is.
    pub fn vless_link(&self, id: &str, email: &str) -> String {
        format!(
            "vless://{id}@{host}:{port}?encryption=none&flow={flow}&security=tls&type=tcp#{email}",
            host = self.host,
            port = self.port,
            flow = VISION_FLOW,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_format() {
        let endpoint = ServerEndpoint::new("203.0.113.9", 443);
        assert_eq!(
            endpoint.vless_link("0b6c1c2e-5a4e-4d2b-9a43-2f7c2b1e9d10", "a@example.com"),
            "vless://0b6c1c2e-5a4e-4d2b-9a43-2f7c2b1e9d10@203.0.113.9:443\
             ?encryption=none&flow=xtls-rprx-vision&security=tls&type=tcp#a@example.com"
        );
    }
}
