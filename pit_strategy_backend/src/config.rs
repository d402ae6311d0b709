use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    /// Optional JSON file replacing the built-in reference tables.
    pub reference_path: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            reference_path: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // Malformed values fall back to defaults, same as an unset variable.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: get("BIND_ADDR")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.bind_addr),
            port: get("PORT").and_then(|s| s.parse().ok()).unwrap_or(defaults.port),
            reference_path: get("REFERENCE_PATH").filter(|s| !s.trim().is_empty()),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn cfg(vars: &[(&str, &str)]) -> ServerConfig {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ServerConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let c = cfg(&[]);
        assert_eq!(c.socket_addr().to_string(), "0.0.0.0:8080");
        assert!(c.reference_path.is_none());
    }

    #[test]
    fn reads_overrides_and_ignores_garbage() {
        let c = cfg(&[("PORT", "9100"), ("BIND_ADDR", "127.0.0.1"), ("REFERENCE_PATH", "tracks/reference.json")]);
        assert_eq!(c.socket_addr().to_string(), "127.0.0.1:9100");
        assert_eq!(c.reference_path.as_deref(), Some("tracks/reference.json"));

        let c = cfg(&[("PORT", "not-a-port"), ("REFERENCE_PATH", "  ")]);
        assert_eq!(c.port, 8080);
        assert!(c.reference_path.is_none());
    }
}
