use clap::Parser;
use std::time::Duration;

use crate::config::Config;

/// Proxy that searches PubMed and returns article titles as JSON.
#[derive(Parser, Debug)]
#[command(name = "papers", version, about)]
pub struct Cli {
    /// Address to bind (overrides PAPERS_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides PAPERS_PORT)
    #[arg(long, short)]
    pub port: Option<u16>,

    /// E-utilities base URL (overrides EUTILS_BASE_URL)
    #[arg(long)]
    pub eutils_base_url: Option<String>,

    /// Timeout for each PubMed request, in seconds (overrides EUTILS_TIMEOUT_SECS)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl Cli {
    pub fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(base_url) = self.eutils_base_url {
            config.eutils_base_url = base_url;
        }
        if let Some(secs) = self.timeout_secs {
            config.eutils_timeout = Duration::from_secs(secs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 3000,
            eutils_base_url: "https://example.org".to_string(),
            eutils_timeout: Duration::from_secs(30),
            log_level: tracing::Level::INFO,
        }
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from(["papers", "--port", "8080", "--timeout-secs", "3"]).unwrap();
        let mut config = base_config();
        cli.apply(&mut config);
        assert_eq!(config.port, 8080);
        assert_eq!(config.eutils_timeout, Duration::from_secs(3));
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::try_parse_from(["papers"]).unwrap();
        let mut config = base_config();
        cli.apply(&mut config);
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.eutils_base_url, "https://example.org");
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Cli::try_parse_from(["papers", "--port", "99999"]).is_err());
    }
}
