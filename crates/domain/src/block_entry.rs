use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// One `<ip> <domain>` directive inside the managed block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockEntry {
    pub ip: IpAddr,
    pub domain: Arc<str>,
}

impl BlockEntry {
    pub fn new(ip: IpAddr, domain: impl Into<Arc<str>>) -> Self {
        Self {
            ip,
            domain: domain.into(),
        }
    }

    /// Parses a hosts line of the shape `<ip> <domain>`. Anything else,
    /// including trailing tokens, yields `None`.
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let ip = parts.next()?.parse::<IpAddr>().ok()?;
        let domain = parts.next()?;
        if parts.next().is_some() || Self::validate_domain(domain).is_err() {
            return None;
        }
        Some(Self::new(ip, domain))
    }

    pub fn validate_domain(domain: &str) -> Result<(), String> {
        if domain.is_empty() {
            return Err("Domain cannot be empty".to_string());
        }
        if domain.len() > MAX_DOMAIN_LEN {
            return Err(format!(
                "Domain cannot exceed {} characters",
                MAX_DOMAIN_LEN
            ));
        }
        if domain.chars().any(char::is_whitespace) {
            return Err("Domain cannot contain whitespace".to_string());
        }
        let valid = domain
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.');
        if !valid {
            return Err(
                "Domain contains invalid characters (only lowercase letters, digits, hyphens and dots are allowed)".to_string(),
            );
        }
        for label in domain.split('.') {
            if label.is_empty() {
                return Err("Domain contains an empty label".to_string());
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(format!(
                    "Domain label cannot exceed {} characters",
                    MAX_LABEL_LEN
                ));
            }
            if label.starts_with('-') || label.ends_with('-') {
                return Err("Domain label cannot start or end with a hyphen".to_string());
            }
        }
        Ok(())
    }

    pub fn validate_address(address: &str) -> Result<IpAddr, String> {
        address
            .trim()
            .parse::<IpAddr>()
            .map_err(|_| format!("'{}' is not an IP literal", address))
    }
}

impl fmt::Display for BlockEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ip, self.domain)
    }
}
