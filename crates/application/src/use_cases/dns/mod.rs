mod get_dns_status;
mod reset_dns;
mod set_dns;

pub use get_dns_status::GetDnsStatusUseCase;
pub use reset_dns::ResetDnsUseCase;
pub use set_dns::SetDnsUseCase;

use hostguard_domain::{DomainError, InterfaceFailure};
use tracing::{info, warn};

use crate::ports::DnsConfigPort;

/// The named interface, else the configured ones, else every active one.
fn target_interfaces(
    dns: &dyn DnsConfigPort,
    requested: Option<&str>,
    configured: &[String],
) -> Result<Vec<String>, DomainError> {
    if let Some(name) = requested {
        return Ok(vec![name.to_string()]);
    }
    if !configured.is_empty() {
        return Ok(configured.to_vec());
    }
    let active: Vec<String> = dns.interfaces()?.into_iter().map(|i| i.interface).collect();
    if active.is_empty() {
        return Err(DomainError::DnsConfig(
            "no active network interface found".to_string(),
        ));
    }
    Ok(active)
}

/// Runs `change` on every interface. Fails only when no interface could be
/// changed, with the first error so a permission problem keeps its kind.
fn change_each<F>(
    interfaces: Vec<String>,
    action: &str,
    change: F,
) -> Result<(Vec<String>, Vec<InterfaceFailure>), DomainError>
where
    F: Fn(&str) -> Result<(), DomainError>,
{
    let mut changed = Vec::new();
    let mut failed = Vec::new();
    let mut first_error = None;

    for interface in interfaces {
        match change(&interface) {
            Ok(()) => {
                info!(interface = %interface, action, "DNS settings changed");
                changed.push(interface);
            }
            Err(e) => {
                warn!(interface = %interface, action, error = %e, "Failed to change DNS settings");
                failed.push(InterfaceFailure {
                    interface,
                    error: e.to_string(),
                });
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) if changed.is_empty() => Err(e),
        _ => Ok((changed, failed)),
    }
}
