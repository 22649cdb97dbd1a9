//! System DNS server settings through the platform's own tooling:
//! `resolvectl` on Linux, `networksetup` on macOS and the DnsClient
//! cmdlets in PowerShell on Windows.

use hostguard_application::ports::DnsConfigPort;
use hostguard_domain::{DomainError, InterfaceDns};
use std::net::IpAddr;
use tracing::{debug, warn};

use super::command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DnsTool {
    Resolvectl,
    Networksetup,
    PowerShell,
}

impl DnsTool {
    pub fn platform() -> Self {
        if cfg!(target_os = "windows") {
            DnsTool::PowerShell
        } else if cfg!(target_os = "macos") {
            DnsTool::Networksetup
        } else {
            DnsTool::Resolvectl
        }
    }

    fn default_program(&self) -> &'static str {
        match self {
            DnsTool::Resolvectl => "resolvectl",
            DnsTool::Networksetup => "networksetup",
            DnsTool::PowerShell => "powershell.exe",
        }
    }
}

pub struct SystemDnsConfig {
    tool: DnsTool,
    program: String,
}

impl SystemDnsConfig {
    pub fn new() -> Self {
        Self::with_tool(DnsTool::platform())
    }

    pub fn with_tool(tool: DnsTool) -> Self {
        Self::with_program(tool, tool.default_program())
    }

    /// Drives `tool`'s command line through `program`.
    pub fn with_program(tool: DnsTool, program: impl Into<String>) -> Self {
        Self {
            tool,
            program: program.into(),
        }
    }

    fn run(&self, subject: &str, args: Vec<String>) -> Result<String, DomainError> {
        debug!(program = %self.program, args = ?args, "Running DNS settings command");
        command::run(&self.program, &args).map_err(|e| command_error(subject, e))
    }

    fn powershell(&self, subject: &str, script: String) -> Result<String, DomainError> {
        self.run(
            subject,
            vec![
                "-NoProfile".to_string(),
                "-NonInteractive".to_string(),
                "-Command".to_string(),
                script,
            ],
        )
    }
}

impl Default for SystemDnsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DnsConfigPort for SystemDnsConfig {
    fn interfaces(&self) -> Result<Vec<InterfaceDns>, DomainError> {
        match self.tool {
            DnsTool::Resolvectl => Ok(parse_resolvectl_dns(
                &self.run("resolvectl", args(&["dns"]))?,
            )),
            DnsTool::Networksetup => {
                let services = parse_network_services(
                    &self.run("networksetup", args(&["-listallnetworkservices"]))?,
                );
                services
                    .into_iter()
                    .map(|service| {
                        let out =
                            self.run(&service, args(&["-getdnsservers", service.as_str()]))?;
                        Ok(InterfaceDns {
                            servers: parse_server_lines(&out),
                            interface: service,
                        })
                    })
                    .collect()
            }
            DnsTool::PowerShell => {
                let names = self.powershell(
                    "Get-NetAdapter",
                    "Get-NetAdapter | Where-Object {$_.Status -eq 'Up'} | \
                     Select-Object -ExpandProperty Name"
                        .to_string(),
                )?;
                names
                    .lines()
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .map(|name| {
                        let out = self.powershell(
                            name,
                            format!(
                                "(Get-DnsClientServerAddress -InterfaceAlias {} \
                                 -AddressFamily IPv4).ServerAddresses",
                                ps_quote(name)
                            ),
                        )?;
                        Ok(InterfaceDns {
                            interface: name.to_string(),
                            servers: parse_server_lines(&out),
                        })
                    })
                    .collect()
            }
        }
    }

    fn set_servers(&self, interface: &str, servers: &[IpAddr]) -> Result<(), DomainError> {
        if servers.is_empty() {
            return Err(DomainError::DnsConfig(format!(
                "{}: no DNS servers given",
                interface
            )));
        }
        let addresses: Vec<String> = servers.iter().map(ToString::to_string).collect();

        match self.tool {
            DnsTool::Resolvectl => {
                let mut argv = args(&["dns", interface]);
                argv.extend(addresses);
                self.run(interface, argv)?;
            }
            DnsTool::Networksetup => {
                let mut argv = args(&["-setdnsservers", interface]);
                argv.extend(addresses);
                self.run(interface, argv)?;
            }
            DnsTool::PowerShell => {
                let list: Vec<String> = addresses.iter().map(|a| ps_quote(a)).collect();
                self.powershell(
                    interface,
                    format!(
                        "Set-DnsClientServerAddress -InterfaceAlias {} -ServerAddresses ({})",
                        ps_quote(interface),
                        list.join(",")
                    ),
                )?;
            }
        }
        Ok(())
    }

    fn reset(&self, interface: &str) -> Result<(), DomainError> {
        match self.tool {
            DnsTool::Resolvectl => self.run(interface, args(&["revert", interface]))?,
            DnsTool::Networksetup => {
                self.run(interface, args(&["-setdnsservers", interface, "Empty"]))?
            }
            DnsTool::PowerShell => self.powershell(
                interface,
                format!(
                    "Set-DnsClientServerAddress -InterfaceAlias {} -ResetServerAddresses",
                    ps_quote(interface)
                ),
            )?,
        };
        Ok(())
    }
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|a| a.to_string()).collect()
}

/// Single-quoted PowerShell string literal.
fn ps_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn command_error(subject: &str, message: String) -> DomainError {
    const DENIED: &[&str] = &[
        "access is denied",
        "permission denied",
        "not permitted",
        "authentication required",
        "requires admin",
    ];
    let lower = message.to_ascii_lowercase();
    if DENIED.iter().any(|m| lower.contains(m)) {
        DomainError::Permission {
            path: subject.to_string(),
            reason: message,
        }
    } else {
        DomainError::DnsConfig(format!("{}: {}", subject, message))
    }
}

/// A server token as printed by the tools: `1.1.1.1`, `1.1.1.1#sni.name`,
/// `fe80::1%2`. Ports are not printed for plain DNS servers.
fn parse_server(token: &str) -> Option<IpAddr> {
    let token = token.split('#').next().unwrap_or(token);
    let token = token.split('%').next().unwrap_or(token);
    token.parse().ok()
}

fn parse_server_lines(output: &str) -> Vec<IpAddr> {
    output
        .lines()
        .filter_map(|line| parse_server(line.trim()))
        .collect()
}

/// `resolvectl dns` prints one `Link <n> (<name>): <servers…>` line per
/// link next to a `Global:` line. Loopback is left out.
fn parse_resolvectl_dns(output: &str) -> Vec<InterfaceDns> {
    output
        .lines()
        .filter_map(|line| {
            let rest = line.trim().strip_prefix("Link ")?;
            let open = rest.find('(')?;
            let close = rest[open..].find("):")? + open;
            let name = &rest[open + 1..close];
            if name == "lo" {
                return None;
            }
            let servers = rest[close + 2..]
                .split_whitespace()
                .filter_map(|token| {
                    let server = parse_server(token);
                    if server.is_none() {
                        warn!(interface = name, token, "Unrecognised DNS server in resolvectl output");
                    }
                    server
                })
                .collect();
            Some(InterfaceDns {
                interface: name.to_string(),
                servers,
            })
        })
        .collect()
}

/// `networksetup -listallnetworkservices` starts with a legend line;
/// disabled services carry a leading `*`.
fn parse_network_services(output: &str) -> Vec<String> {
    output
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('*'))
        .map(str::to_string)
        .collect()
}
