use hostguard_application::ports::ResolverCachePort;
use hostguard_domain::DomainError;
use tracing::debug;

use super::command;

#[cfg(target_os = "windows")]
const FLUSH_COMMANDS: &[&[&str]] = &[&["ipconfig", "/flushdns"]];

#[cfg(target_os = "macos")]
const FLUSH_COMMANDS: &[&[&str]] = &[
    &["dscacheutil", "-flushcache"],
    &["killall", "-HUP", "mDNSResponder"],
];

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const FLUSH_COMMANDS: &[&[&str]] = &[
    &["resolvectl", "flush-caches"],
    &["systemd-resolve", "--flush-caches"],
];

/// Flushes the OS resolver cache by running the platform's flush command.
/// Candidates are tried in order until one succeeds.
pub struct SystemResolverCache {
    commands: Vec<Vec<String>>,
}

impl SystemResolverCache {
    pub fn new() -> Self {
        Self::with_commands(
            FLUSH_COMMANDS
                .iter()
                .map(|cmd| cmd.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    pub fn with_commands(commands: Vec<Vec<String>>) -> Self {
        Self { commands }
    }

    fn run(argv: &[String]) -> Result<(), String> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| "empty command".to_string())?;
        command::run(program, args).map(|_| ())
    }
}

impl Default for SystemResolverCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverCachePort for SystemResolverCache {
    fn flush(&self) -> Result<(), DomainError> {
        let mut failures = Vec::new();
        for command in &self.commands {
            match Self::run(command) {
                Ok(()) => {
                    debug!(command = %command.join(" "), "Resolver cache flushed");
                    return Ok(());
                }
                Err(e) => failures.push(e),
            }
        }
        Err(DomainError::ResolverFlush(if failures.is_empty() {
            "no flush command configured".to_string()
        } else {
            failures.join("; ")
        }))
    }
}
