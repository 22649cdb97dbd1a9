use chrono::Utc;
use hostguard_domain::DomainError;
use hostguard_jobs::BlocklistSyncJob;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::di::UseCases;
use crate::output::success;

/// Reads one domain per line; blank lines and `#` comments are skipped.
pub fn read_domains_file(path: &Path) -> Result<Vec<String>, DomainError> {
    let text = std::fs::read_to_string(path).map_err(|e| DomainError::from_io(path.display(), &e))?;
    Ok(parse_domains_text(&text))
}

fn parse_domains_text(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Domains named on the command line. `None` only when neither positional
/// domains nor a domains file were given; an empty file yields an empty set.
fn requested_domains(
    domains: Vec<String>,
    domains_file: Option<&Path>,
) -> Result<Option<BTreeSet<String>>, DomainError> {
    if domains.is_empty() && domains_file.is_none() {
        return Ok(None);
    }
    let mut requested: BTreeSet<String> = domains.into_iter().collect();
    if let Some(file) = domains_file {
        requested.extend(read_domains_file(file)?);
    }
    Ok(Some(requested))
}

pub fn apply_block_list(
    use_cases: &UseCases,
    domains: Vec<String>,
    domains_file: Option<PathBuf>,
) -> anyhow::Result<Value> {
    let requested = match requested_domains(domains, domains_file.as_deref())? {
        Some(requested) => requested,
        None => {
            let persisted = use_cases.get_blocklist.execute()?;
            info!(domains = persisted.len(), "Applying persisted blocklist");
            persisted
        }
    };

    let result = use_cases.apply_block_list.execute(&requested)?;
    success("apply-block-list", result)
}

pub fn restore_from_backup(use_cases: &UseCases, backup: Option<PathBuf>) -> anyhow::Result<Value> {
    let outcome = use_cases.restore_from_backup.execute(backup)?;
    success("restore-from-backup", outcome)
}

#[derive(Serialize)]
struct CurrentBlock {
    present: bool,
    entry_count: usize,
    domains: BTreeSet<String>,
    entries: Vec<String>,
    non_conforming: Vec<NonConformingLine>,
}

#[derive(Serialize)]
struct NonConformingLine {
    line: usize,
    content: String,
}

pub fn show_current_block(use_cases: &UseCases) -> anyhow::Result<Value> {
    let block = use_cases.show_current_block.execute()?;
    let view = match block {
        Some(block) => CurrentBlock {
            present: true,
            entry_count: block.entry_count(),
            domains: block.domains(),
            entries: block.entry_lines().into_iter().map(str::to_string).collect(),
            non_conforming: block
                .non_conforming()
                .into_iter()
                .map(|(line, raw)| NonConformingLine {
                    line,
                    content: raw.to_string(),
                })
                .collect(),
        },
        None => CurrentBlock {
            present: false,
            entry_count: 0,
            domains: BTreeSet::new(),
            entries: vec![],
            non_conforming: vec![],
        },
    };
    success("show-current-block", view)
}

pub fn remove_block(use_cases: &UseCases) -> anyhow::Result<Value> {
    let result = use_cases.remove_block.execute()?;
    success("remove-block", result)
}

pub fn list_backups(use_cases: &UseCases) -> anyhow::Result<Value> {
    let backups = use_cases.list_backups.execute()?;
    success("list-backups", backups)
}

#[derive(Serialize)]
struct UpdateOutcome {
    summary: hostguard_domain::UpdateSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    applied: Option<hostguard_domain::ApplyResult>,
}

pub async fn update_blocklist(use_cases: &UseCases, apply: bool, force: bool) -> anyhow::Result<Value> {
    let summary = use_cases.update_blocklist.execute(force).await?;

    let applied = if apply {
        let domains = use_cases.get_blocklist.execute()?;
        let apply_use_case = Arc::clone(&use_cases.apply_block_list);
        Some(tokio::task::spawn_blocking(move || apply_use_case.execute(&domains)).await??)
    } else {
        None
    };

    success("update-blocklist", UpdateOutcome { summary, applied })
}

/// Applies the effective blocklist after a custom-domain edit.
fn apply_effective_blocklist(use_cases: &UseCases) -> anyhow::Result<hostguard_domain::ApplyResult> {
    let domains = use_cases.get_blocklist.execute()?;
    Ok(use_cases.apply_block_list.execute(&domains)?)
}

#[derive(Serialize)]
struct DomainEditOutcome {
    #[serde(flatten)]
    edit: hostguard_domain::DomainEdit,
    #[serde(skip_serializing_if = "Option::is_none")]
    applied: Option<hostguard_domain::ApplyResult>,
}

pub fn add_domain(use_cases: &UseCases, domain: &str, apply: bool) -> anyhow::Result<Value> {
    let edit = use_cases.add_domain.execute(domain)?;
    let applied = if apply {
        Some(apply_effective_blocklist(use_cases)?)
    } else {
        None
    };
    success("add-domain", DomainEditOutcome { edit, applied })
}

pub fn remove_domain(use_cases: &UseCases, domain: &str, apply: bool) -> anyhow::Result<Value> {
    let edit = use_cases.remove_domain.execute(domain)?;
    let applied = if apply {
        Some(apply_effective_blocklist(use_cases)?)
    } else {
        None
    };
    success("remove-domain", DomainEditOutcome { edit, applied })
}

pub fn set_dns(
    use_cases: &UseCases,
    provider: Option<&str>,
    interface: Option<&str>,
) -> anyhow::Result<Value> {
    let change = use_cases.set_dns.execute(provider, interface)?;
    success("set-dns", change)
}

pub fn reset_dns(use_cases: &UseCases, interface: Option<&str>) -> anyhow::Result<Value> {
    let change = use_cases.reset_dns.execute(interface)?;
    success("reset-dns", change)
}

#[derive(Serialize)]
struct DnsStatusView<'a> {
    #[serde(flatten)]
    status: hostguard_domain::DnsStatus,
    providers: &'a [hostguard_domain::DnsProvider],
}

pub fn dns_status(use_cases: &UseCases) -> anyhow::Result<Value> {
    let status = use_cases.get_dns_status.execute()?;
    success(
        "dns-status",
        DnsStatusView {
            status,
            providers: use_cases.get_dns_status.providers(),
        },
    )
}

pub fn status(use_cases: &UseCases) -> anyhow::Result<Value> {
    let status = use_cases.get_status.execute(Utc::now())?;
    success("status", status)
}

#[derive(Serialize)]
struct WatchOutcome {
    interval_secs: u64,
    initial_refresh: bool,
}

/// Runs the periodic refresh until Ctrl-C. A refresh happens right away
/// when the persisted list is missing or stale.
pub async fn watch(use_cases: &UseCases, interval: chrono::Duration) -> anyhow::Result<Value> {
    let interval_secs = interval.num_seconds().max(1) as u64;
    let shutdown = CancellationToken::new();
    let job = Arc::new(
        BlocklistSyncJob::new(
            use_cases.update_blocklist.clone(),
            use_cases.get_blocklist.clone(),
            use_cases.apply_block_list.clone(),
        )
        .with_interval(interval_secs)
        .with_cancellation(shutdown.clone()),
    );

    let initial_refresh = use_cases.get_blocklist.is_update_needed(Utc::now())?;
    if initial_refresh {
        if let Err(e) = job.run_once().await {
            warn!(error = %e, kind = e.kind(), "Initial blocklist refresh failed");
        }
    }

    let handle = Arc::clone(&job).start();
    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested");
    shutdown.cancel();
    handle.await?;

    success(
        "watch",
        WatchOutcome {
            interval_secs,
            initial_refresh,
        },
    )
}
