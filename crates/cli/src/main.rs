use clap::{Parser, Subcommand};
use hostguard_domain::CliOverrides;
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};

mod bootstrap;
mod commands;
mod di;
mod output;

#[derive(Parser)]
#[command(name = "hostguard")]
#[command(version)]
#[command(about = "Keeps a managed block of blocked domains in the system hosts file")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Hosts file to manage instead of the configured one
    #[arg(long, value_name = "PATH", global = true)]
    hosts_file: Option<PathBuf>,

    /// Directory for hosts file backups
    #[arg(long, value_name = "DIR", global = true)]
    backup_dir: Option<PathBuf>,

    /// Directory holding the downloaded blocklist
    #[arg(long, value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replace the managed block with the given domains, or with the
    /// downloaded blocklist when none are given
    ApplyBlockList {
        domains: Vec<String>,

        /// File with one domain per line
        #[arg(long, value_name = "FILE")]
        domains_file: Option<PathBuf>,
    },

    /// Restore the hosts file from the given backup or the newest one
    RestoreFromBackup {
        #[arg(required_unless_present = "latest", conflicts_with = "latest")]
        backup: Option<PathBuf>,

        /// Use the newest backup of the hosts file
        #[arg(long)]
        latest: bool,
    },

    /// Print the managed block currently in the hosts file
    ShowCurrentBlock,

    /// Remove the managed block, markers included
    RemoveBlock,

    /// List backups of the hosts file, newest first
    ListBackups,

    /// Download the configured blocklist sources
    UpdateBlocklist {
        /// Apply the refreshed list to the hosts file
        #[arg(long)]
        apply: bool,

        /// Ignore cached source downloads
        #[arg(long)]
        force: bool,
    },

    /// Block a domain on top of the downloaded blocklist
    AddDomain {
        domain: String,

        /// Apply the resulting blocklist to the hosts file
        #[arg(long)]
        apply: bool,
    },

    /// Stop blocking a domain, even when a source lists it
    RemoveDomain {
        domain: String,

        /// Apply the resulting blocklist to the hosts file
        #[arg(long)]
        apply: bool,
    },

    /// Point network interfaces at a family-safe DNS provider
    SetDns {
        /// Provider name; the configured default when omitted
        provider: Option<String>,

        /// Only change this interface
        #[arg(long, value_name = "NAME")]
        interface: Option<String>,
    },

    /// Return network interfaces to automatic DNS servers
    ResetDns {
        /// Only change this interface
        #[arg(long, value_name = "NAME")]
        interface: Option<String>,
    },

    /// Report per-interface DNS servers and the known providers
    DnsStatus,

    /// Report hosts file, blocklist and DNS state
    Status,

    /// Refresh and apply the blocklist periodically until interrupted
    Watch,
}

async fn run(cli: Cli) -> anyhow::Result<Value> {
    let overrides = CliOverrides {
        hosts_path: cli.hosts_file,
        backup_dir: cli.backup_dir,
        data_dir: cli.data_dir,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config.logging);
    debug!(hosts = %config.hosts.path.display(), "Configuration loaded");

    let repos = di::Repositories::new(&config)?;
    let use_cases = di::UseCases::new(&repos, &config);

    match cli.command {
        Command::ApplyBlockList {
            domains,
            domains_file,
        } => commands::apply_block_list(&use_cases, domains, domains_file),
        Command::RestoreFromBackup { backup, latest } => {
            let backup = if latest { None } else { backup };
            commands::restore_from_backup(&use_cases, backup)
        }
        Command::ShowCurrentBlock => commands::show_current_block(&use_cases),
        Command::RemoveBlock => commands::remove_block(&use_cases),
        Command::ListBackups => commands::list_backups(&use_cases),
        Command::UpdateBlocklist { apply, force } => {
            commands::update_blocklist(&use_cases, apply, force).await
        }
        Command::AddDomain { domain, apply } => commands::add_domain(&use_cases, &domain, apply),
        Command::RemoveDomain { domain, apply } => {
            commands::remove_domain(&use_cases, &domain, apply)
        }
        Command::SetDns {
            provider,
            interface,
        } => commands::set_dns(&use_cases, provider.as_deref(), interface.as_deref()),
        Command::ResetDns { interface } => commands::reset_dns(&use_cases, interface.as_deref()),
        Command::DnsStatus => commands::dns_status(&use_cases),
        Command::Status => commands::status(&use_cases),
        Command::Watch => {
            commands::watch(&use_cases, config.blocklist.update_interval()).await
        }
    }
}

fn print_json(doc: &Value) {
    match serde_json::to_string_pretty(doc) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", doc),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(doc) => {
            print_json(&doc);
            ExitCode::SUCCESS
        }
        Err(e) => {
            let (doc, code) = output::failure(&e);
            error!(error = %format!("{:#}", e), "Command failed");
            print_json(&doc);
            code
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_apply_with_globals_after_subcommand() {
        let cli = Cli::try_parse_from([
            "hostguard",
            "apply-block-list",
            "example.com",
            "test.net",
            "--hosts-file",
            "/tmp/hosts",
        ])
        .unwrap();

        assert_eq!(cli.hosts_file, Some(PathBuf::from("/tmp/hosts")));
        match cli.command {
            Command::ApplyBlockList { domains, .. } => {
                assert_eq!(domains, ["example.com", "test.net"])
            }
            _ => panic!("expected apply-block-list"),
        }
    }

    #[test]
    fn test_restore_backup_conflicts_with_latest() {
        let result = Cli::try_parse_from([
            "hostguard",
            "restore-from-backup",
            "/tmp/hosts.bak",
            "--latest",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_restore_requires_backup_or_latest() {
        assert!(Cli::try_parse_from(["hostguard", "restore-from-backup"]).is_err());

        let cli = Cli::try_parse_from(["hostguard", "restore-from-backup", "--latest"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::RestoreFromBackup {
                backup: None,
                latest: true
            }
        ));

        let cli =
            Cli::try_parse_from(["hostguard", "restore-from-backup", "/tmp/hosts.bak"]).unwrap();
        match cli.command {
            Command::RestoreFromBackup { backup, latest } => {
                assert_eq!(backup, Some(PathBuf::from("/tmp/hosts.bak")));
                assert!(!latest);
            }
            _ => panic!("expected restore-from-backup"),
        }
    }

    #[test]
    fn test_parse_custom_domain_commands() {
        let cli = Cli::try_parse_from(["hostguard", "add-domain", "ads.example", "--apply"]).unwrap();
        match cli.command {
            Command::AddDomain { domain, apply } => {
                assert_eq!(domain, "ads.example");
                assert!(apply);
            }
            _ => panic!("expected add-domain"),
        }

        let cli = Cli::try_parse_from(["hostguard", "remove-domain", "ads.example"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::RemoveDomain { apply: false, .. }
        ));

        assert!(Cli::try_parse_from(["hostguard", "add-domain"]).is_err());
    }

    #[test]
    fn test_parse_dns_commands() {
        let cli = Cli::try_parse_from(["hostguard", "set-dns"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::SetDns {
                provider: None,
                interface: None
            }
        ));

        let cli = Cli::try_parse_from([
            "hostguard",
            "set-dns",
            "Quad9 Family",
            "--interface",
            "eth0",
        ])
        .unwrap();
        match cli.command {
            Command::SetDns {
                provider,
                interface,
            } => {
                assert_eq!(provider.as_deref(), Some("Quad9 Family"));
                assert_eq!(interface.as_deref(), Some("eth0"));
            }
            _ => panic!("expected set-dns"),
        }

        let cli = Cli::try_parse_from(["hostguard", "reset-dns", "--interface", "Wi-Fi"]).unwrap();
        match cli.command {
            Command::ResetDns { interface } => assert_eq!(interface.as_deref(), Some("Wi-Fi")),
            _ => panic!("expected reset-dns"),
        }
    }

    #[test]
    fn test_parse_update_flags() {
        let cli =
            Cli::try_parse_from(["hostguard", "update-blocklist", "--apply", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::UpdateBlocklist {
                apply: true,
                force: true
            }
        ));
    }
}
