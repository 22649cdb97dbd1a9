use super::Repositories;
use hostguard_application::use_cases::{
    AddDomainUseCase, ApplyBlockListUseCase, GetBlocklistUseCase, GetDnsStatusUseCase,
    GetStatusUseCase, ListBackupsUseCase, RemoveBlockUseCase, RemoveDomainUseCase,
    ResetDnsUseCase, RestoreFromBackupUseCase, SetDnsUseCase, ShowCurrentBlockUseCase,
    UpdateBlocklistUseCase,
};
use hostguard_domain::Config;
use std::sync::Arc;

pub struct UseCases {
    pub apply_block_list: Arc<ApplyBlockListUseCase>,
    pub remove_block: Arc<RemoveBlockUseCase>,
    pub restore_from_backup: Arc<RestoreFromBackupUseCase>,
    pub show_current_block: Arc<ShowCurrentBlockUseCase>,
    pub list_backups: Arc<ListBackupsUseCase>,
    pub get_blocklist: Arc<GetBlocklistUseCase>,
    pub update_blocklist: Arc<UpdateBlocklistUseCase>,
    pub add_domain: Arc<AddDomainUseCase>,
    pub remove_domain: Arc<RemoveDomainUseCase>,
    pub set_dns: Arc<SetDnsUseCase>,
    pub reset_dns: Arc<ResetDnsUseCase>,
    pub get_dns_status: Arc<GetDnsStatusUseCase>,
    pub get_status: Arc<GetStatusUseCase>,
}

impl UseCases {
    pub fn new(repos: &Repositories, config: &Config) -> Self {
        let hosts_path = config.hosts.path.clone();
        let get_dns_status = Arc::new(GetDnsStatusUseCase::new(repos.dns.clone(), &config.dns));

        Self {
            apply_block_list: Arc::new(ApplyBlockListUseCase::new(
                repos.hosts.clone(),
                repos.resolver.clone(),
                &config.hosts,
            )),
            remove_block: Arc::new(RemoveBlockUseCase::new(
                repos.hosts.clone(),
                repos.resolver.clone(),
                &config.hosts,
            )),
            restore_from_backup: Arc::new(RestoreFromBackupUseCase::new(
                repos.hosts.clone(),
                repos.resolver.clone(),
                &config.hosts,
            )),
            show_current_block: Arc::new(ShowCurrentBlockUseCase::new(
                repos.hosts.clone(),
                hosts_path.clone(),
            )),
            list_backups: Arc::new(ListBackupsUseCase::new(repos.hosts.clone(), hosts_path)),
            get_blocklist: Arc::new(GetBlocklistUseCase::new(
                repos.blocklist_store.clone(),
                &config.blocklist,
            )),
            update_blocklist: Arc::new(UpdateBlocklistUseCase::new(
                repos.blocklist_fetcher.clone(),
                repos.blocklist_store.clone(),
                config.blocklist.clone(),
            )),
            add_domain: Arc::new(AddDomainUseCase::new(repos.blocklist_store.clone())),
            remove_domain: Arc::new(RemoveDomainUseCase::new(
                repos.blocklist_store.clone(),
                &config.blocklist,
            )),
            set_dns: Arc::new(SetDnsUseCase::new(
                repos.dns.clone(),
                repos.resolver.clone(),
                config,
            )),
            reset_dns: Arc::new(ResetDnsUseCase::new(
                repos.dns.clone(),
                repos.resolver.clone(),
                config,
            )),
            get_status: Arc::new(GetStatusUseCase::new(
                repos.hosts.clone(),
                repos.blocklist_store.clone(),
                get_dns_status.clone(),
                config,
            )),
            get_dns_status,
        }
    }
}
