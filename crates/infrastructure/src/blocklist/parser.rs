use hostguard_domain::{normalize_domain, BlockEntry, ListFormat};
use std::collections::BTreeSet;
use std::net::IpAddr;

fn is_sink_address(addr: &str) -> bool {
    matches!(addr, "0.0.0.0" | "127.0.0.1" | "::" | "::1")
}

fn is_local_name(name: &str) -> bool {
    matches!(
        name,
        "localhost"
            | "localhost.localdomain"
            | "local"
            | "broadcasthost"
            | "ip6-localhost"
            | "ip6-loopback"
            | "ip6-localnet"
            | "ip6-mcastprefix"
            | "ip6-allnodes"
            | "ip6-allrouters"
            | "0.0.0.0"
    )
}

/// Extracts the blocked domain from one list line.
///
/// `hosts` lists only contribute lines mapping a sink address (`0.0.0.0`,
/// `127.0.0.1`, `::`, `::1`) to a name. `domains` lists contribute one bare
/// domain per line (`||domain^` accepted), and tolerate hosts-style lines.
pub fn parse_list_line(line: &str, format: ListFormat) -> Option<String> {
    let line = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
    .trim();

    if line.is_empty() || line.starts_with('!') {
        return None;
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    let candidate = match (format, parts.as_slice()) {
        (_, [addr, name, ..]) if is_sink_address(addr) => *name,
        (ListFormat::Domains, [name]) => name.trim_start_matches("||").trim_end_matches('^'),
        _ => return None,
    };

    if is_local_name(candidate) {
        return None;
    }

    let domain = normalize_domain(candidate);
    if !domain.contains('.') || domain.parse::<IpAddr>().is_ok() {
        return None;
    }
    BlockEntry::validate_domain(&domain).ok()?;
    Some(domain)
}

/// Unique domains of a whole list, sorted.
pub fn parse_list_text(text: &str, format: ListFormat) -> Vec<String> {
    text.lines()
        .filter_map(|line| parse_list_line(line, format))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
