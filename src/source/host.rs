//! Posting URL host extraction and counting

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::types::{Document, HostCount, Record};

/// Host name of an absolute URL, lowercased.
///
/// Userinfo, port, path, query and fragment are stripped; IPv6 literals keep
/// their brackets. URLs without a scheme or without a host give `None`.
pub fn page_host(url: &str) -> Option<String> {
    let url = url.trim();
    let (scheme, rest) = url.split_once("://")?;
    let mut scheme_chars = scheme.chars();
    if !scheme_chars.next()?.is_ascii_alphabetic()
        || !scheme_chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    {
        return None;
    }

    let authority_end = rest
        .find(|c: char| matches!(c, '/' | '?' | '#'))
        .unwrap_or(rest.len());
    let authority = &rest[..authority_end];
    let host_port = match authority.rfind('@') {
        Some(at) => &authority[at + 1..],
        None => authority,
    };

    let host = if host_port.starts_with('[') {
        let close = host_port.find(']')?;
        &host_port[..=close]
    } else {
        match host_port.rsplit_once(':') {
            Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
            Some(_) => return None,
            None => host_port,
        }
    };

    if host.is_empty() {
        return None;
    }
    Some(host.to_lowercase())
}

/// Most frequent hosts in `url_field`, count descending then host
/// ascending. Records without a parseable URL are ignored.
pub fn top_hosts<'a, I>(records: I, url_field: &str, n: usize) -> Vec<HostCount>
where
    I: IntoIterator<Item = &'a Record>,
{
    let hosts = records
        .into_iter()
        .filter_map(|r| r.get(url_field))
        .filter_map(page_host);
    count_hosts(hosts, n)
}

/// Most frequent source hosts of the documents in each category, ordered
/// like [`top_hosts`]. Documents without a source host are ignored.
pub fn hosts_by_category(documents: &[Document<'_>], n: usize) -> BTreeMap<String, Vec<HostCount>> {
    let mut by_category: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for doc in documents {
        if let Some(host) = &doc.source_host {
            by_category
                .entry(doc.category.to_string())
                .or_default()
                .push(host.clone());
        }
    }
    by_category
        .into_iter()
        .map(|(category, hosts)| (category, count_hosts(hosts, n)))
        .collect()
}

fn count_hosts<I: IntoIterator<Item = String>>(hosts: I, n: usize) -> Vec<HostCount> {
    let mut counts: FxHashMap<String, usize> = FxHashMap::default();
    for host in hosts {
        *counts.entry(host).or_insert(0) += 1;
    }

    let mut hosts: Vec<HostCount> = counts
        .into_iter()
        .map(|(host, count)| HostCount { host, count })
        .collect();
    hosts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.host.cmp(&b.host)));
    hosts.truncate(n);
    hosts
}
