use std::net::IpAddr;

use crate::terminal::colors;
use cloudrip_common::network::record::{RecordType, ResultEntry};
use colored::*;

/// Tree details for the entries of one name, addresses in the given order.
pub fn entries_to_detail(entries: &[&ResultEntry]) -> Vec<(String, ColoredString)> {
    entries
        .iter()
        .map(|entry| {
            let color = match entry.record_type {
                RecordType::A => colors::IPV4_ADDR,
                RecordType::AAAA => colors::IPV6_ADDR,
            };
            let value = match entry.ip.parse::<IpAddr>() {
                Ok(_) => entry.ip.color(color),
                Err(_) => entry.ip.red(),
            };
            (entry.record_type.to_string(), value)
        })
        .collect()
}
