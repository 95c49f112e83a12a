//! Decoders for table-valued fields.
//!
//! Some fields pack a whole table into one string of quoted, comma
//! separated cells, e.g. `arp_table`:
//!
//! ```text
//! 'laptop','192.168.1.10','aa:bb:cc:dd:ee:01','12','phone','192.168.1.11','aa:bb:cc:dd:ee:02','3'
//! ```
//!
//! Cells are grouped into fixed-width rows.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Cell separator: closing quote followed by a comma.
const CELL_SEPARATOR: &str = "',";

const QUOTE: char = '\'';

/// A row decoded from a table-valued field.
pub trait TableRecord: Sized {
    /// Name of the source field.
    const FIELD: &'static str;
    /// Cells per row.
    const WIDTH: usize;
    /// Whether the whole value is wrapped in one extra pair of quotes.
    const STRIP_OUTER: bool;

    /// Build a row from exactly [`Self::WIDTH`] cells.
    fn from_tokens(tokens: &[&str]) -> Result<Self>;
}

/// Connected wireless client (`active_wireless`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirelessClient {
    pub mac: String,
    #[serde(rename = "int")]
    pub interface: String,
    pub uptime: String,
    #[serde(rename = "txrate")]
    pub tx_rate: String,
    #[serde(rename = "rxrate")]
    pub rx_rate: String,
    #[serde(rename = "type")]
    pub client_type: String,
    #[serde(rename = "sig")]
    pub signal: String,
    pub noise: String,
    pub snr: String,
    /// Tenth cell. Firmware reports it as a signal quality percentage.
    #[serde(rename = "quality")]
    pub signal_quality: String,
}

impl TableRecord for WirelessClient {
    const FIELD: &'static str = "active_wireless";
    const WIDTH: usize = 10;
    const STRIP_OUTER: bool = false;

    fn from_tokens(t: &[&str]) -> Result<Self> {
        Ok(Self {
            mac: t[0].to_string(),
            interface: t[1].to_string(),
            uptime: t[2].to_string(),
            tx_rate: t[3].to_string(),
            rx_rate: t[4].to_string(),
            client_type: t[5].to_string(),
            signal: t[6].to_string(),
            noise: t[7].to_string(),
            snr: t[8].to_string(),
            signal_quality: t[9].to_string(),
        })
    }
}

/// ARP table row (`arp_table`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArpEntry {
    pub name: String,
    pub ip: String,
    pub mac: String,
    #[serde(rename = "conncount")]
    pub conn_count: u32,
}

impl TableRecord for ArpEntry {
    const FIELD: &'static str = "arp_table";
    const WIDTH: usize = 4;
    const STRIP_OUTER: bool = true;

    fn from_tokens(t: &[&str]) -> Result<Self> {
        Ok(Self {
            name: t[0].to_string(),
            ip: t[1].to_string(),
            mac: t[2].to_string(),
            conn_count: parse_number::<Self>(t[3], "conncount")?,
        })
    }
}

/// DHCP lease row (`dhcp_leases`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhcpLease {
    pub name: String,
    pub ip: String,
    pub mac: String,
    #[serde(rename = "leaseTime")]
    pub lease_time: String,
    #[serde(rename = "num")]
    pub lease_number: u32,
}

impl TableRecord for DhcpLease {
    const FIELD: &'static str = "dhcp_leases";
    const WIDTH: usize = 5;
    const STRIP_OUTER: bool = true;

    fn from_tokens(t: &[&str]) -> Result<Self> {
        Ok(Self {
            name: t[0].to_string(),
            ip: t[1].to_string(),
            mac: t[2].to_string(),
            lease_time: t[3].to_string(),
            lease_number: parse_number::<Self>(t[4], "num")?,
        })
    }
}

fn parse_number<R: TableRecord>(token: &str, slot: &str) -> Result<u32> {
    token.trim().parse().map_err(|_| Error::InvalidRecord {
        field: R::FIELD,
        reason: format!("{} is not a number: '{}'", slot, token),
    })
}

/// Split a table value into cells.
pub fn tokenize(value: &str, strip_outer: bool) -> Vec<&str> {
    let mut value = value.trim();
    if value.is_empty() {
        return Vec::new();
    }

    if strip_outer {
        value = value.strip_prefix(QUOTE).unwrap_or(value);
        value = value.strip_suffix(QUOTE).unwrap_or(value);
    }

    value.split(CELL_SEPARATOR).map(unquote).collect()
}

fn unquote(token: &str) -> &str {
    let token = token.trim();
    let token = token.strip_prefix(QUOTE).unwrap_or(token);
    token.strip_suffix(QUOTE).unwrap_or(token).trim()
}

/// Decode every row of a table-valued field.
///
/// Fails with [`Error::Alignment`] rather than emitting a short row.
pub fn parse_table<R: TableRecord>(value: &str) -> Result<Vec<R>> {
    let tokens = tokenize(value, R::STRIP_OUTER);

    if tokens.len() % R::WIDTH != 0 {
        return Err(Error::Alignment {
            field: R::FIELD,
            tokens: tokens.len(),
            window: R::WIDTH,
        });
    }

    tokens.chunks(R::WIDTH).map(R::from_tokens).collect()
}

/// Decode `wl_quality` (e.g. `87%`) into a percentage.
pub fn parse_quality(value: &str) -> Result<u32> {
    let value = value.trim();
    let digits = value.strip_suffix('%').unwrap_or(value);

    digits.trim().parse().map_err(|_| Error::InvalidRecord {
        field: "wl_quality",
        reason: format!("not a percentage: '{}'", value),
    })
}
