//! DD-WRT status scraping.
//!
//! DD-WRT's web interface serves live status as brace-delimited
//! pseudo-JSON (`{key::value}` records). This crate fetches those pages,
//! decodes them into a per-router field cache and unpacks the table-valued
//! fields.
//!
//! - [`store`] - Insertion-ordered field cache with upsert rules
//! - [`decoder`] - Brace scanner turning a page body into fields
//! - [`records`] - Wireless client, ARP and DHCP table decoders
//! - [`session`] - Page sequencing, readiness and lookups
//! - [`transport`] - HTTP fetcher and the [`StatusFetcher`] seam
//!
//! # Example
//!
//! ```ignore
//! use ddwrt_status::{HttpFetcher, RouterOptions, StatusSession};
//!
//! let fetcher = HttpFetcher::new(RouterOptions::new("192.168.1.1"))?;
//! let mut session = StatusSession::new(fetcher);
//! session.init().await?;
//! println!("quality: {}%", session.wireless_quality()?);
//! ```

pub mod decoder;
pub mod error;
pub mod records;
pub mod session;
pub mod store;
pub mod transport;

pub use decoder::{DecodeSummary, decode};
pub use error::{Error, Result};
pub use records::{ArpEntry, DhcpLease, TableRecord, WirelessClient, parse_table};
pub use session::{Page, SessionState, StatusSession};
pub use store::{Field, FieldStore, Upsert};
pub use transport::{HttpFetcher, RouterOptions, StatusFetcher};
