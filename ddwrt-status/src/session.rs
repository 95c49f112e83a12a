//! Status session: page sequencing, readiness and field lookup.

use tracing::{debug, info};

use crate::decoder::{DecodeSummary, decode};
use crate::error::{Error, Result};
use crate::records::{ArpEntry, DhcpLease, TableRecord, WirelessClient, parse_quality, parse_table};
use crate::store::{Field, FieldStore};
use crate::transport::{StatusFetcher, is_placeholder};

/// Field carrying the wireless link quality.
pub const QUALITY_FIELD: &str = "wl_quality";

/// Status pages served by the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Lan,
    Wireless,
    Wan,
    Router,
    /// Combined AP summary; not part of initialisation.
    Info,
}

impl Page {
    /// Pages fetched by [`StatusSession::init`], in order.
    pub const INIT_SEQUENCE: [Page; 4] = [Page::Lan, Page::Wireless, Page::Wan, Page::Router];

    /// Path of the page on the router.
    pub fn path(&self) -> &'static str {
        match self {
            Page::Lan => "/Status_Lan.live.asp",
            Page::Wireless => "/Status_Wireless.live.asp",
            Page::Wan => "/Status_Internet.live.asp",
            Page::Router => "/Status_Router.live.asp",
            Page::Info => "/Statusinfo.live.asp",
        }
    }

    /// Short name for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Lan => "lan",
            Page::Wireless => "wireless",
            Page::Wan => "wan",
            Page::Router => "router",
            Page::Info => "info",
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Readiness of a session. `Ready` is never left once reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    NotReady,
    Ready,
}

/// Cached status of one router.
///
/// Owns its [`FieldStore`]. Every mutating call takes `&mut self`, so two
/// fetch cycles can never interleave on the same store.
#[derive(Debug)]
pub struct StatusSession<F> {
    fetcher: F,
    store: FieldStore,
    state: SessionState,
}

impl<F: StatusFetcher> StatusSession<F> {
    /// Create a session in the `NotReady` state.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            store: FieldStore::new(),
            state: SessionState::NotReady,
        }
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether `init` has completed at least once.
    pub fn is_ready(&self) -> bool {
        self.state == SessionState::Ready
    }

    /// The underlying fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch and decode the LAN, Wireless, WAN and Router pages in order.
    ///
    /// The first failure aborts the remaining pages. On a ready session
    /// this acts as a refresh and the session stays ready.
    pub async fn init(&mut self) -> Result<()> {
        let target = self.fetcher.target();
        if is_placeholder(target) {
            return Err(Error::AddressUnset(target.to_string()));
        }

        for page in Page::INIT_SEQUENCE {
            self.fetch_and_decode(page).await?;
        }

        if self.state == SessionState::NotReady {
            info!(router = %self.fetcher.target(), fields = self.store.len(), "Session ready");
        }
        self.state = SessionState::Ready;

        Ok(())
    }

    /// Fetch one page and merge it into the store.
    pub async fn fetch_and_decode(&mut self, page: Page) -> Result<DecodeSummary> {
        let body = self.fetcher.fetch(page.path()).await?;
        let summary = decode(&body, &mut self.store);

        if summary.is_malformed(&body) {
            return Err(Error::MalformedResponse {
                page: page.path().to_string(),
            });
        }

        debug!(
            page = %page,
            records = summary.records,
            inserted = summary.inserted,
            updated = summary.updated,
            dropped = summary.dropped,
            "Decoded status page"
        );

        Ok(summary)
    }

    /// Re-fetch a single page on a ready session.
    pub async fn refresh(&mut self, page: Page) -> Result<DecodeSummary> {
        self.ensure_ready()?;
        self.fetch_and_decode(page).await
    }

    /// Current value of a field.
    pub fn lookup_field(&self, name: &str) -> Result<Option<&str>> {
        self.ensure_ready()?;
        Ok(self.store.get(name))
    }

    /// Copy of every cached field, whatever the state.
    pub fn dump_fields(&self) -> Vec<Field> {
        self.store.snapshot()
    }

    /// Connected wireless clients.
    pub fn wireless_clients(&self) -> Result<Vec<WirelessClient>> {
        self.table()
    }

    /// ARP table.
    pub fn arp_table(&self) -> Result<Vec<ArpEntry>> {
        self.table()
    }

    /// DHCP leases.
    pub fn dhcp_leases(&self) -> Result<Vec<DhcpLease>> {
        self.table()
    }

    /// Wireless link quality in percent.
    pub fn wireless_quality(&self) -> Result<u32> {
        parse_quality(self.require(QUALITY_FIELD)?)
    }

    fn table<R: TableRecord>(&self) -> Result<Vec<R>> {
        parse_table(self.require(R::FIELD)?)
    }

    fn require(&self, name: &str) -> Result<&str> {
        self.lookup_field(name)?
            .ok_or_else(|| Error::FieldNotFound(name.to_string()))
    }

    fn ensure_ready(&self) -> Result<()> {
        match self.state {
            SessionState::Ready => Ok(()),
            SessionState::NotReady => Err(Error::NotReady),
        }
    }
}
