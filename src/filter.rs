//! Candidate filtering for crawl drivers.
//!
//! Decides whether a discovered node is worth contacting: its Id has to fall in the
//! zone around the crawl target, and its address has to be of an allowed family and
//! routable unless local nodes are explicitly allowed.

use tracing::trace;

use crate::common::{IpVersion, NodeId, NodeInfo, MAX_ZONE};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Candidate filter configurations
pub struct CandidateFilter {
    /// Crawl target. Nodes outside of its zone are pruned.
    ///
    /// Defaults to None, where every Id is accepted.
    pub target: Option<NodeId>,
    /// Number of leading bits a candidate must share with [Self::target].
    ///
    /// Defaults to `0`, must be at most [MAX_ZONE].
    pub zone: usize,
    /// Accept nodes on loopback, private, carrier-grade NAT and unique local networks.
    ///
    /// Defaults to false, since such nodes are probably not connectable.
    pub allow_local: bool,
    /// Defaults to true
    pub allow_ipv4: bool,
    /// Defaults to true
    pub allow_ipv6: bool,
}

impl Default for CandidateFilter {
    fn default() -> Self {
        Self {
            target: None,
            zone: 0,
            allow_local: false,
            allow_ipv4: true,
            allow_ipv6: true,
        }
    }
}

impl CandidateFilter {
    /// Filter accepting only nodes that share `zone` leading bits with `target`.
    ///
    /// Returns [Error::InvalidZone] if `zone` is wider than [MAX_ZONE].
    pub fn new(target: NodeId, zone: usize) -> Result<Self> {
        Self::default().with_target(target).with_zone(zone)
    }

    // === Options ===

    pub fn with_target(mut self, target: NodeId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_zone(mut self, zone: usize) -> Result<Self> {
        if zone > MAX_ZONE {
            return Err(Error::InvalidZone(zone));
        }
        self.zone = zone;
        Ok(self)
    }

    pub fn with_allow_local(mut self, allow_local: bool) -> Self {
        self.allow_local = allow_local;
        self
    }

    pub fn with_ip_versions(mut self, ipv4: bool, ipv6: bool) -> Self {
        self.allow_ipv4 = ipv4;
        self.allow_ipv6 = ipv6;
        self
    }

    // === Public Methods ===

    /// Returns true if `node` should be contacted.
    ///
    /// Only fails with [Error::InvalidZone] if [Self::zone] was set out of range.
    pub fn accepts(&self, node: &NodeInfo) -> Result<bool> {
        if let Some(target) = &self.target {
            if !target.in_zone(&node.id, self.zone)? {
                trace!(?node, zone = self.zone, "Rejected candidate outside of zone");
                return Ok(false);
            }
        }

        let allowed_version = match node.ip_version() {
            IpVersion::Ipv4 => self.allow_ipv4,
            IpVersion::Ipv6 => self.allow_ipv6,
            IpVersion::Unknown => false,
        };

        if !allowed_version {
            trace!(?node, "Rejected candidate with disallowed ip version");
            return Ok(false);
        }

        if !self.allow_local && node.is_local() {
            trace!(?node, "Rejected local candidate");
            return Ok(false);
        }

        Ok(true)
    }

    /// Keep only accepted candidates, preserving order.
    pub fn filter<'a, I>(&self, nodes: I) -> Result<Vec<NodeInfo>>
    where
        I: IntoIterator<Item = &'a NodeInfo>,
    {
        let mut accepted = Vec::new();

        for node in nodes {
            if self.accepts(node)? {
                accepted.push(*node);
            }
        }

        Ok(accepted)
    }
}
