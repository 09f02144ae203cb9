//! Struct and implementation of a crawled node's contact information
use std::net::{SocketAddr, ToSocketAddrs};

use serde::{Deserialize, Serialize};

use crate::common::{is_local_ip, IpVersion, NodeId};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// A DHT node as learned from a `find_node` response or a bootstrap list.
pub struct NodeInfo {
    pub id: NodeId,
    pub address: SocketAddr,
}

impl NodeInfo {
    /// Creates a new NodeInfo from an id and socket address.
    pub fn new(id: NodeId, address: SocketAddr) -> NodeInfo {
        NodeInfo { id, address }
    }

    /// Create a node with a random Id, useful for testing.
    pub fn random(address: SocketAddr) -> NodeInfo {
        NodeInfo {
            id: NodeId::random(),
            address,
        }
    }

    pub fn ip_version(&self) -> IpVersion {
        IpVersion::of(self.address.ip())
    }

    /// Returns true if this node's address is on a local or non-routable network.
    pub fn is_local(&self) -> bool {
        is_local_ip(self.address.ip())
    }
}

impl From<NodeInfo> for SocketAddr {
    fn from(node: NodeInfo) -> Self {
        node.address
    }
}

/// Parse a `host:port` string into a [NodeInfo], resolving `host` if it is a domain name.
///
/// The first resolved address is used, and the node is given a random Id since
/// bootstrap nodes' Ids are not known before contacting them.
pub fn parse_addr_string(text: &str) -> Result<NodeInfo> {
    let text = text.trim();

    let (host, port) = text
        .rsplit_once(':')
        .ok_or_else(|| Error::InvalidBootstrapAddress(text.to_string()))?;

    if host.is_empty() || port.parse::<u16>().is_err() {
        return Err(Error::InvalidBootstrapAddress(text.to_string()));
    }

    let address = text
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| Error::Unresolved(text.to_string()))?;

    Ok(NodeInfo::random(address))
}

/// Extract the Ids of a list of nodes, preserving order.
pub fn node_ids(nodes: &[NodeInfo]) -> Vec<NodeId> {
    nodes.iter().map(|node| node.id).collect()
}
