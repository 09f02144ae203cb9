//! JSON reports of monitoring and crawling runs.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::common::{IpVersion, NodeId, NodeInfo};
use crate::Result;

#[derive(Debug, Clone, Default, PartialEq)]
/// Results of a monitoring period, keyed by the node's address string.
pub struct Output {
    pub start_date: String,
    pub end_date: String,
    pub nodes: HashMap<String, ObservedNode>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Everything learned about a single node during monitoring.
pub struct ObservedNode {
    pub udp_addr: SocketAddr,
    pub reachable: bool,
    pub ip_version: IpVersion,
}

impl ObservedNode {
    pub fn new(udp_addr: SocketAddr, reachable: bool) -> Self {
        ObservedNode {
            udp_addr,
            reachable,
            ip_version: IpVersion::of(udp_addr.ip()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Serialized form of [Output].
pub struct MonitorOutput {
    #[serde(rename = "start_timestamp")]
    pub start_date: String,
    #[serde(rename = "end_timestamp")]
    pub end_date: String,
    #[serde(rename = "found_nodes")]
    pub nodes: Vec<MonitoredNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonitoredNode {
    #[serde(rename = "udpaddrs")]
    pub udp_addr: SocketAddr,
    pub reachable: bool,
    pub ip_version: IpVersion,
}

impl From<&Output> for MonitorOutput {
    fn from(output: &Output) -> Self {
        let mut nodes: Vec<_> = output
            .nodes
            .values()
            .map(|node| MonitoredNode {
                udp_addr: node.udp_addr,
                reachable: node.reachable,
                ip_version: node.ip_version,
            })
            .collect();

        nodes.sort_by_key(|node| node.udp_addr);

        MonitorOutput {
            start_date: output.start_date.clone(),
            end_date: output.end_date.clone(),
            nodes,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Summary of a crawl: its time span and every node learned about.
pub struct CrawlOutput {
    pub start_date: String,
    pub end_date: String,
    pub nodes: HashMap<NodeId, CrawledNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Everything known about a node that was contacted during a crawl.
pub struct CrawledNode {
    pub id: NodeId,
    pub udp_addr: SocketAddr,
    pub reachable: bool,
    pub ip_version: IpVersion,
    pub neighbours: Vec<NodeId>,
    pub timestamp: String,
}

impl CrawledNode {
    pub fn new(
        node: &NodeInfo,
        reachable: bool,
        neighbours: Vec<NodeId>,
        timestamp: String,
    ) -> Self {
        CrawledNode {
            id: node.id,
            udp_addr: node.address,
            reachable,
            ip_version: node.ip_version(),
            neighbours,
            timestamp,
        }
    }
}

impl CrawlOutput {
    pub fn insert(&mut self, node: CrawledNode) {
        self.nodes.insert(node.id, node);
    }

    /// Write this crawl as JSON to `path`, creating missing parent directories.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_json(self, path.as_ref())
    }
}

/// Write a monitoring report as JSON to `path`, creating missing parent directories.
pub fn report_to_file<P: AsRef<Path>>(report: &Output, path: P) -> Result<()> {
    write_json(&MonitorOutput::from(report), path.as_ref())
}

/// Create `path` and its missing parents, doing nothing if it already exists.
pub fn create_dir_if_not_exists<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    Ok(())
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_if_not_exists(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);

    serde_json::to_writer(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    debug!(?path, "Wrote report");

    Ok(())
}
