#![doc = include_str!("../README.md")]
//! ## Feature flags
#![doc = document_features::document_features!()]
//!

// Public modules
mod common;
mod error;

pub mod bootstrap;
pub mod filter;
pub mod prompt;
#[cfg(feature = "report")]
pub mod report;

pub use crate::common::{
    classify_version, is_local, is_local_ip, node_ids, parse_addr_string, Distance, IpVersion,
    NodeId, NodeInfo, ID_SIZE, MAX_ZONE,
};
pub use bootstrap::read_bootstrap_list;
pub use error::{Error, Result};
pub use filter::CandidateFilter;

#[cfg(feature = "report")]
pub use report::{report_to_file, CrawlOutput};
