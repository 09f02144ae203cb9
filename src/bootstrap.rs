//! Bootstrap node lists.
//!
//! A bootstrap file has one `host:port` address per line. Lines starting with `//`
//! are comments, and blank lines are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, error};

use crate::common::{parse_addr_string, NodeInfo};
use crate::Result;

const COMMENT_PREFIX: &str = "//";

/// Read and resolve the bootstrap nodes listed in the file at `path`.
pub fn read_bootstrap_list<P: AsRef<Path>>(path: P) -> Result<Vec<NodeInfo>> {
    let path = path.as_ref();
    let file = File::open(path)?;

    let nodes = parse_bootstrap_list(BufReader::new(file))?;

    debug!(?path, count = nodes.len(), "Read bootstrap list");

    Ok(nodes)
}

/// Parse and resolve a bootstrap list, failing on the first invalid entry.
pub fn parse_bootstrap_list<R: BufRead>(reader: R) -> Result<Vec<NodeInfo>> {
    let mut nodes = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
            continue;
        }

        match parse_addr_string(line) {
            Ok(node) => nodes.push(node),
            Err(error) => {
                error!(?error, line, "Error parsing bootstrap peers");
                return Err(error);
            }
        }
    }

    Ok(nodes)
}
