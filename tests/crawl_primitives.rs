//! End to end use of the crawl primitives through the public API.
//!
//! Run with: cargo test --test crawl_primitives

use std::io::Write;
use std::net::{IpAddr, SocketAddr};

use mainline_crawler_common::{
    classify_version, is_local, read_bootstrap_list, CandidateFilter, Error, IpVersion, NodeId,
    NodeInfo, MAX_ZONE,
};
use rayon::prelude::*;

#[test]
fn concurrent_zone_checks() {
    let target = NodeId::random();
    let candidates: Vec<_> = (0..10_000).map(|_| NodeId::random()).collect();

    let sequential: Vec<_> = candidates
        .iter()
        .map(|id| target.in_zone(id, 4).unwrap())
        .collect();

    let parallel: Vec<_> = candidates
        .par_iter()
        .map(|id| target.in_zone(id, 4).unwrap())
        .collect();

    assert_eq!(sequential, parallel);

    // Roughly 1/16 of random ids share 4 bits with the target.
    let in_zone = parallel.iter().filter(|in_zone| **in_zone).count();
    assert!(in_zone > 300 && in_zone < 1000, "{}", in_zone);
}

#[test]
fn concurrent_address_checks() {
    let addresses: Vec<IpAddr> = (0..=255u8)
        .flat_map(|a| (0..=255u8).map(move |b| IpAddr::from([a, b, 1, 1])))
        .collect();

    let local = addresses
        .par_iter()
        .filter(|ip| match ip {
            IpAddr::V4(v4) => is_local(&v4.octets()).unwrap(),
            IpAddr::V6(v6) => is_local(&v6.octets()).unwrap(),
        })
        .count();

    // 0/8, 10/8, 127/8 => 3 * 256, 172.16/12 => 16, 192.168/16 => 1, 100.64/10 => 64
    assert_eq!(local, 3 * 256 + 16 + 1 + 64);
}

#[test]
fn distance_orders_candidates() {
    let target = NodeId::random();
    let mut candidates: Vec<_> = (0..100).map(|_| NodeId::random()).collect();

    candidates.sort_by_key(|id| target.distance(id));

    for pair in candidates.windows(2) {
        assert!(target.shared_prefix_len(&pair[0]) >= target.shared_prefix_len(&pair[1]));
    }
}

#[test]
fn zone_extremes() {
    let a = NodeId::random();
    let b = NodeId::random();

    assert!(a.in_zone(&b, 0).unwrap());
    assert_eq!(a.in_zone(&b, MAX_ZONE).unwrap(), a == b);
    assert!(matches!(
        a.in_zone(&b, MAX_ZONE + 1),
        Err(Error::InvalidZone(_))
    ));
}

#[test]
fn classification_priority() {
    let v4: IpAddr = "93.184.216.34".parse().unwrap();
    let mapped: IpAddr = "::ffff:93.184.216.34".parse().unwrap();

    assert_eq!(IpVersion::of(v4), IpVersion::Ipv4);
    assert_eq!(IpVersion::of(mapped), IpVersion::Ipv4);

    if let IpAddr::V6(mapped) = mapped {
        assert_eq!(classify_version(&mapped.octets()), IpVersion::Ipv4);
    }

    assert_eq!(classify_version(&[1]), IpVersion::Unknown);
}

#[test]
fn bootstrap_file_through_filter() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "// routers").unwrap();
    writeln!(file, "67.215.246.10:6881").unwrap();
    writeln!(file, "192.168.1.10:6881").unwrap();
    writeln!(file, "[2001:db8::1]:25401").unwrap();
    writeln!(file, "[fd00::1]:25401").unwrap();
    file.flush().unwrap();

    let nodes = read_bootstrap_list(file.path()).unwrap();
    assert_eq!(nodes.len(), 4);

    let accepted = CandidateFilter::default().filter(&nodes).unwrap();
    let addresses: Vec<_> = accepted.iter().map(|node: &NodeInfo| node.address).collect();

    assert_eq!(
        addresses,
        vec![
            "67.215.246.10:6881".parse::<SocketAddr>().unwrap(),
            "[2001:db8::1]:25401".parse::<SocketAddr>().unwrap(),
        ]
    );
}
