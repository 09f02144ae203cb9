//! IP address family and local network classification.
//!
//! Local addresses are not routed on the open internet, so nodes advertising
//! them are most likely not connectable and not worth crawling.

use std::convert::TryInto;
use std::fmt::{self, Display, Formatter};
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// First 12 bytes of an IPv4-mapped IPv6 address (`::ffff:a.b.c.d`).
const V4_MAPPED_PREFIX: [u8; 12] = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff];

const IPV4_LOCAL_NETS: [LocalNet<4>; 6] = [
    // Loopback
    LocalNet::new([127, 0, 0, 0], 8),
    // "This network"
    LocalNet::new([0, 0, 0, 0], 8),
    // Private use
    LocalNet::new([10, 0, 0, 0], 8),
    LocalNet::new([172, 16, 0, 0], 12),
    LocalNet::new([192, 168, 0, 0], 16),
    // Carrier-grade NAT
    LocalNet::new([100, 64, 0, 0], 10),
];

const IPV6_LOCAL_NETS: [LocalNet<16>; 2] = [
    // Loopback
    LocalNet::new([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1], 128),
    // Unique Local Addresses
    LocalNet::new([0xfc, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], 7),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
/// Version of an IP address, or [IpVersion::Unknown] for malformed addresses.
pub enum IpVersion {
    #[default]
    Unknown,
    #[serde(rename = "IPv4")]
    Ipv4,
    #[serde(rename = "IPv6")]
    Ipv6,
}

impl IpVersion {
    /// Same as [classify_version] for an already parsed address, so IPv4-mapped
    /// IPv6 addresses are [IpVersion::Ipv4].
    pub fn of(ip: IpAddr) -> IpVersion {
        match ip {
            IpAddr::V4(_) => IpVersion::Ipv4,
            IpAddr::V6(v6) => classify_version(&v6.octets()),
        }
    }
}

impl Display for IpVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            IpVersion::Unknown => "Unknown",
            IpVersion::Ipv4 => "IPv4",
            IpVersion::Ipv6 => "IPv6",
        };

        f.write_str(name)
    }
}

/// Classify raw address bytes as IPv4, IPv6 or unknown.
///
/// The 4 bytes form always wins: both a 4 bytes address and a 16 bytes
/// IPv4-mapped address are [IpVersion::Ipv4]. Any length other than 4 or 16
/// (including empty) is [IpVersion::Unknown].
pub fn classify_version(addr: &[u8]) -> IpVersion {
    match normalize(addr) {
        Some(Normalized::V4(_)) => IpVersion::Ipv4,
        Some(Normalized::V6(_)) => IpVersion::Ipv6,
        None => IpVersion::Unknown,
    }
}

/// Returns true if raw address bytes fall into a loopback, private, carrier-grade NAT
/// or unique local network.
///
/// Returns [Error::InvalidAddress] for empty bytes. Present but malformed addresses
/// are not local.
pub fn is_local(addr: &[u8]) -> Result<bool> {
    if addr.is_empty() {
        return Err(Error::InvalidAddress);
    }

    Ok(normalize(addr).map(is_local_normalized).unwrap_or(false))
}

/// [is_local] for an already parsed address, which can never be empty.
pub fn is_local_ip(ip: IpAddr) -> bool {
    let normalized = match ip {
        IpAddr::V4(v4) => Normalized::V4(v4.octets()),
        IpAddr::V6(v6) => match normalize(&v6.octets()) {
            Some(normalized) => normalized,
            None => return false,
        },
    };

    is_local_normalized(normalized)
}

fn is_local_normalized(addr: Normalized) -> bool {
    match addr {
        Normalized::V4(octets) => IPV4_LOCAL_NETS.iter().any(|net| net.contains(&octets)),
        Normalized::V6(octets) => IPV6_LOCAL_NETS.iter().any(|net| net.contains(&octets)),
    }
}

enum Normalized {
    V4([u8; 4]),
    V6([u8; 16]),
}

fn normalize(addr: &[u8]) -> Option<Normalized> {
    if let Ok(octets) = addr.try_into() {
        return Some(Normalized::V4(octets));
    }

    let octets: [u8; 16] = addr.try_into().ok()?;

    if octets[..12] == V4_MAPPED_PREFIX {
        let mut v4 = [0; 4];
        v4.copy_from_slice(&octets[12..]);

        return Some(Normalized::V4(v4));
    }

    Some(Normalized::V6(octets))
}

/// A network prefix, `network/prefix_len` in CIDR notation.
struct LocalNet<const N: usize> {
    network: [u8; N],
    prefix_len: u8,
}

impl<const N: usize> LocalNet<N> {
    const fn new(network: [u8; N], prefix_len: u8) -> Self {
        LocalNet {
            network,
            prefix_len,
        }
    }

    fn contains(&self, addr: &[u8; N]) -> bool {
        let mut remaining = self.prefix_len as usize;

        for (network, byte) in self.network.iter().zip(addr.iter()) {
            if remaining == 0 {
                break;
            }

            let bits = remaining.min(8);
            let mask = (0xff00_u16 >> bits) as u8;

            if (network ^ byte) & mask != 0 {
                return false;
            }

            remaining -= bits;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use std::net::{Ipv4Addr, Ipv6Addr};

    use super::*;

    fn bytes(ip: &str) -> Vec<u8> {
        match ip.parse::<IpAddr>().unwrap() {
            IpAddr::V4(v4) => v4.octets().to_vec(),
            IpAddr::V6(v6) => v6.octets().to_vec(),
        }
    }

    #[test]
    fn classify() {
        let cases: [(&str, Vec<u8>, IpVersion); 6] = [
            (
                "ipv4 mapped",
                Ipv4Addr::new(127, 0, 0, 1).to_ipv6_mapped().octets().to_vec(),
                IpVersion::Ipv4,
            ),
            ("4 bytes ipv4", vec![127, 0, 0, 1], IpVersion::Ipv4),
            ("1 byte", vec![127], IpVersion::Unknown),
            ("empty", vec![], IpVersion::Unknown),
            ("ipv6", bytes("::FFFF:C0A8"), IpVersion::Ipv6),
            ("ipv6 loopback", bytes("::1"), IpVersion::Ipv6),
        ];

        for (name, addr, expected) in cases.iter() {
            assert_eq!(classify_version(addr), *expected, "{}", name);
        }
    }

    #[test]
    fn classify_parsed() {
        assert_eq!(
            IpVersion::of(IpAddr::V4(Ipv4Addr::new(1, 2, 3, 4))),
            IpVersion::Ipv4
        );
        assert_eq!(
            IpVersion::of(IpAddr::V6(Ipv4Addr::new(1, 2, 3, 4).to_ipv6_mapped())),
            IpVersion::Ipv4
        );
        assert_eq!(IpVersion::of(IpAddr::V6(Ipv6Addr::LOCALHOST)), IpVersion::Ipv6);
    }

    #[test]
    fn local() {
        let cases = [
            ("127.0.0.1", true),
            ("192.168.2.3", true),
            ("10.12.14.15", true),
            ("172.16.33.33", true),
            ("100.64.12.13", true),
            ("0.1.2.3", true),
            ("1.2.3.4", false),
            ("::1", true),
            ("fd00::1", true),
            ("c0ff:eeee::1", false),
        ];

        for (ip, expected) in cases {
            assert_eq!(is_local(&bytes(ip)).unwrap(), expected, "{}", ip);
            assert_eq!(is_local_ip(ip.parse().unwrap()), expected, "{}", ip);
        }
    }

    #[test]
    fn local_network_boundaries() {
        let cases = [
            ("172.15.255.255", false),
            ("172.31.255.255", true),
            ("172.32.0.0", false),
            ("100.63.255.255", false),
            ("100.127.255.255", true),
            ("100.128.0.0", false),
            ("192.167.255.255", false),
            ("fbff:ffff::1", false),
            ("fc00::", true),
            ("fdff:ffff:ffff:ffff:ffff:ffff:ffff:ffff", true),
            ("fe00::", false),
            ("fe80::1", false),
            ("::2", false),
            ("::", false),
        ];

        for (ip, expected) in cases {
            assert_eq!(is_local(&bytes(ip)).unwrap(), expected, "{}", ip);
        }
    }

    #[test]
    fn mapped_ipv4_uses_ipv4_table() {
        let mapped = Ipv4Addr::new(10, 0, 0, 1).to_ipv6_mapped();

        assert!(is_local(&mapped.octets()).unwrap());
        assert!(is_local_ip(IpAddr::V6(mapped)));

        let public = Ipv4Addr::new(8, 8, 8, 8).to_ipv6_mapped();
        assert!(!is_local(&public.octets()).unwrap());
    }

    #[test]
    fn empty_address() {
        assert!(matches!(is_local(&[]), Err(Error::InvalidAddress)));
    }

    #[test]
    fn malformed_address() {
        assert!(!is_local(&[127]).unwrap());
        assert!(!is_local(&[127, 0, 0]).unwrap());
    }

    #[test]
    fn display() {
        assert_eq!(IpVersion::Ipv4.to_string(), "IPv4");
        assert_eq!(IpVersion::Ipv6.to_string(), "IPv6");
        assert_eq!(IpVersion::Unknown.to_string(), "Unknown");
        assert_eq!(IpVersion::default(), IpVersion::Unknown);
    }
}
