//! Kademlia node Id or a lookup target, and the XOR metric between Ids.
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt::{self, Debug, Display, Formatter},
    str::FromStr,
};

use hex::FromHex;

use crate::{Error, Result};

/// The size of node IDs in bytes.
pub const ID_SIZE: usize = 20;
/// The size of node IDs in bits, which is also the widest possible zone.
pub const MAX_ZONE: usize = ID_SIZE * 8;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Kademlia node Id or a lookup target
pub struct NodeId([u8; ID_SIZE]);

impl NodeId {
    /// The all-zero Id, usually a sign of an unset or missing Id.
    pub const ZERO: NodeId = NodeId([0; ID_SIZE]);

    pub fn random() -> NodeId {
        let mut rng = rand::thread_rng();
        let random_bytes: [u8; ID_SIZE] = rng.gen();

        NodeId(random_bytes)
    }

    /// Create a new Id from some bytes. Returns Err if `bytes` is not of length
    /// [ID_SIZE].
    pub fn from_bytes<T: AsRef<[u8]>>(bytes: T) -> Result<NodeId> {
        let bytes = bytes.as_ref();
        if bytes.len() != ID_SIZE {
            return Err(Error::InvalidIdSize(bytes.len()));
        }

        let mut tmp: [u8; ID_SIZE] = [0; ID_SIZE];
        tmp.copy_from_slice(bytes);

        Ok(NodeId(tmp))
    }

    pub fn as_bytes(&self) -> &[u8; ID_SIZE] {
        &self.0
    }

    /// Returns true if every byte of this Id is null.
    pub fn is_zero(&self) -> bool {
        self.0 == [0; ID_SIZE]
    }

    /// XOR distance between this Id and another Id.
    ///
    /// Distance to self is [Distance::ZERO], and `a.distance(&b) == b.distance(&a)`.
    pub fn distance(&self, other: &NodeId) -> Distance {
        let mut xor = [0; ID_SIZE];

        for (out, (a, b)) in xor.iter_mut().zip(self.0.iter().zip(other.0.iter())) {
            *out = a ^ b;
        }

        Distance(xor)
    }

    /// Returns true if `target` shares at least `zone` leading bits with this Id,
    /// counting from the most significant bit of the first byte.
    ///
    /// A zone of `0` matches every target, and a zone of [MAX_ZONE] matches only
    /// this exact Id. Zones wider than [MAX_ZONE] return [Error::InvalidZone].
    pub fn in_zone(&self, target: &NodeId, zone: usize) -> Result<bool> {
        if zone > MAX_ZONE {
            return Err(Error::InvalidZone(zone));
        }

        let distance = self.distance(target);

        for bit in 0..zone {
            // Found a set bit among the first `zone` bits
            if distance.bit(bit) {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Number of leading bits this Id shares with `other`, in `0..=160`.
    pub fn shared_prefix_len(&self, other: &NodeId) -> usize {
        self.distance(other).leading_zeros()
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl From<[u8; ID_SIZE]> for NodeId {
    fn from(bytes: [u8; ID_SIZE]) -> Self {
        NodeId(bytes)
    }
}

impl AsRef<[u8]> for NodeId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl Debug for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self)
    }
}

impl FromStr for NodeId {
    type Err = Error;

    /// Parse an Id from a 40 characters hex string.
    fn from_str(s: &str) -> Result<NodeId> {
        let bytes = <[u8; ID_SIZE]>::from_hex(s)?;

        Ok(NodeId(bytes))
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;

        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
/// XOR of two [NodeId]s, ordered as a big-endian unsigned integer (smaller is closer).
pub struct Distance([u8; ID_SIZE]);

impl Distance {
    pub const ZERO: Distance = Distance([0; ID_SIZE]);

    pub fn is_zero(&self) -> bool {
        self.0 == [0; ID_SIZE]
    }

    /// Bit at `index`, where `0` is the most significant bit.
    ///
    /// Indices past [MAX_ZONE] are always unset.
    pub fn bit(&self, index: usize) -> bool {
        if index >= MAX_ZONE {
            return false;
        }

        self.0[index / 8] & (0x80 >> (index % 8)) != 0
    }

    /// Number of leading zero bits, [MAX_ZONE] for [Distance::ZERO].
    pub fn leading_zeros(&self) -> usize {
        for (i, byte) in self.0.iter().enumerate() {
            if *byte != 0 {
                return i * 8 + byte.leading_zeros() as usize;
            }
        }

        MAX_ZONE
    }

    pub fn as_bytes(&self) -> &[u8; ID_SIZE] {
        &self.0
    }
}

impl Debug for Distance {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Distance({})", hex::encode(self.0))
    }
}
