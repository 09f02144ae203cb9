//! Main Crate Error

#[derive(thiserror::Error, Debug)]
/// Crawler common crate error enum.
pub enum Error {
    /// Zone (shared prefix length) is larger than the 160 bits of a [NodeId](crate::NodeId).
    #[error("Invalid zone: {0}, expected a value in 0..=160")]
    InvalidZone(usize),

    /// Local-ness is undefined for an empty address.
    #[error("Invalid address: empty address bytes")]
    InvalidAddress,

    /// Node Id bytes are not exactly [ID_SIZE](crate::ID_SIZE) long.
    #[error("Invalid Id size, expected 20, got {0}")]
    InvalidIdSize(usize),

    #[error("Invalid Id encoding: {0}")]
    /// Node Id is not a valid hex string.
    InvalidIdHex(#[from] hex::FromHexError),

    /// A bootstrap entry is not of the form `host:port`.
    #[error("Invalid bootstrap address: {0}")]
    InvalidBootstrapAddress(String),

    /// Host name resolved to no addresses.
    #[error("Could not resolve any address for {0}")]
    Unresolved(String),

    #[error(transparent)]
    /// Transparent [std::io::Error]
    IO(#[from] std::io::Error),

    #[cfg(feature = "report")]
    #[error("Failed to encode report: {0}")]
    /// Transparent [serde_json::Error]
    Json(#[from] serde_json::Error),
}

/// Alias for results returned from this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
