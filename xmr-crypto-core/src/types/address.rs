//! Monero address types and network definitions
//!
//! This module provides type-safe representations of Monero addresses
//! and the base58 tags each network uses for them.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// Network Definition
// =============================================================================

/// Monero network type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MoneroNetwork {
    /// Mainnet (production network)
    #[default]
    Mainnet,
    /// Testnet (development network)
    Testnet,
    /// Stagenet (testing network with separate blockchain)
    Stagenet,
}

impl MoneroNetwork {
    /// All networks, in tag-lookup order
    pub const ALL: [MoneroNetwork; 3] = [Self::Mainnet, Self::Testnet, Self::Stagenet];

    /// Get the address prefix for standard addresses
    #[must_use]
    pub const fn address_prefix(&self) -> u64 {
        match self {
            Self::Mainnet => 18,  // '4' in base58
            Self::Testnet => 53,  // '9' in base58
            Self::Stagenet => 24, // '5' in base58
        }
    }

    /// Get the address prefix for integrated addresses
    #[must_use]
    pub const fn integrated_prefix(&self) -> u64 {
        match self {
            Self::Mainnet => 19,
            Self::Testnet => 54,
            Self::Stagenet => 25,
        }
    }

    /// Get the address prefix for subaddresses
    #[must_use]
    pub const fn subaddress_prefix(&self) -> u64 {
        match self {
            Self::Mainnet => 42,  // '8' in base58
            Self::Testnet => 63,  // 'B' in base58
            Self::Stagenet => 36, // '7' in base58
        }
    }

    /// Base58 tag for an address of the given type on this network
    #[must_use]
    pub const fn tag(&self, address_type: AddressType) -> u64 {
        match address_type {
            AddressType::Standard => self.address_prefix(),
            AddressType::Integrated => self.integrated_prefix(),
            AddressType::Subaddress => self.subaddress_prefix(),
        }
    }

    /// Resolve a base58 tag back to its network and address type
    #[must_use]
    pub fn from_tag(tag: u64) -> Option<(Self, AddressType)> {
        Self::ALL.iter().find_map(|net| {
            AddressType::ALL
                .iter()
                .find(|ty| net.tag(**ty) == tag)
                .map(|ty| (*net, *ty))
        })
    }

    /// Parse network from string
    #[must_use]
    pub fn from_name(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("mainnet") || s.eq_ignore_ascii_case("main") {
            Some(Self::Mainnet)
        } else if s.eq_ignore_ascii_case("testnet") || s.eq_ignore_ascii_case("test") {
            Some(Self::Testnet)
        } else if s.eq_ignore_ascii_case("stagenet") || s.eq_ignore_ascii_case("stage") {
            Some(Self::Stagenet)
        } else {
            None
        }
    }
}

impl fmt::Display for MoneroNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainnet => write!(f, "mainnet"),
            Self::Testnet => write!(f, "testnet"),
            Self::Stagenet => write!(f, "stagenet"),
        }
    }
}

// =============================================================================
// Address Types
// =============================================================================

/// Type of Monero address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AddressType {
    /// Standard address (primary spend/view keys)
    Standard,
    /// Integrated address (standard + 8-byte payment ID)
    Integrated,
    /// Subaddress (account + address index derivation)
    Subaddress,
}

impl AddressType {
    /// All address types
    pub const ALL: [AddressType; 3] = [Self::Standard, Self::Integrated, Self::Subaddress];

    /// Length of the decoded payload (keys plus optional payment id)
    #[must_use]
    pub const fn payload_length(&self) -> usize {
        match self {
            Self::Standard | Self::Subaddress => PUBLIC_KEY_LENGTH * 2,
            Self::Integrated => PUBLIC_KEY_LENGTH * 2 + PAYMENT_ID_LENGTH,
        }
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Integrated => write!(f, "integrated"),
            Self::Subaddress => write!(f, "subaddress"),
        }
    }
}

/// Decoded Monero address components
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecodedAddress {
    /// Network this address belongs to
    pub network: MoneroNetwork,
    /// Type of address
    pub address_type: AddressType,
    /// Public spend key (32 bytes)
    pub spend_key: [u8; 32],
    /// Public view key (32 bytes)
    pub view_key: [u8; 32],
    /// Payment ID for integrated addresses (8 bytes)
    pub payment_id: Option<[u8; 8]>,
}

impl DecodedAddress {
    /// Create a new standard address
    #[must_use]
    pub fn new_standard(network: MoneroNetwork, spend_key: [u8; 32], view_key: [u8; 32]) -> Self {
        Self {
            network,
            address_type: AddressType::Standard,
            spend_key,
            view_key,
            payment_id: None,
        }
    }

    /// Create a new subaddress
    #[must_use]
    pub fn new_subaddress(network: MoneroNetwork, spend_key: [u8; 32], view_key: [u8; 32]) -> Self {
        Self {
            network,
            address_type: AddressType::Subaddress,
            spend_key,
            view_key,
            payment_id: None,
        }
    }

    /// Create a new integrated address
    #[must_use]
    pub fn new_integrated(
        network: MoneroNetwork,
        spend_key: [u8; 32],
        view_key: [u8; 32],
        payment_id: [u8; 8],
    ) -> Self {
        Self {
            network,
            address_type: AddressType::Integrated,
            spend_key,
            view_key,
            payment_id: Some(payment_id),
        }
    }

    /// Base58 tag of this address
    #[must_use]
    pub fn tag(&self) -> u64 {
        self.network.tag(self.address_type)
    }

    /// Check if this is a subaddress
    #[must_use]
    pub fn is_subaddress(&self) -> bool {
        matches!(self.address_type, AddressType::Subaddress)
    }

    /// Check if this is an integrated address
    #[must_use]
    pub fn is_integrated(&self) -> bool {
        matches!(self.address_type, AddressType::Integrated)
    }
}

// =============================================================================
// Lengths
// =============================================================================

/// Length of a Monero public key in bytes
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Length of an integrated-address payment id in bytes
pub const PAYMENT_ID_LENGTH: usize = 8;

/// Length of a Monero address checksum in bytes
pub const CHECKSUM_LENGTH: usize = 4;
