// Copyright 2025 spfgg Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Typed network blocks over the canonical address engine.
//!
//! Policy records name authorized networks as `"addr"` or `"addr/bits"`;
//! this module holds them in canonical binary form so a connecting host
//! can be checked with a single prefix comparison.

use crate::addr::{canonicalize, prefix_equal, AddrFamily, CanonError};
use crate::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum NetParseError {
    Address(CanonError),
    InvalidPrefixLength(String),
    PrefixTooLong { bits: usize, width: usize },
}

impl Display for NetParseError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            NetParseError::Address(e) => write!(f, "invalid address: {}", e),
            NetParseError::InvalidPrefixLength(s) => {
                write!(f, "invalid prefix length '{}'", s)
            }
            NetParseError::PrefixTooLong { bits, width } => {
                write!(f, "prefix length {} exceeds {}", bits, width)
            }
        }
    }
}

impl Error for NetParseError {}

impl From<CanonError> for NetParseError {
    fn from(e: CanonError) -> Self {
        NetParseError::Address(e)
    }
}

/// An address in canonical binary form: 4 occupied bytes for IPv4, 16
/// for IPv6. The occupied length is the family tag.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct CanonAddr {
    bytes: [u8; 16],
    len: usize,
}

impl CanonAddr {
    /// Canonicalize a textual literal into an owned address.
    pub fn parse(text: &str) -> Result<Self, CanonError> {
        let mut bytes = [0u8; 16];
        let len = canonicalize(text, &mut bytes)?;
        Ok(CanonAddr { bytes, len })
    }

    /// The occupied bytes (4 or 16).
    pub fn octets(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Occupied length in bytes: 4 or 16.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn family(&self) -> AddrFamily {
        if self.len == 4 {
            AddrFamily::Ipv4
        } else {
            AddrFamily::Ipv6
        }
    }
}

impl FromStr for CanonAddr {
    type Err = CanonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CanonAddr::parse(s)
    }
}

/// An authorized network entry: a canonical address plus the number of
/// leading bits that must match.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct NetBlock {
    addr: CanonAddr,
    prefix_bits: usize,
}

impl NetBlock {
    pub fn new(addr: CanonAddr, prefix_bits: usize) -> Result<Self, NetParseError> {
        let width = addr.len() * 8;
        if prefix_bits > width {
            return Err(NetParseError::PrefixTooLong {
                bits: prefix_bits,
                width,
            });
        }

        let block = NetBlock { addr, prefix_bits };
        if !block.host_bits_clear() {
            // accepted anyway; the prefix comparison ignores those bits
            warn!("network block has bits set beyond its prefix",
                  "prefix_bits" => prefix_bits);
        }
        Ok(block)
    }

    /// Parse `"addr"` (full-width prefix implied) or `"addr/bits"`.
    pub fn parse(text: &str) -> Result<Self, NetParseError> {
        match text.split_once('/') {
            None => {
                let addr = CanonAddr::parse(text)?;
                let bits = addr.len() * 8;
                NetBlock::new(addr, bits)
            }
            Some((addr_part, bits_part)) => {
                let addr = CanonAddr::parse(addr_part)?;
                let bits = bits_part
                    .parse::<usize>()
                    .map_err(|_| NetParseError::InvalidPrefixLength(bits_part.to_string()))?;
                NetBlock::new(addr, bits)
            }
        }
    }

    pub fn addr(&self) -> &CanonAddr {
        &self.addr
    }

    pub fn prefix_bits(&self) -> usize {
        self.prefix_bits
    }

    /// Whether a host address falls inside this block. Addresses of a
    /// different family never match.
    pub fn contains(&self, host: &CanonAddr) -> bool {
        self.addr.len() == host.len()
            && prefix_equal(
                self.addr.octets(),
                host.octets(),
                self.addr.len(),
                self.prefix_bits,
            )
    }

    fn host_bits_clear(&self) -> bool {
        let octets = self.addr.octets();
        let mut i = self.prefix_bits / 8;
        let rem = self.prefix_bits % 8;
        if rem != 0 {
            if i < octets.len() && octets[i] << rem != 0 {
                return false;
            }
            i += 1;
        }
        octets[i.min(octets.len())..].iter().all(|&b| b == 0)
    }
}

impl FromStr for NetBlock {
    type Err = NetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NetBlock::parse(s)
    }
}
