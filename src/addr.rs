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

//! Textual IP literal canonicalization and prefix-bit comparison.
//!
//! Three pure operations: [`classify`] guesses which grammar a literal
//! belongs to, [`canonicalize`] parses a literal into a caller-supplied
//! byte buffer (4 bytes for IPv4, 16 for IPv6), and [`prefix_equal`]
//! compares two binary addresses over their leading bits. Callers keep
//! the canonical buffers around (e.g. parsed authorized-network entries)
//! and compare them against connecting hosts later.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Address family guessed by [`classify`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AddrFamily {
    NotAddress,
    Ipv4,
    Ipv6,
}

/// Guess the address family of a textual literal.
///
/// This is a lexical heuristic, not a validator: any ASCII character that
/// is neither a decimal digit nor a dot marks the literal as IPv6 (that
/// covers colons and hex letters), and an all-digits-and-dots literal is
/// IPv4 when it has at most 3 dots. A literal that classifies as one
/// family may still fail to canonicalize.
pub fn classify(text: &str) -> AddrFamily {
    let s = text.as_bytes();
    if s.is_empty() {
        return AddrFamily::NotAddress;
    }

    let mut ndots = 0usize;
    for &c in s {
        if c == b'.' {
            ndots += 1;
        } else if c.is_ascii() && !c.is_ascii_digit() {
            return AddrFamily::Ipv6;
        }
    }

    if ndots <= 3 {
        AddrFamily::Ipv4
    } else {
        AddrFamily::Ipv6
    }
}

/// Error from [`canonicalize`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CanonError {
    /// Output buffer too small for the family the literal requires
    /// (4 bytes for IPv4, 16 for IPv6). Retry with a larger buffer.
    Capacity,
    /// The literal is not parseable under any supported notation.
    Syntax,
}

impl Display for CanonError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            CanonError::Capacity => write!(f, "output buffer too small for address"),
            CanonError::Syntax => write!(f, "malformed address literal"),
        }
    }
}

impl Error for CanonError {}

fn hex_val(c: u8) -> u32 {
    match c {
        b'0'..=b'9' => (c - b'0') as u32,
        b'a'..=b'f' => (c - b'a' + 10) as u32,
        _ => (c - b'A' + 10) as u32,
    }
}

/// Parse a textual IP literal into its canonical binary form.
///
/// Writes into `out` and returns the occupied length: exactly 4 for an
/// IPv4 result, exactly 16 for IPv6. Handles plain dotted quads, the
/// historical short forms where the last field supplies the remaining
/// bytes (`"127.1"` is `[127,0,0,1]`, a bare `"1"` is `[0,0,0,1]`),
/// colon-separated hex groups, one `::` zero run, and an IPv4 dotted
/// quad embedded after a colon context (`"::ffff:192.0.2.1"`).
///
/// On error nothing useful is in `out` and no length is reported.
/// [`CanonError::Capacity`] is raised before parsing begins, so a caller
/// can retry with a 16-byte buffer; [`CanonError::Syntax`] is final.
pub fn canonicalize(text: &str, out: &mut [u8]) -> Result<usize, CanonError> {
    let s = text.as_bytes();
    if s.is_empty() {
        return Err(CanonError::Syntax);
    }

    let cap = out.len();
    if cap < 4 {
        return Err(CanonError::Capacity);
    }

    let mut ndots = 0usize;
    let mut ncolon = 0isize;
    for &c in s {
        match c {
            b'.' => ndots += 1,
            b':' => ncolon += 1,
            _ => {}
        }
    }

    out.fill(0);

    // Position where a "::" zero run occurred, in output bytes. The bytes
    // written after it get shifted to the tail of the 16-byte buffer once
    // the whole literal has been consumed.
    let mut split: Option<usize> = None;
    let mut filled = 0usize;
    let mut p = 0usize;

    if ncolon > 0 {
        if cap < 16 {
            return Err(CanonError::Capacity);
        }

        if ncolon > 1 && s[0] == b':' && s[1] == b':' {
            split = Some(0);
            p = 2;
            ncolon -= 2;
        }

        while p < s.len() && filled + 2 <= cap {
            if !s[p].is_ascii_hexdigit() {
                return Err(CanonError::Syntax);
            }

            // Speculatively collect the run as a hex group. If a dot
            // follows it was really the first decimal octet of an
            // embedded IPv4 literal; rewind and let the dotted parser
            // below take over from the start of the run.
            let run = p;
            let mut val: u32 = 0;
            while p < s.len() && s[p].is_ascii_hexdigit() {
                val = val.wrapping_mul(16).wrapping_add(hex_val(s[p]));
                p += 1;
            }

            if p < s.len() && s[p] == b'.' {
                p = run;
                break;
            }

            out[filled] = (val >> 8) as u8;
            out[filled + 1] = (val & 0xff) as u8;
            filled += 2;

            if p >= s.len() {
                break;
            }
            if s[p] != b':' {
                return Err(CanonError::Syntax);
            }
            p += 1;

            if p < s.len() && s[p] == b':' {
                if split.is_some() {
                    // only one "::" per address
                    return Err(CanonError::Syntax);
                }
                ncolon -= 1;
                p += 1;
                split = Some(filled);
            }

            ncolon -= 1;
            if ncolon <= 0 && ndots > 0 {
                // remainder is an embedded dotted quad
                break;
            }
        }
    }

    if ndots <= 3 && p < s.len() {
        // Number of fields never explicitly dot-terminated, including the
        // final one; the last field's value is split big-endian across
        // that many bytes. This is what makes "127.1" come out as
        // 127.0.0.1 and a bare "1" as 0.0.0.1.
        let mut cnt = 4usize;
        let mut val: u32 = 0;

        while filled < cap {
            if p >= s.len() || !s[p].is_ascii_digit() {
                return Err(CanonError::Syntax);
            }

            val = 0;
            while p < s.len() && s[p].is_ascii_digit() {
                val = val.wrapping_mul(10).wrapping_add((s[p] - b'0') as u32);
                p += 1;
            }

            if p >= s.len() {
                break;
            }
            if s[p] != b'.' {
                return Err(CanonError::Syntax);
            }
            p += 1;

            cnt -= 1;
            out[filled] = val as u8;
            filled += 1;
        }

        if cnt + filled > cap {
            cnt = cap - filled;
        }
        let mut k = cnt;
        while k > 0 {
            k -= 1;
            out[filled] = (val >> (8 * k)) as u8;
            filled += 1;
        }
    }

    if let Some(split) = split {
        if filled < 16 && cap >= 16 {
            let mut d = filled;
            let mut l = 16;
            while d > split {
                d -= 1;
                l -= 1;
                out[l] = out[d];
            }
            while l > split {
                l -= 1;
                out[l] = 0;
            }
            filled = 16;
        }
    }

    // A well-formed literal always lands on exactly one family's width.
    if filled == 4 || filled == 16 {
        Ok(filled)
    } else {
        Err(CanonError::Syntax)
    }
}

/// Compare the leading `bits` bits of two binary addresses.
///
/// `len` is the declared length of both buffers and is never read past
/// either slice. With `bits` at 0 (or past the end of the buffers) any
/// two addresses compare equal; with `bits` at the full width this is
/// byte-wise equality; anything in between masks the partial trailing
/// byte.
pub fn prefix_equal(a: &[u8], b: &[u8], len: usize, bits: usize) -> bool {
    let len = len.min(a.len()).min(b.len());
    let mut bits = bits;
    let mut i = 0usize;

    while bits >= 8 && i < len {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
        bits -= 8;
    }

    if bits == 0 || i >= len {
        return true;
    }

    (a[i] ^ b[i]) >> (8 - bits) == 0
}
