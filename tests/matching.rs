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

//! End-to-end scenario: stored authorized-network entries checked
//! against connecting-host literals, the way a policy matcher uses the
//! engine.

use spfgg::addr::{classify, AddrFamily};
use spfgg::net::{CanonAddr, NetBlock};

#[test]
fn test_policy_entry_matching() {
    let entries: Vec<NetBlock> = ["192.0.2.0/24", "10.0.0.0/8", "2001:db8::/32"]
        .iter()
        .map(|s| s.parse().expect("policy entry must parse"))
        .collect();

    let matches = |host: &str| {
        let addr = CanonAddr::parse(host).expect("host literal must parse");
        entries.iter().any(|e| e.contains(&addr))
    };

    assert!(matches("192.0.2.77"));
    assert!(matches("10.255.1.2"));
    assert!(matches("2001:db8:1:2::3"));

    assert!(!matches("192.0.3.1"));
    assert!(!matches("11.0.0.1"));
    assert!(!matches("2001:db9::1"));
    // v4-mapped form of an authorized v4 host is a different family
    assert!(!matches("::ffff:192.0.2.77"));
}

#[test]
fn test_shorthand_literals_in_entries() {
    // historical short forms canonicalize before comparison, so "127.1"
    // and "127.0.0.1" are the same stored entry
    let block = NetBlock::parse("127.1").unwrap();
    assert!(block.contains(&CanonAddr::parse("127.0.0.1").unwrap()));

    let loopback_net = NetBlock::parse("127.0.0.0/8").unwrap();
    assert!(loopback_net.contains(&CanonAddr::parse("127.1").unwrap()));
}

#[test]
fn test_classify_routes_to_parser() {
    // classify only picks the preferred grammar; canonicalize still
    // decides validity
    for (literal, family, parses) in [
        ("192.0.2.1", AddrFamily::Ipv4, true),
        ("::1", AddrFamily::Ipv6, true),
        ("notanip", AddrFamily::Ipv6, false),
        ("1.2.3.4.5", AddrFamily::Ipv6, false),
    ] {
        assert_eq!(classify(literal), family, "classify({:?})", literal);
        assert_eq!(
            CanonAddr::parse(literal).is_ok(),
            parses,
            "parse({:?})",
            literal
        );
    }
}
