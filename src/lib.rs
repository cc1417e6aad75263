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

pub mod addr;
pub mod log;
pub mod net;

#[cfg(test)]
pub(crate) mod test_helpers {
    use crate::addr::canonicalize;

    /// Canonicalize into a fresh 16-byte buffer, panicking on failure.
    pub fn canon16(s: &str) -> ([u8; 16], usize) {
        let mut buf = [0u8; 16];
        let len = canonicalize(s, &mut buf)
            .unwrap_or_else(|e| panic!("canonicalize({:?}) failed: {}", s, e));
        (buf, len)
    }
}
