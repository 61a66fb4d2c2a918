// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

//! Data run subsystem — decoder + address resolver.
//!
//! ```text
//! "21 18 34 56 00"  ──decode──→  [Run]  ──resolve(cluster_size)──→  [ResolvedRange]
//! ```

pub mod decoder;
pub mod resolver;

pub use decoder::{decode, decode_bytes, normalize_hex, sign_extend, Run, RunDecoder, RunHeader};
pub use resolver::{resolve, total_bytes, ResolvedRange};
