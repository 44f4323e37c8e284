//! Built-in sample network for `--demo`.
//!
//! Four junctions with three routes from 0 to 3:
//!
//! ```text
//!        1
//!      ↗ │ ↘
//!    0   │   3
//!      ↘ ↓ ↗
//!        2
//! ```
//!
//! The northern arm is short but signalled; the southern arm is longer and
//! signalled near the exit; `1 -> 2` is a narrow cut-through.

use std::io::Cursor;

use anyhow::Result;

use nt_network::{EdgeRecord, load_edges_text};

// from to
// v0 has_lights light_on_sec light_off_sec length alpha beta [lanes]
const DEMO_EDGES: &str = "\
0 1
60 1 30 60 1000 1 0
1 3
60 0 0 0 800 1 0
0 2
50 0 0 0 1200 1 0 2
2 3
50 1 40 40 900 1 0 2
1 2
40 0 0 0 300 1 0 1
";

pub fn demo_records() -> Result<Vec<EdgeRecord>> {
    Ok(load_edges_text(Cursor::new(DEMO_EDGES))?)
}
