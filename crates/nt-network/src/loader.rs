//! Edge-record loaders.
//!
//! # Text format
//!
//! Two whitespace-separated lines per directed edge:
//!
//! ```text
//! 0 1
//! 60 1 30 60 1000 1 0
//! ```
//!
//! | Line | Fields                                                           |
//! |------|------------------------------------------------------------------|
//! | 1    | `from to`                                                        |
//! | 2    | `v0 has_lights light_on_sec light_off_sec length alpha beta [lanes]` |
//!
//! `v0` is in km/h, `length` in metres, `has_lights` is `0` or `1`, and
//! `lanes` defaults to 4.  Blank lines are skipped.  Reading stops at end of
//! input **or at the first malformed record**; everything read before that
//! point is returned.
//!
//! # CSV format
//!
//! ```csv
//! from,to,v0,has_lights,light_on_sec,light_off_sec,length,alpha,beta,lanes
//! 0,1,60,1,30,60,1000,1,0,4
//! ```
//!
//! The `lanes` column is optional.  Unlike the text loader, a bad CSV row is
//! an error.

use std::io::{BufRead, Read};
use std::path::Path;

use serde::Deserialize;

use nt_core::RoadModelConfig;
use nt_road::{LoadMap, RoadError, RoadResult, RoadSegment, TrafficLight};

use crate::{NetworkError, NetworkResult};

/// Lane count assumed when a record does not give one.
pub const DEFAULT_LANES: u32 = 4;

fn default_lanes() -> u32 {
    DEFAULT_LANES
}

// ── EdgeRecord ────────────────────────────────────────────────────────────────

/// One directed edge as read from input, before validation.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EdgeRecord {
    pub from:          u32,
    pub to:            u32,
    /// Free-flow speed, km/h.
    pub v0:            f64,
    /// `1` if the edge ends at a traffic light, else `0`.
    pub has_lights:    u8,
    pub light_on_sec:  f64,
    pub light_off_sec: f64,
    /// Metres.
    pub length:        f64,
    pub alpha:         f64,
    pub beta:          f64,
    #[serde(default = "default_lanes")]
    pub lanes:         u32,
}

impl EdgeRecord {
    /// Validate the record and turn it into a segment evaluated under
    /// `model`.
    pub fn to_segment(&self, model: RoadModelConfig) -> RoadResult<RoadSegment> {
        let enabled = match self.has_lights {
            0 => false,
            1 => true,
            n => {
                return Err(RoadError::InvalidSegment(format!(
                    "has_lights must be 0 or 1, got {n}"
                )));
            }
        };
        if !(self.light_on_sec >= 0.0 && self.light_off_sec >= 0.0) {
            return Err(RoadError::InvalidSegment(format!(
                "light phases must be non-negative, got {}/{}",
                self.light_on_sec, self.light_off_sec
            )));
        }
        Ok(RoadSegment::new(self.v0, self.lanes, self.length)?
            .with_light(TrafficLight {
                enabled,
                on_secs:  self.light_on_sec,
                off_secs: self.light_off_sec,
            })
            .with_load_map(LoadMap { alpha: self.alpha, beta: self.beta })
            .with_model(model))
    }
}

// ── Text loader ───────────────────────────────────────────────────────────────

/// Read edge records in the two-line text format until input ends or a
/// record is malformed.
///
/// Only I/O failures are errors.  A malformed record ends the sequence and
/// is reported with `tracing::warn!`.
pub fn load_edges_text<R: BufRead>(reader: R) -> NetworkResult<Vec<EdgeRecord>> {
    let mut records = Vec::new();
    let mut lines = reader.lines().enumerate().filter(|(_, l)| {
        l.as_ref().map(|s| !s.trim().is_empty()).unwrap_or(true)
    });

    loop {
        let Some((head_no, head)) = lines.next() else { break };
        let head = head?;
        let Some((_, body)) = lines.next() else {
            tracing::warn!(line = head_no + 1, "edge header without parameter line; stopping");
            break;
        };
        let body = body?;

        match parse_record(&head, &body) {
            Ok(record) => records.push(record),
            Err(reason) => {
                tracing::warn!(line = head_no + 1, %reason, "malformed edge record; stopping");
                break;
            }
        }
    }

    tracing::debug!(edges = records.len(), "loaded edge records");
    Ok(records)
}

fn parse_record(head: &str, body: &str) -> Result<EdgeRecord, String> {
    let ends: Vec<&str> = head.split_whitespace().collect();
    let [from, to] = ends.as_slice() else {
        return Err(format!("expected `from to`, got {head:?}"));
    };
    let from = parse_field::<u32>(from, "from")?;
    let to = parse_field::<u32>(to, "to")?;

    let fields: Vec<&str> = body.split_whitespace().collect();
    if !(fields.len() == 7 || fields.len() == 8) {
        return Err(format!("expected 7 or 8 edge parameters, got {}", fields.len()));
    }
    let has_lights = parse_field::<u8>(fields[1], "has_lights")?;
    if has_lights > 1 {
        return Err(format!("has_lights must be 0 or 1, got {has_lights}"));
    }

    Ok(EdgeRecord {
        from,
        to,
        v0:            parse_field(fields[0], "v0")?,
        has_lights,
        light_on_sec:  parse_field(fields[2], "light_on_sec")?,
        light_off_sec: parse_field(fields[3], "light_off_sec")?,
        length:        parse_field(fields[4], "length")?,
        alpha:         parse_field(fields[5], "alpha")?,
        beta:          parse_field(fields[6], "beta")?,
        lanes:         match fields.get(7) {
            Some(s) => parse_field(s, "lanes")?,
            None => DEFAULT_LANES,
        },
    })
}

fn parse_field<T: std::str::FromStr>(s: &str, name: &str) -> Result<T, String> {
    s.parse::<T>().map_err(|_| format!("invalid {name} {s:?}"))
}

// ── CSV loader ────────────────────────────────────────────────────────────────

/// Load edge records from a CSV file with a header row.
pub fn load_edges_csv(path: &Path) -> NetworkResult<Vec<EdgeRecord>> {
    let file = std::fs::File::open(path).map_err(NetworkError::Io)?;
    load_edges_reader(file)
}

/// Like [`load_edges_csv`] but accepts any `Read` source.
pub fn load_edges_reader<R: Read>(reader: R) -> NetworkResult<Vec<EdgeRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<EdgeRecord>()
        .map(|row| row.map_err(|e| NetworkError::Parse(e.to_string())))
        .collect()
}
