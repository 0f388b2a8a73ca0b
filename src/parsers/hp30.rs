//! GFZ Potsdam `Hp30_ap30_nowcast.txt` reader.
//!
//! ```text
//! # YYYY MM DD hh.h hh._m days days_m Hp30 ap30 D
//! 2024 05 13 13.50 13.75 27162.56250 27162.57292 3.333 18 0
//! ```

use std::io::BufRead;

use chrono::{DateTime, TimeZone, Utc};
use tracing::{debug, warn};

use crate::domain::HpEntry;
use crate::errors::ParseError;

const FIELDS_PER_LINE: usize = 10;

/// Values at or below this mark samples GFZ has not populated yet.
pub const UNPOPULATED_THRESHOLD: f64 = -0.5;

/// Reads every valid sample, in file order.
///
/// Comment lines are skipped, malformed lines are logged and skipped, and
/// unpopulated samples are dropped. Only a failing reader is an error.
pub fn parse_hp30<R: BufRead>(reader: R) -> Result<Vec<HpEntry>, ParseError> {
    let mut entries = Vec::new();

    for (index, raw) in reader.split(b'\n').enumerate() {
        let raw = raw?;
        let Ok(line) = std::str::from_utf8(&raw) else {
            warn!("Invalid Hp30 line {}: not UTF-8", index + 1);
            continue;
        };
        let line = line.trim_end_matches('\r');
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }

        match parse_line(line) {
            Ok(entry) if entry.hp30 > UNPOPULATED_THRESHOLD => entries.push(entry),
            Ok(_) => {}
            Err(reason) => warn!("Invalid Hp30 line {}: {} ({:?})", index + 1, reason, line),
        }
    }

    debug!("Parsed {} Hp30 entries", entries.len());
    Ok(entries)
}

fn parse_line(line: &str) -> Result<HpEntry, &'static str> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != FIELDS_PER_LINE {
        return Err("expected 10 fields");
    }

    let year: i32 = tokens[0].parse().map_err(|_| "bad year")?;
    let month: u32 = tokens[1].parse().map_err(|_| "bad month")?;
    let day: u32 = tokens[2].parse().map_err(|_| "bad day")?;
    let hours: f64 = tokens[3].parse().map_err(|_| "bad hour")?;

    let time = timestamp(year, month, day, hours).ok_or("invalid timestamp")?;
    let hp30 = tokens[7].parse().map_err(|_| "bad Hp30 value")?;
    let ap30 = tokens[8].parse().map_err(|_| "bad ap30 value")?;

    Ok(HpEntry { time, hp30, ap30 })
}

/// `13.5` on a given day is 13:30 UTC.
fn timestamp(year: i32, month: u32, day: u32, hours: f64) -> Option<DateTime<Utc>> {
    if !(0.0..24.0).contains(&hours) {
        return None;
    }
    let hour = hours.floor() as u32;
    let minute = ((hours * 60.0) % 60.0) as u32;
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
}
