//! Pixel hits from CSV.
//!
//! ```text
//! event,detector,x,y,signal,time
//! 0,plane1,10,20,1500,3.5
//! ```
//!
//! `time` is the local hit time in ns and may be omitted.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use pixgear::event::{PixelHit, PixelHitMessage};

#[derive(Debug, Deserialize)]
struct HitRow {
    event: u64,
    detector: String,
    x: u32,
    y: u32,
    signal: f64,
    #[serde(default)]
    time: f64,
}

/// Hits grouped per event, then per detector in first-appearance order
#[derive(Debug, Default)]
pub struct HitTable {
    events: BTreeMap<u64, Vec<PixelHitMessage>>,
    hits: usize,
}

impl HitTable {
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open hit file: {}", path.display()))?;
        Self::from_reader(file).with_context(|| format!("Failed to read hits from {}", path.display()))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut table = Self::default();
        let mut rows = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        for (line, row) in rows.deserialize::<HitRow>().enumerate() {
            let row = row.with_context(|| format!("Invalid hit record {}", line + 1))?;
            table.push(row);
        }
        Ok(table)
    }

    fn push(&mut self, row: HitRow) {
        let hit = PixelHit::new(row.x, row.y, row.signal).with_time(row.time, row.time);
        let messages = self.events.entry(row.event).or_default();
        match messages.iter_mut().find(|m| m.detector == row.detector) {
            Some(message) => message.hits.push(hit),
            None => messages.push(PixelHitMessage::new(row.detector, vec![hit])),
        }
        self.hits += 1;
    }

    /// First and last event number, if any hits were read
    pub fn event_range(&self) -> Option<(u64, u64)> {
        let first = *self.events.keys().next()?;
        let last = *self.events.keys().next_back()?;
        Some((first, last))
    }

    /// Messages of one event
    pub fn messages(&self, event: u64) -> Option<&[PixelHitMessage]> {
        self.events.get(&event).map(Vec::as_slice)
    }

    pub fn hit_count(&self) -> usize {
        self.hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_event_and_detector() {
        let csv = "event,detector,x,y,signal,time\n\
                   3,plane1,10,20,1500,3.5\n\
                   1,plane0,1,2,900,0\n\
                   3,plane0,5,6,700,1\n\
                   3,plane1,11,20,300,3.6\n";
        let table = HitTable::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.hit_count(), 4);
        assert_eq!(table.event_range(), Some((1, 3)));
        assert!(table.messages(2).is_none());

        let event = table.messages(3).unwrap();
        assert_eq!(event.len(), 2);
        assert_eq!(event[0].detector, "plane1");
        assert_eq!(event[0].hits.len(), 2);
        assert_eq!(event[0].hits[1].x, 11);
        assert_eq!(event[0].hits[0].local_time, 3.5);
        assert_eq!(event[1].detector, "plane0");
    }

    #[test]
    fn test_time_column_optional() {
        let csv = "event,detector,x,y,signal\n0, plane0 ,1,2,10\n";
        let table = HitTable::from_reader(csv.as_bytes()).unwrap();
        let hits = table.messages(0).unwrap();
        assert_eq!(hits[0].detector, "plane0");
        assert_eq!(hits[0].hits[0].local_time, 0.0);
    }

    #[test]
    fn test_empty_and_invalid_input() {
        let table = HitTable::from_reader("event,detector,x,y,signal,time\n".as_bytes()).unwrap();
        assert_eq!(table.event_range(), None);

        let bad = "event,detector,x,y,signal,time\n0,plane0,-1,2,10,0\n";
        assert!(HitTable::from_reader(bad.as_bytes()).is_err());
    }
}
