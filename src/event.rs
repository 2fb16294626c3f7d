use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::error::EventFileError;
use crate::momentum::FourMomentum;

#[derive(Clone, PartialEq, PartialOrd, Debug, Default)]
pub struct Event {
    pub constituents: Vec<FourMomentum>,
}

/// Read all events from a file
///
/// See [read_events] for the format.
pub fn import(filename: &Path) -> Result<Vec<Event>, EventFileError> {
    debug!("Importing events from {:?}", filename);
    let file = File::open(filename)?;
    read_events(BufReader::new(file))
}

/// Read events in plain text format
///
/// Each line holds the four components `px py pz E` of one
/// constituent. Events are separated by blank lines, lines starting
/// with `#` are ignored.
pub fn read_events<R: BufRead>(reader: R) -> Result<Vec<Event>, EventFileError> {
    let mut events = Vec::new();
    let mut current = Event::default();
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.starts_with('#') {
            continue;
        }
        if line.is_empty() {
            if !current.constituents.is_empty() {
                events.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.constituents.push(parse_momentum(line, n + 1)?);
    }
    if !current.constituents.is_empty() {
        events.push(current);
    }
    debug!("Read {} events", events.len());
    Ok(events)
}

fn parse_momentum(line: &str, line_nr: usize) -> Result<FourMomentum, EventFileError> {
    let mut p = [0f64; 4];
    let mut entries = line.split_whitespace();
    for component in p.iter_mut() {
        let Some(entry) = entries.next() else {
            return Err(EventFileError::WrongComponentCount {
                line: line_nr,
                content: line.to_owned(),
            });
        };
        *component = entry.parse().map_err(|_| EventFileError::BadNumber {
            line: line_nr,
            content: entry.to_owned(),
        })?;
    }
    if entries.next().is_some() {
        return Err(EventFileError::WrongComponentCount {
            line: line_nr,
            content: line.to_owned(),
        });
    }
    Ok(p.into())
}
