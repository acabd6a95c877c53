//! Renders `{a=min/mean/max, b=min/mean/max, ...}` from a finished dictionary.

use std::io::{self, Write};
use std::sync::mpsc;
use std::thread;

use crate::dictionary::StationTrie;
use crate::measurement::Measurement;

pub fn write_summary<W: Write>(stations: &StationTrie, out: &mut W) -> io::Result<()> {
    write_entries(stations.iter().map(|(station, measurement)| (station, *measurement)), out)
}

/// Same output as [`write_summary`], with the tree walk on a separate thread
/// feeding a channel of `capacity` entries while this thread formats.
///
/// The walk blocks while the channel is full. If writing fails the channel
/// closes and the walk stops early.
pub fn write_summary_pipelined<W: Write>(
    stations: &StationTrie,
    out: &mut W,
    capacity: usize,
) -> io::Result<()> {
    let (sender, receiver) = mpsc::sync_channel::<(&[u8], Measurement)>(capacity);

    thread::scope(|scope| {
        scope.spawn(move || {
            for (station, measurement) in stations {
                if sender.send((station, *measurement)).is_err() {
                    break;
                }
            }
        });
        write_entries(receiver.into_iter(), out)
    })
}

fn write_entries<'a, W: Write>(
    entries: impl Iterator<Item = (&'a [u8], Measurement)>,
    out: &mut W,
) -> io::Result<()> {
    out.write_all(b"{")?;
    for (index, (station, measurement)) in entries.enumerate() {
        if index > 0 {
            out.write_all(b", ")?;
        }
        out.write_all(station)?;
        write!(out, "={measurement}")?;
    }
    out.write_all(b"}")
}
