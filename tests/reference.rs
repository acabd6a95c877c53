//! Checks the trie pipeline against a plain hash-then-sort aggregation.

use ahash::RandomState;
use brc_trie::ingest::ingest_reader;
use brc_trie::summary::write_summary;
use brc_trie::temperature::Tenths;
use brc_trie::Config;
use hashbrown::HashMap;
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
struct Reference {
    minimum: i16,
    maximum: i16,
    sum: i64,
    count: i64,
}

type ReferenceMap = HashMap<Box<[u8]>, Reference, RandomState>;

fn reference_summary(records: &[(Vec<u8>, i16)]) -> Vec<u8> {
    let mut measurements: ReferenceMap = HashMap::default();
    for (station, value) in records {
        measurements
            .entry_ref(station.as_slice())
            .and_modify(|entry| {
                entry.minimum = entry.minimum.min(*value);
                entry.maximum = entry.maximum.max(*value);
                entry.sum += *value as i64;
                entry.count += 1;
            })
            .or_insert(Reference { minimum: *value, maximum: *value, sum: *value as i64, count: 1 });
    }

    let mut sorted: Vec<_> = measurements.into_iter().collect();
    sorted.sort_unstable_by(|a, b| a.0.cmp(&b.0));

    let mut out = b"{".to_vec();
    for (index, (station, entry)) in sorted.iter().enumerate() {
        if index > 0 {
            out.extend_from_slice(b", ");
        }
        let mean = (2 * entry.sum + entry.count).div_euclid(2 * entry.count);
        out.extend_from_slice(station);
        out.extend_from_slice(
            format!("={}/{}/{}", Tenths(entry.minimum as i64), Tenths(mean), Tenths(entry.maximum as i64))
                .as_bytes(),
        );
    }
    out.push(b'}');
    out
}

fn station() -> impl Strategy<Value = Vec<u8>> {
    // A small alphabet so that names often share prefixes or are prefixes of
    // each other.
    let byte = prop::sample::select(vec![b'A', b'B', b'a', b' ', b'.', b'-', 0xc3, 0xa9, 0x01, 0xfe]);
    prop::collection::vec(byte, 1..6)
}

fn records() -> impl Strategy<Value = Vec<(Vec<u8>, i16)>> {
    prop::collection::vec((station(), -999i16..=999), 0..300)
}

fn encode(records: &[(Vec<u8>, i16)]) -> Vec<u8> {
    let mut input = Vec::new();
    for (station, value) in records {
        input.extend_from_slice(station);
        input.extend_from_slice(format!(";{}\n", Tenths(*value as i64)).as_bytes());
    }
    input
}

proptest! {
    #[test]
    fn matches_hash_then_sort(records in records(), block_size in 107usize..512) {
        let input = encode(&records);
        let mut config = Config::new("unused");
        config.block_size = block_size;

        let stations = ingest_reader(input.as_slice(), &config).unwrap();
        let mut out = Vec::new();
        write_summary(&stations, &mut out).unwrap();

        prop_assert_eq!(bstr::BString::from(out), bstr::BString::from(reference_summary(&records)));
    }

    #[test]
    fn emission_is_sorted_and_complete(records in records()) {
        let input = encode(&records);
        let stations = ingest_reader(input.as_slice(), &Config::new("unused")).unwrap();

        let emitted: Vec<&[u8]> = stations.iter().map(|(station, _)| station).collect();
        let mut expected: Vec<&[u8]> = records.iter().map(|(station, _)| station.as_slice()).collect();
        expected.sort_unstable();
        expected.dedup();

        prop_assert_eq!(emitted, expected);
        prop_assert_eq!(stations.len(), stations.iter().count());
    }
}
