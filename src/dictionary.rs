//! Byte-wise prefix tree from station name to [`Measurement`]. Children are
//! visited in ascending edge byte, so a pre-order walk is already sorted.

use crate::error::RecordError;
use crate::measurement::Measurement;
use crate::record::MAX_STATION_LEN;

const NO_CHILD: u8 = u8::MAX;
const SEMICOLON: u8 = 59;
const FANOUT: usize = NO_CHILD as usize;

#[derive(Debug)]
struct Entry {
    station: Box<[u8]>,
    measurement: Measurement,
}

/// `slots` maps an edge byte to its index in `children` (appended in
/// first-seen order); `edges` holds the same bytes kept sorted.
#[derive(Debug)]
struct Node {
    slots: [u8; FANOUT],
    edges: Vec<u8>,
    children: Vec<Node>,
    /// Set once some station ends exactly at this node. A terminal node may
    /// still have children: `AB` and `ABC` share the path up to `B`.
    entry: Option<Entry>,
}

impl Node {
    fn new() -> Self {
        Self { slots: [NO_CHILD; FANOUT], edges: Vec::new(), children: Vec::new(), entry: None }
    }

    #[inline]
    fn child(&self, byte: u8) -> Option<&Node> {
        match self.slots[byte as usize] {
            NO_CHILD => None,
            slot => Some(&self.children[slot as usize]),
        }
    }

    /// Returns the child behind `byte`, creating it if needed. The flag is
    /// true when a node was created.
    #[inline]
    fn child_or_insert(&mut self, byte: u8) -> (&mut Node, bool) {
        match self.slots[byte as usize] {
            NO_CHILD => {
                let slot = self.children.len();
                self.children.push(Node::new());
                self.slots[byte as usize] = slot as u8;
                insert_sorted(&mut self.edges, byte);
                (&mut self.children[slot], true)
            }
            slot => (&mut self.children[slot as usize], false),
        }
    }
}

/// Inserts `byte` into the ascending `edges`, keeping them ascending.
fn insert_sorted(edges: &mut Vec<u8>, byte: u8) {
    if let Err(position) = edges.binary_search(&byte) {
        edges.insert(position, byte);
    }
}

/// Station dictionary for one aggregation run.
///
/// Nodes are created lazily and never removed. Not synchronised: all
/// [`resolve`](StationTrie::resolve) calls must come from one thread.
#[derive(Debug)]
pub struct StationTrie {
    root: Node,
    stations: usize,
    nodes: usize,
}

impl StationTrie {
    pub fn new() -> Self {
        Self { root: Node::new(), stations: 0, nodes: 1 }
    }

    /// Looks up the measurement for `station`, creating an empty one on first
    /// sight.
    ///
    /// The same name always resolves to the same measurement. A freshly
    /// created measurement has `count == 0` until the caller updates it, and
    /// is not emitted until then.
    ///
    /// Fails for an empty name, a name longer than [`MAX_STATION_LEN`] or one
    /// containing `;` or byte 255. Nodes created before the failing byte stay
    /// in the tree but carry no entry.
    pub fn resolve(&mut self, station: &[u8]) -> Result<&mut Measurement, RecordError> {
        if station.is_empty() || station.len() > MAX_STATION_LEN {
            return Err(RecordError::InvalidStationLength(station.len()));
        }

        let mut node = &mut self.root;
        for &byte in station {
            match byte {
                NO_CHILD => return Err(RecordError::ReservedByte),
                SEMICOLON => return Err(RecordError::SeparatorInStation),
                _ => {}
            }
            let (child, created) = node.child_or_insert(byte);
            self.nodes += created as usize;
            node = child;
        }

        if node.entry.is_none() {
            self.stations += 1;
        }
        let entry = node.entry.get_or_insert_with(|| Entry {
            station: station.into(),
            measurement: Measurement::default(),
        });
        Ok(&mut entry.measurement)
    }

    pub fn get(&self, station: &[u8]) -> Option<&Measurement> {
        let mut node = &self.root;
        for &byte in station {
            if byte == NO_CHILD {
                return None;
            }
            node = node.child(byte)?;
        }
        node.entry.as_ref().map(|entry| &entry.measurement)
    }

    /// Number of distinct stations resolved so far, including any that were
    /// resolved but never updated and so are not emitted by [`iter`](Self::iter).
    pub fn len(&self) -> usize {
        self.stations
    }

    pub fn is_empty(&self) -> bool {
        self.stations == 0
    }

    /// Number of nodes including the root.
    pub fn node_count(&self) -> usize {
        self.nodes
    }

    /// Walks the tree once, yielding stations with at least one observation in
    /// ascending byte order.
    pub fn iter(&self) -> Iter<'_> {
        let mut stack = Vec::with_capacity(MAX_STATION_LEN + 1);
        stack.push((&self.root, 0));
        Iter { stack }
    }
}

impl Default for StationTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a StationTrie {
    type Item = (&'a [u8], &'a Measurement);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Depth-first pre-order walk over a [`StationTrie`].
///
/// Each stack frame is a node and the position of the next edge to descend.
pub struct Iter<'a> {
    stack: Vec<(&'a Node, usize)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a [u8], &'a Measurement);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, cursor) = self.stack.last_mut()?;
            let node: &'a Node = *node;

            let Some(&byte) = node.edges.get(*cursor) else {
                self.stack.pop();
                continue;
            };
            *cursor += 1;

            let child = &node.children[node.slots[byte as usize] as usize];
            self.stack.push((child, 0));

            if let Some(entry) = &child.entry {
                if !entry.measurement.is_empty() {
                    return Some((&entry.station[..], &entry.measurement));
                }
            }
        }
    }
}

impl std::iter::FusedIterator for Iter<'_> {}
