//! Capture-group OPEN/CLOSE events carried by `Marker` terms.

/// Which boundary of a capture group a `Marker` denotes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum EventKind {
    Open,
    Close,
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Event {
    pub kind: EventKind,
    pub gid: u32,
}

impl Event {
    pub fn open(gid: u32) -> Event {
        Event { kind: EventKind::Open, gid }
    }

    pub fn close(gid: u32) -> Event {
        Event { kind: EventKind::Close, gid }
    }
}
