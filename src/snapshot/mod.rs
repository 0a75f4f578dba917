pub mod diff;
pub mod serialize;
pub mod writer;

pub use diff::{Segment, SegmentKind, diff_lines};
pub use serialize::{serialize_state, snapshot_matches};
pub use writer::SnapshotWriter;
