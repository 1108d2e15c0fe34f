pub mod ordering;
pub mod storage;
pub mod video;

pub use ordering::{Ordered, PositionUpdate, Reconciliation, ReorderError};
pub use video::{PlayableDescriptor, VideoKind, VideoReference, VideoSource};
