pub mod bucket;
pub mod slot_table;

pub use bucket::BucketSelector;
pub use slot_table::{MissOutcome, Slot, SlotTable};
