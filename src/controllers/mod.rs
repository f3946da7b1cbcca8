pub mod chunks;
pub mod narration;
