pub mod text;

pub use text::clean_text;
