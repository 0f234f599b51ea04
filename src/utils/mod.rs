pub mod logging;
pub mod memo;

pub use logging::truncate_text;
pub use memo::Memo;
