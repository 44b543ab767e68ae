pub mod constants;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod frame;
pub mod headers;
pub mod reader;
pub mod schema;
pub mod text_format;


// Re-export the entry points for easy access
pub use dispatch::{Decoded, Dispatcher, Summary, run};
pub use error::DumpError;
pub use event::NetEvent;
