mod album;
mod feed;
mod id_types;
mod moment;
pub use album::*;
pub use feed::*;
pub use id_types::*;
pub use moment::*;

mod util;
pub use util::parse_timestamp;
