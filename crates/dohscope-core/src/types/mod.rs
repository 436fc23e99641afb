mod common;
mod dns;
mod record_type;

pub use common::*;
pub use dns::*;
pub use record_type::*;
