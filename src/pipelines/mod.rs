pub(crate) mod cache;
pub(crate) mod utils;

pub mod sentiment;
