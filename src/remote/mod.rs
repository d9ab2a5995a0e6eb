//! Remote side: base-address state, listing parsing, and the transfer client

pub mod client;
pub mod listing;
pub mod url;
