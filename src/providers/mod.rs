//! Ticker provider implementations

pub mod blockchain_info;

pub use blockchain_info::BlockchainInfoProvider;
