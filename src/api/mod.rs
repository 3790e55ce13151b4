//! Clients for external data providers.

pub mod alchemy;
