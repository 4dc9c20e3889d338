//! Trading post price provider implementations

pub mod gw2;

pub use gw2::Gw2CommerceProvider;
