//! Nintendo cartridge-header formats.
//!
//! Concrete format declarations for the `cartkit-core` structure codec.
//! Currently:
//!
//! - Game Boy / Game Boy Color cartridge headers

pub mod cp437;
pub mod gameboy;

pub use gameboy::{DestinationCode, GameBoyFormat, RamSize, RomSize};
