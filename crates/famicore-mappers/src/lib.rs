//! Cartridge handling for the famicore NES emulator.
//!
//! This crate parses iNES images and implements the cartridge side of the
//! console: the mapper trait, the NROM and UxROM boards, and the cartridge
//! slot that routes CPU accesses to SRAM or the mapper.

mod cartridge;
mod mapper;
mod nrom;
mod rom;
mod uxrom;

pub use cartridge::{Cartridge, MapperError, SRAM_SIZE};
pub use mapper::{Mapper, Mirroring};
pub use nrom::Nrom;
pub use rom::{Rom, RomError, RomHeader, CHR_BANK_SIZE, PRG_BANK_SIZE};
pub use uxrom::Uxrom;
