//! Cartridge slot: outer CPU-side address routing around a mapper.
//!
//! The mapper trait only sees the banked windows. Everything else a
//! cartridge answers for on the CPU bus is handled here: battery SRAM at
//! `$6000-$7FFF`, the unimplemented expansion ROM region, and the loud
//! failure for addresses that should never have been routed to the
//! cartridge in the first place.

use crate::{Mapper, Mirroring, Nrom, Rom, Uxrom};

/// Size of the battery-backed SRAM window.
pub const SRAM_SIZE: usize = 8192;

/// Errors raised when wiring a parsed ROM into a mapper.
#[derive(Debug, thiserror::Error)]
pub enum MapperError {
    /// The image declares a mapper this core does not implement.
    #[error("unsupported mapper {0}")]
    Unsupported(u8),
}

/// A cartridge plugged into the console: concrete mapper plus SRAM.
pub struct Cartridge {
    mapper: Box<dyn Mapper>,
    sram: Vec<u8>,
    has_battery: bool,
}

impl Cartridge {
    /// Wire a parsed ROM into its mapper.
    pub fn new(rom: &Rom) -> Result<Self, MapperError> {
        let mapper: Box<dyn Mapper> = match rom.header.mapper {
            0 => Box::new(Nrom::new(rom)),
            2 => Box::new(Uxrom::new(rom)),
            id => return Err(MapperError::Unsupported(id)),
        };

        Ok(Self {
            mapper,
            sram: vec![0; SRAM_SIZE],
            has_battery: rom.header.has_battery,
        })
    }

    /// Read from the cartridge's CPU window (`$4020-$FFFF`).
    ///
    /// Anything below `$4020` reaching here is a bus-routing bug: fatal in
    /// debug builds, an ignored open read in release.
    pub fn read(&self, addr: u16) -> u8 {
        debug_assert!(addr >= 0x4020, "cartridge read below $4020: ${addr:04X}");
        match addr {
            0x4020..=0x5FFF => 0, // expansion ROM, unimplemented
            0x6000..=0x7FFF => self.sram[(addr - 0x6000) as usize],
            0x8000..=0xFFFF => self.mapper.read_prg(addr),
            _ => {
                log::warn!("cartridge read below $4020: ${addr:04X}");
                0
            }
        }
    }

    /// Write to the cartridge's CPU window (`$4020-$FFFF`).
    pub fn write(&mut self, addr: u16, value: u8) {
        debug_assert!(addr >= 0x4020, "cartridge write below $4020: ${addr:04X}");
        match addr {
            0x4020..=0x5FFF => {} // expansion ROM, unimplemented
            0x6000..=0x7FFF => self.sram[(addr - 0x6000) as usize] = value,
            0x8000..=0xFFFF => self.mapper.write_prg(addr, value),
            _ => log::warn!("cartridge write below $4020: ${addr:04X}"),
        }
    }

    /// Read CHR memory (PPU `$0000-$1FFF`).
    #[inline]
    pub fn read_chr(&self, addr: u16) -> u8 {
        self.mapper.read_chr(addr)
    }

    /// Write CHR memory (PPU `$0000-$1FFF`).
    #[inline]
    pub fn write_chr(&mut self, addr: u16, value: u8) {
        self.mapper.write_chr(addr, value);
    }

    /// Nametable mirroring wired by the cartridge.
    #[inline]
    pub fn mirroring(&self) -> Mirroring {
        self.mapper.mirroring()
    }

    /// iNES mapper number of the plugged board.
    pub fn mapper_number(&self) -> u8 {
        self.mapper.mapper_number()
    }

    /// True when the SRAM is battery backed.
    pub fn has_battery(&self) -> bool {
        self.has_battery
    }

    /// Battery SRAM contents, for the host to persist.
    pub fn sram(&self) -> &[u8] {
        &self.sram
    }

    /// Restore battery SRAM contents.
    pub fn load_sram(&mut self, data: &[u8]) {
        let len = data.len().min(self.sram.len());
        self.sram[..len].copy_from_slice(&data[..len]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RomHeader, CHR_BANK_SIZE, PRG_BANK_SIZE};

    fn test_rom(mapper: u8) -> Rom {
        Rom {
            header: RomHeader {
                prg_banks: 2,
                chr_banks: 1,
                mapper,
                mirroring: Mirroring::Horizontal,
                has_battery: false,
                has_trainer: false,
                prg_ram_banks: 1,
            },
            prg_rom: vec![0xEA; 2 * PRG_BANK_SIZE],
            chr_rom: vec![0; CHR_BANK_SIZE],
        }
    }

    #[test]
    fn dispatches_known_mappers() {
        assert_eq!(Cartridge::new(&test_rom(0)).unwrap().mapper_number(), 0);

        let mut uxrom = test_rom(2);
        uxrom.header.chr_banks = 0;
        uxrom.chr_rom = Vec::new();
        assert_eq!(Cartridge::new(&uxrom).unwrap().mapper_number(), 2);
    }

    #[test]
    fn rejects_unknown_mapper() {
        assert!(matches!(
            Cartridge::new(&test_rom(4)),
            Err(MapperError::Unsupported(4))
        ));
    }

    #[test]
    fn sram_round_trip() {
        let mut cart = Cartridge::new(&test_rom(0)).unwrap();

        cart.write(0x6000, 0x42);
        cart.write(0x7FFF, 0x55);
        assert_eq!(cart.read(0x6000), 0x42);
        assert_eq!(cart.read(0x7FFF), 0x55);
    }

    #[test]
    fn expansion_rom_is_inert() {
        let mut cart = Cartridge::new(&test_rom(0)).unwrap();

        cart.write(0x4020, 0x42);
        assert_eq!(cart.read(0x4020), 0);
        assert_eq!(cart.read(0x5FFF), 0);
    }

    #[test]
    fn sram_persistence_helpers() {
        let mut cart = Cartridge::new(&test_rom(0)).unwrap();

        cart.write(0x6000, 0x99);
        let saved = cart.sram().to_vec();

        let mut restored = Cartridge::new(&test_rom(0)).unwrap();
        restored.load_sram(&saved);
        assert_eq!(restored.read(0x6000), 0x99);
    }
}
