//! Mapper 0: NROM
//!
//! The simplest cartridge board: no bank switching at all.
//!
//! ```text
//! CPU:
//! $8000-$BFFF: first 16 KiB of PRG-ROM
//! $C000-$FFFF: second 16 KiB (NROM-256) or a mirror of the first (NROM-128)
//!
//! PPU:
//! $0000-$1FFF: 8 KiB CHR-ROM or CHR-RAM, no banking
//! ```

use crate::{Mapper, Mirroring, Rom};

/// NROM mapper implementation (mapper 0).
pub struct Nrom {
    prg_rom: Vec<u8>,
    chr: Vec<u8>,
    chr_writable: bool,
    mirroring: Mirroring,
}

impl Nrom {
    /// Build an NROM mapper from a parsed ROM.
    #[must_use]
    pub fn new(rom: &Rom) -> Self {
        let chr_writable = rom.has_chr_ram();
        let chr = if chr_writable {
            vec![0; crate::CHR_BANK_SIZE]
        } else {
            rom.chr_rom.clone()
        };

        Self {
            prg_rom: rom.prg_rom.clone(),
            chr,
            chr_writable,
            mirroring: rom.header.mirroring,
        }
    }
}

impl Mapper for Nrom {
    fn read_prg(&self, addr: u16) -> u8 {
        debug_assert!(addr >= 0x8000, "PRG read below window: ${addr:04X}");

        let offset = (addr - 0x8000) as usize;
        // NROM-128 mirrors its single bank across both windows; NROM-256
        // maps $C000-$FFFF straight into the second bank.
        if self.prg_rom.len() == crate::PRG_BANK_SIZE {
            self.prg_rom[offset & 0x3FFF]
        } else {
            self.prg_rom[offset]
        }
    }

    fn write_prg(&mut self, _addr: u16, _value: u8) {
        // No registers; PRG writes are silently ignored.
    }

    fn read_chr(&self, addr: u16) -> u8 {
        debug_assert!(addr <= 0x1FFF, "CHR read outside window: ${addr:04X}");
        self.chr[addr as usize]
    }

    fn write_chr(&mut self, addr: u16, value: u8) {
        debug_assert!(addr <= 0x1FFF, "CHR write outside window: ${addr:04X}");
        if self.chr_writable {
            self.chr[addr as usize] = value;
        }
    }

    fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    fn mapper_number(&self) -> u8 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RomHeader, CHR_BANK_SIZE, PRG_BANK_SIZE};

    fn test_rom(prg_banks: u8, chr_banks: u8) -> Rom {
        Rom {
            header: RomHeader {
                prg_banks,
                chr_banks,
                mapper: 0,
                mirroring: Mirroring::Horizontal,
                has_battery: false,
                has_trainer: false,
                prg_ram_banks: 1,
            },
            prg_rom: vec![0; prg_banks as usize * PRG_BANK_SIZE],
            chr_rom: vec![0; chr_banks as usize * CHR_BANK_SIZE],
        }
    }

    #[test]
    fn nrom_256_maps_both_windows() {
        let mut rom = test_rom(2, 1);
        rom.prg_rom[0x0000] = 0x42;
        rom.prg_rom[0x4000] = 0x55;
        rom.prg_rom[0x7FFF] = 0x66;

        let mapper = Nrom::new(&rom);
        assert_eq!(mapper.read_prg(0x8000), 0x42);
        assert_eq!(mapper.read_prg(0xC000), 0x55);
        assert_eq!(mapper.read_prg(0xFFFF), 0x66);
    }

    #[test]
    fn nrom_128_mirrors_upper_window() {
        let mut rom = test_rom(1, 1);
        rom.prg_rom[0x0000] = 0x42;
        rom.prg_rom[0x3FFF] = 0x55;

        let mapper = Nrom::new(&rom);
        assert_eq!(mapper.read_prg(0x8000), 0x42);
        assert_eq!(mapper.read_prg(0xBFFF), 0x55);
        assert_eq!(mapper.read_prg(0xC000), 0x42);
        assert_eq!(mapper.read_prg(0xFFFF), 0x55);
    }

    #[test]
    fn prg_writes_ignored() {
        let mut rom = test_rom(1, 1);
        rom.prg_rom[0] = 0xAA;
        let mut mapper = Nrom::new(&rom);

        mapper.write_prg(0x8000, 0x42);
        assert_eq!(mapper.read_prg(0x8000), 0xAA);
    }

    #[test]
    fn chr_rom_writes_ignored() {
        let mut rom = test_rom(1, 1);
        rom.chr_rom[0] = 0xAA;
        let mut mapper = Nrom::new(&rom);

        mapper.write_chr(0x0000, 0x42);
        assert_eq!(mapper.read_chr(0x0000), 0xAA);
    }

    #[test]
    fn chr_ram_round_trip() {
        let rom = test_rom(1, 0);
        let mut mapper = Nrom::new(&rom);

        mapper.write_chr(0x0000, 0x42);
        mapper.write_chr(0x1FFF, 0x55);
        assert_eq!(mapper.read_chr(0x0000), 0x42);
        assert_eq!(mapper.read_chr(0x1FFF), 0x55);
    }
}
