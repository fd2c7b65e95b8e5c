//! PPU-side address space: pattern tables, nametables and palette RAM.
//!
//! [`VideoMem`] owns the console's video memory; [`VideoBus`] borrows it
//! together with the cartridge to present the PPU's 16 KiB bus:
//!
//! ```text
//! $0000-$1FFF: pattern tables (cartridge CHR)
//! $2000-$2FFF: nametables, collapsed by the cartridge's mirroring
//! $3000-$3EFF: mirror of $2000-$2EFF
//! $3F00-$3FFF: palette RAM, 32 bytes, mirrored every 32
//! $4000-$FFFF: mirror of $0000-$3FFF
//! ```

use famicore_mappers::{Cartridge, Mirroring};
use famicore_ppu::PpuBus;

/// Video memory owned by the console: 4 KiB of nametable RAM (four-screen
/// capable) and 32 bytes of palette RAM.
pub struct VideoMem {
    nametables: [u8; 0x1000],
    palette: [u8; 32],
}

impl VideoMem {
    /// Zeroed video memory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nametables: [0; 0x1000],
            palette: [0; 32],
        }
    }
}

impl Default for VideoMem {
    fn default() -> Self {
        Self::new()
    }
}

/// The PPU's view of video memory plus cartridge CHR.
pub struct VideoBus<'a> {
    /// Cartridge, for pattern-table accesses.
    pub cart: &'a mut Cartridge,
    /// Console-owned nametable and palette RAM.
    pub mem: &'a mut VideoMem,
}

/// Collapse a nametable address (`$2000-$2FFF`) to its backing index per
/// the mirroring mode.
fn nametable_index(mirroring: Mirroring, addr: u16) -> usize {
    let collapsed = match mirroring {
        Mirroring::Horizontal => {
            if addr < 0x2800 {
                addr & 0x23FF
            } else {
                addr & 0x2BFF
            }
        }
        Mirroring::Vertical => addr & 0x27FF,
        Mirroring::SingleScreen => addr & 0x23FF,
        Mirroring::FourScreen => addr,
    };
    (collapsed - 0x2000) as usize
}

/// Palette index for reads. Every fourth entry aliases the universal
/// background color at `$3F00`, which is also how transparent pixels
/// resolve during rendering.
fn palette_read_index(addr: u16) -> usize {
    let index = (addr & 0x1F) as usize;
    if index % 4 == 0 {
        0
    } else {
        index
    }
}

/// Palette index for writes. `$3F10/$3F14/$3F18/$3F1C` are mirrors of
/// `$3F00/$3F04/$3F08/$3F0C`.
fn palette_write_index(addr: u16) -> usize {
    let index = (addr & 0x1F) as usize;
    if index >= 0x10 && index % 4 == 0 {
        index - 0x10
    } else {
        index
    }
}

impl PpuBus for VideoBus<'_> {
    fn read(&mut self, addr: u16) -> u8 {
        let addr = addr & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => self.cart.read_chr(addr),
            0x2000..=0x2FFF => {
                self.mem.nametables[nametable_index(self.cart.mirroring(), addr)]
            }
            0x3000..=0x3EFF => {
                self.mem.nametables[nametable_index(self.cart.mirroring(), addr - 0x1000)]
            }
            0x3F00..=0x3FFF => self.mem.palette[palette_read_index(addr)],
            _ => unreachable!(),
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        let addr = addr & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => self.cart.write_chr(addr, value),
            0x2000..=0x2FFF => {
                self.mem.nametables[nametable_index(self.cart.mirroring(), addr)] = value;
            }
            0x3000..=0x3EFF => {
                self.mem.nametables[nametable_index(self.cart.mirroring(), addr - 0x1000)] = value;
            }
            0x3F00..=0x3FFF => self.mem.palette[palette_write_index(addr)] = value,
            _ => unreachable!(),
        }
    }
}
