//! Ricoh 2C02 PPU emulation for the famicore NES emulator.
//!
//! The PPU renders through a caller-provided [`PpuBus`] covering its 16 KiB
//! address space (pattern tables, nametables, palette RAM); the system crate
//! supplies the concrete bus with mirroring and cartridge CHR access.

mod ppu;
mod registers;
mod scroll;
mod sprite;

pub use ppu::{Ppu, StepEvents, FRAME_HEIGHT, FRAME_SIZE, FRAME_WIDTH};
pub use registers::{PpuCtrl, PpuMask, PpuStatus};
pub use scroll::Scroll;
pub use sprite::{Sprite, SpriteAttributes};

/// PPU-side memory bus: the 16 KiB video address space.
pub trait PpuBus {
    /// Read a byte from PPU address space (`$0000-$3FFF`, mirrors above).
    fn read(&mut self, addr: u16) -> u8;

    /// Write a byte to PPU address space.
    fn write(&mut self, addr: u16, value: u8);
}
