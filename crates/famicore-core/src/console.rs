//! Top-level console: owns the CPU and the system bus and drives them in
//! lock-step, three PPU dots per CPU cycle.

use famicore_cpu::Cpu;
use famicore_mappers::{Cartridge, MapperError, Rom, RomError};
use famicore_ppu::FRAME_SIZE;

use crate::bus::CpuBus;
use crate::controller::Button;

/// Errors surfaced when building a console from a ROM image.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// The iNES image could not be parsed.
    #[error("invalid ROM image: {0}")]
    Rom(#[from] RomError),
    /// The image uses a mapper this core does not implement.
    #[error(transparent)]
    Mapper(#[from] MapperError),
}

/// NES console emulator.
pub struct Console {
    cpu: Cpu,
    bus: CpuBus,
}

impl Console {
    /// Build a console from a raw iNES image and run the reset sequence.
    pub fn new(rom_data: &[u8]) -> Result<Self, ConsoleError> {
        let rom = Rom::load(rom_data)?;
        Ok(Self::with_cartridge(Cartridge::new(&rom)?))
    }

    /// Build a console around an already wired cartridge.
    #[must_use]
    pub fn with_cartridge(cart: Cartridge) -> Self {
        log::debug!("console powered on: mapper {}", cart.mapper_number());
        let mut bus = CpuBus::new(cart);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        Self { cpu, bus }
    }

    /// Reset the CPU (register state and reset vector).
    pub fn reset(&mut self) {
        self.cpu.reset(&mut self.bus);
    }

    /// Run one CPU step and the matching three PPU dots per cycle.
    /// Returns the CPU cycles consumed.
    pub fn step(&mut self) -> u32 {
        let cycles = self.cpu.step(&mut self.bus);
        self.bus.add_cpu_cycles(cycles);

        for _ in 0..cycles * 3 {
            self.bus.step_ppu();
        }

        // Lines raised while the instruction ran are observed before the
        // next one: DMA stalls and the vblank NMI.
        let stall = self.bus.take_stall();
        if stall > 0 {
            self.cpu.add_stall(stall);
        }
        if self.bus.take_nmi() {
            self.cpu.trigger_nmi();
        }

        cycles
    }

    /// Run until the PPU finishes the current frame (front buffer swapped
    /// at vblank start). Returns the CPU cycles consumed.
    pub fn step_frame(&mut self) -> u64 {
        let mut cycles = 0u64;
        let frame = self.bus.ppu.frame_count();
        while self.bus.ppu.frame_count() == frame {
            cycles += u64::from(self.step());
        }
        cycles
    }

    /// Finished frame: 256x240 palette indices for the host's RGB lookup.
    #[must_use]
    pub fn frame(&self) -> &[u8; FRAME_SIZE] {
        self.bus.ppu.frame()
    }

    /// Update a controller 1 button.
    pub fn set_button(&mut self, button: Button, pressed: bool) {
        self.bus.controller1.set_button(button, pressed);
    }

    /// Update a controller 2 button.
    pub fn set_button_2(&mut self, button: Button, pressed: bool) {
        self.bus.controller2.set_button(button, pressed);
    }

    /// CPU state, for tests and debugging front ends.
    #[must_use]
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    /// System bus, for tests and debugging front ends.
    #[must_use]
    pub fn bus(&self) -> &CpuBus {
        &self.bus
    }

    /// Mutable system bus access.
    pub fn bus_mut(&mut self) -> &mut CpuBus {
        &mut self.bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use famicore_mappers::{Mirroring, RomHeader};

    /// NROM image whose reset vector points at an infinite NOP loop.
    fn nop_console() -> Console {
        let rom = Rom {
            header: RomHeader {
                prg_banks: 2,
                chr_banks: 1,
                mapper: 0,
                mirroring: Mirroring::Vertical,
                has_battery: false,
                has_trainer: false,
                prg_ram_banks: 1,
            },
            prg_rom: {
                let mut prg = vec![0xEA; 32768];
                prg[0x7FFC] = 0x00;
                prg[0x7FFD] = 0x80;
                prg
            },
            chr_rom: vec![0; 8192],
        };
        Console::with_cartridge(Cartridge::new(&rom).unwrap())
    }

    #[test]
    fn reset_loads_the_reset_vector() {
        let console = nop_console();
        assert_eq!(console.cpu().pc, 0x8000);
    }

    #[test]
    fn step_advances_cpu_and_ppu_in_lockstep() {
        let mut console = nop_console();

        let cycles = console.step();
        assert_eq!(cycles, 2); // NOP
        // 3 dots per cycle from power-on position (0, 0)
        assert_eq!(console.bus().ppu.dot(), 6);
    }

    #[test]
    fn step_frame_completes_one_frame() {
        let mut console = nop_console();

        // First call aligns to the first vblank; the second spans exactly
        // one frame of 341 * 262 dots at three dots per CPU cycle
        console.step_frame();
        let cycles = console.step_frame();
        assert_eq!(console.bus().ppu.frame_count(), 2);

        let expected: i64 = 341 * 262 / 3;
        assert!((cycles as i64 - expected).abs() < 10);
    }

    #[test]
    fn frame_buffer_has_frame_dimensions() {
        let console = nop_console();
        assert_eq!(console.frame().len(), 256 * 240);
    }
}
