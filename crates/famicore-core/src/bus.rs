//! CPU-side system bus.
//!
//! Routes the 64 KiB CPU address space:
//!
//! ```text
//! $0000-$1FFF: 2 KiB internal RAM, mirrored four times
//! $2000-$3FFF: PPU registers, mirrored every 8 bytes
//! $4014:       OAM DMA port
//! $4016/$4017: controller ports
//! $4000-$401F: remaining APU/test registers, tolerated no-ops
//! $4020-$FFFF: cartridge
//! ```
//!
//! The bus also carries the lines the console drains between instructions:
//! the NMI pulse raised by the PPU and the stall cycles queued by OAM DMA.

use famicore_cpu::Bus;
use famicore_mappers::Cartridge;
use famicore_ppu::{Ppu, StepEvents};

use crate::controller::Controller;
use crate::video::{VideoBus, VideoMem};

/// System bus: every component the CPU can reach, plus the PPU it keeps in
/// lock-step.
pub struct CpuBus {
    /// 2 KiB internal RAM.
    ram: [u8; 0x0800],
    /// Picture processing unit.
    pub ppu: Ppu,
    /// Nametable and palette RAM.
    video: VideoMem,
    /// Cartridge (mapper + SRAM).
    pub cart: Cartridge,
    /// Controller port 1 ($4016).
    pub controller1: Controller,
    /// Controller port 2 ($4017).
    pub controller2: Controller,
    /// Mirror of the CPU cycle counter, for DMA stall parity.
    cpu_cycles: u64,
    /// Stall cycles queued by OAM DMA, drained into the CPU.
    pending_stall: u64,
    /// NMI pulse raised by the PPU, drained into the CPU.
    pending_nmi: bool,
}

impl CpuBus {
    /// Build the bus around a cartridge.
    #[must_use]
    pub fn new(cart: Cartridge) -> Self {
        Self {
            ram: [0; 0x0800],
            ppu: Ppu::new(),
            video: VideoMem::new(),
            cart,
            controller1: Controller::new(),
            controller2: Controller::new(),
            cpu_cycles: 0,
            pending_stall: 0,
            pending_nmi: false,
        }
    }

    /// Advance the PPU by one dot.
    pub fn step_ppu(&mut self) -> StepEvents {
        let mut video = VideoBus {
            cart: &mut self.cart,
            mem: &mut self.video,
        };
        let events = self.ppu.step(&mut video);
        if events.nmi {
            self.pending_nmi = true;
        }
        events
    }

    /// Keep the DMA parity mirror in sync with the CPU.
    pub fn add_cpu_cycles(&mut self, cycles: u32) {
        self.cpu_cycles += u64::from(cycles);
    }

    /// Take the queued DMA stall cycles.
    pub fn take_stall(&mut self) -> u64 {
        std::mem::take(&mut self.pending_stall)
    }

    /// Take the pending NMI pulse.
    pub fn take_nmi(&mut self) -> bool {
        std::mem::take(&mut self.pending_nmi)
    }

    /// OAM DMA: 256 sequential bus reads from `page << 8` into OAM at
    /// OAMADDR, then a 513-cycle CPU stall (514 when the cycle counter is
    /// odd at the write).
    fn oam_dma(&mut self, page: u8) {
        let base = u16::from(page) << 8;
        for offset in 0..256 {
            let value = self.read(base.wrapping_add(offset));
            self.ppu.write_oam(value);
        }
        self.pending_stall += 513 + (self.cpu_cycles & 1);
    }

    #[cfg(test)]
    fn set_cpu_cycles(&mut self, cycles: u64) {
        self.cpu_cycles = cycles;
    }
}

impl Bus for CpuBus {
    fn read(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],
            0x2000..=0x3FFF => {
                let mut video = VideoBus {
                    cart: &mut self.cart,
                    mem: &mut self.video,
                };
                self.ppu.read_register(addr & 0x2007, &mut video)
            }
            0x4016 => self.controller1.read(),
            0x4017 => self.controller2.read(),
            // APU and test registers are not modeled
            0x4000..=0x401F => 0,
            0x4020..=0xFFFF => self.cart.read(addr),
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize] = value,
            0x2000..=0x3FFF => {
                let mut video = VideoBus {
                    cart: &mut self.cart,
                    mem: &mut self.video,
                };
                self.ppu.write_register(addr & 0x2007, value, &mut video);
            }
            0x4014 => self.oam_dma(value),
            0x4016 => {
                self.controller1.write(value);
                self.controller2.write(value);
            }
            // APU and test registers are not modeled
            0x4000..=0x401F => {}
            0x4020..=0xFFFF => self.cart.write(addr, value),
        }
    }

    fn peek(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],
            0x4020..=0xFFFF => self.cart.read(addr),
            // Peeking hardware registers must not trigger side effects
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use famicore_mappers::{Mirroring, Rom, RomHeader};

    fn test_bus() -> CpuBus {
        let rom = Rom {
            header: RomHeader {
                prg_banks: 2,
                chr_banks: 1,
                mapper: 0,
                mirroring: Mirroring::Horizontal,
                has_battery: false,
                has_trainer: false,
                prg_ram_banks: 1,
            },
            prg_rom: vec![0xEA; 32768],
            chr_rom: vec![0; 8192],
        };
        CpuBus::new(Cartridge::new(&rom).unwrap())
    }

    #[test]
    fn ram_mirrors_every_2k() {
        let mut bus = test_bus();

        bus.write(0x0000, 0x42);
        assert_eq!(bus.read(0x0800), 0x42);
        assert_eq!(bus.read(0x1000), 0x42);
        assert_eq!(bus.read(0x1800), 0x42);

        bus.write(0x1234, 0xAB);
        assert_eq!(bus.read(0x0234), 0xAB);
    }

    #[test]
    fn ppu_registers_mirror_every_8_bytes() {
        let mut bus = test_bus();

        // OAMADDR via a mirror, OAMDATA via the base address
        bus.write(0x2003 + 8 * 100, 0x00);
        bus.write(0x2004, 0x42);
        bus.write(0x2003, 0x00);
        assert_eq!(bus.read(0x2004 + 8 * 7), 0x42);
    }

    #[test]
    fn oam_dma_copies_a_page_and_queues_stall() {
        let mut bus = test_bus();
        for i in 0..256u16 {
            bus.write(0x0200 + i, i as u8);
        }
        bus.write(0x2003, 0x00); // OAMADDR = 0

        bus.set_cpu_cycles(100); // even
        bus.write(0x4014, 0x02);
        assert_eq!(bus.take_stall(), 513);

        // Read OAM back through OAMDATA
        for i in 0..4u8 {
            bus.write(0x2003, i);
            assert_eq!(bus.read(0x2004), i);
        }
    }

    #[test]
    fn oam_dma_stall_parity() {
        let mut bus = test_bus();

        bus.set_cpu_cycles(0);
        bus.write(0x4014, 0x02);
        assert_eq!(bus.take_stall(), 513);

        bus.set_cpu_cycles(1);
        bus.write(0x4014, 0x02);
        assert_eq!(bus.take_stall(), 514);
    }

    #[test]
    fn dma_reads_go_through_the_bus_mirrors() {
        let mut bus = test_bus();
        bus.write(0x0000, 0x5A); // visible at $0800 through the RAM mirror
        bus.write(0x2003, 0x00);

        bus.write(0x4014, 0x08); // page $0800
        bus.write(0x2003, 0x00);
        assert_eq!(bus.read(0x2004), 0x5A);
    }

    #[test]
    fn controller_port_shifts_buttons() {
        use crate::controller::Button;
        let mut bus = test_bus();
        bus.controller1.set_button(Button::Start, true);

        bus.write(0x4016, 1);
        bus.write(0x4016, 0);
        assert_eq!(bus.read(0x4016), 0); // A
        assert_eq!(bus.read(0x4016), 0); // B
        assert_eq!(bus.read(0x4016), 0); // Select
        assert_eq!(bus.read(0x4016), 1); // Start
    }

    #[test]
    fn apu_registers_are_inert() {
        let mut bus = test_bus();
        bus.write(0x4000, 0xFF);
        bus.write(0x4015, 0xFF);
        assert_eq!(bus.read(0x4000), 0);
        assert_eq!(bus.read(0x4015), 0);
    }

    #[test]
    fn cartridge_window_reaches_prg() {
        let mut bus = test_bus();
        assert_eq!(bus.read(0x8000), 0xEA);
        assert_eq!(bus.read(0xFFFF), 0xEA);
    }

    #[test]
    fn nmi_pulse_is_latched_until_taken() {
        let mut bus = test_bus();
        bus.write(0x2000, 0x80); // enable NMI

        // Run dots until vblank's delayed pulse lands
        let mut saw_nmi = false;
        for _ in 0..(341 * 262) {
            bus.step_ppu();
            if bus.take_nmi() {
                saw_nmi = true;
                break;
            }
        }
        assert!(saw_nmi);
        assert!(!bus.take_nmi());
    }
}
