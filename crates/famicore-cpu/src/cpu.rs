//! 6502 CPU interpreter.
//!
//! Instruction-level execution: one `step()` runs a whole instruction (or
//! one stall cycle, or an interrupt entry) and returns the machine cycles it
//! consumed. Timing comes from the opcode table plus the page-cross and
//! branch penalties computed during addressing.

use crate::addressing::AddrMode;
use crate::bus::Bus;
use crate::opcodes::{Mnemonic, OPCODE_TABLE};
use crate::status::Status;

/// NMI vector location.
pub const NMI_VECTOR: u16 = 0xFFFA;
/// Reset vector location.
pub const RESET_VECTOR: u16 = 0xFFFC;
/// IRQ/BRK vector location.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Pending interrupt latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    /// Non-maskable interrupt (PPU vblank edge).
    Nmi,
    /// Maskable interrupt request.
    Irq,
}

/// Resolved operand of one instruction.
#[derive(Debug, Clone, Copy)]
enum Operand {
    /// No operand (implied instructions).
    None,
    /// The accumulator (shift/rotate on A).
    Accumulator,
    /// An effective memory address.
    Memory(u16),
}

impl Operand {
    /// Effective address of a memory operand. The opcode table guarantees
    /// memory-consuming operations never see the other variants.
    fn addr(self) -> u16 {
        match self {
            Self::Memory(addr) => addr,
            Self::None | Self::Accumulator => {
                debug_assert!(false, "memory operation on a non-memory operand");
                0
            }
        }
    }
}

/// NES 6502 CPU (Ricoh 2A03, decimal mode absent).
#[derive(Debug)]
pub struct Cpu {
    /// Accumulator.
    pub a: u8,
    /// X index register.
    pub x: u8,
    /// Y index register.
    pub y: u8,
    /// Stack pointer, offset into page 1 ($0100-$01FF).
    pub sp: u8,
    /// Program counter.
    pub pc: u16,
    /// Status register.
    pub status: Status,
    /// Total machine cycles executed.
    pub cycles: u64,
    /// Pending dead cycles from OAM DMA.
    pub stall: u64,
    /// Pending interrupt latch, sampled between instructions.
    interrupt: Option<Interrupt>,
}

impl Cpu {
    /// Create a CPU in its reset register state. The program counter is 0
    /// until [`Cpu::reset`] loads the reset vector (or a test harness sets
    /// `pc` directly).
    #[must_use]
    pub fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0,
            status: Status::POWER_ON,
            cycles: 0,
            stall: 0,
            interrupt: None,
        }
    }

    /// Reset to power-on state and load PC from the reset vector.
    pub fn reset(&mut self, bus: &mut impl Bus) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFD;
        self.status = Status::POWER_ON;
        self.pc = bus.read_u16(RESET_VECTOR);
        self.cycles = 0;
        self.stall = 0;
        self.interrupt = None;
    }

    /// Latch an NMI. Edge triggered; serviced before the next instruction.
    pub fn trigger_nmi(&mut self) {
        self.interrupt = Some(Interrupt::Nmi);
    }

    /// Latch an IRQ. Ignored while the I flag is set; an already latched
    /// NMI keeps priority.
    pub fn trigger_irq(&mut self) {
        if !self.status.contains(Status::I) && self.interrupt != Some(Interrupt::Nmi) {
            self.interrupt = Some(Interrupt::Irq);
        }
    }

    /// Queue dead cycles (OAM DMA suspends the CPU).
    pub fn add_stall(&mut self, cycles: u64) {
        self.stall += cycles;
    }

    /// Execute one step: a stall cycle, an interrupt entry, or a whole
    /// instruction. Returns the machine cycles consumed.
    pub fn step(&mut self, bus: &mut impl Bus) -> u32 {
        if self.stall > 0 {
            self.stall -= 1;
            self.cycles += 1;
            return 1;
        }

        if let Some(interrupt) = self.interrupt.take() {
            let vector = match interrupt {
                Interrupt::Nmi => NMI_VECTOR,
                Interrupt::Irq => IRQ_VECTOR,
            };
            return self.service_interrupt(bus, vector);
        }

        let start = self.cycles;

        let opcode = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);

        let info = &OPCODE_TABLE[opcode as usize];
        self.cycles += u64::from(info.cycles);

        let operand = self.resolve_operand(info.mode, info.page_penalty, bus);
        self.execute(info.mnemonic, operand, bus);

        (self.cycles - start) as u32
    }

    /// Interrupt entry sequence: push PC and status, set I, load the vector.
    fn service_interrupt(&mut self, bus: &mut impl Bus, vector: u16) -> u32 {
        self.push_u16(bus, self.pc);
        self.push(bus, self.status.to_stack_byte(true));
        self.status.insert(Status::I);
        self.pc = bus.read_u16(vector);
        self.cycles += 7;
        7
    }

    // =========================================================================
    // Addressing
    // =========================================================================

    /// Fetch the operand bytes and compute the effective address for the
    /// given mode, adding the page-cross cycle where the table allows it.
    fn resolve_operand(&mut self, mode: AddrMode, page_penalty: bool, bus: &mut impl Bus) -> Operand {
        match mode {
            AddrMode::Imp => Operand::None,
            AddrMode::Acc => Operand::Accumulator,
            AddrMode::Imm => {
                let addr = self.pc;
                self.pc = self.pc.wrapping_add(1);
                Operand::Memory(addr)
            }
            AddrMode::Zp0 => {
                let addr = u16::from(self.fetch(bus));
                Operand::Memory(addr)
            }
            AddrMode::Zpx => {
                let addr = u16::from(self.fetch(bus).wrapping_add(self.x));
                Operand::Memory(addr)
            }
            AddrMode::Zpy => {
                let addr = u16::from(self.fetch(bus).wrapping_add(self.y));
                Operand::Memory(addr)
            }
            AddrMode::Rel => {
                let offset = self.fetch(bus) as i8;
                let target = self.pc.wrapping_add(offset as u16);
                Operand::Memory(target)
            }
            AddrMode::Abs => {
                let addr = self.fetch_u16(bus);
                Operand::Memory(addr)
            }
            AddrMode::Abx => {
                let base = self.fetch_u16(bus);
                let addr = base.wrapping_add(u16::from(self.x));
                if page_penalty && pages_differ(base, addr) {
                    self.cycles += 1;
                }
                Operand::Memory(addr)
            }
            AddrMode::Aby => {
                let base = self.fetch_u16(bus);
                let addr = base.wrapping_add(u16::from(self.y));
                if page_penalty && pages_differ(base, addr) {
                    self.cycles += 1;
                }
                Operand::Memory(addr)
            }
            AddrMode::Ind => {
                let ptr = self.fetch_u16(bus);
                Operand::Memory(bus.read_u16_wrapped(ptr))
            }
            AddrMode::Idx => {
                let ptr = self.fetch(bus).wrapping_add(self.x);
                let lo = u16::from(bus.read(u16::from(ptr)));
                let hi = u16::from(bus.read(u16::from(ptr.wrapping_add(1))));
                Operand::Memory((hi << 8) | lo)
            }
            AddrMode::Idy => {
                let ptr = self.fetch(bus);
                let lo = u16::from(bus.read(u16::from(ptr)));
                let hi = u16::from(bus.read(u16::from(ptr.wrapping_add(1))));
                let base = (hi << 8) | lo;
                let addr = base.wrapping_add(u16::from(self.y));
                if page_penalty && pages_differ(base, addr) {
                    self.cycles += 1;
                }
                Operand::Memory(addr)
            }
        }
    }

    /// Consume one operand byte at PC.
    fn fetch(&mut self, bus: &mut impl Bus) -> u8 {
        let value = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    /// Consume a little-endian operand word at PC.
    fn fetch_u16(&mut self, bus: &mut impl Bus) -> u16 {
        let lo = u16::from(self.fetch(bus));
        let hi = u16::from(self.fetch(bus));
        (hi << 8) | lo
    }

    // =========================================================================
    // Execution
    // =========================================================================

    #[allow(clippy::too_many_lines)] // one arm per operation
    fn execute(&mut self, mnemonic: Mnemonic, operand: Operand, bus: &mut impl Bus) {
        match mnemonic {
            // Loads and stores
            Mnemonic::Lda => {
                self.a = bus.read(operand.addr());
                self.status.set_zn(self.a);
            }
            Mnemonic::Ldx => {
                self.x = bus.read(operand.addr());
                self.status.set_zn(self.x);
            }
            Mnemonic::Ldy => {
                self.y = bus.read(operand.addr());
                self.status.set_zn(self.y);
            }
            Mnemonic::Sta => bus.write(operand.addr(), self.a),
            Mnemonic::Stx => bus.write(operand.addr(), self.x),
            Mnemonic::Sty => bus.write(operand.addr(), self.y),

            // Register transfers
            Mnemonic::Tax => {
                self.x = self.a;
                self.status.set_zn(self.x);
            }
            Mnemonic::Tay => {
                self.y = self.a;
                self.status.set_zn(self.y);
            }
            Mnemonic::Txa => {
                self.a = self.x;
                self.status.set_zn(self.a);
            }
            Mnemonic::Tya => {
                self.a = self.y;
                self.status.set_zn(self.a);
            }
            Mnemonic::Tsx => {
                self.x = self.sp;
                self.status.set_zn(self.x);
            }
            Mnemonic::Txs => self.sp = self.x,

            // Arithmetic
            Mnemonic::Adc => {
                let value = bus.read(operand.addr());
                self.adc(value);
            }
            Mnemonic::Sbc => {
                let value = bus.read(operand.addr());
                self.sbc(value);
            }
            Mnemonic::Cmp => {
                let value = bus.read(operand.addr());
                self.compare(self.a, value);
            }
            Mnemonic::Cpx => {
                let value = bus.read(operand.addr());
                self.compare(self.x, value);
            }
            Mnemonic::Cpy => {
                let value = bus.read(operand.addr());
                self.compare(self.y, value);
            }

            // Increments and decrements
            Mnemonic::Inc => {
                let addr = operand.addr();
                let value = bus.read(addr).wrapping_add(1);
                bus.write(addr, value);
                self.status.set_zn(value);
            }
            Mnemonic::Dec => {
                let addr = operand.addr();
                let value = bus.read(addr).wrapping_sub(1);
                bus.write(addr, value);
                self.status.set_zn(value);
            }
            Mnemonic::Inx => {
                self.x = self.x.wrapping_add(1);
                self.status.set_zn(self.x);
            }
            Mnemonic::Iny => {
                self.y = self.y.wrapping_add(1);
                self.status.set_zn(self.y);
            }
            Mnemonic::Dex => {
                self.x = self.x.wrapping_sub(1);
                self.status.set_zn(self.x);
            }
            Mnemonic::Dey => {
                self.y = self.y.wrapping_sub(1);
                self.status.set_zn(self.y);
            }

            // Logic
            Mnemonic::And => {
                self.a &= bus.read(operand.addr());
                self.status.set_zn(self.a);
            }
            Mnemonic::Ora => {
                self.a |= bus.read(operand.addr());
                self.status.set_zn(self.a);
            }
            Mnemonic::Eor => {
                self.a ^= bus.read(operand.addr());
                self.status.set_zn(self.a);
            }
            Mnemonic::Bit => {
                let value = bus.read(operand.addr());
                self.status.set(Status::Z, self.a & value == 0);
                self.status.set(Status::V, value & 0x40 != 0);
                self.status.set(Status::N, value & 0x80 != 0);
            }

            // Shifts and rotates
            Mnemonic::Asl => self.read_modify_write(operand, bus, Self::asl),
            Mnemonic::Lsr => self.read_modify_write(operand, bus, Self::lsr),
            Mnemonic::Rol => self.read_modify_write(operand, bus, Self::rol),
            Mnemonic::Ror => self.read_modify_write(operand, bus, Self::ror),

            // Branches
            Mnemonic::Bcc => self.branch(!self.status.contains(Status::C), operand),
            Mnemonic::Bcs => self.branch(self.status.contains(Status::C), operand),
            Mnemonic::Bne => self.branch(!self.status.contains(Status::Z), operand),
            Mnemonic::Beq => self.branch(self.status.contains(Status::Z), operand),
            Mnemonic::Bpl => self.branch(!self.status.contains(Status::N), operand),
            Mnemonic::Bmi => self.branch(self.status.contains(Status::N), operand),
            Mnemonic::Bvc => self.branch(!self.status.contains(Status::V), operand),
            Mnemonic::Bvs => self.branch(self.status.contains(Status::V), operand),

            // Jumps and subroutines
            Mnemonic::Jmp => self.pc = operand.addr(),
            Mnemonic::Jsr => {
                self.push_u16(bus, self.pc.wrapping_sub(1));
                self.pc = operand.addr();
            }
            Mnemonic::Rts => {
                self.pc = self.pull_u16(bus).wrapping_add(1);
            }
            Mnemonic::Rti => {
                let status = self.pull(bus);
                self.status = Status::from_stack_byte(status);
                self.pc = self.pull_u16(bus);
            }
            Mnemonic::Brk => {
                // The byte after BRK is a padding byte the return address
                // skips over.
                self.push_u16(bus, self.pc.wrapping_add(1));
                self.push(bus, self.status.to_stack_byte(true));
                self.status.insert(Status::I);
                self.pc = bus.read_u16(IRQ_VECTOR);
            }

            // Stack
            Mnemonic::Pha => self.push(bus, self.a),
            Mnemonic::Php => {
                let value = self.status.to_stack_byte(true);
                self.push(bus, value);
            }
            Mnemonic::Pla => {
                self.a = self.pull(bus);
                self.status.set_zn(self.a);
            }
            Mnemonic::Plp => {
                let value = self.pull(bus);
                self.status = Status::from_stack_byte(value);
            }

            // Flag operations
            Mnemonic::Clc => self.status.remove(Status::C),
            Mnemonic::Sec => self.status.insert(Status::C),
            Mnemonic::Cli => self.status.remove(Status::I),
            Mnemonic::Sei => self.status.insert(Status::I),
            Mnemonic::Clv => self.status.remove(Status::V),
            Mnemonic::Cld => self.status.remove(Status::D),
            Mnemonic::Sed => self.status.insert(Status::D),

            // NOP still performs its operand fetch, which is what earns the
            // page-cross cycle on the absolute,X variants.
            Mnemonic::Nop => {
                if let Operand::Memory(addr) = operand {
                    let _ = bus.read(addr);
                }
            }

            // Unofficial opcodes
            Mnemonic::Lax => {
                let value = bus.read(operand.addr());
                self.a = value;
                self.x = value;
                self.status.set_zn(value);
            }
            Mnemonic::Sax => bus.write(operand.addr(), self.a & self.x),
            Mnemonic::Dcp => {
                let addr = operand.addr();
                let value = bus.read(addr).wrapping_sub(1);
                bus.write(addr, value);
                self.compare(self.a, value);
            }
            Mnemonic::Isc => {
                let addr = operand.addr();
                let value = bus.read(addr).wrapping_add(1);
                bus.write(addr, value);
                self.sbc(value);
            }
            Mnemonic::Slo => {
                let addr = operand.addr();
                let value = self.asl(bus.read(addr));
                bus.write(addr, value);
                self.a |= value;
                self.status.set_zn(self.a);
            }
            Mnemonic::Sre => {
                let addr = operand.addr();
                let value = self.lsr(bus.read(addr));
                bus.write(addr, value);
                self.a ^= value;
                self.status.set_zn(self.a);
            }
            Mnemonic::Rla => {
                let addr = operand.addr();
                let value = self.rol(bus.read(addr));
                bus.write(addr, value);
                self.a &= value;
                self.status.set_zn(self.a);
            }
            Mnemonic::Rra => {
                let addr = operand.addr();
                let value = self.ror(bus.read(addr));
                bus.write(addr, value);
                self.adc(value);
            }
            Mnemonic::Anc => {
                self.a &= bus.read(operand.addr());
                self.status.set_zn(self.a);
                self.status.set(Status::C, self.a & 0x80 != 0);
            }
            Mnemonic::Alr => {
                self.a &= bus.read(operand.addr());
                self.a = self.lsr(self.a);
            }
            Mnemonic::Arr => {
                self.a &= bus.read(operand.addr());
                let carry = self.status.contains(Status::C);
                self.a = (self.a >> 1) | (u8::from(carry) << 7);
                self.status.set_zn(self.a);
                self.status.set(Status::C, self.a & 0x40 != 0);
                self.status
                    .set(Status::V, ((self.a >> 6) ^ (self.a >> 5)) & 1 != 0);
            }
            Mnemonic::Axs => {
                let value = bus.read(operand.addr());
                let masked = self.a & self.x;
                self.status.set(Status::C, masked >= value);
                self.x = masked.wrapping_sub(value);
                self.status.set_zn(self.x);
            }
            Mnemonic::Las => {
                let value = bus.read(operand.addr()) & self.sp;
                self.a = value;
                self.x = value;
                self.sp = value;
                self.status.set_zn(value);
            }
            Mnemonic::Xaa => {
                // Unstable; the common magic-constant model
                self.a = (self.a | 0xEE) & self.x & bus.read(operand.addr());
                self.status.set_zn(self.a);
            }
            Mnemonic::Ahx => {
                let addr = operand.addr();
                bus.write(addr, self.a & self.x & high_byte_plus_one(addr));
            }
            Mnemonic::Shx => {
                let addr = operand.addr();
                bus.write(addr, self.x & high_byte_plus_one(addr));
            }
            Mnemonic::Shy => {
                let addr = operand.addr();
                bus.write(addr, self.y & high_byte_plus_one(addr));
            }
            Mnemonic::Tas => {
                self.sp = self.a & self.x;
                let addr = operand.addr();
                bus.write(addr, self.sp & high_byte_plus_one(addr));
            }
            Mnemonic::Kil => {
                // Jam opcode slot: treated as a no-op with the tabled cost
                log::debug!("stubbed opcode executed at ${:04X}", self.pc.wrapping_sub(1));
            }
        }
    }

    // =========================================================================
    // Operation helpers
    // =========================================================================

    /// ADC core, also used by RRA and (complemented) SBC.
    fn adc(&mut self, value: u8) {
        let carry = u16::from(self.status.contains(Status::C));
        let sum = u16::from(self.a) + u16::from(value) + carry;
        let result = sum as u8;

        self.status.set(Status::C, sum > 0xFF);
        // Overflow: operands agree in sign but the result does not
        self.status
            .set(Status::V, (self.a ^ result) & (value ^ result) & 0x80 != 0);
        self.a = result;
        self.status.set_zn(self.a);
    }

    /// SBC is ADC of the one's complement.
    fn sbc(&mut self, value: u8) {
        self.adc(!value);
    }

    fn compare(&mut self, register: u8, value: u8) {
        self.status.set(Status::C, register >= value);
        self.status.set_zn(register.wrapping_sub(value));
    }

    fn asl(&mut self, value: u8) -> u8 {
        self.status.set(Status::C, value & 0x80 != 0);
        let result = value << 1;
        self.status.set_zn(result);
        result
    }

    fn lsr(&mut self, value: u8) -> u8 {
        self.status.set(Status::C, value & 0x01 != 0);
        let result = value >> 1;
        self.status.set_zn(result);
        result
    }

    fn rol(&mut self, value: u8) -> u8 {
        let carry = self.status.contains(Status::C);
        self.status.set(Status::C, value & 0x80 != 0);
        let result = (value << 1) | u8::from(carry);
        self.status.set_zn(result);
        result
    }

    fn ror(&mut self, value: u8) -> u8 {
        let carry = self.status.contains(Status::C);
        self.status.set(Status::C, value & 0x01 != 0);
        let result = (value >> 1) | (u8::from(carry) << 7);
        self.status.set_zn(result);
        result
    }

    /// Apply a shift/rotate either to the accumulator or in memory.
    fn read_modify_write(
        &mut self,
        operand: Operand,
        bus: &mut impl Bus,
        f: fn(&mut Self, u8) -> u8,
    ) {
        match operand {
            Operand::Accumulator => {
                let value = self.a;
                self.a = f(self, value);
            }
            _ => {
                let addr = operand.addr();
                let value = bus.read(addr);
                let result = f(self, value);
                bus.write(addr, result);
            }
        }
    }

    /// Taken branches cost one extra cycle, two when the target sits on a
    /// different page than the instruction that follows the branch.
    fn branch(&mut self, condition: bool, operand: Operand) {
        if condition {
            let target = operand.addr();
            self.cycles += 1;
            if pages_differ(self.pc, target) {
                self.cycles += 1;
            }
            self.pc = target;
        }
    }

    // =========================================================================
    // Stack
    // =========================================================================

    fn push(&mut self, bus: &mut impl Bus, value: u8) {
        bus.write(0x0100 | u16::from(self.sp), value);
        self.sp = self.sp.wrapping_sub(1);
    }

    fn pull(&mut self, bus: &mut impl Bus) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        bus.read(0x0100 | u16::from(self.sp))
    }

    fn push_u16(&mut self, bus: &mut impl Bus, value: u16) {
        self.push(bus, (value >> 8) as u8);
        self.push(bus, (value & 0xFF) as u8);
    }

    fn pull_u16(&mut self, bus: &mut impl Bus) -> u16 {
        let lo = u16::from(self.pull(bus));
        let hi = u16::from(self.pull(bus));
        (hi << 8) | lo
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
const fn pages_differ(a: u16, b: u16) -> bool {
    a & 0xFF00 != b & 0xFF00
}

const fn high_byte_plus_one(addr: u16) -> u8 {
    ((addr >> 8) as u8).wrapping_add(1)
}
