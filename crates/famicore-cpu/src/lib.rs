//! MOS 6502 CPU emulation for the famicore NES emulator.
//!
//! The interpreter executes one instruction per [`Cpu::step`] call against a
//! caller-provided [`Bus`], returning the machine cycles consumed so the
//! caller can keep the PPU in lock-step.

mod addressing;
mod bus;
mod cpu;
mod opcodes;
mod status;
mod trace;

pub use addressing::AddrMode;
pub use bus::Bus;
pub use cpu::{Cpu, Interrupt, IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};
pub use opcodes::{Mnemonic, OpcodeInfo, OPCODE_TABLE};
pub use status::Status;
pub use trace::trace_line;
