//! CPU status register (P) flags.
//!
//! ```text
//! 7  6  5  4  3  2  1  0
//! N  V  U  B  D  I  Z  C
//! │  │  │  │  │  │  │  └─ Carry
//! │  │  │  │  │  │  └──── Zero
//! │  │  │  │  │  └─────── Interrupt Disable
//! │  │  │  │  └────────── Decimal Mode (ignored by the 2A03 ALU)
//! │  │  │  └───────────── Break (only exists on the pushed image)
//! │  │  └──────────────── Unused (always 1)
//! │  └─────────────────── Overflow
//! └────────────────────── Negative
//! ```

use bitflags::bitflags;

bitflags! {
    /// CPU status register flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Status: u8 {
        /// Carry flag.
        const C = 1 << 0;
        /// Zero flag.
        const Z = 1 << 1;
        /// Interrupt disable flag. Masks IRQ, never NMI.
        const I = 1 << 2;
        /// Decimal mode flag. The 2A03 omits BCD but the flag still latches.
        const D = 1 << 3;
        /// Break flag. 1 when pushed by PHP/BRK, 0 in the live register.
        const B = 1 << 4;
        /// Unused flag, always 1.
        const U = 1 << 5;
        /// Overflow flag.
        const V = 1 << 6;
        /// Negative flag, bit 7 of the last result.
        const N = 1 << 7;
    }
}

impl Status {
    /// Power-on / reset value: I and U set ($24).
    pub const POWER_ON: Self = Self::I.union(Self::U);

    /// Set or clear the Zero and Negative flags from a result byte.
    #[inline]
    pub fn set_zn(&mut self, value: u8) {
        self.set(Self::Z, value == 0);
        self.set(Self::N, value & 0x80 != 0);
    }

    /// Status byte as pushed to the stack. U is always set; B is set for
    /// PHP/BRK pushes and for the interrupt entry this core emulates.
    #[inline]
    #[must_use]
    pub const fn to_stack_byte(self, brk: bool) -> u8 {
        let mut value = self.bits() | Self::U.bits();
        if brk {
            value |= Self::B.bits();
        }
        value
    }

    /// Status register restored from a stack byte (PLP/RTI): B cleared,
    /// U forced on.
    #[inline]
    #[must_use]
    pub fn from_stack_byte(value: u8) -> Self {
        Self::from_bits_truncate((value & !Self::B.bits()) | Self::U.bits())
    }
}
