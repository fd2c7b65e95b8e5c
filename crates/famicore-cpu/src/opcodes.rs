//! Opcode dispatch table for the 6502.
//!
//! All 256 opcodes (151 official plus the unofficial ones real cartridges
//! rely on) with their operation, addressing mode, operand size, base cycle
//! count and page-cross penalty flag. The table values are the ground truth
//! the interpreter timing is checked against.

use crate::addressing::AddrMode;

/// Instruction operations, official and unofficial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)] // variant names are the 6502 mnemonics
pub enum Mnemonic {
    Adc, Ahx, Alr, Anc, And, Arr, Asl, Axs,
    Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs,
    Clc, Cld, Cli, Clv, Cmp, Cpx, Cpy,
    Dcp, Dec, Dex, Dey,
    Eor,
    Inc, Inx, Iny, Isc,
    Jmp, Jsr,
    Kil,
    Las, Lax, Lda, Ldx, Ldy, Lsr,
    Nop,
    Ora,
    Pha, Php, Pla, Plp,
    Rla, Rol, Ror, Rra, Rti, Rts,
    Sax, Sbc, Sec, Sed, Sei, Shx, Shy, Slo, Sre, Sta, Stx, Sty,
    Tas, Tax, Tay, Tsx, Txa, Txs, Tya,
    Xaa,
}

impl Mnemonic {
    /// Uppercase mnemonic string, for tracing and disassembly.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Adc => "ADC", Self::Ahx => "AHX", Self::Alr => "ALR", Self::Anc => "ANC",
            Self::And => "AND", Self::Arr => "ARR", Self::Asl => "ASL", Self::Axs => "AXS",
            Self::Bcc => "BCC", Self::Bcs => "BCS", Self::Beq => "BEQ", Self::Bit => "BIT",
            Self::Bmi => "BMI", Self::Bne => "BNE", Self::Bpl => "BPL", Self::Brk => "BRK",
            Self::Bvc => "BVC", Self::Bvs => "BVS", Self::Clc => "CLC", Self::Cld => "CLD",
            Self::Cli => "CLI", Self::Clv => "CLV", Self::Cmp => "CMP", Self::Cpx => "CPX",
            Self::Cpy => "CPY", Self::Dcp => "DCP", Self::Dec => "DEC", Self::Dex => "DEX",
            Self::Dey => "DEY", Self::Eor => "EOR", Self::Inc => "INC", Self::Inx => "INX",
            Self::Iny => "INY", Self::Isc => "ISB", Self::Jmp => "JMP", Self::Jsr => "JSR",
            Self::Kil => "KIL", Self::Las => "LAS", Self::Lax => "LAX", Self::Lda => "LDA",
            Self::Ldx => "LDX", Self::Ldy => "LDY", Self::Lsr => "LSR", Self::Nop => "NOP",
            Self::Ora => "ORA", Self::Pha => "PHA", Self::Php => "PHP", Self::Pla => "PLA",
            Self::Plp => "PLP", Self::Rla => "RLA", Self::Rol => "ROL", Self::Ror => "ROR",
            Self::Rra => "RRA", Self::Rti => "RTI", Self::Rts => "RTS", Self::Sax => "SAX",
            Self::Sbc => "SBC", Self::Sec => "SEC", Self::Sed => "SED", Self::Sei => "SEI",
            Self::Shx => "SHX", Self::Shy => "SHY", Self::Slo => "SLO", Self::Sre => "SRE",
            Self::Sta => "STA", Self::Stx => "STX", Self::Sty => "STY", Self::Tas => "TAS",
            Self::Tax => "TAX", Self::Tay => "TAY", Self::Tsx => "TSX", Self::Txa => "TXA",
            Self::Txs => "TXS", Self::Tya => "TYA", Self::Xaa => "XAA",
        }
    }
}

/// One opcode table entry.
#[derive(Debug, Clone, Copy)]
pub struct OpcodeInfo {
    /// Operation to perform.
    pub mnemonic: Mnemonic,
    /// Addressing mode.
    pub mode: AddrMode,
    /// Instruction length in bytes, including the opcode (0 where the
    /// source tables left the jam/unstable slots unsized).
    pub size: u8,
    /// Base machine cycles.
    pub cycles: u8,
    /// Whether an indexed page cross adds one cycle.
    pub page_penalty: bool,
    /// Whether this is an unofficial opcode (tracing prefixes `*`).
    pub unofficial: bool,
}

const fn op(
    mnemonic: Mnemonic,
    mode: AddrMode,
    size: u8,
    cycles: u8,
    page_penalty: bool,
    unofficial: bool,
) -> OpcodeInfo {
    OpcodeInfo {
        mnemonic,
        mode,
        size,
        cycles,
        page_penalty,
        unofficial,
    }
}

use AddrMode::{Abs, Abx, Aby, Acc, Idx, Idy, Imm, Imp, Ind, Rel, Zp0, Zpx, Zpy};
use Mnemonic::{
    Adc, Ahx, Alr, Anc, And, Arr, Asl, Axs, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dcp, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Isc, Jmp, Jsr, Kil, Las,
    Lax, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rla, Rol, Ror, Rra, Rti, Rts, Sax, Sbc,
    Sec, Sed, Sei, Shx, Shy, Slo, Sre, Sta, Stx, Sty, Tas, Tax, Tay, Tsx, Txa, Txs, Tya, Xaa,
};

/// Complete 256-entry opcode lookup table, indexed by opcode byte.
#[rustfmt::skip]
pub const OPCODE_TABLE: [OpcodeInfo; 256] = [
    // 0x00-0x0F
    op(Brk, Imp, 1, 7, false, false), // 0x00
    op(Ora, Idx, 2, 6, false, false), // 0x01
    op(Kil, Imp, 0, 2, false, true),  // 0x02
    op(Slo, Idx, 0, 8, false, true),  // 0x03
    op(Nop, Zp0, 2, 3, false, true),  // 0x04
    op(Ora, Zp0, 2, 3, false, false), // 0x05
    op(Asl, Zp0, 2, 5, false, false), // 0x06
    op(Slo, Zp0, 0, 5, false, true),  // 0x07
    op(Php, Imp, 1, 3, false, false), // 0x08
    op(Ora, Imm, 2, 2, false, false), // 0x09
    op(Asl, Acc, 1, 2, false, false), // 0x0A
    op(Anc, Imm, 0, 2, false, true),  // 0x0B
    op(Nop, Abs, 3, 4, false, true),  // 0x0C
    op(Ora, Abs, 3, 4, false, false), // 0x0D
    op(Asl, Abs, 3, 6, false, false), // 0x0E
    op(Slo, Abs, 0, 6, false, true),  // 0x0F
    // 0x10-0x1F
    op(Bpl, Rel, 2, 2, true,  false), // 0x10
    op(Ora, Idy, 2, 5, true,  false), // 0x11
    op(Kil, Imp, 0, 2, false, true),  // 0x12
    op(Slo, Idy, 0, 8, false, true),  // 0x13
    op(Nop, Zpx, 2, 4, false, true),  // 0x14
    op(Ora, Zpx, 2, 4, false, false), // 0x15
    op(Asl, Zpx, 2, 6, false, false), // 0x16
    op(Slo, Zpx, 0, 6, false, true),  // 0x17
    op(Clc, Imp, 1, 2, false, false), // 0x18
    op(Ora, Aby, 3, 4, true,  false), // 0x19
    op(Nop, Imp, 1, 2, false, true),  // 0x1A
    op(Slo, Aby, 0, 7, false, true),  // 0x1B
    op(Nop, Abx, 3, 4, true,  true),  // 0x1C
    op(Ora, Abx, 3, 4, true,  false), // 0x1D
    op(Asl, Abx, 3, 7, false, false), // 0x1E
    op(Slo, Abx, 0, 7, false, true),  // 0x1F
    // 0x20-0x2F
    op(Jsr, Abs, 3, 6, false, false), // 0x20
    op(And, Idx, 2, 6, false, false), // 0x21
    op(Kil, Imp, 0, 2, false, true),  // 0x22
    op(Rla, Idx, 0, 8, false, true),  // 0x23
    op(Bit, Zp0, 2, 3, false, false), // 0x24
    op(And, Zp0, 2, 3, false, false), // 0x25
    op(Rol, Zp0, 2, 5, false, false), // 0x26
    op(Rla, Zp0, 0, 5, false, true),  // 0x27
    op(Plp, Imp, 1, 4, false, false), // 0x28
    op(And, Imm, 2, 2, false, false), // 0x29
    op(Rol, Acc, 1, 2, false, false), // 0x2A
    op(Anc, Imm, 0, 2, false, true),  // 0x2B
    op(Bit, Abs, 3, 4, false, false), // 0x2C
    op(And, Abs, 3, 4, false, false), // 0x2D
    op(Rol, Abs, 3, 6, false, false), // 0x2E
    op(Rla, Abs, 0, 6, false, true),  // 0x2F
    // 0x30-0x3F
    op(Bmi, Rel, 2, 2, true,  false), // 0x30
    op(And, Idy, 2, 5, true,  false), // 0x31
    op(Kil, Imp, 0, 2, false, true),  // 0x32
    op(Rla, Idy, 0, 8, false, true),  // 0x33
    op(Nop, Zpx, 2, 4, false, true),  // 0x34
    op(And, Zpx, 2, 4, false, false), // 0x35
    op(Rol, Zpx, 2, 6, false, false), // 0x36
    op(Rla, Zpx, 0, 6, false, true),  // 0x37
    op(Sec, Imp, 1, 2, false, false), // 0x38
    op(And, Aby, 3, 4, true,  false), // 0x39
    op(Nop, Imp, 1, 2, false, true),  // 0x3A
    op(Rla, Aby, 0, 7, false, true),  // 0x3B
    op(Nop, Abx, 3, 4, true,  true),  // 0x3C
    op(And, Abx, 3, 4, true,  false), // 0x3D
    op(Rol, Abx, 3, 7, false, false), // 0x3E
    op(Rla, Abx, 0, 7, false, true),  // 0x3F
    // 0x40-0x4F
    op(Rti, Imp, 1, 6, false, false), // 0x40
    op(Eor, Idx, 2, 6, false, false), // 0x41
    op(Kil, Imp, 0, 2, false, true),  // 0x42
    op(Sre, Idx, 0, 8, false, true),  // 0x43
    op(Nop, Zp0, 2, 3, false, true),  // 0x44
    op(Eor, Zp0, 2, 3, false, false), // 0x45
    op(Lsr, Zp0, 2, 5, false, false), // 0x46
    op(Sre, Zp0, 0, 5, false, true),  // 0x47
    op(Pha, Imp, 1, 3, false, false), // 0x48
    op(Eor, Imm, 2, 2, false, false), // 0x49
    op(Lsr, Acc, 1, 2, false, false), // 0x4A
    op(Alr, Imm, 0, 2, false, true),  // 0x4B
    op(Jmp, Abs, 3, 3, false, false), // 0x4C
    op(Eor, Abs, 3, 4, false, false), // 0x4D
    op(Lsr, Abs, 3, 6, false, false), // 0x4E
    op(Sre, Abs, 0, 6, false, true),  // 0x4F
    // 0x50-0x5F
    op(Bvc, Rel, 2, 2, true,  false), // 0x50
    op(Eor, Idy, 2, 5, true,  false), // 0x51
    op(Kil, Imp, 0, 2, false, true),  // 0x52
    op(Sre, Idy, 0, 8, false, true),  // 0x53
    op(Nop, Zpx, 2, 4, false, true),  // 0x54
    op(Eor, Zpx, 2, 4, false, false), // 0x55
    op(Lsr, Zpx, 2, 6, false, false), // 0x56
    op(Sre, Zpx, 0, 6, false, true),  // 0x57
    op(Cli, Imp, 1, 2, false, false), // 0x58
    op(Eor, Aby, 3, 4, true,  false), // 0x59
    op(Nop, Imp, 1, 2, false, true),  // 0x5A
    op(Sre, Aby, 0, 7, false, true),  // 0x5B
    op(Nop, Abx, 3, 4, true,  true),  // 0x5C
    op(Eor, Abx, 3, 4, true,  false), // 0x5D
    op(Lsr, Abx, 3, 7, false, false), // 0x5E
    op(Sre, Abx, 0, 7, false, true),  // 0x5F
    // 0x60-0x6F
    op(Rts, Imp, 1, 6, false, false), // 0x60
    op(Adc, Idx, 2, 6, false, false), // 0x61
    op(Kil, Imp, 0, 2, false, true),  // 0x62
    op(Rra, Idx, 0, 8, false, true),  // 0x63
    op(Nop, Zp0, 2, 3, false, true),  // 0x64
    op(Adc, Zp0, 2, 3, false, false), // 0x65
    op(Ror, Zp0, 2, 5, false, false), // 0x66
    op(Rra, Zp0, 0, 5, false, true),  // 0x67
    op(Pla, Imp, 1, 4, false, false), // 0x68
    op(Adc, Imm, 2, 2, false, false), // 0x69
    op(Ror, Acc, 1, 2, false, false), // 0x6A
    op(Arr, Imm, 0, 2, false, true),  // 0x6B
    op(Jmp, Ind, 3, 5, false, false), // 0x6C
    op(Adc, Abs, 3, 4, false, false), // 0x6D
    op(Ror, Abs, 3, 6, false, false), // 0x6E
    op(Rra, Abs, 0, 6, false, true),  // 0x6F
    // 0x70-0x7F
    op(Bvs, Rel, 2, 2, true,  false), // 0x70
    op(Adc, Idy, 2, 5, true,  false), // 0x71
    op(Kil, Imp, 0, 2, false, true),  // 0x72
    op(Rra, Idy, 0, 8, false, true),  // 0x73
    op(Nop, Zpx, 2, 4, false, true),  // 0x74
    op(Adc, Zpx, 2, 4, false, false), // 0x75
    op(Ror, Zpx, 2, 6, false, false), // 0x76
    op(Rra, Zpx, 0, 6, false, true),  // 0x77
    op(Sei, Imp, 1, 2, false, false), // 0x78
    op(Adc, Aby, 3, 4, true,  false), // 0x79
    op(Nop, Imp, 1, 2, false, true),  // 0x7A
    op(Rra, Aby, 0, 7, false, true),  // 0x7B
    op(Nop, Abx, 3, 4, true,  true),  // 0x7C
    op(Adc, Abx, 3, 4, true,  false), // 0x7D
    op(Ror, Abx, 3, 7, false, false), // 0x7E
    op(Rra, Abx, 0, 7, false, true),  // 0x7F
    // 0x80-0x8F
    op(Nop, Imm, 2, 2, false, true),  // 0x80
    op(Sta, Idx, 2, 6, false, false), // 0x81
    op(Nop, Imm, 0, 2, false, true),  // 0x82
    op(Sax, Idx, 0, 6, false, true),  // 0x83
    op(Sty, Zp0, 2, 3, false, false), // 0x84
    op(Sta, Zp0, 2, 3, false, false), // 0x85
    op(Stx, Zp0, 2, 3, false, false), // 0x86
    op(Sax, Zp0, 0, 3, false, true),  // 0x87
    op(Dey, Imp, 1, 2, false, false), // 0x88
    op(Nop, Imm, 0, 2, false, true),  // 0x89
    op(Txa, Imp, 1, 2, false, false), // 0x8A
    op(Xaa, Imm, 0, 2, false, true),  // 0x8B
    op(Sty, Abs, 3, 4, false, false), // 0x8C
    op(Sta, Abs, 3, 4, false, false), // 0x8D
    op(Stx, Abs, 3, 4, false, false), // 0x8E
    op(Sax, Abs, 0, 4, false, true),  // 0x8F
    // 0x90-0x9F
    op(Bcc, Rel, 2, 2, true,  false), // 0x90
    op(Sta, Idy, 2, 6, false, false), // 0x91
    op(Kil, Imp, 0, 2, false, true),  // 0x92
    op(Ahx, Idy, 0, 6, false, true),  // 0x93
    op(Sty, Zpx, 2, 4, false, false), // 0x94
    op(Sta, Zpx, 2, 4, false, false), // 0x95
    op(Stx, Zpy, 2, 4, false, false), // 0x96
    op(Sax, Zpy, 0, 4, false, true),  // 0x97
    op(Tya, Imp, 1, 2, false, false), // 0x98
    op(Sta, Aby, 3, 5, false, false), // 0x99
    op(Txs, Imp, 1, 2, false, false), // 0x9A
    op(Tas, Aby, 0, 5, false, true),  // 0x9B
    op(Shy, Abx, 0, 5, false, true),  // 0x9C
    op(Sta, Abx, 3, 5, false, false), // 0x9D
    op(Shx, Aby, 0, 5, false, true),  // 0x9E
    op(Ahx, Aby, 0, 5, false, true),  // 0x9F
    // 0xA0-0xAF
    op(Ldy, Imm, 2, 2, false, false), // 0xA0
    op(Lda, Idx, 2, 6, false, false), // 0xA1
    op(Ldx, Imm, 2, 2, false, false), // 0xA2
    op(Lax, Idx, 0, 6, false, true),  // 0xA3
    op(Ldy, Zp0, 2, 3, false, false), // 0xA4
    op(Lda, Zp0, 2, 3, false, false), // 0xA5
    op(Ldx, Zp0, 2, 3, false, false), // 0xA6
    op(Lax, Zp0, 0, 3, false, true),  // 0xA7
    op(Tay, Imp, 1, 2, false, false), // 0xA8
    op(Lda, Imm, 2, 2, false, false), // 0xA9
    op(Tax, Imp, 1, 2, false, false), // 0xAA
    op(Lax, Imm, 0, 2, false, true),  // 0xAB
    op(Ldy, Abs, 3, 4, false, false), // 0xAC
    op(Lda, Abs, 3, 4, false, false), // 0xAD
    op(Ldx, Abs, 3, 4, false, false), // 0xAE
    op(Lax, Abs, 0, 4, false, true),  // 0xAF
    // 0xB0-0xBF
    op(Bcs, Rel, 2, 2, true,  false), // 0xB0
    op(Lda, Idy, 2, 5, true,  false), // 0xB1
    op(Kil, Imp, 0, 2, false, true),  // 0xB2
    op(Lax, Idy, 0, 5, true,  true),  // 0xB3
    op(Ldy, Zpx, 2, 4, false, false), // 0xB4
    op(Lda, Zpx, 2, 4, false, false), // 0xB5
    op(Ldx, Zpy, 2, 4, false, false), // 0xB6
    op(Lax, Zpy, 0, 4, false, true),  // 0xB7
    op(Clv, Imp, 1, 2, false, false), // 0xB8
    op(Lda, Aby, 3, 4, true,  false), // 0xB9
    op(Tsx, Imp, 1, 2, false, false), // 0xBA
    op(Las, Aby, 0, 4, true,  true),  // 0xBB
    op(Ldy, Abx, 3, 4, true,  false), // 0xBC
    op(Lda, Abx, 3, 4, true,  false), // 0xBD
    op(Ldx, Aby, 3, 4, true,  false), // 0xBE
    op(Lax, Aby, 0, 4, true,  true),  // 0xBF
    // 0xC0-0xCF
    op(Cpy, Imm, 2, 2, false, false), // 0xC0
    op(Cmp, Idx, 2, 6, false, false), // 0xC1
    op(Nop, Imm, 0, 2, false, true),  // 0xC2
    op(Dcp, Idx, 0, 8, false, true),  // 0xC3
    op(Cpy, Zp0, 2, 3, false, false), // 0xC4
    op(Cmp, Zp0, 2, 3, false, false), // 0xC5
    op(Dec, Zp0, 2, 5, false, false), // 0xC6
    op(Dcp, Zp0, 0, 5, false, true),  // 0xC7
    op(Iny, Imp, 1, 2, false, false), // 0xC8
    op(Cmp, Imm, 2, 2, false, false), // 0xC9
    op(Dex, Imp, 1, 2, false, false), // 0xCA
    op(Axs, Imm, 0, 2, false, true),  // 0xCB
    op(Cpy, Abs, 3, 4, false, false), // 0xCC
    op(Cmp, Abs, 3, 4, false, false), // 0xCD
    op(Dec, Abs, 3, 6, false, false), // 0xCE
    op(Dcp, Abs, 0, 6, false, true),  // 0xCF
    // 0xD0-0xDF
    op(Bne, Rel, 2, 2, true,  false), // 0xD0
    op(Cmp, Idy, 2, 5, true,  false), // 0xD1
    op(Kil, Imp, 0, 2, false, true),  // 0xD2
    op(Dcp, Idy, 0, 8, false, true),  // 0xD3
    op(Nop, Zpx, 2, 4, false, true),  // 0xD4
    op(Cmp, Zpx, 2, 4, false, false), // 0xD5
    op(Dec, Zpx, 2, 6, false, false), // 0xD6
    op(Dcp, Zpx, 0, 6, false, true),  // 0xD7
    op(Cld, Imp, 1, 2, false, false), // 0xD8
    op(Cmp, Aby, 3, 4, true,  false), // 0xD9
    op(Nop, Imp, 1, 2, false, true),  // 0xDA
    op(Dcp, Aby, 0, 7, false, true),  // 0xDB
    op(Nop, Abx, 3, 4, true,  true),  // 0xDC
    op(Cmp, Abx, 3, 4, true,  false), // 0xDD
    op(Dec, Abx, 3, 7, false, false), // 0xDE
    op(Dcp, Abx, 0, 7, false, true),  // 0xDF
    // 0xE0-0xEF
    op(Cpx, Imm, 2, 2, false, false), // 0xE0
    op(Sbc, Idx, 2, 6, false, false), // 0xE1
    op(Nop, Imm, 0, 2, false, true),  // 0xE2
    op(Isc, Idx, 0, 8, false, true),  // 0xE3
    op(Cpx, Zp0, 2, 3, false, false), // 0xE4
    op(Sbc, Zp0, 2, 3, false, false), // 0xE5
    op(Inc, Zp0, 2, 5, false, false), // 0xE6
    op(Isc, Zp0, 0, 5, false, true),  // 0xE7
    op(Inx, Imp, 1, 2, false, false), // 0xE8
    op(Sbc, Imm, 2, 2, false, false), // 0xE9
    op(Nop, Imp, 1, 2, false, false), // 0xEA
    op(Sbc, Imm, 0, 2, false, true),  // 0xEB
    op(Cpx, Abs, 3, 4, false, false), // 0xEC
    op(Sbc, Abs, 3, 4, false, false), // 0xED
    op(Inc, Abs, 3, 6, false, false), // 0xEE
    op(Isc, Abs, 0, 6, false, true),  // 0xEF
    // 0xF0-0xFF
    op(Beq, Rel, 2, 2, true,  false), // 0xF0
    op(Sbc, Idy, 2, 5, true,  false), // 0xF1
    op(Kil, Imp, 0, 2, false, true),  // 0xF2
    op(Isc, Idy, 0, 8, false, true),  // 0xF3
    op(Nop, Zpx, 2, 4, false, true),  // 0xF4
    op(Sbc, Zpx, 2, 4, false, false), // 0xF5
    op(Inc, Zpx, 2, 6, false, false), // 0xF6
    op(Isc, Zpx, 0, 6, false, true),  // 0xF7
    op(Sed, Imp, 1, 2, false, false), // 0xF8
    op(Sbc, Aby, 3, 4, true,  false), // 0xF9
    op(Nop, Imp, 1, 2, false, true),  // 0xFA
    op(Isc, Aby, 0, 7, false, true),  // 0xFB
    op(Nop, Abx, 3, 4, true,  true),  // 0xFC
    op(Sbc, Abx, 3, 4, true,  false), // 0xFD
    op(Inc, Abx, 3, 7, false, false), // 0xFE
    op(Isc, Abx, 0, 7, false, true),  // 0xFF
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_all_opcodes() {
        assert_eq!(OPCODE_TABLE.len(), 256);
    }

    #[test]
    fn common_opcode_entries() {
        // LDA immediate
        let lda = &OPCODE_TABLE[0xA9];
        assert_eq!(lda.mnemonic, Mnemonic::Lda);
        assert_eq!(lda.mode, AddrMode::Imm);
        assert_eq!(lda.cycles, 2);

        // JMP indirect
        let jmp = &OPCODE_TABLE[0x6C];
        assert_eq!(jmp.mnemonic, Mnemonic::Jmp);
        assert_eq!(jmp.mode, AddrMode::Ind);
        assert_eq!(jmp.cycles, 5);

        // BRK
        assert_eq!(OPCODE_TABLE[0x00].cycles, 7);
    }

    #[test]
    fn stores_never_take_page_penalty() {
        for opcode in [0x91u8, 0x99, 0x9D] {
            assert!(
                !OPCODE_TABLE[opcode as usize].page_penalty,
                "STA ${opcode:02X} must not add a page-cross cycle"
            );
        }
    }

    #[test]
    fn indexed_reads_take_page_penalty() {
        for opcode in [0xB1u8, 0xB9, 0xBD, 0xBE, 0xBC] {
            assert!(
                OPCODE_TABLE[opcode as usize].page_penalty,
                "load ${opcode:02X} must add a page-cross cycle"
            );
        }
    }

    #[test]
    fn only_ea_is_the_official_nop() {
        assert!(!OPCODE_TABLE[0xEA].unofficial);
        for opcode in [0x04u8, 0x1A, 0x80, 0xDC] {
            assert!(OPCODE_TABLE[opcode as usize].unofficial);
        }
    }
}
