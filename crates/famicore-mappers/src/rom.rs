//! iNES ROM image parsing.
//!
//! The iNES container is a 16-byte header followed by an optional 512-byte
//! trainer, the PRG-ROM data (16 KiB units) and the CHR-ROM data (8 KiB
//! units). A CHR count of zero means the cartridge carries 8 KiB of CHR-RAM
//! instead of CHR-ROM.

use crate::Mirroring;

/// Errors that can occur when parsing an iNES image.
#[derive(Debug, thiserror::Error)]
pub enum RomError {
    /// The first four bytes are not `N E S \x1A`.
    #[error("invalid iNES magic number: expected [4E 45 53 1A], got {0:02X?}")]
    InvalidMagic([u8; 4]),

    /// The file is shorter than the header plus the declared bank counts.
    #[error("truncated ROM image: expected at least {expected} bytes, got {actual}")]
    Truncated {
        /// Minimum size implied by the header.
        expected: usize,
        /// Actual size of the input.
        actual: usize,
    },
}

/// Parsed iNES header.
///
/// ```text
/// Byte 0-3:   Magic "NES" + MS-DOS EOF (0x4E 0x45 0x53 0x1A)
/// Byte 4:     PRG-ROM size in 16 KiB units
/// Byte 5:     CHR-ROM size in 8 KiB units (0 = 8 KiB CHR-RAM)
/// Byte 6:     Flags 6 - NNNN FTBM (mapper low nibble, four-screen,
///             trainer, battery, mirroring)
/// Byte 7:     Flags 7 - NNNN xxxx (mapper high nibble)
/// Byte 8:     PRG-RAM size in 8 KiB units (0 treated as 1)
/// Byte 9-15:  Reserved
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RomHeader {
    /// Number of 16 KiB PRG-ROM banks.
    pub prg_banks: u8,
    /// Number of 8 KiB CHR-ROM banks (0 means CHR-RAM).
    pub chr_banks: u8,
    /// iNES mapper number.
    pub mapper: u8,
    /// Nametable mirroring wired by the cartridge.
    pub mirroring: Mirroring,
    /// Battery-backed SRAM present at $6000-$7FFF.
    pub has_battery: bool,
    /// 512-byte trainer present before PRG-ROM.
    pub has_trainer: bool,
    /// Number of 8 KiB PRG-RAM banks (header byte 8, 0 treated as 1).
    pub prg_ram_banks: u8,
}

impl RomHeader {
    /// iNES magic number: "NES" followed by MS-DOS EOF.
    const MAGIC: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A];

    /// Parse the 16-byte header from the start of `data`.
    pub fn parse(data: &[u8]) -> Result<Self, RomError> {
        if data.len() < 16 {
            return Err(RomError::Truncated {
                expected: 16,
                actual: data.len(),
            });
        }

        let magic = [data[0], data[1], data[2], data[3]];
        if magic != Self::MAGIC {
            return Err(RomError::InvalidMagic(magic));
        }

        let flags6 = data[6];
        let flags7 = data[7];

        let mapper = (flags7 & 0xF0) | (flags6 >> 4);
        let mirroring = if flags6 & 0x08 != 0 {
            Mirroring::FourScreen
        } else if flags6 & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        Ok(Self {
            prg_banks: data[4],
            chr_banks: data[5],
            mapper,
            mirroring,
            has_battery: flags6 & 0x02 != 0,
            has_trainer: flags6 & 0x04 != 0,
            prg_ram_banks: if data[8] == 0 { 1 } else { data[8] },
        })
    }
}

/// A parsed iNES image: header plus the raw PRG and CHR data.
#[derive(Debug, Clone)]
pub struct Rom {
    /// Header information.
    pub header: RomHeader,
    /// PRG-ROM data, `16384 * prg_banks` bytes.
    pub prg_rom: Vec<u8>,
    /// CHR-ROM data, or empty when the cartridge uses CHR-RAM.
    pub chr_rom: Vec<u8>,
}

/// Size of one PRG-ROM bank in bytes.
pub const PRG_BANK_SIZE: usize = 16384;
/// Size of one CHR bank in bytes.
pub const CHR_BANK_SIZE: usize = 8192;

impl Rom {
    /// Parse a complete iNES image from raw bytes.
    ///
    /// The trainer, when present, is consumed and discarded; only the PRG
    /// and CHR payloads matter to the emulation core.
    pub fn load(data: &[u8]) -> Result<Self, RomError> {
        let header = RomHeader::parse(data)?;

        let mut offset = 16;
        if header.has_trainer {
            offset += 512;
        }

        let prg_size = header.prg_banks as usize * PRG_BANK_SIZE;
        let chr_size = header.chr_banks as usize * CHR_BANK_SIZE;

        let expected = offset + prg_size + chr_size;
        if data.len() < expected {
            return Err(RomError::Truncated {
                expected,
                actual: data.len(),
            });
        }

        let prg_rom = data[offset..offset + prg_size].to_vec();
        offset += prg_size;
        let chr_rom = data[offset..offset + chr_size].to_vec();

        log::debug!(
            "loaded iNES image: mapper {}, {} PRG bank(s), {} CHR bank(s), {:?} mirroring",
            header.mapper,
            header.prg_banks,
            header.chr_banks,
            header.mirroring
        );

        Ok(Self {
            header,
            prg_rom,
            chr_rom,
        })
    }

    /// True when the cartridge provides CHR-RAM instead of CHR-ROM.
    #[must_use]
    pub fn has_chr_ram(&self) -> bool {
        self.chr_rom.is_empty()
    }
}
