//! PPU register definitions (PPUCTRL, PPUMASK, PPUSTATUS).

use bitflags::bitflags;

bitflags! {
    /// PPUCTRL ($2000), write only.
    ///
    /// ```text
    /// 7  bit  0
    /// ---- ----
    /// VPHB SINN
    /// |||| ||||
    /// |||| ||++- Base nametable address (0=$2000 1=$2400 2=$2800 3=$2C00)
    /// |||| |+--- VRAM increment per PPUDATA access (0: +1, 1: +32)
    /// |||| +---- Sprite pattern table for 8x8 sprites (0: $0000, 1: $1000)
    /// |||+------ Background pattern table (0: $0000, 1: $1000)
    /// ||+------- Sprite size (0: 8x8, 1: 8x16)
    /// |+-------- Master/slave select (unused on the NES)
    /// +--------- Generate NMI at vblank start
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PpuCtrl: u8 {
        /// Nametable select, low bit.
        const NAMETABLE_X = 0b0000_0001;
        /// Nametable select, high bit.
        const NAMETABLE_Y = 0b0000_0010;
        /// VRAM address increment (0: +1 across, 1: +32 down).
        const VRAM_INCREMENT = 0b0000_0100;
        /// Sprite pattern table address (8x8 mode only).
        const SPRITE_TABLE = 0b0000_1000;
        /// Background pattern table address.
        const BG_TABLE = 0b0001_0000;
        /// Sprite size (0: 8x8, 1: 8x16).
        const SPRITE_SIZE = 0b0010_0000;
        /// Master/slave select, unused.
        const MASTER_SLAVE = 0b0100_0000;
        /// Generate NMI at vblank.
        const NMI_ENABLE = 0b1000_0000;
    }
}

impl PpuCtrl {
    /// VRAM address increment applied after each PPUDATA access.
    #[inline]
    pub fn vram_increment(self) -> u16 {
        if self.contains(Self::VRAM_INCREMENT) {
            32
        } else {
            1
        }
    }

    /// Sprite pattern table base for 8x8 sprites.
    #[inline]
    pub fn sprite_table_addr(self) -> u16 {
        if self.contains(Self::SPRITE_TABLE) {
            0x1000
        } else {
            0x0000
        }
    }

    /// Background pattern table base.
    #[inline]
    pub fn bg_table_addr(self) -> u16 {
        if self.contains(Self::BG_TABLE) {
            0x1000
        } else {
            0x0000
        }
    }

    /// Sprite height in pixels, 8 or 16.
    #[inline]
    pub fn sprite_height(self) -> u16 {
        if self.contains(Self::SPRITE_SIZE) {
            16
        } else {
            8
        }
    }

    /// Whether vblank should raise NMI.
    #[inline]
    pub fn nmi_enabled(self) -> bool {
        self.contains(Self::NMI_ENABLE)
    }
}

bitflags! {
    /// PPUMASK ($2001), write only.
    ///
    /// ```text
    /// 7  bit  0
    /// ---- ----
    /// BGRs bMmG
    /// |||| ||||
    /// |||| |||+- Greyscale
    /// |||| ||+-- Show background in leftmost 8 pixels
    /// |||| |+--- Show sprites in leftmost 8 pixels
    /// |||| +---- Show background
    /// |||+------ Show sprites
    /// ||+------- Emphasize red
    /// |+-------- Emphasize green
    /// +--------- Emphasize blue
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PpuMask: u8 {
        /// Greyscale mode.
        const GREYSCALE = 0b0000_0001;
        /// Show background in the leftmost 8 pixels.
        const SHOW_BG_LEFT = 0b0000_0010;
        /// Show sprites in the leftmost 8 pixels.
        const SHOW_SPRITES_LEFT = 0b0000_0100;
        /// Show background.
        const SHOW_BG = 0b0000_1000;
        /// Show sprites.
        const SHOW_SPRITES = 0b0001_0000;
        /// Emphasize red.
        const EMPHASIZE_RED = 0b0010_0000;
        /// Emphasize green.
        const EMPHASIZE_GREEN = 0b0100_0000;
        /// Emphasize blue.
        const EMPHASIZE_BLUE = 0b1000_0000;
    }
}

impl PpuMask {
    /// Rendering is enabled when background or sprites are shown.
    #[inline]
    pub fn rendering_enabled(self) -> bool {
        self.intersects(Self::SHOW_BG | Self::SHOW_SPRITES)
    }

    /// Background layer enabled.
    #[inline]
    pub fn show_background(self) -> bool {
        self.contains(Self::SHOW_BG)
    }

    /// Sprite layer enabled.
    #[inline]
    pub fn show_sprites(self) -> bool {
        self.contains(Self::SHOW_SPRITES)
    }

    /// Background visible in the leftmost 8 pixels.
    #[inline]
    pub fn show_background_left(self) -> bool {
        self.contains(Self::SHOW_BG_LEFT)
    }

    /// Sprites visible in the leftmost 8 pixels.
    #[inline]
    pub fn show_sprites_left(self) -> bool {
        self.contains(Self::SHOW_SPRITES_LEFT)
    }
}

bitflags! {
    /// PPUSTATUS ($2002), read only. The low five bits return the open-bus
    /// latch of the last register write.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PpuStatus: u8 {
        /// More than 8 sprites landed on one scanline.
        const SPRITE_OVERFLOW = 0b0010_0000;
        /// Sprite 0 overlapped an opaque background pixel.
        const SPRITE_ZERO_HIT = 0b0100_0000;
        /// Vertical blank in progress.
        const VBLANK = 0b1000_0000;
    }
}

impl PpuStatus {
    /// Vblank flag state.
    #[inline]
    pub fn in_vblank(self) -> bool {
        self.contains(Self::VBLANK)
    }
}
