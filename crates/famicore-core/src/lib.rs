//! famicore: an NES (Famicom) emulation core.
//!
//! The console reproduces the 2A03 CPU and 2C02 PPU at machine-cycle
//! granularity: one CPU instruction, then exactly three PPU dots per cycle
//! consumed. Hosts feed it an iNES image and button state and present the
//! 256x240 palette-index frames it produces.
//!
//! ```no_run
//! use famicore_core::{Button, Console};
//!
//! let rom = std::fs::read("game.nes").unwrap();
//! let mut console = Console::new(&rom).unwrap();
//!
//! console.set_button(Button::Start, true);
//! console.step_frame();
//! let frame = console.frame(); // 256x240 palette indices
//! # let _ = frame;
//! ```

mod bus;
mod console;
mod controller;
mod video;

pub use bus::CpuBus;
pub use console::{Console, ConsoleError};
pub use controller::{Button, Controller};
pub use video::{VideoBus, VideoMem};

pub use famicore_ppu::{FRAME_HEIGHT, FRAME_SIZE, FRAME_WIDTH};
