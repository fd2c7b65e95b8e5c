//! Whole-system benchmarks: instruction stepping and frame pacing on a
//! synthetic NROM cartridge.

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use famicore_core::Console;

/// Minimal NROM image: a JMP-to-self loop with rendering left disabled.
fn minimal_rom() -> Vec<u8> {
    let mut rom = vec![0u8; 16 + 32768 + 8192];

    rom[0] = 0x4E;
    rom[1] = 0x45;
    rom[2] = 0x53;
    rom[3] = 0x1A;
    rom[4] = 2; // 32 KiB PRG
    rom[5] = 1; // 8 KiB CHR

    // JMP $8000 at the reset target
    rom[16] = 0x4C;
    rom[17] = 0x00;
    rom[18] = 0x80;
    rom[16 + 0x7FFC] = 0x00;
    rom[16 + 0x7FFD] = 0x80;

    rom
}

/// Same image, but the program enables background rendering first so the
/// fetch pipeline and pixel output run.
fn rendering_rom() -> Vec<u8> {
    let mut rom = minimal_rom();
    let program = [
        0xA9, 0x08, // LDA #$08
        0x8D, 0x01, 0x20, // STA $2001
        0x4C, 0x05, 0x80, // JMP $8005
    ];
    rom[16..16 + program.len()].copy_from_slice(&program);
    rom
}

fn bench_instruction_step(c: &mut Criterion) {
    let mut console = Console::new(&minimal_rom()).expect("valid image");

    let mut group = c.benchmark_group("cpu");
    group.throughput(Throughput::Elements(1));
    group.bench_function("single_instruction", |b| {
        b.iter(|| {
            black_box(console.step());
        });
    });
    group.finish();
}

fn bench_frame_step(c: &mut Criterion) {
    let mut idle = Console::new(&minimal_rom()).expect("valid image");
    let mut rendering = Console::new(&rendering_rom()).expect("valid image");

    let mut group = c.benchmark_group("frame");
    group.throughput(Throughput::Elements(1));
    group.bench_function("idle", |b| {
        b.iter(|| {
            black_box(idle.step_frame());
        });
    });
    group.bench_function("rendering", |b| {
        b.iter(|| {
            black_box(rendering.step_frame());
        });
    });
    group.finish();
}

criterion_group!(benches, bench_instruction_step, bench_frame_step);
criterion_main!(benches);
