#![allow(unused)]
/// riscv sstatus 寄存器中 SIE 位的掩码
pub const SSTATUS_SIE: usize = 1 << 1;
/// riscv sstatus 寄存器中 SPIE 位的掩码
pub const SSTATUS_SPIE: usize = 1 << 5;
/// riscv sstatus 寄存器中 SPP 位的掩码
pub const SSTATUS_SPP: usize = 1 << 8;
