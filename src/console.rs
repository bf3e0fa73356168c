//! Console abstraction
//!
//! Output goes through SBI legacy console calls. A single spin lock
//! serializes output so log lines and formatted writes from different
//! call sites never interleave byte-by-byte.

use core::fmt::{self, Write};

use crate::sync::SpinLock;

/// Console lock (protects the atomicity of a single write)
static CONSOLE_LOCK: SpinLock<()> = SpinLock::new(());

#[inline]
fn write_str_unlocked(s: &str) {
    for b in s.bytes() {
        crate::arch::lib::sbi::console_putchar(b as usize);
    }
}

#[inline]
fn putchar_unlocked(c: u8) {
    crate::arch::lib::sbi::console_putchar(c as usize);
}

#[inline]
fn getchar_unlocked() -> Option<u8> {
    let ch = crate::arch::lib::sbi::console_getchar();
    if ch == usize::MAX { None } else { Some(ch as u8) }
}

/// Locked string output (public interface)
pub fn write_str(s: &str) {
    let _guard = CONSOLE_LOCK.lock();
    write_str_unlocked(s);
}

/// Locked single character output (public interface)
pub fn putchar(c: u8) {
    let _guard = CONSOLE_LOCK.lock();
    putchar_unlocked(c);
}

/// Locked single character input (public interface)
pub fn getchar() -> Option<u8> {
    let _guard = CONSOLE_LOCK.lock();
    getchar_unlocked()
}

/// Console output struct (implements Write, used by the logging system)
pub struct Stdout;

impl Write for Stdout {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        crate::console::write_str(s);
        Ok(())
    }

    fn write_fmt(&mut self, args: fmt::Arguments) -> fmt::Result {
        // Override write_fmt so the whole formatted output happens under one
        // lock acquisition, keeping interleaved callers from splitting lines.
        let _guard = CONSOLE_LOCK.lock();

        struct UnlockedWriter;
        impl Write for UnlockedWriter {
            fn write_str(&mut self, s: &str) -> fmt::Result {
                write_str_unlocked(s);
                Ok(())
            }
        }

        UnlockedWriter.write_fmt(args)
    }
}
