// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Blocking SysTick delay exposed as an `embedded-hal` 1.0 [`DelayNs`].

use cortex_m::delay::Delay;
use embedded_hal::delay::DelayNs;

/// SysTick-based delay. Resolution is one microsecond; shorter requests round up.
pub struct SysTickDelay {
    inner: Delay,
}

impl SysTickDelay {
    /// `sysclk_hz` is the core clock frequency.
    pub fn new(syst: cortex_m::peripheral::SYST, sysclk_hz: u32) -> Self {
        Self {
            inner: Delay::new(syst, sysclk_hz),
        }
    }

    pub fn free(self) -> cortex_m::peripheral::SYST {
        self.inner.free()
    }
}

impl DelayNs for SysTickDelay {
    #[inline]
    fn delay_ns(&mut self, ns: u32) {
        self.inner.delay_us(ns.div_ceil(1_000));
    }

    #[inline]
    fn delay_us(&mut self, us: u32) {
        self.inner.delay_us(us);
    }

    #[inline]
    fn delay_ms(&mut self, ms: u32) {
        self.inner.delay_ms(ms);
    }
}
