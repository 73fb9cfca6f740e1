// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Turret firmware entry point.
//!
//! On the MCU this listens for protocol frames on USART1 and drives the turret. Built for the
//! host it performs a dry run of one full-step revolution and prints the coil patterns.

#![cfg_attr(target_os = "none", no_std, no_main)]

#[cfg(target_os = "none")]
mod firmware {
    use core::fmt::Write;

    use cortex_m_rt::entry;
    use panic_halt as _;

    use hal::{
        pac,
        prelude::*,
        serial::{Config, Serial},
        timer::Channel1,
    };
    use stm32f7xx_hal as hal;

    use okon::control::Turret;
    use okon::drivers::{Sg90, StepSequencer};
    use okon::hw::{BoardPins, GpioPort, ServoPwm, SysTickDelay, Usart};
    use okon::protocol::Parser;

    #[entry]
    fn main() -> ! {
        // Peripherals
        let dp = pac::Peripherals::take().unwrap();
        let cp = cortex_m::Peripherals::take().unwrap();

        // Clocks
        let rcc = dp.RCC.constrain();
        let clocks = rcc.cfgr.sysclk(216.MHz()).freeze();

        let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD, dp.GPIOE);
        let mut led = pins.led;

        // USART1 (vision host + debug log)
        let usart_cfg = Config {
            baud_rate: 115_200.bps(),
            ..Default::default()
        };
        let serial = Serial::new(
            dp.USART1,
            (pins.usart1.tx, pins.usart1.rx),
            &clocks,
            usart_cfg,
        );
        let mut usart = Usart::new(serial);

        // Pan stepper on PE2..PE5
        let mut gpio = GpioPort::new(pins.stepper.coils);
        let pan = StepSequencer::new([0, 1, 2, 3]);

        // Tilt servo on TIM4_CH1, 50 Hz frame
        let servo_ch = dp
            .TIM4
            .pwm_hz(Channel1::new(pins.servo), 50.Hz(), &clocks)
            .split();
        let tilt = Sg90::new(ServoPwm::new(servo_ch)).unwrap();

        let delay = SysTickDelay::new(cp.SYST, clocks.sysclk().raw());
        let mut turret = Turret::new(pan, tilt, delay);
        let mut parser = Parser::new();

        usart.println("okon turret ready");

        loop {
            let Some(byte) = usart.read_byte() else {
                continue;
            };
            let Some(cmd) = parser.push(byte) else {
                continue;
            };

            led.set_high();
            let _ = writeln!(usart, "cmd {:?}\r", cmd);
            if let Err(e) = turret.apply(&mut gpio, cmd) {
                let _ = writeln!(usart, "motor error: {:?}\r", e);
            }
            led.set_low();
        }
    }
}

#[cfg(not(target_os = "none"))]
fn main() {
    use embedded_hal::delay::DelayNs;
    use okon::drivers::{SpeedMode, StepSequencer};
    use okon::gpio::GpioBus;

    /// Prints each completed 4-pin pattern.
    struct PrintBus {
        levels: [bool; 4],
        steps: usize,
    }

    impl GpioBus for PrintBus {
        type Pin = usize;
        type Error = core::convert::Infallible;

        fn write_pin(&mut self, pin: usize, level: bool) -> Result<(), Self::Error> {
            self.levels[pin] = level;
            if pin == 3 {
                self.steps += 1;
                if self.steps <= 8 {
                    let bits: String = self
                        .levels
                        .iter()
                        .map(|&l| if l { '1' } else { '0' })
                        .collect();
                    println!("step {:>4}: {}", self.steps, bits);
                }
            }
            Ok(())
        }
    }

    /// Skips the wait; a dry run has no rotor to settle.
    struct DryDelay;

    impl DelayNs for DryDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    let mut bus = PrintBus {
        levels: [false; 4],
        steps: 0,
    };
    let mut stepper = StepSequencer::new([0, 1, 2, 3]);

    match stepper.move_forward_for_angle(&mut bus, &mut DryDelay, 360.0, SpeedMode::FullStep) {
        Ok(()) => println!(
            "{} steps, phase index {}, row {}",
            bus.steps,
            stepper.phase_index(),
            stepper.phase()
        ),
        Err(e) => match e {},
    }
}
