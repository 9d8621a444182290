//! Bring up and calibrate ADC1, then switch sample times
//!
//! Runs from the reset clock configuration: HSI at 8 MHz feeds PCLK2
//! undivided.

#![no_main]
#![no_std]

use cortex_m_rt::entry;
use panic_halt as _;
use rtt_target::{rprintln, rtt_init_print};

use stm32f1xx_adc::{
    adc::{Adc, Bounded, SampleTime},
    pac,
    prelude::*,
    rcc::AdcPre,
};

#[entry]
fn main() -> ! {
    rtt_init_print!();
    let dp = pac::Peripherals::take().unwrap();

    let mut rcc = dp.RCC.constrain();

    let pclk2 = 8.MHz();
    let pre = AdcPre::for_pclk2(pclk2).unwrap();
    rprintln!("ADC clock: {} Hz", pre.adc_clock(pclk2).raw());

    let adc1 = Adc::with_prescaler(dp.ADC1, pre);
    let mut adc1 = match adc1.init(SampleTime::T_1_5, &mut rcc, &mut Bounded::new(100_000)) {
        Ok(adc1) => {
            rprintln!("ADC1 calibrated");
            adc1
        }
        Err((e, adc1)) => {
            rprintln!("ADC1 calibration failed: {:?}", e);
            rprintln!("ADC1 enabled: {}", adc1.is_enabled());
            loop {
                cortex_m::asm::wfi();
            }
        }
    };

    // High impedance source on the inputs from here on
    adc1.set_sample_time(SampleTime::T_239_5);
    rprintln!("ADC1 enabled: {}", adc1.is_enabled());

    let adc1 = adc1.disable();
    rprintln!("ADC1 enabled: {}", adc1.is_enabled());

    loop {
        cortex_m::asm::wfi();
    }
}
