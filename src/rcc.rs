//! Reset and Clock Control
//!
//! The ADC controller only needs three services from the RCC: selecting the
//! ADC prescaler, opening the APB2 clock gate of an ADC and pulsing its
//! reset line. These are exposed through the [`ClockControl`] trait so that
//! the ADC can be driven against something other than the real RCC.
//!
//! The ADC kernel clock is derived from PCLK2 through `ADCPRE` and must not
//! exceed 14 MHz. See Figure 8 "Clock tree" in Reference Manual RM0008.
//!
//! # Usage
//!
//! ```rust,ignore
//!     let dp = pac::Peripherals::take().unwrap();
//!
//!     let mut rcc = dp.RCC.constrain();
//!
//!     // 72 MHz PCLK2 -> 12 MHz ADC clock
//!     let pre = AdcPre::for_pclk2(72.MHz()).unwrap();
//!     assert_eq!(pre, AdcPre::Div6);
//!
//!     rcc.set_adc_prescaler(pre);
//!     rcc.enable(Peripheral::Adc1);
//!     rcc.reset(Peripheral::Adc1);
//! ```
#![deny(missing_docs)]

use cortex_m::interrupt;

use crate::stm32::RCC;
use crate::time::Hertz;

/// Maximum ADC input clock frequency (datasheet, f_ADC)
pub const MAX_ADC_CLOCK: Hertz = Hertz::MHz(14);

/// ADC prescaler, applied to PCLK2
///
/// Refer to RM0008 Rev 21 - Chapter 7.3.2, `ADCPRE`
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcPre {
    /// PCLK2 divided by 2
    Div2 = 0b00,
    /// PCLK2 divided by 4
    Div4 = 0b01,
    /// PCLK2 divided by 6
    #[default]
    Div6 = 0b10,
    /// PCLK2 divided by 8
    Div8 = 0b11,
}

impl AdcPre {
    /// Division ratio
    pub const fn divisor(self) -> u32 {
        match self {
            AdcPre::Div2 => 2,
            AdcPre::Div4 => 4,
            AdcPre::Div6 => 6,
            AdcPre::Div8 => 8,
        }
    }

    /// ADC clock that results from applying this prescaler to `pclk2`
    pub fn adc_clock(self, pclk2: Hertz) -> Hertz {
        pclk2 / self.divisor()
    }

    /// Smallest prescaler that keeps the ADC clock at or below
    /// [`MAX_ADC_CLOCK`]
    ///
    /// Returns `None` if `pclk2` is too fast even for `Div8`.
    pub fn for_pclk2(pclk2: Hertz) -> Option<Self> {
        match pclk2.raw().div_ceil(MAX_ADC_CLOCK.raw()) {
            0..=2 => Some(AdcPre::Div2),
            3..=4 => Some(AdcPre::Div4),
            5..=6 => Some(AdcPre::Div6),
            7..=8 => Some(AdcPre::Div8),
            _ => None,
        }
    }
}

/// Clock services consumed by the ADC controller
///
/// All three must have completed before the first ADC register access.
pub trait ClockControl {
    /// Select the PCLK2 -> ADC clock division
    fn set_adc_prescaler(&mut self, pre: AdcPre);
    /// Open the bus clock gate of `peripheral`
    fn enable(&mut self, peripheral: Peripheral);
    /// Pulse the reset line of `peripheral`, returning its registers to
    /// their power-on values
    fn reset(&mut self, peripheral: Peripheral);
}

/// Extension trait that constrains the `RCC` peripheral
pub trait RccExt {
    /// Constrains the `RCC` peripheral so it plays nicely with the
    /// other abstractions
    fn constrain(self) -> Rcc;
}

impl RccExt for RCC {
    fn constrain(self) -> Rcc {
        Rcc { rb: self }
    }
}

/// Constrained RCC peripheral
pub struct Rcc {
    rb: RCC,
}

impl Rcc {
    /// Releases the `RCC` peripheral
    pub fn release(self) -> RCC {
        self.rb
    }
}

// This macro uses the paste::item! macro to create identifiers.
//
// https://crates.io/crates/paste
macro_rules! apb2_reset_and_enable_control {
    ($( $( #[ $pmeta:meta ] )* $p:ident ),+ $(,)?) => {
        paste::item! {
            /// APB2 peripherals that the ADC controller can enable and reset
            #[derive(Clone, Copy, Debug, PartialEq, Eq)]
            #[cfg_attr(feature = "defmt", derive(defmt::Format))]
            pub enum Peripheral {
                $(
                    $( #[ $pmeta ] )*
                    #[doc = "`" $p "` on APB2"]
                    $p,
                )+
            }

            impl ClockControl for Rcc {
                fn set_adc_prescaler(&mut self, pre: AdcPre) {
                    // CFGR is shared with the core clock configuration
                    interrupt::free(|_| {
                        self.rb
                            .cfgr()
                            .modify(|_, w| unsafe { w.adcpre().bits(pre as u8) });
                    });
                }

                #[inline(always)]
                fn enable(&mut self, peripheral: Peripheral) {
                    interrupt::free(|_| match peripheral {
                        $(
                            $( #[ $pmeta ] )*
                            Peripheral::$p => {
                                self.rb
                                    .apb2enr()
                                    .modify(|_, w| w.[< $p:lower en >]().set_bit());
                            }
                        )+
                    });
                }

                #[inline(always)]
                fn reset(&mut self, peripheral: Peripheral) {
                    interrupt::free(|_| match peripheral {
                        $(
                            $( #[ $pmeta ] )*
                            Peripheral::$p => {
                                self.rb
                                    .apb2rstr()
                                    .modify(|_, w| w.[< $p:lower rst >]().set_bit());
                                self.rb
                                    .apb2rstr()
                                    .modify(|_, w| w.[< $p:lower rst >]().clear_bit());
                            }
                        )+
                    });
                }
            }
        }
    };
}

apb2_reset_and_enable_control! {
    Adc1,
    #[cfg(feature = "adc2")]
    Adc2,
}

#[cfg(test)]
mod tests {
    use super::{AdcPre, MAX_ADC_CLOCK};
    use crate::time::Hertz;

    #[test]
    fn prescaler_keeps_adc_clock_in_range() {
        // Common PCLK2 frequencies on F1 parts
        for mhz in [8, 16, 24, 28, 36, 48, 56, 64, 72] {
            let pclk2 = Hertz::MHz(mhz);
            let pre = AdcPre::for_pclk2(pclk2).unwrap();
            assert!(pre.adc_clock(pclk2) <= MAX_ADC_CLOCK);
        }
    }

    #[test]
    fn prescaler_is_the_smallest_that_fits() {
        assert_eq!(AdcPre::for_pclk2(Hertz::MHz(8)), Some(AdcPre::Div2));
        assert_eq!(AdcPre::for_pclk2(Hertz::MHz(28)), Some(AdcPre::Div2));
        assert_eq!(AdcPre::for_pclk2(Hertz::MHz(36)), Some(AdcPre::Div4));
        assert_eq!(AdcPre::for_pclk2(Hertz::MHz(72)), Some(AdcPre::Div6));
        assert_eq!(AdcPre::for_pclk2(Hertz::MHz(96)), Some(AdcPre::Div8));
        assert_eq!(AdcPre::for_pclk2(Hertz::MHz(113)), None);
    }

    #[test]
    fn default_prescaler() {
        // 72 MHz maximum PCLK2 / 6 = 12 MHz
        assert_eq!(AdcPre::default(), AdcPre::Div6);
        assert_eq!(AdcPre::Div6.adc_clock(Hertz::MHz(72)), Hertz::MHz(12));
        assert_eq!(AdcPre::Div8 as u8, 0b11);
    }
}
