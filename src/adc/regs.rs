//! Register map of the F1 ADC, as far as bring-up is concerned
//!
//! Refer to RM0008 Rev 21 - Chapter 11.12

/// ADC registers touched by this driver
///
/// The data register and the injected-channel registers are left alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reg {
    /// Control register 1 (`ADC_CR1`)
    Cr1,
    /// Control register 2 (`ADC_CR2`)
    Cr2,
    /// Sample time register 1 (`ADC_SMPR1`), channels 10..=17
    Smpr1,
    /// Sample time register 2 (`ADC_SMPR2`), channels 0..=9
    Smpr2,
    /// Regular sequence register 1 (`ADC_SQR1`), holds the sequence length
    Sqr1,
}

/// `ADC_CR2` bits
pub mod cr2 {
    /// A/D converter ON / OFF
    pub const ADON: u32 = 1 << 0;
    /// A/D calibration, cleared by hardware once done
    pub const CAL: u32 = 1 << 2;
    /// Reset calibration, cleared by hardware once the calibration
    /// registers are initialized
    pub const RSTCAL: u32 = 1 << 3;
    /// External event select for regular group: `SWSTART`
    pub const EXTSEL_SWSTART: u32 = 0b111 << 17;
    /// External trigger conversion mode for regular channels
    pub const EXTTRIG: u32 = 1 << 20;
}

/// Width of one sample time field in `ADC_SMPRx`
pub const SMP_WIDTH: u32 = 3;
/// Number of sample time fields in `ADC_SMPR1` (channels 10..=17)
pub const SMPR1_FIELDS: u32 = 8;
/// Number of sample time fields in `ADC_SMPR2` (channels 0..=9)
pub const SMPR2_FIELDS: u32 = 10;

/// Raw access to an ADC register block
///
/// Every call is a volatile access with immediate effect on the
/// peripheral. There is no shadow copy.
pub trait RegisterAccess {
    /// Read the current value of `reg`
    fn read(&self, reg: Reg) -> u32;

    /// Overwrite `reg` with `bits`
    fn write(&self, reg: Reg, bits: u32);

    /// Read-modify-write `reg`, setting the bits in `mask`
    #[inline(always)]
    fn set_bits(&self, reg: Reg, mask: u32) {
        let bits = self.read(reg);
        self.write(reg, bits | mask);
    }

    /// Read-modify-write `reg`, clearing the bits in `mask`
    #[inline(always)]
    fn clear_bits(&self, reg: Reg, mask: u32) {
        let bits = self.read(reg);
        self.write(reg, bits & !mask);
    }

    /// Returns `true` if any bit in `mask` is set in `reg`
    #[inline(always)]
    fn is_set(&self, reg: Reg, mask: u32) -> bool {
        self.read(reg) & mask != 0
    }
}

// Implemented by all PAC ADC instances
macro_rules! register_access {
    ($( $( #[ $pmeta:meta ] )* $ADC:ty ),+ $(,)?) => {
        $(
            $( #[ $pmeta ] )*
            impl RegisterAccess for $ADC {
                #[inline(always)]
                fn read(&self, reg: Reg) -> u32 {
                    match reg {
                        Reg::Cr1 => self.cr1().read().bits(),
                        Reg::Cr2 => self.cr2().read().bits(),
                        Reg::Smpr1 => self.smpr1().read().bits(),
                        Reg::Smpr2 => self.smpr2().read().bits(),
                        Reg::Sqr1 => self.sqr1().read().bits(),
                    }
                }

                #[inline(always)]
                fn write(&self, reg: Reg, bits: u32) {
                    // unsafe: the driver only writes documented bit patterns
                    match reg {
                        Reg::Cr1 => {
                            self.cr1().write(|w| unsafe { w.bits(bits) });
                        }
                        Reg::Cr2 => {
                            self.cr2().write(|w| unsafe { w.bits(bits) });
                        }
                        Reg::Smpr1 => {
                            self.smpr1().write(|w| unsafe { w.bits(bits) });
                        }
                        Reg::Smpr2 => {
                            self.smpr2().write(|w| unsafe { w.bits(bits) });
                        }
                        Reg::Sqr1 => {
                            self.sqr1().write(|w| unsafe { w.bits(bits) });
                        }
                    }
                }
            }
        )+
    };
}

register_access! {
    crate::stm32::ADC1,
    #[cfg(feature = "adc2")]
    crate::stm32::ADC2,
}
