//! Analog to Digital Converter (ADC)
//!
//! Brings an ADC from reset to a calibrated state with software triggered
//! regular conversions, and programs a uniform sample time for all
//! channels.
//!
//! # Usage
//!
//! ```rust,ignore
//!     let dp = pac::Peripherals::take().unwrap();
//!     let mut rcc = dp.RCC.constrain();
//!
//!     let mut adc1 = match dp
//!         .ADC1
//!         .adc(SampleTime::T_55_5, &mut rcc, &mut Bounded::new(100_000))
//!     {
//!         Ok(adc1) => adc1,
//!         // Handed back powered down, `init` may be retried on it
//!         Err((e, _adc1)) => panic!("{:?}", e),
//!     };
//!
//!     // Only while no conversion is ongoing
//!     adc1.set_sample_time(SampleTime::T_239_5);
//!
//!     let adc1 = adc1.disable();
//! ```
//!
//! # Sample time and source impedance
//!
//! The sampling capacitor must charge through the source impedance within
//! the sample time, otherwise readings are inaccurate. At 1.5 cycles the
//! source impedance must be below 0.4 kΩ. At 55.5 cycles up to 50 kΩ is
//! acceptable.
//!
//! # Enabling
//!
//! `ADON` is written once during [`Adc::init`], before calibration. On this
//! family a conversion is only started by writing `ADON` again after
//! t_STAB, which is left to the code that triggers conversions.
#![deny(missing_docs)]

mod f1;
mod regs;
pub mod wait;

#[cfg(feature = "defmt")]
use defmt::{trace, warn};
#[cfg(all(feature = "log", not(feature = "defmt")))]
use log::{trace, warn};

use core::marker::PhantomData;

use crate::rcc::{AdcPre, ClockControl, Peripheral};

pub use regs::{cr2, Reg, RegisterAccess};
pub use regs::{SMPR1_FIELDS, SMPR2_FIELDS, SMP_WIDTH};
pub use wait::{Bounded, Delayed, Spin, Timeout, Wait};

/// Marker trait for all ADC peripherals
pub trait Instance: crate::Sealed + RegisterAccess {
    /// Clock gate and reset line of this ADC
    const PERIPHERAL: Peripheral;
}

/// ADC sampling time
///
/// Options for the sampling time, each is T + 0.5 ADC clock cycles.
//
// Refer to RM0008 Rev 21 - Chapter 11.12.4
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(non_camel_case_types)]
pub enum SampleTime {
    /// 1.5 cycles sampling time
    T_1_5,
    /// 7.5 cycles sampling time
    T_7_5,
    /// 13.5 cycles sampling time
    T_13_5,
    /// 28.5 cycles sampling time
    T_28_5,
    /// 41.5 cycles sampling time
    T_41_5,
    /// 55.5 cycles sampling time
    #[default]
    T_55_5,
    /// 71.5 cycles sampling time
    T_71_5,
    /// 239.5 cycles sampling time
    T_239_5,
}

impl SampleTime {
    /// `SMPx` field encoding
    pub const fn bits(self) -> u8 {
        match self {
            SampleTime::T_1_5 => 0b000,
            SampleTime::T_7_5 => 0b001,
            SampleTime::T_13_5 => 0b010,
            SampleTime::T_28_5 => 0b011,
            SampleTime::T_41_5 => 0b100,
            SampleTime::T_55_5 => 0b101,
            SampleTime::T_71_5 => 0b110,
            SampleTime::T_239_5 => 0b111,
        }
    }
}

impl From<SampleTime> for u8 {
    fn from(val: SampleTime) -> u8 {
        val.bits()
    }
}

/// ADC errors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// `RSTCAL` was not cleared by hardware within the polling budget
    CalibrationResetTimeout,
    /// `CAL` was not cleared by hardware within the polling budget
    CalibrationTimeout,
}

/// `ADC_SMPR1` and `ADC_SMPR2` values applying `t` to every channel
///
/// Every 3-bit field holds `t`, all other bits are zero.
pub const fn smpr_values(t: SampleTime) -> (u32, u32) {
    let smp = t.bits() as u32;
    let mut smpr1 = 0;
    let mut smpr2 = 0;

    let mut i = 0;
    while i < SMPR2_FIELDS {
        if i < SMPR1_FIELDS {
            smpr1 |= smp << (i * SMP_WIDTH);
        }
        smpr2 |= smp << (i * SMP_WIDTH);
        i += 1;
    }
    (smpr1, smpr2)
}

/// Type state for an ADC that has been powered up and calibrated
pub struct Enabled;
/// Type state for an ADC with `ADON` clear
pub struct Disabled;

/// ADC controller
///
/// `ED` is [`Enabled`] after a successful [`Adc::init`] and [`Disabled`]
/// otherwise. The register block is returned on every path, including a
/// failed calibration.
pub struct Adc<ADC, ED> {
    rb: ADC,
    prescaler: AdcPre,
    _enabled: PhantomData<ED>,
}

/// Extension trait that constructs and initialises an [`Adc`] from the
/// PAC peripheral
pub trait AdcExt: Instance + Sized {
    /// Takes ownership of the ADC and runs [`Adc::init`] with the default
    /// prescaler
    ///
    /// On a calibration timeout the ADC comes back powered down along with
    /// the error.
    #[allow(clippy::type_complexity)]
    fn adc(
        self,
        sample_time: SampleTime,
        rcc: &mut impl ClockControl,
        wait: &mut impl Wait,
    ) -> Result<Adc<Self, Enabled>, (Error, Adc<Self, Disabled>)>;
}

impl<ADC: Instance> AdcExt for ADC {
    fn adc(
        self,
        sample_time: SampleTime,
        rcc: &mut impl ClockControl,
        wait: &mut impl Wait,
    ) -> Result<Adc<Self, Enabled>, (Error, Adc<Self, Disabled>)> {
        Adc::new(self).init(sample_time, rcc, wait)
    }
}

impl<ADC: Instance> Adc<ADC, Disabled> {
    /// Wraps the register block without touching the hardware
    ///
    /// The ADC clock will be PCLK2 / 6, which stays below 14 MHz for any
    /// PCLK2 up to the 72 MHz maximum.
    pub fn new(rb: ADC) -> Self {
        Self::with_prescaler(rb, AdcPre::default())
    }

    /// Like [`Adc::new`], with an explicit ADC prescaler
    ///
    /// See [`AdcPre::for_pclk2`].
    pub fn with_prescaler(rb: ADC, prescaler: AdcPre) -> Self {
        Self {
            rb,
            prescaler,
            _enabled: PhantomData,
        }
    }

    /// Initialise ADC
    ///
    /// Clocks and resets the peripheral, selects software triggered
    /// regular conversions, applies `sample_time`, powers the ADC on and
    /// runs the boot-time calibration.
    ///
    /// The ADC clock must be running. With [`Spin`] this never returns
    /// otherwise. With a bounded policy a stuck calibration powers the ADC
    /// down again and hands it back with the error, so `init` can be
    /// retried.
    #[allow(clippy::type_complexity)]
    pub fn init(
        mut self,
        sample_time: SampleTime,
        rcc: &mut impl ClockControl,
        wait: &mut impl Wait,
    ) -> Result<Adc<ADC, Enabled>, (Error, Adc<ADC, Disabled>)> {
        rcc.set_adc_prescaler(self.prescaler);
        rcc.enable(ADC::PERIPHERAL);
        rcc.reset(ADC::PERIPHERAL);

        #[cfg(any(feature = "defmt", feature = "log"))]
        trace!(
            "{:?}: clocked at PCLK2 / {}",
            ADC::PERIPHERAL,
            self.prescaler.divisor()
        );

        self.rb.write(Reg::Cr1, 0);
        // Software triggers conversions
        self.rb.write(Reg::Cr2, cr2::EXTSEL_SWSTART | cr2::EXTTRIG);
        self.rb.write(Reg::Sqr1, 0);

        self.set_sample_time(sample_time);

        self.power_up();
        match self.calibrate(wait) {
            Ok(()) => Ok(self.into_state()),
            Err(e) => {
                self.power_down();
                Err((e, self))
            }
        }
    }

    fn power_up(&mut self) {
        self.rb.set_bits(Reg::Cr2, cr2::ADON);
    }

    /// Resets the calibration registers, then calibrates
    ///
    /// Note: The ADC must be powered on
    fn calibrate(&mut self, wait: &mut impl Wait) -> Result<(), Error> {
        // Refer to RM0008 Rev 21 - Chapter 11.4
        //
        // ADON is written back as 1 along with RSTCAL/CAL. A conversion is
        // not started when another CR2 bit changes in the same write.
        let rb = &self.rb;

        rb.set_bits(Reg::Cr2, cr2::RSTCAL);
        if wait.wait_while(|| rb.is_set(Reg::Cr2, cr2::RSTCAL)).is_err() {
            #[cfg(any(feature = "defmt", feature = "log"))]
            warn!("{:?}: RSTCAL stuck", ADC::PERIPHERAL);
            return Err(Error::CalibrationResetTimeout);
        }

        rb.set_bits(Reg::Cr2, cr2::CAL);
        if wait.wait_while(|| rb.is_set(Reg::Cr2, cr2::CAL)).is_err() {
            #[cfg(any(feature = "defmt", feature = "log"))]
            warn!("{:?}: CAL stuck", ADC::PERIPHERAL);
            return Err(Error::CalibrationTimeout);
        }

        #[cfg(any(feature = "defmt", feature = "log"))]
        trace!("{:?}: calibrated", ADC::PERIPHERAL);

        Ok(())
    }
}

impl<ADC: Instance, ED> Adc<ADC, ED> {
    fn into_state<S>(self) -> Adc<ADC, S> {
        Adc {
            rb: self.rb,
            prescaler: self.prescaler,
            _enabled: PhantomData,
        }
    }

    fn power_down(&mut self) {
        self.rb.clear_bits(Reg::Cr2, cr2::ADON);
    }

    /// Powers down the ADC by clearing `ADON`
    ///
    /// Calibration and clock gating are left as they are. Call
    /// [`Adc::init`] to use the ADC again.
    pub fn disable(mut self) -> Adc<ADC, Disabled> {
        self.power_down();
        self.into_state()
    }

    /// Set ADC sampling time for all channels
    ///
    /// Must not be called while a conversion is ongoing, the result is
    /// undefined in hardware.
    pub fn set_sample_time(&mut self, t_samp: SampleTime) {
        let (smpr1, smpr2) = smpr_values(t_samp);
        self.rb.write(Reg::Smpr1, smpr1);
        self.rb.write(Reg::Smpr2, smpr2);
    }

    /// Returns `true` if `ADON` is set
    pub fn is_enabled(&self) -> bool {
        self.rb.is_set(Reg::Cr2, cr2::ADON)
    }

    /// Get ADC prescaler
    pub fn prescaler(&self) -> AdcPre {
        self.prescaler
    }

    /// Returns a reference to the inner peripheral
    pub fn inner(&self) -> &ADC {
        &self.rb
    }

    /// Returns a mutable reference to the inner peripheral
    pub fn inner_mut(&mut self) -> &mut ADC {
        &mut self.rb
    }

    /// Releases the ADC peripheral
    pub fn release(self) -> ADC {
        self.rb
    }
}
