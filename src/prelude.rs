//! Prelude

pub use crate::adc::AdcExt as _stm32f1xx_adc_adc_AdcExt;
pub use crate::rcc::ClockControl as _stm32f1xx_adc_rcc_ClockControl;
pub use crate::rcc::RccExt as _stm32f1xx_adc_rcc_RccExt;

pub use fugit::{ExtU32 as _, RateExtU32 as _};
