use super::Instance;
use crate::rcc::Peripheral;

#[cfg(feature = "adc2")]
use crate::stm32::ADC2;
use crate::stm32::ADC1;

macro_rules! adc_instances {
    ($( $( #[ $pmeta:meta ] )* $ADC:ident: $Adc:ident ),+ $(,)?) => {
        $(
            $( #[ $pmeta ] )*
            impl crate::Sealed for $ADC {}

            $( #[ $pmeta ] )*
            impl Instance for $ADC {
                const PERIPHERAL: Peripheral = Peripheral::$Adc;
            }
        )+
    };
}

adc_instances! {
    ADC1: Adc1,
    #[cfg(feature = "adc2")]
    ADC2: Adc2,
}
