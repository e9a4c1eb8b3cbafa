//! Tiered internal consistency checks.
//!
//! The level is fixed at compile time. `simple` checks are cheap and always on; the higher levels
//! re-derive results the engine already computed and are meant for debugging the engine itself.

pub(crate) const UTVPI_ASSERT_LEVEL_DEFINITION: u8 = UTVPI_ASSERT_SIMPLE;

pub(crate) const UTVPI_ASSERT_SIMPLE: u8 = 1;
pub(crate) const UTVPI_ASSERT_MODERATE: u8 = 2;
pub(crate) const UTVPI_ASSERT_ADVANCED: u8 = 3;

macro_rules! print_utvpi_assert_warning_message {
    () => {
        if $crate::utvpi_asserts::UTVPI_ASSERT_LEVEL_DEFINITION
            >= $crate::utvpi_asserts::UTVPI_ASSERT_MODERATE
        {
            log::warn!(
                "Potential performance degradation: the UTVPI assert level is set to {}, every answer is re-checked against the graph.",
                $crate::utvpi_asserts::UTVPI_ASSERT_LEVEL_DEFINITION
            );
        };
    };
}

macro_rules! utvpi_assert_simple {
    ($($arg:tt)*) => {
        if $crate::utvpi_asserts::UTVPI_ASSERT_LEVEL_DEFINITION >= $crate::utvpi_asserts::UTVPI_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

macro_rules! utvpi_assert_eq_simple {
    ($($arg:tt)*) => {
        if $crate::utvpi_asserts::UTVPI_ASSERT_LEVEL_DEFINITION >= $crate::utvpi_asserts::UTVPI_ASSERT_SIMPLE {
            assert_eq!($($arg)*);
        }
    };
}

macro_rules! utvpi_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::utvpi_asserts::UTVPI_ASSERT_LEVEL_DEFINITION >= $crate::utvpi_asserts::UTVPI_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

macro_rules! utvpi_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::utvpi_asserts::UTVPI_ASSERT_LEVEL_DEFINITION >= $crate::utvpi_asserts::UTVPI_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}

pub(crate) use print_utvpi_assert_warning_message;
pub(crate) use utvpi_assert_advanced;
pub(crate) use utvpi_assert_eq_simple;
pub(crate) use utvpi_assert_moderate;
pub(crate) use utvpi_assert_simple;
