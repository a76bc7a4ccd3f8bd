//! Logging shims, contingent on the `defmt-03` feature.
//!
//! The macros expand to nothing unless the feature is enabled, so release
//! builds without a defmt global logger pay no cost.

macro_rules! debug {
    ($($args:tt)*) => {{
        #[cfg(feature = "defmt-03")]
        {
            use ::defmt_03 as defmt;
            defmt::debug!($($args)*);
        }
    }};
}

macro_rules! warn {
    ($($args:tt)*) => {{
        #[cfg(feature = "defmt-03")]
        {
            use ::defmt_03 as defmt;
            defmt::warn!($($args)*);
        }
    }};
}
