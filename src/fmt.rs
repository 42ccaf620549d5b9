//! Logging shims
//!
//! - `defmt` feature: forwards to `defmt`
//! - Host unit tests: prints to stdout
//! - Otherwise: arguments are evaluated by reference and dropped

#![macro_use]
#![allow(unused_macros)]

macro_rules! trace {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::trace!($s $(, $x)*);
        #[cfg(all(test, not(feature = "defmt")))]
        println!(concat!("[TRACE] ", $s) $(, $x)*);
        #[cfg(all(not(test), not(feature = "defmt")))]
        let _ = ($( &$x, )*);
    }};
}

macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($s $(, $x)*);
        #[cfg(all(test, not(feature = "defmt")))]
        println!(concat!("[DEBUG] ", $s) $(, $x)*);
        #[cfg(all(not(test), not(feature = "defmt")))]
        let _ = ($( &$x, )*);
    }};
}

macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($s $(, $x)*);
        #[cfg(all(test, not(feature = "defmt")))]
        println!(concat!("[INFO] ", $s) $(, $x)*);
        #[cfg(all(not(test), not(feature = "defmt")))]
        let _ = ($( &$x, )*);
    }};
}

macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($s $(, $x)*);
        #[cfg(all(test, not(feature = "defmt")))]
        println!(concat!("[WARN] ", $s) $(, $x)*);
        #[cfg(all(not(test), not(feature = "defmt")))]
        let _ = ($( &$x, )*);
    }};
}

macro_rules! error {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::error!($s $(, $x)*);
        #[cfg(all(test, not(feature = "defmt")))]
        eprintln!(concat!("[ERROR] ", $s) $(, $x)*);
        #[cfg(all(not(test), not(feature = "defmt")))]
        let _ = ($( &$x, )*);
    }};
}
