//! Logging shims, these forward to the `log` crate when the `log` feature is on
//! and only type-check their arguments otherwise.

cfg_if::cfg_if! {
    if #[cfg(feature = "log")] {
        macro_rules! trace {
            ($($arg:tt)*) => { ::log::trace!(target: "fiv_slotmap", $($arg)*) };
        }

        macro_rules! debug {
            ($($arg:tt)*) => { ::log::debug!(target: "fiv_slotmap", $($arg)*) };
        }

        macro_rules! warn {
            ($($arg:tt)*) => { ::log::warn!(target: "fiv_slotmap", $($arg)*) };
        }
    } else {
        macro_rules! trace {
            ($($arg:tt)*) => {{ let _ = format_args!($($arg)*); }};
        }

        macro_rules! debug {
            ($($arg:tt)*) => {{ let _ = format_args!($($arg)*); }};
        }

        macro_rules! warn {
            ($($arg:tt)*) => {{ let _ = format_args!($($arg)*); }};
        }
    }
}
