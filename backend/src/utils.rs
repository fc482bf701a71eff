use chrono::{DateTime, Datelike};

/// Writes a line to the canister debug log.
#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::utils::print(format!($($arg)*))
    };
}

#[cfg(any(not(test), rust_analyzer))]
pub use ic_cdk::api::{print, time};

#[cfg(all(test, not(rust_analyzer)))]
pub use mock_ic0::{print, time};

/// Calendar year (UTC) of an IC timestamp in nanoseconds.
pub fn year_of(nanos: u64) -> i32 {
    let nanos = i64::try_from(nanos).unwrap_or(i64::MAX);
    DateTime::from_timestamp_nanos(nanos).year()
}
