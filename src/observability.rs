//! This module provides structured logging hooks for codec and driver events.
//!
//! The `log_metric!` macro renders key/value pairs as a single JSON-like line
//! on the `postings_codec::metrics` target at debug level. Formatting is
//! skipped entirely unless that level is enabled.

/// Logs a structured key-value metric line at debug level.
///
/// # Example
/// ```
/// use postings_codec::log_metric;
/// let words = 12;
/// log_metric!("event" = "encode", "codec" = "bp32", "words" = &words);
/// ```
#[macro_export]
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        if $crate::__private::log::log_enabled!(
            target: "postings_codec::metrics",
            $crate::__private::log::Level::Debug
        ) {
            let mut parts = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+
            $crate::__private::log::debug!(
                target: "postings_codec::metrics",
                "CODEC_METRIC: {{ {} }}",
                parts.join(", ")
            );
        }
    };
}
