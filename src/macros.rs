/// Emits a `tracing` event when the `tracing` feature is enabled.
///
/// Without the feature the invocation expands to nothing, so call sites do not
/// need their own `cfg` attributes.
macro_rules! trace_event {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            tracing::$level!($($arg)+);
        }
    };
}
