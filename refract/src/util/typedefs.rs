/// Label codes are a handful of characters, so they stay inline.
pub type SsoString = smartstring::SmartString<smartstring::LazyCompact>;
/// Label caches are keyed by instance and light ids, which FxHash handles well.
pub type FastBuildHasher = std::hash::BuildHasherDefault<rustc_hash::FxHasher>;

#[macro_export]
/// Similar to the [`format`] macro, but creates a [`SsoString`].
macro_rules! format_sso {
    ($($arg:tt)*) => {{
        use std::fmt::Write as _;
        let mut buffer = $crate::util::typedefs::SsoString::new();
        write!(buffer, $($arg)*).expect("unexpected formatting error");
        buffer
    }};
}
