/// Fast hash map type for string-keyed lookup tables.
pub type FastHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// A string with small string optimizations up to 23 bytes.
///
/// Most GLSL variable names fit inline.
pub type ShortString = smartstring::SmartString<smartstring::LazyCompact>;
