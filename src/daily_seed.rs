//! Date-derived seeds, so everyone asking for a given day's puzzle gets the
//! same one.

/// Hash a string (normally a `YYYY-MM-DD` date) into a generator seed.
///
/// Uses the classic `h * 31 + c` string hash over UTF-16 code units in
/// wrapping 32-bit signed arithmetic, then takes the absolute value. Browser
/// clients computing the same hash agree on the seed.
#[must_use]
pub fn seed_from_date(date: &str) -> u64 {
    let hash = date
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit)));
    i64::from(hash).unsigned_abs()
}
