const KILOBYTE: u64 = 1024;
const MEGABYTE: u64 = 1024 * KILOBYTE;
const GIGABYTE: u64 = 1024 * MEGABYTE;
const TERABYTE: u64 = 1024 * GIGABYTE;

/// Render a byte count as `10MB`, `12.5KB` and so on.
///
/// The largest unit that keeps the value at or above 1 is chosen, the value
/// is printed with one decimal and a trailing `.0` is dropped.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0".to_string();
    }

    let (divisor, unit) = match bytes {
        b if b >= TERABYTE => (TERABYTE, "TB"),
        b if b >= GIGABYTE => (GIGABYTE, "GB"),
        b if b >= MEGABYTE => (MEGABYTE, "MB"),
        b if b >= KILOBYTE => (KILOBYTE, "KB"),
        _ => (1, "B"),
    };

    let value = format!("{:.1}", bytes as f64 / divisor as f64);
    let value = value.strip_suffix(".0").unwrap_or(&value);

    format!("{}{}", value, unit)
}
