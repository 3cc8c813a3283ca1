/// Name of the hidden form input that humans never fill in.
pub const FIELD: &str = "website";

/// True when the honeypot input carries anything but whitespace.
pub fn is_spam(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}
