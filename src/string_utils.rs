//! String utility functions for flag values.

/// Split a comma-separated flag value into an ordered list.
///
/// Items are trimmed, empty items are dropped, and repeated items keep only
/// their first occurrence.
///
/// # Example
///
/// ```
/// use contextify::string_utils::parse_comma_separated;
///
/// assert_eq!(
///     parse_comma_separated(" node_modules, dist,,node_modules "),
///     vec!["node_modules".to_string(), "dist".to_string()]
/// );
/// assert!(parse_comma_separated("").is_empty());
/// ```
pub fn parse_comma_separated(input: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for part in input.split(',') {
        let trimmed = part.trim();
        if trimmed.is_empty() || items.iter().any(|i| i == trimmed) {
            continue;
        }
        items.push(trimmed.to_string());
    }
    items
}

/// Parse a size string like "5M", "100K", "1G" into bytes.
/// Supports suffixes: K/KB (1024), M/MB (1024^2), G/GB (1024^3)
/// Without suffix, interprets as bytes.
pub fn parse_size(s: &str) -> Result<usize, String> {
    let s = s.trim().to_uppercase();
    let (num_str, multiplier) = if let Some(n) = s.strip_suffix("GB") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('G') {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("MB") {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('M') {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("KB") {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('K') {
        (n, 1024)
    } else {
        (s.as_str(), 1)
    };

    let num: usize = num_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", num_str))?;

    let bytes = num
        .checked_mul(multiplier)
        .ok_or_else(|| format!("size too large: {}", s))?;
    if bytes == 0 {
        return Err("size must be greater than zero".to_string());
    }
    Ok(bytes)
}
