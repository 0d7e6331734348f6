// ABOUTME: Maps remote titles to filesystem-safe names
// ABOUTME: Total and idempotent; used for both directories and files

const FORBIDDEN: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Replace characters that break filenames with `_` and trim surrounding
/// whitespace.
pub fn sanitize(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if FORBIDDEN.contains(&c) { '_' } else { c })
        .collect();
    replaced.trim().to_string()
}
