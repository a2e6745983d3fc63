//! Avatar placeholder initials.

#[cfg(test)]
#[path = "initials_test.rs"]
mod initials_test;

/// Two-letter initials for the avatar placeholder.
///
/// Multi-word names use the first letter of the first and last word;
/// a single word uses its first two characters.
pub fn initials(name: &str) -> String {
    let parts: Vec<&str> = name.split_whitespace().collect();
    if let [first, .., last] = parts.as_slice() {
        return first.chars().take(1).chain(last.chars().take(1)).collect::<String>().to_uppercase();
    }
    name.trim().chars().take(2).collect::<String>().to_uppercase()
}
