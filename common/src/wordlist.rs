use std::path::Path;

use crate::error::WordlistError;

pub trait WordlistRepository: Send + Sync {
    /// Ordered, trimmed, non-empty entries of the wordlist at `path`.
    fn load(&self, path: &Path) -> Result<Vec<String>, WordlistError>;
}

/// Trims every line and drops blanks and `#` comments, keeping file order.
pub fn parse_wordlist(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| is_entry(line))
        .map(String::from)
        .collect()
}

/// Whether a trimmed line is a usable wordlist entry.
pub fn is_entry(line: &str) -> bool {
    !line.is_empty() && !line.starts_with('#')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_order_and_skips_noise() {
        let raw = "www\n\n  api  \n# staging hosts\nmail\r\n   \n#dev\ncdn\n";
        assert_eq!(parse_wordlist(raw), vec!["www", "api", "mail", "cdn"]);
    }

    #[test]
    fn parse_empty_input() {
        assert!(parse_wordlist("").is_empty());
        assert!(parse_wordlist("\n# only comments\n\n").is_empty());
    }
}
