//! Capitalization and punctuation cleanup for output lines.

use regex::Regex;

lazy_static::lazy_static! {
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
}

/// Drop double quotes, collapse whitespace, capitalize the first letter.
pub fn fix_line(line: &str) -> String {
    let unquoted = line.replace('"', "");
    let collapsed = WHITESPACE_RE.replace_all(&unquoted, " ");
    let trimmed = collapsed.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Make sure the closing line ends in terminal punctuation.
pub fn fix_last_line(line: &str) -> String {
    match line.chars().last() {
        Some('.' | '!' | '?') => line.to_string(),
        Some(';' | ':' | ',') => format!("{}.", &line[..line.len() - 1]),
        _ => format!("{}.", line),
    }
}

/// Apply `fix_line` to every line, drop lines left empty, then fix the
/// last one.
pub fn finalize(lines: &[String]) -> Vec<String> {
    let mut out: Vec<String> = lines
        .iter()
        .map(|l| fix_line(l))
        .filter(|l| !l.is_empty())
        .collect();
    if let Some(last) = out.last_mut() {
        *last = fix_last_line(last);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_line() {
        assert_eq!(fix_line("the   dog\truns"), "The dog runs");
        assert_eq!(fix_line("\"hello,\" she said"), "Hello, she said");
        assert_eq!(fix_line(""), "");
    }

    #[test]
    fn test_fix_last_line() {
        assert_eq!(fix_last_line("The dog runs,"), "The dog runs.");
        assert_eq!(fix_last_line("The dog runs;"), "The dog runs.");
        assert_eq!(fix_last_line("The dog runs"), "The dog runs.");
        assert_eq!(fix_last_line("The dog runs!"), "The dog runs!");
        assert_eq!(fix_last_line("The dog runs?"), "The dog runs?");
    }

    #[test]
    fn test_finalize_sole_line() {
        assert_eq!(finalize(&["the dog runs,".to_string()]), vec!["The dog runs."]);
    }

    #[test]
    fn test_finalize_only_last_line_punctuated() {
        let lines = vec!["i saw a cat,".to_string(), "the dog runs".to_string()];
        assert_eq!(finalize(&lines), vec!["I saw a cat,", "The dog runs."]);
    }

    #[test]
    fn test_finalize_empty() {
        assert!(finalize(&[]).is_empty());
        assert!(finalize(&["\"\"".to_string()]).is_empty());
    }
}
