//! Drop Payload Parsing
//!
//! Turns the text of a drop event into the list of dropped paths, in drop
//! order. Nothing here touches the filesystem: entries that do not exist, or
//! are empty, are kept so that they fail as jobs of their own.

use std::path::{MAIN_SEPARATOR, PathBuf};

/// Parse a brace-grouped payload such as `{C:/img one.png} {C:/img2.png}`.
///
/// A single bare path without braces is returned as-is. An empty payload
/// yields one empty entry.
pub fn parse(raw: &str) -> Vec<PathBuf> {
    let inner = raw.strip_prefix('{').unwrap_or(raw);
    let inner = inner.strip_suffix('}').unwrap_or(inner);

    inner.split("} {").map(normalize_separators).collect()
}

/// Parse whatever a terminal pasted when files were dropped onto it.
///
/// Brace-grouped payloads go through [`parse`]. Everything else is treated as
/// shell words, which is how most terminals paste dropped files.
pub fn parse_drop(raw: &str) -> Vec<PathBuf> {
    let trimmed = raw.trim_end_matches(['\r', '\n']);

    if trimmed.trim_start().starts_with('{') {
        return parse(trimmed.trim());
    }

    let words = split_shell_words(trimmed);
    if words.is_empty() {
        return vec![PathBuf::new()];
    }
    words.iter().map(|w| normalize_separators(w)).collect()
}

/// Replace both separator styles with the host one
fn normalize_separators(entry: &str) -> PathBuf {
    let normalized: String = entry
        .chars()
        .map(|c| if c == '/' || c == '\\' { MAIN_SEPARATOR } else { c })
        .collect();
    PathBuf::from(normalized)
}

/// Split on unquoted whitespace, honouring quotes and backslash escapes
fn split_shell_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_word = true;
                for q in chars.by_ref() {
                    if q == '\'' {
                        break;
                    }
                    current.push(q);
                }
            }
            '"' => {
                in_word = true;
                while let Some(q) = chars.next() {
                    match q {
                        '"' => break,
                        '\\' => match chars.next() {
                            Some(e @ ('"' | '\\')) => current.push(e),
                            Some(e) => {
                                current.push('\\');
                                current.push(e);
                            }
                            None => current.push('\\'),
                        },
                        _ => current.push(q),
                    }
                }
            }
            '\\' => {
                in_word = true;
                match chars.next() {
                    // Escaped character after a backslash, e.g. `img\ one.png`
                    Some(e) if e.is_whitespace() || "'\"\\()&;".contains(e) => current.push(e),
                    // Windows-style separator, keep it
                    Some(e) => {
                        current.push('\\');
                        current.push(e);
                    }
                    None => current.push('\\'),
                }
            }
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }

    if in_word {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(path: &str) -> PathBuf {
        PathBuf::from(path.replace(['/', '\\'], &MAIN_SEPARATOR.to_string()))
    }

    #[test]
    fn test_brace_groups_in_order() {
        let parsed = parse("{C:/img one.png} {C:/img2.png}");
        assert_eq!(parsed, vec![host("C:/img one.png"), host("C:/img2.png")]);
    }

    #[test]
    fn test_bare_single_path() {
        assert_eq!(parse("/tmp/photo.png"), vec![host("/tmp/photo.png")]);
    }

    #[test]
    fn test_mixed_groups_keep_order() {
        let parsed = parse("{/a/first file.png} {/b/second.png} {/c/third one.png}");
        assert_eq!(
            parsed,
            vec![
                host("/a/first file.png"),
                host("/b/second.png"),
                host("/c/third one.png"),
            ]
        );
    }

    #[test]
    fn test_empty_payload_keeps_one_entry() {
        assert_eq!(parse(""), vec![PathBuf::new()]);
        assert_eq!(parse_drop(""), vec![PathBuf::new()]);
        assert_eq!(parse_drop("   \n"), vec![PathBuf::new()]);
    }

    #[test]
    fn test_empty_group_is_not_dropped() {
        let parsed = parse("{} {/tmp/a.png}");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0], PathBuf::new());
    }

    #[test]
    fn test_terminal_quoted_paste() {
        let parsed = parse_drop("'/home/me/img one.png' '/home/me/img2.png' \n");
        assert_eq!(
            parsed,
            vec![host("/home/me/img one.png"), host("/home/me/img2.png")]
        );
    }

    #[test]
    fn test_terminal_escaped_paste() {
        let parsed = parse_drop("/home/me/img\\ one.png /home/me/img2.png");
        assert_eq!(
            parsed,
            vec![host("/home/me/img one.png"), host("/home/me/img2.png")]
        );
    }

    #[test]
    fn test_terminal_double_quoted_windows_paste() {
        let parsed = parse_drop("\"C:\\pics\\a b.png\" C:\\pics\\c.png");
        assert_eq!(parsed, vec![host("C:/pics/a b.png"), host("C:/pics/c.png")]);
    }

    #[test]
    fn test_drop_dispatches_brace_payload() {
        let parsed = parse_drop("{C:/img one.png} {C:/img2.png}\r\n");
        assert_eq!(parsed, vec![host("C:/img one.png"), host("C:/img2.png")]);
    }
}
