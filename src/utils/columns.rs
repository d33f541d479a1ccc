//! Column alignment for `|` separated text lines.

use unicode_segmentation::UnicodeSegmentation;

/// Pad every `|` separated field so the columns line up.
///
/// Widths are measured in grapheme clusters, since player names are full of
/// combining marks and emoji. Lines with fewer fields are padded only as far
/// as they go.
pub fn columnize<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let rows: Vec<Vec<&str>> = lines
        .iter()
        .map(|line| line.as_ref().split('|').map(str::trim).collect())
        .collect();

    let mut widths: Vec<usize> = Vec::new();
    for row in &rows {
        for (i, field) in row.iter().enumerate() {
            let width = field.graphemes(true).count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(width),
                None => widths.push(width),
            }
        }
    }

    rows.iter()
        .map(|row| {
            let last = row.len().saturating_sub(1);
            row.iter()
                .enumerate()
                .map(|(i, field)| {
                    if i == last {
                        return field.to_string();
                    }
                    let pad = widths[i] - field.graphemes(true).count();
                    format!("{field}{}", " ".repeat(pad))
                })
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columnize_aligns_fields() {
        let lines = ["1 | Nick | 1850", "100 | Bob | 900"];
        assert_eq!(
            columnize(&lines),
            vec!["1    Nick  1850", "100  Bob   900"]
        );
    }

    #[test]
    fn test_columnize_counts_graphemes() {
        let lines = ["1 | e\u{301}e | x", "2 | abc | y"];
        let out = columnize(&lines);
        assert_eq!(out[0], "1  e\u{301}e   x");
        assert_eq!(out[1], "2  abc  y");
    }

    #[test]
    fn test_columnize_empty() {
        let lines: [&str; 0] = [];
        assert!(columnize(&lines).is_empty());
    }
}
