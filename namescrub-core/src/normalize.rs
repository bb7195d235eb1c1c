/// Code points treated as interchangeable spacing characters:
/// ASCII space, no-break space and narrow no-break space.
pub const SPACE_CHARS: [char; 3] = [' ', '\u{00A0}', '\u{202F}'];

pub fn is_space_char(ch: char) -> bool {
    SPACE_CHARS.contains(&ch)
}

/// Tidy up the spacing left behind by deleting or replacing a phrase.
///
/// Every spacing character becomes an ASCII space, runs of them collapse to
/// one, a space directly before a `.` is dropped (`"name .pdf"` becomes
/// `"name.pdf"`) and surrounding whitespace is trimmed.
pub fn normalize_spaces(name: &str) -> String {
    let mut output = String::with_capacity(name.len());
    let mut pending_space = false;

    for ch in name.chars() {
        if is_space_char(ch) {
            pending_space = true;
            continue;
        }

        if pending_space && ch != '.' {
            output.push(' ');
        }
        pending_space = false;
        output.push(ch);
    }

    output.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_space_runs() {
        assert_eq!(normalize_spaces("a    b"), "a b");
        assert_eq!(normalize_spaces("a \u{00A0}\u{202F} b"), "a b");
    }

    #[test]
    fn test_variant_spaces_become_ascii() {
        assert_eq!(normalize_spaces("a\u{00A0}b\u{202F}c"), "a b c");
    }

    #[test]
    fn test_space_before_dot_removed() {
        assert_eq!(normalize_spaces("report  .pdf"), "report.pdf");
        assert_eq!(normalize_spaces("report\u{00A0}.pdf"), "report.pdf");
        assert_eq!(normalize_spaces("a . b.txt"), "a. b.txt");
    }

    #[test]
    fn test_trims_edges() {
        assert_eq!(normalize_spaces("  name.txt "), "name.txt");
        assert_eq!(normalize_spaces("\u{00A0}name.txt\u{202F}"), "name.txt");
        assert_eq!(normalize_spaces("\tname.txt\n"), "name.txt");
    }

    #[test]
    fn test_plain_names_untouched() {
        assert_eq!(normalize_spaces("My Book - 2nd Ed.epub"), "My Book - 2nd Ed.epub");
        assert_eq!(normalize_spaces(".hidden"), ".hidden");
        assert_eq!(normalize_spaces(""), "");
    }

    #[test]
    fn test_other_whitespace_kept_inside() {
        // Only the spacing characters collapse; a tab inside a name survives.
        assert_eq!(normalize_spaces("a\tb"), "a\tb");
    }

    #[test]
    fn test_deleted_tag_leaves_clean_name() {
        assert_eq!(normalize_spaces("report   .pdf"), "report.pdf");
        assert_eq!(normalize_spaces(" Title  Author .epub"), "Title Author.epub");
    }
}
