use namescrub_core::{plan_renames, MatchPattern, Substitution, HYPHEN_CHARS};
use std::fs;
use tempfile::TempDir;

fn delete(phrase: &str, loose: bool) -> MatchPattern {
    MatchPattern::new(phrase, false, loose, Substitution::Delete).unwrap()
}

#[test]
fn test_en_and_em_dash_variants_delete_identically_in_loose_mode() {
    let pattern = delete("(Source-Library)", true);
    let names = [
        "Book (Source-Library).pdf",
        "Book (Source\u{2013}Library).pdf",
        "Book (Source\u{2014}Library).pdf",
    ];

    let proposed: Vec<String> = names.iter().map(|name| pattern.propose(name)).collect();
    assert!(proposed.iter().all(|name| name == "Book.pdf"), "{proposed:?}");
}

#[test]
fn test_strict_mode_ignores_dash_variants() {
    let pattern = delete("(Source-Library)", false);
    for name in [
        "Book (Source\u{2013}Library).pdf",
        "Book (Source\u{2014}Library).pdf",
    ] {
        assert_eq!(pattern.propose(name), name);
    }
}

#[test]
fn test_loose_plan_over_directory() {
    let temp = TempDir::new().unwrap();
    for (i, dash) in HYPHEN_CHARS.iter().enumerate() {
        fs::write(
            temp.path().join(format!("Book {i} (Source{dash}Library).pdf")),
            "",
        )
        .unwrap();
    }

    let strict = plan_renames(temp.path(), false, &delete("(Source-Library)", false));
    assert_eq!(strict.entries.len(), 1, "only the plain hyphen matches strictly");

    let loose = plan_renames(temp.path(), false, &delete("(Source-Library)", true));
    assert_eq!(loose.entries.len(), HYPHEN_CHARS.len());
    for entry in &loose.entries {
        let name = entry.proposed.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("Book ") && name.ends_with(".pdf"), "{name}");
        assert!(!name.contains("Library"));
    }
}

#[test]
fn test_loose_space_variants_in_filenames() {
    let pattern = delete("Source Library", true);
    assert_eq!(pattern.propose("x Source\u{00A0}Library y.txt"), "x y.txt");
    assert_eq!(pattern.propose("x Source\u{202F}Library.txt"), "x.txt");
}

#[test]
fn test_replace_mode_with_loose_matching() {
    let pattern = MatchPattern::new(
        "Z-Lib",
        true,
        true,
        Substitution::Replace("[ZL]".to_string()),
    )
    .unwrap();
    assert_eq!(pattern.propose("notes z\u{2010}lib.md"), "notes [ZL].md");
}
