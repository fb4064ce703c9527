mod common;

use common::{ensemble, scored, sdf_record};
use fastgrow::GrowError;
use fastgrow::sdf::{
    build_hit, normalize_line_endings, parse_hits, parse_score, record_name, record_property,
    record_property_as, split_records, truncate_chars,
};
use std::borrow::Cow;

// --- split_records ---

#[test]
fn test_split_two_records() {
    let text = format!("{}{}", scored("HIT_A", "12.5"), scored("HIT_B", "8.1"));
    let records: Vec<String> = split_records(&text).collect();
    assert_eq!(records.len(), 2);
    assert!(records[0].starts_with("HIT_A\n"));
    assert!(records[1].starts_with("HIT_B\n"));
    for r in &records {
        assert!(r.ends_with("$$$$\n"));
    }
}

#[test]
fn test_split_records_are_verbatim() {
    let text = format!("{}{}", scored("HIT_A", "12.5"), scored("HIT_B", "8.1"));
    let joined: String = split_records(&text).collect();
    assert_eq!(joined, text);
}

#[test]
fn test_split_skips_trailing_whitespace() {
    let text = format!("{}\n  \n", scored("HIT_A", "1"));
    assert_eq!(split_records(&text).count(), 1);
}

#[test]
fn test_split_empty_text() {
    assert_eq!(split_records("").count(), 0);
    assert_eq!(split_records("$$$$\n").count(), 0);
}

#[test]
fn test_split_final_delimiter_without_newline() {
    let text = "HIT_A\nM  END\n$$$$";
    let records: Vec<String> = split_records(text).collect();
    assert_eq!(records, vec!["HIT_A\nM  END\n$$$$\n".to_string()]);
}

#[test]
fn test_split_unterminated_last_record_gets_delimiter() {
    let text = format!("{}HIT_B\nM  END\n", scored("HIT_A", "1"));
    let records: Vec<String> = split_records(&text).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1], "HIT_B\nM  END\n$$$$\n");
}

// --- record_name / record_property ---

#[test]
fn test_record_name_trimmed() {
    assert_eq!(record_name("  HIT_A \t\nrest\n$$$$\n"), "HIT_A");
    assert_eq!(record_name(""), "");
}

#[test]
fn test_record_property_present() {
    let r = scored("HIT_A", "12.5");
    assert_eq!(record_property(&r, "Score"), Some("12.5"));
}

#[test]
fn test_record_property_absent() {
    let r = scored("HIT_A", "12.5");
    assert_eq!(record_property(&r, "Energy"), None);
}

#[test]
fn test_record_property_key_is_exact() {
    let r = sdf_record("HIT_A", &[("ScoreX", "3")]);
    assert_eq!(record_property(&r, "Score"), None);
    assert_eq!(record_property(&r, "ScoreX"), Some("3"));
}

#[test]
fn test_record_property_header_with_field_number() {
    let r = "HIT_A\nM  END\n> <Score>  (1)\n7.25\n\n$$$$\n";
    assert_eq!(record_property(r, "Score"), Some("7.25"));
}

#[test]
fn test_record_property_multiline_value() {
    let r = sdf_record("HIT_A", &[("Notes", "line one\nline two"), ("Score", "1")]);
    assert_eq!(record_property(&r, "Notes"), Some("line one\nline two"));
    assert_eq!(record_property(&r, "Score"), Some("1"));
}

#[test]
fn test_record_property_last_block_excludes_delimiter() {
    let r = "HIT_A\nM  END\n> <Score>\n4.0\n$$$$\n";
    assert_eq!(record_property(r, "Score"), Some("4.0"));
}

// --- casting ---

#[test]
fn test_record_property_as_float() {
    let r = scored("HIT_A", "12.5");
    assert_eq!(record_property_as(&r, "Score", parse_score).unwrap(), Some(12.5));
    assert_eq!(record_property_as(&r, "Other", parse_score).unwrap(), None);
}

#[test]
fn test_record_property_as_cast_failure() {
    let r = scored("HIT_A", "n/a");
    match record_property_as(&r, "Score", parse_score) {
        Err(GrowError::PropertyCast { key, value }) => {
            assert_eq!(key, "Score");
            assert_eq!(value, "n/a");
        }
        other => panic!("expected PropertyCast, got {other:?}"),
    }
}

#[test]
fn test_parse_score_literals() {
    assert_eq!(parse_score("-3.5e2"), Some(-350.0));
    assert_eq!(parse_score("5"), Some(5.0));
    assert_eq!(parse_score("n/a"), None);
    assert_eq!(parse_score("nan"), None);
    assert_eq!(parse_score("inf"), None);
    assert_eq!(parse_score(""), None);
}

// --- build_hit ---

#[test]
fn test_build_hit_single_member() {
    let r = scored("HIT_A", "12.5");
    let hit = build_hit(r.clone(), &ensemble(&["4agm"])).unwrap();
    assert_eq!(hit.name, "HIT_A");
    assert_eq!(hit.score, 12.5);
    assert!(hit.ensemble_scores.is_empty());
    assert_eq!(hit.file_string, r);
    assert_eq!(hit.file_type, "sdf");
}

#[test]
fn test_build_hit_single_member_ignores_member_property() {
    let r = sdf_record("HIT_A", &[("Score", "1.0"), ("4AGM", "2.0")]);
    let hit = build_hit(r, &ensemble(&["4agm"])).unwrap();
    assert!(hit.ensemble_scores.is_empty());
}

#[test]
fn test_build_hit_ensemble_scores() {
    let r = sdf_record(
        "HIT_A",
        &[("Score", "1.5"), ("4AGM", "1.5"), ("4AGN", "-2.0")],
    );
    let hit = build_hit(r, &ensemble(&["4agm", "4agn"])).unwrap();
    assert_eq!(hit.ensemble_scores.len(), 2);
    assert_eq!(hit.ensemble_scores.get("4agm"), Some(&1.5));
    assert_eq!(hit.ensemble_scores.get("4agn"), Some(&-2.0));
}

#[test]
fn test_build_hit_n_members() {
    let r = sdf_record(
        "HIT_A",
        &[("Score", "9"), ("M1", "1"), ("M2", "2"), ("M3", "3")],
    );
    let hit = build_hit(r, &ensemble(&["M1", "M2", "M3"])).unwrap();
    let expected: Vec<(String, f64)> = vec![
        ("M1".to_string(), 1.0),
        ("M2".to_string(), 2.0),
        ("M3".to_string(), 3.0),
    ];
    assert_eq!(hit.ensemble_scores.into_iter().collect::<Vec<_>>(), expected);
}

#[test]
fn test_build_hit_missing_member_score() {
    let r = sdf_record("HIT_A", &[("Score", "1.5"), ("4AGM", "1.5")]);
    match build_hit(r, &ensemble(&["4agm", "4agn"])) {
        Err(GrowError::MissingProperty { key, record }) => {
            assert_eq!(key, "4AGN");
            assert_eq!(record, "HIT_A");
        }
        other => panic!("expected MissingProperty, got {other:?}"),
    }
}

#[test]
fn test_build_hit_missing_score() {
    let r = sdf_record("HIT_A", &[("Energy", "1")]);
    assert!(matches!(
        build_hit(r, &ensemble(&["4agm"])),
        Err(GrowError::MissingProperty { .. })
    ));
}

#[test]
fn test_build_hit_truncates_name() {
    let long = "x".repeat(300);
    let hit = build_hit(scored(&long, "1"), &ensemble(&["4agm"])).unwrap();
    assert_eq!(hit.name.chars().count(), 254);
    assert_eq!(hit.name, long[..254]);
}

#[test]
fn test_truncate_chars_multibyte() {
    let long = "é".repeat(300);
    assert_eq!(truncate_chars(&long, 254).chars().count(), 254);
    assert_eq!(truncate_chars("short", 254), "short");
}

// --- parse_hits ---

#[test]
fn test_parse_hits_all_or_nothing() {
    let text = format!("{}{}", scored("HIT_A", "12.5"), scored("HIT_B", "n/a"));
    assert!(matches!(
        parse_hits(&text, &ensemble(&["4agm"])),
        Err(GrowError::PropertyCast { .. })
    ));
}

#[test]
fn test_parse_hits_in_order() {
    let text = format!("{}{}", scored("HIT_A", "12.5"), scored("HIT_B", "8.1"));
    let hits = parse_hits(&text, &ensemble(&["4agm"])).unwrap();
    let names: Vec<&str> = hits.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["HIT_A", "HIT_B"]);
    assert_eq!(hits[1].score, 8.1);
}

#[test]
fn test_parse_hits_crlf_file() {
    let lf = format!("{}{}", scored("HIT_A", "12.5"), scored("HIT_B", "8.1"));
    let crlf = lf.replace('\n', "\r\n");
    let hits = parse_hits(&crlf, &ensemble(&["4agm"])).unwrap();
    let names: Vec<&str> = hits.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["HIT_A", "HIT_B"]);
    assert_eq!(hits[0].score, 12.5);
    assert_eq!(hits[1].score, 8.1);
    assert_eq!(hits[1].file_string, scored("HIT_B", "8.1"));
}

#[test]
fn test_normalize_line_endings() {
    assert!(matches!(normalize_line_endings("a\nb\n"), Cow::Borrowed(_)));
    assert_eq!(normalize_line_endings("a\r\n$$$$\r\n"), "a\n$$$$\n");
}
