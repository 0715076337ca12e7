use mask::{MaskPattern, MaskRegistry};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

const CASES_FORMAT_V1: &str = "mask-cases-v1";

#[derive(Debug, Deserialize)]
struct CaseFile {
    format: String,
    cases: Vec<Case>,
}

#[derive(Debug, Deserialize)]
struct Case {
    id: String,
    pattern: String,
    raw: String,
    display: String,
    unmasked: Option<String>,
    complete: bool,
}

fn load_cases() -> CaseFile {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/cases.toml");
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read mask fixtures {path:?}: {err}"));
    toml::from_str(&content)
        .unwrap_or_else(|err| panic!("failed to parse mask fixtures {path:?}: {err}"))
}

#[test]
fn fixture_ids_are_unique() {
    let file = load_cases();
    assert_eq!(file.format, CASES_FORMAT_V1);
    let mut seen = HashSet::new();
    for case in &file.cases {
        assert!(seen.insert(case.id.as_str()), "duplicate case id {}", case.id);
    }
}

#[test]
fn fixtures_format_unmask_and_complete() {
    let registry = MaskRegistry::new();
    for case in load_cases().cases {
        let pattern = registry.resolve(&case.pattern);
        let display = pattern.apply(&case.raw);
        assert_eq!(display, case.display, "[{}] apply", case.id);
        assert_eq!(
            pattern.is_complete(&display),
            case.complete,
            "[{}] is_complete",
            case.id
        );
        if let Some(expected) = &case.unmasked {
            assert_eq!(&pattern.unmask(&display), expected, "[{}] unmask", case.id);
        }
    }
}

#[test]
fn complete_values_survive_reformatting() {
    let registry = MaskRegistry::new();
    for case in load_cases().cases.into_iter().filter(|c| c.complete) {
        let pattern = registry.resolve(&case.pattern);
        let once = pattern.apply(&case.raw);
        assert_eq!(pattern.apply(&once), once, "[{}] apply twice", case.id);
        assert_eq!(
            pattern.apply(&pattern.unmask(&once)),
            once,
            "[{}] apply(unmask(m))",
            case.id
        );
    }
}

#[test]
fn halted_value_unmasks_to_the_valid_prefix() {
    let date = MaskPattern::new("00/00/0000");
    let shown = date.apply("12ab2024");
    assert_eq!(shown, "12/");
    assert_eq!(date.unmask(&shown), "12");
}

#[test]
fn output_never_exceeds_pattern_length() {
    let p = MaskPattern::new("(00) 00000-0000");
    let long = "9".repeat(64);
    assert_eq!(p.apply(&long).chars().count(), p.len());
}
