use super::*;
use std::fs;

const SIX_TEAMS: &str = "1,2,3,4,5,6\n6,4,2,5,3,1\n";

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn parses_plain_rows() {
    let template = ScheduleTemplate::parse(6, 2, SIX_TEAMS).unwrap();

    assert_eq!(template.len(), 2);
    assert_eq!(template.rows[0].red, vec![1, 2, 3]);
    assert_eq!(template.rows[0].blue, vec![4, 5, 6]);
    assert_eq!(template.rows[1].red, vec![6, 4, 2]);
    assert_eq!(template.rows[1].blue, vec![5, 3, 1]);
}

#[test]
fn parses_matchmaker_rows_and_ignores_surrogate_flags() {
    let text = "3,0,1,1,2,0,6,0,5,0,4,1\n";
    let template = ScheduleTemplate::parse(6, 1, text).unwrap();

    assert_eq!(template.rows[0].red, vec![3, 1, 2]);
    assert_eq!(template.rows[0].blue, vec![6, 5, 4]);
}

#[test]
fn skips_blank_lines() {
    let text = "1,2,3,4,5,6\n\n6,5,4,3,2,1\n";
    let template = ScheduleTemplate::parse(6, 2, text).unwrap();
    assert_eq!(template.len(), 2);
}

#[test]
fn rejects_wrong_field_count() {
    let err = ScheduleTemplate::parse(6, 1, "1,2,3,4,5\n").unwrap_err();
    assert!(matches!(err, ScheduleError::MalformedTemplate { line: 1, .. }));
}

#[test]
fn rejects_non_numeric_slot() {
    let err = ScheduleTemplate::parse(6, 1, "1,2,x,4,5,6\n").unwrap_err();
    assert!(matches!(err, ScheduleError::MalformedTemplate { .. }));
}

#[test]
fn rejects_slots_outside_roster() {
    let err = ScheduleTemplate::parse(6, 1, "1,2,3,4,5,7\n").unwrap_err();
    assert!(matches!(
        err,
        ScheduleError::SlotOutOfRange { slot: 7, teams: 6, .. }
    ));

    let err = ScheduleTemplate::parse(6, 1, "0,2,3,4,5,6\n").unwrap_err();
    assert!(matches!(err, ScheduleError::SlotOutOfRange { slot: 0, .. }));
}

#[test]
fn rejects_team_twice_in_one_match() {
    let err = ScheduleTemplate::parse(6, 1, "1,2,3,4,5,1\n").unwrap_err();
    assert!(matches!(err, ScheduleError::MalformedTemplate { .. }));
}

#[test]
fn rejects_empty_template() {
    let err = ScheduleTemplate::parse(6, 1, "").unwrap_err();
    assert!(matches!(err, ScheduleError::MalformedTemplate { line: 0, .. }));
}

#[test]
fn custom_alliance_size() {
    let template = ScheduleTemplate::parse_with_alliance_size(4, 1, 2, "1,2,3,4\n").unwrap();
    assert_eq!(template.alliance_size, 2);
    assert_eq!(template.rows[0].red, vec![1, 2]);
    assert_eq!(template.rows[0].blue, vec![3, 4]);
}

#[test]
fn template_file_names_round_trip() {
    assert_eq!(template_file_name(24, 12), "24_12.csv");
    assert_eq!(parse_template_file_name("24_12.csv"), Some((24, 12)));
    assert_eq!(parse_template_file_name("24-12.csv"), None);
    assert_eq!(parse_template_file_name("notes.txt"), None);
}

// =============================================================================
// Stores
// =============================================================================

#[test]
fn builtin_templates_are_balanced() {
    let store = BuiltinTemplates;
    let keys = store.available();
    assert!(!keys.is_empty());

    for (teams, matches) in keys {
        let template = store.lookup(teams, matches).unwrap();
        assert_eq!(template.len() * 2 * ALLIANCE_SIZE, teams * matches);
        assert!(
            template.slot_counts().iter().all(|&c| c == matches),
            "{}_{} is unbalanced",
            teams,
            matches
        );
    }
}

#[test]
fn slot_counts_skip_out_of_range_slots() {
    let template = ScheduleTemplate {
        teams: 6,
        matches_per_team: 1,
        alliance_size: ALLIANCE_SIZE,
        rows: vec![TemplateRow {
            red: vec![1, 2, 3],
            blue: vec![4, 0, 7],
        }],
    };

    assert_eq!(template.slot_counts(), vec![1, 1, 1, 1, 0, 0]);
}

#[test]
fn builtin_lookup_fails_for_unknown_key() {
    let err = BuiltinTemplates.lookup(7, 3).unwrap_err();
    assert!(matches!(
        err,
        ScheduleError::TemplateNotFound { teams: 7, matches: 3 }
    ));
}

#[test]
fn directory_store_reads_named_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("6_2.csv"), SIX_TEAMS).unwrap();
    fs::write(dir.path().join("readme.txt"), "not a template").unwrap();

    let store = DirectoryTemplates::new(dir.path());
    assert_eq!(store.available(), vec![(6, 2)]);

    let template = store.lookup(6, 2).unwrap();
    assert_eq!(template.slot_counts(), vec![2; 6]);

    let err = store.lookup(6, 3).unwrap_err();
    assert!(matches!(err, ScheduleError::TemplateNotFound { .. }));
}

#[test]
fn in_memory_store_returns_inserted_templates() {
    let mut store = InMemoryTemplates::new();
    store.insert(ScheduleTemplate::parse(6, 2, SIX_TEAMS).unwrap());

    assert_eq!(store.available(), vec![(6, 2)]);
    assert_eq!(store.lookup(6, 2).unwrap().len(), 2);
    assert!(store.lookup(12, 2).is_err());
}
