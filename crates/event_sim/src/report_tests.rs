use super::*;
use event_core::{EventRules, QualificationScoring, ScheduleTemplate, Team, SCORE_1, SCORE_2};

fn ranked_event() -> Event {
    let teams: Vec<Team> = (0..6)
        .map(|id| Team::with_attributes(id, [(SCORE_1, (id + 1) as f64), (SCORE_2, 1.0)]))
        .collect();
    let rules = EventRules::new(
        QualificationScoring::shared(),
        vec![SCORE_1.to_string(), SCORE_2.to_string()],
        vec![TOTAL.to_string(), SCORE_2.to_string()],
    );
    let mut event = Event::new(teams, rules);
    let template = ScheduleTemplate::parse(6, 1, "1,2,3,4,5,6\n").unwrap();
    event.apply_template(&template).unwrap();
    event.score_event().unwrap();
    event.rank_event().unwrap();
    event
}

#[test]
fn table_columns_are_aligned() {
    let rows = vec![
        vec!["1".to_string(), "12.5".to_string()],
        vec!["10".to_string(), "3".to_string()],
    ];
    let table = render_table(&["Team", "Score"], &rows);
    let lines: Vec<&str> = table.lines().collect();

    assert_eq!(lines[0], "Team  Score");
    assert_eq!(lines[1], "-----------");
    assert_eq!(lines[2], "   1   12.5");
    assert_eq!(lines[3], "  10      3");
}

#[test]
fn schedule_lists_alliances() {
    let table = render_schedule(&ranked_event());
    let lines: Vec<&str> = table.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Red1"));
    assert!(lines[0].ends_with("Blue3"));
    assert_eq!(lines[2].split_whitespace().collect::<Vec<_>>(), ["0", "1", "2", "3", "4", "5"]);
}

#[test]
fn results_show_alliance_totals() {
    let table = render_results(&ranked_event());
    let last = table.lines().last().unwrap();

    // red: 1+2+3 + 3, blue: 4+5+6 + 3
    assert!(last.ends_with("9.0000     18.0000"), "{}", last);
}

#[test]
fn rankings_show_sort_metrics_and_record() {
    let table = render_rankings(&ranked_event());
    let lines: Vec<&str> = table.lines().collect();

    assert!(lines[0].contains("total") && lines[0].contains("score_2"));
    let first: Vec<&str> = lines[2].split_whitespace().collect();
    assert_eq!(first, ["1", "3", "18.0000", "3.0000", "1-0-0"]);
    assert_eq!(lines.len(), 8);
}
