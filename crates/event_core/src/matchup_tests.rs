use super::*;
use crate::scoring::TOTAL;

fn sum_score() -> SharedScoring {
    Arc::new(|_: &[String], alliance: &AttributeMap| {
        let mut scores = MetricMap::new();
        scores.insert(TOTAL.to_string(), alliance.get("score").copied().unwrap_or(0.0));
        scores
    })
}

fn tracked(names: &[&str]) -> Arc<[String]> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn alliance_attributes_sum_tracked_names() {
    let m = Match::new(0, tracked(&["a"]), sum_score());
    let alliance = vec![
        Team::with_attributes(0, [("a", 1.0)]),
        Team::with_attributes(1, [("a", 2.0)]),
    ];

    let sums = m.alliance_attributes(&alliance);
    assert_eq!(sums.len(), 1);
    assert_eq!(sums["a"], 3.0);
}

#[test]
fn missing_attributes_contribute_zero() {
    let m = Match::new(0, tracked(&["a", "b"]), sum_score());
    let alliance = vec![
        Team::with_attributes(0, [("a", 1.5)]),
        Team::new(1),
    ];

    let sums = m.alliance_attributes(&alliance);
    assert_eq!(sums["a"], 1.5);
    assert_eq!(sums["b"], 0.0);
}

#[test]
fn red_score_matches_summed_attribute() {
    let mut m = Match::new(1, tracked(&["score"]), sum_score());
    m.add_red_team(Team::with_attributes(1, [("score", 1.0)]));
    m.add_red_team(Team::with_attributes(2, [("score", 2.0)]));

    let (red, blue) = m.score();
    assert_eq!(red[TOTAL], 3.0);
    assert_eq!(blue[TOTAL], 0.0);
}

#[test]
fn team_ids_list_red_then_blue() {
    let mut m = Match::new(0, tracked(&[]), sum_score());
    for id in [5, 3, 9] {
        m.add_red_team(Team::new(id));
    }
    for id in [0, 8, 1] {
        m.add_blue_team(Team::new(id));
    }

    assert_eq!(m.team_ids(), vec![5, 3, 9, 0, 8, 1]);
    assert_eq!(m.alliance_of(9), Some(Alliance::Red));
    assert_eq!(m.alliance_of(8), Some(Alliance::Blue));
    assert_eq!(m.alliance_of(4), None);
}
