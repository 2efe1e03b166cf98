//! Plain-text tables for a single event
//!
//! Purely presentational: nothing here feeds back into scoring or ranking.

use event_core::{Event, Match, TOTAL};

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;

/// Render a right-aligned table with a dashed rule under the header.
pub fn render_table<H: AsRef<str>>(headers: &[H], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.as_ref().len()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{:>width$}", cell, width = width))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    let mut table = line(headers.iter().map(|h| h.as_ref()).collect());
    let rule_len = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    table.push_str(&"-".repeat(rule_len));
    table.push('\n');
    for row in rows {
        table.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    table
}

fn alliance_headers(m: Option<&Match>) -> Vec<String> {
    let (red, blue) = m.map_or((3, 3), |m| (m.red_alliance.len(), m.blue_alliance.len()));
    (1..=red)
        .map(|i| format!("Red{}", i))
        .chain((1..=blue).map(|i| format!("Blue{}", i)))
        .collect()
}

fn team_cells(m: &Match) -> Vec<String> {
    m.team_ids().iter().map(ToString::to_string).collect()
}

/// One row per match: red team ids then blue team ids.
pub fn render_schedule(event: &Event) -> String {
    let headers = alliance_headers(event.schedule().first());
    let rows: Vec<Vec<String>> = event.schedule().iter().map(team_cells).collect();
    render_table(&headers, &rows)
}

/// Schedule rows extended with each alliance's total score.
pub fn render_results(event: &Event) -> String {
    let mut headers = alliance_headers(event.schedule().first());
    headers.push("Red Score".to_string());
    headers.push("Blue Score".to_string());

    let rows: Vec<Vec<String>> = event
        .schedule()
        .iter()
        .map(|m| {
            let (red, blue) = m.score();
            let mut row = team_cells(m);
            row.push(format!("{:.4}", red.get(TOTAL).copied().unwrap_or(0.0)));
            row.push(format!("{:.4}", blue.get(TOTAL).copied().unwrap_or(0.0)));
            row
        })
        .collect();
    render_table(&headers, &rows)
}

/// Final standings with the summed value of every sort-order metric.
pub fn render_rankings(event: &Event) -> String {
    let headers: Vec<String> = ["Rank", "Team"]
        .iter()
        .map(ToString::to_string)
        .chain(event.sort_order().iter().cloned())
        .chain(["W-L-T".to_string()])
        .collect();

    let rows: Vec<Vec<String>> = event
        .rankings()
        .iter()
        .enumerate()
        .map(|(index, ranking)| {
            let record = event.record(ranking.team.id);
            let mut row = vec![(index + 1).to_string(), ranking.team.id.to_string()];
            row.extend(
                event
                    .sort_order()
                    .iter()
                    .map(|key| format!("{:.4}", ranking.metric(key))),
            );
            row.push(format!("{}-{}-{}", record.wins, record.losses, record.ties));
            row
        })
        .collect();
    render_table(&headers, &rows)
}
