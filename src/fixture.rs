//! Fixture document export
//!
//! Pure read-only consumer of a finished draw: maps the three groups into the
//! fixed match schedule (group stage, second-place round robin, knockout
//! placeholders) and renders the result as paginated text or HTML tables for
//! the surrounding document rasterizer. Callers must gate on
//! [`DrawState::is_full`]; exporting early is a contract violation reported
//! as a typed error, never a panic.

use thiserror::Error;

use crate::consts::{GROUP_COUNT, TEAM_COUNT};
use crate::draw::DrawState;
use crate::draw::state::group_label;

/// Document title
pub const FIXTURE_TITLE: &str = "Strikers Cup 2025 - Tournament Fixture";
/// Group stage date
const DATE_GROUPS: &str = "20.09.2025";
/// Knockout stage date
const DATE_KNOCKOUT: &str = "21.09.2025";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FixtureError {
    #[error("draw is not complete: {assigned} of {required} participants assigned")]
    DrawIncomplete { assigned: usize, required: usize },
}

/// One scheduled match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureRow {
    pub match_no: u32,
    pub fixture: String,
    pub ground: &'static str,
    pub kickoff: &'static str,
    pub date: &'static str,
}

/// A titled block of matches (one group, or the knockout stage)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureSection {
    pub title: String,
    pub rows: Vec<FixtureRow>,
}

/// One page of the exported document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixturePage {
    pub sections: Vec<FixtureSection>,
}

/// The complete fixture document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureDocument {
    pub title: &'static str,
    pub sections: Vec<FixtureSection>,
}

/// Per-group schedule: (match number, home slot, away slot, ground, kickoff)
/// for groups A, B, C in order. Match numbers interleave across groups.
const GROUP_SCHEDULE: [[(u32, usize, usize, &str, &str); 3]; GROUP_COUNT] = [
    [
        (1, 0, 1, "Field 1", "09:00 AM"),
        (4, 1, 2, "Field 2", "10:45 AM"),
        (7, 0, 2, "Field 1", "14:15 PM"),
    ],
    [
        (2, 0, 1, "Field 2", "09:00 AM"),
        (5, 1, 2, "Field 1", "12:30 PM"),
        (8, 0, 2, "Field 2", "14:15 PM"),
    ],
    [
        (3, 0, 1, "Field 1", "10:45 AM"),
        (6, 1, 2, "Field 2", "12:30 PM"),
        (9, 0, 2, "Field 2", "16:00 PM"),
    ],
];

/// Build the fixture document from a finished draw.
pub fn build(state: &DrawState) -> Result<FixtureDocument, FixtureError> {
    if !state.is_full() {
        return Err(FixtureError::DrawIncomplete {
            assigned: state.assigned.len(),
            required: TEAM_COUNT,
        });
    }

    let mut sections = Vec::with_capacity(GROUP_COUNT + 2);
    for g in 0..GROUP_COUNT {
        let members = state.group(g);
        let rows = GROUP_SCHEDULE[g]
            .iter()
            .map(|&(match_no, home, away, ground, kickoff)| FixtureRow {
                match_no,
                fixture: format!(
                    "{} vs {}",
                    members[home].unwrap_or_default(),
                    members[away].unwrap_or_default()
                ),
                ground,
                kickoff,
                date: DATE_GROUPS,
            })
            .collect();
        sections.push(FixtureSection {
            title: format!("Group {}", group_label(g)),
            rows,
        });
    }

    sections.push(FixtureSection {
        title: "Group D (2nd Place Round Robin)".to_string(),
        rows: vec![
            placeholder(10, "2A vs 2B", "Field 1", "16:15 PM", DATE_GROUPS),
            placeholder(11, "2B vs 2C", "Field 1", "09:00 AM", DATE_KNOCKOUT),
            placeholder(12, "2A vs 2C", "Field 1", "10:45 AM", DATE_KNOCKOUT),
        ],
    });
    sections.push(FixtureSection {
        title: "Knockout Stage".to_string(),
        rows: vec![
            placeholder(
                13,
                "Semi Final 1: Winner A vs Winner C",
                "Field 1",
                "12:30 PM",
                DATE_KNOCKOUT,
            ),
            placeholder(
                14,
                "Semi Final 2: Winner B vs Winner D",
                "Field 1",
                "14:15 PM",
                DATE_KNOCKOUT,
            ),
            placeholder(
                15,
                "Final: Winner SF1 vs Winner SF2",
                "Field 1",
                "16:30 PM",
                DATE_KNOCKOUT,
            ),
        ],
    });

    Ok(FixtureDocument {
        title: FIXTURE_TITLE,
        sections,
    })
}

fn placeholder(
    match_no: u32,
    fixture: &str,
    ground: &'static str,
    kickoff: &'static str,
    date: &'static str,
) -> FixtureRow {
    FixtureRow {
        match_no,
        fixture: fixture.to_string(),
        ground,
        kickoff,
        date,
    }
}

impl FixtureDocument {
    /// Split sections across pages with at most `rows_per_page` match rows
    /// each. Sections are never split mid-table; a section longer than a page
    /// still gets a page of its own.
    pub fn paginate(&self, rows_per_page: usize) -> Vec<FixturePage> {
        let rows_per_page = rows_per_page.max(1);
        let mut pages: Vec<FixturePage> = Vec::new();
        let mut current = FixturePage {
            sections: Vec::new(),
        };
        let mut used = 0;

        for section in &self.sections {
            if used > 0 && used + section.rows.len() > rows_per_page {
                pages.push(std::mem::replace(
                    &mut current,
                    FixturePage {
                        sections: Vec::new(),
                    },
                ));
                used = 0;
            }
            used += section.rows.len();
            current.sections.push(section.clone());
        }
        if !current.sections.is_empty() {
            pages.push(current);
        }
        pages
    }

    /// Fixed-width rendering for the console demo and plain-text printing.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(self.title);
        out.push('\n');
        for section in &self.sections {
            out.push('\n');
            out.push_str(&section.title);
            out.push('\n');
            out.push_str(&format!(
                "{:<5} {:<40} {:<8} {:<9} {}\n",
                "Match", "Fixture", "Ground", "Time", "Date"
            ));
            for row in &section.rows {
                out.push_str(&format!(
                    "{:<5} {:<40} {:<8} {:<9} {}\n",
                    row.match_no, row.fixture, row.ground, row.kickoff, row.date
                ));
            }
        }
        out
    }

    /// HTML tables for the in-browser print view. Team names are user input
    /// and must be escaped.
    pub fn render_html(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "<div class=\"title\">{}</div>\n",
            escape_html(self.title)
        ));
        for section in &self.sections {
            out.push_str(&format!(
                "<div class=\"section\">{}</div>\n<table><thead><tr>\
                 <th>Match</th><th>Fixture</th><th>Ground</th><th>Time</th><th>Date</th>\
                 </tr></thead><tbody>\n",
                escape_html(&section.title)
            ));
            for row in &section.rows {
                out.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                    row.match_no,
                    escape_html(&row.fixture),
                    row.ground,
                    row.kickoff,
                    row.date
                ));
            }
            out.push_str("</tbody></table>\n");
        }
        out
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished_draw() -> DrawState {
        let mut state = DrawState::default();
        for _ in 0..TEAM_COUNT {
            state.commit(0);
        }
        state
    }

    #[test]
    fn incomplete_draw_is_rejected() {
        let mut state = DrawState::default();
        assert_eq!(
            build(&state),
            Err(FixtureError::DrawIncomplete {
                assigned: 0,
                required: TEAM_COUNT
            })
        );
        state.commit(0);
        assert_eq!(
            build(&state),
            Err(FixtureError::DrawIncomplete {
                assigned: 1,
                required: TEAM_COUNT
            })
        );
    }

    #[test]
    fn full_draw_builds_five_sections_of_fifteen_matches() {
        let doc = build(&finished_draw()).unwrap();
        assert_eq!(doc.sections.len(), 5);
        let match_numbers: Vec<u32> = doc
            .sections
            .iter()
            .flat_map(|s| s.rows.iter().map(|r| r.match_no))
            .collect();
        assert_eq!(match_numbers.len(), 15);
        let mut sorted = match_numbers.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=15).collect::<Vec<_>>());
    }

    #[test]
    fn group_rows_pair_the_right_members() {
        // Sequential commits put Team 1/4/7 into group A.
        let doc = build(&finished_draw()).unwrap();
        let group_a = &doc.sections[0];
        assert_eq!(group_a.title, "Group A");
        assert_eq!(group_a.rows[0].fixture, "Team 1 vs Team 4");
        assert_eq!(group_a.rows[1].fixture, "Team 4 vs Team 7");
        assert_eq!(group_a.rows[2].fixture, "Team 1 vs Team 7");
        assert!(group_a.rows.iter().all(|r| r.date == DATE_GROUPS));
    }

    #[test]
    fn knockout_rows_are_placeholders() {
        let doc = build(&finished_draw()).unwrap();
        let knockout = doc.sections.last().unwrap();
        assert_eq!(knockout.title, "Knockout Stage");
        assert!(knockout.rows[2].fixture.starts_with("Final:"));
        assert!(knockout.rows.iter().all(|r| r.date == DATE_KNOCKOUT));
    }

    #[test]
    fn pagination_keeps_sections_whole() {
        let doc = build(&finished_draw()).unwrap();
        let pages = doc.paginate(12);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].sections.len(), 4);
        assert_eq!(pages[1].sections.len(), 1);

        // A tiny page still takes one whole section at a time.
        let pages = doc.paginate(1);
        assert_eq!(pages.len(), doc.sections.len());
    }

    #[test]
    fn html_escapes_user_entered_names() {
        let mut state = DrawState::default();
        state.inputs[0] = "<b>Ro&vers</b>".to_string();
        state.apply();
        for _ in 0..TEAM_COUNT {
            state.commit(0);
        }
        let html = build(&state).unwrap().render_html();
        assert!(html.contains("&lt;b&gt;Ro&amp;vers&lt;/b&gt;"));
        assert!(!html.contains("<b>Ro"));
    }

    #[test]
    fn text_rendering_lists_every_match() {
        let text = build(&finished_draw()).unwrap().render_text();
        assert!(text.starts_with(FIXTURE_TITLE));
        for section in ["Group A", "Group B", "Group C", "Knockout Stage"] {
            assert!(text.contains(section), "missing {section}");
        }
        assert!(text.contains("Semi Final 1"));
    }
}
