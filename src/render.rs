//! Plain-text rendering of the market board and profile panel.

use std::fmt::Write;

use crate::market::{MarketSnapshot, Quote};
use crate::profile::{PageView, ProfilePanel};
use crate::signals::{Forensics, SearchHit};

const RULE_WIDTH: usize = 50;

/// Render the market board for one snapshot.
pub fn market_board(snapshot: &MarketSnapshot) -> String {
    quote_board(snapshot.tick, &snapshot.quotes())
}

fn quote_board(tick: u64, quotes: &[Quote]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Tick {} Trading Update:", tick);
    let _ = writeln!(out, "{:<20} | {:<6} | {:<15}", "COMPANY", "HYPE", "COST (Tokens)");
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));

    for quote in quotes {
        let _ = writeln!(
            out,
            "{:<20} | {:<6} | {:<5} {}",
            quote.name,
            format!("{}%", quote.hype_pct),
            quote.cost,
            quote.heat.marker()
        );
    }

    out
}

/// Render the profile panel.
pub fn profile_panel(panel: &ProfilePanel) -> String {
    let mut out = String::new();
    match panel {
        ProfilePanel::Locked(teaser) => {
            let _ = writeln!(out, "🔒 {}", teaser.title);
            let _ = writeln!(out, "{}", teaser.prompt);
            let _ = writeln!(out, "[ {} ]", teaser.action);
        }
        ProfilePanel::Unlocked(card) => {
            let _ = writeln!(out, "🚀 Your Code Graph  [{}]", card.badge);
            for skill in &card.skills {
                let _ = writeln!(out, "{:<20} {:>3} {}", skill.label, skill.score, bar(skill.score));
            }
            let _ = writeln!(out, "VERIFIED STACK: {}", card.verified_stack.join(", "));
            let _ = writeln!(out, "GLOBAL RANK: {}", card.global_rank);
        }
    }
    out
}

/// Render the whole page.
pub fn page(view: &PageView) -> String {
    let mut out = quote_board(view.tick, &view.market);
    out.push('\n');
    out.push_str(&profile_panel(&view.profile));
    if let Some(teaser) = &view.company_teaser {
        out.push('\n');
        let _ = writeln!(out, "{}", "[ ░░░░ ] ".repeat(teaser.placeholders as usize).trim_end());
        let _ = writeln!(out, "{}", teaser.message);
    }
    out
}

/// Render the authorship table, one row per record.
pub fn forensics_table(rows: &[Forensics]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<15} | {:<8} | {:<7} | {:<8} | SIGNAL",
        "USER", "AI SCORE", "ENTROPY", "COMMENTS"
    );
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH + 20));

    for row in rows {
        let author: String = row.author.chars().take(15).collect();
        let _ = writeln!(
            out,
            "{:<15} | {:<8.2} | {:<7.2} | {:<8} | {}",
            author,
            row.score,
            row.entropy,
            format!("{:.0}%", row.comment_ratio * 100.0),
            row.verdict
        );
    }

    out
}

/// Render ranked search results for a query.
pub fn search_results(query: &str, hits: &[SearchHit<'_>]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🔎 Query: '{}'", query);
    if hits.is_empty() {
        let _ = writeln!(out, "   (no matches)");
    }
    for hit in hits {
        let _ = writeln!(
            out,
            "   [{:.4}] {} (by {})",
            hit.score, hit.record.skill_signal, hit.record.author
        );
    }
    out
}

fn bar(score: u8) -> String {
    let filled = (score as usize).min(100) / 5;
    format!("{}{}", "█".repeat(filled), "░".repeat(20 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::initialize;
    use crate::profile::ProfileView;
    use crate::signals::{analyze, ProofRecord, SearchIndex};

    #[test]
    fn board_lists_every_entity_with_markers() {
        let board = market_board(&MarketSnapshot::new(0, initialize()));

        assert!(board.starts_with("Tick 0 Trading Update:"));
        assert!(board.contains("COST (Tokens)"));
        let nvidia = board.lines().find(|l| l.starts_with("NVIDIA")).unwrap();
        assert!(nvidia.contains("95%"));
        assert!(nvidia.contains("102"));
        assert!(nvidia.ends_with("🔥"));
        assert_eq!(board.lines().count(), 3 + 5);
    }

    #[test]
    fn cold_entities_get_snowflake() {
        let entities = vec![crate::market::MarketEntity::new("Sleepy", 12.0, 0.1).unwrap()];
        let board = market_board(&MarketSnapshot::new(0, entities));
        assert!(board.lines().last().unwrap().ends_with("❄️"));
    }

    #[test]
    fn page_hides_company_teaser_once_unlocked() {
        let snapshot = MarketSnapshot::new(0, initialize());

        let locked = page(&PageView::compose(&snapshot, ProfileView::Locked));
        assert!(locked.contains("Sign up to view 500+ more companies"));
        assert!(locked.contains("Analyze My GitHub"));

        let unlocked = page(&PageView::compose(&snapshot, ProfileView::Unlocked));
        assert!(!unlocked.contains("Sign up to view"));
        assert!(unlocked.contains("GLOBAL RANK: 94"));
    }

    fn record(author: &str, title: &str) -> ProofRecord {
        ProofRecord {
            author: author.to_string(),
            skill_signal: title.to_string(),
            context: String::new(),
            merged_at: None,
            proof_url: String::new(),
        }
    }

    #[test]
    fn forensics_table_truncates_authors() {
        let rows = vec![analyze(&record("a-very-long-login-name", "# tidy\n# tidy"))];
        let table = forensics_table(&rows);

        assert!(table.starts_with("USER"));
        let row = table.lines().nth(2).unwrap();
        assert!(row.starts_with("a-very-long-log |"));
        assert!(row.ends_with(&rows[0].verdict.to_string()));
    }

    #[test]
    fn search_results_list_score_title_and_author() {
        let records = vec![
            record("bo", "Add support for ARM"),
            record("cy", "Docs"),
            record("di", "Typos"),
        ];
        let index = SearchIndex::build(&records);
        let hits = index.search("support", 3);

        let text = search_results("support", &hits);
        let line = text.lines().nth(1).unwrap();
        assert!(line.trim_start().starts_with('['));
        assert!(line.ends_with("] Add support for ARM (by bo)"));

        assert!(search_results("nothing", &[]).contains("(no matches)"));
    }

    #[test]
    fn skill_bar_width_is_fixed() {
        assert_eq!(bar(0).chars().count(), 20);
        assert_eq!(bar(98).chars().count(), 20);
        assert_eq!(bar(100).chars().count(), 20);
    }
}
