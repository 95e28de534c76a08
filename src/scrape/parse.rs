//! Profile page header extraction.

use scraper::{Html, Selector};

/// Club and signing status read from a player's profile header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileHeader {
    pub club: String,
    pub league: String,
    pub is_new_signing: bool,
    pub is_on_loan: bool,
}

impl ProfileHeader {
    /// Derive signing status from the header ribbon text. A loan also counts
    /// as a new signing.
    pub fn with_ribbon(mut self, ribbon: &str) -> Self {
        let ribbon = ribbon.trim().to_lowercase();
        self.is_on_loan = ribbon == "on loan";
        self.is_new_signing = ribbon == "new arrival" || self.is_on_loan;
        self
    }
}

/// Turns raw profile content into a [`ProfileHeader`].
///
/// Returns `None` when the page does not look like a profile; callers treat
/// that as "skip this player".
pub trait ProfileParser: Send + Sync {
    fn parse_profile(&self, raw: &str) -> Option<ProfileHeader>;
}

/// Parser for the `data-header` block of a profile page.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderParser;

fn select_text(doc: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    doc.select(&sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

impl ProfileParser for HeaderParser {
    fn parse_profile(&self, raw: &str) -> Option<ProfileHeader> {
        let doc = Html::parse_document(raw);
        let header = Selector::parse("header.data-header, .data-header").ok()?;
        doc.select(&header).next()?;

        let club = select_text(
            &doc,
            ".data-header__club-info .data-header__club a",
        )
        .unwrap_or_default();
        let league = select_text(
            &doc,
            ".data-header__club-info .data-header__league a",
        )
        .unwrap_or_default();
        let ribbon = select_text(&doc, ".data-header__ribbon span").unwrap_or_default();

        Some(
            ProfileHeader {
                club,
                league,
                ..Default::default()
            }
            .with_ribbon(&ribbon),
        )
    }
}
