//! Parser for the "first association football internationals per country" wiki lists.
//!
//! Each section heading names the debuting association(s); the first row of the
//! table following the heading describes the match:
//! `date | home team | score | away team | venue`.

use crate::domain::aliases::{ands_to_ampersand, clean_team_name};
use crate::domain::matches::{debuts_from_heading, parse_kickoff_year, parse_score};
use crate::domain::{DomainError, ScrapedMatch, TeamLink};
use crate::ports::LinkChooser;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::{info, warn};

/// Section headings that are page furniture, not associations.
const SKIPPED_SECTIONS: &[&str] = &["See also", "Notes", "References", "External links"];

/// A list page and the heading level its sections use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiPage {
    pub url: String,
    pub heading: HeadingLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H2,
    H3,
}

impl HeadingLevel {
    fn tag(self) -> &'static str {
        match self {
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
        }
    }
}

/// The three list pages, oldest first.
pub fn default_pages() -> Vec<WikiPage> {
    const BASE: &str =
        "https://en.wikipedia.org/wiki/List_of_first_association_football_internationals_per_country:_";
    vec![
        WikiPage {
            url: format!("{}before_1940", BASE),
            heading: HeadingLevel::H2,
        },
        WikiPage {
            url: format!("{}1940%E2%80%931962", BASE),
            heading: HeadingLevel::H2,
        },
        WikiPage {
            url: format!("{}since_1962", BASE),
            heading: HeadingLevel::H3,
        },
    ]
}

fn selector(s: &str) -> Result<Selector, DomainError> {
    Selector::parse(s).map_err(|e| DomainError::Parse(format!("selector {}: {}", s, e)))
}

/// Text of an element, ignoring footnote `<sup>` and edit-link content.
fn visible_text(el: ElementRef) -> String {
    let mut out = String::new();
    collect_text(el, &mut out);
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(el: ElementRef, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) => {
                if e.name() == "sup" || e.has_class("mw-editsection", scraper::CaseSensitivity::AsciiCaseInsensitive) {
                    continue;
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}

/// True for anchors inside a `<sup>` (citation markers).
fn in_footnote(el: ElementRef) -> bool {
    el.ancestors()
        .any(|n| n.value().as_element().is_some_and(|e| e.name() == "sup"))
}

/// HTML parser for one list page. Holds the compiled selectors.
pub struct FirstMatchParser<'c> {
    chooser: &'c dyn LinkChooser,
    content: Selector,
    headline: Selector,
    row: Selector,
    cell: Selector,
    link: Selector,
    span: Selector,
    small: Selector,
}

impl<'c> FirstMatchParser<'c> {
    pub fn new(chooser: &'c dyn LinkChooser) -> Result<Self, DomainError> {
        Ok(Self {
            chooser,
            content: selector("#bodyContent .mw-parser-output")?,
            headline: selector(".mw-headline")?,
            row: selector("tr")?,
            cell: selector("td")?,
            link: selector("a")?,
            span: selector("span")?,
            small: selector("small")?,
        })
    }

    /// Parse every section of a page. Sections that cannot be read are skipped with a warning.
    pub fn parse_page(&self, html: &str, level: HeadingLevel) -> Result<Vec<ScrapedMatch>, DomainError> {
        let doc = Html::parse_document(html);
        let content = doc
            .select(&self.content)
            .next()
            .ok_or_else(|| DomainError::Parse("page has no article content".to_string()))?;
        let sections = selector(&format!("{}, table", level.tag()))?;

        let mut matches = Vec::new();
        let mut pending: Option<String> = None;
        for el in content.select(&sections) {
            if el.value().name() != "table" {
                pending = Some(self.heading_text(el));
                continue;
            }
            // Only the first table after a heading describes the match
            let Some(heading) = pending.take() else {
                continue;
            };
            if SKIPPED_SECTIONS.contains(&heading.as_str()) {
                continue;
            }
            info!(section = %heading, "processing");
            match self.parse_section(&heading, el) {
                Ok(m) => matches.push(m),
                Err(e) => warn!(section = %heading, error = %e, "section skipped"),
            }
        }
        Ok(matches)
    }

    fn heading_text(&self, heading: ElementRef) -> String {
        let text = match heading.select(&self.headline).next() {
            Some(span) => visible_text(span),
            None => visible_text(heading),
        };
        ands_to_ampersand(&text)
    }

    fn parse_section(&self, heading: &str, table: ElementRef) -> Result<ScrapedMatch, DomainError> {
        let row = table
            .select(&self.row)
            .next()
            .ok_or_else(|| DomainError::Parse("table has no rows".to_string()))?;
        let cells: Vec<ElementRef> = row.select(&self.cell).collect();
        let [date, home, score, away, venue] = cells.as_slice() else {
            return Err(DomainError::Parse(format!(
                "expected 5 cells, found {}",
                cells.len()
            )));
        };

        let date_text = date
            .select(&self.span)
            .next()
            .map(visible_text)
            .unwrap_or_else(|| visible_text(*date));
        let ko_year = parse_kickoff_year(&date_text)?;
        let match_type = date
            .select(&self.small)
            .next()
            .map(visible_text)
            .unwrap_or_default();

        let teams = [self.team(heading, *home)?, self.team(heading, *away)?];
        let scores = parse_score(&visible_text(*score))?;

        Ok(ScrapedMatch {
            date_text,
            ko_year,
            match_type,
            teams,
            scores,
            venue: visible_text(*venue),
            debuts: debuts_from_heading(heading),
        })
    }

    fn team(&self, heading: &str, cell: ElementRef) -> Result<String, DomainError> {
        let links: Vec<TeamLink> = cell
            .select(&self.link)
            .filter(|a| !in_footnote(*a))
            .map(|a| TeamLink {
                text: visible_text(a),
                title: a.value().attr("title").map(String::from),
            })
            .collect();
        let idx = match links.len() {
            0 => return Err(DomainError::Parse("team cell has no link".to_string())),
            1 => 0,
            _ => self.chooser.choose(heading, &links)?,
        };
        let link = links
            .get(idx)
            .ok_or_else(|| DomainError::Parse(format!("link index {} out of range", idx)))?;
        let title = link
            .title
            .as_deref()
            .ok_or_else(|| DomainError::Parse(format!("link '{}' has no title", link.text)))?;
        Ok(clean_team_name(&ands_to_ampersand(title)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FirstLink;

    impl LinkChooser for FirstLink {
        fn choose(&self, _section: &str, _links: &[TeamLink]) -> Result<usize, DomainError> {
            Ok(0)
        }
    }

    /// Records what it was asked and answers with a fixed index.
    struct Scripted {
        answer: usize,
        asked: Mutex<Vec<(String, usize)>>,
    }

    impl LinkChooser for Scripted {
        fn choose(&self, section: &str, links: &[TeamLink]) -> Result<usize, DomainError> {
            self.asked
                .lock()
                .unwrap()
                .push((section.to_string(), links.len()));
            Ok(self.answer)
        }
    }

    const PAGE: &str = r##"
<html><body><div id="bodyContent"><div class="mw-parser-output">
<h2><span class="mw-headline">Scotland and England</span></h2>
<table><tr>
  <td><span>30 November 1872</span><br><small>Friendly</small></td>
  <td><a href="/wiki/S" title="Scotland national football team">Scotland</a><sup><a href="#cite_note-1">[1]</a></sup></td>
  <td>0–0<sup>[1]</sup></td>
  <td><a href="/wiki/E" title="England national football team">England</a></td>
  <td>Hamilton Crescent, Partick</td>
</tr></table>
<h2><span class="mw-headline">Trinidad and Tobago</span></h2>
<table><tr>
  <td><span>March 1905</span><small>Friendly</small></td>
  <td><a title="British Guiana national football team">British Guiana</a> <a title="Guyana national football team">(Guyana)</a></td>
  <td>1–4</td>
  <td><a title="Trinidad and Tobago national football team">Trinidad and Tobago</a></td>
  <td>Georgetown</td>
</tr></table>
<h2><span class="mw-headline">Broken</span></h2>
<table><tr><td>only one cell</td></tr></table>
<h2><span class="mw-headline">References</span></h2>
<table><tr><td>x</td></tr></table>
</div></div></body></html>"##;

    #[test]
    fn test_parse_page_sections() {
        let chooser = FirstLink;
        let parser = FirstMatchParser::new(&chooser).unwrap();
        let matches = parser.parse_page(PAGE, HeadingLevel::H2).unwrap();
        assert_eq!(matches.len(), 2);

        let first = &matches[0];
        assert_eq!(first.teams, ["Scotland".to_string(), "England".to_string()]);
        assert_eq!(first.scores, [0, 0]);
        assert_eq!(first.ko_year, 1872);
        assert_eq!(first.date_text, "30 November 1872");
        assert_eq!(first.match_type, "Friendly");
        assert_eq!(first.venue, "Hamilton Crescent, Partick");
        assert_eq!(
            first.debuts,
            vec![Some("Scotland".to_string()), Some("England".to_string())]
        );

        let second = &matches[1];
        assert_eq!(second.debuts, vec![Some("Trinidad & Tobago".to_string())]);
        assert_eq!(second.teams[1], "Trinidad & Tobago");
        assert_eq!(second.teams[0], "British Guiana");
        assert_eq!(second.ko_year, 1905);
    }

    #[test]
    fn test_ambiguous_cell_goes_to_chooser() {
        let chooser = Scripted {
            answer: 1,
            asked: Mutex::new(Vec::new()),
        };
        let parser = FirstMatchParser::new(&chooser).unwrap();
        let matches = parser.parse_page(PAGE, HeadingLevel::H2).unwrap();
        assert_eq!(matches[1].teams[0], "Guyana");
        let asked = chooser.asked.lock().unwrap();
        assert_eq!(asked.as_slice(), &[("Trinidad & Tobago".to_string(), 2)]);
    }

    #[test]
    fn test_footnote_link_does_not_make_cell_ambiguous() {
        let chooser = Scripted {
            answer: 1,
            asked: Mutex::new(Vec::new()),
        };
        let parser = FirstMatchParser::new(&chooser).unwrap();
        let matches = parser.parse_page(PAGE, HeadingLevel::H2).unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].teams[0], "Scotland");
        // Only the genuinely ambiguous cell reaches the chooser
        let asked = chooser.asked.lock().unwrap();
        assert_eq!(asked.as_slice(), &[("Trinidad & Tobago".to_string(), 2)]);
    }

    #[test]
    fn test_h3_level_ignores_h2_sections() {
        let chooser = FirstLink;
        let parser = FirstMatchParser::new(&chooser).unwrap();
        let matches = parser.parse_page(PAGE, HeadingLevel::H3).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_page_without_content_is_error() {
        let chooser = FirstLink;
        let parser = FirstMatchParser::new(&chooser).unwrap();
        assert!(parser.parse_page("<html></html>", HeadingLevel::H2).is_err());
    }
}
