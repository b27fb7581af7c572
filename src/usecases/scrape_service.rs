//! First-internationals scrape: fetch list pages -> parse sections -> check -> debut CSV.

use crate::adapters::tables::records_to_csv;
use crate::adapters::wiki::{FirstMatchParser, WikiPage};
use crate::domain::matches::{check_matches, debut_records};
use crate::domain::{DebutRecord, DomainError, ScrapedMatch};
use crate::ports::{HttpPort, LinkChooser};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::{info, warn};

pub struct ScrapeService {
    http: Arc<dyn HttpPort>,
    chooser: Arc<dyn LinkChooser>,
}

impl ScrapeService {
    pub fn new(http: Arc<dyn HttpPort>, chooser: Arc<dyn LinkChooser>) -> Self {
        Self { http, chooser }
    }

    /// Fetch and parse every page, in order. A page that cannot be fetched aborts the run.
    pub async fn scrape(&self, pages: &[WikiPage]) -> Result<Vec<ScrapedMatch>, DomainError> {
        let mut bodies = Vec::with_capacity(pages.len());
        for page in pages {
            info!(url = %page.url, "fetching");
            bodies.push(self.http.get_text(&page.url).await?);
        }

        let parser = FirstMatchParser::new(self.chooser.as_ref())?;
        let mut matches = Vec::new();
        for (page, body) in pages.iter().zip(&bodies) {
            let parsed = parser.parse_page(body, page.heading)?;
            info!(url = %page.url, matches = parsed.len(), "page parsed");
            matches.extend(parsed);
        }
        Ok(matches)
    }

    /// Scrape, log consistency findings and write the debut CSV. Returns the records written.
    pub async fn run(&self, pages: &[WikiPage], out: &Path) -> Result<Vec<DebutRecord>, DomainError> {
        let matches = self.scrape(pages).await?;

        let report = check_matches(&matches);
        for (idx, association) in &report.not_in_match {
            let teams = &matches[*idx].teams;
            warn!(association = %association, teams = ?teams, "debuting association not in match");
        }
        for association in &report.not_members {
            warn!(association = %association, "not a current FIFA member");
        }
        if !report.missing_members.is_empty() {
            warn!(
                count = report.missing_members.len(),
                members = ?report.missing_members,
                "current members without a debut"
            );
        }

        let records = debut_records(&matches);
        let csv = records_to_csv(&records)
            .map_err(|e| DomainError::Csv(format!("Failed to generate CSV: {}", e)))?;
        if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Io(format!("create {}: {}", parent.display(), e)))?;
        }
        fs::write(out, csv)
            .await
            .map_err(|e| DomainError::Io(format!("write {}: {}", out.display(), e)))?;
        info!(
            path = %out.display(),
            matches = matches.len(),
            records = records.len(),
            "debut records written"
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ui::FirstLinkChooser;
    use crate::adapters::wiki::HeadingLevel;
    use crate::domain::MatchOutcome;
    use std::collections::HashMap;

    struct MockHttp {
        pages: HashMap<String, String>,
    }

    #[async_trait::async_trait]
    impl HttpPort for MockHttp {
        async fn get_text(&self, url: &str) -> Result<String, DomainError> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| DomainError::Http(format!("404 for {}", url)))
        }

        async fn download(&self, url: &str, _dest: &Path) -> Result<u64, DomainError> {
            Err(DomainError::Http(format!("unexpected download of {}", url)))
        }
    }

    const OLD: &str = r#"<html><body><div id="bodyContent"><div class="mw-parser-output">
<h2><span class="mw-headline">Scotland and England</span></h2>
<table><tr>
  <td><span>30 November 1872</span><small>Friendly</small></td>
  <td><a title="Scotland national football team">Scotland</a></td>
  <td>0–0</td>
  <td><a title="England national football team">England</a></td>
  <td>Hamilton Crescent, Partick</td>
</tr></table>
</div></div></body></html>"#;

    const NEW: &str = r#"<html><body><div id="bodyContent"><div class="mw-parser-output">
<h3><span class="mw-headline">Kosovo</span></h3>
<table><tr>
  <td><span>5 March 2014</span><small>Friendly</small></td>
  <td><a title="Kosovo national football team">Kosovo</a></td>
  <td>0–0</td>
  <td><a title="Haiti national football team">Haiti</a></td>
  <td>Mitrovica</td>
</tr></table>
<h3><span class="mw-headline">Gibraltar</span></h3>
<table><tr>
  <td><span>19 November 2013</span><small>Friendly</small></td>
  <td><a title="Gibraltar national football team">Gibraltar</a></td>
  <td>0–0</td>
  <td><a title="Slovakia national football team">Slovakia</a></td>
  <td>Faro</td>
</tr></table>
</div></div></body></html>"#;

    fn pages() -> Vec<WikiPage> {
        vec![
            WikiPage {
                url: "https://wiki.test/old".to_string(),
                heading: HeadingLevel::H2,
            },
            WikiPage {
                url: "https://wiki.test/new".to_string(),
                heading: HeadingLevel::H3,
            },
        ]
    }

    fn service(with_new: bool) -> ScrapeService {
        let mut map = HashMap::new();
        map.insert("https://wiki.test/old".to_string(), OLD.to_string());
        if with_new {
            map.insert("https://wiki.test/new".to_string(), NEW.to_string());
        }
        ScrapeService::new(
            Arc::new(MockHttp { pages: map }),
            Arc::new(FirstLinkChooser::new()),
        )
    }

    #[tokio::test]
    async fn test_scrape_keeps_page_order() {
        let matches = service(true).scrape(&pages()).await.unwrap();
        let firsts: Vec<&str> = matches.iter().map(|m| m.teams[0].as_str()).collect();
        assert_eq!(firsts, vec!["Scotland", "Kosovo", "Gibraltar"]);
    }

    #[tokio::test]
    async fn test_run_writes_debut_csv() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("firsts.csv");
        let records = service(true).run(&pages(), &out).await.unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].team_name, "Scotland");
        assert_eq!(records[0].outcome, MatchOutcome::Draw);
        assert_eq!(records[1].team_name, "England");
        assert_eq!(records[1].oppname, "Scotland");

        let text = std::fs::read_to_string(&out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "team_name,oppname,outcome,score,venue,ko_year,ko_date,match_type"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Scotland,England,D,0 - 0,\"Hamilton Crescent, Partick\",1872,30 November 1872,Friendly"
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("firsts.csv");
        let err = service(false).run(&pages(), &out).await.unwrap_err();
        assert!(matches!(err, DomainError::Http(_)));
        assert!(!out.exists());
    }
}
