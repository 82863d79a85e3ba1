use anyhow::Result;
use serde_json::json;
use worklog_providers::JiraSource;
use worklog_testing::MockHttpClient;
use worklog_testing::assertions::{assert_dates_formatted, assert_record_ids};
use worklog_testing::fixtures::jira;
use worklog_types::{DateRange, SectionConfig};

const SEARCH: &str = "/rest/api/2/search";

fn june() -> Result<DateRange> {
    Ok(DateRange::new(
        DateRange::parse_date("01-06-2023")?,
        DateRange::parse_date("30-06-2023")?,
    )?)
}

fn section() -> SectionConfig {
    SectionConfig::new()
        .with("type", "jira")
        .with("url", "https://jira.example.com/")
        .with("token", "jira-pat")
        .with("username", "carol")
}

const TRANSITIONED: &str = r#"status CHANGED TO ("Done", "Closed", "Resolved") BY "carol" DURING ("2023/06/01", "2023/07/01")"#;
const COMMENTED: &str = r#"issueFunction in commented("by carol after 2023/06/01 before 2023/07/01")"#;

#[test]
fn test_transitioned_and_commented_issues() -> Result<()> {
    let http = MockHttpClient::new()
        .on_get_with(
            SEARCH,
            &[("jql", TRANSITIONED)],
            jira::search(vec![jira::issue("10001", "OPS-1", "Done")]),
        )
        .on_get_with(
            SEARCH,
            &[("jql", COMMENTED)],
            jira::search(vec![
                jira::issue("10001", "OPS-1", "In Progress"),
                jira::issue("10002", "OPS-2", "Open"),
                jira::issue("10003", "OPS-3", "Open"),
            ]),
        )
        .on_get(
            "/rest/api/2/issue/OPS-1/comment",
            jira::comments(vec![jira::comment("carol", "2023-06-05T10:00:00.000+0000", "done")]),
        )
        .on_get(
            "/rest/api/2/issue/OPS-2/comment",
            jira::comments(vec![jira::comment("carol", "2023-06-12T08:30:00.000+0200", "on it")]),
        )
        .on_get(
            "/rest/api/2/issue/OPS-3/comment",
            jira::comments(vec![jira::comment("dave", "2023-06-12T08:30:00.000+0200", "not carol")]),
        )
        .into_shared();

    let source = JiraSource::from_section(&section(), http.clone())?;
    let report = serde_json::to_value(source.process(&june()?))?;

    assert_eq!(report["source"], "jira");
    assert_record_ids(&report, "issues", &[json!("OPS-1"), json!("OPS-2")])?;
    let first = &report["activity"]["issues"][0];
    assert_eq!(first["state"], "Done");
    assert_eq!(first["repository"], "OPS");
    assert_eq!(first["url"], "https://jira.example.com/browse/OPS-1");
    assert_eq!(first["comments"][0]["created_at"], "05-06-2023 10:00");
    assert_dates_formatted(&report)?;

    assert_eq!(http.requests_to("/rest/api/2/issue/OPS-1/comment"), 1);
    for request in http.requests() {
        assert_eq!(request.header_value("Authorization"), Some("Bearer jira-pat"));
        assert_eq!(request.header_value("Accept"), Some("application/json"));
    }
    Ok(())
}

#[test]
fn test_terminal_status_override_changes_query() -> Result<()> {
    let http = MockHttpClient::new()
        .on_get(SEARCH, jira::search(vec![]))
        .into_shared();
    let section = section().with("terminal_statuses", "Shipped, Verified");

    JiraSource::from_section(&section, http.clone())?.process(&june()?);

    let jql: Vec<String> = http
        .requests()
        .iter()
        .filter_map(|request| request.query_value("jql").map(str::to_string))
        .collect();
    assert_eq!(jql.len(), 2);
    assert!(jql[0].starts_with(r#"status CHANGED TO ("Shipped", "Verified") BY "carol""#));
    Ok(())
}

#[test]
fn test_search_pages_by_offset() -> Result<()> {
    let first_page: Vec<_> = (0..100)
        .map(|n| jira::issue(&format!("{}", 20000 + n), &format!("OPS-{}", 100 + n), "Done"))
        .collect();
    let mut envelope = jira::search(first_page);
    envelope["total"] = json!(101);

    let http = MockHttpClient::new()
        .on_get(SEARCH, jira::search(vec![]))
        .on_get_with(SEARCH, &[("jql", TRANSITIONED), ("startAt", "0")], envelope)
        .on_get_with(
            SEARCH,
            &[("jql", TRANSITIONED), ("startAt", "100")],
            jira::search(vec![jira::issue("30000", "OPS-999", "Done")]),
        )
        .into_shared();

    let source = JiraSource::from_section(&section(), http.clone())?;
    let report = serde_json::to_value(source.process(&june()?))?;

    assert_eq!(report["activity"]["issues"].as_array().map(Vec::len), Some(101));
    let offsets: Vec<_> = http
        .requests()
        .iter()
        .filter(|request| request.query_value("jql") == Some(TRANSITIONED))
        .filter_map(|request| request.query_value("startAt").map(str::to_string))
        .collect();
    assert_eq!(offsets, vec!["0", "100"]);
    Ok(())
}
