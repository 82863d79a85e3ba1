use anyhow::Result;
use serde_json::{Value, json};
use worklog_providers::{GitHubSource, SourceAdapter, create_adapter};
use worklog_testing::MockHttpClient;
use worklog_testing::assertions::{assert_dates_formatted, assert_record_count, assert_record_ids};
use worklog_testing::fixtures::github;
use worklog_types::{DateRange, SectionConfig};

fn june() -> Result<DateRange> {
    Ok(DateRange::new(
        DateRange::parse_date("01-06-2023")?,
        DateRange::parse_date("30-06-2023")?,
    )?)
}

fn section() -> SectionConfig {
    SectionConfig::new()
        .with("type", "github")
        .with("token", "ghp_literal_test_token")
        .with("username", "alice")
}

fn q(query: &str) -> [(&str, &str); 1] {
    [("q", query)]
}

#[test]
fn test_issue_in_two_facets_is_reported_once() -> Result<()> {
    let mut commented = github::issue(9042, 42, "alice");
    commented["title"] = json!("seen by commented facet");

    let http = MockHttpClient::new()
        .on_get("/search/issues", github::search(vec![]))
        .on_get("/search/commits", github::search(vec![]))
        .on_get_with(
            "/search/issues",
            &q("commenter:alice type:issue updated:>=2023-06-01"),
            github::search(vec![commented]),
        )
        .on_get_with(
            "/search/issues",
            &q("author:alice type:issue created:2023-06-01..2023-06-30"),
            github::search(vec![github::issue(9042, 42, "alice")]),
        )
        .on_get(
            &github::comments_url(42),
            json!([github::comment("alice", "2023-06-10T12:00:00Z", "Reproduced")]),
        )
        .into_shared();

    let source = GitHubSource::from_section(&section(), http.clone())?;
    let report = serde_json::to_value(source.process(&june()?))?;

    assert_eq!(report["source"], "github");
    assert_eq!(report["user"], "alice");
    assert_record_ids(&report, "issues", &[json!(42)])?;
    assert_record_count(&report, "pull_requests", 0)?;
    assert_record_count(&report, "commits", 0)?;
    assert_dates_formatted(&report)?;

    let issue = &report["activity"]["issues"][0];
    assert_eq!(issue["title"], "seen by commented facet");
    assert_eq!(issue["repository"], "acme/widgets");
    assert!(issue.get("merged_at").is_none());
    assert_eq!(issue["comments"][0]["author"], "alice");
    assert_eq!(issue["comments"][0]["created_at"], "10-06-2023 12:00");

    // Comments fetched for validation are reused for normalization
    assert_eq!(http.requests_to("/repos/acme/widgets/issues/42/comments"), 1);
    Ok(())
}

#[test]
fn test_commented_facet_requires_comment_in_window() -> Result<()> {
    let http = MockHttpClient::new()
        .on_get("/search/issues", github::search(vec![]))
        .on_get("/search/commits", github::search(vec![]))
        .on_get_with(
            "/search/issues",
            &q("commenter:alice type:issue updated:>=2023-06-01"),
            github::search(vec![github::issue(1, 7, "carol"), github::issue(2, 8, "carol")]),
        )
        .on_get(
            &github::comments_url(7),
            json!([
                github::comment("alice", "2023-05-31T23:59:00Z", "too early"),
                github::comment("bob", "2023-06-05T10:00:00Z", "other user"),
            ]),
        )
        .on_get(
            &github::comments_url(8),
            json!([github::comment("alice", "2023-06-30T23:59:59Z", "last minute")]),
        )
        .into_shared();

    let source = GitHubSource::from_section(&section(), http)?;
    let report = serde_json::to_value(source.process(&june()?))?;

    assert_record_ids(&report, "issues", &[json!(8)])?;
    Ok(())
}

#[test]
fn test_configured_username_case_does_not_hide_comments() -> Result<()> {
    let http = MockHttpClient::new()
        .on_get("/search/issues", github::search(vec![]))
        .on_get("/search/commits", github::search(vec![]))
        .on_get_with(
            "/search/issues",
            &q("commenter:Alice type:issue updated:>=2023-06-01"),
            github::search(vec![github::issue(1, 7, "carol")]),
        )
        .on_get(
            &github::comments_url(7),
            json!([github::comment("alice", "2023-06-12T08:30:00Z", "Looking into it")]),
        )
        .into_shared();

    let section = section().with("username", "Alice");
    let source = GitHubSource::from_section(&section, http)?;
    let report = serde_json::to_value(source.process(&june()?))?;

    assert_record_ids(&report, "issues", &[json!(7)])?;
    Ok(())
}

#[test]
fn test_commented_item_touched_after_window_is_kept() -> Result<()> {
    let mut issue = github::issue(1, 9, "carol");
    issue["updated_at"] = json!("2023-07-05T16:00:00Z");

    let http = MockHttpClient::new()
        .on_get("/search/issues", github::search(vec![]))
        .on_get("/search/commits", github::search(vec![]))
        .on_get_with(
            "/search/issues",
            &q("commenter:alice type:issue updated:>=2023-06-01"),
            github::search(vec![issue]),
        )
        .on_get(
            &github::comments_url(9),
            json!([
                github::comment("alice", "2023-06-10T09:00:00Z", "Bisected to v2.1"),
                github::comment("bob", "2023-07-05T16:00:00Z", "Still happening"),
            ]),
        )
        .into_shared();

    let source = GitHubSource::from_section(&section(), http)?;
    let report = serde_json::to_value(source.process(&june()?))?;

    assert_record_ids(&report, "issues", &[json!(9)])?;
    assert_eq!(report["activity"]["issues"][0]["comments"].as_array().map(Vec::len), Some(2));
    Ok(())
}

#[test]
fn test_reviewed_facet_drops_own_pull_requests() -> Result<()> {
    let http = MockHttpClient::new()
        .on_get("/search/issues", github::search(vec![]))
        .on_get("/search/commits", github::search(vec![]))
        .on_get_with(
            "/search/issues",
            &q("reviewed-by:alice -author:alice type:pr updated:2023-06-01..2023-06-30"),
            github::search(vec![
                github::pull_request(503, 21, "Alice"),
                github::pull_request(504, 22, "carol"),
            ]),
        )
        .on_get(&github::comments_url(22), json!([]))
        .on_get(&github::pull_url(22), json!({"merged_at": null}))
        .into_shared();

    let source = GitHubSource::from_section(&section(), http.clone())?;
    let report = serde_json::to_value(source.process(&june()?))?;

    assert_record_ids(&report, "pull_requests", &[json!(22)])?;
    assert_eq!(http.requests_to("/repos/acme/widgets/pulls/21"), 0);
    Ok(())
}

#[test]
fn test_pull_requests_and_commits() -> Result<()> {
    let http = MockHttpClient::new()
        .on_get("/search/issues", github::search(vec![]))
        .on_get_with(
            "/search/issues",
            &q("author:alice type:pr created:2023-06-01..2023-06-30"),
            github::search(vec![github::pull_request(501, 15, "alice")]),
        )
        .on_get_with(
            "/search/issues",
            &q("reviewed-by:alice -author:alice type:pr updated:2023-06-01..2023-06-30"),
            github::search(vec![
                github::pull_request(501, 15, "alice"),
                github::pull_request(502, 16, "carol"),
            ]),
        )
        .on_get(&github::comments_url(15), json!([]))
        .on_get(&github::comments_url(16), json!([]))
        .on_get(&github::pull_url(15), json!({"merged_at": "2023-06-07T10:00:00Z"}))
        .fail(&github::pull_url(16), 502)
        .on_get(
            "/search/commits",
            github::search(vec![github::commit("abc123", "Fix crash")]),
        )
        .into_shared();

    let source = GitHubSource::from_section(&section(), http)?;
    let report = serde_json::to_value(source.process(&june()?))?;

    assert_record_ids(&report, "pull_requests", &[json!(15), json!(16)])?;
    let pulls = &report["activity"]["pull_requests"];
    assert_eq!(pulls[0]["merged_at"], "07-06-2023 10:00");
    // Detail lookup failed; search record carries no merge time
    assert_eq!(pulls[1]["merged_at"], Value::Null);
    assert_eq!(pulls[1]["created_by"], "carol");

    assert_record_ids(&report, "commits", &[json!("abc123")])?;
    let commit = &report["activity"]["commits"][0];
    assert_eq!(commit["repository"], "acme/widgets");
    assert_eq!(commit["date"], "03-06-2023 14:20");
    assert_dates_formatted(&report)?;
    Ok(())
}

#[test]
fn test_rate_limited_search_degrades_to_empty() -> Result<()> {
    let http = MockHttpClient::new()
        .fail_with(
            "/search/issues",
            &[],
            403,
            "{\"message\": \"API rate limit exceeded for user ID 1.\"}",
            None,
        )
        .on_get("/search/commits", github::search(vec![]))
        .into_shared();

    let adapter = create_adapter(&section(), http.clone())?;
    assert!(matches!(adapter, SourceAdapter::GitHub(_)));
    let report = serde_json::to_value(adapter.run("personal-github", &june()?))?;

    assert_record_count(&report, "issues", 0)?;
    assert_record_count(&report, "pull_requests", 0)?;
    // One failed first page per facet, no retries
    assert_eq!(http.requests_to("/search/issues"), 7);
    Ok(())
}

#[test]
fn test_requests_carry_token_and_accept_headers() -> Result<()> {
    let http = MockHttpClient::new()
        .on_get("/search/issues", github::search(vec![]))
        .on_get("/search/commits", github::search(vec![]))
        .into_shared();

    GitHubSource::from_section(&section(), http.clone())?.process(&june()?);

    let requests = http.requests();
    assert!(!requests.is_empty());
    for request in requests {
        assert_eq!(
            request.header_value("authorization"),
            Some("token ghp_literal_test_token")
        );
        assert_eq!(request.header_value("accept"), Some("application/vnd.github+json"));
        assert_eq!(request.query_value("per_page"), Some("100"));
    }
    Ok(())
}
