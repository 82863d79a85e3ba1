use serde_json::Value;

/// Items requested per page by every adapter
pub const PAGE_SIZE: usize = 100;

/// How the next page is addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// 1-based page number (`page`)
    PageNumber,
    /// 0-based item offset (`startAt`)
    Offset,
}

/// Where a page's items live in the response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Items {
    /// The body is the item array
    Root,
    /// The body is an object and the items sit under this field
    Field(&'static str),
}

/// Paging convention of one endpoint family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageStyle {
    pub cursor: Cursor,
    pub cursor_param: &'static str,
    pub size_param: &'static str,
    pub items: Items,
    /// Envelope field holding the total item count, when the service reports one
    pub total_field: Option<&'static str>,
}

impl PageStyle {
    /// GitLab list endpoints and GitHub comment lists
    pub const ARRAY: PageStyle = PageStyle {
        cursor: Cursor::PageNumber,
        cursor_param: "page",
        size_param: "per_page",
        items: Items::Root,
        total_field: None,
    };

    /// GitHub `/search/*` endpoints
    pub const GITHUB_SEARCH: PageStyle = PageStyle {
        cursor: Cursor::PageNumber,
        cursor_param: "page",
        size_param: "per_page",
        items: Items::Field("items"),
        total_field: Some("total_count"),
    };

    /// Jira `/rest/api/2/search`
    pub const JIRA_SEARCH: PageStyle = PageStyle {
        cursor: Cursor::Offset,
        cursor_param: "startAt",
        size_param: "maxResults",
        items: Items::Field("issues"),
        total_field: Some("total"),
    };

    /// Jira `/rest/api/2/issue/{key}/comment`
    pub const JIRA_COMMENTS: PageStyle = PageStyle {
        cursor: Cursor::Offset,
        cursor_param: "startAt",
        size_param: "maxResults",
        items: Items::Field("comments"),
        total_field: Some("total"),
    };

    /// Value of the cursor parameter for the `index`-th page (0-based)
    pub fn cursor_value(&self, index: usize, page_size: usize) -> usize {
        match self.cursor {
            Cursor::PageNumber => index + 1,
            Cursor::Offset => index * page_size,
        }
    }

    /// Split a response body into a page
    pub fn page(&self, body: Value) -> Page {
        let total = self
            .total_field
            .and_then(|field| body.get(field))
            .and_then(Value::as_u64)
            .map(|total| total as usize);

        let items = match (self.items, body) {
            (Items::Root, Value::Array(items)) => items,
            (Items::Field(field), Value::Object(mut map)) => match map.remove(field) {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };

        Page { items, total }
    }
}

/// One page of results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub items: Vec<Value>,
    pub total: Option<usize>,
}

/// Collect every page produced by `fetch`.
///
/// `fetch` receives the 0-based page index and returns `None` on a request
/// failure. Stops on an empty page, a short page, a reached total, or a
/// failure; whatever was accumulated is returned.
pub fn paginate<F>(page_size: usize, mut fetch: F) -> Vec<Value>
where
    F: FnMut(usize) -> Option<Page>,
{
    let mut all_items = Vec::new();
    let mut index = 0;

    loop {
        let Some(page) = fetch(index) else {
            if index > 0 {
                tracing::warn!(
                    pages = index,
                    items = all_items.len(),
                    "Pagination stopped early, keeping partial results"
                );
            }
            break;
        };

        if page.items.is_empty() {
            break;
        }

        let count = page.items.len();
        all_items.extend(page.items);

        if count < page_size {
            break;
        }

        if let Some(total) = page.total
            && all_items.len() >= total
        {
            break;
        }

        index += 1;
    }

    all_items
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Serve `total` numbered items in pages of `page_size`, counting requests
    fn run(total: usize, page_size: usize, report_total: bool) -> (Vec<Value>, usize) {
        let mut requests = 0;
        let items = paginate(page_size, |index| {
            requests += 1;
            let start = index * page_size;
            let end = (start + page_size).min(total);
            let items = (start..end.max(start)).map(|n| json!(n)).collect();
            Some(Page {
                items,
                total: report_total.then_some(total),
            })
        });
        (items, requests)
    }

    #[test]
    fn test_request_count_for_partial_last_page() {
        for (total, page_size) in [(1, 100), (99, 100), (250, 100), (7, 3), (10, 4)] {
            let (items, requests) = run(total, page_size, false);
            assert_eq!(items.len(), total);
            assert_eq!(requests, total.div_ceil(page_size), "N={total} P={page_size}");
        }
    }

    #[test]
    fn test_exact_multiple_probes_one_empty_page_without_total() {
        let (items, requests) = run(200, 100, false);
        assert_eq!(items.len(), 200);
        assert_eq!(requests, 3);
    }

    #[test]
    fn test_exact_multiple_stops_on_reported_total() {
        let (items, requests) = run(200, 100, true);
        assert_eq!(items.len(), 200);
        assert_eq!(requests, 2);
    }

    #[test]
    fn test_empty_result_makes_one_request() {
        let (items, requests) = run(0, 100, false);
        assert!(items.is_empty());
        assert_eq!(requests, 1);
    }

    #[test]
    fn test_failure_keeps_partial_results() {
        let items = paginate(2, |index| match index {
            0 => Some(Page {
                items: vec![json!(1), json!(2)],
                total: None,
            }),
            _ => None,
        });
        assert_eq!(items, vec![json!(1), json!(2)]);
    }

    #[test]
    fn test_page_extraction() {
        let page = PageStyle::GITHUB_SEARCH.page(json!({"total_count": 3, "items": [1, 2]}));
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, Some(3));

        let page = PageStyle::ARRAY.page(json!([1, 2, 3]));
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total, None);

        let page = PageStyle::JIRA_SEARCH.page(json!({"unexpected": true}));
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_cursor_values() {
        assert_eq!(PageStyle::ARRAY.cursor_value(0, 100), 1);
        assert_eq!(PageStyle::ARRAY.cursor_value(2, 100), 3);
        assert_eq!(PageStyle::JIRA_SEARCH.cursor_value(0, 100), 0);
        assert_eq!(PageStyle::JIRA_SEARCH.cursor_value(2, 100), 200);
    }
}
