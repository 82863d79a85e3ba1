use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub(crate) struct JiraUser {
    pub name: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

impl JiraUser {
    pub fn login(self) -> Option<String> {
        self.name.or(self.display_name)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub(crate) struct Named {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub(crate) struct ProjectRef {
    pub key: Option<String>,
}

/// Entry of `/rest/api/2/search` `issues`
#[derive(Debug, Deserialize, Clone, Default)]
pub(crate) struct SearchIssue {
    pub key: Option<String>,
    #[serde(default)]
    pub fields: IssueFields,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub(crate) struct IssueFields {
    pub summary: Option<String>,
    pub status: Option<Named>,
    pub reporter: Option<JiraUser>,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub resolutiondate: Option<String>,
    pub project: Option<ProjectRef>,
    pub description: Option<String>,
}

/// Entry of `/rest/api/2/issue/{key}/comment` `comments`
#[derive(Debug, Deserialize, Clone, Default)]
pub(crate) struct JiraComment {
    pub author: Option<JiraUser>,
    pub created: Option<String>,
    pub body: Option<String>,
}
