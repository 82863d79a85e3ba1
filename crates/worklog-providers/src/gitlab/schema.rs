use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub(crate) struct UserRef {
    pub username: Option<String>,
}

/// Entry of `/users?username=`
#[derive(Debug, Deserialize, Clone, Default)]
pub(crate) struct User {
    pub id: Option<u64>,
}

/// Issue or merge request from `/issues` and `/merge_requests`
#[derive(Debug, Deserialize, Clone, Default)]
pub(crate) struct WorkItem {
    pub iid: Option<u64>,
    pub project_id: Option<u64>,
    pub title: Option<String>,
    pub state: Option<String>,
    pub author: Option<UserRef>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub closed_at: Option<String>,
    pub merged_at: Option<String>,
    pub description: Option<String>,
    pub web_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub(crate) struct Note {
    pub author: Option<UserRef>,
    pub created_at: Option<String>,
    pub body: Option<String>,
    #[serde(default)]
    pub system: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub(crate) struct Project {
    pub path_with_namespace: Option<String>,
}
