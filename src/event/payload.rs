//! Serde shapes of the inbound webhook payloads.
//!
//! Only the fields the relay prints are declared; everything else in the
//! payload is ignored. Missing optional fields are tolerated here and
//! checked when the payload is lowered into an [`Event`](super::Event).

use serde::Deserialize;

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub(super) struct Repository {
    pub name: String,
    pub owner: Owner,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Push payloads carry `owner.name`, API events carry `owner.login`.
#[derive(Debug, Deserialize)]
pub(super) struct Owner {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Sender {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct Pusher {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct Author {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct Commit {
    pub id: String,
    #[serde(default)]
    pub message: String,
    pub author: Author,
    #[serde(default = "default_true")]
    pub distinct: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct Push {
    #[serde(rename = "ref")]
    pub git_ref: String,
    #[serde(default)]
    pub before: String,
    #[serde(default)]
    pub after: String,
    #[serde(default)]
    pub created: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub forced: bool,
    #[serde(default)]
    pub base_ref: Option<String>,
    #[serde(default)]
    pub compare: Option<String>,
    #[serde(default)]
    pub pusher: Option<Pusher>,
    #[serde(default)]
    pub sender: Option<Sender>,
    #[serde(default)]
    pub commits: Vec<Commit>,
    pub repository: Repository,
}

#[derive(Debug, Deserialize)]
pub(super) struct Comment {
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub commit_id: Option<String>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub pull_request_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CommitComment {
    pub comment: Comment,
    pub repository: Repository,
    pub sender: Sender,
}

#[derive(Debug, Deserialize)]
pub(super) struct BranchLabel {
    pub label: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct PullRequestBody {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub html_url: String,
    pub base: BranchLabel,
    pub head: BranchLabel,
}

#[derive(Debug, Deserialize)]
pub(super) struct PullRequest {
    pub action: String,
    pub pull_request: PullRequestBody,
    pub repository: Repository,
    pub sender: Sender,
}

#[derive(Debug, Deserialize)]
pub(super) struct IssueBody {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub html_url: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct Issues {
    pub action: String,
    pub issue: IssueBody,
    pub repository: Repository,
    pub sender: Sender,
}

#[derive(Debug, Deserialize)]
pub(super) struct IssueComment {
    #[serde(default)]
    pub action: Option<String>,
    pub issue: IssueBody,
    pub comment: Comment,
    pub repository: Repository,
    pub sender: Sender,
}

#[derive(Debug, Deserialize)]
pub(super) struct PullNumber {
    pub number: u64,
}

#[derive(Debug, Deserialize)]
pub(super) struct ReviewComment {
    pub comment: Comment,
    #[serde(default)]
    pub pull_request: Option<PullNumber>,
    pub repository: Repository,
    pub sender: Sender,
}

#[derive(Debug, Deserialize)]
pub(super) struct Page {
    pub page_name: String,
    pub action: String,
    #[serde(default)]
    pub html_url: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct Gollum {
    pub pages: Vec<Page>,
    pub repository: Repository,
    pub sender: Sender,
}
