//! Repository events the relay can announce.
//!
//! An [`Event`] is built once from an inbound payload and only read after
//! that. Lowering from JSON is the one place payload problems surface, as
//! [`RenderError`]s; the renderer itself cannot fail.

mod payload;

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::RenderError;

/// The payload kinds accepted on input, named as webhook event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Push,
    CommitComment,
    PullRequest,
    Issues,
    IssueComment,
    PullRequestReviewComment,
    Gollum,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::CommitComment => "commit_comment",
            Self::PullRequest => "pull_request",
            Self::Issues => "issues",
            Self::IssueComment => "issue_comment",
            Self::PullRequestReviewComment => "pull_request_review_comment",
            Self::Gollum => "gollum",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "push" => Self::Push,
            "commit_comment" => Self::CommitComment,
            "pull_request" => Self::PullRequest,
            "issues" => Self::Issues,
            "issue_comment" => Self::IssueComment,
            "pull_request_review_comment" => Self::PullRequestReviewComment,
            "gollum" => Self::Gollum,
            other => return Err(RenderError::UnsupportedEvent(other.to_string())),
        })
    }
}

/// Owner and name of the repository an event happened in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
    /// Web URL of the repository, empty when the payload had none.
    pub url: String,
}

impl RepoRef {
    /// Pull the repository out of any payload shape, without validating the
    /// rest of it. Used for the realname even when rendering fails.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let repo = payload.get("repository")?;
        let owner = repo.get("owner")?;
        let owner = owner
            .get("login")
            .or_else(|| owner.get("name"))
            .and_then(Value::as_str)?;
        let name = repo.get("name").and_then(Value::as_str)?;
        let url = repo
            .get("html_url")
            .or_else(|| repo.get("url"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        Some(Self {
            owner: owner.to_string(),
            name: name.to_string(),
            url: url.to_string(),
        })
    }

    fn lower(kind: EventKind, repo: payload::Repository) -> Result<Self, RenderError> {
        let owner = repo
            .owner
            .login
            .or(repo.owner.name)
            .ok_or(RenderError::MissingField {
                kind: kind.as_str(),
                field: "repository.owner",
            })?;
        Ok(Self {
            owner,
            name: repo.name,
            url: repo.html_url.or(repo.url).unwrap_or_default(),
        })
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub id: String,
    pub message: String,
    pub author: String,
    pub distinct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushEvent {
    pub repo: RepoRef,
    pub pusher: String,
    /// Full ref, e.g. `refs/heads/master`.
    pub git_ref: String,
    pub before: String,
    pub after: String,
    pub created: bool,
    pub deleted: bool,
    pub forced: bool,
    pub base_ref: Option<String>,
    pub compare_url: String,
    pub commits: Vec<Commit>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitCommentEvent {
    pub repo: RepoRef,
    pub actor: String,
    pub commit_id: String,
    pub body: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestEvent {
    pub repo: RepoRef,
    pub actor: String,
    pub action: String,
    pub number: u64,
    pub title: String,
    /// `owner:branch` labels as sent by the API.
    pub base_label: String,
    pub head_label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueEvent {
    pub repo: RepoRef,
    pub actor: String,
    pub action: String,
    pub number: u64,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueCommentEvent {
    pub repo: RepoRef,
    pub actor: String,
    pub number: u64,
    pub body: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewCommentEvent {
    pub repo: RepoRef,
    pub actor: String,
    pub pull_number: u64,
    pub commit_id: String,
    pub body: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiPage {
    pub name: String,
    pub action: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiEditEvent {
    pub repo: RepoRef,
    pub actor: String,
    pub pages: Vec<WikiPage>,
}

impl WikiEditEvent {
    /// Link for the edit: the page itself, or the wiki when several changed.
    pub fn url(&self) -> String {
        match self.pages.as_slice() {
            [page] => page.url.clone(),
            _ if self.repo.url.is_empty() => String::new(),
            _ => format!("{}/wiki", self.repo.url.trim_end_matches('/')),
        }
    }
}

/// One repository event, closed over every kind the relay announces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Push(PushEvent),
    CommitComment(CommitCommentEvent),
    PullRequest(PullRequestEvent),
    Issue(IssueEvent),
    IssueComment(IssueCommentEvent),
    PullRequestReviewComment(ReviewCommentEvent),
    WikiEdit(WikiEditEvent),
}

fn decode<T: DeserializeOwned>(kind: EventKind, payload: &Value) -> Result<T, RenderError> {
    T::deserialize(payload).map_err(|source| RenderError::InvalidPayload {
        kind: kind.as_str(),
        source,
    })
}

impl Event {
    /// Lower a raw webhook payload of the given kind.
    pub fn parse(kind: EventKind, payload: &Value) -> Result<Self, RenderError> {
        Ok(match kind {
            EventKind::Push => {
                let p: payload::Push = decode(kind, payload)?;
                let pusher = p
                    .pusher
                    .map(|p| p.name)
                    .or(p.sender.map(|s| s.login))
                    .ok_or(RenderError::MissingField {
                        kind: kind.as_str(),
                        field: "pusher",
                    })?;
                Event::Push(PushEvent {
                    repo: RepoRef::lower(kind, p.repository)?,
                    pusher,
                    git_ref: p.git_ref,
                    before: p.before,
                    after: p.after,
                    created: p.created,
                    deleted: p.deleted,
                    forced: p.forced,
                    base_ref: p.base_ref,
                    compare_url: p.compare.unwrap_or_default(),
                    commits: p
                        .commits
                        .into_iter()
                        .map(|c| Commit {
                            id: c.id,
                            message: c.message,
                            author: c.author.name,
                            distinct: c.distinct,
                        })
                        .collect(),
                })
            }
            EventKind::CommitComment => {
                let p: payload::CommitComment = decode(kind, payload)?;
                Event::CommitComment(CommitCommentEvent {
                    repo: RepoRef::lower(kind, p.repository)?,
                    actor: p.sender.login,
                    commit_id: p.comment.commit_id.ok_or(RenderError::MissingField {
                        kind: kind.as_str(),
                        field: "comment.commit_id",
                    })?,
                    body: p.comment.body,
                    url: p.comment.html_url,
                })
            }
            EventKind::PullRequest => {
                let p: payload::PullRequest = decode(kind, payload)?;
                Event::PullRequest(PullRequestEvent {
                    repo: RepoRef::lower(kind, p.repository)?,
                    actor: p.sender.login,
                    action: p.action,
                    number: p.pull_request.number,
                    title: p.pull_request.title,
                    base_label: p.pull_request.base.label,
                    head_label: p.pull_request.head.label,
                    url: p.pull_request.html_url,
                })
            }
            EventKind::Issues => {
                let p: payload::Issues = decode(kind, payload)?;
                Event::Issue(IssueEvent {
                    repo: RepoRef::lower(kind, p.repository)?,
                    actor: p.sender.login,
                    action: p.action,
                    number: p.issue.number,
                    title: p.issue.title,
                    url: p.issue.html_url,
                })
            }
            EventKind::IssueComment => {
                let p: payload::IssueComment = decode(kind, payload)?;
                if p.action.as_deref().is_some_and(|a| a != "created") {
                    tracing::debug!(action = ?p.action, "issue comment action is not a new comment");
                }
                Event::IssueComment(IssueCommentEvent {
                    repo: RepoRef::lower(kind, p.repository)?,
                    actor: p.sender.login,
                    number: p.issue.number,
                    body: p.comment.body,
                    url: p.comment.html_url,
                })
            }
            EventKind::PullRequestReviewComment => {
                let p: payload::ReviewComment = decode(kind, payload)?;
                let missing = |field| RenderError::MissingField {
                    kind: kind.as_str(),
                    field,
                };
                // Older payloads only link the pull request.
                let pull_number = match p.pull_request {
                    Some(pull) => pull.number,
                    None => p
                        .comment
                        .pull_request_url
                        .as_deref()
                        .and_then(|url| url.rsplit('/').next())
                        .and_then(|n| n.parse().ok())
                        .ok_or(missing("pull_request.number"))?,
                };
                Event::PullRequestReviewComment(ReviewCommentEvent {
                    repo: RepoRef::lower(kind, p.repository)?,
                    actor: p.sender.login,
                    pull_number,
                    commit_id: p.comment.commit_id.ok_or(missing("comment.commit_id"))?,
                    body: p.comment.body,
                    url: p.comment.html_url,
                })
            }
            EventKind::Gollum => {
                let p: payload::Gollum = decode(kind, payload)?;
                if p.pages.is_empty() {
                    return Err(RenderError::MissingField {
                        kind: kind.as_str(),
                        field: "pages",
                    });
                }
                Event::WikiEdit(WikiEditEvent {
                    repo: RepoRef::lower(kind, p.repository)?,
                    actor: p.sender.login,
                    pages: p
                        .pages
                        .into_iter()
                        .map(|page| WikiPage {
                            name: page.page_name,
                            action: page.action,
                            url: page.html_url,
                        })
                        .collect(),
                })
            }
        })
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Event::Push(_) => EventKind::Push,
            Event::CommitComment(_) => EventKind::CommitComment,
            Event::PullRequest(_) => EventKind::PullRequest,
            Event::Issue(_) => EventKind::Issues,
            Event::IssueComment(_) => EventKind::IssueComment,
            Event::PullRequestReviewComment(_) => EventKind::PullRequestReviewComment,
            Event::WikiEdit(_) => EventKind::Gollum,
        }
    }

    pub fn repo(&self) -> &RepoRef {
        match self {
            Event::Push(e) => &e.repo,
            Event::CommitComment(e) => &e.repo,
            Event::PullRequest(e) => &e.repo,
            Event::Issue(e) => &e.repo,
            Event::IssueComment(e) => &e.repo,
            Event::PullRequestReviewComment(e) => &e.repo,
            Event::WikiEdit(e) => &e.repo,
        }
    }

    /// Every URL the rendered lines may print, in render order.
    pub fn links(&self) -> Vec<String> {
        let url = match self {
            Event::Push(e) => e.compare_url.clone(),
            Event::CommitComment(e) => e.url.clone(),
            Event::PullRequest(e) => e.url.clone(),
            Event::Issue(e) => e.url.clone(),
            Event::IssueComment(e) => e.url.clone(),
            Event::PullRequestReviewComment(e) => e.url.clone(),
            Event::WikiEdit(e) => e.url(),
        };
        if url.is_empty() { Vec::new() } else { vec![url] }
    }
}
