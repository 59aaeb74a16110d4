//! Event payload to display lines.
//!
//! [`render`] is a pure function: every input it depends on, colour toggle
//! and shortened links included, is passed in. Rendering the same event
//! twice yields identical lines.

mod filter;
mod format;

pub use self::filter::{BranchFilter, short_ref};

use ircrelay_proto::{FormattedStringExt, MAX_LINE_LEN};

use crate::event::{
    CommitCommentEvent, Event, IssueCommentEvent, IssueEvent, PullRequestEvent, PushEvent,
    ReviewCommentEvent, WikiEditEvent,
};
use crate::links::ShortLinks;

/// Commit lines shown under a push summary.
pub const MAX_PUSH_COMMITS: usize = 3;

/// Per-target rendering settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub branch_filter: BranchFilter,
    pub no_colors: bool,
    /// Byte budget for a single line's text.
    pub max_line_len: usize,
}

impl RenderOptions {
    pub fn new(branch_filter: BranchFilter, no_colors: bool) -> Self {
        Self {
            branch_filter,
            no_colors,
            max_line_len: MAX_LINE_LEN - 2,
        }
    }

    /// Shrink the line budget so `PRIVMSG <target> :<line>\r\n` fits in one
    /// IRC line. `NOTICE` is shorter, so the same budget covers it.
    pub fn fit_to_target(mut self, target: &str) -> Self {
        let overhead = "PRIVMSG ".len() + target.len() + " :".len() + 2;
        self.max_line_len = MAX_LINE_LEN.saturating_sub(overhead);
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new(BranchFilter::default(), false)
    }
}

/// Render one event into the ordered lines to send.
///
/// Zero lines is a valid result: a filtered push or an uninteresting action.
pub fn render(event: &Event, options: &RenderOptions, links: &ShortLinks) -> Vec<String> {
    let lines = match event {
        Event::Push(push) => render_push(push, &options.branch_filter, links),
        Event::CommitComment(e) => vec![render_commit_comment(e, links)],
        Event::PullRequest(e) => render_pull_request(e, links).into_iter().collect(),
        Event::Issue(e) => render_issue(e, links).into_iter().collect(),
        Event::IssueComment(e) => vec![render_issue_comment(e, links)],
        Event::PullRequestReviewComment(e) => vec![render_review_comment(e, links)],
        Event::WikiEdit(e) => vec![render_wiki_edit(e, links)],
    };

    lines
        .into_iter()
        .map(|line| {
            let line = flatten(line);
            let line = if options.no_colors {
                line.strip_formatting().into_owned()
            } else {
                line
            };
            truncate(line, options.max_line_len)
        })
        .collect()
}

/// Payload text may carry line breaks or NUL; none of them may reach the
/// wire inside a message.
fn flatten(line: String) -> String {
    const BREAKS: [char; 3] = ['\r', '\n', '\0'];
    if line.contains(BREAKS) {
        line.replace(BREAKS, " ")
    } else {
        line
    }
}

/// Cut `line` to at most `max` bytes without splitting a character.
fn truncate(mut line: String, max: usize) -> String {
    if line.len() > max {
        let mut end = max;
        while !line.is_char_boundary(end) {
            end -= 1;
        }
        line.truncate(end);
    }
    line
}

/// Only opening and closing are worth a channel message.
fn is_announced_action(action: &str) -> bool {
    action.contains("open") || action.contains("close")
}

/// Suffix a link, or nothing when the payload had none.
fn with_link(text: String, url: &str, links: &ShortLinks) -> String {
    if url.is_empty() {
        text
    } else {
        format!("{text} {}", format::url(links.get(url)))
    }
}

fn render_push(push: &PushEvent, filter: &BranchFilter, links: &ShortLinks) -> Vec<String> {
    if !filter.allows(&push.git_ref) {
        return Vec::new();
    }

    let branch = short_ref(&push.git_ref);
    let distinct: Vec<_> = push.commits.iter().filter(|c| c.distinct).collect();
    let summary = format!(
        "[{}] {} {}",
        format::repo(&push.repo.name),
        format::name(&push.pusher),
        push_summary(push, branch, distinct.len()),
    );
    let summary = if push.compare_url.is_empty() {
        summary
    } else {
        format!("{summary}: {}", format::url(links.get(&push.compare_url)))
    };

    let mut lines = Vec::with_capacity(1 + distinct.len().min(MAX_PUSH_COMMITS));
    lines.push(summary);
    lines.extend(distinct.iter().take(MAX_PUSH_COMMITS).map(|commit| {
        format!(
            "{}/{} {} {}: {}",
            format::repo(&push.repo.name),
            format::branch(branch),
            format::hash(&commit.id),
            format::name(&commit.author),
            format::first_line(&commit.message),
        )
    }));
    lines
}

fn push_summary(push: &PushEvent, branch: &str, distinct: usize) -> String {
    let base = push.base_ref.as_deref().map(short_ref);

    if push.created {
        if push.git_ref.starts_with("refs/tags/") {
            let at = match base {
                Some(base) => format::branch(base),
                None => format::hash(&push.after),
            };
            return format!("tagged {} at {at}", format::tag(branch));
        }
        let detail = match base {
            Some(base) => format!(" from {}", format::branch(base)),
            None if distinct == 0 => format!(" at {}", format::hash(&push.after)),
            None => format!(
                " (+{} new {})",
                format::number(distinct),
                format::plural(distinct, "commit")
            ),
        };
        return format!("created {}{detail}", format::branch(branch));
    }

    if push.deleted {
        return format!(
            "{} {} at {}",
            format::alert("deleted"),
            format::branch(branch),
            format::hash(&push.before)
        );
    }

    if push.forced {
        return format!(
            "{} {} from {} to {}",
            format::alert("force-pushed"),
            format::branch(branch),
            format::hash(&push.before),
            format::hash(&push.after)
        );
    }

    if !push.commits.is_empty() && distinct == 0 {
        return match base {
            Some(base) => format!(
                "merged {} into {}",
                format::branch(base),
                format::branch(branch)
            ),
            None => format!(
                "fast-forwarded {} from {} to {}",
                format::branch(branch),
                format::hash(&push.before),
                format::hash(&push.after)
            ),
        };
    }

    format!(
        "pushed {} new {} to {}",
        format::number(distinct),
        format::plural(distinct, "commit"),
        format::branch(branch)
    )
}

fn render_commit_comment(e: &CommitCommentEvent, links: &ShortLinks) -> String {
    let text = format!(
        "[{}] {} comment on commit {}: {}",
        format::repo(&e.repo.name),
        format::name(&e.actor),
        format::hash(&e.commit_id),
        format::first_line(&e.body),
    );
    with_link(text, &e.url, links)
}

fn render_pull_request(e: &PullRequestEvent, links: &ShortLinks) -> Option<String> {
    if !is_announced_action(&e.action) {
        return None;
    }
    let base = e.base_label.rsplit(':').next().unwrap_or(&e.base_label);
    let head = e.head_label.rsplit(':').next().unwrap_or(&e.head_label);
    let text = format!(
        "[{}] {} {} pull request #{}: {} ({}...{})",
        format::repo(&e.repo.name),
        format::name(&e.actor),
        e.action,
        e.number,
        e.title,
        format::branch(base),
        format::branch(head),
    );
    Some(with_link(text, &e.url, links))
}

fn render_issue(e: &IssueEvent, links: &ShortLinks) -> Option<String> {
    if !is_announced_action(&e.action) {
        return None;
    }
    let text = format!(
        "[{}] {} {} issue #{}: {}",
        format::repo(&e.repo.name),
        format::name(&e.actor),
        e.action,
        e.number,
        e.title,
    );
    Some(with_link(text, &e.url, links))
}

fn render_issue_comment(e: &IssueCommentEvent, links: &ShortLinks) -> String {
    let text = format!(
        "[{}] {} comment on issue #{}: {}",
        format::repo(&e.repo.name),
        format::name(&e.actor),
        e.number,
        format::first_line(&e.body),
    );
    with_link(text, &e.url, links)
}

fn render_review_comment(e: &ReviewCommentEvent, links: &ShortLinks) -> String {
    let text = format!(
        "[{}] {} comment on pull request #{} {}: {}",
        format::repo(&e.repo.name),
        format::name(&e.actor),
        e.pull_number,
        format::hash(&e.commit_id),
        format::first_line(&e.body),
    );
    with_link(text, &e.url, links)
}

fn render_wiki_edit(e: &WikiEditEvent, links: &ShortLinks) -> String {
    let text = match e.pages.as_slice() {
        [page] => format!(
            "[{}] {} {} wiki page {}",
            format::repo(&e.repo.name),
            e.actor,
            page.action,
            page.name
        ),
        pages => {
            let mut counts: Vec<(&str, usize)> = Vec::new();
            for page in pages {
                match counts.iter_mut().find(|(action, _)| *action == page.action) {
                    Some((_, n)) => *n += 1,
                    None => counts.push((page.action.as_str(), 1)),
                }
            }
            let summary = counts
                .iter()
                .map(|(action, n)| format!("{action} {n}"))
                .collect::<Vec<_>>()
                .join(" and ");
            format!(
                "[{}] {} {summary} wiki {}",
                format::repo(&e.repo.name),
                e.actor,
                format::plural(pages.len(), "page")
            )
        }
    };
    with_link(text, &e.url(), links)
}
