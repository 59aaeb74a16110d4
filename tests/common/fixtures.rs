//! Webhook payloads for the `mojombo/grit` test repository.

#![allow(dead_code)]

use serde_json::{Value, json};

fn repository(name: &str) -> Value {
    json!({
        "name": name,
        "url": format!("https://github.com/mojombo/{name}"),
        "owner": { "name": "mojombo", "email": "tom@mojombo.com" },
        "private": false
    })
}

fn api_repository() -> Value {
    json!({
        "name": "grit",
        "html_url": "https://github.com/mojombo/grit",
        "owner": { "login": "mojombo" }
    })
}

fn sender() -> Value {
    json!({ "login": "defunkt" })
}

/// A three commit push to master.
pub fn push() -> Value {
    push_to("grit")
}

/// [`push`], but into another repository of the same owner.
pub fn push_to(repo: &str) -> Value {
    json!({
        "ref": "refs/heads/master",
        "before": "4c8124ffcf4039d292442eeccabdeca5af5c5017",
        "after": "a47fd41f3aa4610ea527dcc1669dfdb9c15c5425",
        "created": false,
        "deleted": false,
        "forced": false,
        "compare": "https://github.com/mojombo/grit/compare/4c8124f...a47fd41",
        "pusher": { "name": "rtomayko" },
        "commits": [
            {
                "id": "06f63b43050935962f84fe54473a7c5de7977325",
                "message": "stub git call for Grit#heads test f:15 Case#1",
                "author": { "name": "Tom Preston-Werner", "email": "tom@mojombo.com" },
                "distinct": true
            },
            {
                "id": "5057e76a11abd02e83b7d3d3171c4b68d9c88480",
                "message": "clean up heads test f:2hrs",
                "author": { "name": "Tom Preston-Werner", "email": "tom@mojombo.com" },
                "distinct": true
            },
            {
                "id": "a47fd41f3aa4610ea527dcc1669dfdb9c15c5425",
                "message": "add more comments throughout\n\nand fix a typo",
                "author": { "name": "Tom Preston-Werner", "email": "tom@mojombo.com" },
                "distinct": true
            }
        ],
        "repository": repository(repo)
    })
}

pub fn commit_comment() -> Value {
    json!({
        "comment": {
            "body": "this is a really good commit",
            "commit_id": "441e5686a726b79bcdace639e2591a60718c9719",
            "html_url": "https://github.com/mojombo/grit/commit/441e568#commitcomment-3"
        },
        "repository": api_repository(),
        "sender": sender()
    })
}

pub fn pull_request() -> Value {
    json!({
        "action": "opened",
        "number": 5,
        "pull_request": {
            "number": 5,
            "title": "booya",
            "html_url": "https://github.com/mojombo/grit/pull/5",
            "base": { "label": "mojombo:master", "ref": "master" },
            "head": { "label": "defunkt:feature", "ref": "feature" }
        },
        "repository": api_repository(),
        "sender": sender()
    })
}

pub fn issues() -> Value {
    json!({
        "action": "opened",
        "issue": {
            "number": 5,
            "title": "booya",
            "html_url": "https://github.com/mojombo/grit/issues/5"
        },
        "repository": api_repository(),
        "sender": sender()
    })
}

pub fn issue_comment() -> Value {
    json!({
        "action": "created",
        "issue": {
            "number": 5,
            "title": "booya",
            "html_url": "https://github.com/mojombo/grit/issues/5"
        },
        "comment": {
            "body": "this\r\nis\r\nsparta",
            "html_url": "https://github.com/mojombo/grit/issues/5#issuecomment-3"
        },
        "repository": api_repository(),
        "sender": sender()
    })
}

pub fn pull_request_review_comment() -> Value {
    json!({
        "comment": {
            "body": "very\r\ncool",
            "commit_id": "03af7b9d9f6e6e4a6d35fa3ab2d3ac6ac44f8b64",
            "html_url": "https://github.com/mojombo/grit/pull/5#discussion_r18785396",
            "pull_request_url": "https://api.github.com/repos/mojombo/grit/pulls/5"
        },
        "pull_request": { "number": 5, "title": "booya" },
        "repository": api_repository(),
        "sender": sender()
    })
}

pub fn gollum() -> Value {
    json!({
        "pages": [
            {
                "page_name": "Foo",
                "title": "Foo",
                "action": "created",
                "html_url": "https://github.com/mojombo/grit/wiki/Foo"
            }
        ],
        "repository": api_repository(),
        "sender": sender()
    })
}
