//! Comment model — threaded discussion under projects.
//!
//! Comments soft-delete: a deleted comment keeps its row (and its replies)
//! but is excluded from listings. Replies nest one conceptual level deep via
//! `parent_comment_id`; the API returns roots with their replies attached.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

use super::user::UserSummary;

/// A comment row.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub project_id: i64,
    pub user_id: Uuid,
    pub content: String,
    pub parent_comment_id: Option<i64>,
    /// User called out with an @-mention in a reply
    pub mentioned_user_id: Option<Uuid>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create comment request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    pub project_id: i64,

    #[validate(length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"))]
    pub content: String,

    pub parent_comment_id: Option<i64>,
    pub mentioned_user_id: Option<Uuid>,
}

/// Comment representation for API responses, with author and nested replies.
#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: i64,
    pub project_id: i64,
    pub content: String,
    pub parent_comment_id: Option<i64>,
    pub mentioned_user_id: Option<Uuid>,
    pub author: Option<UserSummary>,
    pub created_at: DateTime<Utc>,
    pub replies: Vec<CommentResponse>,
}

/// Assemble flat comment rows into a reply tree.
///
/// Order-insensitive: parentage is resolved against the complete row set
/// before anything is attached, so the repository's newest-first ordering
/// threads the same as any other. Roots keep their input order; replies
/// attach to their root's subtree in input order. A reply whose parent is
/// missing (parent was hard-removed or filtered out) is promoted to a root
/// rather than dropped.
pub fn thread_comments(
    rows: Vec<Comment>,
    authors: &HashMap<Uuid, UserSummary>,
) -> Vec<CommentResponse> {
    let parents: HashMap<i64, Option<i64>> = rows
        .iter()
        .map(|c| (c.id, c.parent_comment_id))
        .collect();

    let mut roots: Vec<CommentResponse> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();
    let mut pending: Vec<(i64, CommentResponse)> = Vec::new();

    for comment in rows {
        let root_id = root_of(comment.id, &parents);
        if root_id == comment.id {
            index.insert(comment.id, roots.len());
            roots.push(to_response(comment, authors));
        } else {
            pending.push((root_id, to_response(comment, authors)));
        }
    }

    // Every resolved root id belongs to a row classified as a root above,
    // so each reply finds its subtree regardless of row order.
    for (root_id, reply) in pending {
        if let Some(&i) = index.get(&root_id) {
            roots[i].replies.push(reply);
        }
    }

    roots
}

/// Walk the parent chain to the topmost comment present in the row set.
fn root_of(id: i64, parents: &HashMap<i64, Option<i64>>) -> i64 {
    let mut current = id;
    while let Some(Some(parent)) = parents.get(&current) {
        if !parents.contains_key(parent) {
            break;
        }
        current = *parent;
    }
    current
}

fn to_response(c: Comment, authors: &HashMap<Uuid, UserSummary>) -> CommentResponse {
    CommentResponse {
        id: c.id,
        project_id: c.project_id,
        content: c.content,
        parent_comment_id: c.parent_comment_id,
        mentioned_user_id: c.mentioned_user_id,
        author: authors.get(&c.user_id).cloned(),
        created_at: c.created_at,
        replies: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(id: i64, parent: Option<i64>) -> Comment {
        Comment {
            id,
            project_id: 1,
            user_id: Uuid::nil(),
            content: format!("comment {id}"),
            parent_comment_id: parent,
            mentioned_user_id: None,
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn replies_nest_under_their_root() {
        let rows = vec![comment(3, None), comment(2, None), comment(4, Some(2))];
        let threaded = thread_comments(rows, &HashMap::new());

        assert_eq!(threaded.len(), 2);
        assert_eq!(threaded[0].id, 3);
        assert_eq!(threaded[1].id, 2);
        assert_eq!(threaded[1].replies.len(), 1);
        assert_eq!(threaded[1].replies[0].id, 4);
    }

    #[test]
    fn reply_to_reply_lands_in_root_subtree() {
        let rows = vec![comment(1, None), comment(2, Some(1)), comment(3, Some(2))];
        let threaded = thread_comments(rows, &HashMap::new());

        assert_eq!(threaded.len(), 1);
        let ids: Vec<i64> = threaded[0].replies.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn reply_chain_threads_from_newest_first_rows() {
        // Repository order: newest first, so the deepest reply arrives
        // before its parent reply and the root arrives last.
        let rows = vec![comment(3, Some(2)), comment(2, Some(1)), comment(1, None)];
        let threaded = thread_comments(rows, &HashMap::new());

        assert_eq!(threaded.len(), 1);
        assert_eq!(threaded[0].id, 1);
        let ids: Vec<i64> = threaded[0].replies.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn orphaned_reply_is_promoted_to_root() {
        // Parent 9 is not in the row set (e.g. filtered out)
        let rows = vec![comment(1, None), comment(2, Some(9))];
        let threaded = thread_comments(rows, &HashMap::new());

        assert_eq!(threaded.len(), 2);
        assert_eq!(threaded[1].id, 2);
    }

    #[test]
    fn authors_attach_by_user_id() {
        let uid = Uuid::now_v7();
        let mut rows = vec![comment(1, None)];
        rows[0].user_id = uid;

        let mut authors = HashMap::new();
        authors.insert(
            uid,
            UserSummary {
                id: uid,
                nickname: "mina".into(),
                profile_image_url: None,
            },
        );

        let threaded = thread_comments(rows, &authors);
        assert_eq!(threaded[0].author.as_ref().unwrap().nickname, "mina");
    }
}
