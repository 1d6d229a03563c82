use crate::entities::Comment;

/// Derives the nesting depth of every comment in a preorder slice
/// (sorted by `left` ascending) via interval containment.
///
/// A comment is a descendant of the nearest preceding comment whose
/// interval still encloses it, so a stack of open ancestor `right`
/// bounds is sufficient for a single pass.
pub fn nesting_depths(preorder: &[Comment]) -> Vec<usize> {
    let mut open: Vec<i64> = Vec::new();
    preorder
        .iter()
        .map(|comment| {
            while open.last().is_some_and(|&right| comment.right > right) {
                open.pop();
            }
            let depth = open.len();
            open.push(comment.right);
            depth
        })
        .collect()
}
