use std::collections::HashSet;

use newsroom_common::db::models::Article;

/// Concatenate per-category results, keeping the first occurrence of each
/// article id.
pub fn merge_unique_by_id<I>(batches: I) -> Vec<Article>
where
    I: IntoIterator<Item = Vec<Article>>,
{
    let mut seen = HashSet::new();
    batches
        .into_iter()
        .flatten()
        .filter(|article| seen.insert(article.id))
        .collect()
}
