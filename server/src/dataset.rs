use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::posts::Post;

const WORDS: [&str; 12] = ["sunt", "qui", "est", "dolorem", "magnam", "nesciunt", "eum", "et", "facere", "optio", "ut", "aut"];

/// 100 posts, ten per user, with deterministic text.
pub fn builtin() -> Vec<Post> {
    (1..=100)
        .map(|id: i64| {
            let word = |n: i64| WORDS[(n.rem_euclid(WORDS.len() as i64)) as usize];
            Post {
                user_id: (id - 1) / 10 + 1,
                id,
                title: format!("{} {} {}", word(id), word(id * 7), word(id * 3 + 1)),
                body: format!("{} {} {} {}\n{} {}", word(id * 5), word(id + 2), word(id * 11), word(id + 5), word(id * 2), word(id + 9)),
            }
        })
        .collect()
}

pub fn load(path: &Path) -> Result<Vec<Post>> {
    let file = std::fs::File::open(path).with_context(|| format!("opening dataset {}", path.display()))?;
    let posts: Vec<Post> = serde_json::from_reader(std::io::BufReader::new(file)).with_context(|| format!("parsing dataset {}", path.display()))?;
    info!("loaded {} posts from {}", posts.len(), path.display());
    Ok(posts)
}
