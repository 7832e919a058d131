//! Dense ranking over the stored movies.
//!
//! Ranks are a display cache: they are rebuilt from the current rating order
//! whenever the list is shown, so the highest rated movie is always `1` and the
//! lowest rated (or unrated) one is always `N`.

use tracing::debug;

use crate::{entities::movie, error::AppResult, store::MovieStore};

/// Pairs each movie id with its rank, given movies sorted ascending by rating.
pub fn assign_ranks(ascending: &[movie::Model]) -> Vec<(i32, i32)> {
    let total = ascending.len() as i32;
    ascending.iter().enumerate().map(|(index, m)| (m.id, total - index as i32)).collect()
}

/// Recomputes every ranking, persists the ones that moved and returns the
/// movies in listing order with their fresh ranks.
pub async fn recompute(store: &MovieStore) -> AppResult<Vec<movie::Model>> {
    let mut movies = store.list_by_rating().await?;
    let ranks = assign_ranks(&movies);

    let changed: Vec<(i32, i32)> = movies
        .iter_mut()
        .zip(&ranks)
        .filter_map(|(m, &(id, rank))| {
            let stale = m.ranking != Some(rank);
            m.ranking = Some(rank);
            stale.then_some((id, rank))
        })
        .collect();

    debug!(total = movies.len(), changed = changed.len(), "recomputed rankings");
    store.save_rankings(&changed).await?;
    Ok(movies)
}
