use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    NotSet, Order, PaginatorTrait, QueryOrder, Set, TransactionTrait,
    sea_query::NullOrdering,
};

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::{NewMovie, RatingUpdate},
};

#[derive(Clone, Debug)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new movie with rating, review and ranking unset.
    ///
    /// A title that is already stored surfaces as [`AppError::Conflict`].
    pub async fn insert(&self, new: NewMovie) -> AppResult<movie::Model> {
        let model = movie::ActiveModel {
            id: NotSet,
            title: Set(new.title),
            year: Set(new.year),
            description: Set(new.description),
            rating: Set(None),
            ranking: Set(None),
            review: Set(None),
            image_url: Set(new.image_url),
        };
        Ok(model.insert(&self.db).await?)
    }

    pub async fn find(&self, id: i32) -> AppResult<Option<movie::Model>> {
        Ok(movie::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn get(&self, id: i32) -> AppResult<movie::Model> {
        self.find(id).await?.ok_or_else(|| AppError::not_found("movie", id))
    }

    pub async fn update_rating(
        &self,
        movie: movie::Model,
        update: RatingUpdate,
    ) -> AppResult<movie::Model> {
        let mut active = movie.into_active_model();
        active.rating = Set(Some(update.rating));
        active.review = Set(update.review);
        Ok(active.update(&self.db).await?)
    }

    pub async fn delete(&self, movie: movie::Model) -> AppResult<()> {
        let res = movie::Entity::delete_by_id(movie.id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::not_found("movie", movie.id));
        }
        Ok(())
    }

    pub async fn list_by_rating(&self) -> AppResult<Vec<movie::Model>> {
        list_by_rating(&self.db).await
    }

    pub async fn count(&self) -> AppResult<u64> {
        Ok(movie::Entity::find().count(&self.db).await?)
    }

    /// Writes the given `(id, ranking)` pairs in a single transaction.
    pub async fn save_rankings(&self, ranks: &[(i32, i32)]) -> AppResult<()> {
        if ranks.is_empty() {
            return Ok(());
        }
        let txn = self.db.begin().await?;
        for &(id, ranking) in ranks {
            let model = movie::ActiveModel { id: Set(id), ranking: Set(Some(ranking)), ..Default::default() };
            model.update(&txn).await?;
        }
        txn.commit().await?;
        Ok(())
    }
}

/// All movies ascending by rating. Unrated movies come first and equal ratings
/// fall back to insertion order so the sequence is total.
pub async fn list_by_rating<C: ConnectionTrait>(db: &C) -> AppResult<Vec<movie::Model>> {
    Ok(movie::Entity::find()
        .order_by_with_nulls(movie::Column::Rating, Order::Asc, NullOrdering::First)
        .order_by_asc(movie::Column::Id)
        .all(db)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn store() -> MovieStore {
        MovieStore::new(db::connect_and_migrate("sqlite::memory:").await.unwrap())
    }

    fn new_movie(title: &str) -> NewMovie {
        NewMovie {
            title: title.to_string(),
            year: 1999,
            description: format!("{title} synopsis"),
            image_url: format!("https://img.test/{title}.jpg"),
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_leaves_user_fields_unset() {
        let store = store().await;
        let movie = store.insert(new_movie("Heat")).await.unwrap();
        assert!(movie.id > 0);
        assert_eq!(movie.rating, None);
        assert_eq!(movie.ranking, None);
        assert_eq!(movie.review, None);
        assert_eq!(store.get(movie.id).await.unwrap(), movie);
    }

    #[tokio::test]
    async fn duplicate_title_is_a_conflict() {
        let store = store().await;
        store.insert(new_movie("Heat")).await.unwrap();
        let err = store.insert(new_movie("Heat")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let store = store().await;
        let err = store.get(999).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_rating_persists_and_is_idempotent() {
        let store = store().await;
        let movie = store.insert(new_movie("Heat")).await.unwrap();
        let update = RatingUpdate { rating: 8.5, review: Some("Tense.".into()) };

        let first = store.update_rating(movie, update.clone()).await.unwrap();
        let second = store.update_rating(first.clone(), update).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.get(first.id).await.unwrap().rating, Some(8.5));
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let store = store().await;
        let movie = store.insert(new_movie("Heat")).await.unwrap();
        let id = movie.id;
        store.delete(movie).await.unwrap();
        assert!(store.find(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn listing_puts_unrated_first_then_ascending() {
        let store = store().await;
        let a = store.insert(new_movie("A")).await.unwrap();
        store.insert(new_movie("B")).await.unwrap();
        let c = store.insert(new_movie("C")).await.unwrap();
        store.update_rating(a, RatingUpdate { rating: 8.0, review: None }).await.unwrap();
        store.update_rating(c, RatingUpdate { rating: 6.0, review: None }).await.unwrap();

        let titles: Vec<_> =
            store.list_by_rating().await.unwrap().into_iter().map(|m| m.title).collect();
        assert_eq!(titles, ["B", "C", "A"]);
    }
}
