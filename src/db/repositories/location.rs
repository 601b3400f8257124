use crate::entities::{locations, prelude::*};
use crate::models::Location;
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

pub struct LocationRepository {
    conn: DatabaseConnection,
}

impl LocationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Exact match on the raw search string. With duplicates, the oldest row wins.
    pub async fn find_by_query(&self, search_query: &str) -> Result<Option<Location>> {
        let row = Locations::find()
            .filter(locations::Column::SearchQuery.eq(search_query))
            .order_by_asc(locations::Column::Id)
            .one(&self.conn)
            .await?;

        Ok(row.map(Location::from))
    }

    pub async fn insert(&self, location: &Location) -> Result<()> {
        let active_model = locations::ActiveModel {
            search_query: Set(location.search_query.clone()),
            formatted_query: Set(location.formatted_query.clone()),
            latitude: Set(location.latitude),
            longitude: Set(location.longitude),
            ..Default::default()
        };

        Locations::insert(active_model).exec(&self.conn).await?;
        Ok(())
    }

    pub async fn count_by_query(&self, search_query: &str) -> Result<u64> {
        let count = Locations::find()
            .filter(locations::Column::SearchQuery.eq(search_query))
            .count(&self.conn)
            .await?;

        Ok(count)
    }
}
