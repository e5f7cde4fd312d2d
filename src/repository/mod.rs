//! Persistence access for cities and their points of interest.
//!
//! A [`CityInfoRepository`] is the store session of a single request: it owns
//! one database transaction, every read and write goes through it, and
//! [`CityInfoRepository::save`] commits the staged changes in one step.
//! Dropping a repository without saving rolls everything back.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait, Unchanged,
};

use crate::entities::{city, point_of_interest};

/// A city together with the points of interest it owns.
pub type CityWithPointsOfInterest = (city::Model, Vec<point_of_interest::Model>);

pub struct CityInfoRepository {
    txn: DatabaseTransaction,
}

impl CityInfoRepository {
    /// Open a store session for the current request.
    pub async fn begin(db: &DatabaseConnection) -> Result<Self, DbErr> {
        Ok(Self { txn: db.begin().await? })
    }

    // ============ Cities ============

    /// All cities ordered by id, points of interest eagerly loaded.
    pub async fn get_cities(&self) -> Result<Vec<CityWithPointsOfInterest>, DbErr> {
        city::Entity::find()
            .find_with_related(point_of_interest::Entity)
            .order_by_asc(city::Column::Id)
            .order_by_asc(point_of_interest::Column::Id)
            .all(&self.txn)
            .await
    }

    pub async fn get_city(&self, city_id: i32) -> Result<Option<CityWithPointsOfInterest>, DbErr> {
        let Some(city) = city::Entity::find_by_id(city_id).one(&self.txn).await? else {
            return Ok(None);
        };

        let points = city
            .find_related(point_of_interest::Entity)
            .order_by_asc(point_of_interest::Column::Id)
            .all(&self.txn)
            .await?;

        Ok(Some((city, points)))
    }

    pub async fn city_exists(&self, city_id: i32) -> Result<bool, DbErr> {
        let count = city::Entity::find_by_id(city_id).count(&self.txn).await?;
        Ok(count > 0)
    }

    /// Insert a new city. The store assigns the id.
    pub async fn add_city(&self, city: city::ActiveModel) -> Result<city::Model, DbErr> {
        let mut city = city;
        city.id = Default::default();
        city.insert(&self.txn).await
    }

    /// Write every mutable column of `city` back to its row.
    pub async fn update_city(&self, city: city::Model) -> Result<city::Model, DbErr> {
        let active = city::ActiveModel {
            id: Unchanged(city.id),
            name: Set(city.name),
            description: Set(city.description),
        };
        active.update(&self.txn).await
    }

    /// Remove a city and every point of interest it owns.
    pub async fn delete_city(&self, city: city::Model) -> Result<(), DbErr> {
        point_of_interest::Entity::delete_many()
            .filter(point_of_interest::Column::CityId.eq(city.id))
            .exec(&self.txn)
            .await?;

        city.delete(&self.txn).await?;
        Ok(())
    }

    // ============ Points of interest ============

    pub async fn get_points_of_interest_for_city(
        &self,
        city_id: i32,
    ) -> Result<Vec<point_of_interest::Model>, DbErr> {
        point_of_interest::Entity::find()
            .filter(point_of_interest::Column::CityId.eq(city_id))
            .order_by_asc(point_of_interest::Column::Id)
            .all(&self.txn)
            .await
    }

    pub async fn get_point_of_interest_for_city(
        &self,
        city_id: i32,
        point_of_interest_id: i32,
    ) -> Result<Option<point_of_interest::Model>, DbErr> {
        point_of_interest::Entity::find_by_id(point_of_interest_id)
            .filter(point_of_interest::Column::CityId.eq(city_id))
            .one(&self.txn)
            .await
    }

    /// Attach a new point of interest to the city `city_id`.
    ///
    /// Fails with [`DbErr::RecordNotFound`] when the owning city is absent.
    pub async fn add_point_of_interest_for_city(
        &self,
        city_id: i32,
        point_of_interest: point_of_interest::ActiveModel,
    ) -> Result<point_of_interest::Model, DbErr> {
        let city = city::Entity::find_by_id(city_id)
            .one(&self.txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("City {city_id}")))?;

        let mut active = point_of_interest;
        active.id = Default::default();
        active.city_id = Set(city.id);
        active.insert(&self.txn).await
    }

    /// Write name and description back. The owning city is never changed.
    pub async fn update_point_of_interest_for_city(
        &self,
        city_id: i32,
        point_of_interest: point_of_interest::Model,
    ) -> Result<point_of_interest::Model, DbErr> {
        if point_of_interest.city_id != city_id {
            return Err(DbErr::RecordNotFound(format!(
                "Point of interest {} in city {city_id}",
                point_of_interest.id
            )));
        }

        let active = point_of_interest::ActiveModel {
            id: Unchanged(point_of_interest.id),
            city_id: Unchanged(point_of_interest.city_id),
            name: Set(point_of_interest.name),
            description: Set(point_of_interest.description),
        };
        active.update(&self.txn).await
    }

    pub async fn delete_point_of_interest_for_city(
        &self,
        point_of_interest: point_of_interest::Model,
    ) -> Result<(), DbErr> {
        point_of_interest.delete(&self.txn).await?;
        Ok(())
    }

    /// Commit everything staged in this session.
    ///
    /// Always `true` once the commit succeeds, including when nothing was
    /// staged.
    pub async fn save(self) -> Result<bool, DbErr> {
        self.txn.commit().await?;
        Ok(true)
    }
}
