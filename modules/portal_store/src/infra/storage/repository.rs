//! SeaORM implementation of the generic repository
//!
//! One type serves every entity: `SeaOrmRepository<E, C>` is bound to the
//! entity `E` and borrows a caller-owned session `C` (a connection or an open
//! transaction). Writes that need more than one statement run inside a nested
//! transaction, which is a savepoint when the session is already a
//! transaction.

use crate::contract::{Direction, FilterQuery, Fields, Filters, RepositoryError};
use crate::domain::{CrudRepository, EntitySchema};
use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    DatabaseTransaction, EntityTrait, IntoActiveModel, Iterable, ModelTrait, Order,
    PaginatorTrait, PrimaryKeyToColumn, QueryFilter, QueryOrder, QuerySelect, Select,
    TransactionTrait,
};
use serde::{de::DeserializeOwned, Serialize};

use super::entity::{
    course, course_test, department, portal, review, user, user_course, user_test,
};
use super::error::{store_error, write_error};

/// Largest limit every backend binds as a signed 64-bit integer
const UNBOUNDED_LIMIT: u64 = i64::MAX as u64;

pub type PortalRepository<'s, C> = SeaOrmRepository<'s, portal::Entity, C>;
pub type DepartmentRepository<'s, C> = SeaOrmRepository<'s, department::Entity, C>;
pub type UserRepository<'s, C> = SeaOrmRepository<'s, user::Entity, C>;
pub type ReviewRepository<'s, C> = SeaOrmRepository<'s, review::Entity, C>;
pub type CourseRepository<'s, C> = SeaOrmRepository<'s, course::Entity, C>;
pub type CourseTestRepository<'s, C> = SeaOrmRepository<'s, course_test::Entity, C>;
pub type UserCourseRepository<'s, C> = SeaOrmRepository<'s, user_course::Entity, C>;
pub type UserTestRepository<'s, C> = SeaOrmRepository<'s, user_test::Entity, C>;

/// Repository bound to entity `E` over session `C`
pub struct SeaOrmRepository<'s, E: EntityTrait, C> {
    session: &'s C,
    schema: EntitySchema<E>,
}

impl<'s, E, C> SeaOrmRepository<'s, E, C>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Serialize + DeserializeOwned + Send + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync,
    C: ConnectionTrait + TransactionTrait + Sync,
{
    pub fn new(session: &'s C) -> Self {
        Self {
            session,
            schema: EntitySchema::of(),
        }
    }

    pub fn schema(&self) -> &EntitySchema<E> {
        &self.schema
    }

    fn entity(&self) -> &str {
        self.schema.name()
    }

    /// Build the parameterized WHERE condition for `filters`
    fn condition(&self, filters: &Filters) -> Result<Condition, RepositoryError> {
        let mut condition = Condition::all();
        for (field, value) in filters.iter() {
            let column = self.schema.column(field)?;
            condition = match value {
                Some(value) => condition.add(column.eq(value.clone())),
                None => condition.add(column.is_null()),
            };
        }
        Ok(condition)
    }

    fn select(&self, filters: &Filters) -> Result<Select<E>, RepositoryError> {
        let select = E::find();
        if filters.is_empty() {
            return Ok(select);
        }
        Ok(select.filter(self.condition(filters)?))
    }

    /// Ordering, limit and offset, applied in that order
    fn paginate(
        &self,
        mut select: Select<E>,
        query: &FilterQuery,
    ) -> Result<Select<E>, RepositoryError> {
        for order in &query.order {
            let column = self.schema.column(&order.field)?;
            let order_kind = match order.direction {
                Direction::Asc => Order::Asc,
                Direction::Desc => Order::Desc,
            };
            select = select.order_by(column, order_kind);
        }
        match (query.limit, query.offset) {
            (Some(limit), _) => select = select.limit(limit),
            // OFFSET is only valid after a LIMIT clause
            (None, Some(_)) => select = select.limit(UNBOUNDED_LIMIT),
            (None, None) => {}
        }
        if let Some(offset) = query.offset {
            select = select.offset(offset);
        }
        Ok(select)
    }

    fn active_model(&self, data: Fields) -> Result<E::ActiveModel, RepositoryError> {
        self.schema.check_fields(data.keys().map(String::as_str))?;
        E::ActiveModel::from_json(serde_json::Value::Object(data)).map_err(store_error)
    }

    /// Fetch the only row of `select`
    async fn fetch_single<Q>(
        &self,
        conn: &Q,
        select: Select<E>,
        filters: &Filters,
    ) -> Result<E::Model, RepositoryError>
    where
        Q: ConnectionTrait,
    {
        let mut rows = select.limit(2u64).all(conn).await.map_err(store_error)?;
        match rows.len() {
            0 => Err(RepositoryError::NotFound {
                entity: self.entity().to_string(),
                filters: filters.to_string(),
            }),
            1 => Ok(rows.remove(0)),
            _ => Err(RepositoryError::AmbiguousResult {
                entity: self.entity().to_string(),
                filters: filters.to_string(),
            }),
        }
    }

    /// Write `data` to the single target by its current key, then read the
    /// row back by its new key
    async fn apply_update(
        &self,
        txn: &DatabaseTransaction,
        select: Select<E>,
        data: Fields,
        filters: &Filters,
    ) -> Result<E::Model, RepositoryError> {
        let target = self.fetch_single(txn, select, filters).await?;
        let changes = E::ActiveModel::from_json(serde_json::Value::Object(data))
            .map_err(store_error)?;

        let mut current_key = Condition::all();
        let mut updated_key = Condition::all();
        for key in E::PrimaryKey::iter() {
            let column = key.into_column();
            let current = target.get(column);
            let updated = match changes.get(column) {
                ActiveValue::Set(value) | ActiveValue::Unchanged(value) => value,
                ActiveValue::NotSet => current.clone(),
            };
            current_key = current_key.add(column.eq(current));
            updated_key = updated_key.add(column.eq(updated));
        }

        E::update_many()
            .set(changes)
            .filter(current_key)
            .exec(txn)
            .await
            .map_err(|e| write_error(self.entity(), e))?;

        E::find()
            .filter(updated_key)
            .one(txn)
            .await
            .map_err(store_error)?
            .ok_or_else(|| RepositoryError::Store {
                message: format!("updated {} row could not be read back", self.entity()),
            })
    }

    async fn insert_all(
        &self,
        txn: &DatabaseTransaction,
        models: Vec<E::ActiveModel>,
    ) -> Result<Vec<E::Model>, RepositoryError> {
        let mut created = Vec::with_capacity(models.len());
        for active in models {
            let model = active
                .insert(txn)
                .await
                .map_err(|e| write_error(self.entity(), e))?;
            created.push(model);
        }
        Ok(created)
    }

    async fn begin(&self) -> Result<DatabaseTransaction, RepositoryError> {
        self.session.begin().await.map_err(store_error)
    }

    /// Commit on success, roll back on failure
    async fn finish<T>(
        &self,
        txn: DatabaseTransaction,
        result: Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        match result {
            Ok(value) => {
                txn.commit().await.map_err(|e| write_error(self.entity(), e))?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::warn!(
                        entity = self.entity(),
                        error = %rollback_err,
                        "rollback of nested transaction failed"
                    );
                }
                Err(err)
            }
        }
    }
}

#[async_trait]
impl<'s, E, C> CrudRepository for SeaOrmRepository<'s, E, C>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Serialize + DeserializeOwned + Send + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync,
    C: ConnectionTrait + TransactionTrait + Sync,
{
    type Record = E::Model;

    async fn create(&self, data: Fields) -> Result<E::Model, RepositoryError> {
        tracing::debug!(entity = self.entity(), fields = data.len(), "create");

        let active = self.active_model(data)?;
        active
            .insert(self.session)
            .await
            .map_err(|e| write_error(self.entity(), e))
    }

    async fn bulk_create(&self, data: Vec<Fields>) -> Result<Vec<E::Model>, RepositoryError> {
        tracing::debug!(entity = self.entity(), rows = data.len(), "bulk create");

        if data.is_empty() {
            return Ok(Vec::new());
        }
        let models = data
            .into_iter()
            .map(|fields| self.active_model(fields))
            .collect::<Result<Vec<_>, _>>()?;

        let txn = self.begin().await?;
        let result = self.insert_all(&txn, models).await;
        self.finish(txn, result).await
    }

    async fn update(
        &self,
        data: Fields,
        filters: Option<Filters>,
    ) -> Result<E::Model, RepositoryError> {
        if data.is_empty() {
            return Err(RepositoryError::EmptyChangeSet {
                entity: self.entity().to_string(),
            });
        }
        self.schema.check_fields(data.keys().map(String::as_str))?;

        let filters = filters.unwrap_or_default();
        let select = self.select(&filters)?;
        tracing::debug!(entity = self.entity(), filters = %filters, "update");

        let txn = self.begin().await?;
        let result = self.apply_update(&txn, select, data, &filters).await;
        self.finish(txn, result).await
    }

    async fn delete(&self, filters: Filters) -> Result<(), RepositoryError> {
        tracing::debug!(entity = self.entity(), filters = %filters, "delete");

        let mut statement = E::delete_many();
        if !filters.is_empty() {
            statement = statement.filter(self.condition(&filters)?);
        }
        let result = statement.exec(self.session).await.map_err(store_error)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: self.entity().to_string(),
                filters: filters.to_string(),
            });
        }
        Ok(())
    }

    async fn filter(&self, query: FilterQuery) -> Result<Vec<E::Model>, RepositoryError> {
        let select = self.select(&query.filters)?;
        let select = self.paginate(select, &query)?;

        select.all(self.session).await.map_err(store_error)
    }

    async fn filter_fields(
        &self,
        query: FilterQuery,
        fields: &[&str],
    ) -> Result<Vec<serde_json::Value>, RepositoryError> {
        let mut select = self.select(&query.filters)?;
        if !fields.is_empty() {
            let columns = fields
                .iter()
                .map(|field| self.schema.column(field))
                .collect::<Result<Vec<_>, _>>()?;
            select = select.select_only().columns(columns);
        }
        let select = self.paginate(select, &query)?;

        select
            .into_json()
            .all(self.session)
            .await
            .map_err(store_error)
    }

    async fn get_one(&self, filters: Filters) -> Result<E::Model, RepositoryError> {
        let select = self.select(&filters)?;
        self.fetch_single(self.session, select, &filters).await
    }

    async fn exists(&self, filters: Filters) -> Result<bool, RepositoryError> {
        let found = self
            .select(&filters)?
            .one(self.session)
            .await
            .map_err(store_error)?;
        Ok(found.is_some())
    }

    async fn count(&self, filters: Filters) -> Result<u64, RepositoryError> {
        self.select(&filters)?
            .count(self.session)
            .await
            .map_err(store_error)
    }
}
