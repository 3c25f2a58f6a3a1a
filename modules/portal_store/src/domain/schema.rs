//! Static field registry for an entity type
//!
//! Built once from the entity's column enumeration; every field name coming
//! from a caller is resolved here before a statement is issued.

use crate::contract::RepositoryError;
use sea_orm::{ColumnTrait, EntityTrait, IdenStatic, Iterable};

/// One registered field
#[derive(Debug, Clone)]
pub struct FieldDef<C> {
    pub name: String,
    pub column: C,
    pub unique: bool,
    pub nullable: bool,
}

/// Field registry of one entity
pub struct EntitySchema<E: EntityTrait> {
    name: String,
    fields: Vec<FieldDef<E::Column>>,
}

impl<E: EntityTrait> EntitySchema<E> {
    /// Build the registry from the entity definition
    pub fn of() -> Self {
        let name = E::default().table_name().to_string();
        let fields = E::Column::iter()
            .map(|column| {
                let def = column.def();
                FieldDef {
                    name: column.as_str().to_string(),
                    column,
                    unique: def.is_unique(),
                    nullable: def.is_null(),
                }
            })
            .collect();

        Self { name, fields }
    }

    /// Table name, used in error messages and logs
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDef<E::Column>] {
        &self.fields
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f.name == field)
    }

    /// Resolve a field name to its column
    pub fn column(&self, field: &str) -> Result<E::Column, RepositoryError> {
        self.fields
            .iter()
            .find(|f| f.name == field)
            .map(|f| f.column)
            .ok_or_else(|| self.unknown_field(field))
    }

    /// Fail on the first name that is not a registered field
    pub fn check_fields<'a, I>(&self, names: I) -> Result<(), RepositoryError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        match names.into_iter().find(|name| !self.contains(name)) {
            Some(name) => Err(self.unknown_field(name)),
            None => Ok(()),
        }
    }

    fn unknown_field(&self, field: &str) -> RepositoryError {
        RepositoryError::UnknownField {
            entity: self.name.clone(),
            field: field.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::storage::entity::{portal, user};

    #[test]
    fn registry_lists_every_column() {
        let schema = EntitySchema::<portal::Entity>::of();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name.as_str()).collect();

        assert_eq!(schema.name(), "portals_portal");
        assert_eq!(names, vec!["id", "name"]);
    }

    #[test]
    fn registry_records_constraints() {
        let schema = EntitySchema::<user::Entity>::of();
        let email = schema.fields().iter().find(|f| f.name == "email").unwrap();
        let patronymic = schema
            .fields()
            .iter()
            .find(|f| f.name == "patronymic")
            .unwrap();

        assert!(email.unique);
        assert!(!email.nullable);
        assert!(patronymic.nullable);
    }

    #[test]
    fn unknown_field_is_reported_by_name() {
        let schema = EntitySchema::<user::Entity>::of();

        assert!(schema.column("email").is_ok());
        assert_eq!(
            schema.check_fields(["first_name", "nickname", "salary"]),
            Err(RepositoryError::UnknownField {
                entity: "users_user".to_string(),
                field: "nickname".to_string(),
            })
        );
    }
}
