//! Query inputs shared by every repository
//!
//! Filter values are kept as typed `sea_orm::Value`s so they are always bound
//! as statement parameters, never spliced into SQL text.

use sea_orm::Value;
use std::fmt;

/// Field name to value mapping used for create payloads and update change-sets
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// Equality-based selection predicate; all conditions are ANDed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    conditions: Vec<(String, Option<Value>)>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match records whose `field` equals `value`
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((field.into(), Some(value.into())));
        self
    }

    /// Match records whose `field` is NULL
    pub fn is_null(mut self, field: impl Into<String>) -> Self {
        self.conditions.push((field.into(), None));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Iterate conditions; `None` stands for an IS NULL match
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.conditions
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_ref()))
    }
}

impl fmt::Display for Filters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match value {
                Some(value) => write!(f, "{}={}", field, render_value(value))?,
                None => write!(f, "{} IS NULL", field)?,
            }
        }
        Ok(())
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(Some(s)) => format!("{:?}", s.as_str()),
        Value::Bool(Some(b)) => b.to_string(),
        Value::Int(Some(i)) => i.to_string(),
        Value::BigInt(Some(i)) => i.to_string(),
        Value::Uuid(Some(u)) => u.to_string(),
        other => format!("{:?}", other),
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// One ordering term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }
}

/// Options for `filter`; every part is a no-op when absent
///
/// Applied in a fixed order: filters, ordering, limit, offset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterQuery {
    pub filters: Filters,
    pub order: Vec<OrderBy>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl FilterQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order.push(order);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

impl From<Filters> for FilterQuery {
    fn from(filters: Filters) -> Self {
        Self::new().filters(filters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_render_for_error_messages() {
        let filters = Filters::new()
            .eq("email", "ivan@corp.example")
            .eq("is_dismissed", false)
            .is_null("department_id");

        assert_eq!(
            filters.to_string(),
            r#"email="ivan@corp.example", is_dismissed=false, department_id IS NULL"#
        );
        assert_eq!(filters.len(), 3);
    }

    #[test]
    fn empty_filters_render_empty() {
        assert_eq!(Filters::new().to_string(), "");
        assert!(Filters::new().is_empty());
    }

    #[test]
    fn filter_query_builder_collects_parts() {
        let query = FilterQuery::new()
            .filters(Filters::new().eq("name", "Sales"))
            .order_by(OrderBy::desc("name"))
            .limit(2)
            .offset(1);

        assert_eq!(query.filters.len(), 1);
        assert_eq!(query.order, vec![OrderBy::desc("name")]);
        assert_eq!(query.limit, Some(2));
        assert_eq!(query.offset, Some(1));
    }
}
