use sea_orm::sea_query::{extension::postgres::PgExpr, Expr, LikeExpr};
use sea_orm::{ColumnTrait, Condition};

/// Escape character used for LIKE patterns built here
const LIKE_ESCAPE: char = '\\';

/// Helper for building composite search conditions.
///
/// Each `add_*` call contributes one clause; `any` joins them with OR and
/// `all` with AND. Clauses with nothing to match on are skipped.
#[derive(Default)]
pub struct SearchBuilder {
    conditions: Vec<Condition>,
}

impl SearchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring match via PostgreSQL `ILIKE`.
    /// An empty needle adds nothing; whitespace is matched like any other text.
    pub fn add_ilike<C: ColumnTrait>(mut self, column: C, needle: &str) -> Self {
        if needle.is_empty() {
            return self;
        }

        let pattern = format!("%{}%", escape_like(needle));
        let expr = Expr::col(column).ilike(LikeExpr::new(pattern).escape(LIKE_ESCAPE));
        self.conditions.push(Condition::all().add(expr));
        self
    }

    /// Add an exact match condition
    pub fn add_eq<C: ColumnTrait, V>(mut self, column: C, value: V) -> Self
    where
        V: Into<sea_orm::Value>,
    {
        self.conditions.push(Condition::all().add(column.eq(value)));
        self
    }

    /// Inclusive range
    pub fn add_between<C: ColumnTrait, V>(mut self, column: C, min: V, max: V) -> Self
    where
        V: Into<sea_orm::Value>,
    {
        self.conditions
            .push(Condition::all().add(column.gte(min)).add(column.lte(max)));
        self
    }

    /// Lower bound, inclusive
    pub fn add_gte<C: ColumnTrait, V>(mut self, column: C, min: V) -> Self
    where
        V: Into<sea_orm::Value>,
    {
        self.conditions.push(Condition::all().add(column.gte(min)));
        self
    }

    /// Nest another builder's clauses as a single OR group
    pub fn add_any(mut self, other: SearchBuilder) -> Self {
        if let Some(condition) = other.any() {
            self.conditions.push(condition);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Join every clause with OR
    pub fn any(self) -> Option<Condition> {
        self.fold(Condition::any())
    }

    /// Join every clause with AND
    pub fn all(self) -> Option<Condition> {
        self.fold(Condition::all())
    }

    fn fold(self, seed: Condition) -> Option<Condition> {
        if self.is_empty() {
            None
        } else {
            Some(
                self.conditions
                    .into_iter()
                    .fold(seed, |acc, cond| acc.add(cond)),
            )
        }
    }
}

/// Escapes LIKE wildcards so user input is matched literally
pub fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch == '%' || ch == '_' || ch == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::product;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    fn postgres_sql(condition: Condition) -> String {
        product::Entity::find()
            .filter(condition)
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn escapes_wildcards() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[test]
    fn empty_needles_add_nothing() {
        let builder = SearchBuilder::new().add_ilike(product::Column::Name, "");
        assert!(builder.is_empty());
        assert!(builder.any().is_none());
    }

    #[test]
    fn whitespace_needles_still_filter() {
        let condition = SearchBuilder::new()
            .add_ilike(product::Column::Name, " ")
            .any()
            .unwrap();
        assert!(postgres_sql(condition).contains("'% %'"));
    }

    #[test]
    fn ilike_keeps_the_needle_as_given() {
        let condition = SearchBuilder::new()
            .add_ilike(product::Column::Name, "MoUsE")
            .any()
            .unwrap();
        let sql = postgres_sql(condition);
        assert!(sql.contains("\"name\" ILIKE '%MoUsE%'"), "{sql}");
    }

    #[test]
    fn any_joins_with_or_and_all_with_and() {
        let any = SearchBuilder::new()
            .add_ilike(product::Column::Name, "a")
            .add_ilike(product::Column::Sku, "a")
            .any()
            .unwrap();
        assert!(postgres_sql(any).contains(" OR "));

        let all = SearchBuilder::new()
            .add_eq(product::Column::Category, "Tools")
            .add_gte(product::Column::StockQuantity, 10)
            .all()
            .unwrap();
        assert!(postgres_sql(all).contains(" AND "));
    }
}
