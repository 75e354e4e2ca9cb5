//! Query builders for schema-driven inserts and partial updates.
//!
//! Column names come from the static field schemas in `vinventory_core`,
//! never from client input; only values are bound.

use sqlx::{Postgres, QueryBuilder};
use vinventory_core::schema::{FieldMap, FieldValue};
use vinventory_core::types::DbId;

/// `INSERT INTO {table} (cols...) VALUES ($1, ...) RETURNING {returning}`.
pub(crate) fn insert_query<'a>(
    table: &str,
    values: &FieldMap,
    returning: &str,
) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::new(format!("INSERT INTO {table} ("));

    for (i, (column, _)) in values.iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        qb.push(column);
    }

    qb.push(") VALUES (");
    for (i, (_, value)) in values.iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        push_value(&mut qb, value);
    }

    qb.push(format!(") RETURNING {returning}"));
    qb
}

/// `UPDATE {table} SET col = $n, ..., updated_at = NOW() WHERE id = $k
/// RETURNING {returning}`. Only the columns present in `values` are touched.
pub(crate) fn update_query<'a>(
    table: &str,
    id: DbId,
    values: &FieldMap,
    returning: &str,
) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::new(format!("UPDATE {table} SET "));

    for (column, value) in values.iter() {
        qb.push(column);
        qb.push(" = ");
        push_value(&mut qb, value);
        qb.push(", ");
    }

    qb.push("updated_at = NOW() WHERE id = ");
    qb.push_bind(id);
    qb.push(format!(" RETURNING {returning}"));
    qb
}

fn push_value(qb: &mut QueryBuilder<'_, Postgres>, value: &FieldValue) {
    match value {
        FieldValue::Text(v) => qb.push_bind(v.clone()),
        FieldValue::Flag(v) => qb.push_bind(*v),
        FieldValue::List(v) => qb.push_bind(v.clone()),
        FieldValue::Id(v) => qb.push_bind(*v),
    };
}
