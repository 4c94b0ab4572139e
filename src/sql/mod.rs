//! Partial SQL translation — spec §4.F: folds only `SortBy`/`Paging` into
//! the internal AST; every other transformation is silently skipped (spec
//! §9 — untranslatable pipelines are the caller's responsibility).

mod ast;
mod render;

pub use ast::{OrderBy, PagingSpec, SqlQuery, SqlSelect, SqlSource};
pub use render::format_sql_query;

use crate::ir::{PagingOp, Transformation};
use crate::types::{InferredType, Metadata};

/// Folds `transformations` left-to-right into a `SqlQuery` against `table`,
/// using `metadata` to decide `CAST` wrapping for `ORDER BY` columns.
pub fn translate(transformations: &[Transformation], metadata: &Metadata, table: &str) -> SqlQuery {
    let columns: Vec<String> = metadata.iter().map(|(name, _)| name.clone()).collect();
    let mut query = SqlQuery::initial(table, &columns);

    for t in transformations {
        match t {
            Transformation::SortBy(cols) => apply_sort_by(&mut query, cols, metadata),
            Transformation::Paging(ops) => apply_paging(&mut query, ops),
            _ => {}
        }
    }

    query
}

fn apply_sort_by(query: &mut SqlQuery, cols: &[(String, crate::ir::SortDirection)], metadata: &Metadata) {
    if cols.is_empty() {
        return;
    }
    if query.paging.is_some() {
        let owned = std::mem::replace(query, SqlQuery::initial("", &[]));
        *query = owned.into_nested();
    }
    let order_by = cols
        .iter()
        .map(|(name, dir)| OrderBy {
            column: name.clone(),
            direction: *dir,
            cast_to_nvarchar: needs_cast(metadata, name),
        })
        .collect();
    query.order_by = Some(order_by);
}

fn needs_cast(metadata: &Metadata, column: &str) -> bool {
    metadata
        .iter()
        .find(|(name, _)| name == column)
        .map(|(_, ty)| matches!(ty, InferredType::String | InferredType::Any))
        .unwrap_or(false)
}

fn apply_paging(query: &mut SqlQuery, ops: &[PagingOp]) {
    if query.order_by.is_none() {
        query.select.push(SqlSelect::Literal("0 as [temp_sort]".to_string()));
        query.order_by = Some(vec![OrderBy {
            column: "temp_sort".to_string(),
            direction: crate::ir::SortDirection::Ascending,
            cast_to_nvarchar: false,
        }]);
    }

    let mut current = query
        .paging
        .unwrap_or(PagingSpec { skip: 0.0, take: f64::INFINITY });

    for op in ops {
        current = match op {
            PagingOp::Skip(n) => PagingSpec {
                skip: current.skip + *n as f64,
                take: current.take - *n as f64,
            },
            PagingOp::Take(n) => PagingSpec {
                skip: current.skip,
                take: current.take.min(*n as f64),
            },
        };
    }

    query.paging = Some(current);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::SortDirection;

    fn metadata() -> Metadata {
        vec![("age".to_string(), InferredType::Int)]
    }

    #[test]
    fn s5_sort_then_page_renders_without_nesting() {
        let transformations = vec![
            Transformation::SortBy(vec![("age".to_string(), SortDirection::Descending)]),
            Transformation::Paging(vec![PagingOp::Skip(10), PagingOp::Take(5)]),
        ];
        let query = translate(&transformations, &metadata(), "T");
        let sql = format_sql_query(&query).unwrap();
        assert_eq!(
            sql,
            "SELECT [age] FROM [T] ORDER BY [age] DESC OFFSET 10 ROWS FETCH NEXT 5 ROWS ONLY"
        );
    }

    #[test]
    fn s5_paging_then_sort_nests() {
        let transformations = vec![
            Transformation::Paging(vec![PagingOp::Skip(10), PagingOp::Take(5)]),
            Transformation::SortBy(vec![("age".to_string(), SortDirection::Descending)]),
        ];
        let query = translate(&transformations, &metadata(), "T");
        assert!(matches!(query.source, SqlSource::Nested(_)));
    }

    #[test]
    fn paging_without_prior_sort_adds_temp_sort_once() {
        let transformations = vec![Transformation::Paging(vec![PagingOp::Take(5)])];
        let query = translate(&transformations, &metadata(), "T");
        let temp_sorts = query
            .select
            .iter()
            .filter(|s| matches!(s, SqlSelect::Literal(l) if l.contains("temp_sort")))
            .count();
        assert_eq!(temp_sorts, 1);
    }

    #[test]
    fn non_translatable_transformations_are_skipped() {
        let transformations = vec![Transformation::DropColumns(vec!["age".to_string()])];
        let query = translate(&transformations, &metadata(), "T");
        assert!(query.order_by.is_none());
        assert!(query.paging.is_none());
    }
}
