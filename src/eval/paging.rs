//! `Paging` — spec §4.D.

use crate::error::{Error, Result};
use crate::ir::PagingOp;
use crate::value::Row;

pub fn apply(rows: Vec<Row>, ops: &[PagingOp]) -> Result<Vec<Row>> {
    let mut rows = rows;
    for op in ops {
        rows = match op {
            PagingOp::Take(n) => {
                rows.truncate(*n);
                rows
            }
            PagingOp::Skip(n) => {
                if rows.len() < *n {
                    return Err(Error::data(format!(
                        "cannot skip {n} rows out of only {}",
                        rows.len()
                    )));
                }
                rows.split_off(*n)
            }
        };
    }
    Ok(rows)
}
