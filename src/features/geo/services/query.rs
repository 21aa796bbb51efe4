//! Shared query pipeline pieces used by every collection service: range
//! checks, sorting, pagination bounds and field projection.
//!
//! The processing order is fixed for determinism: filter, sort, paginate,
//! attach children, project fields.

use std::cmp::Ordering;

use serde_json::Value;

use crate::core::error::{AppError, Result};
use crate::shared::constants::{MAX_LIMIT, MAX_OFFSET};

/// One sortable field: its query-string name and a comparator over records.
pub type SortField<T> = (&'static str, fn(&T, &T) -> Ordering);

/// Case-insensitive substring match on a record name.
pub fn name_matches(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(&needle.to_lowercase())
}

/// An inclusive numeric range filter is only meaningful when min <= max;
/// anything else is a caller error, not an empty result.
pub fn validate_range<N: PartialOrd>(min: Option<N>, max: Option<N>, what: &str) -> Result<()> {
    if let (Some(min), Some(max)) = (&min, &max) {
        if min > max {
            return Err(AppError::InvalidRange(format!(
                "Minimum {} cannot be greater than maximum {}",
                what, what
            )));
        }
    }
    Ok(())
}

/// Sort `items` by a spec like `population` or `-population` (descending).
/// The sort is stable, so ties keep their dataset order.
pub fn sort_records<T>(items: &mut [&T], spec: &str, fields: &[SortField<T>]) -> Result<()> {
    let (field_name, descending) = match spec.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (spec, false),
    };

    let compare = fields
        .iter()
        .find(|(name, _)| *name == field_name)
        .map(|(_, cmp)| *cmp)
        .ok_or_else(|| {
            AppError::InvalidSortField(format!("Invalid sort field: '{}'", field_name))
        })?;

    if descending {
        items.sort_by(|a, b| compare(b, a));
    } else {
        items.sort_by(|a, b| compare(a, b));
    }
    Ok(())
}

/// Validate offset/limit and slice the result window. A limit above
/// [`MAX_LIMIT`] is clamped silently; out-of-bounds offsets and non-positive
/// limits are rejected.
pub fn paginate<T>(items: Vec<T>, offset: Option<i64>, limit: Option<i64>) -> Result<Vec<T>> {
    let offset = offset.unwrap_or(0);
    if offset < 0 || offset > MAX_OFFSET {
        return Err(AppError::InvalidPagination(format!(
            "Offset must be between 0 and {}, got {}",
            MAX_OFFSET, offset
        )));
    }

    let limit = match limit {
        Some(l) if l <= 0 => {
            return Err(AppError::InvalidPagination(format!(
                "Limit must be greater than 0, got {}",
                l
            )));
        }
        Some(l) if l > MAX_LIMIT => {
            tracing::warn!("Requested limit {} clamped to {}", l, MAX_LIMIT);
            Some(MAX_LIMIT as usize)
        }
        Some(l) => Some(l as usize),
        None => None,
    };

    let iter = items.into_iter().skip(offset as usize);
    Ok(match limit {
        Some(l) => iter.take(l).collect(),
        None => iter.collect(),
    })
}

/// Strip a serialized record down to a comma-separated field list. Unknown
/// field names are ignored; `None` keeps the full shape. Applied after
/// hierarchy attachment so callers can still select attached keys like
/// `districts`.
pub fn project_fields(mut record: Value, fields: Option<&str>) -> Value {
    let Some(fields) = fields else {
        return record;
    };

    let wanted: Vec<&str> = fields
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect();

    if let Value::Object(ref mut map) = record {
        map.retain(|key, _| wanted.contains(&key.as_str()));
    }
    record
}
