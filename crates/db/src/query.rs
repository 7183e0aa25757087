//! Typed SQL fragment builder for the `products` table.
//!
//! Filters are `(columns, operator, bound value)` tuples and sorting is an
//! enum pair, so the only text ever spliced into SQL comes from the
//! [`Column`], [`Operator`] and direction variants below. Every user value
//! travels as a `$n` bind parameter.

use catalog_core::listing::{ProductListing, SortColumn, SortDirection};
use catalog_core::product::ProductChanges;
use rust_decimal::Decimal;

/// Columns of the `products` table that may appear in generated SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    Name,
    Description,
    Price,
    Category,
    StockQuantity,
    CreatedAt,
}

impl Column {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Description => "description",
            Self::Price => "price",
            Self::Category => "category",
            Self::StockQuantity => "stock_quantity",
            Self::CreatedAt => "created_at",
        }
    }
}

impl From<SortColumn> for Column {
    fn from(sort: SortColumn) -> Self {
        match sort {
            SortColumn::Id => Self::Id,
            SortColumn::Price => Self::Price,
            SortColumn::Name => Self::Name,
            SortColumn::Category => Self::Category,
            SortColumn::CreatedAt => Self::CreatedAt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Like,
}

impl Operator {
    fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Like => "LIKE",
        }
    }
}

fn direction_sql(dir: SortDirection) -> &'static str {
    match dir {
        SortDirection::Asc => "ASC",
        SortDirection::Desc => "DESC",
    }
}

/// One filter condition. When several columns are listed they are OR-ed
/// together against the same bound value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub columns: Vec<Column>,
    pub op: Operator,
    pub value: String,
}

/// Escape LIKE wildcards so the pattern matches a literal substring.
pub fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

// ---------------------------------------------------------------------------
// Listing query
// ---------------------------------------------------------------------------

/// SELECT / COUNT builder for the product listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub filters: Vec<Filter>,
    pub sort_by: Column,
    pub sort_dir: SortDirection,
}

impl ProductQuery {
    /// Build the conjunctive filter list from a normalised listing request.
    pub fn from_listing(listing: &ProductListing) -> Self {
        let mut filters = Vec::new();

        if let Some(ref search) = listing.search {
            filters.push(Filter {
                columns: vec![Column::Name, Column::Description],
                op: Operator::Like,
                value: format!("%{}%", escape_like(search)),
            });
        }

        if let Some(ref category) = listing.category {
            filters.push(Filter {
                columns: vec![Column::Category],
                op: Operator::Eq,
                value: category.clone(),
            });
        }

        Self {
            filters,
            sort_by: listing.sort_by.into(),
            sort_dir: listing.sort_dir,
        }
    }

    /// Render the WHERE clause.
    ///
    /// Returns `(where_clause, next_bind_index)`. The clause is empty if no
    /// filters are active, or starts with `WHERE `.
    pub fn where_clause(&self) -> (String, u32) {
        let mut conditions: Vec<String> = Vec::new();
        let mut bind_idx = 1u32;

        for filter in &self.filters {
            let op = filter.op.as_sql();
            let parts: Vec<String> = filter
                .columns
                .iter()
                .map(|c| format!("{} {op} ${bind_idx}", c.as_sql()))
                .collect();
            if parts.len() == 1 {
                conditions.push(parts.concat());
            } else {
                conditions.push(format!("({})", parts.join(" OR ")));
            }
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        (where_clause, bind_idx)
    }

    /// ORDER BY clause. `id` breaks ties so pages are stable.
    pub fn order_clause(&self) -> String {
        let dir = direction_sql(self.sort_dir);
        if self.sort_by == Column::Id {
            format!("ORDER BY id {dir}")
        } else {
            format!("ORDER BY {} {dir}, id ASC", self.sort_by.as_sql())
        }
    }

    /// Paged SELECT; the last two bind slots are LIMIT and OFFSET.
    pub fn select_sql(&self, columns: &str) -> String {
        let (where_clause, bind_idx) = self.where_clause();
        format!(
            "SELECT {columns} FROM products {where_clause} {} LIMIT ${bind_idx} OFFSET ${}",
            self.order_clause(),
            bind_idx + 1
        )
    }

    pub fn count_sql(&self) -> String {
        let (where_clause, _) = self.where_clause();
        format!("SELECT COUNT(*)::BIGINT AS count FROM products {where_clause}")
    }

    /// Filter values in bind order.
    pub fn bind_values(&self) -> impl Iterator<Item = &str> {
        self.filters.iter().map(|f| f.value.as_str())
    }
}

// ---------------------------------------------------------------------------
// Partial update
// ---------------------------------------------------------------------------

/// Typed bind value for a SET assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(Option<String>),
    Decimal(Decimal),
    Int(i32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: Column,
    pub value: BindValue,
}

/// Turn validated changes into SET assignments, in column order.
pub fn assignments(changes: &ProductChanges) -> Vec<Assignment> {
    let mut sets = Vec::new();

    if let Some(ref name) = changes.name {
        sets.push(Assignment {
            column: Column::Name,
            value: BindValue::Text(Some(name.clone())),
        });
    }
    if let Some(ref description) = changes.description {
        sets.push(Assignment {
            column: Column::Description,
            value: BindValue::Text(description.clone()),
        });
    }
    if let Some(price) = changes.price {
        sets.push(Assignment {
            column: Column::Price,
            value: BindValue::Decimal(price),
        });
    }
    if let Some(ref category) = changes.category {
        sets.push(Assignment {
            column: Column::Category,
            value: BindValue::Text(category.clone()),
        });
    }
    if let Some(stock) = changes.stock_quantity {
        sets.push(Assignment {
            column: Column::StockQuantity,
            value: BindValue::Int(stock),
        });
    }

    sets
}

/// `UPDATE products SET ... WHERE id = $1 RETURNING {columns}`.
///
/// Assignments bind from `$2` onwards.
pub fn update_sql(sets: &[Assignment], columns: &str) -> String {
    let set_clause: Vec<String> = sets
        .iter()
        .enumerate()
        .map(|(i, a)| format!("{} = ${}", a.column.as_sql(), i + 2))
        .collect();
    format!(
        "UPDATE products SET {} WHERE id = $1 RETURNING {columns}",
        set_clause.join(", ")
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
