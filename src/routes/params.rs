use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

pub const STORE_PER_PAGE: i64 = 12;
pub const CATEGORY_PER_PAGE: i64 = 30;

#[derive(Debug, Default, Clone, Copy, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        self.normalize_with(20)
    }

    /// `(page, per_page, offset)` with `default_per_page` when the caller sent none.
    pub fn normalize_with(&self, default_per_page: i64) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(default_per_page).clamp(1, 100);
        // Huge page numbers saturate to an offset past every row instead of overflowing.
        let offset = (page - 1).saturating_mul(per_page);
        (page, per_page, offset)
    }
}

/// `page`, `per_page` and a free-text `q`, shared by the admin list screens.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub q: Option<String>,
}

impl SearchQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }

    pub fn term(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Order id, customer email or customer name.
    pub q: Option<String>,
    pub status: Option<String>,
    pub payment_status: Option<String>,
}

impl OrderQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StoreQuery {
    pub page: Option<i64>,
    pub q: Option<String>,
    /// Category slug.
    pub category: Option<String>,
}

impl StoreQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: Some(STORE_PER_PAGE),
        }
    }
}

/// Non-empty trimmed value of an optional filter.
pub fn filter_value(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
