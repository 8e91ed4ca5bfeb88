//! Shared types used across the codebase

use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;

/// `?page=&limit=` query parameters
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// A resolved page request: 1-based page, limit clamped to the configured maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn resolve(query: PageQuery, config: &PaginationConfig) -> Self {
        let page = query.page.filter(|p| *p > 0).unwrap_or(1);
        let limit = query
            .limit
            .filter(|l| *l > 0)
            .unwrap_or(config.default_limit)
            .min(config.max_limit);

        Self { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.limit as i64
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_users: i64,
}

impl Pagination {
    pub fn new(request: PageRequest, total: i64) -> Self {
        let limit = request.limit.max(1) as i64;
        let total_pages = (total + limit - 1) / limit;

        Self {
            current_page: request.page,
            total_pages: total_pages as u32,
            total_users: total,
        }
    }
}
