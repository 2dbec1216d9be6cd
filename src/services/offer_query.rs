use sqlx::{QueryBuilder, Sqlite};
use uuid::Uuid;

use crate::models::offer::{OfferStatus, OFFER_SELECT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OfferOrdering {
    /// Newest first.
    #[default]
    Newest,
    /// Inclusion offers first, newest first within each group.
    InclusionFirst,
}

/// Typed predicate set over offers. Every field that is set narrows the
/// result; rendering goes through `QueryBuilder` so values are always bound.
#[derive(Debug, Clone, Default)]
pub struct OfferFilter {
    pub status: Option<OfferStatus>,
    pub employer_profile_id: Option<i64>,
    pub not_applied_by: Option<Uuid>,
    pub category_id: Option<i64>,
    pub inclusion_only: bool,
    pub search: Option<String>,
    pub ordering: OfferOrdering,
    pub limit: Option<i64>,
}

impl OfferFilter {
    pub fn active() -> Self {
        Self::default().with_status(OfferStatus::Active)
    }

    pub fn with_status(mut self, status: OfferStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn owned_by_profile(mut self, profile_id: i64) -> Self {
        self.employer_profile_id = Some(profile_id);
        self
    }

    pub fn excluding_applied_by(mut self, candidate_id: Uuid) -> Self {
        self.not_applied_by = Some(candidate_id);
        self
    }

    pub fn in_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn inclusion_only(mut self) -> Self {
        self.inclusion_only = true;
        self
    }

    pub fn matching(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        let search = search.trim();
        self.search = (!search.is_empty()).then(|| search.to_string());
        self
    }

    pub fn ordered(mut self, ordering: OfferOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn to_query(&self) -> QueryBuilder<'static, Sqlite> {
        let mut qb = QueryBuilder::new(OFFER_SELECT);
        let mut conditions = 0usize;
        let mut next_condition = |qb: &mut QueryBuilder<'static, Sqlite>| {
            qb.push(if conditions == 0 { " WHERE " } else { " AND " });
            conditions += 1;
        };

        if let Some(status) = self.status {
            next_condition(&mut qb);
            qb.push("o.status = ").push_bind(status);
        }
        if let Some(profile_id) = self.employer_profile_id {
            next_condition(&mut qb);
            qb.push("o.employer_profile_id = ").push_bind(profile_id);
        }
        if let Some(candidate_id) = self.not_applied_by {
            next_condition(&mut qb);
            qb.push("o.id NOT IN (SELECT offer_id FROM applications WHERE candidate_id = ")
                .push_bind(candidate_id)
                .push(")");
        }
        if let Some(category_id) = self.category_id {
            next_condition(&mut qb);
            qb.push("o.category_id = ").push_bind(category_id);
        }
        if self.inclusion_only {
            next_condition(&mut qb);
            qb.push("o.is_inclusion = 1");
        }
        if let Some(search) = &self.search {
            let pattern = format!("%{}%", escape_like(search));
            next_condition(&mut qb);
            qb.push("(o.title LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\' OR o.description LIKE ")
                .push_bind(pattern)
                .push(" ESCAPE '\\')");
        }

        match self.ordering {
            OfferOrdering::Newest => qb.push(" ORDER BY o.created_at DESC, o.id DESC"),
            OfferOrdering::InclusionFirst => {
                qb.push(" ORDER BY o.is_inclusion DESC, o.created_at DESC, o.id DESC")
            }
        };

        if let Some(limit) = self.limit {
            qb.push(" LIMIT ").push_bind(limit);
        }
        qb
    }
}

/// Makes `%`, `_` and the escape character itself match literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
