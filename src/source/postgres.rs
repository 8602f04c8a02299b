use async_trait::async_trait;
use sqlx::PgPool;

use super::{CountFilter, DashboardSource, SortDir, Table, TopQuery};
use crate::errors::FetchError;
use crate::models::Conversation;

/// Projection shared by every conversation read.
const SELECT_CONVERSATION: &str = "\
    SELECT id::TEXT AS id, \
           customer_name, \
           COALESCE(customer_phone, '') AS customer_phone, \
           COALESCE(status, '') AS status, \
           last_message_at \
    FROM conversations";

/// `DashboardSource` over a Postgres pool.
#[derive(Clone)]
pub struct PgSource {
    pool: PgPool,
}

impl PgSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(crate) fn count_sql(table: Table, filter: Option<&CountFilter>) -> String {
    match filter {
        Some(f) => format!("SELECT COUNT(*) FROM {} WHERE {} = $1", table.as_sql(), f.column.as_sql()),
        None => format!("SELECT COUNT(*) FROM {}", table.as_sql()),
    }
}

pub(crate) fn top_sql(query: &TopQuery) -> String {
    let nulls = match query.direction {
        SortDir::Desc => "NULLS LAST",
        SortDir::Asc => "NULLS FIRST",
    };
    format!(
        "{SELECT_CONVERSATION} ORDER BY {} {} {nulls} LIMIT $1",
        query.order_by.as_sql(),
        query.direction.as_sql()
    )
}

#[async_trait]
impl DashboardSource for PgSource {
    async fn count(&self, table: Table, filter: Option<&CountFilter>) -> Result<Option<i64>, FetchError> {
        let sql = count_sql(table, filter);
        let mut q = sqlx::query_scalar::<_, Option<i64>>(&sql);
        if let Some(f) = filter {
            q = q.bind(f.value.clone());
        }
        let count = q.fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn query_top(&self, query: TopQuery) -> Result<Option<Vec<Conversation>>, FetchError> {
        let sql = top_sql(&query);
        let limit = i64::try_from(query.limit).unwrap_or(i64::MAX);
        let rows = sqlx::query_as::<_, Conversation>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(Some(rows))
    }
}
