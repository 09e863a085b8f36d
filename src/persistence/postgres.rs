//! PostgreSQL implementation of the persistence layer.
//!
//! The slot invariant is enforced by the `uq_appointments_troupe_scheduled`
//! unique constraint; inserts use `ON CONFLICT DO NOTHING` so a taken slot
//! surfaces as an empty `RETURNING` set rather than a database error.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use super::models::{AppointmentDetailRow, ClientRow, ClownRow, TroupeLeaderRow, TroupeRow};
use super::{AppointmentRepository, OwnerScope, PartyDirectory};
use crate::config::BookingConfig;
use crate::domain::{
    Appointment, AppointmentDetail, AppointmentId, AppointmentIssue, AppointmentPatch, Client,
    ClientDetailsRequest, ClientId, Clown, TimeFilter, Troupe, TroupeId, TroupeLeader, UserId,
};
use crate::error::BookingError;

const DETAIL_SELECT: &str = "SELECT a.id, a.created_at, a.scheduled_at, a.client_id, a.troupe_id, \
     a.status, a.rating, c.user_id AS client_user_id, c.contact_name, c.contact_email, \
     c.contact_number, t.name AS troupe_name \
     FROM appointments a \
     JOIN clients c ON c.id = a.client_id \
     JOIN troupes t ON t.id = a.troupe_id";

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a pool sized from `config` and, if enabled, runs the
    /// embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns a [`BookingError::Persistence`] if the connection or a
    /// migration fails.
    pub async fn connect(config: &BookingConfig) -> Result<Self, BookingError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await
            .map_err(|e| BookingError::Persistence(e.to_string()))?;

        if config.run_migrations {
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .map_err(|e| BookingError::Persistence(e.to_string()))?;
            tracing::info!("database migrations applied");
        }

        Ok(Self::new(pool))
    }

    async fn fetch_detail(
        &self,
        id: AppointmentId,
        scope: Option<OwnerScope>,
    ) -> Result<Option<AppointmentDetail>, BookingError> {
        let row = match scope {
            Some(scope) => {
                let (column, owner) = scope_column(scope);
                let sql = format!("{DETAIL_SELECT} WHERE a.id = $1 AND {column} = $2");
                sqlx::query_as::<_, AppointmentDetailRow>(&sql)
                    .bind(id)
                    .bind(owner)
                    .fetch_optional(&self.pool)
                    .await
            }
            None => {
                let sql = format!("{DETAIL_SELECT} WHERE a.id = $1");
                sqlx::query_as::<_, AppointmentDetailRow>(&sql)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await
            }
        }
        .map_err(|e| BookingError::Persistence(e.to_string()))?;

        row.map(AppointmentDetail::try_from).transpose()
    }
}

/// Maps a scope to its owner column and bound value.
fn scope_column(scope: OwnerScope) -> (&'static str, Uuid) {
    match scope {
        OwnerScope::Client(id) => ("a.client_id", id.into()),
        OwnerScope::Troupe(id) => ("a.troupe_id", id.into()),
    }
}

#[async_trait]
impl AppointmentRepository for PostgresStore {
    async fn insert_if_absent(
        &self,
        appointment: Appointment,
    ) -> Result<Appointment, BookingError> {
        let inserted = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO appointments (id, created_at, scheduled_at, client_id, troupe_id, status, rating) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (troupe_id, scheduled_at) DO NOTHING RETURNING id",
        )
        .bind(appointment.id)
        .bind(appointment.created_at)
        .bind(appointment.scheduled_at)
        .bind(appointment.client_id)
        .bind(appointment.troupe_id)
        .bind(appointment.status.as_str())
        .bind(appointment.rating.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BookingError::Persistence(e.to_string()))?;

        match inserted {
            Some(_) => Ok(appointment),
            None => Err(BookingError::Conflict(
                "an appointment with that date already exists".to_string(),
            )),
        }
    }

    async fn find_by_id(
        &self,
        id: AppointmentId,
    ) -> Result<Option<AppointmentDetail>, BookingError> {
        self.fetch_detail(id, None).await
    }

    async fn find_scoped(
        &self,
        id: AppointmentId,
        scope: OwnerScope,
    ) -> Result<Option<AppointmentDetail>, BookingError> {
        self.fetch_detail(id, Some(scope)).await
    }

    async fn find_by_owner(
        &self,
        scope: OwnerScope,
        filter: TimeFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<AppointmentDetail>, BookingError> {
        let (column, owner) = scope_column(scope);
        let window = match filter {
            TimeFilter::All => "",
            TimeFilter::Upcoming => " AND a.scheduled_at >= $2",
            TimeFilter::Past => " AND a.scheduled_at < $2",
        };
        let sql = format!(
            "{DETAIL_SELECT} WHERE {column} = $1{window} \
             ORDER BY a.scheduled_at DESC, a.created_at DESC"
        );

        let mut query = sqlx::query_as::<_, AppointmentDetailRow>(&sql).bind(owner);
        if filter != TimeFilter::All {
            query = query.bind(now);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| BookingError::Persistence(e.to_string()))?;

        rows.into_iter().map(AppointmentDetail::try_from).collect()
    }

    async fn update_fields(
        &self,
        id: AppointmentId,
        scope: OwnerScope,
        patch: AppointmentPatch,
    ) -> Result<Option<AppointmentDetail>, BookingError> {
        let (column, owner) = scope_column(scope);
        let result = match patch {
            AppointmentPatch::Status(status) => {
                let sql = format!(
                    "UPDATE appointments a SET status = $3 WHERE a.id = $1 AND {column} = $2"
                );
                sqlx::query(&sql)
                    .bind(id)
                    .bind(owner)
                    .bind(status.as_str())
                    .execute(&self.pool)
                    .await
            }
            AppointmentPatch::Rating(rating) => {
                let sql = format!(
                    "UPDATE appointments a SET rating = $3 WHERE a.id = $1 AND {column} = $2"
                );
                sqlx::query(&sql)
                    .bind(id)
                    .bind(owner)
                    .bind(rating)
                    .execute(&self.pool)
                    .await
            }
        }
        .map_err(|e| BookingError::Persistence(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.fetch_detail(id, Some(scope)).await
    }

    async fn append_issue(
        &self,
        issue: AppointmentIssue,
    ) -> Result<AppointmentIssue, BookingError> {
        sqlx::query(
            "INSERT INTO appointment_issues (id, appointment_id, clown_id, title, description) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(issue.id)
        .bind(issue.appointment_id)
        .bind(issue.clown_id)
        .bind(&issue.title)
        .bind(&issue.description)
        .execute(&self.pool)
        .await
        .map_err(|e| BookingError::Persistence(e.to_string()))?;

        Ok(issue)
    }

    async fn append_details_request(
        &self,
        request: ClientDetailsRequest,
    ) -> Result<ClientDetailsRequest, BookingError> {
        sqlx::query(
            "INSERT INTO client_details_requests (id, appointment_id, clown_id, reason, requested_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(request.id)
        .bind(request.appointment_id)
        .bind(request.clown_id)
        .bind(&request.reason)
        .bind(request.requested_at)
        .execute(&self.pool)
        .await
        .map_err(|e| BookingError::Persistence(e.to_string()))?;

        Ok(request)
    }
}

#[async_trait]
impl PartyDirectory for PostgresStore {
    async fn client(&self, id: ClientId) -> Result<Option<Client>, BookingError> {
        let row = sqlx::query_as::<_, ClientRow>(
            "SELECT id, user_id, contact_name, contact_email, contact_number \
             FROM clients WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BookingError::Persistence(e.to_string()))?;

        Ok(row.map(Client::from))
    }

    async fn troupe(&self, id: TroupeId) -> Result<Option<Troupe>, BookingError> {
        let row = sqlx::query_as::<_, TroupeRow>("SELECT id, name FROM troupes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| BookingError::Persistence(e.to_string()))?;

        Ok(row.map(Troupe::from))
    }

    async fn client_for_user(&self, user_id: UserId) -> Result<Option<Client>, BookingError> {
        let row = sqlx::query_as::<_, ClientRow>(
            "SELECT id, user_id, contact_name, contact_email, contact_number \
             FROM clients WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BookingError::Persistence(e.to_string()))?;

        Ok(row.map(Client::from))
    }

    async fn troupe_leader_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<TroupeLeader>, BookingError> {
        let row = sqlx::query_as::<_, TroupeLeaderRow>(
            "SELECT id, user_id, troupe_id FROM troupe_leaders WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BookingError::Persistence(e.to_string()))?;

        Ok(row.map(TroupeLeader::from))
    }

    async fn clown_for_user(&self, user_id: UserId) -> Result<Option<Clown>, BookingError> {
        let row = sqlx::query_as::<_, ClownRow>(
            "SELECT id, user_id, troupe_id, rank FROM clowns WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BookingError::Persistence(e.to_string()))?;

        Ok(row.map(Clown::from))
    }
}
