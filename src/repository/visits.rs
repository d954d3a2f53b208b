//! Visits repository for database operations
//!
//! Every write runs inside an explicit transaction that is committed on
//! success; dropping the transaction on any other path rolls it back. State
//! transitions are single conditional UPDATEs whose predicate carries the
//! required current status, so a concurrent duplicate attempt affects zero
//! rows instead of corrupting the record.

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::VisitStatus,
        visit::{NewPending, NewWalkIn, Visit},
    },
    repository::map_db_err,
};

#[derive(Clone)]
pub struct VisitsRepository {
    pool: Pool<Postgres>,
    /// Table name from trusted configuration; the only non-bound query fragment
    table: String,
}

impl VisitsRepository {
    pub fn new(pool: Pool<Postgres>, table: String) -> Self {
        Self { pool, table }
    }

    /// Insert a walk-in visit, checked in as of now
    pub async fn insert_checked_in(&self, visit: &NewWalkIn) -> AppResult<Visit> {
        let sql = format!(
            r#"
            INSERT INTO {} (
                guest_first_name, guest_last_name, visitor_type, branch,
                department_visited, vendor_name, badge_number,
                host_employee_name, comments, check_in_time, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW(), $10)
            RETURNING *
            "#,
            self.table
        );

        let mut tx = self.pool.begin().await.map_err(map_db_err)?;
        let row = sqlx::query_as::<_, Visit>(&sql)
            .bind(&visit.guest_first_name)
            .bind(&visit.guest_last_name)
            .bind(&visit.visitor_type)
            .bind(&visit.branch)
            .bind(&visit.department_visited)
            .bind(&visit.vendor_name)
            .bind(&visit.badge_number)
            .bind(&visit.host_employee_name)
            .bind(&visit.comments)
            .bind(VisitStatus::CheckedIn.as_str())
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_err)?;
        tx.commit().await.map_err(map_db_err)?;

        Ok(row)
    }

    /// Insert a pre-registered visit, pending until promoted on arrival
    pub async fn insert_pending(&self, visit: &NewPending, badge: &str) -> AppResult<Visit> {
        let sql = format!(
            r#"
            INSERT INTO {} (
                guest_first_name, guest_last_name, visitor_type, branch,
                department_visited, vendor_name, badge_number,
                host_employee_name, comments, colleague_first_name,
                colleague_last_name, advance_check_in_time, submission_time,
                is_advance_check_in, submitter_ip_address, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, NOW(), TRUE, $13, $14)
            RETURNING *
            "#,
            self.table
        );

        let mut tx = self.pool.begin().await.map_err(map_db_err)?;
        let row = sqlx::query_as::<_, Visit>(&sql)
            .bind(&visit.guest_first_name)
            .bind(&visit.guest_last_name)
            .bind(&visit.visitor_type)
            .bind(&visit.branch)
            .bind(&visit.department_visited)
            .bind(&visit.vendor_name)
            .bind(badge)
            .bind(&visit.host_employee_name)
            .bind(&visit.comments)
            .bind(&visit.colleague_first_name)
            .bind(&visit.colleague_last_name)
            .bind(visit.advance_check_in_time)
            .bind(&visit.submitter_ip_address)
            .bind(VisitStatus::Pending.as_str())
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_err)?;
        tx.commit().await.map_err(map_db_err)?;

        Ok(row)
    }

    /// Promote a pending visit to checked-in, assigning a badge
    pub async fn promote_pending(&self, visitor_id: i32, badge: &str) -> AppResult<()> {
        let sql = format!(
            r#"
            UPDATE {}
            SET status = $1, check_in_time = NOW(), badge_number = $2
            WHERE visitor_id = $3 AND status = $4
            "#,
            self.table
        );

        let mut tx = self.pool.begin().await.map_err(map_db_err)?;
        let result = sqlx::query(&sql)
            .bind(VisitStatus::CheckedIn.as_str())
            .bind(badge)
            .bind(visitor_id)
            .bind(VisitStatus::Pending.as_str())
            .execute(&mut *tx)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected() == 0 {
            return Err(AppError::InvalidState(
                "Visitor not found or already checked in".to_string(),
            ));
        }

        tx.commit().await.map_err(map_db_err)?;
        Ok(())
    }

    /// Check out a checked-in visit
    pub async fn checkout(&self, visitor_id: i32) -> AppResult<()> {
        let sql = format!(
            r#"
            UPDATE {}
            SET status = $1, check_out_time = NOW()
            WHERE visitor_id = $2 AND status = $3
            "#,
            self.table
        );

        let mut tx = self.pool.begin().await.map_err(map_db_err)?;
        let result = sqlx::query(&sql)
            .bind(VisitStatus::CheckedOut.as_str())
            .bind(visitor_id)
            .bind(VisitStatus::CheckedIn.as_str())
            .execute(&mut *tx)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected() == 0 {
            return Err(AppError::InvalidState(
                "Visitor not found or already checked out".to_string(),
            ));
        }

        tx.commit().await.map_err(map_db_err)?;
        Ok(())
    }

    /// All non-pending visits, most recent check-in first
    pub async fn list_active(&self) -> AppResult<Vec<Visit>> {
        let sql = format!(
            "SELECT * FROM {} WHERE status != $1 ORDER BY check_in_time DESC",
            self.table
        );

        sqlx::query_as::<_, Visit>(&sql)
            .bind(VisitStatus::Pending.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_err)
    }

    /// All pending pre-registrations, soonest expected arrival first
    pub async fn list_pending(&self) -> AppResult<Vec<Visit>> {
        let sql = format!(
            "SELECT * FROM {} WHERE status = $1 ORDER BY advance_check_in_time ASC",
            self.table
        );

        sqlx::query_as::<_, Visit>(&sql)
            .bind(VisitStatus::Pending.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_err)
    }

    /// Badges held by currently checked-in visits
    pub async fn checked_in_badges(&self) -> AppResult<Vec<String>> {
        let sql = format!(
            "SELECT badge_number FROM {} WHERE status = $1 AND badge_number IS NOT NULL",
            self.table
        );

        sqlx::query_scalar::<_, String>(&sql)
            .bind(VisitStatus::CheckedIn.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_err)
    }

    /// Count of visitors currently checked in
    pub async fn count_checked_in(&self) -> AppResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE status = $1", self.table);

        sqlx::query_scalar::<_, i64>(&sql)
            .bind(VisitStatus::CheckedIn.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_err)
    }

    /// All visits whose check-in time falls in [start, end), most recent first
    pub async fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Visit>> {
        let sql = format!(
            r#"
            SELECT * FROM {}
            WHERE check_in_time >= $1 AND check_in_time < $2
            ORDER BY check_in_time DESC
            "#,
            self.table
        );

        sqlx::query_as::<_, Visit>(&sql)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_err)
    }
}
