use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::NewProfile;
use crate::domain::account::models::PrincipalKind;
use crate::domain::account::models::Profile;
use crate::domain::account::models::ProfileDetails;
use crate::domain::account::models::ProfileId;
use crate::domain::account::ports::EntityStore;

const CUSTOMER_COLUMNS: &str =
    "id, email, password_hash, first_name, last_name, designation, address, dob, created_at";

const EMPLOYEE_COLUMNS: &str = "id, email, password_hash, first_name, last_name, designation, \
     address, dob, salary, position, created_at";

/// PostgreSQL-backed profile store.
///
/// Customers and employees live in separate tables (`customers`,
/// `employees`), each with a unique constraint on `email`.
pub struct PostgresEntityStore {
    pool: PgPool,
}

impl PostgresEntityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn table(kind: PrincipalKind) -> &'static str {
    match kind {
        PrincipalKind::Customer => "customers",
        PrincipalKind::Employee => "employees",
    }
}

fn columns(kind: PrincipalKind) -> &'static str {
    match kind {
        PrincipalKind::Customer => CUSTOMER_COLUMNS,
        PrincipalKind::Employee => EMPLOYEE_COLUMNS,
    }
}

fn database_error(e: sqlx::Error) -> AccountError {
    AccountError::Database(e.to_string())
}

fn profile_from_row(kind: PrincipalKind, row: &PgRow) -> Result<Profile, AccountError> {
    let (salary, position) = match kind {
        PrincipalKind::Customer => (None, None),
        PrincipalKind::Employee => (
            row.try_get("salary").map_err(database_error)?,
            row.try_get("position").map_err(database_error)?,
        ),
    };

    Ok(Profile {
        id: ProfileId(row.try_get("id").map_err(database_error)?),
        kind,
        email: EmailAddress::new(row.try_get("email").map_err(database_error)?)?,
        password_hash: row.try_get("password_hash").map_err(database_error)?,
        details: ProfileDetails {
            first_name: row.try_get("first_name").map_err(database_error)?,
            last_name: row.try_get("last_name").map_err(database_error)?,
            designation: row.try_get("designation").map_err(database_error)?,
            address: row.try_get("address").map_err(database_error)?,
            dob: row.try_get("dob").map_err(database_error)?,
            salary,
            position,
        },
        created_at: row.try_get("created_at").map_err(database_error)?,
    })
}

#[async_trait]
impl EntityStore for PostgresEntityStore {
    async fn find_by_email(
        &self,
        kind: PrincipalKind,
        email: &EmailAddress,
    ) -> Result<Option<Profile>, AccountError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE email = $1",
            columns(kind),
            table(kind)
        );

        let row = sqlx::query(&sql)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.map(|r| profile_from_row(kind, &r)).transpose()
    }

    async fn find_by_id(
        &self,
        kind: PrincipalKind,
        id: ProfileId,
    ) -> Result<Option<Profile>, AccountError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1",
            columns(kind),
            table(kind)
        );

        let row = sqlx::query(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.map(|r| profile_from_row(kind, &r)).transpose()
    }

    async fn create(&self, profile: NewProfile) -> Result<Profile, AccountError> {
        let details = &profile.details;

        let sql = match profile.kind {
            PrincipalKind::Customer => {
                r#"
                INSERT INTO customers
                    (email, password_hash, first_name, last_name, designation, address, dob)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id, created_at
                "#
            }
            PrincipalKind::Employee => {
                r#"
                INSERT INTO employees
                    (email, password_hash, first_name, last_name, designation, address, dob,
                     salary, position)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                RETURNING id, created_at
                "#
            }
        };

        let mut query = sqlx::query(sql)
            .bind(profile.email.as_str())
            .bind(&profile.password_hash)
            .bind(&details.first_name)
            .bind(&details.last_name)
            .bind(&details.designation)
            .bind(&details.address)
            .bind(details.dob);

        if profile.kind == PrincipalKind::Employee {
            query = query.bind(details.salary).bind(details.position.as_deref());
        }

        let row = query.fetch_one(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AccountError::DuplicateEmail(profile.email.to_string());
                }
            }
            database_error(e)
        })?;

        Ok(Profile {
            id: ProfileId(row.try_get("id").map_err(database_error)?),
            created_at: row.try_get("created_at").map_err(database_error)?,
            kind: profile.kind,
            email: profile.email,
            password_hash: profile.password_hash,
            details: profile.details,
        })
    }

    async fn list(&self, kind: PrincipalKind) -> Result<Vec<Profile>, AccountError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", columns(kind), table(kind));

        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.iter().map(|r| profile_from_row(kind, r)).collect()
    }
}
