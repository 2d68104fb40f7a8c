use crate::{
    config::DbConfig,
    data::student::{Student, StudentDetails, StudentId},
    error::{DuplicateIdSnafu, MakeQuerySnafu, MigrateSnafu, OpenDatabaseSnafu, StoreResult},
    store::StudentStore,
};
use async_trait::async_trait;
use futures::TryStreamExt;
use snafu::ResultExt;
use sqlx::{Pool, Postgres, postgres::PgPoolOptions};

/// Students as rows of `public.students`. The serial `pk` column fixes insertion order and never
/// leaves this module.
#[derive(Clone, Debug)]
pub struct PostgresStudentStore {
    pool: Pool<Postgres>,
}

impl PostgresStudentStore {
    pub async fn new(config: &DbConfig) -> StoreResult<Self> {
        Self::connect(&config.get_db_path(), config.max_connections()).await
    }

    pub async fn connect(url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .context(OpenDatabaseSnafu)?;

        sqlx::migrate!().run(&pool).await.context(MigrateSnafu)?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl StudentStore for PostgresStudentStore {
    async fn insert(&self, student: &Student) -> StoreResult<()> {
        let result = sqlx::query(
            "INSERT INTO public.students (id, name, father, email, age) VALUES ($1, $2, $3, $4, $5) ON CONFLICT (id) DO NOTHING",
        )
        .bind(&student.id)
        .bind(&student.name)
        .bind(&student.father)
        .bind(&student.email)
        .bind(&student.age)
        .execute(&self.pool)
        .await
        .context(MakeQuerySnafu)?;

        if result.rows_affected() == 0 {
            return DuplicateIdSnafu {
                id: student.id.to_string(),
            }
            .fail();
        }
        Ok(())
    }

    async fn find_all(&self) -> StoreResult<Vec<Student>> {
        sqlx::query_as::<_, Student>(
            "SELECT id, name, father, email, age FROM public.students ORDER BY pk",
        )
        .fetch(&self.pool)
        .try_collect::<Vec<_>>()
        .await
        .context(MakeQuerySnafu)
    }

    async fn find_by_id(&self, id: &StudentId) -> StoreResult<Option<Student>> {
        sqlx::query_as::<_, Student>(
            "SELECT id, name, father, email, age FROM public.students WHERE id = $1 LIMIT 1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context(MakeQuerySnafu)
    }

    async fn update_by_id(
        &self,
        id: &StudentId,
        details: StudentDetails,
    ) -> StoreResult<Option<Student>> {
        let StudentDetails {
            name,
            father,
            email,
            age,
        } = details;

        sqlx::query_as::<_, Student>(
            "UPDATE public.students SET name = $2, father = $3, email = $4, age = $5 WHERE pk = (SELECT pk FROM public.students WHERE id = $1 LIMIT 1) RETURNING id, name, father, email, age",
        )
        .bind(id)
        .bind(name)
        .bind(father)
        .bind(email)
        .bind(age)
        .fetch_optional(&self.pool)
        .await
        .context(MakeQuerySnafu)
    }

    async fn delete_by_id(&self, id: &StudentId) -> StoreResult<bool> {
        let result = sqlx::query(
            "DELETE FROM public.students WHERE pk = (SELECT pk FROM public.students WHERE id = $1 LIMIT 1)",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .context(MakeQuerySnafu)?;

        Ok(result.rows_affected() == 1)
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}
