use crate::{
    data::student::{Student, StudentDetails, StudentId},
    error::{ExhaustedIdsSnafu, StoreError, StoreResult},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStudentStore;
pub use postgres::PostgresStudentStore;

/// How many fresh IDs [`add_student`] tries before giving up.
pub const MAX_ID_ATTEMPTS: usize = 5;

/// Durable home of every [`Student`]. Implementations match records on the application-level
/// [`StudentId`], never on their own internal keys.
#[async_trait]
pub trait StudentStore: Debug + Send + Sync {
    /// Fails with [`StoreError::DuplicateId`] if the ID is already taken.
    async fn insert(&self, student: &Student) -> StoreResult<()>;

    /// Everything, in insertion order.
    async fn find_all(&self) -> StoreResult<Vec<Student>>;

    async fn find_by_id(&self, id: &StudentId) -> StoreResult<Option<Student>>;

    /// Overwrites the details of at most one matching record, returning it as updated.
    async fn update_by_id(
        &self,
        id: &StudentId,
        details: StudentDetails,
    ) -> StoreResult<Option<Student>>;

    /// Returns whether exactly one record was removed.
    async fn delete_by_id(&self, id: &StudentId) -> StoreResult<bool>;

    async fn close(&self);
}

/// Generates an ID and inserts a new student with it, regenerating on collision.
pub async fn add_student(
    store: &dyn StudentStore,
    details: StudentDetails,
) -> StoreResult<Student> {
    for _ in 0..MAX_ID_ATTEMPTS {
        let student = Student::new(StudentId::generate(), details.clone());
        match store.insert(&student).await {
            Ok(()) => return Ok(student),
            Err(StoreError::DuplicateId { id }) => {
                warn!(%id, "Generated student ID collided, retrying");
            }
            Err(e) => return Err(e),
        }
    }

    ExhaustedIdsSnafu {
        attempts: MAX_ID_ATTEMPTS,
    }
    .fail()
}
