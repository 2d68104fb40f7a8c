use crate::{
    data::student::{Student, StudentDetails, StudentId},
    error::{DuplicateIdSnafu, StoreResult},
    store::StudentStore,
};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Process-local store, lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStudentStore {
    students: RwLock<Vec<Student>>,
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn insert(&self, student: &Student) -> StoreResult<()> {
        let mut students = self.students.write().await;
        if students.iter().any(|existing| existing.id == student.id) {
            return DuplicateIdSnafu {
                id: student.id.to_string(),
            }
            .fail();
        }

        students.push(student.clone());
        Ok(())
    }

    async fn find_all(&self) -> StoreResult<Vec<Student>> {
        Ok(self.students.read().await.clone())
    }

    async fn find_by_id(&self, id: &StudentId) -> StoreResult<Option<Student>> {
        Ok(self
            .students
            .read()
            .await
            .iter()
            .find(|student| &student.id == id)
            .cloned())
    }

    async fn update_by_id(
        &self,
        id: &StudentId,
        details: StudentDetails,
    ) -> StoreResult<Option<Student>> {
        let mut students = self.students.write().await;
        Ok(students
            .iter_mut()
            .find(|student| &student.id == id)
            .map(|student| {
                student.apply(details);
                student.clone()
            }))
    }

    async fn delete_by_id(&self, id: &StudentId) -> StoreResult<bool> {
        let mut students = self.students.write().await;
        let Some(index) = students.iter().position(|student| &student.id == id) else {
            return Ok(false);
        };

        students.remove(index);
        Ok(true)
    }

    async fn close(&self) {
        debug!("Memory store closed");
    }
}
