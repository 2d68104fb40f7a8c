use crate::{
    routes::{
        add::{get_add_form, post_submit},
        delete::{post_delete, post_delete_confirmation},
        edit::{get_edit_form, post_update},
        index::get_index_route,
    },
    state::RegistrarState,
};
use axum::{
    Router,
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;

pub mod add;
pub mod delete;
pub mod edit;
pub mod index;

/// `302 Found` back to the student list. axum's `Redirect` only offers 303/307/308.
pub fn redirect_home() -> Response {
    (StatusCode::FOUND, [(LOCATION, "/")]).into_response()
}

pub fn router(state: RegistrarState, public_dir: &str) -> Router {
    Router::new()
        .route("/", get(get_index_route))
        .route("/add", get(get_add_form))
        .route("/edit", get(get_edit_form))
        .route("/submit", post(post_submit))
        .route("/delete-conf", post(post_delete_confirmation))
        .route("/delete", post(post_delete))
        .route("/update", post(post_update))
        .nest_service("/public", ServeDir::new(public_dir))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::student::{Student, StudentDetails, StudentId},
        error::{MakeQuerySnafu, StoreResult},
        store::{MemoryStudentStore, StudentStore},
    };
    use async_trait::async_trait;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, header::CONTENT_TYPE},
    };
    use snafu::IntoError;
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Fails every operation as if the database had gone away.
    #[derive(Debug)]
    struct BrokenStore;

    fn pool_closed<T>() -> StoreResult<T> {
        Err(MakeQuerySnafu.into_error(sqlx::Error::PoolClosed))
    }

    #[async_trait]
    impl StudentStore for BrokenStore {
        async fn insert(&self, _student: &Student) -> StoreResult<()> {
            pool_closed()
        }

        async fn find_all(&self) -> StoreResult<Vec<Student>> {
            pool_closed()
        }

        async fn find_by_id(&self, _id: &StudentId) -> StoreResult<Option<Student>> {
            pool_closed()
        }

        async fn update_by_id(
            &self,
            _id: &StudentId,
            _details: StudentDetails,
        ) -> StoreResult<Option<Student>> {
            pool_closed()
        }

        async fn delete_by_id(&self, _id: &StudentId) -> StoreResult<bool> {
            pool_closed()
        }

        async fn close(&self) {}
    }

    fn app(store: Arc<dyn StudentStore>) -> Router {
        router(RegistrarState::from_store(store), "public")
    }

    async fn get_page(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn post_form(app: Router, uri: &str, form: &str) -> Response {
        app.oneshot(
            Request::post(uri)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    async fn assert_error_page(response: Response, message: &str) {
        assert!(response.status().is_client_error());
        assert!(
            response.headers()[CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
        let body = body_string(response).await;
        assert!(body.contains(message));
        assert!(body.contains("<!DOCTYPE html>"));
    }

    fn assert_redirects_home(response: &Response) {
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[LOCATION], "/");
    }

    async fn seeded() -> (Arc<MemoryStudentStore>, Student) {
        let store = Arc::new(MemoryStudentStore::default());
        let student = Student::new(
            StudentId::from("11111111111111111111".to_string()),
            StudentDetails {
                name: "Ann".into(),
                father: "Bob".into(),
                email: "a@b.com".into(),
                age: "10".into(),
            },
        );
        store.insert(&student).await.unwrap();
        (store, student)
    }

    #[tokio::test]
    async fn submit_then_list_shows_new_student() {
        let store = Arc::new(MemoryStudentStore::default());

        let response = post_form(
            app(store.clone()),
            "/submit",
            "name=Ann&father=Bob&email=a%40b.com&age=10",
        )
        .await;
        assert_redirects_home(&response);

        let students = store.find_all().await.unwrap();
        assert_eq!(students.len(), 1);
        let student = &students[0];
        assert_eq!(student.id.as_str().len(), 20);
        assert!(student.id.as_str().bytes().all(|b| b.is_ascii_digit()));
        assert_eq!(
            (
                student.name.as_str(),
                student.father.as_str(),
                student.email.as_str(),
                student.age.as_str()
            ),
            ("Ann", "Bob", "a@b.com", "10")
        );

        let (status, body) = get_page(app(store.clone()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Ann"));
        assert!(body.contains(student.id.as_str()));
    }

    #[tokio::test]
    async fn submit_missing_field_is_rejected() {
        let store = Arc::new(MemoryStudentStore::default());

        let response = post_form(app(store.clone()), "/submit", "name=Ann&father=Bob").await;
        assert_error_page(response, "Student could not be added!").await;
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_confirmation_without_id_renders_error_page() {
        let response = post_form(
            app(Arc::new(MemoryStudentStore::default())),
            "/delete-conf",
            "",
        )
        .await;
        assert_error_page(response, "Student could not be deleted").await;
    }

    #[tokio::test]
    async fn delete_without_id_renders_error_page() {
        let (store, student) = seeded().await;

        let response = post_form(app(store.clone()), "/delete", "").await;
        assert_error_page(response, "Student could not be deleted").await;
        assert_eq!(store.find_all().await.unwrap(), vec![student]);
    }

    #[tokio::test]
    async fn update_missing_field_renders_error_page() {
        let (store, student) = seeded().await;

        let response = post_form(
            app(store.clone()),
            "/update",
            &format!("id={}&name=Anne", student.id),
        )
        .await;
        assert_error_page(response, "Student data could not be updated").await;
        assert_eq!(store.find_all().await.unwrap(), vec![student]);
    }

    #[tokio::test]
    async fn edit_with_malformed_query_renders_error_page() {
        let (store, student) = seeded().await;

        let response = app(store)
            .oneshot(
                Request::get(format!("/edit?userId={0}&userId={0}", student.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_error_page(response, "Student data not found!").await;
    }

    #[tokio::test]
    async fn submit_failure_renders_error_page() {
        let response = post_form(
            app(Arc::new(BrokenStore)),
            "/submit",
            "name=Ann&father=Bob&email=a%40b.com&age=10",
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_string(response).await.contains("Student could not be added!"));
    }

    #[tokio::test]
    async fn list_failure_renders_error_page() {
        let (status, body) = get_page(app(Arc::new(BrokenStore)), "/").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("Page not found!"));
    }

    #[tokio::test]
    async fn add_form_posts_to_submit() {
        let (status, body) = get_page(app(Arc::new(MemoryStudentStore::default())), "/add").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"action="/submit""#));
    }

    #[tokio::test]
    async fn edit_shows_current_values() {
        let (store, student) = seeded().await;

        let (status, body) = get_page(app(store), &format!("/edit?userId={}", student.id)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"value="Ann""#));
        assert!(body.contains(r#"value="Bob""#));
        assert!(body.contains(r#"value="a@b.com""#));
        assert!(body.contains(r#"value="10""#));
        assert!(body.contains(student.id.as_str()));
    }

    #[tokio::test]
    async fn edit_unknown_student_renders_error_page() {
        let (store, _) = seeded().await;

        let (status, body) = get_page(app(store.clone()), "/edit?userId=nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Student data not found!"));

        let (status, body) = get_page(app(store), "/edit").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Student data not found!"));
    }

    #[tokio::test]
    async fn edit_failure_renders_error_page() {
        let (status, body) = get_page(app(Arc::new(BrokenStore)), "/edit?userId=1").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("Student data not found!"));
    }

    #[tokio::test]
    async fn delete_confirmation_carries_id() {
        let response = post_form(
            app(Arc::new(MemoryStudentStore::default())),
            "/delete-conf",
            "id=12345",
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains(r#"action="/delete""#));
        assert!(body.contains(r#"value="12345""#));
    }

    #[tokio::test]
    async fn delete_removes_exactly_one() {
        let (store, student) = seeded().await;
        let other = Student::new(
            StudentId::from("22222222222222222222".to_string()),
            StudentDetails {
                name: "Cat".into(),
                father: "Dan".into(),
                email: "c@d.com".into(),
                age: "12".into(),
            },
        );
        store.insert(&other).await.unwrap();

        let response =
            post_form(app(store.clone()), "/delete", &format!("id={}", student.id)).await;
        assert_redirects_home(&response);
        assert_eq!(store.find_all().await.unwrap(), vec![other]);
    }

    #[tokio::test]
    async fn delete_unknown_student_still_redirects() {
        let (store, _) = seeded().await;
        let before = store.find_all().await.unwrap();

        let response = post_form(app(store.clone()), "/delete", "id=00000000000000000000").await;
        assert_redirects_home(&response);
        assert_eq!(store.find_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn delete_failure_renders_error_page() {
        let response = post_form(app(Arc::new(BrokenStore)), "/delete", "id=1").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_string(response).await.contains("Student could not be deleted"));
    }

    #[tokio::test]
    async fn update_replaces_details_and_keeps_id() {
        let (store, student) = seeded().await;
        let form = format!(
            "id={}&name=Anne&father=Robert&email=anne%40b.com&age=11",
            student.id
        );

        let response = post_form(app(store.clone()), "/update", &form).await;
        assert_redirects_home(&response);

        let expected = Student::new(
            student.id.clone(),
            StudentDetails {
                name: "Anne".into(),
                father: "Robert".into(),
                email: "anne@b.com".into(),
                age: "11".into(),
            },
        );
        assert_eq!(store.find_all().await.unwrap(), vec![expected.clone()]);

        let response = post_form(app(store.clone()), "/update", &form).await;
        assert_redirects_home(&response);
        assert_eq!(store.find_all().await.unwrap(), vec![expected]);
    }

    #[tokio::test]
    async fn update_unknown_student_still_redirects() {
        let (store, _) = seeded().await;
        let before = store.find_all().await.unwrap();

        let response = post_form(
            app(store.clone()),
            "/update",
            "id=00000000000000000000&name=X&father=Y&email=z&age=1",
        )
        .await;
        assert_redirects_home(&response);
        assert_eq!(store.find_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn update_failure_renders_error_page() {
        let response = post_form(
            app(Arc::new(BrokenStore)),
            "/update",
            "id=1&name=X&father=Y&email=z&age=1",
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(
            body_string(response)
                .await
                .contains("Student data could not be updated")
        );
    }
}
