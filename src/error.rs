use crate::views::error_page;
use axum::{
    extract::rejection::{FormRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use snafu::Snafu;
use std::num::ParseIntError;

pub type RegistrarResult<T> = Result<T, RegistrarError>;
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum StoreError {
    #[snafu(display("Error opening database"))]
    OpenDatabase { source: sqlx::Error },
    #[snafu(display("Error migrating DB schema"))]
    Migrate { source: sqlx::migrate::MigrateError },
    #[snafu(display("Error making SQL query"))]
    MakeQuery { source: sqlx::Error },
    #[snafu(display("A student with ID {} already exists", id))]
    DuplicateId { id: String },
    #[snafu(display("Gave up generating a fresh student ID after {} attempts", attempts))]
    ExhaustedIds { attempts: usize },
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RegistrarError {
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse IP port"))]
    ParsePort { source: ParseIntError },
    #[snafu(display("Unable to parse maximum DB connections"))]
    ParseMaxConnections { source: ParseIntError },
    #[snafu(display("Unknown store kind {:?}, expected `postgres` or `memory`", kind))]
    UnknownStoreKind { kind: String },
    #[snafu(display("Unable to set up the student store"))]
    SetupStore { source: StoreError },
    #[snafu(display("Page not found!"))]
    ListStudents { source: StoreError },
    #[snafu(display("Student data not found!"))]
    FindStudent { source: StoreError },
    #[snafu(display("Student data not found!"))]
    MissingStudent { id: Option<String> },
    #[snafu(display("Student could not be added!"))]
    AddStudent { source: StoreError },
    #[snafu(display("Student could not be deleted"))]
    DeleteStudent { source: StoreError },
    #[snafu(display("Student data could not be updated"))]
    UpdateStudent { source: StoreError },
    #[snafu(display("{}", message))]
    MalformedForm {
        source: FormRejection,
        message: &'static str,
    },
    #[snafu(display("{}", message))]
    MalformedQuery {
        source: QueryRejection,
        message: &'static str,
    },
}

impl RegistrarError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingStudent { .. } => StatusCode::NOT_FOUND,
            Self::MalformedForm { source, .. } => source.status(),
            Self::MalformedQuery { source, .. } => source.status(),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RegistrarError {
    fn into_response(self) -> Response {
        match &self {
            Self::MissingStudent { id } => warn!(?id, "Student not found"),
            Self::MalformedForm { source, .. } => warn!(%source, "Rejected form"),
            Self::MalformedQuery { source, .. } => warn!(%source, "Rejected query"),
            _ => error!(?self, "Error!"),
        }

        (self.status_code(), error_page(&self.to_string())).into_response()
    }
}
