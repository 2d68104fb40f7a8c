use crate::{
    data::student::{EditQuery, StudentId, UpdateStudentForm},
    error::{
        FindStudentSnafu, MalformedFormSnafu, MalformedQuerySnafu, MissingStudentSnafu,
        RegistrarResult, UpdateStudentSnafu,
    },
    routes::redirect_home,
    state::RegistrarState,
    views,
};
use axum::{
    Form,
    extract::{
        Query, State,
        rejection::{FormRejection, QueryRejection},
    },
    response::Response,
};
use maud::Markup;
use snafu::{OptionExt, ResultExt};

pub async fn get_edit_form(
    State(state): State<RegistrarState>,
    query: Result<Query<EditQuery>, QueryRejection>,
) -> RegistrarResult<Markup> {
    let Query(EditQuery { user_id }) = query.context(MalformedQuerySnafu {
        message: "Student data not found!",
    })?;
    let id = StudentId::from(user_id.context(MissingStudentSnafu { id: None::<String> })?);
    let student = state
        .find_by_id(&id)
        .await
        .context(FindStudentSnafu)?
        .context(MissingStudentSnafu {
            id: Some(id.to_string()),
        })?;

    Ok(views::edit_form(&student))
}

/// A missing student is only logged; the client is sent home either way.
pub async fn post_update(
    State(state): State<RegistrarState>,
    form: Result<Form<UpdateStudentForm>, FormRejection>,
) -> RegistrarResult<Response> {
    let Form(UpdateStudentForm { id, details }) = form.context(MalformedFormSnafu {
        message: "Student data could not be updated",
    })?;
    let id = StudentId::from(id);
    match state
        .update_by_id(&id, details)
        .await
        .context(UpdateStudentSnafu)?
    {
        Some(student) => info!(id = %student.id, "Student updated"),
        None => warn!(%id, "No student was updated"),
    }

    Ok(redirect_home())
}
