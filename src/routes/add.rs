use crate::{
    data::student::StudentDetails,
    error::{AddStudentSnafu, MalformedFormSnafu, RegistrarResult},
    routes::redirect_home,
    state::RegistrarState,
    store::add_student,
    views,
};
use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    response::Response,
};
use maud::Markup;
use snafu::ResultExt;

pub async fn get_add_form() -> Markup {
    views::add_form()
}

pub async fn post_submit(
    State(state): State<RegistrarState>,
    form: Result<Form<StudentDetails>, FormRejection>,
) -> RegistrarResult<Response> {
    let Form(details) = form.context(MalformedFormSnafu {
        message: "Student could not be added!",
    })?;
    let student = add_student(&*state, details)
        .await
        .context(AddStudentSnafu)?;
    info!(id = %student.id, "Student added");

    Ok(redirect_home())
}
