use crate::{
    data::{IdForm, student::StudentId},
    error::{DeleteStudentSnafu, MalformedFormSnafu, RegistrarResult},
    routes::redirect_home,
    state::RegistrarState,
    views,
};
use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    response::Response,
};
use maud::Markup;
use snafu::ResultExt;

pub async fn post_delete_confirmation(
    form: Result<Form<IdForm>, FormRejection>,
) -> RegistrarResult<Markup> {
    let Form(IdForm { id }) = form.context(MalformedFormSnafu {
        message: "Student could not be deleted",
    })?;

    Ok(views::delete_confirm(&StudentId::from(id)))
}

pub async fn post_delete(
    State(state): State<RegistrarState>,
    form: Result<Form<IdForm>, FormRejection>,
) -> RegistrarResult<Response> {
    let Form(IdForm { id }) = form.context(MalformedFormSnafu {
        message: "Student could not be deleted",
    })?;
    let id = StudentId::from(id);
    if state.delete_by_id(&id).await.context(DeleteStudentSnafu)? {
        info!(%id, "Student deleted");
    } else {
        warn!(%id, "Student to delete not found");
    }

    Ok(redirect_home())
}
