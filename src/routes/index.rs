use crate::{
    error::{ListStudentsSnafu, RegistrarResult},
    state::RegistrarState,
    views,
};
use axum::extract::State;
use maud::Markup;
use snafu::ResultExt;

pub async fn get_index_route(State(state): State<RegistrarState>) -> RegistrarResult<Markup> {
    let students = state.find_all().await.context(ListStudentsSnafu)?;
    debug!(count = students.len(), "Listing students");

    Ok(views::list_all(&students))
}
