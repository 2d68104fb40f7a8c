use maud::{Markup, Render, html};
use rand::Rng;
use serde::Deserialize;
use std::fmt::{Display, Formatter};

pub const ID_LENGTH: usize = 20;

/// Application-level identifier for a [`Student`], separate from whatever key the store uses
/// internally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(transparent)]
pub struct StudentId(String);

impl StudentId {
    /// Twenty independently uniform decimal digits. Not cryptographically secure.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let id = (0..ID_LENGTH)
            .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
            .collect();
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for StudentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for StudentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Render for StudentId {
    fn render(&self) -> Markup {
        html! { (self.0) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub father: String,
    pub email: String,
    pub age: String,
}

/// The mutable half of a student; every update overwrites all four fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StudentDetails {
    pub name: String,
    pub father: String,
    pub email: String,
    pub age: String,
}

impl Student {
    pub fn new(id: StudentId, details: StudentDetails) -> Self {
        let StudentDetails {
            name,
            father,
            email,
            age,
        } = details;

        Self {
            id,
            name,
            father,
            email,
            age,
        }
    }

    pub fn apply(&mut self, details: StudentDetails) {
        let StudentDetails {
            name,
            father,
            email,
            age,
        } = details;

        self.name = name;
        self.father = father;
        self.email = email;
        self.age = age;
    }
}

#[derive(Deserialize)]
pub struct UpdateStudentForm {
    pub id: String,
    #[serde(flatten)]
    pub details: StudentDetails,
}

#[derive(Deserialize)]
pub struct EditQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}
