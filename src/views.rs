//! The five pages the app can show. Every page goes through [`page`] for the shared layout.

use crate::{
    data::student::{Student, StudentId},
    maud_conveniences::{
        form_submit_button, link_button, render_table, simple_form_element, title,
    },
};
use maud::{DOCTYPE, Markup, html};

pub fn page(heading: &str, markup: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="UTF-8" {}
                meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                link rel="stylesheet" href="/public/style.css" {}
                title { "Students | " (heading) }
            }
            body class="bg-gray-900 min-h-screen flex flex-col items-center justify-center text-white" {
                div class="bg-gray-800 p-8 rounded shadow-md max-w-4xl w-full" {
                    (title(heading))
                    (markup)
                }
            }
        }
    }
}

pub fn list_all(students: &[Student]) -> Markup {
    let rows = students
        .iter()
        .map(|student| {
            [
                html! {(student.name)},
                html! {(student.father)},
                html! {(student.email)},
                html! {(student.age)},
                html! {(student.id)},
                html! {
                    div class="flex flex-row space-x-2" {
                        (link_button(&format!("/edit?userId={}", student.id), "slate", "Edit"))
                        form method="post" action="/delete-conf" {
                            input type="hidden" name="id" value=(student.id) {}
                            button type="submit" class="bg-red-600 hover:bg-red-800 font-bold py-2 px-4 rounded" {"Delete"}
                        }
                    }
                },
            ]
        })
        .collect();

    page(
        "All Students",
        html! {
            @if students.is_empty() {
                p class="italic mb-4" {"No students yet."}
            } @else {
                (render_table(["Name", "Father's Name", "Email", "Age", "ID", ""], rows))
            }
            div class="mt-4" {
                (link_button("/add", "blue", "Add Student"))
            }
        },
    )
}

pub fn add_form() -> Markup {
    page(
        "Add Student",
        html! {
            form method="post" action="/submit" class="p-4" {
                (simple_form_element("name", "Name", true, None, None))
                (simple_form_element("father", "Father's Name", true, None, None))
                (simple_form_element("email", "Email", true, None, None))
                (simple_form_element("age", "Age", true, None, None))
                (form_submit_button(Some("Add Student")))
            }
        },
    )
}

pub fn edit_form(student: &Student) -> Markup {
    page(
        "Edit Student",
        html! {
            form method="post" action="/update" class="p-4" {
                input type="hidden" name="id" value=(student.id) {}
                (simple_form_element("name", "Name", true, None, Some(&student.name)))
                (simple_form_element("father", "Father's Name", true, None, Some(&student.father)))
                (simple_form_element("email", "Email", true, None, Some(&student.email)))
                (simple_form_element("age", "Age", true, None, Some(&student.age)))
                (form_submit_button(Some("Update Student")))
            }
        },
    )
}

pub fn delete_confirm(id: &StudentId) -> Markup {
    page(
        "Delete Student",
        html! {
            p class="mb-4" {
                "Are you sure you want to delete the student with ID "
                span class="font-mono" {(id)}
                "?"
            }
            form method="post" action="/delete" class="flex flex-row space-x-4" {
                input type="hidden" name="id" value=(id) {}
                button type="submit" class="bg-red-600 hover:bg-red-800 font-bold py-2 px-4 rounded" {"Delete"}
                (link_button("/", "slate", "Cancel"))
            }
        },
    )
}

pub fn error_page(message: &str) -> Markup {
    page(
        "Error",
        html! {
            div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" role="alert" {
                strong class="font-bold" {"Error: "}
                span {(message)}
            }
            (link_button("/", "slate", "Back to all students"))
        },
    )
}
