use maud::{DOCTYPE, Markup, html};

use crate::{
    models::{FieldError, Film, Genre, Rating},
    mutation::DELETE_PURPOSE,
    validation::{FIELDS, FilmForm},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const TITLE_RANGES: [(&str, &str); 4] = [("AF", "A–F"), ("GL", "G–L"), ("MR", "M–R"), ("SZ", "S–Z")];

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const BUTTON_CLASS: &str =
    "rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";
const LINK_CLASS: &str = "text-blue-600 hover:text-blue-800";

pub fn index_page(genres: &[Genre]) -> String {
    page(
        "FilmFlix",
        html! {
            h1 class="text-3xl font-bold text-gray-900" { "FilmFlix" }
            p class="mt-2 text-gray-600" { "Browse the film inventory by genre." }

            @if genres.is_empty() {
                p class="mt-8 text-gray-600" { "No films in the inventory yet." }
            } @else {
                ul class="mt-8 grid grid-cols-2 gap-3 md:grid-cols-3" {
                    @for genre in genres {
                        li {
                            a class=(LINK_CLASS) href=(inventory_href(*genre)) { (genre.as_str()) }
                        }
                    }
                }
            }

            h2 class="mt-10 text-xl font-semibold text-gray-900" { "Edit or delete a film" }
            div class="mt-4 flex gap-4" {
                @for (letters, label) in TITLE_RANGES {
                    a class=(LINK_CLASS) href=(format!("/select_record/{letters}")) { (label) }
                }
            }

            a class=(format!("mt-10 inline-block {BUTTON_CLASS}")) href="/add_record" { "Add a film" }
        },
    )
}

pub fn inventory_page(genre: &str, films: &[Film]) -> String {
    page(
        &format!("{genre} films"),
        html! {
            h1 class="text-3xl font-bold text-gray-900" { (genre) " films" }

            @if films.is_empty() {
                p class="mt-8 text-gray-600" { "No films found for this genre." }
            } @else {
                table class="mt-8 w-full text-left" {
                    thead {
                        tr class="border-b text-sm text-gray-500" {
                            th class="py-2" { "Title" }
                            th { "Year" }
                            th { "Rating" }
                            th { "Duration" }
                        }
                    }
                    tbody {
                        @for film in films {
                            tr class="border-b text-gray-800" {
                                td class="py-2" { (film.title) }
                                td { (film.year_released) }
                                td { (film.rating.as_str()) }
                                td { (film.duration) " mins" }
                            }
                        }
                    }
                }
            }
            (back_link())
        },
    )
}

pub fn add_page(form: &FilmForm, errors: &[FieldError], message: Option<&str>) -> String {
    page(
        "Add a film",
        html! {
            h1 class="text-3xl font-bold text-gray-900" { "Add a film" }
            @if let Some(message) = message {
                p class="mt-4 rounded-md bg-green-50 p-4 text-green-800" { (message) }
            }
            (error_list(errors))
            (film_form("/add_record", None, form, errors))
            (back_link())
        },
    )
}

pub fn select_page(letters: &str, films: &[Film]) -> String {
    page(
        "Select a film",
        html! {
            h1 class="text-3xl font-bold text-gray-900" { "Films from " (letters) }

            @if films.is_empty() {
                p class="mt-8 text-gray-600" { "No films in this range." }
            } @else {
                ul class="mt-8 space-y-4" {
                    @for film in films {
                        li class="bg-white shadow rounded-lg p-4" {
                            form class="flex items-center justify-between gap-4" method="post" action="/edit_or_delete" {
                                span class="font-medium text-gray-900" {
                                    (film.title)
                                    span class="ml-2 font-normal text-gray-500" { "(" (film.year_released) ")" }
                                }
                                input type="hidden" name="id" value=(film.id);
                                div class="flex items-center gap-3" {
                                    label { input type="radio" name="choice" value="edit" checked; " Edit" }
                                    label { input type="radio" name="choice" value="delete"; " Delete" }
                                    button class=(BUTTON_CLASS) type="submit" { "Go" }
                                }
                            }
                        }
                    }
                }
            }
            (back_link())
        },
    )
}

pub fn edit_page(id: i32, form: &FilmForm, errors: &[FieldError]) -> String {
    page(
        "Edit a film",
        html! {
            h1 class="text-3xl font-bold text-gray-900" { "Edit " (form.title) }
            (error_list(errors))
            (film_form("/edit_result", Some(id), form, errors))
            (back_link())
        },
    )
}

pub fn delete_page(film: &Film) -> String {
    page(
        "Delete a film",
        html! {
            h1 class="text-3xl font-bold text-gray-900" { "Delete " (film.title) "?" }
            p class="mt-2 text-gray-600" {
                (film.year_released) " · " (film.rating.as_str()) " · " (film.duration) " mins · " (film.genre.as_str())
            }
            form class="mt-8" method="post" action="/delete_result" {
                input type="hidden" name="id_field" value=(film.id);
                input type="hidden" name="purpose" value=(DELETE_PURPOSE);
                button class="rounded-md bg-red-600 px-4 py-2 font-semibold text-white hover:bg-red-700" type="submit" {
                    "Delete This Film"
                }
            }
            (back_link())
        },
    )
}

pub fn result_page(message: &str) -> String {
    page(
        "Result",
        html! {
            h1 class="text-2xl font-bold text-gray-900" { "Done" }
            p class="mt-4 text-gray-700" { (message) }
            (back_link())
        },
    )
}

pub fn error_page(title: &str, heading: &str, description: &str) -> String {
    page(
        title,
        html! {
            h1 class="text-2xl font-bold text-gray-900" { (heading) }
            p class="mt-4 text-gray-700" { "The error:" br; (description) }
            (back_link())
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body class="min-h-screen bg-gray-50" {
                div class="max-w-3xl mx-auto px-6 py-12" { (body) }
            }
        }
    }
    .into_string()
}

fn back_link() -> Markup {
    html! { a class=(format!("mt-8 block {LINK_CLASS}")) href="/" { "Back" } }
}

fn inventory_href(genre: Genre) -> String {
    format!("/inventory/{}", urlencoding::encode(genre.as_str()))
}

fn error_list(errors: &[FieldError]) -> Markup {
    html! {
        @if !errors.is_empty() {
            ul class="mt-4 rounded-md bg-red-50 p-4 text-sm text-red-800" {
                @for error in errors {
                    li { (error.to_string()) }
                }
            }
        }
    }
}

fn film_form(action: &str, id: Option<i32>, form: &FilmForm, errors: &[FieldError]) -> Markup {
    let [title, year, rating, duration, genre] = FIELDS;

    html! {
        form class="mt-8 space-y-6" method="post" action=(action) {
            @if let Some(id) = id {
                input type="hidden" name="id_field" value=(id);
            }

            (field(title, errors, html! {
                input class=(INPUT_CLASS) name=(title.0) id=(title.0) value=(form.title) maxlength="150" required;
            }))
            (field(year, errors, html! {
                input class=(INPUT_CLASS) name=(year.0) id=(year.0) value=(form.year_released) type="number" required;
            }))
            (field(rating, errors, html! {
                select class=(INPUT_CLASS) name=(rating.0) id=(rating.0) required {
                    option value="" {}
                    @for r in Rating::ALL {
                        option value=(r.as_str()) selected[form.rating == r.as_str()] { (r.as_str()) }
                    }
                }
            }))
            (field(duration, errors, html! {
                input class=(INPUT_CLASS) name=(duration.0) id=(duration.0) value=(form.duration) type="number" required;
            }))
            (field(genre, errors, html! {
                select class=(INPUT_CLASS) name=(genre.0) id=(genre.0) required {
                    option value="" {}
                    @for g in Genre::ALL {
                        option value=(g.as_str()) selected[form.genre == g.as_str()] { (g.as_str()) }
                    }
                }
            }))

            button class=(BUTTON_CLASS) type="submit" { "Add/Update Record" }
        }
    }
}

fn field((name, label): (&str, &str), errors: &[FieldError], input: Markup) -> Markup {
    html! {
        div {
            label class="block text-sm font-medium text-gray-700" for=(name) { (label) }
            (input)
            @for error in errors.iter().filter(|e| e.field == name) {
                p class="mt-2 text-xs text-red-700" { (error.message) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn film_form_echoes_input_and_marks_choices() {
        let form = FilmForm {
            title: "Alien3".to_string(),
            year_released: "1992".to_string(),
            rating: "15".to_string(),
            duration: "114".to_string(),
            genre: "Sci-Fi".to_string(),
        };
        let errors = vec![FieldError {
            field: "title",
            label: "Film title",
            message: "Invalid film name".to_string(),
        }];

        let html = add_page(&form, &errors, None);
        assert!(html.contains(r#"value="Alien3""#));
        assert!(html.contains(r#"<option value="15" selected>"#));
        assert!(html.contains(r#"<option value="Sci-Fi" selected>"#));
        assert!(html.contains("Error in Film title: Invalid film name"));
    }

    #[test]
    fn index_links_genres_by_name() {
        let html = index_page(&[Genre::RomCom]);
        assert!(html.contains(r#"href="/inventory/Rom-Com""#));
        assert!(html.contains(r#"href="/select_record/AF""#));
    }

    #[test]
    fn titles_are_escaped() {
        let html = result_page("<script>");
        assert!(html.contains("&lt;script&gt;"));
    }
}
