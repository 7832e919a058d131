use axum::http::StatusCode;
use hypertext::prelude::*;

use crate::{entities::movie, forms::FormErrors, tmdb::SearchResult};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const INPUT_CLASS: &str = "mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";
const BUTTON_CLASS: &str =
    "w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700";

pub fn index_page(movies: &[movie::Model]) -> String {
    let body = maud! {
        div class="min-h-screen bg-gray-50" {
            div class="max-w-4xl mx-auto px-6 py-12" {
                div class="flex items-start justify-between gap-6" {
                    div {
                        h1 class="text-3xl font-bold text-gray-900" { "My Top Movies" }
                        p class="mt-2 text-gray-600" { "These are my all-time favourite movies." }
                    }
                    a class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" href="/add" { "Add Movie" }
                }

                @if movies.is_empty() {
                    div class="mt-10 bg-white shadow rounded-lg p-8" {
                        p class="text-gray-600" { "No movies yet. Add one to start your list." }
                    }
                } @else {
                    div class="mt-10 space-y-4" {
                        @for movie in movies {
                            div class="bg-white shadow rounded-lg p-6 flex gap-6" id={ "movie-" (movie.id.to_string()) } {
                                @if !movie.image_url.is_empty() {
                                    img class="w-32 rounded-md object-cover" src=(movie.image_url.as_str()) alt=(movie.title.as_str());
                                } @else {
                                    div class="poster-placeholder w-32 h-48 rounded-md bg-gray-200 flex items-center justify-center text-sm text-gray-500" { "No poster" }
                                }
                                div class="flex-1" {
                                    div class="flex items-start justify-between gap-4" {
                                        h2 class="text-xl font-semibold text-gray-900" {
                                            span class="ranking mr-2 text-gray-400" { (format_ranking(movie.ranking)) }
                                            (movie.title.as_str())
                                            span class="ml-2 font-normal text-gray-500" { "(" (movie.year.to_string()) ")" }
                                        }
                                        span class="rating text-lg font-semibold text-amber-600" { (format_rating(movie.rating)) }
                                    }
                                    @if let Some(review) = &movie.review {
                                        p class="review mt-2 italic text-gray-700" { "\u{201c}" (review.as_str()) "\u{201d}" }
                                    }
                                    p class="mt-2 text-sm text-gray-600" { (movie.description.as_str()) }
                                    div class="mt-4 flex gap-4 text-sm" {
                                        a class="text-blue-600 hover:text-blue-800" href={ "/edit?id=" (movie.id.to_string()) } { "Update" }
                                        a class="text-red-600 hover:text-red-800" href={ "/delete?id=" (movie.id.to_string()) } { "Delete" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
    .render()
    .into_inner();
    page("My Top Movies", body)
}

pub fn add_page(movie_title: &str, errors: &FormErrors, csrf_token: &str) -> String {
    let title_errors = errors.get("movie_title");
    let body = maud! {
        div class="min-h-screen bg-gray-50" {
            div class="max-w-2xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-3xl font-bold text-gray-900" { "Add a Movie" }
                    form class="mt-8 space-y-6" method="post" action="/add" {
                        input type="hidden" name="csrf_token" value=(csrf_token);
                        div {
                            label class="block text-sm font-medium text-gray-700" for="movie_title" { "Movie title" }
                            input class=(INPUT_CLASS) name="movie_title" id="movie_title" value=(movie_title);
                            @for message in title_errors {
                                p class="field-error mt-2 text-sm text-red-600" { (message.as_str()) }
                            }
                        }
                        button class=(BUTTON_CLASS) type="submit" { "Add Movie" }
                    }
                }
            }
        }
    }
    .render()
    .into_inner();
    page("Add Movie", body)
}

pub fn select_page(query: &str, results: &[SearchResult]) -> String {
    let body = maud! {
        div class="min-h-screen bg-gray-50" {
            div class="max-w-2xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-3xl font-bold text-gray-900" { "Select Movie" }
                    p class="mt-2 text-gray-600" { "Results for \u{201c}" (query) "\u{201d}" }
                    @if results.is_empty() {
                        p class="mt-6 text-gray-600" { "Nothing matched that title." }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/add" { "Try another search" }
                    } @else {
                        ul class="mt-6 divide-y divide-gray-200" {
                            @for result in results {
                                li class="py-3" {
                                    a class="text-blue-600 hover:text-blue-800" href={ "/find?id=" (result.id.to_string()) } {
                                        (result.title.as_str())
                                        " - "
                                        (result.year().map(|y| y.to_string()).unwrap_or_else(|| "unknown year".to_string()))
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
    .render()
    .into_inner();
    page("Select Movie", body)
}

pub fn edit_page(
    movie: &movie::Model,
    rating: &str,
    review: &str,
    errors: &FormErrors,
    csrf_token: &str,
) -> String {
    let rating_errors = errors.get("rating");
    let review_errors = errors.get("review");
    let body = maud! {
        div class="min-h-screen bg-gray-50" {
            div class="max-w-2xl mx-auto px-6 py-12" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-3xl font-bold text-gray-900" { (movie.title.as_str()) }
                    p class="mt-2 text-gray-600" { "Edit Movie Rating" }
                    form class="mt-8 space-y-6" method="post" action={ "/edit?id=" (movie.id.to_string()) } {
                        input type="hidden" name="csrf_token" value=(csrf_token);
                        div {
                            label class="block text-sm font-medium text-gray-700" for="rating" { "Your rating out of 10 e.g. 7.5" }
                            input class=(INPUT_CLASS) name="rating" id="rating" value=(rating);
                            @for message in rating_errors {
                                p class="field-error mt-2 text-sm text-red-600" { (message.as_str()) }
                            }
                        }
                        div {
                            label class="block text-sm font-medium text-gray-700" for="review" { "Your review" }
                            input class=(INPUT_CLASS) name="review" id="review" value=(review);
                            @for message in review_errors {
                                p class="field-error mt-2 text-sm text-red-600" { (message.as_str()) }
                            }
                        }
                        button class=(BUTTON_CLASS) type="submit" { "Done" }
                    }
                }
            }
        }
    }
    .render()
    .into_inner();
    page("Edit Movie", body)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let heading = status.canonical_reason().unwrap_or("Error");
    let body = maud! {
        div class="min-h-screen bg-gray-50 flex items-center justify-center" {
            div class="max-w-xl w-full px-6" {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-2xl font-bold text-gray-900" { (heading) }
                    p class="mt-4 text-gray-700" { (message) }
                    a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                }
            }
        }
    }
    .render()
    .into_inner();
    page("Error", body)
}

fn page(title: &str, body: String) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{title}</title><script src=\"{TAILWIND_CDN}\"></script></head>\
         <body>{body}</body></html>"
    )
}

fn format_rating(rating: Option<f64>) -> String {
    rating.map(|r| format!("{r}/10")).unwrap_or_else(|| "Not rated".to_string())
}

fn format_ranking(ranking: Option<i32>) -> String {
    ranking.map(|r| format!("#{r}")).unwrap_or_default()
}
