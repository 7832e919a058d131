use axum::{
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use tracing::{debug, info};

use crate::{
    AppState, csrf,
    entities::movie,
    error::{AppError, AppResult},
    forms::{AddMovieForm, EditMovieForm, FormErrors},
    models::IdQuery,
    ranking, templates,
};

pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let movies = ranking::recompute(&state.store).await?;
    Ok(Html(templates::index_page(&movies)))
}

pub async fn add_form(jar: SignedCookieJar) -> (SignedCookieJar, Html<String>) {
    let (jar, token) = csrf::issue(jar);
    (jar, Html(templates::add_page("", &FormErrors::default(), &token)))
}

pub async fn add_submit(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<AddMovieForm>,
) -> AppResult<Response> {
    csrf::verify(&jar, &form.csrf_token)?;

    let title = match form.validate() {
        Ok(title) => title,
        Err(errors) => {
            debug!(?errors, "add form rejected");
            let (jar, token) = csrf::issue(jar);
            let page = templates::add_page(&form.movie_title, &errors, &token);
            return Ok((jar, Html(page)).into_response());
        },
    };

    let results = state.tmdb.search_movie(&title).await?;
    Ok(Html(templates::select_page(&title, &results)).into_response())
}

pub async fn find(State(state): State<AppState>, Query(q): Query<IdQuery>) -> AppResult<Redirect> {
    if q.is_blank() {
        return Ok(Redirect::to("/"));
    }
    let tmdb_id = q.raw().trim();

    let details = state.tmdb.movie_details(tmdb_id).await?;
    let new_movie = details.into_new_movie(state.tmdb.image_base_url())?;
    let title = new_movie.title.clone();
    let movie = state.store.insert(new_movie).await.map_err(|err| match err {
        AppError::Conflict(_) => AppError::Conflict(format!("{title} is already in your list.")),
        other => other,
    })?;

    info!(movie_id = movie.id, tmdb_id = %tmdb_id, title = %movie.title, "added movie");
    Ok(Redirect::to(&format!("/edit?id={}", movie.id)))
}

pub async fn edit_form(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(q): Query<IdQuery>,
) -> AppResult<(SignedCookieJar, Html<String>)> {
    let movie = load_movie(&state, &q).await?;
    let (jar, token) = csrf::issue(jar);

    let rating = movie.rating.map(|r| r.to_string()).unwrap_or_default();
    let review = movie.review.clone().unwrap_or_default();
    let page = templates::edit_page(&movie, &rating, &review, &FormErrors::default(), &token);
    Ok((jar, Html(page)))
}

pub async fn edit_submit(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(q): Query<IdQuery>,
    Form(form): Form<EditMovieForm>,
) -> AppResult<Response> {
    let movie = load_movie(&state, &q).await?;
    csrf::verify(&jar, &form.csrf_token)?;

    match form.validate() {
        Ok(update) => {
            let movie = state.store.update_rating(movie, update).await?;
            info!(movie_id = movie.id, rating = ?movie.rating, "rated movie");
            Ok(Redirect::to("/").into_response())
        },
        Err(errors) => {
            debug!(movie_id = movie.id, ?errors, "edit form rejected");
            let (jar, token) = csrf::issue(jar);
            let page = templates::edit_page(&movie, &form.rating, &form.review, &errors, &token);
            Ok((jar, Html(page)).into_response())
        },
    }
}

pub async fn delete(State(state): State<AppState>, Query(q): Query<IdQuery>) -> AppResult<Redirect> {
    let movie = load_movie(&state, &q).await?;
    let (id, title) = (movie.id, movie.title.clone());
    state.store.delete(movie).await?;
    info!(movie_id = id, title = %title, "deleted movie");
    Ok(Redirect::to("/"))
}

async fn load_movie(state: &AppState, q: &IdQuery) -> AppResult<movie::Model> {
    let id: i32 = q.parsed().ok_or_else(|| AppError::not_found("movie", q.raw()))?;
    state.store.get(id).await
}
