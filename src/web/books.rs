//! Book pages: listing, create/edit forms and delete

use axum::{
    extract::State,
    response::{Html, Redirect},
};
use chrono::Datelike;
use serde::Deserialize;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BorrowStatus, NewBook},
};

use super::{
    views::{self, FormValues},
    PageResult, WebForm, WebPath,
};

const LIST_PATH: &str = "/books";

/// Submitted create/edit form. Missing fields arrive as empty strings.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct BookForm {
    #[serde(rename = "Autor", default)]
    #[validate(length(min = 1, message = "Autor is required"))]
    pub author: String,
    #[serde(rename = "Titulo", default)]
    #[validate(length(min = 1, message = "Titulo is required"))]
    pub title: String,
    #[serde(rename = "AnioPublicacion", default)]
    #[validate(length(min = 1, message = "AnioPublicacion is required"))]
    pub publication_year: String,
    #[serde(rename = "Editorial", default)]
    #[validate(length(min = 1, message = "Editorial is required"))]
    pub publisher: String,
    #[serde(rename = "Prestado", default)]
    #[validate(length(min = 1, message = "Prestado is required"))]
    pub borrowed: String,
}

impl BookForm {
    /// Check presence of every field, then parse the typed ones.
    pub fn into_new_book(self) -> AppResult<NewBook> {
        self.validate()?;

        let publication_year = self.publication_year.parse::<i32>().map_err(|_| {
            AppError::Validation("AnioPublicacion must be a valid number".to_string())
        })?;
        let borrowed = self
            .borrowed
            .parse::<BorrowStatus>()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        Ok(NewBook {
            title: self.title,
            author: self.author,
            publication_year,
            publisher: self.publisher,
            borrowed,
        })
    }
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Full listing of the catalog
pub async fn list_page(State(state): State<crate::AppState>) -> PageResult<Html<String>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Html(views::book_list(&books)))
}

pub async fn create_form() -> Html<String> {
    Html(views::book_form(
        "Nuevo libro",
        "/books/create",
        &FormValues::default(),
        current_year(),
    ))
}

pub async fn create_submit(
    State(state): State<crate::AppState>,
    WebForm(form): WebForm<BookForm>,
) -> PageResult<Redirect> {
    let data = form.into_new_book()?;
    state.services.catalog.create_book(&data).await?;
    Ok(Redirect::to(LIST_PATH))
}

pub async fn edit_form(
    State(state): State<crate::AppState>,
    WebPath(id): WebPath<i32>,
) -> PageResult<Html<String>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Html(views::book_form(
        "Editar libro",
        &format!("/books/edit/{}", id),
        &FormValues::from(&book),
        current_year(),
    )))
}

pub async fn edit_submit(
    State(state): State<crate::AppState>,
    WebPath(id): WebPath<i32>,
    WebForm(form): WebForm<BookForm>,
) -> PageResult<Redirect> {
    let book = Book::with_id(id, form.into_new_book()?);
    state.services.catalog.update_book(&book).await?;
    Ok(Redirect::to(LIST_PATH))
}

pub async fn delete(
    State(state): State<crate::AppState>,
    WebPath(id): WebPath<i32>,
) -> PageResult<Redirect> {
    state.services.catalog.delete_book(id).await?;
    Ok(Redirect::to(LIST_PATH))
}
