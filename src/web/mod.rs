//! HTML form interface

pub mod books;
pub mod home;
pub mod views;

use axum::{
    extract::{
        rejection::{FormRejection, PathRejection},
        FromRequest, FromRequestParts,
    },
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};

use crate::{error::AppError, AppState};

/// Error rendered as an HTML page instead of a JSON body
#[derive(Debug)]
pub struct PageError(pub AppError);

pub type PageResult<T> = Result<T, PageError>;

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        self.0.log();
        let status = self.0.status();
        (status, Html(views::error_page(status, &self.0.public_message()))).into_response()
    }
}

impl From<AppError> for PageError {
    fn from(error: AppError) -> Self {
        PageError(error)
    }
}

impl From<FormRejection> for PageError {
    fn from(rejection: FormRejection) -> Self {
        PageError(rejection.into())
    }
}

impl From<PathRejection> for PageError {
    fn from(rejection: PathRejection) -> Self {
        PageError(rejection.into())
    }
}

/// Form extractor whose rejections render a 400 page
#[derive(FromRequest)]
#[from_request(via(axum::Form), rejection(PageError))]
pub struct WebForm<T>(pub T);

/// Path extractor whose rejections render a 400 page
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(PageError))]
pub struct WebPath<T>(pub T);

/// Routes of the HTML interface
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::dashboard))
        .route("/books", get(books::list_page))
        .route("/books/create", get(books::create_form).post(books::create_submit))
        .route("/books/edit/:id", get(books::edit_form).post(books::edit_submit))
        .route("/books/delete/:id", get(books::delete))
}
