//! Server-rendered pages
//!
//! Every value coming from the catalog goes through [`escape`] before it is
//! written into markup.

use std::fmt::Write;

use axum::http::StatusCode;

use crate::models::{Book, BorrowStatus, CatalogSummary};

/// Values shown in the create/edit form
#[derive(Debug, Clone, Default)]
pub struct FormValues {
    pub title: String,
    pub author: String,
    pub publication_year: String,
    pub publisher: String,
    pub borrowed: Option<BorrowStatus>,
}

impl From<&Book> for FormValues {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            publication_year: book.publication_year.to_string(),
            publisher: book.publisher.clone(),
            borrowed: Some(book.borrowed),
        }
    }
}

/// Escape text for use in element content and quoted attribute values.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} - Biblioteca</title>
  <link rel="stylesheet" href="/static/style.css">
</head>
<body>
  <nav>
    <a href="/">Inicio</a>
    <a href="/books">Libros</a>
    <a href="/books/create">Nuevo libro</a>
  </nav>
  <main>
{content}
  </main>
</body>
</html>
"#,
        title = escape(title),
        content = content,
    )
}

pub fn dashboard(summary: &CatalogSummary) -> String {
    let content = format!(
        r#"    <h1>Biblioteca</h1>
    <section class="stats">
      <div class="stat"><span class="value">{}</span><span class="label">Libros</span></div>
      <div class="stat"><span class="value">{}</span><span class="label">Disponibles</span></div>
      <div class="stat"><span class="value">{}</span><span class="label">Prestados</span></div>
    </section>"#,
        summary.total, summary.available, summary.borrowed
    );
    layout("Inicio", &content)
}

pub fn book_list(books: &[Book]) -> String {
    let mut rows = String::new();
    for book in books {
        let _ = write!(
            rows,
            r#"
        <tr>
          <td>{id}</td>
          <td>{title}</td>
          <td>{author}</td>
          <td>{year}</td>
          <td>{publisher}</td>
          <td>{borrowed}</td>
          <td>
            <a href="/books/edit/{id}">Editar</a>
            <a href="/books/delete/{id}" class="danger">Eliminar</a>
          </td>
        </tr>"#,
            id = book.id,
            title = escape(&book.title),
            author = escape(&book.author),
            year = book.publication_year,
            publisher = escape(&book.publisher),
            borrowed = book.borrowed,
        );
    }

    let body = if books.is_empty() {
        r#"    <p class="empty">No hay libros registrados.</p>"#.to_string()
    } else {
        format!(
            r#"    <table>
      <thead>
        <tr>
          <th>Id</th><th>Titulo</th><th>Autor</th><th>Año</th>
          <th>Editorial</th><th>Prestado</th><th></th>
        </tr>
      </thead>
      <tbody>{rows}
      </tbody>
    </table>"#
        )
    };

    layout("Libros", &format!("    <h1>Libros</h1>\n{}", body))
}

/// Create or edit form; `action` is the URL the form posts to.
pub fn book_form(heading: &str, action: &str, values: &FormValues, current_year: i32) -> String {
    let option = |status: BorrowStatus| {
        let selected = if values.borrowed == Some(status) { " selected" } else { "" };
        format!(r#"<option value="{0}"{1}>{0}</option>"#, status.as_str(), selected)
    };

    let content = format!(
        r#"    <h1>{heading}</h1>
    <form method="post" action="{action}">
      <label>Titulo <input type="text" name="Titulo" value="{title}" required></label>
      <label>Autor <input type="text" name="Autor" value="{author}" required></label>
      <label>Año de publicación
        <input type="number" name="AnioPublicacion" value="{year}" max="{current_year}" required>
      </label>
      <label>Editorial <input type="text" name="Editorial" value="{publisher}" required></label>
      <label>Prestado
        <select name="Prestado" required>
          {available}
          {borrowed}
        </select>
      </label>
      <button type="submit">Guardar</button>
    </form>"#,
        heading = escape(heading),
        action = escape(action),
        title = escape(&values.title),
        author = escape(&values.author),
        year = escape(&values.publication_year),
        publisher = escape(&values.publisher),
        current_year = current_year,
        available = option(BorrowStatus::Available),
        borrowed = option(BorrowStatus::Borrowed),
    );
    layout(heading, &content)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let content = format!(
        r#"    <h1>Error {}</h1>
    <p class="error">{}</p>
    <p><a href="/books">Volver a la lista</a></p>"#,
        status.as_u16(),
        escape(message)
    );
    layout("Error", &content)
}
