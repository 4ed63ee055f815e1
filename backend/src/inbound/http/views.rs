//! Server-rendered pages.
//!
//! Every template extends `base.html`, which renders pending flash notices,
//! so each view model carries a `flashes` list.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::{self, ContentType};
use askama::Template;

use super::flash::FlashMessage;
use crate::domain::{Contact, Error};

/// Display form of a contact. A missing email renders as an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactView {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl From<Contact> for ContactView {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id().get(),
            name: contact.name().to_owned(),
            phone: contact.phone().to_owned(),
            email: contact.email().unwrap_or_default().to_owned(),
        }
    }
}

/// Contact list with the add form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub flashes: Vec<FlashMessage>,
    pub contacts: Vec<ContactView>,
}

/// Pre-filled edit form.
#[derive(Template)]
#[template(path = "update.html")]
pub struct UpdatePage {
    pub flashes: Vec<FlashMessage>,
    pub contact: ContactView,
}

/// Login form.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub flashes: Vec<FlashMessage>,
}

/// Logout confirmation.
#[derive(Template)]
#[template(path = "logout.html")]
pub struct LogoutPage {
    pub flashes: Vec<FlashMessage>,
}

/// Static CV page.
#[derive(Template)]
#[template(path = "cv.html")]
pub struct CvPage {
    pub flashes: Vec<FlashMessage>,
}

/// Dedicated 404 page.
#[derive(Template)]
#[template(path = "error404.html")]
pub struct NotFoundPage {
    pub flashes: Vec<FlashMessage>,
}

/// Generic error page for every other failure status.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub flashes: Vec<FlashMessage>,
    pub status: u16,
    pub message: String,
    pub trace_id: String,
}

/// Render `template` as an HTML response with `status`.
pub fn render<T: Template>(status: StatusCode, template: &T) -> Result<HttpResponse, Error> {
    let body = template
        .render()
        .map_err(|err| Error::internal(format!("template rendering failed: {err}")))?;
    Ok(HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body))
}

/// `303 See Other` pointing at `location`.
#[must_use]
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContactId;
    use rstest::rstest;

    #[rstest]
    fn index_escapes_contact_fields() {
        let page = IndexPage {
            flashes: vec![FlashMessage::success("Contact added successfully.")],
            contacts: vec![ContactView::from(Contact::new(
                ContactId::new(3),
                "<b>Ada</b>".to_owned(),
                "555".to_owned(),
                None,
            ))],
        };

        let html = page.render().expect("template renders");
        assert!(html.contains("&lt;b&gt;Ada&lt;/b&gt;"));
        assert!(html.contains("/update/3"));
        assert!(html.contains("flash-success"));
    }

    #[rstest]
    fn empty_index_says_so() {
        let page = IndexPage {
            flashes: Vec::new(),
            contacts: Vec::new(),
        };
        assert!(page.render().expect("renders").contains("No contacts yet."));
    }

    #[rstest]
    fn update_form_is_prefilled() {
        let page = UpdatePage {
            flashes: Vec::new(),
            contact: ContactView {
                id: 9,
                name: "Grace".to_owned(),
                phone: "555-0199".to_owned(),
                email: String::new(),
            },
        };
        let html = page.render().expect("renders");
        assert!(html.contains(r#"action="/update/9""#));
        assert!(html.contains(r#"value="555-0199""#));
    }
}
