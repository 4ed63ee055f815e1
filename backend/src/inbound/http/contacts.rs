//! Contact handlers.
//!
//! ```text
//! GET  /              list contacts with the add form
//! POST /add           create a contact
//! GET  /update/{id}   pre-filled edit form
//! POST /update/{id}   overwrite a contact
//! POST /delete/{id}   delete a contact
//! ```
//!
//! Every handler takes an [`AuthenticatedUser`] first so anonymous requests
//! are redirected before the form body is read.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::{debug, info};

use super::auth::AuthenticatedUser;
use super::flash::{FlashMessage, notices};
use super::session::SessionContext;
use super::state::HttpState;
use super::views::{ContactView, IndexPage, UpdatePage, redirect, render};
use crate::domain::{ApiResult, ContactDraft, ContactId};

/// Form fields posted by the add and edit forms.
///
/// Absent fields deserialise as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Phone number.
    #[serde(default)]
    pub phone: String,
    /// Email address; empty means none.
    #[serde(default)]
    pub email: String,
}

/// List all contacts.
#[get("/")]
pub async fn index(
    _user: AuthenticatedUser,
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let contacts = state.contacts_query.list().await?;
    render(
        StatusCode::OK,
        &IndexPage {
            flashes: session.take_flashes(),
            contacts: contacts.into_iter().map(ContactView::from).collect(),
        },
    )
}

/// Create a contact. Blank name or phone leaves the store untouched.
#[post("/add")]
pub async fn add(
    _user: AuthenticatedUser,
    session: SessionContext,
    state: web::Data<HttpState>,
    form: web::Form<ContactForm>,
) -> ApiResult<HttpResponse> {
    let ContactForm { name, phone, email } = form.into_inner();
    let notice = match ContactDraft::try_new(name, phone, email) {
        Ok(draft) => {
            let contact = state.contacts.add(draft).await?;
            info!(contact_id = %contact.id(), "contact added");
            FlashMessage::success(notices::CONTACT_ADDED)
        }
        Err(err) => {
            debug!(error = %err, "contact rejected");
            FlashMessage::danger(notices::FIELDS_REQUIRED)
        }
    };
    session.push_flash(notice)?;
    Ok(redirect("/"))
}

/// Render the edit form for one contact.
#[get("/update/{id}")]
pub async fn edit_form(
    _user: AuthenticatedUser,
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let contact = state
        .contacts_query
        .get(ContactId::new(path.into_inner()))
        .await?;
    render(
        StatusCode::OK,
        &UpdatePage {
            flashes: session.take_flashes(),
            contact: ContactView::from(contact),
        },
    )
}

/// Overwrite a contact with whatever the form carries.
#[post("/update/{id}")]
pub async fn update(
    _user: AuthenticatedUser,
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    form: web::Form<ContactForm>,
) -> ApiResult<HttpResponse> {
    let ContactForm { name, phone, email } = form.into_inner();
    let contact = state
        .contacts
        .update(
            ContactId::new(path.into_inner()),
            ContactDraft::overwrite(name, phone, email),
        )
        .await?;
    info!(contact_id = %contact.id(), "contact updated");
    session.push_flash(FlashMessage::success(notices::CONTACT_UPDATED))?;
    Ok(redirect("/"))
}

/// Delete a contact.
#[post("/delete/{id}")]
pub async fn delete(
    _user: AuthenticatedUser,
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = ContactId::new(path.into_inner());
    state.contacts.delete(id).await?;
    info!(contact_id = %id, "contact deleted");
    session.push_flash(FlashMessage::success(notices::CONTACT_DELETED))?;
    Ok(redirect("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Contact, Error};
    use crate::inbound::http::test_utils::{
        MockPorts, MutableClock, seed_login, session_cookie, test_session_middleware,
    };
    use actix_web::cookie::Cookie;
    use actix_web::dev::{Service, ServiceResponse};
    use actix_web::http::header;
    use actix_web::{App, test};
    use chrono::Utc;
    use rstest::rstest;

    async fn app_with(
        ports: MockPorts,
    ) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
    {
        test::init_service(
            App::new()
                .app_data(web::Data::new(ports.into_state(MutableClock::new(Utc::now()))))
                .wrap(test_session_middleware())
                .route("/test-login", web::get().to(seed_login))
                .service(index)
                .service(add)
                .service(edit_form)
                .service(update)
                .service(delete),
        )
        .await
    }

    async fn login_cookie<S>(app: &S) -> Cookie<'static>
    where
        S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        let res = test::call_service(
            app,
            test::TestRequest::get().uri("/test-login").to_request(),
        )
        .await;
        session_cookie(&res).expect("login cookie")
    }

    fn sample_contact() -> Contact {
        Contact::new(
            ContactId::new(4),
            "Ada".to_owned(),
            "555-0100".to_owned(),
            Some("ada@example.com".to_owned()),
        )
    }

    fn location(res: &ServiceResponse) -> Option<&str> {
        res.headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    #[rstest]
    #[case("", "555", "")]
    #[case("Ada", "   ", "ada@example.com")]
    #[case("  ", "", "")]
    #[actix_web::test]
    async fn add_with_blank_required_field_never_mutates(
        #[case] name: &str,
        #[case] phone: &str,
        #[case] email: &str,
    ) {
        let app = app_with(MockPorts::default()).await;
        let cookie = login_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/add")
                .cookie(cookie)
                .set_form([("name", name), ("phone", phone), ("email", email)])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some("/"));
    }

    #[rstest]
    #[actix_web::test]
    async fn add_passes_untrimmed_values_and_maps_empty_email() {
        let mut ports = MockPorts::default();
        ports
            .contacts
            .expect_add()
            .withf(|draft| draft.name() == " Ada " && draft.phone() == "555" && draft.email().is_none())
            .times(1)
            .returning(|_| Ok(sample_contact()));
        let app = app_with(ports).await;
        let cookie = login_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/add")
                .cookie(cookie)
                .set_form([("name", " Ada "), ("phone", "555"), ("email", "")])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }

    #[rstest]
    #[actix_web::test]
    async fn update_without_fields_overwrites_with_empty_strings() {
        let mut ports = MockPorts::default();
        ports
            .contacts
            .expect_update()
            .withf(|id, draft| {
                *id == ContactId::new(4) && draft.name().is_empty() && draft.phone().is_empty()
            })
            .times(1)
            .returning(|_, _| Ok(sample_contact()));
        let app = app_with(ports).await;
        let cookie = login_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/update/4")
                .cookie(cookie)
                .set_form([("email", "")])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some("/"));
    }

    #[rstest]
    #[actix_web::test]
    async fn edit_form_for_missing_contact_is_not_found() {
        let mut ports = MockPorts::default();
        ports
            .contacts_query
            .expect_get()
            .times(1)
            .returning(|id| Err(Error::not_found(format!("contact {id} not found"))));
        let app = app_with(ports).await;
        let cookie = login_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/update/99")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn index_renders_contacts() {
        let mut ports = MockPorts::default();
        ports
            .contacts_query
            .expect_list()
            .times(1)
            .returning(|| Ok(vec![sample_contact()]));
        let app = app_with(ports).await;
        let cookie = login_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/").cookie(cookie).to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        let html = String::from_utf8_lossy(&body);
        assert!(html.contains("ada@example.com"));
        assert!(html.contains("/delete/4"));
    }

    #[rstest]
    #[actix_web::test]
    async fn anonymous_delete_redirects_without_mutation() {
        let app = app_with(MockPorts::default()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post().uri("/delete/4").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some("/login"));
    }
}
