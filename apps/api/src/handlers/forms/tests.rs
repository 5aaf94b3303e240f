use std::sync::Arc;

use axum::Json;
use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use formwork_application::{FormService, PresentationHooks, SubmissionHooks};
use formwork_domain::{ExternalContext, FormSchema};
use formwork_infrastructure::InMemoryFormSchemaCatalog;
use serde_json::{Value, json};

use super::{
    form_view_handler, list_forms_handler, submit_form_handler, submit_form_json_handler,
};
use crate::state::AppState;

fn submit_video_schema() -> FormSchema {
    serde_json::from_value(json!({
        "baseId": "submitVideo",
        "entries": {
            "videoLink": { "title": "Video link", "type": "url", "required": true },
            "name": { "title": "Your name", "type": "text", "required": true },
            "email": { "title": "Your email", "type": "email", "required": true },
            "helpedCreate": { "title": "Were you a part of this video?", "type": "checkbox" },
            "role": { "title": "What was your role?", "type": "text", "required": true }
        },
        "structure": [
            { "id": "videoInfo", "entries": ["videoLink"] },
            {
                "id": "aboutSubmitter",
                "dependentOn": "loggedOut",
                "alsoProcessIf": "loggedIn",
                "entries": ["name", "email"]
            },
            { "id": "connectionQuestion", "entries": ["helpedCreate"] },
            { "id": "connection", "dependentOn": "helpedCreate", "entries": ["role"] }
        ],
        "automaticallyFillEntriesFrom": {
            "loggedInMember": { "name": "name", "emailAddress": "email" }
        }
    }))
    .unwrap_or_else(|_| unreachable!())
}

fn app_state(external_values: ExternalContext) -> AppState {
    let catalog = InMemoryFormSchemaCatalog::from_schemas([submit_video_schema()])
        .unwrap_or_else(|_| unreachable!());

    AppState {
        form_service: FormService::new(
            Arc::new(catalog),
            SubmissionHooks::default(),
            PresentationHooks::default(),
        ),
        external_values,
    }
}

fn logged_in() -> ExternalContext {
    ExternalContext::new().with("loggedIn", true).with(
        "loggedInMember",
        json!({ "name": "John Smith", "emailAddress": "a@b.com" }),
    )
}

fn to_json<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|_| unreachable!())
}

#[tokio::test]
async fn lists_forms() {
    let Json(response) = list_forms_handler(State(app_state(ExternalContext::new())))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(response.base_ids, vec!["submitVideo".to_owned()]);
}

#[tokio::test]
async fn fresh_form_view_hides_unmet_groups() {
    let Json(response) = form_view_handler(
        State(app_state(ExternalContext::new())),
        Path("submitVideo".to_owned()),
    )
    .await
    .unwrap_or_else(|_| unreachable!());

    let body = to_json(&response);
    assert_eq!(body["is_being_submitted"], json!(false));
    assert_eq!(body["entries"], Value::Null);
    assert_eq!(body["groups"][1]["id"], json!("aboutSubmitter"));
    assert_eq!(body["groups"][1]["fulfilled"], json!(false));
    assert_eq!(
        body["groups"][1]["toggle_classes"],
        json!(["dependentOn-loggedOut"])
    );
    assert_eq!(
        body["groups"][0]["entries"][0]["input_name"],
        json!("submitVideo[videoLink]")
    );
}

#[tokio::test]
async fn unknown_form_is_not_found() {
    let error = form_view_handler(
        State(app_state(ExternalContext::new())),
        Path("missing".to_owned()),
    )
    .await
    .err()
    .unwrap_or_else(|| unreachable!());

    assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn url_encoded_submission_is_processed() {
    let fields = vec![
        ("submitVideo[videoLink]".to_owned(), "vimeo.com/1".to_owned()),
        ("submitVideo[helpedCreate]".to_owned(), "on".to_owned()),
        ("submitVideo[role]".to_owned(), " Director ".to_owned()),
    ];

    let Json(response) = submit_form_handler(
        State(app_state(logged_in())),
        Path("submitVideo".to_owned()),
        Form(fields),
    )
    .await
    .unwrap_or_else(|_| unreachable!());

    let body = to_json(&response);
    assert_eq!(body["is_being_submitted"], json!(true));
    assert_eq!(body["entries_are_valid"], json!(true));
    assert_eq!(
        body["values"],
        json!({
            "videoLink": "http://vimeo.com/1",
            "name": "John Smith",
            "email": "a@b.com",
            "helpedCreate": true,
            "role": "Director"
        })
    );
}

#[tokio::test]
async fn invalid_json_submission_reports_problems() {
    let Json(response) = submit_form_json_handler(
        State(app_state(ExternalContext::new().with("loggedOut", true))),
        Path("submitVideo".to_owned()),
        Json(json!({ "submitVideo": { "videoLink": "", "email": "nope" } })),
    )
    .await
    .unwrap_or_else(|_| unreachable!());

    let body = to_json(&response);
    assert_eq!(body["entries_are_valid"], json!(false));
    assert_eq!(body["values"], Value::Null);
    assert_eq!(
        body["form"]["groups"][0]["entries"][0]["problems"],
        json!([{ "code": "empty", "message": "Please enter" }])
    );
    assert_eq!(
        body["form"]["groups"][1]["entries"][1]["problems"][0]["message"],
        json!("Please enter a valid email address")
    );
}

#[tokio::test]
async fn scalar_json_submission_is_rejected() {
    let error = submit_form_json_handler(
        State(app_state(ExternalContext::new())),
        Path("submitVideo".to_owned()),
        Json(json!("not an object")),
    )
    .await
    .err()
    .unwrap_or_else(|| unreachable!());

    assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
}
