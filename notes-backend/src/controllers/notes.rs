//! Notes REST API — CRUD endpoints over the in-memory store.
//!
//! Handlers own all input validation (id parsing, required fields) and
//! status-code mapping; the store only ever signals NotFound.

use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::models::{NewNote, NoteUpdate};
use crate::repo::StoreError;

// Both fields default to "" so an omitted field is reported as empty by
// the validation below, not as a deserialization failure
#[derive(Debug, Deserialize)]
struct CreateNoteRequest {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct UpdateNoteRequest {
    title: Option<String>,
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

fn error_json(message: &str) -> serde_json::Value {
    serde_json::json!({ "error": message })
}

/// Parse the `{id}` path segment, mapping failures to a 400 response.
fn parse_note_id(raw: &str) -> Result<i64, HttpResponse> {
    raw.parse::<i64>()
        .map_err(|_| HttpResponse::BadRequest().json(error_json("Invalid note ID")))
}

/// POST /notes
async fn create_note(
    data: web::Data<AppState>,
    body: web::Json<CreateNoteRequest>,
) -> impl Responder {
    let body = body.into_inner();

    if body.title.trim().is_empty() {
        return HttpResponse::BadRequest().json(error_json("Title is required"));
    }

    let id = data.store.create(NewNote {
        title: body.title,
        content: body.content,
    });

    // Echo the stored copy back so the client sees the assigned id/timestamps
    match data.store.get_by_id(id) {
        Ok(note) => HttpResponse::Created().json(note),
        Err(e) => {
            log::error!("Created note {} but failed to read it back: {}", id, e);
            HttpResponse::InternalServerError().json(error_json("Failed to retrieve created note"))
        }
    }
}

/// GET /notes/{id}
async fn get_note(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = match parse_note_id(&path) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match data.store.get_by_id(id) {
        Ok(note) => HttpResponse::Ok().json(note),
        Err(StoreError::NotFound) => HttpResponse::NotFound().json(error_json("Note not found")),
    }
}

/// GET /notes
async fn list_notes(data: web::Data<AppState>) -> impl Responder {
    // Always an array, never null — an empty store lists as []
    HttpResponse::Ok().json(data.store.get_all())
}

/// PATCH /notes/{id}
async fn patch_note(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateNoteRequest>,
) -> impl Responder {
    let id = match parse_note_id(&path) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let body = body.into_inner();

    if body.title.is_none() && body.content.is_none() {
        return HttpResponse::BadRequest().json(error_json("No fields to update"));
    }

    if let Some(ref title) = body.title {
        if title.trim().is_empty() {
            return HttpResponse::BadRequest().json(error_json("Title cannot be empty"));
        }
    }

    let update = NoteUpdate {
        title: body.title,
        content: body.content,
    };

    if let Err(StoreError::NotFound) = data.store.update_partial(id, update) {
        return HttpResponse::NotFound().json(error_json("Note not found"));
    }

    match data.store.get_by_id(id) {
        Ok(note) => HttpResponse::Ok().json(note),
        Err(e) => {
            log::error!("Updated note {} but failed to read it back: {}", id, e);
            HttpResponse::InternalServerError().json(error_json("Failed to retrieve updated note"))
        }
    }
}

/// DELETE /notes/{id}
async fn delete_note(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = match parse_note_id(&path) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match data.store.delete(id) {
        Ok(()) => HttpResponse::Ok().json(MessageResponse {
            message: "Note deleted successfully".to_string(),
        }),
        Err(StoreError::NotFound) => HttpResponse::NotFound().json(error_json("Note not found")),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/notes")
            .route("", web::post().to(create_note))
            .route("", web::get().to(list_notes))
            .route("/{id}", web::get().to(get_note))
            .route("/{id}", web::patch().to(patch_note))
            .route("/{id}", web::delete().to(delete_note)),
    );
}
