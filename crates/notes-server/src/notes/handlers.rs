use super::*;
use crate::ApiError;
use crate::FolderStore;
use crate::folders::handlers::destination;
use actix_web::HttpResponse;
use actix_web::web;
use notes_auth::Caller;
use notes_auth::Gate;
use notes_auth::authorize;
use notes_core::ID;
use notes_core::Unique;

fn titled(title: &str) -> Result<(), ApiError> {
    match title.trim().is_empty() {
        true => Err(ApiError::BadRequest(String::from("title is required"))),
        false => Ok(()),
    }
}

pub async fn list(notes: web::Data<dyn NoteStore>, caller: Caller) -> Result<HttpResponse, ApiError> {
    let notes = notes.by_owner(caller.identity().id()).await?;
    let views = notes.iter().map(NoteView::from).collect::<Vec<_>>();
    Ok(HttpResponse::Ok().json(serde_json::json!({ "notes": views })))
}

pub async fn create(
    notes: web::Data<dyn NoteStore>,
    folders: web::Data<dyn FolderStore>,
    gate: web::Data<Gate>,
    caller: Caller,
    body: web::Json<NoteDraft>,
) -> Result<HttpResponse, ApiError> {
    let NoteDraft {
        title,
        content,
        is_favorite,
        folder_id,
    } = body.into_inner();
    titled(&title)?;
    let folder = folder_id.map(ID::from);
    if let Some(folder) = folder {
        destination(&**folders, &gate, caller.identity(), folder).await?;
    }
    let note = Note::new(title, content, caller.identity().id(), is_favorite, folder);
    let note = notes.create(note).await?;
    Ok(HttpResponse::Created().json(serde_json::json!({ "note": NoteView::from(&note) })))
}

pub async fn get(
    notes: web::Data<dyn NoteStore>,
    gate: web::Data<Gate>,
    caller: Caller,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let note = notes
        .by_id(ID::from(path.into_inner()))
        .await?
        .ok_or(ApiError::NotFound("note"))?;
    authorize(gate.lurker(), caller.identity(), note.owner())?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "note": NoteView::from(&note) })))
}

pub async fn update(
    notes: web::Data<dyn NoteStore>,
    folders: web::Data<dyn FolderStore>,
    gate: web::Data<Gate>,
    caller: Caller,
    path: web::Path<i64>,
    body: web::Json<NotePatch>,
) -> Result<HttpResponse, ApiError> {
    let mut note = notes
        .by_id(ID::from(path.into_inner()))
        .await?
        .ok_or(ApiError::NotFound("note"))?;
    authorize(gate.lurker(), caller.identity(), note.owner())?;
    let NotePatch {
        title,
        content,
        is_favorite,
        folder_id,
    } = body.into_inner();
    if let Some(title) = title {
        titled(&title)?;
        note = note.retitle(title);
    }
    if let Some(content) = content {
        note = note.rewrite(content);
    }
    if let Some(favorite) = is_favorite {
        note = note.favor(favorite);
    }
    if let Some(folder) = folder_id.map(|f| f.map(ID::from)) {
        if let Some(folder) = folder {
            destination(&**folders, &gate, caller.identity(), folder).await?;
        }
        note = note.refile(folder);
    }
    let note = notes.update(note).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "note": NoteView::from(&note) })))
}

pub async fn delete(
    notes: web::Data<dyn NoteStore>,
    gate: web::Data<Gate>,
    caller: Caller,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = ID::from(path.into_inner());
    let owner = notes.owner(id).await?.ok_or(ApiError::NotFound("note"))?;
    authorize(gate.lurker(), caller.identity(), owner)?;
    notes.delete(id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Note deleted successfully" })))
}
