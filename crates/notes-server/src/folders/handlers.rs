use super::*;
use crate::ApiError;
use actix_web::HttpResponse;
use actix_web::web;
use notes_auth::Caller;
use notes_auth::Gate;
use notes_auth::Identity;
use notes_auth::authorize;
use notes_core::ID;
use notes_core::Unique;

/// Loads a folder the caller owns. 404 before 401.
async fn owned(
    folders: &dyn FolderStore,
    gate: &Gate,
    caller: &Identity,
    id: ID<Folder>,
) -> Result<Folder, ApiError> {
    let folder = folders.by_id(id).await?.ok_or(ApiError::NotFound("folder"))?;
    authorize(gate.lurker(), caller, folder.owner())?;
    Ok(folder)
}

/// Checks the caller owns a folder something is being filed into.
pub(crate) async fn destination(
    folders: &dyn FolderStore,
    gate: &Gate,
    caller: &Identity,
    id: ID<Folder>,
) -> Result<(), ApiError> {
    let owner = folders.owner(id).await?.ok_or(ApiError::NotFound("folder"))?;
    authorize(gate.lurker(), caller, owner)?;
    Ok(())
}

fn titled(title: &str) -> Result<(), ApiError> {
    match title.trim().is_empty() {
        true => Err(ApiError::BadRequest(String::from("title is required"))),
        false => Ok(()),
    }
}

pub async fn list(folders: web::Data<dyn FolderStore>, caller: Caller) -> Result<HttpResponse, ApiError> {
    let folders = folders.by_owner(caller.identity().id()).await?;
    let views = folders.iter().map(FolderView::from).collect::<Vec<_>>();
    Ok(HttpResponse::Ok().json(serde_json::json!({ "folders": views })))
}

pub async fn create(
    folders: web::Data<dyn FolderStore>,
    gate: web::Data<Gate>,
    caller: Caller,
    body: web::Json<FolderDraft>,
) -> Result<HttpResponse, ApiError> {
    let FolderDraft {
        title,
        is_favorite,
        parent_folder_id,
    } = body.into_inner();
    titled(&title)?;
    let parent = parent_folder_id.map(ID::from);
    if let Some(parent) = parent {
        destination(&**folders, &gate, caller.identity(), parent).await?;
    }
    let folder = Folder::new(title, caller.identity().id(), is_favorite, parent);
    let folder = folders.create(folder).await?;
    Ok(HttpResponse::Created().json(serde_json::json!({ "folder": FolderView::from(&folder) })))
}

pub async fn get(
    folders: web::Data<dyn FolderStore>,
    gate: web::Data<Gate>,
    caller: Caller,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let folder = owned(&**folders, &gate, caller.identity(), ID::from(path.into_inner())).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "folder": FolderView::from(&folder) })))
}

pub async fn update(
    folders: web::Data<dyn FolderStore>,
    gate: web::Data<Gate>,
    caller: Caller,
    path: web::Path<i64>,
    body: web::Json<FolderPatch>,
) -> Result<HttpResponse, ApiError> {
    let mut folder = owned(&**folders, &gate, caller.identity(), ID::from(path.into_inner())).await?;
    let FolderPatch {
        title,
        is_favorite,
        parent_folder_id,
    } = body.into_inner();
    if let Some(title) = title {
        titled(&title)?;
        folder = folder.retitle(title);
    }
    if let Some(favorite) = is_favorite {
        folder = folder.favor(favorite);
    }
    if let Some(parent) = parent_folder_id.map(|p| p.map(ID::from)) {
        if let Some(parent) = parent {
            destination(&**folders, &gate, caller.identity(), parent).await?;
        }
        folder = folder.reparent(parent);
    }
    let folder = folders.update(folder).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "folder": FolderView::from(&folder) })))
}

pub async fn delete(
    folders: web::Data<dyn FolderStore>,
    gate: web::Data<Gate>,
    caller: Caller,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = ID::from(path.into_inner());
    let owner = folders.owner(id).await?.ok_or(ApiError::NotFound("folder"))?;
    authorize(gate.lurker(), caller.identity(), owner)?;
    folders.delete(id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Folder deleted successfully" })))
}
