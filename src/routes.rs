use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use serde::{Deserialize, Serialize};

use crate::models::{Author, BlogPost, NewBlogPost, PostChanges};
use crate::{db, DbPool, DbPoolExt};

type ApiResult<T> = Result<T, (Status, Json<ApiError>)>;

// ─── Models ───

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

fn err(status: Status, msg: &str, code: &str) -> (Status, Json<ApiError>) {
    (status, Json(ApiError { error: msg.to_string(), code: code.to_string() }))
}

fn db_err(e: rusqlite::Error) -> (Status, Json<ApiError>) {
    log::error!("database error: {}", e);
    err(Status::InternalServerError, &e.to_string(), "DB_ERROR")
}

fn not_found() -> (Status, Json<ApiError>) {
    err(Status::NotFound, "Post not found", "NOT_FOUND")
}

/// Public rendering of a stored post; the author collapses to "First Last".
#[derive(Debug, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub author: String,
    pub title: String,
    pub content: String,
    pub created: String,
}

impl From<BlogPost> for PostResponse {
    fn from(post: BlogPost) -> Self {
        Self {
            author: post.author.full_name(),
            id: post.id,
            title: post.title,
            content: post.content,
            created: post.created,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorReq {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Deserialize)]
pub struct CreatePostReq {
    pub author: Option<AuthorReq>,
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdatePostReq {
    pub id: Option<String>,
    pub author: Option<AuthorReq>,
    pub title: Option<String>,
    pub content: Option<String>,
}

// ─── Validation ───

fn required(value: Option<&str>, field: &str) -> ApiResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(err(
            Status::UnprocessableEntity,
            &format!("Missing `{}` in request body", field),
            "VALIDATION_ERROR",
        )),
    }
}

fn validate_author(author: Option<&AuthorReq>) -> ApiResult<Author> {
    let author = author.ok_or_else(|| {
        err(Status::UnprocessableEntity, "Missing `author` in request body", "VALIDATION_ERROR")
    })?;
    Ok(Author {
        first_name: required(author.first_name.as_deref(), "author.firstName")?,
        last_name: required(author.last_name.as_deref(), "author.lastName")?,
    })
}

fn validate_new_post(req: &CreatePostReq) -> ApiResult<NewBlogPost> {
    Ok(NewBlogPost {
        author: validate_author(req.author.as_ref())?,
        title: required(req.title.as_deref(), "title")?,
        content: required(req.content.as_deref(), "content")?,
    })
}

fn validate_changes(req: &UpdatePostReq) -> ApiResult<PostChanges> {
    Ok(PostChanges {
        author: req.author.as_ref().map(|a| validate_author(Some(a))).transpose()?,
        title: req.title.as_deref().map(|t| required(Some(t), "title")).transpose()?,
        content: req.content.as_deref().map(|c| required(Some(c), "content")).transpose()?,
    })
}

// ─── Routes ───

#[get("/health")]
pub fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok", "version": env!("CARGO_PKG_VERSION")}))
}

#[get("/posts")]
pub fn list_posts(db: &State<DbPool>) -> ApiResult<Json<Vec<PostResponse>>> {
    let conn = db.conn();
    let posts = db::list_posts(&conn).map_err(db_err)?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

#[get("/posts/<id>")]
pub fn get_post(id: &str, db: &State<DbPool>) -> ApiResult<Json<PostResponse>> {
    let conn = db.conn();
    db::find_by_id(&conn, id)
        .map_err(db_err)?
        .map(|post| Json(PostResponse::from(post)))
        .ok_or_else(not_found)
}

#[post("/posts", data = "<req>")]
pub fn create_post(req: Json<CreatePostReq>, db: &State<DbPool>) -> ApiResult<(Status, Json<PostResponse>)> {
    let new_post = validate_new_post(&req)?;
    let conn = db.conn();
    let post = db::insert_post(&conn, &new_post).map_err(db_err)?;
    Ok((Status::Created, Json(PostResponse::from(post))))
}

#[put("/posts/<id>", data = "<req>")]
pub fn update_post(id: &str, req: Json<UpdatePostReq>, db: &State<DbPool>) -> ApiResult<Status> {
    if let Some(body_id) = req.id.as_deref() {
        if body_id != id {
            let msg = format!("Request path id ({}) and request body id ({}) must match", id, body_id);
            return Err(err(Status::BadRequest, &msg, "ID_MISMATCH"));
        }
    }
    let changes = validate_changes(&req)?;

    let conn = db.conn();
    let found = if changes.is_empty() {
        db::find_by_id(&conn, id).map_err(db_err)?.is_some()
    } else {
        db::update_post(&conn, id, &changes).map_err(db_err)?
    };
    if !found {
        return Err(not_found());
    }
    Ok(Status::NoContent)
}

#[delete("/posts/<id>")]
pub fn delete_post(id: &str, db: &State<DbPool>) -> ApiResult<Status> {
    let conn = db.conn();
    if !db::delete_post(&conn, id).map_err(db_err)? {
        return Err(not_found());
    }
    Ok(Status::NoContent)
}

// ─── Catchers ───

#[catch(404)]
pub fn not_found_catcher() -> Json<ApiError> {
    Json(ApiError { error: "Not found".to_string(), code: "NOT_FOUND".to_string() })
}

#[catch(422)]
pub fn unprocessable() -> Json<ApiError> {
    Json(ApiError { error: "Malformed request body".to_string(), code: "VALIDATION_ERROR".to_string() })
}

#[catch(500)]
pub fn internal_error() -> Json<ApiError> {
    Json(ApiError { error: "Internal server error".to_string(), code: "INTERNAL_ERROR".to_string() })
}
