use crate::db::Storage;
use crate::error::{ApiError, ApiResult};
use crate::gateway::NewUser;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateUserBody {
    name: Option<String>,
    email: Option<String>,
    age: Option<i32>,
}

pub async fn list_users(storage: web::Data<Storage>) -> HttpResponse {
    let db = storage.lock().await;
    HttpResponse::Ok().json(db.list_users())
}

pub async fn get_user(
    storage: web::Data<Storage>,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = id.parse::<u64>().map_err(|_| ApiError::UserNotFound)?;
    let db = storage.lock().await;
    let user = db.find_user_by_id(id).ok_or(ApiError::UserNotFound)?;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn create_user(
    storage: web::Data<Storage>,
    body: web::Json<CreateUserBody>,
) -> ApiResult<HttpResponse> {
    let CreateUserBody { name, email, age } = body.into_inner();
    let user = storage
        .lock()
        .await
        .create_user(NewUser::new(name, email, age))?;
    Ok(HttpResponse::Created().json(user))
}
