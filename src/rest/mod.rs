// JSON API over the shared store

mod users;

use crate::error::ApiError;
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    // a body that is not a JSON object is treated as one without name or email
    let json_config = web::JsonConfig::default()
        .error_handler(|_err, _req| ApiError::MissingNameOrEmail.into());

    cfg.service(
        web::resource("/api/users")
            .app_data(json_config)
            .route(web::get().to(users::list_users))
            .route(web::post().to(users::create_user)),
    )
    .service(web::resource("/api/users/{id}").route(web::get().to(users::get_user)));
}
