mod db;
mod error;
mod gateway;
mod gql;
mod model;
mod rest;

use actix_web::{guard, middleware, web, App, HttpRequest, HttpResponse, HttpServer, Result};
use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql::Schema;
use async_graphql_actix_web::{Request, Response, WSSubscription};
use clap::Parser;
use db::{Db, Storage};
use gql::ApiSchema;

const GRAPHQL_PATH: &str = "/graphql";

/// Users and posts served over GraphQL and a REST API
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Address both servers bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    #[arg(long, default_value_t = 4000)]
    graphql_port: u16,

    #[arg(long, default_value_t = 3000)]
    rest_port: u16,

    /// Start with an empty store instead of the sample users and posts
    #[arg(long)]
    no_seed: bool,
}

async fn index(schema: web::Data<ApiSchema>, req: Request) -> Response {
    schema.execute(req.into_inner()).await.into()
}

async fn index_playground() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(playground_source(
            GraphQLPlaygroundConfig::new(GRAPHQL_PATH).subscription_endpoint(GRAPHQL_PATH),
        )))
}

async fn index_ws(
    schema: web::Data<ApiSchema>,
    req: HttpRequest,
    payload: web::Payload,
) -> Result<HttpResponse> {
    WSSubscription::start(Schema::clone(&*schema), &req, payload)
}

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let storage: Storage = if cli.no_seed {
        Db::default()
    } else {
        Db::seeded()
    }
    .into_storage();
    let schema = gql::build_schema(storage.clone());

    let graphql = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .data(schema.clone())
            .service(web::resource(GRAPHQL_PATH).guard(guard::Post()).to(index))
            .service(
                web::resource(GRAPHQL_PATH)
                    .guard(guard::Get())
                    .guard(guard::Header("upgrade", "websocket"))
                    .to(index_ws),
            )
            .service(
                web::resource(GRAPHQL_PATH)
                    .guard(guard::Get())
                    .to(index_playground),
            )
    })
    .bind((cli.host.as_str(), cli.graphql_port))?
    .run();

    let api = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .data(storage.clone())
            .configure(rest::configure)
    })
    .bind((cli.host.as_str(), cli.rest_port))?
    .run();

    log::info!(
        "GraphQL ready at http://{}:{}{}",
        cli.host,
        cli.graphql_port,
        GRAPHQL_PATH
    );
    log::info!("REST API ready at http://{}:{}/api/users", cli.host, cli.rest_port);

    futures::try_join!(graphql, api)?;
    Ok(())
}
