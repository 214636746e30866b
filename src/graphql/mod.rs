pub mod schema;

use actix_web::{web, HttpRequest};
use actix_web::http::header::AUTHORIZATION;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

use crate::auth::JwtService;

pub use schema::{create_schema, Schema};

/// HTTP entry point for the GraphQL surface. A valid bearer token makes
/// the caller's claims available to resolvers; without one, only
/// unauthenticated resolvers succeed.
pub async fn graphql_entry(
    schema: web::Data<Schema>,
    jwt_service: web::Data<JwtService>,
    http_req: HttpRequest,
    gql_req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = gql_req.into_inner();

    let claims = http_req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .and_then(|token| jwt_service.validate_token(token).ok());

    if let Some(claims) = claims {
        request = request.data(claims);
    }

    schema.execute(request).await.into()
}
