//! API route configuration.

use axum::Router;
use axum::routing::{delete, get, post, put};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{
    self, BalanceResponse, DeleteResponse, ErrorResponse, RootResponse, TransactionPayload,
    TransactionResponse,
};
use super::state::AppState;
use crate::db::Database;

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tally API",
        version = "0.1.0",
        description = "Income/expense ledger with balance summaries",
        license(name = "MIT")
    ),
    paths(
        handlers::root,
        handlers::create_transaction,
        handlers::list_transactions,
        handlers::get_transaction,
        handlers::update_transaction,
        handlers::delete_transaction,
        handlers::balance_summary,
    ),
    components(
        schemas(
            RootResponse,
            TransactionPayload,
            TransactionResponse,
            DeleteResponse,
            BalanceResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "Liveness endpoints"),
        (name = "transactions", description = "Transaction CRUD endpoints"),
        (name = "balance", description = "Aggregate balance endpoints")
    )
)]
pub struct ApiDoc;

/// Create the API router with OpenAPI documentation
pub fn create_router<D: Database + 'static>(state: AppState<D>) -> Router {
    let api = ApiDoc::openapi();

    // System routes (non-generic)
    let system_routes = Router::new().route("/", get(handlers::root));

    // Transaction + balance routes (generic over Database)
    let transaction_routes = routes!(D => {
        post "/transactions" => handlers::create_transaction,
        get "/transactions" => handlers::list_transactions,
        get "/transactions/{id}" => handlers::get_transaction,
        put "/transactions/{id}" => handlers::update_transaction,
        delete "/transactions/{id}" => handlers::delete_transaction,
        get "/balance" => handlers::balance_summary,
    });

    system_routes
        .merge(transaction_routes)
        .merge(Scalar::with_url("/docs", api))
        .with_state(state)
}
