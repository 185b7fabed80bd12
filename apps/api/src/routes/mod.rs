pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chat::handlers as chat_handlers;
use crate::chatbot::handlers as chatbot_handlers;
use crate::products::handlers as product_handlers;
use crate::shops::handlers as shop_handlers;
use crate::state::AppState;
use crate::users::handlers as user_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Shops
        .route(
            "/api/v1/shops",
            get(shop_handlers::handle_list_shops).post(shop_handlers::handle_create_shop),
        )
        .route(
            "/api/v1/shops/:id",
            get(shop_handlers::handle_get_shop)
                .put(shop_handlers::handle_update_shop)
                .delete(shop_handlers::handle_delete_shop),
        )
        // Prompt construction
        .route(
            "/api/v1/shops/:id/prompt",
            post(chatbot_handlers::handle_shop_prompt),
        )
        .route(
            "/api/v1/shops/:id/prompt/comparison",
            post(chatbot_handlers::handle_comparison_prompt),
        )
        .route(
            "/api/v1/chat/prompt",
            post(chatbot_handlers::handle_generic_prompt),
        )
        .route(
            "/api/v1/chat/prompt/support",
            post(chatbot_handlers::handle_support_prompt),
        )
        // Products
        .route(
            "/api/v1/products",
            get(product_handlers::handle_list_products)
                .post(product_handlers::handle_create_product),
        )
        .route(
            "/api/v1/products/search",
            get(product_handlers::handle_search_products),
        )
        // Users
        .route(
            "/api/v1/users",
            get(user_handlers::handle_list_users).post(user_handlers::handle_create_user),
        )
        .route("/api/v1/users/:id", get(user_handlers::handle_get_user))
        // Chat
        .route(
            "/api/v1/chat",
            get(chat_handlers::handle_list_messages).post(chat_handlers::handle_create_message),
        )
        .with_state(state)
}
