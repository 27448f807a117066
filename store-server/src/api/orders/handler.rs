//! Order API handlers
//!
//! Thin HTTP adapters: payload in, `OrdersManager` does the work, DTO out.
//! Business-expected failures (insufficient stock, illegal transitions)
//! surface as ordinary error responses via `AppError`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::models::{
    AdminOrder, ClientOrderStatus, OrderDetail, OrderStatus, OrderSummary, PlacedOrder,
};

use crate::core::ServerState;
use crate::db::repository::order;
use crate::orders::OrdersManager;
use crate::utils::{AppError, AppResult};

fn manager(state: &ServerState) -> OrdersManager {
    OrdersManager::new(state.db.clone(), state.config.clone())
}

/// POST /api/orders - place an order
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<shared::models::OrderCreate>,
) -> AppResult<(StatusCode, Json<PlacedOrder>)> {
    let placed = manager(&state).place_order(&payload).await?;
    Ok((StatusCode::CREATED, Json(placed)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub order_id: Option<i64>,
    pub user_id: Option<i64>,
}

/// GET /api/orders?orderId=.. | ?userId=..
///
/// One order by id, or a user's history. The two shapes differ, hence the
/// hand-built `Response`.
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Response> {
    if let Some(order_id) = query.order_id {
        let order = manager(&state).get_order(order_id).await?;
        return Ok(Json(OrderDetail::from(order)).into_response());
    }
    if let Some(user_id) = query.user_id {
        let summaries: Vec<OrderSummary> = order::find_by_user(&state.db, user_id).await?;
        return Ok(Json(summaries).into_response());
    }
    Err(AppError::invalid("Either orderId or userId is required"))
}

/// GET /api/orders/admin/all - operator console
pub async fn list_all_admin(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<AdminOrder>>> {
    let orders = order::find_all_admin(&state.db).await?;
    Ok(Json(orders))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    let order = manager(&state).get_order(id).await?;
    Ok(Json(order.into()))
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: String,
}

/// Status change response, in both vocabularies
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChanged {
    pub order_id: i64,
    pub status: OrderStatus,
    pub client_status: ClientOrderStatus,
}

impl StatusChanged {
    fn new(order_id: i64, status: OrderStatus) -> Self {
        Self {
            order_id,
            status,
            client_status: status.to_client(),
        }
    }
}

/// PUT /api/orders/{id}/status?status=CONFIRMED
///
/// Accepts both vocabularies; `shipped` folds into `IN_PROGRESS`.
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<StatusChanged>> {
    let status = manager(&state).advance_status(id, &query.status).await?;
    Ok(Json(StatusChanged::new(id, status)))
}

/// PUT /api/orders/{id}/cancel - cancel and restore stock
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<StatusChanged>> {
    let status = manager(&state).cancel_order(id).await?;
    Ok(Json(StatusChanged::new(id, status)))
}
