use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::{
    errors::CustomError,
    models::{
        api_response::success_response,
        wallet::{BalanceQuery, ConnectRequest, SwitchChainRequest},
    },
    services::validation::parse_token_address,
    state::AppState,
};

#[get("/connectors")]
async fn list_connectors(state: web::Data<AppState>) -> HttpResponse {
    success_response(state.wallet.connectors())
}

#[get("/wallet")]
async fn get_session(state: web::Data<AppState>) -> HttpResponse {
    success_response(state.wallet.current())
}

#[post("/wallet/connect")]
async fn connect_wallet(
    state: web::Data<AppState>,
    req: web::Json<ConnectRequest>,
) -> Result<HttpResponse, CustomError> {
    let chain_id = req.chain_id.unwrap_or(state.networks.default_chain_id());
    let session = state.wallet.connect(&req.connector_id, chain_id).await?;
    Ok(success_response(session))
}

#[post("/wallet/disconnect")]
async fn disconnect_wallet(state: web::Data<AppState>) -> Result<HttpResponse, CustomError> {
    state.wallet.disconnect().await?;
    Ok(success_response(json!({ "disconnected": true })))
}

#[post("/wallet/switch")]
async fn switch_chain(
    state: web::Data<AppState>,
    req: web::Json<SwitchChainRequest>,
) -> Result<HttpResponse, CustomError> {
    state.networks.get(req.chain_id)?;
    let session = state.wallet.switch_chain(req.chain_id).await?;
    Ok(success_response(session))
}

#[get("/wallet/balance")]
async fn get_balance(
    state: web::Data<AppState>,
    query: web::Query<BalanceQuery>,
) -> Result<HttpResponse, CustomError> {
    let session = state.wallet.current();
    let account = session.account().ok_or(CustomError::WalletNotConnected)?;
    let chain_id = query
        .chain_id
        .or(session.chain_id())
        .unwrap_or(state.networks.default_chain_id());
    state.networks.get(chain_id)?;

    let balance = match query.token.as_deref() {
        Some(token) => {
            let token = parse_token_address(token)?;
            state.reader.token_balance(chain_id, token, account).await?
        }
        None => state.reader.native_balance(chain_id, account).await?,
    };
    Ok(success_response(balance))
}

#[derive(Debug, Deserialize)]
pub struct ChainQuery {
    chain_id: Option<u64>,
}

#[get("/tokens/{address}")]
async fn get_token(
    state: web::Data<AppState>,
    address: web::Path<String>,
    query: web::Query<ChainQuery>,
) -> Result<HttpResponse, CustomError> {
    let token = parse_token_address(&address)?;
    let network = state.networks.resolve(query.chain_id)?;
    let metadata = state.reader.token_metadata(network.chain_id, token).await?;
    Ok(success_response(metadata))
}

#[get("/networks")]
async fn list_networks(state: web::Data<AppState>) -> HttpResponse {
    success_response(state.networks.supported())
}
