use actix_web::web;
mod page_handlers;
mod wallet_handlers;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(wallet_handlers::list_connectors)
            .service(wallet_handlers::get_session)
            .service(wallet_handlers::connect_wallet)
            .service(wallet_handlers::disconnect_wallet)
            .service(wallet_handlers::switch_chain)
            .service(wallet_handlers::get_balance)
            .service(wallet_handlers::get_token)
            .service(wallet_handlers::list_networks)
            .service(page_handlers::get_page)
            .service(page_handlers::update_form)
            .service(page_handlers::quote_page)
            .service(page_handlers::submit_page),
    );
}
