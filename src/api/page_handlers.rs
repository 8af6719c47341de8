use actix_web::{get, post, put, rt, web, HttpResponse};

use crate::{
    errors::CustomError,
    models::{api_response::success_response, page::PageKind, transfer::TransferForm},
    state::AppState,
};

#[get("/pages/{page}")]
async fn get_page(state: web::Data<AppState>, page: web::Path<PageKind>) -> HttpResponse {
    let handle = state.pages.get(page.into_inner());
    success_response(handle.view().await)
}

/// Replace the page's form and kick off a debounced quote refresh. The
/// response does not wait for the quote.
#[put("/pages/{page}/form")]
async fn update_form(
    state: web::Data<AppState>,
    page: web::Path<PageKind>,
    form: web::Json<TransferForm>,
) -> Result<HttpResponse, CustomError> {
    let handle = state.pages.get(page.into_inner());
    handle.update_form(form.into_inner()).await?;

    let (background_state, background_page) = (state.clone(), handle.clone());
    rt::spawn(async move {
        background_state
            .quotes
            .refresh(&background_page, background_state.quote_debounce)
            .await;
    });

    Ok(success_response(handle.view().await))
}

#[post("/pages/{page}/quote")]
async fn quote_page(state: web::Data<AppState>, page: web::Path<PageKind>) -> HttpResponse {
    let handle = state.pages.get(page.into_inner());
    state.quotes.refresh(&handle, std::time::Duration::ZERO).await;
    success_response(handle.view().await)
}

#[post("/pages/{page}/submit")]
async fn submit_page(
    state: web::Data<AppState>,
    page: web::Path<PageKind>,
) -> Result<HttpResponse, CustomError> {
    let handle = state.pages.get(page.into_inner());
    let form = handle.begin_submission().await?;
    // actix drops this future when the client goes away mid-submit.
    let _guard = handle.cancel_on_drop();
    let outcome = state
        .submissions()
        .submit(handle.kind, &form, |status| handle.set_status(status))
        .await;
    handle.finish_submission(outcome).await?;
    Ok(success_response(handle.view().await))
}
