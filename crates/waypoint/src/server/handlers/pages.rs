//! Page handlers
//!
//! Pages call the backend through the same client paths as the proxy routes and
//! render every outcome, failures included, as a page with a retry link.

use askama::Template;
use axum::{
  extract::{Extension, Form, Path, Query, State},
  response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::error;
use url::form_urlencoded;

use crate::error::ApiError;
use crate::pages::{
  DestinationsPage, LocationPicker, PageState, SearchPage, SearchResults, SiteCard, SiteDetail,
  SitePage, SubmissionView, SubmitPage,
};
use crate::server::handlers::{sites::sites_error, submit::forward_submission};
use crate::server::{middleware::RequestContext, state::AppState};
use crate::types::NewSiteRequest;

const SEARCH_PAGE_FAILED: &str = "Error occurred while searching";
const NO_LOCATION: &str = "Please select a location on the map";
const SUBMIT_HREF: &str = "/submit";
const DESTINATIONS_HREF: &str = "/destinations";

fn render<T: Template>(page: &T) -> Response {
  match page.render() {
    Ok(html) => Html(html).into_response(),
    Err(e) => {
      error!("Failed to render page: {e}");
      ApiError::internal("Failed to render page").into_response()
    }
  }
}

fn non_empty(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}

// Search
// ======

#[derive(Debug, Deserialize, Default)]
pub struct SearchPageQuery {
  pub q: Option<String>,
}

fn search_href(query: &str) -> String {
  let encoded = form_urlencoded::Serializer::new(String::new()).append_pair("q", query).finish();
  format!("/?{encoded}")
}

/// GET / - query box, plus ranked results when `q` is given
pub async fn search_page(
  State(app): State<AppState>,
  Extension(context): Extension<RequestContext>,
  Query(params): Query<SearchPageQuery>,
) -> Response {
  let query = params.q.unwrap_or_default();

  let state = if query.trim().is_empty() {
    PageState::Idle
  } else {
    match app.backend.search(&query).await {
      Ok(response) => PageState::Ready(SearchResults {
        message: response.message,
        cards: SiteCard::from_results(&response.sites),
      }),
      Err(e) => {
        context.log_failure("Search page", &e);
        PageState::failed(SEARCH_PAGE_FAILED, search_href(&query))
      }
    }
  };

  render(&SearchPage { query, state })
}

// Destinations
// ============

/// GET /destinations - every known destination
pub async fn destinations_page(
  State(app): State<AppState>,
  Extension(context): Extension<RequestContext>,
) -> Response {
  let state = match app.backend.list_sites().await {
    Ok(sites) => PageState::Ready(SiteCard::from_sites(&sites)),
    Err(e) => {
      context.log_failure("Destinations page", &e);
      PageState::failed(sites_error(e).body.error, DESTINATIONS_HREF)
    }
  };

  render(&DestinationsPage { state })
}

// Site detail
// ===========

#[derive(Debug, Deserialize, Default)]
pub struct SiteQuery {
  pub name: Option<String>,
  pub description: Option<String>,
  #[serde(rename = "photoUrl")]
  pub photo_url: Option<String>,
  pub latitude: Option<String>,
  pub longitude: Option<String>,
}

/// GET /site/{id} - render the detail fields straight from the query string
pub async fn site_page(
  State(app): State<AppState>,
  Path(id): Path<String>,
  Query(query): Query<SiteQuery>,
) -> Response {
  let detail = SiteDetail {
    name: non_empty(query.name).unwrap_or(id),
    description: query.description.unwrap_or_default(),
    photo_url: non_empty(query.photo_url),
    latitude: non_empty(query.latitude),
    longitude: non_empty(query.longitude),
  };

  render(&SitePage::new(detail, app.maps_api_key()))
}

// Submit
// ======

#[derive(Debug, Deserialize, Default)]
pub struct SubmitForm {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub description: String,
  pub latitude: Option<String>,
  pub longitude: Option<String>,
}

impl SubmitForm {
  /// Picked coordinates, if both hidden fields hold finite numbers
  pub fn coordinates(&self) -> Option<(f64, f64)> {
    let parse = |value: &Option<String>| {
      value.as_deref()?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    };
    Some((parse(&self.latitude)?, parse(&self.longitude)?))
  }
}

/// GET /submit - empty form and map
pub async fn submit_page(State(app): State<AppState>) -> Response {
  render(&SubmitPage::blank(app.maps_api_key().map(str::to_string)))
}

/// POST /submit - submit through the proxy path and show the outcome
pub async fn submit_form(
  State(app): State<AppState>,
  Extension(context): Extension<RequestContext>,
  Form(form): Form<SubmitForm>,
) -> Response {
  let mut page = SubmitPage {
    picker: LocationPicker::at(form.coordinates()),
    name: form.name,
    description: form.description,
    maps_api_key: app.maps_api_key().map(str::to_string),
    state: PageState::Idle,
  };

  let Some((latitude, longitude)) = page.picker.selected() else {
    page.state = PageState::failed(NO_LOCATION, SUBMIT_HREF);
    return render(&page);
  };

  let request = NewSiteRequest {
    name: page.name.clone(),
    description: page.description.clone(),
    latitude,
    longitude,
  };

  page.state = match serde_json::to_value(&request) {
    Ok(payload) => match forward_submission(&app, &context, &payload).await {
      Ok(response) => PageState::Ready(SubmissionView::from(response.result)),
      Err(e) => PageState::failed(e.body.error, SUBMIT_HREF),
    },
    Err(e) => {
      error!("Failed to encode submission: {e}");
      PageState::failed("Failed to submit destination", SUBMIT_HREF)
    }
  };

  render(&page)
}
