//! Server-rendered pages: view models, page state and the map location picker

pub mod picker;
pub mod state;
pub mod views;

pub use picker::LocationPicker;
pub use state::PageState;
pub use views::{
  map_embed_url, site_detail_href, DestinationsPage, SearchPage, SearchResults, SiteCard, SiteDetail,
  SitePage, SubmissionView, SubmitPage,
};
