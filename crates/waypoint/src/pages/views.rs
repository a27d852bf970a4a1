//! View models and askama templates for the four pages

use askama::Template;
use url::{form_urlencoded, Url};

use super::picker::LocationPicker;
use super::state::PageState;
use crate::types::{SearchResult, Site, SubmissionResult};

const MAP_EMBED_BASE: &str = "https://www.google.com/maps/embed/v1/place";
const MAP_EMBED_ZOOM: &str = "15";
const MAPS_SCRIPT_BASE: &str = "https://maps.googleapis.com/maps/api/js";

/// Link to a site's detail page. Everything the page shows travels in the query.
pub fn site_detail_href(site: &Site) -> String {
  let mut query = form_urlencoded::Serializer::new(String::new());
  query.append_pair("name", &site.name).append_pair("description", &site.description);
  if let Some(photo_url) = site.photo_url.as_deref().filter(|p| !p.is_empty()) {
    query.append_pair("photoUrl", photo_url);
  }
  query
    .append_pair("latitude", &site.latitude.to_string())
    .append_pair("longitude", &site.longitude.to_string());

  format!("/site/{}?{}", encode_path_segment(&site.name), query.finish())
}

fn encode_path_segment(segment: &str) -> String {
  // form encoding turns spaces into '+' and literal '+' into %2B
  form_urlencoded::byte_serialize(segment.as_bytes()).collect::<String>().replace('+', "%20")
}

/// Google Maps embed centred on the given coordinates, if a key is configured
pub fn map_embed_url(api_key: Option<&str>, latitude: &str, longitude: &str) -> Option<String> {
  let key = api_key?;
  let place = format!("{latitude},{longitude}");
  Url::parse_with_params(MAP_EMBED_BASE, &[("key", key), ("q", &place), ("zoom", MAP_EMBED_ZOOM)])
    .ok()
    .map(String::from)
}

/// One destination card on the search or destinations grid
#[derive(Debug, Clone, PartialEq)]
pub struct SiteCard {
  pub name: String,
  pub description: String,
  pub photo_url: Option<String>,
  pub detail_href: String,
  pub match_percent: Option<i64>,
}

impl SiteCard {
  pub fn from_site(site: &Site) -> Self {
    Self {
      name: site.name.clone(),
      description: site.description.clone(),
      photo_url: site.photo_url.clone().filter(|p| !p.is_empty()),
      detail_href: site_detail_href(site),
      match_percent: None,
    }
  }

  pub fn from_result(result: &SearchResult) -> Self {
    Self { match_percent: Some(result.match_percent()), ..Self::from_site(&result.site) }
  }

  /// Cards without a name are never rendered
  pub fn from_sites<'a>(sites: impl IntoIterator<Item = &'a Site>) -> Vec<Self> {
    sites.into_iter().filter(|s| !s.name.trim().is_empty()).map(Self::from_site).collect()
  }

  pub fn from_results<'a>(results: impl IntoIterator<Item = &'a SearchResult>) -> Vec<Self> {
    results
      .into_iter()
      .filter(|r| !r.site.name.trim().is_empty())
      .map(Self::from_result)
      .collect()
  }

  pub fn photo(&self) -> Option<&str> {
    self.photo_url.as_deref()
  }

  pub fn score(&self) -> Option<i64> {
    self.match_percent
  }
}

// Search
// ======

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
  pub message: String,
  pub cards: Vec<SiteCard>,
}

#[derive(Template)]
#[template(path = "search.html")]
pub struct SearchPage {
  pub query: String,
  pub state: PageState<SearchResults>,
}

// Destinations
// ============

#[derive(Template)]
#[template(path = "destinations.html")]
pub struct DestinationsPage {
  pub state: PageState<Vec<SiteCard>>,
}

// Site detail
// ===========

/// Detail fields exactly as they arrived in the link; nothing is re-fetched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteDetail {
  pub name: String,
  pub description: String,
  pub photo_url: Option<String>,
  pub latitude: Option<String>,
  pub longitude: Option<String>,
}

#[derive(Template)]
#[template(path = "site.html")]
pub struct SitePage {
  pub detail: SiteDetail,
  pub map_embed_url: Option<String>,
}

impl SitePage {
  pub fn new(detail: SiteDetail, maps_api_key: Option<&str>) -> Self {
    let map_embed_url = match (&detail.latitude, &detail.longitude) {
      (Some(lat), Some(lng)) => map_embed_url(maps_api_key, lat, lng),
      _ => None,
    };
    Self { detail, map_embed_url }
  }

  pub fn photo(&self) -> Option<&str> {
    self.detail.photo_url.as_deref()
  }

  pub fn map(&self) -> Option<&str> {
    self.map_embed_url.as_deref()
  }
}

// Submit
// ======

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionView {
  pub original_description: Option<String>,
  pub enhanced_description: Option<String>,
}

impl From<Option<SubmissionResult>> for SubmissionView {
  fn from(result: Option<SubmissionResult>) -> Self {
    match result {
      Some(r) => Self {
        original_description: Some(r.original_description),
        enhanced_description: Some(r.enhanced_description),
      },
      None => Self::default(),
    }
  }
}

impl SubmissionView {
  pub fn original(&self) -> Option<&str> {
    self.original_description.as_deref()
  }

  pub fn enhanced(&self) -> Option<&str> {
    self.enhanced_description.as_deref()
  }
}

/// Seconds before a successful submission redirects to the destinations page
pub const REDIRECT_AFTER_SECS: u8 = 2;

pub const DESCRIPTION_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MAX_WORDS: usize = 30;

#[derive(Template)]
#[template(path = "submit.html")]
pub struct SubmitPage {
  pub name: String,
  pub description: String,
  pub picker: LocationPicker,
  pub maps_api_key: Option<String>,
  pub state: PageState<SubmissionView>,
}

impl SubmitPage {
  pub fn blank(maps_api_key: Option<String>) -> Self {
    Self {
      name: String::new(),
      description: String::new(),
      picker: LocationPicker::new(),
      maps_api_key,
      state: PageState::Idle,
    }
  }

  pub fn word_count(&self) -> usize {
    self.description.split_whitespace().count()
  }

  pub fn max_words(&self) -> usize {
    DESCRIPTION_MAX_WORDS
  }

  pub fn max_chars(&self) -> usize {
    DESCRIPTION_MAX_CHARS
  }

  pub fn redirect_secs(&self) -> u8 {
    REDIRECT_AFTER_SECS
  }

  pub fn latitude_value(&self) -> String {
    self.picker.selected().map(|(lat, _)| lat.to_string()).unwrap_or_default()
  }

  pub fn longitude_value(&self) -> String {
    self.picker.selected().map(|(_, lng)| lng.to_string()).unwrap_or_default()
  }

  pub fn center_latitude(&self) -> f64 {
    self.picker.center().0
  }

  pub fn center_longitude(&self) -> f64 {
    self.picker.center().1
  }

  pub fn maps_script_url(&self) -> Option<String> {
    let key = self.maps_api_key.as_deref()?;
    Url::parse_with_params(MAPS_SCRIPT_BASE, &[("key", key), ("callback", "initMap")])
      .ok()
      .map(String::from)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn bali() -> Site {
    Site {
      name: "Bali Beach".to_string(),
      description: "Sand & sun".to_string(),
      photo_url: Some("https://photos.example.com/bali.jpg".to_string()),
      latitude: -8.34,
      longitude: 115.09,
    }
  }

  #[test]
  fn test_site_detail_href_encodes_fields() {
    let href = site_detail_href(&bali());
    assert_eq!(
      href,
      "/site/Bali%20Beach?name=Bali+Beach&description=Sand+%26+sun\
       &photoUrl=https%3A%2F%2Fphotos.example.com%2Fbali.jpg&latitude=-8.34&longitude=115.09"
    );
  }

  #[test]
  fn test_site_detail_href_without_photo() {
    let site = Site { photo_url: None, ..bali() };
    assert!(!site_detail_href(&site).contains("photoUrl"));
  }

  #[test]
  fn test_cards_skip_unnamed_sites() {
    let unnamed = Site { name: "  ".to_string(), ..bali() };
    let cards = SiteCard::from_sites([&bali(), &unnamed]);
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].name, "Bali Beach");
    assert_eq!(cards[0].score(), None);
  }

  #[test]
  fn test_result_card_carries_score() {
    let result = SearchResult { site: Site { photo_url: Some(String::new()), ..bali() }, similarity: 0.876 };
    let card = SiteCard::from_result(&result);
    assert_eq!(card.score(), Some(88));
    assert_eq!(card.photo(), None);
  }

  #[test]
  fn test_map_embed_url() {
    assert_eq!(map_embed_url(None, "1", "2"), None);
    assert_eq!(
      map_embed_url(Some("abc"), "-8.34", "115.09").as_deref(),
      Some("https://www.google.com/maps/embed/v1/place?key=abc&q=-8.34%2C115.09&zoom=15")
    );
  }

  #[test]
  fn test_search_page_renders_cards() {
    let page = SearchPage {
      query: "beach".to_string(),
      state: PageState::Ready(SearchResults {
        message: "Top 3 recommended sites for you: Bali Beach".to_string(),
        cards: vec![SiteCard::from_result(&SearchResult { site: bali(), similarity: 0.92 })],
      }),
    };

    let html = page.render().unwrap();
    assert!(html.contains("Top 3 recommended sites for you"));
    assert!(html.contains("Bali Beach"));
    assert!(html.contains("Match score: 92%"));
    assert!(html.contains("photos.example.com"));
  }

  #[test]
  fn test_destinations_page_states() {
    let empty = DestinationsPage { state: PageState::Ready(Vec::new()) }.render().unwrap();
    assert!(empty.contains("No destinations found"));

    let failed = DestinationsPage { state: PageState::failed("Backend is unreachable", "/destinations") }
      .render()
      .unwrap();
    assert!(failed.contains("Backend is unreachable"));
    assert!(failed.contains("Try Again"));
  }

  #[test]
  fn test_site_page_escapes_query_values() {
    let detail = SiteDetail {
      name: "<script>alert(1)</script>".to_string(),
      description: "Tampered".to_string(),
      photo_url: None,
      latitude: Some("1".to_string()),
      longitude: Some("2".to_string()),
    };

    let html = SitePage::new(detail, None).render().unwrap();
    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("Map unavailable"));
  }

  #[test]
  fn test_submit_page_keeps_picked_location() {
    let page = SubmitPage {
      name: "Zion".to_string(),
      description: "Red canyon walls".to_string(),
      picker: LocationPicker::at(Some((37.2982, -113.0263))),
      maps_api_key: Some("abc".to_string()),
      state: PageState::failed("Failed to submit site to backend", "/submit"),
    };

    assert_eq!(page.word_count(), 3);
    assert_eq!(page.latitude_value(), "37.2982");
    let html = page.render().unwrap();
    assert!(html.contains("Selected location: 37.298200, -113.026300"));
    assert!(html.contains("Failed to submit site to backend"));
    assert!(html.contains("callback=initMap"));
  }

  #[test]
  fn test_submit_page_success_redirects() {
    let page = SubmitPage {
      state: PageState::Ready(SubmissionView {
        original_description: Some("red rocks".to_string()),
        enhanced_description: Some("Towering red sandstone cliffs".to_string()),
      }),
      ..SubmitPage::blank(None)
    };

    let html = page.render().unwrap();
    assert!(html.contains("Successfully Added!"));
    assert!(html.contains("Towering red sandstone cliffs"));
    assert!(html.contains(r#"http-equiv="refresh""#));
  }
}
