//! Location picker state for the submit page's map
//!
//! Each click moves the single marker: the previous one is removed before the
//! new one is placed, so at most one marker exists at any time. The inline map
//! script on the submit page follows the same rule in the browser.

/// Where the map is centred before anything is picked
pub const DEFAULT_CENTER: (f64, f64) = (39.8283, -98.5795);
pub const DEFAULT_ZOOM: u8 = 4;
pub const PICKED_ZOOM: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Marker {
  latitude: f64,
  longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationPicker {
  marker: Option<Marker>,
}

impl LocationPicker {
  pub fn new() -> Self {
    Self::default()
  }

  /// Picker with a marker already placed, e.g. from posted form coordinates
  pub fn at(coordinates: Option<(f64, f64)>) -> Self {
    let mut picker = Self::new();
    if let Some((latitude, longitude)) = coordinates {
      picker.click(latitude, longitude);
    }
    picker
  }

  /// Handle a map click: drop the previous marker, then place one at the click
  pub fn click(&mut self, latitude: f64, longitude: f64) {
    self.marker.take();
    self.marker = Some(Marker { latitude, longitude });
  }

  pub fn marker_count(&self) -> usize {
    usize::from(self.marker.is_some())
  }

  pub fn selected(&self) -> Option<(f64, f64)> {
    self.marker.map(|m| (m.latitude, m.longitude))
  }

  /// "lat, lng" with six decimals, as shown under the form
  pub fn selected_label(&self) -> Option<String> {
    self.marker.map(|m| format!("{:.6}, {:.6}", m.latitude, m.longitude))
  }

  /// Map centre: the marker if any, otherwise the default centre
  pub fn center(&self) -> (f64, f64) {
    self.selected().unwrap_or(DEFAULT_CENTER)
  }

  pub fn zoom(&self) -> u8 {
    if self.marker.is_some() {
      PICKED_ZOOM
    } else {
      DEFAULT_ZOOM
    }
  }
}
