//! Map markers for institutions.
//!
//! Each accepted [`LocationRecord`](crate::dataset::LocationRecord) becomes
//! exactly one [`MarkerEntry`]. Everything a map widget needs to draw the
//! marker (position, icon, popup and tooltip text) is derived once, when the
//! [`MarkerIndex`] is built.
//!
//! # Example
//!
//! ```
//! use edumap::dataset::LocationRecord;
//! use edumap::marker::{MarkerIndex, TypePalette};
//!
//! let records = vec![
//!     LocationRecord::new("Cluj", "Liceul Teoretic Ion Agârbiceanu", "Liceu", 46.55, 23.57),
//!     LocationRecord::new("Timiș", "Grădinița nr. 5", "Grădiniță", 45.75, 21.23),
//! ];
//!
//! let index = MarkerIndex::build(records, &TypePalette::default());
//! assert_eq!(index.len(), 2);
//! assert_eq!(index.all_counties(), vec!["Cluj", "Timiș"]);
//! ```

mod entry;
mod index;
mod palette;
mod popup;

pub use entry::{IconDescriptor, MarkerEntry, MarkerId};
pub use index::MarkerIndex;
pub use palette::{short_label, TypePalette, DEFAULT_COLOR};
pub use popup::{escape_html, popup_html, COORDINATE_PRECISION};
