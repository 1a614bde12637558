//! Google Places, split into the browser-side client (which only talks to the
//! proxy) and the server-side upstream client (which holds the secret key).

mod client;
mod normalize;
pub mod types;
mod upstream;

pub use client::GooglePlacesClient;
pub use normalize::{category_for, normalize_place, photo_url};
pub use types::{DetailsEnvelope, NearbyEnvelope, PlaceResult, PlacesStatus};
pub use upstream::{GooglePlacesUpstream, NearbyParams, UpstreamReply, DETAILS_FIELDS};
