//! Where each provider generation keeps each piece of place data.

/// Ordered candidate paths (dotted) for every accessor of [`Place`](super::Place).
///
/// The first candidate that resolves to a value of the expected type wins. An
/// empty list marks a class of information the provider cannot supply, so
/// the accessor is always absent.
#[derive(Debug, Clone, Copy)]
pub struct PlaceSchema {
    pub latitude: &'static [&'static str],
    pub longitude: &'static [&'static str],
    pub formatted_address: &'static [&'static str],
    pub vicinity: &'static [&'static str],
    pub name: &'static [&'static str],
    pub place_id: &'static [&'static str],
    pub types: &'static [&'static str],
    pub website: &'static [&'static str],
    pub maps_url: &'static [&'static str],
    pub rating: &'static [&'static str],
    pub rating_count: &'static [&'static str],
    pub price_level: &'static [&'static str],
    pub business_status: &'static [&'static str],
    pub opening_periods: &'static [&'static str],
    pub open_now: &'static [&'static str],
    pub photos: &'static [&'static str],
    pub phone_number: &'static [&'static str],
    pub reviews: &'static [&'static str],
    pub address_components: &'static [&'static str],
    /// Paths inside one address component.
    pub component_types: &'static [&'static str],
    pub component_short_text: &'static [&'static str],
    pub component_long_text: &'static [&'static str],
}

const UNSUPPORTED: &[&str] = &[];

const VERSIONED: PlaceSchema = PlaceSchema {
    latitude: &["location.latitude"],
    longitude: &["location.longitude"],
    formatted_address: &["formattedAddress"],
    vicinity: &["shortFormattedAddress", "formattedAddress"],
    name: &["displayName.text", "displayName"],
    place_id: &["id"],
    types: &["types"],
    website: &["websiteUri"],
    maps_url: &["googleMapsUri"],
    rating: &["rating"],
    rating_count: &["userRatingCount"],
    price_level: &["priceLevel"],
    business_status: &["businessStatus"],
    opening_periods: &["regularOpeningHours.periods", "currentOpeningHours.periods"],
    open_now: &["currentOpeningHours.openNow", "regularOpeningHours.openNow"],
    photos: &["photos"],
    phone_number: &["internationalPhoneNumber", "nationalPhoneNumber"],
    reviews: &["reviews"],
    address_components: &["addressComponents"],
    component_types: &["types"],
    component_short_text: &["shortText", "short_name"],
    component_long_text: &["longText", "long_name"],
};

const LEGACY: PlaceSchema = PlaceSchema {
    latitude: &["geometry.location.lat"],
    longitude: &["geometry.location.lng"],
    formatted_address: &["formatted_address"],
    vicinity: &["vicinity", "formatted_address"],
    name: &["name"],
    place_id: &["place_id"],
    types: &["types"],
    website: &["website"],
    maps_url: &["url"],
    rating: &["rating"],
    rating_count: &["user_ratings_total"],
    price_level: &["price_level"],
    business_status: &["business_status"],
    opening_periods: &["opening_hours.periods"],
    open_now: &["opening_hours.open_now"],
    photos: &["photos"],
    phone_number: &["international_phone_number", "formatted_phone_number"],
    reviews: &["reviews"],
    address_components: &["address_components"],
    component_types: &["types"],
    component_short_text: &["short_name", "shortText"],
    component_long_text: &["long_name", "longText"],
};

pub static VERSIONED_DETAILS: PlaceSchema = VERSIONED;

/// Text search records carry no address decomposition, phone number or reviews.
pub static VERSIONED_SEARCH: PlaceSchema = PlaceSchema {
    phone_number: UNSUPPORTED,
    reviews: UNSUPPORTED,
    address_components: UNSUPPORTED,
    ..VERSIONED
};

pub static LEGACY_DETAILS: PlaceSchema = LEGACY;

/// Find Place candidates carry no address decomposition, phone number or reviews.
pub static LEGACY_FIND_PLACE: PlaceSchema = PlaceSchema {
    phone_number: UNSUPPORTED,
    reviews: UNSUPPORTED,
    address_components: UNSUPPORTED,
    ..LEGACY
};
