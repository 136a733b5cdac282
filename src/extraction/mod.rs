//! Parsing adapters for remote responses

pub mod links;

pub use links::{
    first_url_from_text, is_absolute_url, is_on_domain, links_from_items, shorten_url,
    urls_from_text, ResultLink,
};
