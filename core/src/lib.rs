pub mod backend;
pub mod config;
pub mod linked_text;
pub mod media_url;
pub mod model;
pub mod timeline;

#[cfg(test)]
mod test;
