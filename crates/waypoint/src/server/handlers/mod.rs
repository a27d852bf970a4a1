pub mod pages;
pub mod search;
pub mod sites;
pub mod status;
pub mod submit;
