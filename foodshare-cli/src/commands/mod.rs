pub(crate) mod admin;
pub(crate) mod config;
pub(crate) mod dashboard;
pub(crate) mod listing;
pub(crate) mod listings;
pub(crate) mod load;
pub(crate) mod report;
