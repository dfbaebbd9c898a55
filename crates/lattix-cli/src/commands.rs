pub mod grow;
pub mod sites;
