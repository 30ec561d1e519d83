use const_format::concatcp;
use lazy_static::lazy_static;
use reqwest::Client;

pub const USER_AGENT: &str = concatcp!(
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION"),
    " ( https://crates.io/crates/",
    env!("CARGO_PKG_NAME"),
    " )"
);

lazy_static! {
    pub static ref CLIENT: Client = Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_default();
}
