//! News-feed endpoint address, resolved at compile time. The app talks to a
//! plain HTTP service on the local network by default; override with the
//! `NEWS_SERVER_*` env vars at build time.

const fn server_host() -> &'static str {
    if let Some(host) = option_env!("NEWS_SERVER_HOST") {
        host
    } else {
        "192.168.1.100"
    }
}

const fn server_port() -> u16 {
    if let Some(port) = option_env!("NEWS_SERVER_PORT") {
        const_str::parse!(port, u16)
    } else {
        3000
    }
}

const fn server_secure() -> bool {
    if let Some(secure) = option_env!("NEWS_SERVER_SECURE") {
        const_str::eq_ignore_ascii_case!(secure, "true") || const_str::equal!(secure, "1")
    } else {
        false
    }
}

const fn server_http_proto() -> &'static str {
    if server_secure() { "https" } else { "http" }
}

const SERVER_HOST: &str = server_host();
const SERVER_PORT: u16 = server_port();
const SERVER_HTTP_PROTO: &str = server_http_proto();

const SERVER_SOCKET: &str = const_str::concat!(SERVER_HOST, ":", SERVER_PORT);
const SERVER_HTTP_URL: &str = const_str::concat!(SERVER_HTTP_PROTO, "://", SERVER_SOCKET);

pub fn articles_url() -> String {
    format!("{SERVER_HTTP_URL}/articles")
}
